use serde::{Deserialize, Serialize};

/// A playable game discovered under the games root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCatalogEntry {
    /// Directory name, also used in `/game/{id}/` URLs and score submissions
    pub id: String,
    /// Human readable label derived from `id`
    pub name: String,
}

impl GameCatalogEntry {
    pub fn from_dir_name(id: impl Into<String>) -> Self {
        let id = id.into();
        let name = display_name(&id);
        Self { id, name }
    }
}

/// Turns a directory name into a title: `neon-pong` -> `Neon Pong`.
///
/// Separators (`-`, `_`) become spaces, every word starts upper case and the
/// rest of the word is lower cased.
pub fn display_name(id: &str) -> String {
    let spaced: String = id
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();

    let mut out = String::with_capacity(spaced.len());
    let mut word_start = true;
    for c in spaced.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

/// Whether `id` can safely address a directory directly below the games root.
pub fn is_valid_game_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && !id.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_replaces_separators() {
        assert_eq!(display_name("neon-pong"), "Neon Pong");
        assert_eq!(display_name("space_invaders"), "Space Invaders");
        assert_eq!(display_name("tetris"), "Tetris");
    }

    #[test]
    fn test_display_name_title_cases_words() {
        assert_eq!(display_name("SNAKE-game"), "Snake Game");
        assert_eq!(display_name("2048-clone"), "2048 Clone");
        assert_eq!(display_name("pac-man-3d"), "Pac Man 3D");
    }

    #[test]
    fn test_entry_from_dir_name() {
        let entry = GameCatalogEntry::from_dir_name("neon-pong");
        assert_eq!(entry.id, "neon-pong");
        assert_eq!(entry.name, "Neon Pong");
    }

    #[test]
    fn test_game_id_validation() {
        assert!(is_valid_game_id("neon-pong"));
        assert!(!is_valid_game_id(""));
        assert!(!is_valid_game_id(".."));
        assert!(!is_valid_game_id(".hidden"));
        assert!(!is_valid_game_id("a/b"));
        assert!(!is_valid_game_id("a\\b"));
    }
}
