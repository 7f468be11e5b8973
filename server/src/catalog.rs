use anyhow::{Context, Result};
use arcade_common::{GameCatalogEntry, is_valid_game_id};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Lists every subdirectory of `games_root` as a playable game.
///
/// The directory is scanned on every call so the catalog always reflects what
/// is on disk. A missing root yields an empty catalog.
pub async fn list_games(games_root: &Path) -> Result<Vec<GameCatalogEntry>> {
    let mut dir = match tokio::fs::read_dir(games_root).await {
        Ok(dir) => dir,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Games directory {:?} does not exist", games_root);
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read games directory {:?}", games_root));
        }
    };

    let mut games = Vec::new();
    while let Some(entry) = dir.next_entry().await.context("Failed to read games directory entry")? {
        let file_type = entry.file_type().await.context("Failed to stat games directory entry")?;
        if !file_type.is_dir() {
            continue;
        }

        // Non UTF-8 names cannot round-trip through URLs
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!("Skipping game directory with non UTF-8 name: {:?}", entry.path());
            continue;
        };
        // Hidden directories (`.git`) cannot be served under /game/
        if !is_valid_game_id(&name) {
            debug!("Skipping game directory {:?}", name);
            continue;
        }
        games.push(GameCatalogEntry::from_dir_name(name));
    }

    games.sort_by(|a, b| a.id.cmp(&b.id));
    debug!("Found {} games in {:?}", games.len(), games_root);
    Ok(games)
}
