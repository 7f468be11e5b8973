pub mod test_arcade;

pub use test_arcade::{TestArcade, test_ledger};
