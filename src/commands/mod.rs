//! Command-line interface and orchestration.

mod init;
mod rank;
mod validate;

pub use init::{InitArgs, init_config};
pub use rank::{RankArgs, process_rankings};
pub use validate::{ValidateArgs, validate_config};
