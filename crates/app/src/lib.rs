//! `stockledger-app`: terminal front end.
//!
//! Each page of the ledger (Stock, Orders, History) is a subcommand; pages
//! render plain-text cards and tables, or JSON with `--json`.

pub mod cli;
pub mod console;
pub mod pages;
pub mod render;

use stockledger_client::ClientError;
use thiserror::Error;

/// A mutation failure that the notifier has already shown to the user.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Reported(pub ClientError);

pub use cli::{Cli, Commands};
pub use console::ConsoleNotifier;
