pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod snapshot;
pub mod store;
pub mod util;

pub use config::Config;
pub use error::{Error, InputError, ParseError};
pub use report::Report;
pub use snapshot::{AccountUsage, Snapshot};
pub use store::diff::{ChangeKind, ChangeSet};
pub use store::LogPair;
