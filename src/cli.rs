use clap::Parser;
use std::path::PathBuf;

use crate::error::InputError;
use crate::store::LogPair;

#[derive(Parser, Debug)]
#[command(name = "megakeep-report")]
#[command(about = "Compare two account quota snapshot logs and write a change report")]
#[command(version)]
pub struct Cli {
    /// Older snapshot log (defaults to the second most recent in the log directory)
    pub log1: Option<PathBuf>,

    /// Newer snapshot log (defaults to the most recent in the log directory)
    pub log2: Option<PathBuf>,
}

impl Cli {
    /// The explicitly requested pair, `None` when logs should be discovered.
    pub fn explicit_pair(&self) -> Result<Option<LogPair>, InputError> {
        match (&self.log1, &self.log2) {
            (Some(before), Some(after)) => Ok(Some(LogPair::new(before, after))),
            (None, None) => Ok(None),
            _ => Err(InputError::IncompletePair),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_paths_form_pair() {
        let cli = Cli::try_parse_from(["megakeep-report", "old.log", "new.log"]).unwrap();
        let pair = cli.explicit_pair().unwrap().unwrap();
        assert_eq!(pair.before, PathBuf::from("old.log"));
        assert_eq!(pair.after, PathBuf::from("new.log"));
    }

    #[test]
    fn no_paths_means_discovery() {
        let cli = Cli::try_parse_from(["megakeep-report"]).unwrap();
        assert!(cli.explicit_pair().unwrap().is_none());
    }

    #[test]
    fn single_path_rejected() {
        let cli = Cli::try_parse_from(["megakeep-report", "old.log"]).unwrap();
        assert!(matches!(cli.explicit_pair(), Err(InputError::IncompletePair)));
    }

    #[test]
    fn flags_not_accepted() {
        assert!(Cli::try_parse_from(["megakeep-report", "--json"]).is_err());
    }
}
