//! Command-line configuration
//!
//! Flags mirror the classic launcher: search mode, table size and
//! dispersion always; block size and exploration only under closed
//! hashing. Started bare, the program reads the same flags from the
//! first line of `table_properties.conf`.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use bibhash_core::{DispersionFunction, ExplorationFunction, TableConfig};
use clap::{Parser, ValueEnum};

use crate::book::SearchMode;

/// Fallback configuration file read when no flags are given
pub const CONF_FILE: &str = "table_properties.conf";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SearchModeArg {
    Name,
    Author,
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DispersionArg {
    Mod,
    Sum,
    Random,
}

impl From<DispersionArg> for DispersionFunction {
    fn from(arg: DispersionArg) -> Self {
        match arg {
            DispersionArg::Mod => DispersionFunction::Mod,
            DispersionArg::Sum => DispersionFunction::Sum,
            DispersionArg::Random => DispersionFunction::Random,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExplorationArg {
    Linear,
    Quadratic,
    Double,
    Redispersion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HashModeArg {
    Open,
    Close,
}

#[derive(Parser, Debug)]
#[command(name = "bibhash", about = "Library catalog over a pluggable hash table")]
pub struct Args {
    /// Book fields that feed the hash value
    #[arg(long, value_enum, default_value = "name")]
    pub search_mode: SearchModeArg,

    /// Number of buckets in the table
    #[arg(long)]
    pub table_size: usize,

    /// Function mapping a book to its primary bucket
    #[arg(long, value_enum)]
    pub dispersion: DispersionArg,

    /// open (chaining) or close (probing)
    #[arg(long, value_enum)]
    pub hash: HashModeArg,

    /// Bucket capacity; closed hashing only
    #[arg(long)]
    pub block_size: Option<usize>,

    /// Probe offset strategy; closed hashing only
    #[arg(long, value_enum)]
    pub exploration: Option<ExplorationArg>,

    /// Auxiliary dispersion for double-dispersion exploration
    #[arg(long, value_enum)]
    pub aux_dispersion: Option<DispersionArg>,

    /// Catalog file
    #[arg(long, default_value = "library.dat")]
    pub file: PathBuf,
}

/// Error type for startup configuration
#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingConfFile,
    BadConfFile(String),
    ClosedWithoutBlockSize,
    ClosedWithoutExploration,
    OpenWithProbingFlags,
    DoubleWithoutAux,
    AuxWithoutDouble,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingConfFile => {
                write!(f, "no flags given and '{}' not found", CONF_FILE)
            }
            ArgsError::BadConfFile(msg) => {
                write!(f, "invalid flags in '{}': {}", CONF_FILE, msg)
            }
            ArgsError::ClosedWithoutBlockSize => {
                write!(f, "closed hashing needs --block-size")
            }
            ArgsError::ClosedWithoutExploration => {
                write!(f, "closed hashing needs --exploration")
            }
            ArgsError::OpenWithProbingFlags => write!(
                f,
                "open hashing takes neither --block-size, --exploration nor --aux-dispersion"
            ),
            ArgsError::DoubleWithoutAux => {
                write!(f, "double-dispersion exploration needs --aux-dispersion")
            }
            ArgsError::AuxWithoutDouble => write!(
                f,
                "--aux-dispersion only applies to double-dispersion exploration"
            ),
        }
    }
}

impl std::error::Error for ArgsError {}

impl Args {
    /// Parse from argv, or from the conf file when started bare
    pub fn resolve() -> Result<Self, ArgsError> {
        if std::env::args_os().len() > 1 {
            return Ok(Self::parse());
        }
        let contents = fs::read_to_string(CONF_FILE).map_err(|_| ArgsError::MissingConfFile)?;
        let first_line = contents.lines().next().unwrap_or("");
        Self::from_conf_line(first_line)
    }

    /// Parse one line of flags as if it were the command line
    pub fn from_conf_line(line: &str) -> Result<Self, ArgsError> {
        Self::try_parse_from(std::iter::once("bibhash").chain(line.split_whitespace()))
            .map_err(|err| ArgsError::BadConfFile(err.to_string()))
    }

    pub fn search_mode(&self) -> SearchMode {
        match self.search_mode {
            SearchModeArg::Name => SearchMode::Name,
            SearchModeArg::Author => SearchMode::Author,
            SearchModeArg::Both => SearchMode::NameAndAuthor,
        }
    }

    /// Cross-flag validation the flag grammar cannot express, producing
    /// the engine configuration. Incompatibilities are fatal at startup.
    pub fn table_config(&self) -> Result<TableConfig, ArgsError> {
        let dispersion = DispersionFunction::from(self.dispersion);
        match self.hash {
            HashModeArg::Open => {
                if self.block_size.is_some()
                    || self.exploration.is_some()
                    || self.aux_dispersion.is_some()
                {
                    return Err(ArgsError::OpenWithProbingFlags);
                }
                Ok(TableConfig::open(self.table_size, dispersion))
            }
            HashModeArg::Close => {
                let block_size = self.block_size.ok_or(ArgsError::ClosedWithoutBlockSize)?;
                let exploration_arg = self
                    .exploration
                    .ok_or(ArgsError::ClosedWithoutExploration)?;
                if exploration_arg != ExplorationArg::Double && self.aux_dispersion.is_some() {
                    return Err(ArgsError::AuxWithoutDouble);
                }
                let exploration = match exploration_arg {
                    ExplorationArg::Linear => ExplorationFunction::Linear,
                    ExplorationArg::Quadratic => ExplorationFunction::Quadratic,
                    ExplorationArg::Double => {
                        let aux = self.aux_dispersion.ok_or(ArgsError::DoubleWithoutAux)?;
                        ExplorationFunction::DoubleDispersion(aux.into())
                    }
                    ExplorationArg::Redispersion => ExplorationFunction::Redispersion,
                };
                Ok(TableConfig::closed(
                    self.table_size,
                    dispersion,
                    block_size,
                    exploration,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibhash_core::TableLayout;

    #[test]
    fn test_closed_configuration_line() {
        let args = Args::from_conf_line(
            "--table-size 10 --dispersion mod --hash close --block-size 3 --exploration quadratic",
        )
        .unwrap();
        let config = args.table_config().unwrap();
        assert_eq!(config.table_size, 10);
        assert_eq!(
            config.layout,
            TableLayout::Closed {
                block_size: 3,
                exploration: ExplorationFunction::Quadratic,
            }
        );
    }

    #[test]
    fn test_open_configuration_line() {
        let args =
            Args::from_conf_line("--table-size 8 --dispersion sum --hash open").unwrap();
        let config = args.table_config().unwrap();
        assert_eq!(config.layout, TableLayout::Open);
        assert_eq!(config.dispersion, DispersionFunction::Sum);
    }

    #[test]
    fn test_closed_hashing_requires_probing_flags() {
        let args = Args::from_conf_line("--table-size 8 --dispersion mod --hash close").unwrap();
        assert_eq!(args.table_config(), Err(ArgsError::ClosedWithoutBlockSize));

        let args = Args::from_conf_line(
            "--table-size 8 --dispersion mod --hash close --block-size 2",
        )
        .unwrap();
        assert_eq!(args.table_config(), Err(ArgsError::ClosedWithoutExploration));
    }

    #[test]
    fn test_open_hashing_rejects_probing_flags() {
        let args = Args::from_conf_line(
            "--table-size 8 --dispersion mod --hash open --block-size 2",
        )
        .unwrap();
        assert_eq!(args.table_config(), Err(ArgsError::OpenWithProbingFlags));
    }

    #[test]
    fn test_double_dispersion_aux_rules() {
        let args = Args::from_conf_line(
            "--table-size 8 --dispersion mod --hash close --block-size 2 --exploration double",
        )
        .unwrap();
        assert_eq!(args.table_config(), Err(ArgsError::DoubleWithoutAux));

        let args = Args::from_conf_line(
            "--table-size 8 --dispersion mod --hash close --block-size 2 \
             --exploration linear --aux-dispersion sum",
        )
        .unwrap();
        assert_eq!(args.table_config(), Err(ArgsError::AuxWithoutDouble));

        let args = Args::from_conf_line(
            "--table-size 8 --dispersion mod --hash close --block-size 2 \
             --exploration double --aux-dispersion sum",
        )
        .unwrap();
        let config = args.table_config().unwrap();
        assert_eq!(
            config.layout,
            TableLayout::Closed {
                block_size: 2,
                exploration: ExplorationFunction::DoubleDispersion(DispersionFunction::Sum),
            }
        );
    }

    #[test]
    fn test_bad_conf_line_is_reported() {
        assert!(matches!(
            Args::from_conf_line("--table-size ten"),
            Err(ArgsError::BadConfFile(_))
        ));
    }
}
