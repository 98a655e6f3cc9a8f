use std::path::PathBuf;

use dotenvy::dotenv;

use crate::cli::{Cli, HeaderModeArg};
use crate::error::AppError;

pub const DEFAULT_UNIT: &str = "EA";
pub const DEFAULT_CATEGORY: &str = "Fencing";
pub const DEFAULT_ID_PREFIX: &str = "FENCE";

/// How the header row of a sheet is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStrategy {
    /// Keyword scan over the first rows, falling back to row 0.
    Scan,
    /// Always row 0.
    FirstRow,
    /// A fixed row index for every sheet.
    Fixed(usize),
}

/// Values applied to rows that do not carry them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDefaults {
    pub unit: String,
    pub category: String,
    pub supplier: String,
    pub id_prefix: String,
}

impl Default for MappingDefaults {
    fn default() -> Self {
        Self {
            unit: DEFAULT_UNIT.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            supplier: String::new(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub summary: Option<PathBuf>,
    pub header: HeaderStrategy,
    pub defaults: MappingDefaults,
    pub delimiter: u8,
}

impl Config {
    /// Loads `.env` from the working directory into the process environment.
    /// Returns the file that was read, if any.
    pub fn load_env_file() -> Option<PathBuf> {
        dotenv().ok()
    }

    /// Builds the run configuration from the command line, then the process
    /// environment (including a `.env` loaded by [`Config::load_env_file`]),
    /// then built-in defaults.
    pub fn from_cli(cli: Cli) -> Result<Self, AppError> {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    fn resolve(cli: Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let env_or = |arg: Option<String>, key: &str| {
            arg.or_else(|| env(key)).filter(|v| !v.trim().is_empty())
        };

        if cli.inputs.is_empty() {
            return Err(AppError::Config("at least one input file is required".to_string()));
        }

        let output = cli
            .output
            .or_else(|| {
                env("PRICELIST_OUTPUT")
                    .filter(|v| !v.trim().is_empty())
                    .map(PathBuf::from)
            })
            .ok_or_else(|| {
                AppError::Config("no output path: pass --output or set PRICELIST_OUTPUT".to_string())
            })?;

        if !cli.delimiter.is_ascii() {
            return Err(AppError::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                cli.delimiter
            )));
        }

        let header = match (cli.header_row, cli.header_mode) {
            (Some(row), _) => HeaderStrategy::Fixed(row),
            (None, HeaderModeArg::Scan) => HeaderStrategy::Scan,
            (None, HeaderModeArg::Default) => HeaderStrategy::FirstRow,
        };

        let base = MappingDefaults::default();
        let defaults = MappingDefaults {
            unit: env_or(cli.default_unit, "PRICELIST_DEFAULT_UNIT").unwrap_or(base.unit),
            category: env_or(cli.default_category, "PRICELIST_DEFAULT_CATEGORY")
                .unwrap_or(base.category),
            supplier: env_or(cli.supplier, "PRICELIST_SUPPLIER").unwrap_or(base.supplier),
            id_prefix: env_or(cli.id_prefix, "PRICELIST_ID_PREFIX").unwrap_or(base.id_prefix),
        };

        Ok(Config {
            inputs: cli.inputs,
            output,
            summary: cli.summary,
            header,
            defaults,
            delimiter: cli.delimiter as u8,
        })
    }
}
