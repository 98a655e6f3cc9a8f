//! Command line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "pricelist-normalizer",
    version,
    about = "Normalize supplier price-list spreadsheets into a single CSV",
    long_about = "Reads one or more price-list workbooks (xlsx, xls, ods or csv), \
                  detects the header row of every sheet, maps each row to a price-list \
                  record and writes all records to one CSV file."
)]
pub struct Cli {
    /// Workbook or CSV files to read, processed in the given order.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Destination CSV file (falls back to PRICELIST_OUTPUT).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write a JSON run summary to this path.
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// How to locate the header row of each sheet.
    #[arg(long, value_enum, default_value = "scan")]
    pub header_mode: HeaderModeArg,

    /// Use this 0-based row as the header of every sheet (overrides --header-mode).
    #[arg(long, value_name = "N")]
    pub header_row: Option<usize>,

    /// Unit used when a row has none (falls back to PRICELIST_DEFAULT_UNIT, then EA).
    #[arg(long, value_name = "UNIT")]
    pub default_unit: Option<String>,

    /// Category used for generically named sheets like "Sheet1".
    #[arg(long, value_name = "CATEGORY")]
    pub default_category: Option<String>,

    /// Supplier used when a row has none.
    #[arg(long, value_name = "NAME")]
    pub supplier: Option<String>,

    /// Prefix of generated record ids.
    #[arg(long, value_name = "PREFIX")]
    pub id_prefix: Option<String>,

    /// Field delimiter of the output file.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeaderModeArg {
    /// Scan the first rows for header keywords.
    Scan,
    /// Always use the first row.
    Default,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_inputs_and_output() {
        let cli = Cli::try_parse_from([
            "pricelist-normalizer",
            "-o",
            "out.csv",
            "a.xlsx",
            "b.xlsx",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.inputs.len(), 2);
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.header_mode, HeaderModeArg::Scan);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn requires_an_input() {
        assert!(Cli::try_parse_from(["pricelist-normalizer", "-o", "out.csv"]).is_err());
    }
}
