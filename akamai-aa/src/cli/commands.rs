//! CLI command and subcommand definitions
//!
//! Commands and flags are listed alphabetically in help output; they are
//! also declared in that order.

use aa_core::api::MeasuresQuery;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Adaptive Acceleration reporting CLI
#[derive(Parser, Debug)]
#[command(name = "akamai-aa")]
#[command(version, about = "A CLI to interact with Akamai Adaptive Acceleration", long_about = None)]
#[command(next_display_order = None::<usize>)]
pub struct Cli {
    /// Location of the credentials file (default: ~/.edgerc)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging, including request and response lines
    #[arg(long)]
    pub debug: bool,

    /// Output format (overrides config file)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Don't load the CLI config file (~/.config/akamai-aa/cli.toml)
    #[arg(long)]
    pub no_config: bool,

    /// Section of the credentials file (default: default)
    #[arg(long)]
    pub section: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output, as returned by the API
    Json,
    /// Pretty table output
    Table,
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Table => crate::format::OutputFormat::Table,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
#[command(next_display_order = None::<usize>)]
pub enum Commands {
    /// Contract related commands. List Usage per contract and List Statistics per contract
    Contracts {
        #[command(subcommand)]
        command: ContractsCommands,
    },

    /// List usage data matching any criteria specified by a Query object.
    ///
    /// The query needs to specify at least one contractID or reporting-groupID value.
    #[command(visible_alias = "c")]
    Measures(MeasuresArgs),

    /// Reporting Groups related commands. List Usage per reporting group and List Statistics per reporting group
    ReportingGroups {
        #[command(subcommand)]
        command: ReportingGroupsCommands,
    },
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
#[command(next_display_order = None::<usize>)]
pub struct MeasuresArgs {
    /// Filter data to the specified set of contract identifiers, at least one item if specified.
    /// Otherwise if omitted, you need to specify a set of reporting-groupIDs
    #[arg(long = "contractIDs", value_name = "ID", value_delimiter = ',')]
    pub contract_ids: Vec<String>,

    /// The month (1–12) for which to aggregate data
    #[arg(long)]
    pub month: Option<u32>,

    /// Filter data to the specified set of product identifiers. An empty set produces
    /// unfiltered results, the same as omitting the flag
    #[arg(long = "productIDs", value_name = "ID", value_delimiter = ',')]
    pub product_ids: Vec<String>,

    /// Filter data to the specified set of reporting group identifiers, at least one item if
    /// specified. Otherwise if omitted, you need to specify a set of contractIDs
    #[arg(long = "reporting-groupIDs", value_name = "ID", value_delimiter = ',')]
    pub reporting_group_ids: Vec<String>,

    /// Statistics for which you want to retrieve data, each corresponding to a Statistic's
    /// name value. An empty set produces unfiltered results, the same as omitting the flag
    #[arg(long = "statistic-types", value_name = "TYPE", value_delimiter = ',')]
    pub statistic_types: Vec<String>,

    /// The year for which to aggregate data
    #[arg(long)]
    pub year: Option<i32>,
}

impl From<MeasuresArgs> for MeasuresQuery {
    fn from(args: MeasuresArgs) -> Self {
        MeasuresQuery {
            month: args.month,
            year: args.year,
            contract_ids: args.contract_ids,
            reporting_group_ids: args.reporting_group_ids,
            product_ids: args.product_ids,
            statistic_types: args.statistic_types,
        }
    }
}

#[derive(Subcommand, Debug)]
#[command(next_display_order = None::<usize>)]
pub enum ReportingGroupsCommands {
    /// List the reportable statistics for a reporting group.
    ///
    /// Optionally run this if there's only one type of information you want to include in a
    /// reporting group's usage report, rather than the complete set. Availability of reportable
    /// statistics may depend on the term of the contract, hence the need to specify them for a
    /// range of time.
    Statistics {
        /// Reporting group identifier
        reporting_group_id: String,
    },

    /// List a period of usage for a reporting group.
    ///
    /// Reporting groups collect sets of CP codes under a contract, allowing you to track billing
    /// for related types of traffic rather than for the entire contract. Usage is aggregated
    /// daily, with one value per statistic. Unless final is true, data may still update to
    /// reflect latent edge server traffic.
    Usage {
        /// Reporting group identifier
        reporting_group_id: String,
    },
}

#[derive(Subcommand, Debug)]
#[command(next_display_order = None::<usize>)]
pub enum ContractsCommands {
    /// List each type of reportable statistic for a contract.
    ///
    /// Optionally run this if there's only one type of information you want to include in your
    /// usage report, rather than the complete set. Availability may depend on the term of the
    /// contract, hence the need to specify them for a range of time.
    Statistics {
        /// Contract identifier
        contract_id: String,
    },

    /// List a period of usage for an entire contract
    Usage {
        /// Contract identifier
        contract_id: String,
    },
}
