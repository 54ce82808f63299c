//! Command execution handlers
//!
//! Each handler makes exactly one client call and prints what it returns.

use anyhow::Result;
use serde_json::Value;

use crate::client::AaClient;

use super::commands::*;

/// Handle the measures command
pub async fn handle_measures(
    client: &AaClient,
    args: MeasuresArgs,
    format: &OutputFormat,
) -> Result<()> {
    let measures = client.list_measures(&args.into()).await?;
    print_result(&measures, format)
}

/// Handle reporting-groups commands
pub async fn handle_reporting_groups(
    client: &AaClient,
    command: ReportingGroupsCommands,
    format: &OutputFormat,
) -> Result<()> {
    let result = match command {
        ReportingGroupsCommands::Statistics { reporting_group_id } => {
            client.reporting_group_statistics(&reporting_group_id).await?
        }
        ReportingGroupsCommands::Usage { reporting_group_id } => {
            client.reporting_group_usage(&reporting_group_id).await?
        }
    };

    print_result(&result, format)
}

/// Handle contracts commands
pub async fn handle_contracts(
    client: &AaClient,
    command: ContractsCommands,
    format: &OutputFormat,
) -> Result<()> {
    let result = match command {
        ContractsCommands::Statistics { contract_id } => {
            client.contract_statistics(&contract_id).await?
        }
        ContractsCommands::Usage { contract_id } => client.contract_usage(&contract_id).await?,
    };

    print_result(&result, format)
}

fn print_result(value: &Value, format: &OutputFormat) -> Result<()> {
    let formatted = crate::format::format_value(value, &format.into())?;
    println!("{}", formatted);
    Ok(())
}
