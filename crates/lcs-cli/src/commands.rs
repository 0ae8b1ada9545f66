use std::path::Path;

use anyhow::bail;
use colored::Colorize;
use serde_json::{json, Value};

use lcs_contract::{Contract, ContractConfig, Response};
use lcs_gate::AccessRule;
use lcs_ledger::{split_composite_key, CallerIdentity, InMemoryLedger, COMPOSITE_NAMESPACE};
use lcs_types::Operation;

use crate::cli::*;
use crate::state::{load_ledger, save_ledger};

pub fn run_command(cli: Cli, config: ContractConfig) -> anyhow::Result<()> {
    match cli.command {
        Command::Invoke(args) => cmd_invoke(&cli.state, config, args, cli.format),
        Command::Operations(_) => cmd_operations(&config, cli.format),
        Command::Keys(args) => cmd_keys(&cli.state, args, cli.format),
    }
}

/// Run one operation against the ledger stored at `state`, saving it if the
/// operation committed anything.
pub fn invoke(
    state: &Path,
    config: ContractConfig,
    role: Option<&str>,
    operation: &str,
    args: &[String],
) -> anyhow::Result<Response> {
    let ledger = load_ledger(state)?;
    let height = ledger.height()?;
    let caller = role.map_or_else(CallerIdentity::anonymous, CallerIdentity::with_role);

    let response = Contract::new(config).invoke(&ledger, caller, operation, args);
    if ledger.height()? != height {
        save_ledger(state, &ledger)?;
    }
    Ok(response)
}

fn cmd_invoke(
    state: &Path,
    config: ContractConfig,
    args: InvokeArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let response = invoke(state, config, args.role.as_deref(), &args.operation, &args.args)?;

    match format {
        OutputFormat::Json => {
            let out = json!({
                "status": response.status,
                "message": response.message,
                "payload": payload_value(&response),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text if response.is_ok() => match payload_value(&response) {
            Value::Null => println!("{} {}", "✓".green().bold(), args.operation.bold()),
            value => println!("{}", serde_json::to_string_pretty(&value)?),
        },
        OutputFormat::Text => eprintln!("{} {}", "✗".red().bold(), response.message.red()),
    }

    if !response.is_ok() {
        bail!("{} failed with status {}", args.operation, response.status);
    }
    Ok(())
}

fn cmd_operations(config: &ContractConfig, format: OutputFormat) -> anyhow::Result<()> {
    let rows: Vec<(Operation, AccessRule)> = Operation::ALL
        .into_iter()
        .map(|op| (op, config.gate.rule(op)))
        .collect();

    match format {
        OutputFormat::Json => {
            let out: Vec<Value> = rows
                .iter()
                .map(|(op, rule)| {
                    json!({
                        "name": op.name(),
                        "arity": op.arity(),
                        "mutating": op.is_mutating(),
                        "rule": rule,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            for (op, rule) in rows {
                println!("  {:<26} {} args  {}", op.name().bold(), op.arity(), describe_rule(&rule));
            }
        }
    }
    Ok(())
}

fn cmd_keys(state: &Path, args: KeysArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ledger = load_ledger(state)?;
    let keys = rendered_keys(&ledger, args.prefix.as_deref())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&keys)?),
        OutputFormat::Text if keys.is_empty() => println!("No keys."),
        OutputFormat::Text => {
            for key in &keys {
                println!("{key}");
            }
        }
    }
    Ok(())
}

/// Committed keys in ledger order, composite keys shown as `type/part/...`.
pub fn rendered_keys(ledger: &InMemoryLedger, prefix: Option<&str>) -> anyhow::Result<Vec<String>> {
    let keys = ledger
        .keys()?
        .iter()
        .map(|key| render_key(key))
        .filter(|key| prefix.map_or(true, |p| key.starts_with(p)))
        .collect();
    Ok(keys)
}

fn render_key(key: &str) -> String {
    if !key.starts_with(COMPOSITE_NAMESPACE) {
        return key.to_string();
    }
    match split_composite_key(key) {
        Ok((object_type, parts)) => std::iter::once(object_type).chain(parts).collect::<Vec<_>>().join("/"),
        Err(_) => key.escape_default().to_string(),
    }
}

fn describe_rule(rule: &AccessRule) -> String {
    match rule {
        AccessRule::Open => "open".green().to_string(),
        AccessRule::Roles(roles) => roles
            .iter()
            .map(|r| r.as_attribute().yellow().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn payload_value(response: &Response) -> Value {
    if response.payload.is_empty() {
        return Value::Null;
    }
    response
        .json()
        .unwrap_or_else(|| Value::String(String::from_utf8_lossy(&response.payload).into_owned()))
}
