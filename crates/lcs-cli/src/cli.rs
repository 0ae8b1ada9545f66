use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "licensus",
    about = "Licensus: driving license lifecycle on a key/value ledger",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Ledger snapshot file; created on first write
    #[arg(long, global = true, default_value = "licensus-state.json")]
    pub state: PathBuf,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one operation as a single transaction
    Invoke(InvokeArgs),
    /// List operations and who may call them
    Operations(OperationsArgs),
    /// Dump committed ledger keys
    Keys(KeysArgs),
}

#[derive(Args)]
pub struct InvokeArgs {
    /// Caller role attribute, e.g. org1-approver
    #[arg(short, long)]
    pub role: Option<String>,
    pub operation: String,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct OperationsArgs {}

#[derive(Args)]
pub struct KeysArgs {
    /// Only keys whose rendered form starts with this prefix
    #[arg(long)]
    pub prefix: Option<String>,
}
