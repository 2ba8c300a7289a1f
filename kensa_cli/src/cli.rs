use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kensa", version, about = "Scan-to-verdict inspection engine")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Raise log verbosity (-v info, -vv debug)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a configuration against a host schema and report problems
    Check {
        #[command(flatten)]
        sources: Sources,
    },
    /// Judge scans and append audit rows to the record file
    Scan {
        #[command(flatten)]
        sources: Sources,
        #[command(flatten)]
        input: ScanInput,
    },
    /// Judge scans without writing anything
    Explain {
        #[command(flatten)]
        sources: Sources,
        #[command(flatten)]
        input: ScanInput,
    },
}

#[derive(Args, Debug)]
pub struct Sources {
    #[arg(long, short = 'c', help = "Configuration file (.json or .toml)")]
    pub config: PathBuf,

    #[arg(long, short = 'r', help = "Host record JSON file")]
    pub record: Option<PathBuf>,

    #[arg(long, short = 's', help = "Host schema file; takes precedence over kinds seen in the record")]
    pub schema: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ScanInput {
    #[arg(long, short = 'i', help = "Raw scan string; one scan per stdin line when omitted")]
    pub input: Option<String>,
}
