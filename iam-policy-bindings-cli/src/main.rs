//! `iam-policy-bindings`: inspect and edit the role bindings of an IAM policy
//! document.
//!
//! The input is the resource returned by `getIamPolicy`; commands that change
//! bindings print the resource to submit to `setIamPolicy`. Nothing is sent
//! anywhere.

mod commands;
mod io;

use anyhow::{bail, Result};
use clap::Parser;
use commands::{execute, Command, Outcome};
use log::{debug, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "iam-policy-bindings", version, about, long_about = None)]
struct Cli {
    /// Policy document to read; `-` or absent reads stdin
    #[arg(long, short = 'p', global = true, env = "IAM_POLICY_FILE")]
    policy: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(long, short = 'o', global = true, conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Write the updated policy back to the --policy file
    #[arg(long, global = true, requires = "policy")]
    in_place: bool,

    /// Pretty-print policy documents
    #[arg(long, global = true)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Where the command's output goes.
    fn destination(&self) -> Result<Option<PathBuf>> {
        if !self.in_place {
            return Ok(self.output.clone());
        }
        if !self.command.mutates() {
            bail!("--in-place only applies to commands that update the policy");
        }
        match &self.policy {
            Some(path) if path.as_os_str() != "-" => Ok(Some(path.clone())),
            _ => bail!("--in-place requires --policy to name a file"),
        }
    }
}

fn init_logging(cli: &Cli) {
    // RUST_LOG, when set, takes precedence over -v.
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let destination = cli.destination()?;
    let policy_path = cli.policy.clone();
    debug!("Running {:?}", cli.command);

    let outcome = execute(cli.command, || io::read_policy(policy_path.as_deref()))?;
    let text = match outcome {
        Outcome::Text(text) => text,
        Outcome::Policy(policy) if cli.pretty => policy.to_json_string_pretty()?,
        Outcome::Policy(policy) => policy.to_json_string()?,
    };
    io::write_output(destination.as_deref(), &text)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
