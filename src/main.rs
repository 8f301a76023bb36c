//! `chromaq` command-line front end.
//!
//! Verifies candidate ids, derives circuits from accepted ones and writes the
//! resulting text and PNG artifacts.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chromaq::artifacts::write_artifacts;
use chromaq::{normalize_candidate, sample_candidate, verify_candidate, DerivationOptions, Deriver, Policy};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(name = "chromaq")]
#[command(about = "Acceptance check and quantum/classical circuit derivation for candidate ids")]
struct Cli {
    /// TOML file overriding the default policy
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CandidateArgs {
    /// Candidate id: decimal digits, or binary prefixed with 0b
    candidate: String,
    /// Treat the grid as toroidal when checking neighbors
    #[arg(long)]
    wrap: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the acceptance check and print the grid colors
    Verify {
        #[command(flatten)]
        candidate: CandidateArgs,
    },
    /// Derive circuits from an accepted candidate and write artifacts
    Derive {
        #[command(flatten)]
        candidate: CandidateArgs,
        /// Force an exact classical correspondent for every instruction
        #[arg(long)]
        reversible_only: bool,
        /// Maximum number of lanes (qubits)
        #[arg(long, default_value_t = 8)]
        max_lanes: usize,
        /// Maximum number of layers
        #[arg(long, default_value_t = 16)]
        max_layers: usize,
        /// Output directory
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },
    /// Print a random candidate id that passes the acceptance check
    Sample {
        /// Grid side length
        #[arg(long)]
        side: usize,
        /// Sample for toroidal neighbor checking
        #[arg(long)]
        wrap: bool,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let policy = load_policy(cli.policy.as_deref())?;

    match cli.command {
        Commands::Verify { candidate } => run_verify(&candidate, &policy),
        Commands::Derive { candidate, reversible_only, max_lanes, max_layers, out } => {
            let options = DerivationOptions { max_lanes, max_layers, reversible_only };
            run_derive(&candidate, options, &out, policy)
        }
        Commands::Sample { side, wrap } => {
            println!("{}", sample_candidate(side, wrap, &policy)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_policy(path: Option<&Path>) -> Result<Policy> {
    let Some(path) = path else {
        return Ok(Policy::default());
    };
    let source = fs::read_to_string(path).with_context(|| format!("Failed to read policy {}", path.display()))?;
    let policy = Policy::from_toml_str(&source).with_context(|| format!("Invalid policy {}", path.display()))?;
    debug!(?policy, "loaded policy");
    Ok(policy)
}

fn run_verify(args: &CandidateArgs, policy: &Policy) -> Result<ExitCode> {
    let digits = normalize_candidate(&args.candidate)?;
    let report = verify_candidate(&digits, args.wrap, policy);
    print!("{}", report);
    Ok(if report.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn run_derive(args: &CandidateArgs, options: DerivationOptions, out: &Path, policy: Policy) -> Result<ExitCode> {
    let digits = normalize_candidate(&args.candidate)?;
    let report = verify_candidate(&digits, args.wrap, &policy);
    println!("\nAcceptance check: {}", report.reason());
    if !report.is_ok() {
        println!("Not accepted → no circuits generated.\n");
        return Ok(ExitCode::FAILURE);
    }
    println!("Grid: {} x {}  (tokens={})", report.side(), report.side(), report.tokens().len());

    let result = Deriver::new(policy).derive(report.tokens(), report.side(), options)?;
    let written =
        write_artifacts(&result, out).with_context(|| format!("Failed to write artifacts to {}", out.display()))?;

    println!("\nWrote:");
    for path in written {
        println!("  {}", path.display());
    }
    println!();
    Ok(ExitCode::SUCCESS)
}
