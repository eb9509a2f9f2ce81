//! starmap - build client star map assets from a simulation database
//!
//! ```text
//! starmap build --db static.db --out ./public/data
//! starmap build --db static.db --systems-table SolarSystems --sys-id-col solarSystemId
//! starmap inspect --db static.db
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use starmap_cli::{run_build, BuildOptions};
use starmap_core::{SchemaOverrides, DEFAULT_OUT_DIR};
use starmap_io::{inspect, open_source};

#[derive(Parser, Debug)]
#[command(name = "starmap")]
#[command(about = "Convert a star system database into compact viewer assets")]
struct Cli {
    /// Log inference decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract systems and jumps and write binary assets
    Build(BuildArgs),

    /// Print tables, columns and sample rows to help choose overrides
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Path to SQLite database
    #[arg(long)]
    db: String,

    /// Output directory for asset files
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out: PathBuf,

    #[command(flatten)]
    overrides: OverrideArgs,
}

/// Optional overrides (auto-detected by default)
#[derive(Args, Debug, Default)]
struct OverrideArgs {
    #[arg(long)]
    systems_table: Option<String>,
    #[arg(long)]
    sys_id_col: Option<String>,
    #[arg(long)]
    sys_name_col: Option<String>,
    #[arg(long)]
    sys_x_col: Option<String>,
    #[arg(long)]
    sys_y_col: Option<String>,
    #[arg(long)]
    sys_z_col: Option<String>,
    #[arg(long)]
    jumps_table: Option<String>,
    #[arg(long)]
    jump_from_col: Option<String>,
    #[arg(long)]
    jump_to_col: Option<String>,
}

impl From<OverrideArgs> for SchemaOverrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            systems_table: args.systems_table,
            sys_id_col: args.sys_id_col,
            sys_name_col: args.sys_name_col,
            sys_x_col: args.sys_x_col,
            sys_y_col: args.sys_y_col,
            sys_z_col: args.sys_z_col,
            jumps_table: args.jumps_table,
            jump_from_col: args.jump_from_col,
            jump_to_col: args.jump_to_col,
        }
    }
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Path to SQLite database
    #[arg(long)]
    db: String,

    /// Table to describe (defaults to the first table)
    #[arg(long)]
    table: Option<String>,

    /// Sample rows to show
    #[arg(long, default_value = "3")]
    limit: usize,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Build(args) => {
            let options = BuildOptions {
                out_dir: args.out,
                overrides: args.overrides.into(),
            };
            let summary = run_build(&args.db, &options)?;
            println!("{}", summary.to_json()?);
        }
        Commands::Inspect(args) => {
            let source = open_source(&args.db)?;
            let report = inspect(source.as_ref(), args.table.as_deref(), args.limit)?;
            print!("{report}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
