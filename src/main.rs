use std::process;

use clap::Parser;

use branchtrack::AheadBehindProvider;
use branchtrack::git::{DETACHED_HEAD_LABEL, Repository};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON output
    Json,
}

#[derive(Parser)]
#[command(name = "bt")]
#[command(about = "Branch tracking status", long_about = None)]
#[command(version)]
struct Cli {
    /// Branch to inspect; all local branches when omitted
    branch: Option<String>,

    /// Only the branch currently checked out
    #[arg(long, conflicts_with = "branch")]
    current: bool,

    /// Change working directory
    #[arg(short = 'C', value_name = "path")]
    directory: Option<std::path::PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Show commands and debug info
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let repo = match &cli.directory {
        Some(path) => Repository::at(path.clone()),
        None => Repository::current(),
    };

    let branch_filter = if cli.current {
        repo.current_branch()?
            .unwrap_or_else(|| DETACHED_HEAD_LABEL.to_string())
    } else {
        cli.branch.clone().unwrap_or_default()
    };

    let provider = AheadBehindProvider::new(repo);
    let Some(data) = provider.get_data(&branch_filter) else {
        anyhow::bail!("no tracking data (detached HEAD, or no matching branch with a remote)");
    };

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&*data)?),
        OutputFormat::Table => {
            let width = data.keys().map(String::len).max().unwrap_or(0);
            for record in data.values() {
                println!(
                    "{:width$}  {}  [{}]",
                    record.branch,
                    record.summary(),
                    record.remote_ref
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
