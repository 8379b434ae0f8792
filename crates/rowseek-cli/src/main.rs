//! `rowseek` - filter and sort tabular records from the terminal.
//!
//! ```text
//! rowseek view dde.csv rmsd.csv --query '|$1 - $2| < 0.5' --sort 1
//! rowseek remote --url http://127.0.0.1:8080 --query '$1 > 3'
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use console::style;
use log::{debug, info, LevelFilter};
use rowseek::{SortState, Table};
use rowseek_cli::{build_rows, load_records, render_json, render_text, PAGE_LIMIT};
use rowseek_remote::{Action, HttpStore, RemoteConfig, RemoteFilter, RemoteStore, DEFAULT_BASE_URL};

/// Filter and sort rows of numeric records with short column expressions.
///
/// Queries refer to columns as $1..$9 and take absolute values with |E|,
/// e.g. `$1 > 3` or `|$1 - $2| < 0.5`.
#[derive(Debug, Parser)]
#[command(name = "rowseek", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load `id,value` CSV files, one column per file, and print them
    View(ViewArgs),
    /// Apply a query against a persistence server and print its rows
    Remote(RemoteArgs),
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Maximum number of rows to print
    #[arg(long, default_value_t = PAGE_LIMIT)]
    limit: usize,

    /// Print rows as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ViewArgs {
    /// CSV files with an `id,value` header
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Query selecting the rows to show
    #[arg(short, long)]
    query: Option<String>,

    /// Sort by column N (0 sorts by id); repeat a column to reverse it
    #[arg(short, long = "sort", value_name = "N")]
    sort: Vec<usize>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct RemoteArgs {
    /// Base URL of the persistence server
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Query to persist and apply; omit to only print the current rows
    #[arg(short, long)]
    query: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    #[command(flatten)]
    output: OutputArgs,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();
}

fn print_table(table: &Table, output: &OutputArgs) -> Result<()> {
    if output.json {
        println!("{}", render_json(table, output.limit).context("cannot encode rows")?);
    } else {
        print!("{}", render_text(table, output.limit));
    }
    Ok(())
}

fn view(args: ViewArgs) -> Result<()> {
    let sets = args
        .files
        .iter()
        .map(load_records)
        .collect::<Result<Vec<_>>>()?;
    let mut table = build_rows(&sets);
    info!("loaded {} rows from {} files", table.len(), sets.len());

    if let Some(query) = &args.query {
        table
            .apply_query(query)
            .with_context(|| format!("cannot apply query `{}`", query))?;
    }

    let mut state = SortState::new();
    for &column in &args.sort {
        if column > sets.len() {
            bail!("cannot sort by column {}: there are {} columns", column, sets.len());
        }
        table.sort_by_column(column, &mut state);
        info!("sorted by column {} ({})", column, state.dir());
    }

    print_table(&table, &args.output)
}

fn remote(args: RemoteArgs) -> Result<()> {
    let config = RemoteConfig::new(args.url).timeout(Duration::from_secs(args.timeout));
    let store = HttpStore::new(config)?;
    let mut filter = RemoteFilter::new(store);

    if let Some(query) = &args.query {
        let action = filter
            .apply_query(query, &mut || debug!("reloading remote rows"))
            .with_context(|| format!("cannot apply query `{}` remotely", query))?;
        match action {
            Action::All => info!("remote filter cleared"),
            Action::Show(positions) => info!("remote filter shows {} rows", positions.len()),
        }
    }

    let table = filter
        .store_mut()
        .fetch_rows()
        .context("cannot fetch remote rows")?
        .into_table();
    print_table(&table, &args.output)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::View(args) => view(args),
        Command::Remote(args) => remote(args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
