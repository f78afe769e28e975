use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use repofind_github::{GithubClient, RepoRef};
use repofind_locator::{FunctionLocator, Language};

mod report;

use report::FindOutput;

#[derive(Parser)]
#[command(name = "repofind")]
#[command(about = "Fetch repository files and locate function definitions in them", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List one level of a repository directory
    Ls(LsArgs),
    /// Print a repository file's decoded contents
    Cat(CatArgs),
    /// Locate a function definition in a repository file
    Find(FindArgs),
    /// Locate a function definition in a local file (no network)
    FindLocal(FindLocalArgs),
}

impl Commands {
    const fn json(&self) -> bool {
        match self {
            Commands::Ls(args) => args.json,
            Commands::Cat(args) => args.json,
            Commands::Find(args) => args.json,
            Commands::FindLocal(args) => args.json,
        }
    }
}

#[derive(Args)]
struct LsArgs {
    /// Repository URL, e.g. https://github.com/rust-lang/rust
    repo: String,

    /// Directory path inside the repository (repository root when omitted)
    path: Option<String>,

    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CatArgs {
    /// Repository URL
    repo: String,

    /// File path inside the repository
    path: String,

    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FindArgs {
    /// Repository URL
    repo: String,

    /// File path inside the repository
    path: String,

    /// Function name to locate
    function: String,

    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FindLocalArgs {
    /// Local source file
    file: std::path::PathBuf,

    /// Function name to locate
    function: String,

    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();
    if cli.command.json() {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Ls(args) => run_ls(args).await,
        Commands::Cat(args) => run_cat(args).await,
        Commands::Find(args) => run_find(args).await,
        Commands::FindLocal(args) => run_find_local(args),
    }
}

async fn run_ls(args: LsArgs) -> Result<()> {
    let repo = RepoRef::parse(&args.repo)?;
    let client = GithubClient::from_env()?;

    let Some(listing) = client.list(&repo, args.path.as_deref()).await? else {
        std::process::exit(1);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        for dir in &listing.directories {
            println!("{dir}/");
        }
        for file in &listing.files {
            println!("{file}");
        }
    }
    Ok(())
}

async fn run_cat(args: CatArgs) -> Result<()> {
    let repo = RepoRef::parse(&args.repo)?;
    let client = GithubClient::from_env()?;

    let Some(file) = client.read(&repo, &args.path).await? else {
        std::process::exit(1);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&file)?);
    } else {
        print!("{}", file.text);
    }
    Ok(())
}

async fn run_find(args: FindArgs) -> Result<()> {
    let repo = RepoRef::parse(&args.repo)?;
    let client = GithubClient::from_env()?;

    let Some(file) = client.read(&repo, &args.path).await? else {
        std::process::exit(1);
    };

    let language = Language::from_path(&args.path);
    report_find(&args.path, &args.function, language, &file.text, args.json)
}

fn run_find_local(args: FindLocalArgs) -> Result<()> {
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let language = Language::from_path(&args.file);
    let shown_path = args.file.display().to_string();

    report_find(&shown_path, &args.function, language, &source, args.json)
}

fn report_find(
    path: &str,
    function: &str,
    language: Language,
    source: &str,
    json: bool,
) -> Result<()> {
    let mut locator = FunctionLocator::new(language)
        .with_context(|| format!("Cannot search {path} ({} source)", language.as_str()))?;
    let found = locator.find(source, function)?;

    match found {
        Some(found) => {
            if json {
                let output = FindOutput::found(path, function, &found);
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                // Display both bounds 1-indexed; the span itself stays
                // (0-based start, 1-based end) in JSON output.
                println!("{path}:{}-{} {function}", found.start_line + 1, found.end_line);
                println!("{}", found.text);
            }
            Ok(())
        }
        None => {
            if json {
                let output = FindOutput::not_found(path, function);
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                log::warn!("function '{function}' not found in {path}");
            }
            std::process::exit(1);
        }
    }
}
