use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jsonld_lite::jsonld::lite::render::{self, PageContext};
use jsonld_lite::jsonld::lite::settings::Settings;
use jsonld_lite::jsonld::lite::store::MemoryStore;
use jsonld_lite::{JsonLdError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli.log_filter)?;
    match cli.command {
        Command::Emit(args) => execute_emit(args),
        Command::Sanitize(args) => execute_sanitize(args),
    }
}

fn init_logging(filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(filter).map_err(|error| JsonLdError::Logging(error.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| JsonLdError::Logging(error.to_string()))
}

fn execute_emit(args: EmitArgs) -> Result<()> {
    let settings = load_settings(&args.settings)?;
    if !args.content.exists() {
        return Err(JsonLdError::MissingInput(args.content));
    }
    let store: MemoryStore = serde_json::from_str(&fs::read_to_string(&args.content)?)?;

    let page = PageContext { front_page: args.front_page, page_id: args.page_id };
    let Some(snippet) = render::head_snippet(&settings, &store, &page, args.debug)? else {
        return Ok(());
    };

    match args.output {
        Some(path) => fs::write(path, snippet)?,
        None => print!("{snippet}"),
    }
    Ok(())
}

fn execute_sanitize(args: SanitizeArgs) -> Result<()> {
    let settings = load_settings(&args.settings)?;
    let encoded = serde_json::to_string_pretty(&settings.sanitize())?;
    if args.write {
        fs::write(&args.settings, encoded)?;
    } else {
        println!("{encoded}");
    }
    Ok(())
}

fn load_settings(path: &PathBuf) -> Result<Settings> {
    if !path.exists() {
        return Err(JsonLdError::MissingInput(path.clone()));
    }
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate schema.org Review structured data from stored testimonial content."
)]
struct Cli {
    /// Tracing filter directive controlling diagnostic output.
    #[arg(long, global = true, default_value = "warn")]
    log_filter: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the JSON-LD head snippet for one page.
    Emit(EmitArgs),
    /// Apply the save-time normalisation to a settings file.
    Sanitize(SanitizeArgs),
}

#[derive(clap::Args)]
struct EmitArgs {
    /// Settings JSON file.
    #[arg(long)]
    settings: PathBuf,

    /// Content fixture holding testimonial records and attachments.
    #[arg(long)]
    content: PathBuf,

    /// Numeric id of the page being rendered.
    #[arg(long)]
    page_id: Option<u64>,

    /// Treat the rendered page as the site's designated front page.
    #[arg(long)]
    front_page: bool,

    /// Prepend a diagnostic comment with review count and average rating.
    #[arg(long)]
    debug: bool,

    /// Write the snippet to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct SanitizeArgs {
    /// Settings JSON file.
    #[arg(long)]
    settings: PathBuf,

    /// Rewrite the file in place instead of printing the result.
    #[arg(long)]
    write: bool,
}
