use clap::Parser;
use stdmark::application::{ConvertDocumentService, ConvertJournalService, DocumentOptions};
use stdmark::cli::{write_xml, Cli, Commands};
use stdmark::error::StdmarkError;
use stdmark::infrastructure::read_stdin;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // --verbose enables DEBUG, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), StdmarkError> {
    let input = read_stdin()?;

    let xml = match cli.command {
        Commands::Journal => ConvertJournalService::execute(&input)?,
        Commands::Document { indent } => {
            ConvertDocumentService::new(DocumentOptions { indent }).execute(&input)?
        }
    };

    write_xml(&mut std::io::stdout().lock(), &xml)
}
