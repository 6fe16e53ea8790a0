//! CLI command definitions

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stdmark")]
#[command(about = "Convert journal entries and Markdown documents to XML", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log pipeline stages to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a dated journal entry read from stdin into a <section>
    #[command(alias = "j2std")]
    Journal,

    /// Convert Markdown with optional YAML front matter read from stdin into a <document>
    #[command(alias = "md2std")]
    Document {
        /// Spaces per nesting level in the output
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },
}
