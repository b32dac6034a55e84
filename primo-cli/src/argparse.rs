use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "primo",
    about = "Primo brief search query compiler and client",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// YAML config file with connection settings and field mappings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the brief search parameters a filter expression compiles to
    Compile(CompileArgs),
    /// Run a brief search and print the decoded result as JSON
    Search(SearchArgs),
    /// Fetch records by record id
    Document(DocumentArgs),
}

#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Filter expression, e.g. `type:audiobooks language:(eng OR ice)`
    pub expression: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Filter expression, e.g. `type:audiobooks language:(eng OR ice)`
    pub expression: String,

    /// Index of the first result, starting at 1
    #[arg(long, default_value_t = 1)]
    pub offset: u64,

    /// Number of results to fetch
    #[arg(long, default_value_t = 10)]
    pub count: u64,

    /// Include facets in the output
    #[arg(long)]
    pub facets: bool,
}

#[derive(Args, Debug)]
pub struct DocumentArgs {
    /// Record ids to fetch
    #[arg(required = true)]
    pub ids: Vec<String>,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
