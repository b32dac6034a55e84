mod compile;
mod document;
mod search;

use crate::argparse::{Cli, Commands};
use anyhow::Context;
use primo_search::{BriefSearchClient, HttpTransport, SearchConfig};
use std::path::Path;

pub use compile::handle_compile_command;
pub use document::handle_document_command;
pub use search::handle_search_command;

pub async fn handle_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Compile(args) => {
            let config = mapping_config(cli.config.as_deref())?;
            handle_compile_command(args, &config)
        }
        Commands::Search(args) => {
            let (config, client) = connect(cli.config.as_deref())?;
            handle_search_command(args, &config, &client).await
        }
        Commands::Document(args) => {
            let (_, client) = connect(cli.config.as_deref())?;
            handle_document_command(args, &client).await
        }
    }
}

/// Compiling needs only the mappings, so connection settings are not validated.
fn mapping_config(path: Option<&Path>) -> anyhow::Result<SearchConfig> {
    match path {
        Some(path) => SearchConfig::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display())),
        None => Ok(SearchConfig::default()),
    }
}

fn connect(
    path: Option<&Path>,
) -> anyhow::Result<(SearchConfig, BriefSearchClient<HttpTransport>)> {
    let config = SearchConfig::load(path).context("Failed to load Primo config")?;
    let transport = HttpTransport::new(config.base_url.clone());
    let client = BriefSearchClient::from_config(&config, transport);
    Ok((config, client))
}
