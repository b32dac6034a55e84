use crate::argparse::DocumentArgs;
use anyhow::Context;
use primo_search::{BriefSearchClient, SearchTransport};

pub async fn handle_document_command<T: SearchTransport>(
    args: DocumentArgs,
    client: &BriefSearchClient<T>,
) -> anyhow::Result<()> {
    let documents = client
        .documents(&args.ids)
        .await
        .context("Primo document lookup failed")?;

    for id in args.ids.iter().filter(|id| !documents.contains_key(id.as_str())) {
        tracing::warn!("Record {} not found", id);
    }

    println!("{}", serde_json::to_string_pretty(&documents)?);
    Ok(())
}
