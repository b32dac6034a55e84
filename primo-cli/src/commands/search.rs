use crate::argparse::SearchArgs;
use anyhow::Context;
use primo_search::response::has_more_results;
use primo_search::{parse_filter_expression, BriefSearchClient, SearchConfig, SearchTransport};
use serde_json::json;

pub async fn handle_search_command<T: SearchTransport>(
    args: SearchArgs,
    config: &SearchConfig,
    client: &BriefSearchClient<T>,
) -> anyhow::Result<()> {
    let statements = parse_filter_expression(&args.expression)
        .with_context(|| format!("Failed to parse {:?}", args.expression))?;
    let body = client
        .search(&statements, args.offset, args.count)
        .await
        .context("Primo search failed")?;

    let response = body.decode()?;
    let result = response.result(&config.value_mappers());
    let page = page_of(args.offset, args.count);

    let documents: Vec<_> = result.documents.values().map(|d| d.to_record()).collect();
    let mut output = json!({
        "total_hits": result.total_hits,
        "has_more_results": has_more_results(result.total_hits, page, args.count),
        "documents": documents,
    });
    if args.facets {
        output["facets"] = json!(result.facets);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// 1-based page number for a 1-based offset.
fn page_of(offset: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    offset.saturating_sub(1) / count + 1
}
