use crate::argparse::CompileArgs;
use anyhow::Context;
use primo_search::{parse_filter_expression, QueryParameters, SearchConfig, StatementRenderer};
use std::sync::Arc;

pub fn handle_compile_command(args: CompileArgs, config: &SearchConfig) -> anyhow::Result<()> {
    let parameters = compile_expression(&args.expression, config)?;
    println!("{}", serde_json::to_string_pretty(&parameters)?);
    Ok(())
}

pub(crate) fn compile_expression(
    expression: &str,
    config: &SearchConfig,
) -> anyhow::Result<QueryParameters> {
    let statements = parse_filter_expression(expression)
        .with_context(|| format!("Failed to parse {:?}", expression))?;
    let renderer = StatementRenderer::new(
        Arc::new(config.field_names()),
        Arc::new(config.value_mappers()),
    );
    Ok(primo_search::compile(&renderer, &statements)?)
}
