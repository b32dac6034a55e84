use super::types::{FieldFilter, LogicOperator, NormalizedGroup, Statement, StatementGroup};
use crate::errors::{Result, SearchError};

/// Verifies the statements can be executed by Primo and converts them to groups.
///
/// Top-level statements are AND'ed, which matches how Primo combines repeated
/// `query` parameters. Every returned group references a single field.
pub fn preprocess_statements(statements: &[Statement]) -> Result<Vec<NormalizedGroup>> {
    let mut groups = Vec::with_capacity(statements.len());

    for statement in statements {
        match statement {
            Statement::Filter(filter) => groups.push(NormalizedGroup::single(filter.clone())),
            Statement::Group(group) => preprocess_group(group, &mut groups)?,
        }
    }

    Ok(groups)
}

fn preprocess_group(group: &StatementGroup, groups: &mut Vec<NormalizedGroup>) -> Result<()> {
    let mut leaves = Vec::new();
    collect_leaves(group.logic_operator, &group.statements, &mut leaves)?;

    let field_names = unique_field_names(&leaves);
    if field_names.len() <= 1 {
        groups.push(NormalizedGroup::new(
            group.logic_operator,
            leaves.into_iter().cloned().collect(),
        ));
        return Ok(());
    }

    match group.logic_operator {
        // "a=x AND (b=y AND c=z)" equals "a=x AND b=y AND c=z".
        LogicOperator::And => {
            groups.extend(
                leaves
                    .into_iter()
                    .map(|leaf| NormalizedGroup::single(leaf.clone())),
            );
            Ok(())
        }
        operator => Err(SearchError::UnsupportedQuery(format!(
            "Encountered {} operator between the fields {}. Primo only supports AND between different fields.",
            operator,
            field_names.join(", ")
        ))),
    }
}

// A nested group is absorbed into its parent only when that keeps the meaning:
// a single child is the child itself, and same-operator nesting is associative.
fn collect_leaves<'a>(
    operator: LogicOperator,
    statements: &'a [Statement],
    leaves: &mut Vec<&'a FieldFilter>,
) -> Result<()> {
    for statement in statements {
        match statement {
            Statement::Filter(filter) => leaves.push(filter),
            Statement::Group(nested)
                if nested.statements.len() == 1 || nested.logic_operator == operator =>
            {
                collect_leaves(operator, &nested.statements, leaves)?;
            }
            Statement::Group(nested) => {
                return Err(SearchError::UnsupportedQuery(format!(
                    "Encountered unsupported nested group: {} {} inside a {} group",
                    nested.logic_operator,
                    statement.kind(),
                    operator
                )));
            }
        }
    }
    Ok(())
}

fn unique_field_names<'a>(leaves: &[&'a FieldFilter]) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    for &leaf in leaves {
        let name = leaf.name.as_str();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
