use super::dialect::Dialect;
use crate::criteria::SortCriterion;
use crate::errors::SearchError;

const CONTEXT: &str = "sort criterion";

/// Render sort keys as `a ASC, b.c DESC`. Returns `None` for an empty key list.
pub fn compile_ordering(dialect: &Dialect, items: &[SortCriterion]) -> Result<Option<String>, SearchError> {
    if items.is_empty() {
        return Ok(None);
    }
    let mut keys = Vec::with_capacity(items.len());
    for item in items {
        let field = dialect.render_path(&item.field, CONTEXT)?;
        keys.push(format!("{field} {}", item.direction.as_str()));
    }
    Ok(Some(keys.join(", ")))
}
