use std::fmt;

use serde::{Deserialize, Serialize};

use super::dialect::Dialect;
use crate::criteria::{CriteriaContainer, Operator, RangeCriterion, RangeOperator, SingleCriterion};
use crate::errors::SearchError;
use crate::value::{FieldKind, Value};

const CONTEXT: &str = "filter criterion";

/// A compiled boolean expression plus the values bound to its placeholders.
///
/// `parameters()[n]` binds placeholder `@n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    text: String,
    parameters: Vec<Value>,
}

impl Predicate {
    pub fn new(text: impl Into<String>, parameters: Vec<Value>) -> Self {
        Self {
            text: text.into(),
            parameters,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.text, self.parameters)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Linearizes a criteria tree into predicate text.
///
/// One compiler renders one predicate; its parameter list is not shared across
/// compilations.
pub struct PredicateCompiler<'d> {
    dialect: &'d Dialect,
    parameters: Vec<Value>,
}

impl<'d> PredicateCompiler<'d> {
    pub fn new(dialect: &'d Dialect) -> Self {
        Self {
            dialect,
            parameters: Vec::new(),
        }
    }

    /// Returns `None` when there is nothing to filter on.
    pub fn compile(mut self, containers: &[CriteriaContainer]) -> Result<Option<Predicate>, SearchError> {
        if containers.is_empty() {
            return Ok(None);
        }
        let text = self.render_list(containers)?;
        Ok(Some(Predicate {
            text,
            parameters: self.parameters,
        }))
    }

    fn render_list(&mut self, containers: &[CriteriaContainer]) -> Result<String, SearchError> {
        let mut tokens = Vec::with_capacity(containers.len() * 2);
        for (i, container) in containers.iter().enumerate() {
            if i > 0 {
                tokens.push(container.logic.as_str().to_string());
            }
            tokens.push(self.render_container(container)?);
        }
        Ok(tokens.join(" "))
    }

    fn render_container(&mut self, container: &CriteriaContainer) -> Result<String, SearchError> {
        match (&container.single, &container.range, &container.group) {
            (Some(single), None, None) => self.render_single(single),
            (None, Some(range), None) => self.render_range(range),
            (None, None, Some(group)) if !group.is_empty() => Ok(format!("({})", self.render_list(group)?)),
            (None, None, Some(_)) => Err(SearchError::UnsupportedCondition { populated: 0 }),
            _ => Err(SearchError::UnsupportedCondition {
                populated: container.populated_slots(),
            }),
        }
    }

    fn bind(&mut self, value: Value) -> String {
        let placeholder = self.dialect.parameter(self.parameters.len());
        self.parameters.push(value);
        placeholder
    }

    fn render_single(&mut self, criterion: &SingleCriterion) -> Result<String, SearchError> {
        let field = self.dialect.render_path(&criterion.field, CONTEXT)?;
        let collection = self.render_collection(&criterion.collection)?;

        let clause = match criterion.operator {
            Operator::IsNull => format!("({field} == null)"),
            Operator::IsNotNull => format!("({field} != null)"),
            Operator::In | Operator::NotIn => {
                let list = match &criterion.value {
                    Value::List(_) => criterion.value.clone(),
                    other => Value::List(vec![other.clone()]),
                };
                let placeholder = self.bind(list);
                if criterion.operator == Operator::In {
                    format!("({field} In {placeholder})")
                } else {
                    format!("(Not ({field} In {placeholder}))")
                }
            }
            operator => {
                if let Some(symbol) = operator.comparison_symbol() {
                    let placeholder = self.bind(criterion.value.clone());
                    format!("({field} {symbol} {placeholder})")
                } else if let Some((method, negated)) = operator.pattern_method() {
                    let target = match criterion.kind {
                        FieldKind::Text => format!("({field} ?? \"\")"),
                        FieldKind::Other => format!("{field}.ToString()"),
                    };
                    let placeholder = self.bind(criterion.value.clone());
                    if negated {
                        format!("(Not {target}.{method}({placeholder}))")
                    } else {
                        format!("({target}.{method}({placeholder}))")
                    }
                } else {
                    return Err(SearchError::UnsupportedCondition { populated: 1 });
                }
            }
        };

        Ok(wrap_collection(collection, clause))
    }

    fn render_range(&mut self, criterion: &RangeCriterion) -> Result<String, SearchError> {
        let field = self.dialect.render_path(&criterion.field, CONTEXT)?;
        let collection = self.render_collection(&criterion.collection)?;
        let start = self.bind(criterion.start.clone());
        let end = self.bind(criterion.end.clone());

        // the pair renders as one operand
        let clause = match criterion.operator {
            RangeOperator::Between => format!("(({field} >= {start}) And ({field} <= {end}))"),
            RangeOperator::NotBetween => format!("(({field} < {start}) Or ({field} > {end}))"),
        };

        Ok(wrap_collection(collection, clause))
    }

    fn render_collection(&self, collection: &[String]) -> Result<Vec<String>, SearchError> {
        collection
            .iter()
            .map(|path| self.dialect.render_path(path, CONTEXT))
            .collect()
    }
}

/// Wrap `clause` in one `.Any(...)` per scope, innermost scope closest to the clause.
fn wrap_collection(collection: Vec<String>, clause: String) -> String {
    collection
        .into_iter()
        .rev()
        .fold(clause, |inner, path| format!("{path}.Any({inner})"))
}
