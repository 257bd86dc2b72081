use std::cmp::Ordering;

use super::parser::{CompareOp, Expr};
use super::{Member, Record};
use crate::errors::SearchError;
use crate::value::Value;

/// Result of evaluating a sub-expression.
enum Operand<'r> {
    Value(Value),
    Record(&'r dyn Record),
    Records(Vec<&'r dyn Record>),
}

impl<'r> From<Member<'r>> for Operand<'r> {
    fn from(member: Member<'r>) -> Self {
        match member {
            Member::Value(value) => Operand::Value(value),
            Member::Record(record) => Operand::Record(record),
            Member::Records(records) => Operand::Records(records),
        }
    }
}

impl Operand<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Operand::Value(value) => value.kind_name(),
            Operand::Record(_) => "record",
            Operand::Records(_) => "collection",
        }
    }
}

pub(crate) struct Interpreter<'p> {
    parameters: &'p [Value],
}

impl<'p> Interpreter<'p> {
    pub(crate) fn new(parameters: &'p [Value]) -> Self {
        Self { parameters }
    }

    /// Evaluate a predicate; a null result does not match.
    pub(crate) fn matches(&self, expr: &Expr, record: &dyn Record) -> Result<bool, SearchError> {
        let operand = self.eval(expr, record)?;
        truth(operand, expr)
    }

    /// Evaluate an expression that must produce a plain value, such as an ordering key.
    pub(crate) fn value(&self, expr: &Expr, record: &dyn Record) -> Result<Value, SearchError> {
        match self.eval(expr, record)? {
            Operand::Value(value) => Ok(value),
            other => Err(SearchError::evaluation(format!(
                "'{}' is a {}, expected a value",
                expr.path(),
                other.describe()
            ))),
        }
    }

    fn eval<'r>(&self, expr: &Expr, it: &'r dyn Record) -> Result<Operand<'r>, SearchError> {
        match expr {
            Expr::Literal(value) => Ok(Operand::Value(value.clone())),
            Expr::Param(index) => self
                .parameters
                .get(*index)
                .cloned()
                .map(Operand::Value)
                .ok_or_else(|| SearchError::evaluation(format!("parameter @{index} is not bound"))),
            Expr::Member { target: None, name } => resolve(it, name, expr),
            Expr::Member {
                target: Some(target),
                name,
            } => match self.eval(target, it)? {
                Operand::Record(record) => resolve(record, name, expr),
                Operand::Value(Value::Null) => Ok(Operand::Value(Value::Null)),
                other => Err(SearchError::evaluation(format!(
                    "cannot read member '{name}' of a {}",
                    other.describe()
                ))),
            },
            Expr::Method { target, name, args } => self.call(target, name, args, it),
            Expr::Not(inner) => match self.eval(inner, it)? {
                Operand::Value(Value::Null) => Ok(Operand::Value(Value::Null)),
                operand => Ok(Operand::Value(Value::Bool(!truth(operand, inner)?))),
            },
            Expr::And(left, right) => {
                if !self.matches(left, it)? {
                    return Ok(Operand::Value(Value::Bool(false)));
                }
                Ok(Operand::Value(Value::Bool(self.matches(right, it)?)))
            }
            Expr::Or(left, right) => {
                if self.matches(left, it)? {
                    return Ok(Operand::Value(Value::Bool(true)));
                }
                Ok(Operand::Value(Value::Bool(self.matches(right, it)?)))
            }
            Expr::Compare { op, left, right } => {
                let left = self.eval(left, it)?;
                let right = self.eval(right, it)?;
                compare(*op, left, right).map(|b| Operand::Value(Value::Bool(b)))
            }
            Expr::In { item, list } => {
                let item = self.value(item, it)?;
                match self.value(list, it)? {
                    Value::Null => Ok(Operand::Value(Value::Bool(false))),
                    Value::List(items) => {
                        let mut found = false;
                        for candidate in &items {
                            if equals(&item, candidate)? {
                                found = true;
                                break;
                            }
                        }
                        Ok(Operand::Value(Value::Bool(found)))
                    }
                    other => Err(SearchError::evaluation(format!(
                        "'In' expects a list, got {}",
                        other.kind_name()
                    ))),
                }
            }
            Expr::Coalesce(left, right) => match self.eval(left, it)? {
                Operand::Value(Value::Null) => self.eval(right, it),
                operand => Ok(operand),
            },
        }
    }

    fn call<'r>(&self, target: &Expr, name: &str, args: &[Expr], it: &'r dyn Record) -> Result<Operand<'r>, SearchError> {
        let receiver = self.eval(target, it)?;

        if name.eq_ignore_ascii_case("Any") {
            let children = match receiver {
                Operand::Records(children) => children,
                Operand::Value(Value::Null) => return Ok(Operand::Value(Value::Bool(false))),
                other => {
                    return Err(SearchError::evaluation(format!(
                        "'Any' requires a collection, '{}' is a {}",
                        target.path(),
                        other.describe()
                    )));
                }
            };
            let found = match args {
                [] => !children.is_empty(),
                [predicate] => {
                    let mut found = false;
                    for child in children {
                        if self.matches(predicate, child)? {
                            found = true;
                            break;
                        }
                    }
                    found
                }
                _ => return Err(arity(name, 1, args.len())),
            };
            return Ok(Operand::Value(Value::Bool(found)));
        }

        let receiver = match receiver {
            Operand::Value(value) => value,
            other => {
                return Err(SearchError::evaluation(format!(
                    "cannot call '{name}' on a {}",
                    other.describe()
                )));
            }
        };

        if name.eq_ignore_ascii_case("ToString") {
            if !args.is_empty() {
                return Err(arity(name, 0, args.len()));
            }
            return Ok(Operand::Value(Value::Text(receiver.to_string())));
        }

        let [argument] = args else {
            return Err(arity(name, 1, args.len()));
        };
        let argument = self.value(argument, it)?;

        if receiver.is_null() {
            return Err(SearchError::evaluation(format!(
                "'{name}' called on null '{}'",
                target.path()
            )));
        }

        let result = match (&receiver, &argument) {
            (Value::List(items), _) if name.eq_ignore_ascii_case("Contains") => {
                let mut found = false;
                for item in items {
                    if equals(item, &argument)? {
                        found = true;
                        break;
                    }
                }
                found
            }
            (Value::Text(text), Value::Text(pattern)) => {
                if name.eq_ignore_ascii_case("StartsWith") {
                    text.starts_with(pattern.as_str())
                } else if name.eq_ignore_ascii_case("EndsWith") {
                    text.ends_with(pattern.as_str())
                } else if name.eq_ignore_ascii_case("Contains") {
                    text.contains(pattern.as_str())
                } else {
                    return Err(SearchError::evaluation(format!("unknown method '{name}'")));
                }
            }
            _ => {
                return Err(SearchError::evaluation(format!(
                    "'{name}' is not defined for {} and {}",
                    receiver.kind_name(),
                    argument.kind_name()
                )));
            }
        };
        Ok(Operand::Value(Value::Bool(result)))
    }
}

fn resolve<'r>(record: &'r dyn Record, name: &str, expr: &Expr) -> Result<Operand<'r>, SearchError> {
    record
        .member(name)
        .map(Operand::from)
        .ok_or_else(|| SearchError::Resolution { path: expr.path() })
}

fn truth(operand: Operand<'_>, expr: &Expr) -> Result<bool, SearchError> {
    match operand {
        Operand::Value(Value::Bool(b)) => Ok(b),
        Operand::Value(Value::Null) => Ok(false),
        other => Err(SearchError::evaluation(format!(
            "'{}' produced a {}, expected bool",
            expr.path(),
            other.describe()
        ))),
    }
}

fn arity(name: &str, expected: usize, found: usize) -> SearchError {
    SearchError::evaluation(format!("'{name}' takes {expected} argument(s), got {found}"))
}

/// Lifted equality: null equals only null.
fn equals(left: &Value, right: &Value) -> Result<bool, SearchError> {
    match (left, right) {
        (Value::Null, Value::Null) => Ok(true),
        (Value::Null, _) | (_, Value::Null) => Ok(false),
        (Value::List(a), Value::List(b)) => Ok(a == b),
        (a, b) if a.comparable_with(b) => Ok(a.compare(b) == Some(Ordering::Equal)),
        (a, b) => Err(mismatch(a, b)),
    }
}

fn mismatch(left: &Value, right: &Value) -> SearchError {
    SearchError::evaluation(format!(
        "cannot compare {} with {}",
        left.kind_name(),
        right.kind_name()
    ))
}

fn compare(op: CompareOp, left: Operand<'_>, right: Operand<'_>) -> Result<bool, SearchError> {
    let (left, right) = match (left, right) {
        (Operand::Value(left), Operand::Value(right)) => (left, right),
        // a resolved record is never null
        (Operand::Record(_), Operand::Value(Value::Null)) | (Operand::Value(Value::Null), Operand::Record(_)) => {
            return match op {
                CompareOp::Eq => Ok(false),
                CompareOp::Ne => Ok(true),
                _ => Ok(false),
            };
        }
        (left, right) => {
            return Err(SearchError::evaluation(format!(
                "cannot compare {} with {}",
                left.describe(),
                right.describe()
            )));
        }
    };

    let accepts: fn(Ordering) -> bool = match op {
        CompareOp::Eq => return equals(&left, &right),
        CompareOp::Ne => return equals(&left, &right).map(|eq| !eq),
        CompareOp::Gt => |ordering| ordering == Ordering::Greater,
        CompareOp::Ge => |ordering| ordering != Ordering::Less,
        CompareOp::Lt => |ordering| ordering == Ordering::Less,
        CompareOp::Le => |ordering| ordering != Ordering::Greater,
    };

    if left.is_null() || right.is_null() {
        return Ok(false);
    }
    if !left.comparable_with(&right) {
        return Err(mismatch(&left, &right));
    }
    // NaN compares false
    Ok(left.compare(&right).is_some_and(accepts))
}
