//! Predicate and ordering grammars.
//!
//! Loosest to tightest: `Or`/`||`, `And`/`&&`, `Not`/`!`, comparison and `In`,
//! `??`, member access and method calls, primary terms. Keywords match
//! case-insensitively; an `@`-prefixed name is never a keyword.

use winnow::ascii::{Caseless, digit1, multispace0};
use winnow::combinator::{alt, cut_err, delimited, not, opt, preceded, repeat, separated, terminated};
use winnow::error::{ContextError, ErrMode, ModalResult, ParseError, StrContext, StrContextValue};
use winnow::token::{any, none_of, one_of, take_while};
use winnow::Parser;

use crate::compile::dialect::ESCAPE_PREFIX;
use crate::criteria::SortDirection;
use crate::errors::SearchError;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Literal(Value),
    Param(usize),
    /// `target.name`, or a bare `name` resolved against the current record.
    Member {
        target: Option<Box<Expr>>,
        name: String,
    },
    Method {
        target: Box<Expr>,
        name: String,
        args: Vec<Expr>,
    },
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    In {
        item: Box<Expr>,
        list: Box<Expr>,
    },
    Coalesce(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Dotted rendering of a member chain, for error messages.
    pub(crate) fn path(&self) -> String {
        match self {
            Expr::Member { target: None, name } => name.clone(),
            Expr::Member {
                target: Some(target),
                name,
            } => format!("{}.{name}", target.path()),
            Expr::Method { target, name, .. } => format!("{}.{name}()", target.path()),
            Expr::Param(index) => format!("@{index}"),
            _ => "<expression>".to_string(),
        }
    }
}

/// One `path [ASC|DESC]` term of an ordering clause.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OrderingKey {
    pub expr: Expr,
    pub direction: SortDirection,
}

type Input<'a> = &'a str;

const KEYWORDS: [&str; 7] = ["and", "or", "not", "in", "null", "true", "false"];

pub(crate) fn parse_predicate(source: &str) -> Result<Expr, SearchError> {
    terminated(or_expr, multispace0).parse(source).map_err(parse_error)
}

pub(crate) fn parse_ordering(source: &str) -> Result<Vec<OrderingKey>, SearchError> {
    terminated(ordering_clause, multispace0).parse(source).map_err(parse_error)
}

fn parse_error(error: ParseError<Input<'_>, ContextError>) -> SearchError {
    let message = error.inner().to_string().replace('\n', "; ");
    let message = if message.is_empty() { "unexpected input".to_string() } else { message };
    SearchError::parse(message, error.offset())
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|keyword| keyword.eq_ignore_ascii_case(word))
}

fn symbol<'a>(text: &'static str) -> impl Parser<Input<'a>, &'a str, ErrMode<ContextError>> {
    preceded(multispace0, text)
}

fn keyword<'a>(word: &'static str) -> impl Parser<Input<'a>, &'a str, ErrMode<ContextError>> {
    preceded(multispace0, terminated(Caseless(word), not(one_of(is_ident_continue))))
}

fn word<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    (one_of(is_ident_start), take_while(0.., is_ident_continue))
        .take()
        .parse_next(input)
}

fn ordering_clause(input: &mut Input<'_>) -> ModalResult<Vec<OrderingKey>> {
    separated(1.., ordering_key, symbol(",")).parse_next(input)
}

fn ordering_key(input: &mut Input<'_>) -> ModalResult<OrderingKey> {
    let expr = postfix(input)?;
    let direction = opt(direction).parse_next(input)?.unwrap_or_default();
    Ok(OrderingKey { expr, direction })
}

fn direction(input: &mut Input<'_>) -> ModalResult<SortDirection> {
    alt((
        keyword("ascending").value(SortDirection::Ascending),
        keyword("asc").value(SortDirection::Ascending),
        keyword("descending").value(SortDirection::Descending),
        keyword("desc").value(SortDirection::Descending),
    ))
    .parse_next(input)
}

fn or_expr(input: &mut Input<'_>) -> ModalResult<Expr> {
    let mut left = and_expr(input)?;
    while opt(alt((keyword("or"), symbol("||")))).parse_next(input)?.is_some() {
        let right = cut_err(and_expr).parse_next(input)?;
        left = Expr::Or(Box::new(left), Box::new(right));
    }
    Ok(left)
}

fn and_expr(input: &mut Input<'_>) -> ModalResult<Expr> {
    let mut left = unary(input)?;
    while opt(alt((keyword("and"), symbol("&&")))).parse_next(input)?.is_some() {
        let right = cut_err(unary).parse_next(input)?;
        left = Expr::And(Box::new(left), Box::new(right));
    }
    Ok(left)
}

fn unary(input: &mut Input<'_>) -> ModalResult<Expr> {
    let negated = opt(alt((keyword("not"), terminated(symbol("!"), not('=')))))
        .parse_next(input)?
        .is_some();
    if negated {
        let inner = cut_err(unary).parse_next(input)?;
        return Ok(Expr::Not(Box::new(inner)));
    }
    comparison(input)
}

fn comparison(input: &mut Input<'_>) -> ModalResult<Expr> {
    let left = coalesce(input)?;
    if let Some(op) = opt(compare_op).parse_next(input)? {
        let right = cut_err(coalesce).parse_next(input)?;
        return Ok(Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        });
    }
    if opt(keyword("in")).parse_next(input)?.is_some() {
        let list = cut_err(coalesce).parse_next(input)?;
        return Ok(Expr::In {
            item: Box::new(left),
            list: Box::new(list),
        });
    }
    Ok(left)
}

fn compare_op(input: &mut Input<'_>) -> ModalResult<CompareOp> {
    preceded(
        multispace0,
        alt((
            "==".value(CompareOp::Eq),
            "!=".value(CompareOp::Ne),
            "<>".value(CompareOp::Ne),
            "<=".value(CompareOp::Le),
            ">=".value(CompareOp::Ge),
            "<".value(CompareOp::Lt),
            ">".value(CompareOp::Gt),
            "=".value(CompareOp::Eq),
        )),
    )
    .parse_next(input)
}

fn coalesce(input: &mut Input<'_>) -> ModalResult<Expr> {
    let left = postfix(input)?;
    if opt(symbol("??")).parse_next(input)?.is_some() {
        let right = cut_err(coalesce).parse_next(input)?;
        return Ok(Expr::Coalesce(Box::new(left), Box::new(right)));
    }
    Ok(left)
}

fn postfix(input: &mut Input<'_>) -> ModalResult<Expr> {
    let mut expr = primary(input)?;
    while opt(symbol(".")).parse_next(input)?.is_some() {
        let name = cut_err(preceded(multispace0, member_name))
            .context(StrContext::Expected(StrContextValue::Description("member name")))
            .parse_next(input)?
            .to_string();
        expr = match opt(symbol("(")).parse_next(input)? {
            Some(_) => Expr::Method {
                target: Box::new(expr),
                name,
                args: arguments(input)?,
            },
            None => Expr::Member {
                target: Some(Box::new(expr)),
                name,
            },
        };
    }
    Ok(expr)
}

/// After a `.` any word names a member, keywords included.
fn member_name<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    alt((preceded(ESCAPE_PREFIX, word), word)).parse_next(input)
}

fn arguments(input: &mut Input<'_>) -> ModalResult<Vec<Expr>> {
    let args: Vec<Expr> = separated(0.., or_expr, symbol(",")).parse_next(input)?;
    cut_err(symbol(")"))
        .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
        .parse_next(input)?;
    Ok(args)
}

fn primary(input: &mut Input<'_>) -> ModalResult<Expr> {
    preceded(
        multispace0,
        alt((
            group,
            parameter.map(Expr::Param),
            preceded(ESCAPE_PREFIX, word).map(bare_member),
            string_literal.map(|text| Expr::Literal(Value::Text(text))),
            number.map(Expr::Literal),
            keyword_literal.map(Expr::Literal),
            word.verify(|name: &str| !is_keyword(name)).map(bare_member),
        )),
    )
    .context(StrContext::Label("expression"))
    .parse_next(input)
}

fn bare_member(name: &str) -> Expr {
    Expr::Member {
        target: None,
        name: name.to_string(),
    }
}

fn group(input: &mut Input<'_>) -> ModalResult<Expr> {
    delimited(
        '(',
        cut_err(or_expr),
        cut_err(symbol(")")).context(StrContext::Expected(StrContextValue::CharLiteral(')'))),
    )
    .parse_next(input)
}

fn parameter(input: &mut Input<'_>) -> ModalResult<usize> {
    preceded(ESCAPE_PREFIX, digit1.try_map(|digits: &str| digits.parse::<usize>())).parse_next(input)
}

fn string_literal(input: &mut Input<'_>) -> ModalResult<String> {
    preceded(
        '"',
        cut_err(terminated(repeat(0.., string_char), '"'))
            .context(StrContext::Expected(StrContextValue::Description("closing quote"))),
    )
    .parse_next(input)
}

fn string_char(input: &mut Input<'_>) -> ModalResult<char> {
    alt((
        preceded('\\', any).map(|escaped: char| match escaped {
            'n' => '\n',
            't' => '\t',
            other => other,
        }),
        none_of(['"', '\\']),
    ))
    .parse_next(input)
}

fn number(input: &mut Input<'_>) -> ModalResult<Value> {
    alt((
        (opt('-'), digit1, '.', digit1)
            .take()
            .try_map(|text: &str| text.parse::<f64>())
            .map(Value::Float),
        (opt('-'), digit1)
            .take()
            .try_map(|text: &str| text.parse::<i64>())
            .map(Value::Int),
    ))
    .parse_next(input)
}

fn keyword_literal(input: &mut Input<'_>) -> ModalResult<Value> {
    alt((
        keyword("null").value(Value::Null),
        keyword("true").value(Value::Bool(true)),
        keyword("false").value(Value::Bool(false)),
    ))
    .parse_next(input)
}
