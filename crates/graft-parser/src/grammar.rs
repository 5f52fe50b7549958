//! Grammar for binding expressions.
//!
//! Precedence, loosest to tightest: `||`, `&&`, comparisons, additive,
//! multiplicative, unary, primary.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0},
    combinator::{map, value},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded},
    IResult,
};

use graft_core::{ParseError, Value};

use crate::ast::{BinaryOp, Expr, PropPath, UnaryOp};
use crate::lexer::{identifier, number, string_literal};

/// Parse a complete binding expression.
pub fn parse_expression(source: &str) -> Result<Expr, ParseError> {
    if source.trim().is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    match expression(source) {
        Ok((rest, expr)) => {
            let rest = rest.trim_start();
            if rest.is_empty() {
                Ok(expr)
            } else {
                Err(ParseError::TrailingInput {
                    rest: rest.to_string(),
                })
            }
        }
        Err(nom::Err::Failure(_)) => Err(ParseError::UnterminatedString),
        Err(nom::Err::Error(e)) => Err(ParseError::UnexpectedToken {
            found: snippet(e.input),
            offset: source.len() - e.input.len(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::UnexpectedToken {
            found: String::new(),
            offset: source.len(),
        }),
    }
}

fn snippet(input: &str) -> String {
    input.chars().take(12).collect()
}

fn fold_binary(first: Expr, rest: Vec<(BinaryOp, Expr)>) -> Expr {
    rest.into_iter().fold(first, |left, (op, right)| Expr::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

fn expression(input: &str) -> IResult<&str, Expr> {
    or_expr(input)
}

fn or_expr(input: &str) -> IResult<&str, Expr> {
    let (input, first) = and_expr(input)?;
    let (input, rest) = many0(pair(
        preceded(multispace0, value(BinaryOp::Or, tag("||"))),
        and_expr,
    ))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn and_expr(input: &str) -> IResult<&str, Expr> {
    let (input, first) = comparison(input)?;
    let (input, rest) = many0(pair(
        preceded(multispace0, value(BinaryOp::And, tag("&&"))),
        comparison,
    ))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn comparison(input: &str) -> IResult<&str, Expr> {
    let (input, first) = additive(input)?;
    let (input, rest) = many0(pair(
        preceded(
            multispace0,
            alt((
                value(BinaryOp::Eq, tag("==")),
                value(BinaryOp::Ne, tag("!=")),
                value(BinaryOp::Le, tag("<=")),
                value(BinaryOp::Ge, tag(">=")),
                value(BinaryOp::Lt, tag("<")),
                value(BinaryOp::Gt, tag(">")),
            )),
        ),
        additive,
    ))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn additive(input: &str) -> IResult<&str, Expr> {
    let (input, first) = multiplicative(input)?;
    let (input, rest) = many0(pair(
        preceded(
            multispace0,
            alt((
                value(BinaryOp::Add, tag("+")),
                value(BinaryOp::Sub, tag("-")),
            )),
        ),
        multiplicative,
    ))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn multiplicative(input: &str) -> IResult<&str, Expr> {
    let (input, first) = unary(input)?;
    let (input, rest) = many0(pair(
        preceded(
            multispace0,
            alt((
                value(BinaryOp::Mul, tag("*")),
                value(BinaryOp::Div, tag("/")),
            )),
        ),
        unary,
    ))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn unary(input: &str) -> IResult<&str, Expr> {
    preceded(
        multispace0,
        alt((
            map(preceded(char('!'), unary), |expr| Expr::Unary {
                op: UnaryOp::Not,
                expr: Box::new(expr),
            }),
            map(preceded(char('-'), unary), |expr| Expr::Unary {
                op: UnaryOp::Neg,
                expr: Box::new(expr),
            }),
            primary,
        )),
    )(input)
}

fn primary(input: &str) -> IResult<&str, Expr> {
    preceded(
        multispace0,
        alt((
            map(string_literal, |s| Expr::Literal(Value::Str(s))),
            map(number, |n| Expr::Literal(Value::Number(n))),
            keyword_or_path,
            delimited(char('('), expression, preceded(multispace0, char(')'))),
        )),
    )(input)
}

fn keyword_or_path(input: &str) -> IResult<&str, Expr> {
    map(
        separated_list1(char('.'), identifier),
        |segments: Vec<&str>| match segments.as_slice() {
            ["null"] => Expr::Literal(Value::Null),
            ["true"] => Expr::Literal(Value::Bool(true)),
            ["false"] => Expr::Literal(Value::Bool(false)),
            _ => Expr::Path(PropPath::new(segments.iter().copied())),
        },
    )(input)
}
