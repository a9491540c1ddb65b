//! 严格的字面量解析器
//!
//! 只接受列表、字符串、数字、`True`/`False`/`None` 字面量，任何其他表达式一律拒绝。
//! LLM 的返回内容不可信，绝不能交给通用的表达式求值器。

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, tag},
    character::complete::{char, digit0, digit1, multispace0, none_of, satisfy},
    combinator::{all_consuming, map, map_res, not, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::error::{AppError, AppResult};
use crate::models::ListNode;
use crate::utils::logging::truncate_text;

/// 列表最大嵌套深度
const MAX_DEPTH: usize = 32;

/// 解析一段完整的字面量文本
pub fn parse_literal(input: &str) -> AppResult<ListNode> {
    match all_consuming(delimited(multispace0, |i| literal(i, 0), multispace0))(input) {
        Ok((_, node)) => Ok(node),
        Err(err) => Err(AppError::literal_parse_failed(input, describe(err))),
    }
}

fn describe(err: nom::Err<Error<&str>>) -> String {
    match err {
        nom::Err::Incomplete(_) => "输入不完整".to_string(),
        nom::Err::Error(e) | nom::Err::Failure(e) if e.input.is_empty() => {
            format!("{:?}: 意外的输入结尾", e.code)
        }
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            format!("{:?}: 位于 '{}'", e.code, truncate_text(e.input, 20))
        }
    }
}

fn literal(input: &str, depth: usize) -> IResult<&str, ListNode> {
    alt((
        |i| list(i, depth),
        map(alt((single_quoted, double_quoted)), ListNode::Str),
        number,
        keyword,
    ))(input)
}

fn list(input: &str, depth: usize) -> IResult<&str, ListNode> {
    let (input, _) = char('[')(input)?;
    if depth >= MAX_DEPTH {
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
    }

    let (input, items) = separated_list0(
        char(','),
        delimited(multispace0, |i| literal(i, depth + 1), multispace0),
    )(input)?;
    // 允许末尾逗号: ['&', 'A', 'B',]
    let (input, _) = opt(char(','))(input)?;
    let (input, _) = preceded(multispace0, char(']'))(input)?;

    Ok((input, ListNode::List(items)))
}

fn single_quoted(input: &str) -> IResult<&str, String> {
    delimited(
        char('\''),
        map(
            opt(escaped_transform(none_of("'\\"), '\\', escape)),
            Option::unwrap_or_default,
        ),
        char('\''),
    )(input)
}

fn double_quoted(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        map(
            opt(escaped_transform(none_of("\"\\"), '\\', escape)),
            Option::unwrap_or_default,
        ),
        char('"'),
    )(input)
}

fn escape(input: &str) -> IResult<&str, char> {
    alt((
        value('\n', char('n')),
        value('\r', char('r')),
        value('\t', char('t')),
        value('\\', char('\\')),
        value('\'', char('\'')),
        value('"', char('"')),
    ))(input)
}

fn number(input: &str) -> IResult<&str, ListNode> {
    alt((
        map_res(
            recognize(tuple((opt(char('-')), digit1, char('.'), digit0))),
            |s: &str| s.parse::<f64>().map(ListNode::Float),
        ),
        map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
            s.parse::<i64>().map(ListNode::Int)
        }),
    ))(input)
}

fn keyword(input: &str) -> IResult<&str, ListNode> {
    terminated(
        alt((
            value(ListNode::Bool(true), tag("True")),
            value(ListNode::Bool(false), tag("False")),
            value(ListNode::None, tag("None")),
        )),
        not(satisfy(|c: char| c.is_alphanumeric() || c == '_')),
    )(input)
}
