use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::multispace0;
use nom::combinator::recognize;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser, error::ParseError};
use nom_language::error::VerboseError;

pub mod cenum;
pub mod cstruct;
pub mod header;
pub mod member;

pub fn ws<'a, O, E: ParseError<&'a str>, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
{
    delimited(multispace0, inner, multispace0)
}

// Parse C++ identifier: start with alpha or '_', continue alphanumeric or '_'
pub(crate) fn identifier(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    let first_char = |c: char| c.is_ascii_alphabetic() || c == '_';
    let other_char = |c: char| c.is_ascii_alphanumeric() || c == '_';

    recognize(pair(take_while1(first_char), take_while(other_char))).parse(input)
}

// Skip a `// ...` comment up to (not including) the line break
pub(crate) fn line_comment(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    preceded(tag("//"), take_while(|c| c != '\n')).parse(input)
}
