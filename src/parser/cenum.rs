use nom::branch::alt;
use nom::{
    IResult, Parser,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{map_res, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, terminated},
};
use nom_language::error::VerboseError;

use crate::model::EnumDecl;
use crate::parser::identifier;

#[derive(Debug, PartialEq)]
struct EnumVariant<'a> {
    name: &'a str,
    value: Option<i64>,
}

// Parse optional integer literal (decimal only for simplicity)
fn int_literal(input: &str) -> IResult<&str, i64, VerboseError<&str>> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i64>()
    })
    .parse(input)
}

// Parse one enum variant: identifier [= int_literal]
fn enum_variant(input: &str) -> IResult<&str, EnumVariant, VerboseError<&str>> {
    let (input, name) = identifier(input)?;
    let (input, value) = opt(preceded(
        delimited(multispace0, char('='), multispace0),
        int_literal,
    ))
    .parse(input)?;

    Ok((input, EnumVariant { name, value }))
}

// Parse comma separated list of variants (allow trailing comma)
fn enum_variants(input: &str) -> IResult<&str, Vec<EnumVariant>, VerboseError<&str>> {
    let (input, variants) =
        separated_list0(delimited(multispace0, char(','), multispace0), enum_variant)
            .parse(input)?;

    let (input, _) = opt(char(',')).parse(input)?; // optional trailing comma

    Ok((input, variants))
}

/// Parse a full `enum class` declaration into its name and ordered member
/// names. Explicit member values are accepted and discarded: the runtime
/// value of a member is its position in the named list. A trailing sentinel
/// member `last = N` is dropped.
pub fn cpp_enum(input: &str) -> IResult<&str, EnumDecl, VerboseError<&str>> {
    let (input, _) = (tag("enum"), multispace1).parse(input)?;
    let (input, _) = terminated(alt((tag("class"), tag("struct"))), multispace1).parse(input)?;
    let (input, name) = terminated(identifier, multispace0).parse(input)?;
    let (input, _) = opt(delimited(
        (char(':'), multispace0),
        identifier,
        multispace0,
    ))
    .parse(input)?;
    let (input, mut variants) = delimited(
        char('{'),
        delimited(multispace0, enum_variants, multispace0),
        char('}'),
    )
    .parse(input)?;
    let (input, _) = delimited(multispace0, char(';'), multispace0).parse(input)?;

    if variants
        .last()
        .is_some_and(|v| v.name == "last" && v.value.is_some())
    {
        variants.pop();
    }

    Ok((
        input,
        EnumDecl {
            name: name.to_string(),
            members: variants.into_iter().map(|v| v.name.to_string()).collect(),
        },
    ))
}
