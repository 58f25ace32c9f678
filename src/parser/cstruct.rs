use nom::bytes::complete::tag;
use nom::character::complete::{char, multispace0, multispace1};
use nom::error::{ErrorKind, ParseError};
use nom::{IResult, Parser};
use nom_language::error::VerboseError;

use crate::model::StructDecl;
use crate::parser::member::struct_member;
use crate::parser::{identifier, line_comment};

/// An inner `struct NAME { ... };` block: the mirrored type name plus its
/// member declaration lines in order.
#[derive(Debug, PartialEq, Default)]
pub struct StructBlock {
    pub name: String,
    pub members: Vec<StructDecl>,
}

pub fn cpp_struct(input: &str) -> IResult<&str, StructBlock, VerboseError<&str>> {
    let (input, _) = (tag("struct"), multispace1).parse(input)?;
    let (input, name) = identifier(input)?;
    let (input, _) = (multispace0, char('{')).parse(input)?;

    let mut members = Vec::new();
    let mut input = input;
    loop {
        let (i, _) = multispace0.parse(input)?;
        input = i;

        if let Ok((i, _)) = line_comment(input) {
            input = i;
            continue;
        }

        if let Ok((i, member)) = struct_member(input) {
            members.push(member);
            input = i;
            continue;
        }

        if let Ok((i, _)) = char::<_, VerboseError<&str>>('}').parse(input) {
            let (i, _) = (multispace0, char(';')).parse(i)?;
            return Ok((
                i,
                StructBlock {
                    name: name.to_string(),
                    members,
                },
            ));
        }

        return Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Tag,
        )));
    }
}
