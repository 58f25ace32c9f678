use std::collections::HashSet;
use std::fs;
use std::path::Path;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::bytes::take_until;
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::opt;
use nom::error::{ErrorKind, ParseError};
use nom::multi::many1;
use nom::sequence::{delimited, preceded, terminated};
use nom::{IResult, Parser};
use nom_language::error::{VerboseError, convert_error};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::HeaderModel;
use crate::parser::cenum::cpp_enum;
use crate::parser::cstruct::cpp_struct;
use crate::parser::{identifier, line_comment, ws};

fn pragma_once(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    tag("#pragma once")(input)
}

fn include(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    let (input, _) = preceded(multispace0, tag("#include")).parse(input)?;
    let (input, _) = multispace0.parse(input)?;

    let relative = delimited(char('"'), take_until("\""), char('"'));
    let absolute = delimited(char('<'), take_until(">"), char('>'));
    let (input, file) = alt((relative, absolute)).parse(input)?;

    Ok((input, file))
}

// `namespace NAME {`
fn namespace_open(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    preceded(
        (multispace0, tag("namespace"), multispace1),
        terminated(identifier, ws(char('{'))),
    )
    .parse(input)
}

// `class NAME {` or `struct NAME {`
fn class_open(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    preceded(
        (alt((tag("class"), tag("struct"))), multispace1),
        terminated(identifier, ws(char('{'))),
    )
    .parse(input)
}

// `public:` / `protected:` / `private:`
fn access_specifier(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    terminated(
        alt((tag("public"), tag("protected"), tag("private"))),
        ws(char(':')),
    )
    .parse(input)
}

/// Parse a whole binding header: optional pragma, includes, a namespace
/// chain, and one enclosing class holding enum-class and struct
/// declarations. Declaration order is preserved throughout.
pub fn parse_header(input: &str) -> IResult<&str, HeaderModel, VerboseError<&str>> {
    let (input, _) = multispace0.parse(input)?;
    let (mut input, _) = opt(pragma_once).parse(input)?;

    while let Ok((i, _)) = include(input) {
        input = i;
    }

    let (input, namespaces) = many1(namespace_open).parse(input)?;
    let (class_input, classname) = class_open(input)?;

    let mut enum_classes = Vec::new();
    let mut structs = Vec::new();
    let mut struct_name = None;
    let mut input = class_input;
    loop {
        let (i, _) = multispace0.parse(input)?;
        input = i;

        if let Ok((i, _)) = access_specifier(input) {
            input = i;
            continue;
        }

        if let Ok((i, _)) = line_comment(input) {
            input = i;
            continue;
        }

        if let Ok((i, decl)) = cpp_enum(input) {
            enum_classes.push(decl);
            input = i;
            continue;
        }

        if let Ok((i, block)) = cpp_struct(input) {
            if struct_name.is_none() && !block.name.is_empty() {
                struct_name = Some(block.name);
            }
            structs.extend(block.members);
            input = i;
            continue;
        }

        // `};` closes the enclosing class
        if let Ok((i, _)) = (char::<_, VerboseError<&str>>('}'), multispace0, char(';'))
            .parse(input)
        {
            input = i;
            break;
        }

        return Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Tag,
        )));
    }

    for _ in &namespaces {
        let (i, _) = ws(char('}')).parse(input)?;
        input = i;
    }
    let (input, _) = multispace0.parse(input)?;

    Ok((
        input,
        HeaderModel {
            classname: classname.to_string(),
            namespaces: namespaces.iter().map(|n| n.to_string()).collect(),
            enum_classes,
            structs,
            struct_name,
        },
    ))
}

/// Read and parse one header file. Fails when the text does not match the
/// restricted grammar or when a member variable name repeats across the
/// header's aggregate property list.
pub fn read_header_file(path: &Path) -> Result<HeaderModel> {
    let source = fs::read_to_string(path)?;

    let model = match parse_header(&source) {
        Ok(("", model)) => model,
        Ok((rest, _)) => {
            return Err(Error::Parse {
                path: path.to_path_buf(),
                message: format!("unexpected trailing input: {:?}", rest.lines().next().unwrap_or("")),
            });
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(Error::Parse {
                path: path.to_path_buf(),
                message: convert_error(source.as_str(), e),
            });
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(Error::Parse {
                path: path.to_path_buf(),
                message: "incomplete input".to_string(),
            });
        }
    };

    let mut seen = HashSet::new();
    for s in &model.structs {
        for v in &s.variables {
            if !seen.insert(v.as_str()) {
                return Err(Error::Parse {
                    path: path.to_path_buf(),
                    message: format!("duplicate member variable `{v}`"),
                });
            }
        }
    }

    debug!(
        path = %path.display(),
        enums = model.enum_classes.len(),
        members = seen.len(),
        "parsed header"
    );
    Ok(model)
}
