use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::opt;
use nom::multi::separated_list1;
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};
use nom_language::error::VerboseError;

use crate::model::StructDecl;
use crate::parser::{identifier, ws};

// One declarator: identifier with an optional `= literal` or `{literal}`
// initializer. Initializers are discarded, the binding zero-fills on
// construction.
fn declarator(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    let (input, name) = identifier(input)?;
    let (input, _) = opt(alt((
        delimited(
            ws(char('{')),
            take_while1(|c| c != '}'),
            char('}'),
        ),
        preceded(
            ws(char('=')),
            take_while1(|c: char| c != ',' && c != ';' && c != '}'),
        ),
    )))
    .parse(input)?;

    Ok((input, name))
}

/// Parse one member declaration line, `Type name1, name2;`, into the
/// declared type and its declarator names in order.
pub fn struct_member(input: &str) -> IResult<&str, StructDecl, VerboseError<&str>> {
    let (input, typename) = preceded(multispace0, identifier).parse(input)?;
    let (input, _) = multispace1.parse(input)?;
    let (input, variables) =
        separated_list1(delimited(multispace0, char(','), multispace0), declarator)
            .parse(input)?;
    let (input, _) = preceded(multispace0, char(';')).parse(input)?;

    Ok((
        input,
        StructDecl {
            typename: typename.to_string(),
            variables: variables.into_iter().map(|v| v.to_string()).collect(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_declarator() {
        assert_eq!(
            struct_member("int count;"),
            Ok((
                "",
                StructDecl {
                    typename: "int".to_string(),
                    variables: vec!["count".to_string()],
                }
            ))
        );
    }

    #[test]
    fn test_multiple_declarators() {
        assert_eq!(
            struct_member("float begin, end;"),
            Ok((
                "",
                StructDecl {
                    typename: "float".to_string(),
                    variables: vec!["begin".to_string(), "end".to_string()],
                }
            ))
        );
    }

    #[test]
    fn test_initializers_are_ignored() {
        for input in ["int count = 0;", "int count {0};", "int count{0};"] {
            assert_eq!(
                struct_member(input),
                Ok((
                    "",
                    StructDecl {
                        typename: "int".to_string(),
                        variables: vec!["count".to_string()],
                    }
                )),
                "failed on {input:?}"
            );
        }
    }

    #[test]
    fn test_mixed_initializers() {
        assert_eq!(
            struct_member("float begin = 0.5, end;"),
            Ok((
                "",
                StructDecl {
                    typename: "float".to_string(),
                    variables: vec!["begin".to_string(), "end".to_string()],
                }
            ))
        );
    }

    #[test]
    fn test_missing_semicolon() {
        assert!(struct_member("int count").is_err());
    }
}
