use crate::runtime::value::{NodeId, Value};
use miette::{Diagnostic, SourceSpan};
use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag},
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0},
    combinator::{all_consuming, map, map_res, opt, recognize, value},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, Clone, PartialEq)]
#[error("Invalid value literal")]
#[diagnostic(
    code(trace::literal),
    help("literals look like `3`, `2.5`, `\"text\"`, `true`, `undefined`, `@1`, `[1, 2]` or `{{value: 1}}`")
)]
pub struct LiteralError {
    #[source_code]
    pub src: String,
    #[label("{label}")]
    pub span: SourceSpan,
    pub label: String,
}

/// Parses one value literal, requiring the whole input to be consumed.
pub fn parse_value(input: &str) -> Result<Value, LiteralError> {
    match all_consuming(delimited(multispace0, literal, multispace0))(input) {
        Ok((_, value)) => Ok(value),
        Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => {
            let offset = input.len() - err.input.len();
            let label = if err.input.trim().is_empty() {
                "literal ends here".to_string()
            } else {
                "unexpected input".to_string()
            };
            Err(LiteralError {
                src: input.to_string(),
                span: (offset, err.input.len()).into(),
                label,
            })
        }
        Err(nom::Err::Incomplete(_)) => Err(LiteralError {
            src: input.to_string(),
            span: (input.len(), 0).into(),
            label: "literal ends here".into(),
        }),
    }
}

fn literal(input: &str) -> IResult<&str, Value> {
    alt((
        value(Value::Undefined, alt((tag("undefined"), tag("null")))),
        value(Value::Boolean(true), tag("true")),
        value(Value::Boolean(false), tag("false")),
        reference,
        number,
        text,
        array,
        record,
    ))(input)
}

fn reference(input: &str) -> IResult<&str, Value> {
    map(
        map_res(preceded(char('@'), digit1), |digits: &str| digits.parse::<NodeId>()),
        Value::Reference,
    )(input)
}

fn number(input: &str) -> IResult<&str, Value> {
    map_res(
        recognize(tuple((opt(char('-')), digit1, opt(pair(char('.'), digit1))))),
        |raw: &str| {
            if raw.contains('.') {
                raw.parse::<f64>().map(Value::Real).map_err(|_| ())
            } else {
                raw.parse::<i64>().map(Value::Integer).map_err(|_| ())
            }
        },
    )(input)
}

fn text(input: &str) -> IResult<&str, Value> {
    let body = alt((
        escaped_transform(
            is_not("\\\""),
            '\\',
            alt((
                value("\\", char('\\')),
                value("\"", char('"')),
                value("\n", char('n')),
                value("\t", char('t')),
            )),
        ),
        map(tag(""), |_: &str| String::new()),
    ));
    map(delimited(char('"'), body, char('"')), Value::Text)(input)
}

fn array(input: &str) -> IResult<&str, Value> {
    map(
        delimited(
            terminated(char('['), multispace0),
            separated_list0(comma, literal),
            preceded(multispace0, char(']')),
        ),
        Value::Array,
    )(input)
}

fn record(input: &str) -> IResult<&str, Value> {
    let field = separated_pair(
        identifier,
        delimited(multispace0, char(':'), multispace0),
        literal,
    );
    map(
        delimited(
            terminated(char('{'), multispace0),
            separated_list0(comma, field),
            preceded(multispace0, char('}')),
        ),
        |fields: Vec<(&str, Value)>| {
            Value::Record(
                fields
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .collect::<BTreeMap<_, _>>(),
            )
        },
    )(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalars() {
        assert_eq!(parse_value("42"), Ok(Value::Integer(42)));
        assert_eq!(parse_value(" -7 "), Ok(Value::Integer(-7)));
        assert_eq!(parse_value("2.5"), Ok(Value::Real(2.5)));
        assert_eq!(parse_value("true"), Ok(Value::Boolean(true)));
        assert_eq!(parse_value("null"), Ok(Value::Undefined));
        assert_eq!(parse_value("@12"), Ok(Value::Reference(12)));
        assert_eq!(parse_value("\"Fizz\""), Ok(Value::from("Fizz")));
        assert_eq!(parse_value("\"\""), Ok(Value::from("")));
    }

    #[test]
    fn parses_nested_collections() {
        let parsed = parse_value("{ value: 4, left: @2, right: undefined, tags: [1, \"a\"] }")
            .expect("record literal");
        let expected = Value::record([
            ("value", Value::Integer(4)),
            ("left", Value::Reference(2)),
            ("right", Value::Undefined),
            (
                "tags",
                Value::Array(vec![Value::Integer(1), Value::from("a")]),
            ),
        ]);
        assert_eq!(parsed, expected);
        assert_eq!(parse_value("[]"), Ok(Value::Array(Vec::new())));
    }

    #[test]
    fn escaped_quotes_survive_display_and_parse() {
        let original = Value::from("say \"hi\"");
        assert_eq!(parse_value(&original.to_string()), Ok(original));
    }

    #[test]
    fn trailing_input_is_rejected_with_its_offset() {
        let err = parse_value("[1, 2] junk").unwrap_err();
        assert_eq!(err.span.offset(), 7);
        assert_eq!(err.label, "unexpected input");
        assert!(parse_value("[1, 2").is_err());
    }
}
