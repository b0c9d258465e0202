use nom::bytes::complete::take_while1;
use nom::character::complete::multispace0;
use nom::error::ParseError;
use nom::sequence::delimited;
use nom::{IResult, Offset, Parser};
use nom_language::error::VerboseError;

pub mod directive;
pub mod template;

pub type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

pub fn ws<'a, O, E: ParseError<&'a str>, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
{
    delimited(multispace0, inner, multispace0)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn identifier(i: &str) -> PResult<'_, &str> {
    take_while1(is_ident_char).parse(i)
}

/// 1-based line and column of `fragment` inside `source`.
///
/// `fragment` must be a subslice of `source`, which is what every nom parser hands back.
pub fn position(source: &str, fragment: &str) -> (usize, usize) {
    let offset = source.offset(fragment);
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };

    (line, column)
}

/// The remaining input the deepest error stopped at, if nom reported one.
fn error_fragment<'a>(err: &nom::Err<VerboseError<&'a str>>) -> Option<&'a str> {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e.errors.first().map(|(rest, _)| *rest),
        nom::Err::Incomplete(_) => None,
    }
}
