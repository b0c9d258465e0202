use crate::error::TemplateError;
use crate::parser::{PResult, error_fragment, identifier, position};
use crate::types::{Bindings, Parsable};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{char, one_of};
use nom::combinator::{all_consuming, map, value};
use nom::multi::many0;
use nom::sequence::{delimited, terminated};
use nom::{IResult, Parser};
use nom_language::error::VerboseError;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Text with `%{name}` placeholders, the format the macro templates are written in.
///
/// `%<name>s` and `%<name>d` are accepted as the typed spelling of the same placeholder, `%%`
/// stands for a single `%`.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Template<'a> {
    source: &'a str,
    segments: Vec<Segment<'a>>,
}

fn literal(input: &str) -> PResult<'_, Segment<'_>> {
    map(take_till1(|c: char| c == '%'), Segment::Literal).parse(input)
}

fn escaped_percent(input: &str) -> PResult<'_, Segment<'_>> {
    value(Segment::Literal("%"), tag("%%")).parse(input)
}

fn braced_placeholder(input: &str) -> PResult<'_, &str> {
    delimited(tag("%{"), identifier, char('}')).parse(input)
}

fn typed_placeholder(input: &str) -> PResult<'_, &str> {
    terminated(delimited(tag("%<"), identifier, char('>')), one_of("sd")).parse(input)
}

fn placeholder(input: &str) -> PResult<'_, Segment<'_>> {
    map(alt((braced_placeholder, typed_placeholder)), Segment::Placeholder).parse(input)
}

fn segment(input: &str) -> PResult<'_, Segment<'_>> {
    alt((literal, escaped_percent, placeholder)).parse(input)
}

impl<'a> Parsable<'a> for Template<'a> {
    fn parse(input: &'a str) -> IResult<&'a str, Self, VerboseError<&'a str>> {
        let (rest, segments) = all_consuming(many0(segment)).parse(input)?;

        Ok((
            rest,
            Template {
                source: input,
                segments,
            },
        ))
    }
}

impl<'a> Template<'a> {
    /// Parses a whole template, reporting where the first malformed placeholder sits.
    pub fn new(source: &'a str) -> Result<Self, TemplateError> {
        match <Template<'a> as Parsable<'a>>::parse(source) {
            Ok((_, template)) => Ok(template),
            Err(err) => {
                let fragment = error_fragment(&err).unwrap_or(source);
                let (line, column) = position(source, fragment);
                Err(TemplateError::Syntax { line, column })
            }
        }
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Placeholder names in order of appearance, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(*name),
            Segment::Literal(_) => None,
        })
    }

    /// Fails on the first placeholder `bindings` has no value for.
    pub fn check<B: Bindings + ?Sized>(&self, bindings: &B) -> Result<(), TemplateError> {
        match self.placeholders().find(|name| bindings.lookup(name).is_none()) {
            Some(name) => Err(self.unknown(name)),
            None => Ok(()),
        }
    }

    pub fn fill<B: Bindings + ?Sized>(&self, bindings: &B) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = bindings.lookup(name).ok_or_else(|| self.unknown(*name))?;
                    out.push_str(value);
                }
            }
        }

        Ok(out)
    }

    /// Replaces every placeholder with the same `value`, for patterns already known to carry a
    /// single placeholder name.
    pub fn fill_with(&self, value: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + value.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(_) => out.push_str(value),
            }
        }

        out
    }

    fn unknown(&self, name: &'a str) -> TemplateError {
        let (line, _) = position(self.source, name);
        TemplateError::UnknownPlaceholder {
            name: name.to_string(),
            line,
        }
    }
}
