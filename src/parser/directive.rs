use crate::error::{DirectiveFault, TemplateError};
use crate::parser::template::Template;
use crate::parser::{PResult, position, ws};
use crate::types::Parsable;
use nom::branch::alt;
use nom::bytes::complete::take_till1;
use nom::character::complete::char;
use nom::combinator::{all_consuming, map, recognize};
use nom::multi::many0;
use nom::sequence::delimited;
use nom::{IResult, Parser};
use nom_language::error::VerboseError;

/// Placeholder the macro name pattern is instantiated through.
pub const ARITY_PLACEHOLDER: &str = "arity";
/// Placeholder the argument pattern is instantiated through.
pub const ARGS_PLACEHOLDER: &str = "args";

/// The two raw halves of a directive line, before their placeholders are checked.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct DirectiveShape<'a> {
    pub name_pattern: &'a str,
    pub argument_pattern: &'a str,
}

fn name_pattern(input: &str) -> PResult<'_, &str> {
    map(take_till1(|c: char| c == '('), str::trim_end).parse(input)
}

/// A parenthesized group with its parentheses, nested groups included.
fn balanced(input: &str) -> PResult<'_, &str> {
    recognize(delimited(
        char('('),
        many0(alt((take_till1(|c: char| c == '(' || c == ')'), balanced))),
        char(')'),
    ))
    .parse(input)
}

impl<'a> Parsable<'a> for DirectiveShape<'a> {
    fn parse(input: &'a str) -> IResult<&'a str, Self, VerboseError<&'a str>> {
        map(
            all_consuming(ws((name_pattern, balanced))),
            |(name_pattern, argument_pattern)| DirectiveShape {
                name_pattern,
                argument_pattern,
            },
        )
        .parse(input)
    }
}

/// One line of the no-arity template, e.g. `DYNAMIX_MESSAGE%{arity}(return_type, message, %{args})`.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Directive<'a> {
    pub line: usize,
    name: Template<'a>,
    arguments: Template<'a>,
}

impl<'a> Directive<'a> {
    pub fn new(text: &'a str, line: usize) -> Result<Self, TemplateError> {
        let (name, arguments) = Self::from_text(text)
            .map_err(|fault| TemplateError::MalformedDirective { line, fault })?;

        Ok(Directive {
            line,
            name,
            arguments,
        })
    }

    fn from_text(text: &'a str) -> Result<(Template<'a>, Template<'a>), DirectiveFault> {
        let (_, shape) = DirectiveShape::parse(text).map_err(|_| DirectiveFault::Shape)?;

        let name = pattern(text, shape.name_pattern)?;
        expect_once(&name, ARITY_PLACEHOLDER, |found| {
            DirectiveFault::ArityPlaceholder { found }
        })?;
        if name.fill_with("").trim().is_empty() {
            return Err(DirectiveFault::EmptyMacroName);
        }

        let arguments = pattern(text, shape.argument_pattern)?;
        expect_once(&arguments, ARGS_PLACEHOLDER, |found| {
            DirectiveFault::ArgsPlaceholder { found }
        })?;

        Ok((name, arguments))
    }

    /// Macro name with the arity placeholder replaced by `suffix`.
    pub fn macro_name(&self, suffix: &str) -> String {
        self.name.fill_with(suffix)
    }

    /// Name of the public, arity-less dispatcher.
    pub fn base_name(&self) -> String {
        self.macro_name("")
    }

    pub fn arity_macro(&self, arity: usize) -> String {
        self.macro_name(&format!("_{arity}"))
    }

    /// The parenthesized argument pattern with `args` replaced.
    pub fn arguments(&self, args: &str) -> String {
        self.arguments.fill_with(args)
    }
}

fn pattern<'a>(line: &'a str, fragment: &'a str) -> Result<Template<'a>, DirectiveFault> {
    Template::new(fragment).map_err(|err| match err {
        TemplateError::Syntax { column, .. } => DirectiveFault::PlaceholderSyntax {
            column: position(line, fragment).1 + column - 1,
        },
        _ => DirectiveFault::Shape,
    })
}

/// `wanted` has to be the only placeholder of `template` and occur exactly once.
fn expect_once(
    template: &Template,
    wanted: &str,
    miscount: fn(usize) -> DirectiveFault,
) -> Result<(), DirectiveFault> {
    let mut found = 0;
    for name in template.placeholders() {
        if name != wanted {
            return Err(DirectiveFault::UnexpectedPlaceholder(name.to_string()));
        }
        found += 1;
    }

    if found == 1 { Ok(()) } else { Err(miscount(found)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_whitespace_string() -> String {
        let mut rng = rand::rng();
        let len = rng.random_range(0..=12);
        (0..len).map(|_| if rng.random_bool(0.5) { ' ' } else { '\t' }).collect()
    }

    #[test]
    fn test_shape() {
        let input = "DMSG%{arity}(name, %{args})";
        assert_eq!(
            DirectiveShape::parse(input),
            Ok((
                "",
                DirectiveShape {
                    name_pattern: "DMSG%{arity}",
                    argument_pattern: "(name, %{args})",
                }
            ))
        );
    }

    #[test]
    fn test_shape_nested_parentheses() {
        let input = "DMSG%{arity}(ret (*)(int), name, %{args})";
        let (_, shape) = DirectiveShape::parse(input).unwrap();
        assert_eq!(shape.argument_pattern, "(ret (*)(int), name, %{args})");
    }

    #[test]
    fn test_shape_with_surrounding_whitespace() {
        let input = format!(
            "{}DMSG%{{arity}} (name, %{{args}}){}",
            random_whitespace_string(),
            random_whitespace_string()
        );
        let (_, shape) = DirectiveShape::parse(&input).unwrap();
        assert_eq!(shape.name_pattern, "DMSG%{arity}");
        assert_eq!(shape.argument_pattern, "(name, %{args})");
    }

    #[test]
    fn test_directive_names() {
        let directive = Directive::new("DMSG0%{arity}(name, %{args})", 1).unwrap();
        assert_eq!(directive.base_name(), "DMSG0");
        assert_eq!(directive.arity_macro(0), "DMSG0_0");
        assert_eq!(directive.arity_macro(12), "DMSG0_12");
        assert_eq!(directive.arguments("a, b"), "(name, a, b)");
    }

    #[test]
    fn test_arity_placeholder_in_the_middle() {
        let directive = Directive::new("DECLARE%{arity}_CONST(r, m, %{args})", 1).unwrap();
        assert_eq!(directive.base_name(), "DECLARE_CONST");
        assert_eq!(directive.arity_macro(3), "DECLARE_3_CONST");
    }

    #[test]
    fn test_no_parentheses() {
        assert_eq!(
            Directive::new("DMSG%{arity}", 4),
            Err(TemplateError::MalformedDirective {
                line: 4,
                fault: DirectiveFault::Shape
            })
        );
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert!(Directive::new("DMSG%{arity}(name, (%{args})", 1).is_err());
        assert!(Directive::new("DMSG%{arity}(name, %{args}))", 1).is_err());
    }

    #[test]
    fn test_trailing_text() {
        assert_eq!(
            Directive::new("DMSG%{arity}(name, %{args}) extra", 2),
            Err(TemplateError::MalformedDirective {
                line: 2,
                fault: DirectiveFault::Shape
            })
        );
    }

    #[test]
    fn test_missing_arity_placeholder() {
        assert_eq!(
            Directive::new("DMSG(name, %{args})", 1),
            Err(TemplateError::MalformedDirective {
                line: 1,
                fault: DirectiveFault::ArityPlaceholder { found: 0 }
            })
        );
    }

    #[test]
    fn test_repeated_args_placeholder() {
        assert_eq!(
            Directive::new("DMSG%{arity}(%{args}, %{args})", 1),
            Err(TemplateError::MalformedDirective {
                line: 1,
                fault: DirectiveFault::ArgsPlaceholder { found: 2 }
            })
        );
    }

    #[test]
    fn test_foreign_placeholder() {
        assert_eq!(
            Directive::new("DMSG%{arity}(%{name}, %{args})", 1),
            Err(TemplateError::MalformedDirective {
                line: 1,
                fault: DirectiveFault::UnexpectedPlaceholder("name".to_string())
            })
        );
    }

    #[test]
    fn test_bad_placeholder_column() {
        assert_eq!(
            Directive::new("DMSG%{arity}(name, %args)", 7),
            Err(TemplateError::MalformedDirective {
                line: 7,
                fault: DirectiveFault::PlaceholderSyntax { column: 20 }
            })
        );
    }

    #[test]
    fn test_placeholder_only_macro_name() {
        assert_eq!(
            Directive::new("%{arity}(name, %{args})", 5),
            Err(TemplateError::MalformedDirective {
                line: 5,
                fault: DirectiveFault::EmptyMacroName
            })
        );
    }
}
