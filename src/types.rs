use nom::IResult;
use nom_language::error::VerboseError;

/// Implement this trait for each piece of template text you want to turn into a rust struct.
/// Examples are whole templates and single dispatch directives.
pub trait Parsable<'a>: Sized {
    fn parse(input: &'a str) -> IResult<&'a str, Self, VerboseError<&'a str>>;
}

/// Named values a template can be filled with.
pub trait Bindings {
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl Bindings for [(&str, &str)] {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.iter().find(|(key, _)| *key == name).map(|(_, value)| *value)
    }
}

impl<const N: usize> Bindings for [(&str, &str); N] {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.as_slice().lookup(name)
    }
}
