use std::path::PathBuf;

use thiserror::Error;

/// Problems with the generator's configuration inputs: the arity bound and the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read arity bound from {path}: {source}")]
    UnreadableBound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("arity bound in {path} is not a non-negative integer: {content:?}")]
    InvalidBound { path: PathBuf, content: String },

    #[error("cannot read config file {path}: {source}")]
    UnreadableConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Problems inside a template's text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("malformed placeholder at line {line}, column {column}")]
    Syntax { line: usize, column: usize },

    #[error("unknown placeholder `{name}` at line {line}")]
    UnknownPlaceholder { name: String, line: usize },

    #[error("malformed directive at line {line}: {fault}")]
    MalformedDirective { line: usize, fault: DirectiveFault },
}

/// Why a dispatch directive was rejected.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DirectiveFault {
    #[error("expected `<macro-name-pattern>(<argument-pattern>)`")]
    Shape,

    #[error("malformed placeholder at column {column}")]
    PlaceholderSyntax { column: usize },

    #[error("macro name pattern must contain `arity` exactly once, found it {found} times")]
    ArityPlaceholder { found: usize },

    #[error("argument pattern must contain `args` exactly once, found it {found} times")]
    ArgsPlaceholder { found: usize },

    #[error("macro name pattern is empty once `arity` is removed")]
    EmptyMacroName,

    #[error("unexpected placeholder `{0}`")]
    UnexpectedPlaceholder(String),
}

/// Everything that can abort a generator run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{path}: {source}")]
    Template {
        path: PathBuf,
        source: TemplateError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
