//! Generates the preprocessor headers that declare messages of every arity.
//!
//! Two pipelines run off one arity bound:
//!
//! * the message macro template is rendered once per arity into one header;
//! * every line of the no-arity template becomes a variadic dispatcher plus the argument
//!   counting macro it selects through, written into a second header.
//!
//! Both render fully in memory; a header is only replaced once its whole text is known.

use std::path::Path;

use crate::bound::ArityBound;
use crate::config::GeneratorConfig;
use crate::error::{Error, Result, TemplateError};
use crate::generator::dispatch::DispatchTableGenerator;
use crate::generator::render::render_message_macros;
use crate::output::GeneratedFile;

pub mod bound;
pub mod config;
pub mod error;
pub mod generator;
pub mod output;
pub mod parser;
pub mod types;

/// What a run produced.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct RunSummary {
    pub bound: ArityBound,
    pub message_bytes: usize,
    pub no_arity_bytes: usize,
}

/// Reads the bound, then renders and writes both headers.
///
/// The bound is read before anything else, so a bad bound leaves both headers untouched. A
/// template error only keeps its own header from being written.
pub fn run(config: &GeneratorConfig) -> Result<RunSummary> {
    let bound = ArityBound::read(&config.arity_file)?;
    tracing::info!(max_arity = bound.max_arity(), "generating message macros");

    let message_bytes = generate_message_macros(config, bound)?;
    let no_arity_bytes = generate_no_arity_macros(config, bound)?;

    Ok(RunSummary {
        bound,
        message_bytes,
        no_arity_bytes,
    })
}

pub fn generate_message_macros(config: &GeneratorConfig, bound: ArityBound) -> Result<usize> {
    let template = read_template(&config.message_template)?;
    let body = render_message_macros(&template, bound)
        .map_err(|source| template_error(&config.message_template, source))?;

    write(&config.banner, body, &config.message_output)
}

pub fn generate_no_arity_macros(config: &GeneratorConfig, bound: ArityBound) -> Result<usize> {
    let template = read_template(&config.no_arity_template)?;
    let body = DispatchTableGenerator::new(&config.dispatch)
        .render_all(&template, bound)
        .map_err(|source| template_error(&config.no_arity_template, source))?;

    write(&config.banner, body, &config.no_arity_output)
}

fn read_template(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "reading template");
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn template_error(path: &Path, source: TemplateError) -> Error {
    Error::Template {
        path: path.to_path_buf(),
        source,
    }
}

fn write(banner: &str, body: String, path: &Path) -> Result<usize> {
    let file = GeneratedFile::new(banner, body);
    file.write(path)?;
    Ok(file.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MESSAGE_TEMPLATE: &str =
        "#define MESSAGE%{arity}(ret, name%{coma_args_signature}) ret name(%{args_signature})\n";
    const NO_ARITY_TEMPLATE: &str = "MESSAGE%{arity}(ret, name, %{args})\n";

    fn workspace(arity: &str) -> (tempfile::TempDir, GeneratorConfig) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("gen")).unwrap();
        fs::write(dir.path().join("arity"), arity).unwrap();
        fs::write(dir.path().join("message_macros_template"), MESSAGE_TEMPLATE).unwrap();
        fs::write(dir.path().join("no_arity_message_macros_template"), NO_ARITY_TEMPLATE).unwrap();

        let config = GeneratorConfig::default().rooted_at(dir.path());
        (dir, config)
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_run_writes_both_headers() {
        let (_dir, config) = workspace("1\n");
        let summary = run(&config).unwrap();
        assert_eq!(summary.bound, ArityBound::new(1));

        let messages = read(&config.message_output);
        assert_eq!(
            messages,
            format!(
                "{}#define MESSAGE0(ret, name) ret name()\n\
                 #define MESSAGE1(ret, name, arg0_type a0) ret name(arg0_type a0)\n",
                config.banner
            )
        );
        assert_eq!(summary.message_bytes, messages.len());

        let no_arity = read(&config.no_arity_output);
        assert!(no_arity.starts_with(&config.banner));
        assert!(no_arity.contains("(__VA_ARGS__, MESSAGE_1, _ARG_ERROR_SENTINEL, MESSAGE_0)"));
        assert!(no_arity.ends_with(
            "#define _GET_MESSAGE_MACRO(ret, name, arg0_type, a0, MACRO, ...) MACRO\n"
        ));
        assert_eq!(summary.no_arity_bytes, no_arity.len());
    }

    #[test]
    fn test_run_is_deterministic() {
        let (_dir, config) = workspace("4");
        run(&config).unwrap();
        let first = (read(&config.message_output), read(&config.no_arity_output));
        run(&config).unwrap();
        let second = (read(&config.message_output), read(&config.no_arity_output));
        assert_eq!(first, second);
    }

    #[test]
    fn test_bad_bound_touches_nothing() {
        let (_dir, config) = workspace("four");
        fs::write(&config.message_output, "old").unwrap();

        let result = run(&config);
        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(read(&config.message_output), "old");
        assert!(!config.no_arity_output.exists());
    }

    #[test]
    fn test_malformed_directive_keeps_header_unwritten() {
        let (_dir, config) = workspace("2");
        fs::write(&config.no_arity_template, "MESSAGE%{arity}\n").unwrap();

        match run(&config) {
            Err(Error::Template { path, source }) => {
                assert_eq!(path, config.no_arity_template);
                assert!(matches!(source, TemplateError::MalformedDirective { line: 1, .. }));
            }
            other => panic!("Expected template error, got {other:?}"),
        }
        assert!(config.message_output.exists());
        assert!(!config.no_arity_output.exists());
    }

    #[test]
    fn test_unknown_placeholder_keeps_header_unwritten() {
        let (_dir, config) = workspace("2");
        fs::write(&config.message_template, "%{arity} %{nope}\n").unwrap();

        let result = generate_message_macros(&config, ArityBound::new(2));
        assert!(matches!(
            result,
            Err(Error::Template {
                source: TemplateError::UnknownPlaceholder { .. },
                ..
            })
        ));
        assert!(!config.message_output.exists());
    }

    #[test]
    fn test_missing_template_is_io_error() {
        let (_dir, config) = workspace("2");
        fs::remove_file(&config.message_template).unwrap();

        match generate_message_macros(&config, ArityBound::new(2)) {
            Err(Error::Io { path, .. }) => assert_eq!(path, config.message_template),
            other => panic!("Expected I/O error, got {other:?}"),
        }
    }
}
