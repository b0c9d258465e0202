//! Generator configuration.
//!
//! Every field has a default, so an empty TOML document (or no file at all) reproduces the
//! stock layout: inputs in the working directory, headers under `gen/`.
//!
//! ```
//! use arity_macro_gen::config::GeneratorConfig;
//!
//! let config = GeneratorConfig::from_toml_str(r#"
//!     arity_file = "templates/arity"
//!     message_output = "include/gen/message_macros.hpp"
//!
//!     [dispatch]
//!     va_args_proxy = "_MY_VA_ARGS_PROXY"
//! "#).unwrap();
//!
//! assert_eq!(config.arity_file.to_str(), Some("templates/arity"));
//! assert_eq!(config.dispatch.arg_error_sentinel, "_ARG_ERROR_SENTINEL");
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::generator::dispatch::DispatchConventions;
use crate::output::DEFAULT_BANNER;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneratorConfig {
    /// File holding the highest arity to generate.
    pub arity_file: PathBuf,

    /// Template rendered once per arity.
    pub message_template: PathBuf,

    /// One dispatch directive per line.
    pub no_arity_template: PathBuf,

    pub message_output: PathBuf,

    pub no_arity_output: PathBuf,

    /// Comment block put in front of both headers.
    pub banner: String,

    pub dispatch: DispatchConventions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            arity_file: PathBuf::from("arity"),
            message_template: PathBuf::from("message_macros_template"),
            no_arity_template: PathBuf::from("no_arity_message_macros_template"),
            message_output: PathBuf::from("gen/message_macros.hpp"),
            no_arity_output: PathBuf::from("gen/no_arity_message_macros.hpp"),
            banner: DEFAULT_BANNER.to_string(),
            dispatch: DispatchConventions::default(),
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigError::UnreadableConfig {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Resolves every relative path against `root`.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        for path in [
            &mut self.arity_file,
            &mut self.message_template,
            &mut self.no_arity_template,
            &mut self.message_output,
            &mut self.no_arity_output,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }

        self
    }
}
