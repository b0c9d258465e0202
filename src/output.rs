use std::fs::Permissions;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Banner written at the top of every generated header.
pub const DEFAULT_BANNER: &str = "\
// this file is automatically generated by a script
// do not edit it manually, edit the templates it is generated from instead
//

";

/// A generated header: banner followed by the rendered body.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct GeneratedFile<'a> {
    banner: &'a str,
    body: String,
}

impl<'a> GeneratedFile<'a> {
    pub fn new(banner: &'a str, body: String) -> Self {
        Self { banner, body }
    }

    pub(crate) fn len(&self) -> usize {
        self.banner.len() + self.body.len()
    }

    pub fn contents(&self) -> String {
        let mut out = String::with_capacity(self.len());
        out.push_str(self.banner);
        out.push_str(&self.body);
        out
    }

    /// Replaces `path` with this file. The text goes to a temporary file next to `path` first,
    /// so readers see either the old or the complete new header.
    ///
    /// A replaced header keeps its permissions, a new one gets `0644`.
    pub fn write(&self, path: &Path) -> Result<()> {
        let io_error = |source: std::io::Error| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
        file.write_all(self.banner.as_bytes()).map_err(io_error)?;
        file.write_all(self.body.as_bytes()).map_err(io_error)?;
        file.flush().map_err(io_error)?;

        let permissions = match std::fs::metadata(path) {
            Ok(existing) => Some(existing.permissions()),
            Err(_) => fresh_permissions(),
        };
        if let Some(permissions) = permissions {
            file.as_file().set_permissions(permissions).map_err(io_error)?;
        }

        file.persist(path).map_err(|err| io_error(err.error))?;

        tracing::info!(path = %path.display(), bytes = self.len(), "wrote generated header");
        Ok(())
    }
}

#[cfg(unix)]
fn fresh_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn fresh_permissions() -> Option<Permissions> {
    None
}
