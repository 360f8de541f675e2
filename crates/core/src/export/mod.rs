//! Writing rendered templates to disk as HTML or PDF.

pub mod error;
pub mod pdf;

use std::fs;
use std::path::Path;

use tracing::debug;

pub use error::ExportError;
pub use pdf::generate_pdf;

/// What ended up on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Pdf,
    Html,
}

impl OutputKind {
    /// `.pdf` (any case) means PDF; everything else gets the HTML as-is.
    pub fn for_path(path: &Path) -> Self {
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf { Self::Pdf } else { Self::Html }
    }
}

/// Write `rendered` to `path`, creating parent directories first.
pub fn write_output(rendered: &str, path: &Path) -> Result<OutputKind, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| ExportError::Io { path: parent.to_path_buf(), source: e })?;
    }

    let kind = OutputKind::for_path(path);
    let bytes = match kind {
        OutputKind::Pdf => generate_pdf(rendered)?,
        OutputKind::Html => rendered.as_bytes().to_vec(),
    };

    fs::write(path, &bytes)
        .map_err(|e| ExportError::Io { path: path.to_path_buf(), source: e })?;

    debug!(path = %path.display(), ?kind, bytes = bytes.len(), "output written");
    Ok(kind)
}
