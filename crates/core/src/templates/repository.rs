use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::engine::{Template, TemplateRenderError};

#[derive(Debug, Error)]
pub enum TemplateLoadError {
    #[error("template not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read template file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: TemplateRenderError,
    },
}

/// Read and compile an HTML template from disk.
pub fn load_template(path: &Path) -> Result<Template, TemplateLoadError> {
    if !path.exists() {
        return Err(TemplateLoadError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| TemplateLoadError::Io { path: path.to_path_buf(), source: e })?;

    let template = Template::parse(&content)
        .map_err(|e| TemplateLoadError::Parse { path: path.to_path_buf(), source: e })?;

    debug!(path = %path.display(), bytes = content.len(), "template loaded");
    Ok(template)
}
