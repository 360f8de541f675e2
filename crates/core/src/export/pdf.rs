use std::collections::BTreeMap;

use printpdf::{GeneratePdfOptions, PdfDocument, PdfSaveOptions};
use tracing::{debug, warn};

use super::error::ExportError;

/// Lay out rendered HTML and serialize it as PDF bytes.
///
/// Only fonts and images referenced by the HTML itself are available; no
/// extra assets are embedded.
pub fn generate_pdf(html: &str) -> Result<Vec<u8>, ExportError> {
    let mut warnings = Vec::new();
    let doc = PdfDocument::from_html(
        html,
        &BTreeMap::new(),
        &BTreeMap::new(),
        &GeneratePdfOptions::default(),
        &mut warnings,
    )
    .map_err(ExportError::Pdf)?;

    for w in &warnings {
        warn!(warning = ?w, "pdf layout");
    }

    let mut save_warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut save_warnings);
    for w in &save_warnings {
        warn!(warning = ?w, "pdf save");
    }

    debug!(bytes = bytes.len(), "pdf generated");
    Ok(bytes)
}
