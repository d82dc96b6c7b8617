//! XML validation utilities
//!
//! Provides well-formedness checks for DMN documents before they are
//! imported.

use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Check that `xml_content` is well-formed XML whose root element is
/// `definitions` (in any namespace).
///
/// # Arguments
///
/// * `xml_content` - The XML content to validate
///
/// # Returns
///
/// A `Result` indicating whether validation succeeded.
///
/// # Example
///
/// ```rust
/// use dmn_editor_core::validation::xml::validate_dmn_xml;
///
/// assert!(validate_dmn_xml("<definitions/>").is_ok());
/// assert!(validate_dmn_xml("<process/>").is_err());
/// ```
pub fn validate_dmn_xml(xml_content: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut root: Option<String> = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if root.is_none() {
                    root = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "XML parsing error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
                .context("DMN XML validation failed");
            }
        }
    }

    match root.as_deref() {
        Some("definitions") => Ok(()),
        Some(other) => Err(anyhow::anyhow!(
            "Root element is <{}>, expected <definitions>",
            other
        ))
        .context("DMN XML validation failed"),
        None => Err(anyhow::anyhow!("Document has no root element"))
            .context("DMN XML validation failed"),
    }
}

/// Read and validate a DMN file
pub fn validate_dmn_file(path: &std::path::Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read DMN file: {}", path.display()))?;
    validate_dmn_xml(&content)
}
