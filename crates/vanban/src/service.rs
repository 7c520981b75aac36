//! DocumentExporter - the main entry point for HTML to `.docx` export.

use std::time::Duration;

use async_trait::async_trait;
use vanban_core::{write_docx, Document, Options, PackError, Spacing};

use crate::analysis::DocCategory;
use crate::convert::{convert, ConvertOptions};
use crate::fallback::{fallback_source, segment_lines};
use crate::html::parse_html;
use crate::{Error, Result};

/// Serialization capability used by the exporter.
///
/// A packer may depend on resources that become available only after the
/// exporter was built; [`Packer::is_ready`] reports that.
#[async_trait]
pub trait Packer: Send + Sync {
    /// Whether the packer can serve a request now
    fn is_ready(&self) -> bool {
        true
    }

    /// Serialize a document to file bytes
    async fn pack(&self, document: &Document, options: &Options) -> std::result::Result<Vec<u8>, PackError>;
}

/// Packs documents as `.docx` files with docx-rs
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxPacker;

#[async_trait]
impl Packer for DocxPacker {
    async fn pack(&self, document: &Document, options: &Options) -> std::result::Result<Vec<u8>, PackError> {
        write_docx(document, options)
    }
}

/// How long to wait for a packer to become ready
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Re-checks after the first failed check
    pub max_attempts: u32,
    /// Pause before each re-check
    pub delay: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_millis(200),
        }
    }
}

/// Options for DocumentExporter
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Page layout and document defaults
    pub document: Options,

    /// Spacing of body paragraphs
    pub spacing: Spacing,

    /// Packer readiness wait
    pub readiness: ReadinessPolicy,

    /// Prefix added to a supplied file name
    pub file_prefix: String,

    /// File name used when none is supplied
    pub default_file_name: String,
}

impl ExportOptions {
    /// Options following the standard of a document category
    pub fn for_category(category: DocCategory) -> Self {
        let standard = category.standard();
        Self {
            document: Options::from_standard(standard),
            spacing: Spacing {
                line: standard.line_twips(),
                ..Spacing::default()
            },
            ..Self::default()
        }
    }

    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            spacing: self.spacing,
            ..ConvertOptions::from_document(&self.document)
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            document: Options::default(),
            spacing: Spacing::default(),
            readiness: ReadinessPolicy::default(),
            file_prefix: "ChuanHoa_".to_string(),
            default_file_name: "VanBan_ChuanHoa.docx".to_string(),
        }
    }
}

/// A finished export ready to be offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    pub const CONTENT_TYPE: &'static str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
}

/// The exporter turning AI-rendered HTML previews into `.docx` files
pub struct DocumentExporter<P: Packer = DocxPacker> {
    packer: P,
    options: ExportOptions,
}

impl DocumentExporter<DocxPacker> {
    /// Create a DocumentExporter with the built-in packer and default options
    pub fn new() -> Self {
        Self::with_packer(DocxPacker)
    }
}

impl Default for DocumentExporter<DocxPacker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Packer> DocumentExporter<P> {
    /// Create a DocumentExporter with a custom packer
    pub fn with_packer(packer: P) -> Self {
        Self::with_options(packer, ExportOptions::default())
    }

    /// Create a DocumentExporter with a custom packer and options
    pub fn with_options(packer: P, options: ExportOptions) -> Self {
        Self { packer, options }
    }

    /// Get the current options
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ExportOptions {
        &mut self.options
    }

    /// Export an HTML preview to a `.docx` file
    pub async fn export(&self, html: &str, file_name: Option<&str>) -> Result<ExportedDocument> {
        self.export_with_text(html, file_name, None).await
    }

    /// Export an HTML preview, falling back to `plain_text` when the HTML has
    /// no block content
    pub async fn export_with_text(
        &self,
        html: &str,
        file_name: Option<&str>,
        plain_text: Option<&str>,
    ) -> Result<ExportedDocument> {
        let has_text = plain_text.is_some_and(|t| !t.trim().is_empty());
        if html.trim().is_empty() && !has_text {
            tracing::warn!("export requested without content");
            return Err(Error::MissingInput);
        }

        self.wait_until_ready().await?;

        let document = self.build_document(html, plain_text);
        let bytes = self
            .packer
            .pack(&document, &self.options.document)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "document creation failed");
                Error::Creation(e.to_string())
            })?;

        let file_name = self.output_file_name(file_name);
        tracing::info!(file_name = %file_name, size = bytes.len(), "document exported");
        Ok(ExportedDocument { file_name, bytes })
    }

    /// Build the document for an HTML preview without packing it.
    ///
    /// The HTML walk is tried first; when it yields no blocks the plain text
    /// (or the tag-stripped HTML) is segmented line by line.
    pub fn build_document(&self, html: &str, plain_text: Option<&str>) -> Document {
        let options = self.options.convert_options();
        let blocks = convert(&parse_html(html), &options);
        if !blocks.is_empty() {
            return Document::new(blocks);
        }

        let source = fallback_source(html, plain_text);
        let blocks = segment_lines(&source, &options);
        tracing::debug!(blocks = blocks.len(), "html had no block content, used plain-text fallback");
        Document::new(blocks)
    }

    /// Output file name for an optional source file name
    pub fn output_file_name(&self, file_name: Option<&str>) -> String {
        match file_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => format!("{}{}", self.options.file_prefix, name),
            None => self.options.default_file_name.clone(),
        }
    }

    async fn wait_until_ready(&self) -> Result<()> {
        let policy = self.options.readiness;
        if self.packer.is_ready() {
            return Ok(());
        }

        for attempt in 1..=policy.max_attempts {
            tracing::warn!(attempt, max_attempts = policy.max_attempts, "packer not ready, waiting");
            tokio::time::sleep(policy.delay).await;
            if self.packer.is_ready() {
                return Ok(());
            }
        }

        tracing::error!(attempts = policy.max_attempts, "packer never became ready");
        Err(Error::NotReady {
            attempts: policy.max_attempts,
        })
    }
}
