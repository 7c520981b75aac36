//! One standardization run: analyze, render, export.

use crate::analysis::{clean_generated_text, AnalysisResult, AnalysisService, DocCategory, DocType};
use crate::service::{DocumentExporter, DocxPacker, ExportedDocument, Packer};
use crate::{Error, Result};

/// Everything produced by a standardization run
#[derive(Debug, Clone, PartialEq)]
pub struct Standardized {
    pub analysis: AnalysisResult,
    /// Cleaned HTML preview of the standardized document
    pub preview_html: String,
    /// Cleaned standardized text, empty when the analysis returned none.
    /// It is the export fallback when the preview has no block structure.
    pub plain_text: String,
    pub document: ExportedDocument,
}

/// Drives an [`AnalysisService`] and feeds its output to a [`DocumentExporter`]
pub struct Standardizer<S: AnalysisService, P: Packer = DocxPacker> {
    service: S,
    exporter: DocumentExporter<P>,
}

impl<S: AnalysisService> Standardizer<S, DocxPacker> {
    pub fn new(service: S) -> Self {
        Self::with_exporter(service, DocumentExporter::new())
    }
}

impl<S: AnalysisService, P: Packer> Standardizer<S, P> {
    pub fn with_exporter(service: S, exporter: DocumentExporter<P>) -> Self {
        Self { service, exporter }
    }

    pub fn exporter(&self) -> &DocumentExporter<P> {
        &self.exporter
    }

    /// Standardize raw document text and export the result.
    ///
    /// Collaborator errors are returned unchanged and stop the run before
    /// anything is exported.
    pub async fn standardize(
        &self,
        content: &str,
        doc_type: DocType,
        category: DocCategory,
        file_name: Option<&str>,
    ) -> Result<Standardized> {
        if content.trim().is_empty() {
            return Err(Error::MissingInput);
        }

        tracing::debug!(%doc_type, %category, "analyzing document");
        let analysis = self
            .service
            .analyze(content, doc_type, category)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "analysis failed"))?;

        let plain_text = analysis
            .standardized_content
            .as_deref()
            .map(clean_generated_text)
            .unwrap_or_default();
        let source = if plain_text.is_empty() { content } else { plain_text.as_str() };

        let preview = self
            .service
            .render_preview(source, category)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "preview rendering failed"))?;
        let preview_html = clean_generated_text(&preview);

        // Without standardized text the fallback is the stripped preview.
        let fallback = (!plain_text.is_empty()).then_some(plain_text.as_str());
        let document = self
            .exporter
            .export_with_text(&preview_html, file_name, fallback)
            .await?;

        tracing::info!(score = analysis.score, compliant = analysis.meets_standard(), "document standardized");
        Ok(Standardized {
            analysis,
            preview_html,
            plain_text,
            document,
        })
    }
}
