//! # vanban
//!
//! Export AI-rendered previews of Vietnamese administrative documents to
//! `.docx` files laid out per Decree 30/2020/NĐ-CP or Regulation 399-QĐ/TW.
//!
//! ## Design
//!
//! The preview is an HTML fragment (styled `div`s, paragraphs and tables).
//! It is parsed into an explicit [`Node`] tree, walked into the paragraph and
//! table model of [`vanban_core`], and packed through an injected [`Packer`].
//! When the HTML carries no block structure at all, the plain text is
//! segmented line by line instead, so the user always gets a document.
//!
//! ## Example
//!
//! ```rust
//! use vanban::DocumentExporter;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> vanban::Result<()> {
//! let exporter = DocumentExporter::new();
//! let exported = exporter
//!     .export(r#"<div style="text-align:center"><b>QUYẾT ĐỊNH</b></div>"#, Some("qd.docx"))
//!     .await?;
//!
//! assert_eq!(exported.file_name, "ChuanHoa_qd.docx");
//! assert!(!exported.bytes.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
mod convert;
mod fallback;
pub mod html;
pub mod node;
mod pipeline;
mod service;
mod style;
mod utilities;

pub use analysis::{
    clean_generated_text, parse_analysis, AnalysisResult, AnalysisService, DocCategory, DocType, Metadata,
    COMPLIANT_SCORE,
};
pub use convert::{convert, ConvertOptions};
pub use fallback::{fallback_source, segment_lines};
pub use html::parse_html;
pub use node::{Element, Node};
pub use pipeline::{Standardized, Standardizer};
pub use service::{DocumentExporter, DocxPacker, ExportOptions, ExportedDocument, Packer, ReadinessPolicy};
pub use style::{px_to_half_points, StyleMap};

/// Error type for vanban operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No content to export")]
    MissingInput,

    #[error("Document packer not ready after {attempts} attempts")]
    NotReady { attempts: u32 },

    #[error("Document creation failed: {0}")]
    Creation(String),

    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Invalid analysis response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
