//! vanban-core - word-processor document model and `.docx` packaging
//!
//! This crate provides the target document model produced by the `vanban`
//! converter, the page layout of the Vietnamese regulatory standards, and the
//! serialization of a document into a `.docx` file.
//!
//! # Architecture
//!
//! ```text
//!                  ┌──────────┐  build_docx  ┌───────────────┐  pack  ┌───────┐
//! vanban convert ─▶│ Document │ ───────────▶ │ docx_rs::Docx │ ─────▶ │ .docx │
//!                  └──────────┘              └───────────────┘        └───────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use vanban_core::{write_docx, Alignment, Block, Document, Options, Paragraph, Run, RunFlags};
//!
//! let document = Document::new(vec![Block::Paragraph(Paragraph::new(
//!     Alignment::Center,
//!     vec![Run::new("QUYẾT ĐỊNH", "Times New Roman", 28, RunFlags::new(true, false))],
//! ))]);
//!
//! let bytes = write_docx(&document, &Options::default()).unwrap();
//! assert!(!bytes.is_empty());
//! ```

mod ast;
mod options;
mod package;
mod serialize;
pub mod standard;

pub use ast::{Alignment, Block, Document, Paragraph, Run, RunFlags, Spacing, Table, TableCell, TableRow};
pub use options::{Margins, Options, PageLayout};
pub use package::{write_docx, PackError};
pub use serialize::{build_docx, xml_text};
pub use standard::{DocStandard, ND30, QD399};
