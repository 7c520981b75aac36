//! `.docx` packaging
//!
//! Builds the document with docx-rs and packs it into an Open Packaging
//! Conventions archive held in memory.

use std::io::Cursor;

use crate::ast::Document;
use crate::options::Options;
use crate::serialize::build_docx;

/// Error raised while packing a document
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("failed to pack docx: {0}")]
    Docx(String),

    #[error("packer unavailable: {0}")]
    Unavailable(String),
}

/// Pack a document into the bytes of a `.docx` file
pub fn write_docx(document: &Document, options: &Options) -> Result<Vec<u8>, PackError> {
    let mut buffer = Vec::new();
    build_docx(document, options)
        .build()
        .pack(&mut Cursor::new(&mut buffer))
        .map_err(|e| PackError::Docx(e.to_string()))?;
    Ok(buffer)
}
