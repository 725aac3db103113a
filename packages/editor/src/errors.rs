//! Error types for the editor

use pagecraft_compiler_html::CompileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Transfer error: {0}")]
    Transfer(#[from] crate::transfer::TransferError),

    #[error("HTML export error: {0}")]
    Export(#[from] CompileError),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("A/B test error: {0}")]
    AbTest(String),

    #[error("Document is not file-backed")]
    NotFileBacked,
}
