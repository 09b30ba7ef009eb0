// src/error.rs
use querywire_compiler::CompileError;
use thiserror::Error;

/// Errors surfaced by the facade and the command-line tool.
#[derive(Error, Debug)]
pub enum QueryWireError {
    #[error("Compilation failed: {0}")]
    Compile(#[from] CompileError),

    #[error("Expression tree is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
