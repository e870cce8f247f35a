use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Range error: {0}")]
    Range(String),

    #[error("Invalid literal: '{0}'")]
    Literal(String),

    #[error("Input too large: {size} bytes (max {max})")]
    InputTooLarge { size: u64, max: usize },

    #[error("Input is empty")]
    EmptyInput,

    #[error("Out of memory while building song image")]
    OutOfMemory,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// True for errors raised by the assembler itself rather than by input loading
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            Error::Syntax(_) | Error::Range(_) | Error::Literal(_) | Error::OutOfMemory
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
