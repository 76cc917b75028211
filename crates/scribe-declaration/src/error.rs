//! Error types for declaration text compilation.

use thiserror::Error;

/// Result type alias using [`DeclarationError`].
pub type DeclarationResult<T> = Result<T, DeclarationError>;

/// Errors raised while compiling a type literal.
///
/// The miner absorbs these: a fragment that fails to compile is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// The text is not a type the compiler understands.
    #[error("syntax error at byte {position}: {message}")]
    Syntax {
        /// Byte offset into the compiled source.
        position: usize,
        /// What was expected or found.
        message: String,
    },

    /// The text ended in the middle of a type.
    #[error("unexpected end of declaration text")]
    UnexpectedEnd,
}

impl DeclarationError {
    /// Create a syntax error.
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }
}
