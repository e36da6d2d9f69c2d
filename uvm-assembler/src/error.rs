//! Assembler errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("Syntax error at line {line}, column {column}: {message}")]
    SyntaxError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unknown instruction at line {line}: {mnemonic}")]
    UnknownInstruction { line: usize, mnemonic: String },

    #[error("Arity error at line {line}: {mnemonic} expects {expected} operands, got {found}")]
    ArityError {
        line: usize,
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid register at line {line}: R{index} (valid range: R0-R255)")]
    InvalidRegister { line: usize, index: u64 },

    #[error("Operand out of range at line {line}: {value} does not fit {width}-byte field `{field}`")]
    OperandOutOfRange {
        line: usize,
        field: &'static str,
        value: u64,
        width: usize,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Log serialization error: {0}")]
    LogError(#[from] serde_json::Error),
}

impl AssemblerError {
    /// 1-based source line the error refers to
    pub fn line(&self) -> Option<usize> {
        match self {
            AssemblerError::SyntaxError { line, .. }
            | AssemblerError::UnknownInstruction { line, .. }
            | AssemblerError::ArityError { line, .. }
            | AssemblerError::InvalidRegister { line, .. }
            | AssemblerError::OperandOutOfRange { line, .. } => Some(*line),
            AssemblerError::IoError(_) | AssemblerError::LogError(_) => None,
        }
    }

    /// Attach a source line to an error raised without one
    pub(crate) fn at_line(mut self, source_line: usize) -> Self {
        match &mut self {
            AssemblerError::SyntaxError { line, .. }
            | AssemblerError::UnknownInstruction { line, .. }
            | AssemblerError::ArityError { line, .. }
            | AssemblerError::InvalidRegister { line, .. }
            | AssemblerError::OperandOutOfRange { line, .. } => *line = source_line,
            AssemblerError::IoError(_) | AssemblerError::LogError(_) => {}
        }
        self
    }
}

pub type Result<T> = std::result::Result<T, AssemblerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssemblerError::ArityError {
            line: 3,
            mnemonic: "EQUAL".to_string(),
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Arity error at line 3: EQUAL expects 3 operands, got 2"
        );
    }

    #[test]
    fn test_at_line() {
        let err = AssemblerError::UnknownInstruction {
            line: 0,
            mnemonic: "FOO".to_string(),
        }
        .at_line(7);
        assert_eq!(err.line(), Some(7));
    }
}
