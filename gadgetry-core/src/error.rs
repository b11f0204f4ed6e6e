//! Error types for gadgetry-core.
//!
//! Every failure is fail-fast: a compile either yields a complete
//! [`CompiledQuery`](crate::CompiledQuery) or one of these errors.

use thiserror::Error;

use crate::lexer::{LexerState, TokenKind};

/// Broad category of a [`QueryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Semantic,
}

/// Query compilation error
///
/// The wrapped lexical and semantic errors are part of the message and are
/// not reported again as a `source`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Lexical error: {0}")]
    Lexical(LexicalError),

    #[error("Syntax error: unexpected {kind} token '{text}' in state {state}")]
    Syntax {
        state: LexerState,
        kind: TokenKind,
        text: String,
    },

    #[error("Semantic error: {0}")]
    Semantic(SemanticError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    #[error("statement must start with SELECT, found '{0}'")]
    UnexpectedStart(String),

    #[error("unterminated bracketed identifier '[{0}'")]
    UnterminatedIdentifier(String),

    #[error("lexer has been closed")]
    Disposed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("select list is empty")]
    EmptySelectList,

    #[error("missing table source after FROM")]
    MissingTableSource,

    #[error("multiple table sources are not supported: {}", .0.join(", "))]
    MultipleTableSources(Vec<String>),

    #[error("unknown field '{field}' on '{entity}'")]
    UnknownField { field: String, entity: String },

    #[error("unknown table source '{0}'")]
    UnknownTableSource(String),

    #[error("table source '{0}' is not a collection")]
    NotACollection(String),
}

impl From<LexicalError> for QueryError {
    fn from(err: LexicalError) -> Self {
        QueryError::Lexical(err)
    }
}

impl From<SemanticError> for QueryError {
    fn from(err: SemanticError) -> Self {
        QueryError::Semantic(err)
    }
}

impl QueryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QueryError::Lexical(_) => ErrorCategory::Lexical,
            QueryError::Syntax { .. } => ErrorCategory::Syntax,
            QueryError::Semantic(_) => ErrorCategory::Semantic,
        }
    }

    /// The field or table name the error refers to, if any.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            QueryError::Semantic(SemanticError::UnknownField { field, .. }) => Some(field),
            QueryError::Semantic(SemanticError::UnknownTableSource(name))
            | QueryError::Semantic(SemanticError::NotACollection(name)) => Some(name),
            QueryError::Lexical(LexicalError::UnexpectedStart(word)) => Some(word),
            _ => None,
        }
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

impl serde::Serialize for QueryError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
