//! Parser for SELECT projections.
//!
//! Drives the [`Lexer`] and groups its tokens by the state the lexer
//! reports after producing each one, then checks that the statement names
//! at least one column and exactly one table source.

use serde::Serialize;

use crate::error::{QueryError, QueryResult, SemanticError};
use crate::lexer::{Lexer, LexerOptions, LexerState, Token, TokenKind};


/// Validated result of parsing a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    columns: Vec<String>,
    table_source: String,
}

impl ParsedQuery {
    /// Builds a query from already-separated parts.
    ///
    /// Fails when `columns` is empty.
    pub fn new(columns: Vec<String>, table_source: impl Into<String>) -> QueryResult<Self> {
        if columns.is_empty() {
            return Err(SemanticError::EmptySelectList.into());
        }
        Ok(Self {
            columns,
            table_source: table_source.into(),
        })
    }

    /// Selected column names in statement order, duplicates included.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn table_source(&self) -> &str {
        &self.table_source
    }
}

/// Anything that yields tokens together with a reported lexer state.
pub trait TokenSource {
    fn next_token(&mut self) -> QueryResult<Option<Token>>;

    /// State reported after the most recently produced token.
    fn state(&self) -> LexerState;
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> QueryResult<Option<Token>> {
        Lexer::next_token(self)
    }

    fn state(&self) -> LexerState {
        Lexer::state(self)
    }
}

#[derive(Debug, Default)]
struct TokenGroups {
    columns: Vec<String>,
    table_sources: Vec<String>,
}

impl TokenGroups {
    fn collect(source: &mut impl TokenSource) -> QueryResult<Self> {
        let mut groups = Self::default();

        while let Some(token) = source.next_token()? {
            match (source.state(), token.kind()) {
                (LexerState::SelectList, TokenKind::SelectKeyword) => {}
                (LexerState::SelectList, TokenKind::SelectListColumn) => {
                    groups.columns.push(token.into_text());
                }
                (LexerState::TableSource, TokenKind::FromKeyword) => {}
                (LexerState::TableSource | LexerState::End, TokenKind::TableSource) => {
                    groups.table_sources.push(token.into_text());
                }
                (state, kind) => {
                    return Err(QueryError::Syntax {
                        state,
                        kind,
                        text: token.into_text(),
                    });
                }
            }
        }

        Ok(groups)
    }

    fn into_query(self) -> QueryResult<ParsedQuery> {
        if self.columns.is_empty() {
            return Err(SemanticError::EmptySelectList.into());
        }

        let mut table_sources = self.table_sources;
        match table_sources.len() {
            0 => Err(SemanticError::MissingTableSource.into()),
            1 => ParsedQuery::new(self.columns, table_sources.remove(0)),
            _ => Err(SemanticError::MultipleTableSources(table_sources).into()),
        }
    }
}

/// SELECT statement parser
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: LexerOptions,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LexerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> LexerOptions {
        self.options
    }

    pub fn parse(&self, input: &str) -> QueryResult<ParsedQuery> {
        let mut lexer = Lexer::with_options(input, self.options);
        let groups = TokenGroups::collect(&mut lexer);
        lexer.close();

        let query = groups?.into_query()?;
        tracing::debug!(
            "[PARSER] {} column(s) from '{}'",
            query.columns.len(),
            query.table_source
        );
        Ok(query)
    }

    /// Parses from an arbitrary token source instead of statement text.
    pub fn parse_tokens(&self, source: &mut impl TokenSource) -> QueryResult<ParsedQuery> {
        TokenGroups::collect(source)?.into_query()
    }
}

/// Parses a statement with case-insensitive keywords.
pub fn parse(input: &str) -> QueryResult<ParsedQuery> {
    Parser::new().parse(input)
}
