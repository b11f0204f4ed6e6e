//! State-driven lexer for `SELECT <col>[, <col>]* FROM <table>` statements.
//!
//! Unlike a plain tokenizer, the token produced for a word depends on where
//! in the statement the lexer currently is. The lexer walks the states
//! `None -> SelectList -> TableSource -> End` and never goes back.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use serde::{Deserialize, Serialize};

use crate::error::{LexicalError, QueryResult};

const SELECT_KEYWORD: &str = "SELECT";
const FROM_KEYWORD: &str = "FROM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    SelectKeyword,
    SelectListColumn,
    FromKeyword,
    TableSource,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::SelectKeyword => "SelectKeyword",
            TokenKind::SelectListColumn => "SelectListColumn",
            TokenKind::FromKeyword => "FromKeyword",
            TokenKind::TableSource => "TableSource",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Position of the lexer within the statement grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum LexerState {
    None,
    SelectList,
    TableSource,
    End,
}

impl LexerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LexerState::None => "None",
            LexerState::SelectList => "SelectList",
            LexerState::TableSource => "TableSource",
            LexerState::End => "End",
        }
    }
}

impl fmt::Display for LexerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Options controlling keyword recognition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerOptions {
    /// Match `SELECT` and `FROM` only in upper case (default: false)
    pub case_sensitive: bool,
}

impl LexerOptions {
    pub fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
        }
    }

    fn is_keyword(&self, word: &Word, keyword: &str) -> bool {
        if word.bracketed {
            return false;
        }
        if self.case_sensitive {
            word.text == keyword
        } else {
            word.text.eq_ignore_ascii_case(keyword)
        }
    }
}

struct Word {
    text: String,
    bracketed: bool,
}

fn is_separator(ch: char) -> bool {
    matches!(ch, '\r' | '\n' | '\t' | ' ' | ',')
}

/// Character cursor over the statement text, owned by one lexer.
struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn skip_separators(&mut self) {
        while self.chars.next_if(|ch| is_separator(*ch)).is_some() {}
    }

    fn is_exhausted(&mut self) -> bool {
        self.skip_separators();
        self.chars.peek().is_none()
    }

    /// Reads the next bare or bracketed word, or `None` at end of input.
    fn read_word(&mut self) -> QueryResult<Option<Word>> {
        self.skip_separators();

        match self.chars.peek() {
            None => Ok(None),
            Some('[') => {
                self.chars.next();
                self.read_bracketed().map(Some)
            }
            Some(_) => {
                let mut text = String::new();
                while let Some(ch) = self.chars.next_if(|ch| !is_separator(*ch)) {
                    text.push(ch);
                }
                Ok(Some(Word {
                    text,
                    bracketed: false,
                }))
            }
        }
    }

    fn read_bracketed(&mut self) -> QueryResult<Word> {
        let mut text = String::new();

        loop {
            match self.chars.next() {
                Some(']') => break,
                Some(ch) => text.push(ch),
                None => return Err(LexicalError::UnterminatedIdentifier(text).into()),
            }
        }

        self.skip_separators();
        Ok(Word {
            text,
            bracketed: true,
        })
    }
}

pub struct Lexer<'a> {
    cursor: Option<Cursor<'a>>,
    options: LexerOptions,
    state: LexerState,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, LexerOptions::default())
    }

    pub fn with_options(input: &'a str, options: LexerOptions) -> Self {
        Self {
            cursor: Some(Cursor::new(input)),
            options,
            state: LexerState::None,
        }
    }

    /// State the lexer moved into after the most recent token.
    pub fn state(&self) -> LexerState {
        self.state
    }

    pub fn options(&self) -> LexerOptions {
        self.options
    }

    /// Releases the text cursor. Any later `next_token` call fails.
    pub fn close(&mut self) {
        self.cursor = None;
    }

    pub fn is_closed(&self) -> bool {
        self.cursor.is_none()
    }

    fn cursor(&mut self) -> QueryResult<&mut Cursor<'a>> {
        self.cursor
            .as_mut()
            .ok_or_else(|| LexicalError::Disposed.into())
    }

    fn transition(&mut self, next: LexerState) {
        if self.state != next {
            tracing::debug!("[LEXER] {} -> {}", self.state, next);
            self.state = next;
        }
    }

    /// Produces the next token, or `None` once the statement is exhausted.
    ///
    /// After the lexer reaches [`LexerState::End`] every call returns
    /// `Ok(None)`.
    pub fn next_token(&mut self) -> QueryResult<Option<Token>> {
        let options = self.options;
        let state = self.state;
        let cursor = self.cursor()?;

        let (token, next) = match state {
            LexerState::None => match cursor.read_word()? {
                Some(word) if options.is_keyword(&word, SELECT_KEYWORD) => (
                    Token::new(TokenKind::SelectKeyword, word.text),
                    LexerState::SelectList,
                ),
                Some(word) => return Err(LexicalError::UnexpectedStart(word.text).into()),
                None => return Err(LexicalError::UnexpectedStart(String::new()).into()),
            },

            LexerState::SelectList => match cursor.read_word()? {
                Some(word) if options.is_keyword(&word, FROM_KEYWORD) => (
                    Token::new(TokenKind::FromKeyword, word.text),
                    LexerState::TableSource,
                ),
                Some(word) => (
                    Token::new(TokenKind::SelectListColumn, word.text),
                    LexerState::SelectList,
                ),
                None => {
                    self.transition(LexerState::End);
                    return Ok(None);
                }
            },

            // Stays in TableSource while more words follow so that a second
            // source is reported to the parser instead of silently dropped.
            LexerState::TableSource => match cursor.read_word()? {
                Some(word) => {
                    let next = if cursor.is_exhausted() {
                        LexerState::End
                    } else {
                        LexerState::TableSource
                    };
                    (Token::new(TokenKind::TableSource, word.text), next)
                }
                None => {
                    self.transition(LexerState::End);
                    return Ok(None);
                }
            },

            LexerState::End => return Ok(None),
        };

        tracing::trace!("[LEXER] {} '{}'", token.kind(), token.text());
        self.transition(next);
        Ok(Some(token))
    }

    /// Drains the remaining tokens together with the state reported after each.
    pub fn tokenize(&mut self) -> QueryResult<Vec<(Token, LexerState)>> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push((token, self.state));
        }

        Ok(tokens)
    }
}
