//! JSON and text rendering of query results.

use gadgetry_core::{Lexer, LexerOptions, ParsedQuery, QueryResult, Record};

use crate::error::AppResult;

/// Renders projected rows as a JSON array, keys in column order.
pub fn render_rows<I>(rows: I, pretty: bool) -> AppResult<String>
where
    I: IntoIterator<Item = QueryResult<Record>>,
{
    let rows = rows.into_iter().collect::<QueryResult<Vec<_>>>()?;
    to_json(&rows, pretty)
}

pub fn render_query(query: &ParsedQuery, pretty: bool) -> AppResult<String> {
    to_json(query, pretty)
}

/// One line per token: kind, text and the state reported after it.
pub fn render_tokens(input: &str, options: LexerOptions) -> AppResult<String> {
    let mut lexer = Lexer::with_options(input, options);
    let tokens = lexer.tokenize();
    lexer.close();

    let lines: Vec<String> = tokens?
        .into_iter()
        .map(|(token, state)| {
            let text = format!("'{}'", token.text());
            format!("{:<16} {:<20} -> {}", token.kind(), text, state)
        })
        .collect();
    Ok(lines.join("\n"))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> AppResult<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
