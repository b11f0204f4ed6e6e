//! Runs one statement against the sample context and renders the outcome.

use gadgetry_core::QueryCompiler;

use crate::config::Config;
use crate::error::AppResult;
use crate::output;
use crate::sample::SampleContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Compile, execute and print rows as JSON
    #[default]
    Execute,
    /// Print the parsed query as JSON
    ParseOnly,
    /// Print the token stream with lexer states
    Tokens,
}

pub fn load_context(config: &Config) -> AppResult<SampleContext> {
    match &config.data {
        Some(path) => SampleContext::from_json_file(path),
        None => Ok(SampleContext::demo()),
    }
}

pub fn run(statement: &str, config: &Config, mode: Mode) -> AppResult<String> {
    let compiler = QueryCompiler::with_options(config.lexer);

    match mode {
        Mode::Tokens => output::render_tokens(statement, config.lexer),
        Mode::ParseOnly => {
            let query = compiler.parser().parse(statement)?;
            output::render_query(&query, config.output.pretty)
        }
        Mode::Execute => {
            let query = compiler.compile::<SampleContext>(statement)?;
            let context = load_context(config)?;
            tracing::info!(
                "Executing '{}' over {} ({} field(s))",
                statement,
                query.table_source(),
                query.result_type().fields().len()
            );
            let rows = query.execute(&context)?;
            output::render_rows(rows, config.output.pretty)
        }
    }
}
