//! Binds parsed queries to a data-context type and builds reusable projections.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::context::{DataContext, Elements, Entity, MemberShape};
use crate::error::{QueryError, QueryResult, SemanticError};
use crate::lexer::LexerOptions;
use crate::parser::{ParsedQuery, Parser};
use crate::schema::{self, Record, RecordType};

/// Per-element projection from a source entity to a synthesized record.
type Projection = Arc<dyn Fn(&dyn Entity) -> QueryResult<Record> + Send + Sync>;

fn build_projection(result_type: Arc<RecordType>) -> Projection {
    Arc::new(move |element: &dyn Entity| -> QueryResult<Record> {
        let values = result_type
            .fields()
            .iter()
            .map(|field| {
                element.field(&field.name).ok_or_else(|| {
                    QueryError::from(SemanticError::UnknownField {
                        field: field.name.clone(),
                        entity: result_type.source().to_string(),
                    })
                })
            })
            .collect::<QueryResult<Vec<_>>>()?;

        Ok(Record::new(Arc::clone(&result_type), values))
    })
}

/// A compiled query, reusable against any instance of `C`.
///
/// Holds no context instance; each [`execute`](Self::execute) call reads the
/// context's current contents.
pub struct CompiledQuery<C> {
    query: ParsedQuery,
    result_type: Arc<RecordType>,
    projection: Projection,
    _context: PhantomData<fn(&C)>,
}

impl<C> CompiledQuery<C> {
    pub fn query(&self) -> &ParsedQuery {
        &self.query
    }

    pub fn table_source(&self) -> &str {
        self.query.table_source()
    }

    pub fn columns(&self) -> &[String] {
        self.query.columns()
    }

    pub fn result_type(&self) -> &Arc<RecordType> {
        &self.result_type
    }
}

impl<C: DataContext> CompiledQuery<C> {
    /// Returns a lazy sequence of projected rows over `context`.
    pub fn execute<'c>(&self, context: &'c C) -> QueryResult<Rows<'c>> {
        let elements = context.scan(self.table_source()).ok_or_else(|| {
            QueryError::from(SemanticError::UnknownTableSource(
                self.table_source().to_string(),
            ))
        })?;

        Ok(Rows {
            elements,
            projection: Arc::clone(&self.projection),
        })
    }

    /// Executes and collects every row, stopping at the first failure.
    pub fn execute_all(&self, context: &C) -> QueryResult<Vec<Record>> {
        self.execute(context)?.collect()
    }
}

impl<C> Clone for CompiledQuery<C> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            result_type: Arc::clone(&self.result_type),
            projection: Arc::clone(&self.projection),
            _context: PhantomData,
        }
    }
}

impl<C> fmt::Debug for CompiledQuery<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledQuery")
            .field("query", &self.query)
            .field("result_type", &self.result_type)
            .finish_non_exhaustive()
    }
}

/// Lazy iterator of projected rows.
pub struct Rows<'c> {
    elements: Elements<'c>,
    projection: Projection,
}

impl Iterator for Rows<'_> {
    type Item = QueryResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.elements.next()?;
        let row = (self.projection)(element);
        tracing::trace!("[COMPILER] projected row: {:?}", row);
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

/// Compiles SELECT statements into [`CompiledQuery`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryCompiler {
    parser: Parser,
}

impl QueryCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LexerOptions) -> Self {
        Self {
            parser: Parser::with_options(options),
        }
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn compile<C: DataContext>(&self, input: &str) -> QueryResult<CompiledQuery<C>> {
        let query = self.parser.parse(input)?;
        self.compile_parsed(&query)
    }

    pub fn compile_parsed<C: DataContext>(
        &self,
        query: &ParsedQuery,
    ) -> QueryResult<CompiledQuery<C>> {
        let name = query.table_source();
        let member = C::members()
            .into_iter()
            .find(|member| member.name == name)
            .ok_or_else(|| SemanticError::UnknownTableSource(name.to_string()))?;

        let entity = match member.shape {
            MemberShape::Collection(entity) => entity,
            MemberShape::Scalar(_) => {
                return Err(SemanticError::NotACollection(name.to_string()).into());
            }
        };

        let result_type = Arc::new(schema::synthesize(query.columns(), &entity)?);
        tracing::debug!(
            "[COMPILER] {} -> record type #{} ({})",
            name,
            result_type.id(),
            query.columns().join(", ")
        );

        Ok(CompiledQuery {
            query: query.clone(),
            projection: build_projection(Arc::clone(&result_type)),
            result_type,
            _context: PhantomData,
        })
    }
}

/// Compiles a statement against `C` with case-insensitive keywords.
pub fn compile<C: DataContext>(input: &str) -> QueryResult<CompiledQuery<C>> {
    QueryCompiler::new().compile(input)
}
