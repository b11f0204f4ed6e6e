//! Gadgetry Core - compiles `SELECT col[, col] FROM table` statements into
//! reusable projections over typed data contexts.
//!
//! # Main Components
//!
//! - **Lexer**: State-driven scanner producing typed tokens
//! - **Parser**: Validates the token stream into a `ParsedQuery`
//! - **Schema**: Synthesizes the result record type from the selected columns
//! - **Compiler**: Binds the table source on a `DataContext` type and builds the projection
//!
//! # Example
//!
//! ```rust
//! use gadgetry_core::{compile, elements, entity, DataContext, Elements, Member};
//! use serde_json::json;
//!
//! struct Customer {
//!     name: String,
//!     age: u32,
//! }
//!
//! entity!(Customer { "Name" => name, "Age" => age });
//!
//! struct Context {
//!     customers: Vec<Customer>,
//! }
//!
//! impl DataContext for Context {
//!     fn members() -> Vec<Member> {
//!         vec![Member::collection::<Customer>("Customers")]
//!     }
//!
//!     fn scan(&self, member: &str) -> Option<Elements<'_>> {
//!         (member == "Customers").then(|| elements(&self.customers))
//!     }
//! }
//!
//! let query = compile::<Context>("SELECT Name FROM Customers").unwrap();
//! let context = Context {
//!     customers: vec![Customer { name: "Joe".into(), age: 28 }],
//! };
//!
//! let rows = query.execute_all(&context).unwrap();
//! assert_eq!(rows[0].clone().into_value(), json!({"Name": "Joe"}));
//! ```

pub mod compiler;
pub mod context;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod schema;

// Re-export main types for convenience
pub use compiler::{compile, CompiledQuery, QueryCompiler, Rows};
pub use context::{
    elements, DataContext, Elements, Entity, EntityType, FieldDef, FieldType, FieldValue, Member,
    MemberShape,
};
pub use error::{ErrorCategory, LexicalError, QueryError, QueryResult, SemanticError};
pub use lexer::{Lexer, LexerOptions, LexerState, Token, TokenKind};
pub use parser::{parse, ParsedQuery, Parser, TokenSource};
pub use schema::{synthesize, Record, RecordType};
pub use serde_json::Value;
