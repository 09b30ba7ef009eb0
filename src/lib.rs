//! Compiles typed expression trees into a compact, URL-safe query language.
//!
//! ```ignore
//! let wire = QueryWireBuilder::new().build();
//! let filter = wire.filter(&predicate)?; // "unitPrice gt 5.0"
//! let split = wire.partition(&selector)?; // server "name as Item1", client t => ..
//! ```

pub mod builder;
pub mod error;
pub mod uri;
pub mod wire;

pub use builder::QueryWireBuilder;
pub use error::QueryWireError;
pub use uri::{QueryOptions, encode_query_value};
pub use wire::QueryWire;

pub use querywire_compiler::{
    CompileError, Compiled, Compiler, CompilerOptions, MemberNaming, encode_value,
};
pub use querywire_expr::{BinaryOperator, Expr, Parameter, UnaryKind};
pub use querywire_functions::{CallStyle, FunctionRegistry, MappingEntry};
pub use querywire_partition::{
    ClientEvaluation, PartitionOptions, Partitioner, ServerProjection, SplitResult,
};
pub use querywire_types as types;
