//! Compiles typed expression trees into the wire query language.
//!
//! The [`Compiler`] renders predicates (`$filter`) and projections
//! (`$select`) against a [`querywire_functions::FunctionRegistry`]. It also
//! exposes [`Compiler::classify`], the per-node support check used when a
//! projection is split between server and client.

pub mod compiler;
pub mod error;
pub mod literal;
mod normalize;
mod projection;

pub use compiler::{Compiled, Compiler, CompilerOptions, MemberNaming, root_lambda, strip_outer_parens};
pub use error::CompileError;
pub use literal::encode_value;
