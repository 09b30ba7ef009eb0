//! Typed expression trees.
//!
//! Trees are produced by a host front end (already parsed and typed) and are
//! never mutated by the compiler. Rewrites build new trees through
//! [`Expr::try_map_children`] and the parameter substitution helpers.

pub mod ast;
mod build;
mod visit;

pub use ast::{BinaryOperator, Expr, Parameter, UnaryKind};
