//! Client/server partitioning of projections.
//!
//! A selector such as `x => new { A = f(x.Name), B = x.Price }` where `f` has
//! no wire form is split into a server projection of the renderable leaves
//! (`name as Item1,price as Item2`) and a client lambda over the resulting
//! tuple (`t => new { A = f(t.Item1), B = t.Item2 }`).

pub mod partitioner;
pub mod split;
mod state;

pub use partitioner::{ClientEvaluation, PartitionOptions, Partitioner};
pub use split::{ServerProjection, SplitResult};
