//! The function mapping registry.
//!
//! Maps a [`MemberSignature`](querywire_types::MemberSignature) to the wire
//! templates used to render a call. The table is built once and only read
//! afterwards.

mod builtins;
pub mod error;
pub mod registry;
pub mod template;

pub use error::TemplateError;
pub use registry::{CallStyle, FunctionRegistry, MappingEntry};
pub use template::render_template;
