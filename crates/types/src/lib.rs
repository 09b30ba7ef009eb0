//! Foundation types for querywire.
//!
//! Every expression node carries a static [`TypeRef`]; constants carry a
//! [`Value`]; members and methods are identified by a [`MemberSignature`]
//! that does not depend on any runtime metadata.

pub mod signature;
pub mod ty;
pub mod value;

pub use signature::{MemberRef, MemberSignature, MethodRef};
pub use ty::{EntityDef, EnumDef, Field, PrimitiveType, TypeRef};
pub use value::{DateTimeKind, DateTimeValue, Value};

// Literal payload types, re-exported so callers build constants without
// pinning their own versions.
pub use chrono::NaiveDateTime;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
