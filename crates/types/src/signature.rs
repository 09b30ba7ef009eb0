//! Member and method descriptors.
//!
//! The [`MemberSignature`] is the stable key of the function mapping table:
//! declaring type descriptor, member name and (for methods) the parameter
//! descriptor list.

use crate::ty::TypeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberSignature {
    pub declaring: String,
    pub name: String,
    /// `None` for properties and fields.
    pub params: Option<Vec<String>>,
}

impl MemberSignature {
    pub fn property(declaring: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            declaring: declaring.into(),
            name: name.into(),
            params: None,
        }
    }

    pub fn method<I, S>(declaring: impl Into<String>, name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            declaring: declaring.into(),
            name: name.into(),
            params: Some(params.into_iter().map(Into::into).collect()),
        }
    }

    /// Number of template arguments a mapping for this signature receives.
    /// Instance members get their target prepended, so callers pass that in.
    pub fn arity(&self, has_target: bool) -> usize {
        self.params.as_ref().map_or(0, Vec::len) + usize::from(has_target)
    }
}

impl fmt::Display for MemberSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring, self.name)?;
        if let Some(params) = &self.params {
            write!(f, "({})", params.join(", "))?;
        }
        Ok(())
    }
}

/// A property or field reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRef {
    /// Descriptor of the declaring type.
    pub declaring: String,
    pub name: String,
    /// Result type of the access.
    pub ty: TypeRef,
}

impl MemberRef {
    pub fn new(declaring: impl Into<String>, name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            declaring: declaring.into(),
            name: name.into(),
            ty,
        }
    }

    pub fn signature(&self) -> MemberSignature {
        MemberSignature::property(self.declaring.clone(), self.name.clone())
    }
}

/// A method reference. `params` excludes the receiver of instance methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodRef {
    pub declaring: String,
    pub name: String,
    pub params: Vec<TypeRef>,
    pub return_type: TypeRef,
}

impl MethodRef {
    pub fn new(
        declaring: impl Into<String>,
        name: impl Into<String>,
        params: Vec<TypeRef>,
        return_type: TypeRef,
    ) -> Self {
        Self {
            declaring: declaring.into(),
            name: name.into(),
            params,
            return_type,
        }
    }

    pub fn signature(&self) -> MemberSignature {
        MemberSignature::method(
            self.declaring.clone(),
            self.name.clone(),
            self.params.iter().map(TypeRef::descriptor),
        )
    }

    /// True when the method is declared on, or takes, a wrapped query
    /// sequence.
    pub fn operates_on_query(&self) -> bool {
        self.declaring == "Queryable" || self.params.iter().any(|p| matches!(p, TypeRef::Query(_)))
    }

    /// The in-memory sequence equivalent of a query-sequence method: same
    /// name, `Queryable` becomes `Enumerable`, `Query<T>` parameters become
    /// `Sequence<T>`.
    pub fn to_sequence_equivalent(&self) -> MethodRef {
        let unwrap = |ty: &TypeRef| match ty {
            TypeRef::Query(element) => TypeRef::Sequence(element.clone()),
            other => other.clone(),
        };
        MethodRef {
            declaring: if self.declaring == "Queryable" {
                "Enumerable".to_string()
            } else {
                self.declaring.clone()
            },
            name: self.name.clone(),
            params: self.params.iter().map(unwrap).collect(),
            return_type: unwrap(&self.return_type),
        }
    }
}
