use itertools::Itertools;
use querywire_functions::TemplateError;
use querywire_types::MemberSignature;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Unsupported {kind} node: {detail}")]
    UnsupportedNode { kind: String, detail: String },

    #[error("No function mapping for member '{signature}'")]
    UnmappedMember { signature: MemberSignature },

    #[error("Malformed literal in {context}: {detail}")]
    MalformedLiteral { context: String, detail: String },

    #[error("Mapping template error: {0}")]
    Template(#[from] TemplateError),

    #[error("{} unsupported sub-expressions: {}", .0.len(), .0.iter().join("; "))]
    Aggregate(Vec<CompileError>),
}

impl CompileError {
    pub fn unsupported(kind: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::UnsupportedNode {
            kind: kind.into(),
            detail: detail.into(),
        }
    }

    pub fn unmapped(signature: MemberSignature) -> Self {
        Self::UnmappedMember { signature }
    }

    pub fn malformed(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedLiteral {
            context: context.into(),
            detail: detail.into(),
        }
    }

    /// Folds several failures into one. A single cause is returned as is.
    pub fn aggregate(mut causes: Vec<CompileError>) -> Self {
        if causes.len() == 1 {
            causes.remove(0)
        } else {
            Self::Aggregate(causes)
        }
    }

    /// Number of independent failures this error reports.
    pub fn cause_count(&self) -> usize {
        match self {
            Self::Aggregate(causes) => causes.len(),
            _ => 1,
        }
    }

    pub fn causes(&self) -> &[CompileError] {
        match self {
            Self::Aggregate(causes) => causes,
            other => std::slice::from_ref(other),
        }
    }
}
