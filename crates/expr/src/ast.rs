//! Defines the expression tree for typed lambda bodies.

use querywire_types::{MemberRef, MethodRef, TypeRef, Value};
use serde::{Deserialize, Serialize};

/// A binary operator used in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    // Logical
    And,
    Or,
    // Equality
    Equal,
    NotEqual,
    // Relational
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    // No wire token
    Coalesce,
    ExclusiveOr,
    Power,
}

impl BinaryOperator {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOperator::Equal
                | BinaryOperator::NotEqual
                | BinaryOperator::GreaterThan
                | BinaryOperator::GreaterThanOrEqual
                | BinaryOperator::LessThan
                | BinaryOperator::LessThanOrEqual
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }
}

/// The kind of a unary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryKind {
    /// Logical negation.
    Not,
    /// Arithmetic negation.
    Negate,
    /// Reference conversion that yields null on mismatch.
    TypeAs,
    /// Numeric, enum or nullable conversion.
    Convert,
}

/// A lambda parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A typed expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Binary {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
        ty: TypeRef,
    },
    Unary {
        kind: UnaryKind,
        operand: Box<Expr>,
        ty: TypeRef,
    },
    /// Property or field access. A missing target is a static member.
    MemberAccess {
        target: Option<Box<Expr>>,
        member: MemberRef,
    },
    Constant {
        value: Value,
        ty: TypeRef,
    },
    /// Method call. A missing target is a static (or extension) call whose
    /// receiver, if any, is the first argument.
    MethodCall {
        target: Option<Box<Expr>>,
        method: MethodRef,
        args: Vec<Expr>,
    },
    TypeTest {
        target: Box<Expr>,
        tested: TypeRef,
    },
    Lambda {
        params: Vec<Parameter>,
        body: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
        ty: TypeRef,
    },
    Parameter(Parameter),
    ArrayLiteral {
        elements: Vec<Expr>,
        ty: TypeRef,
    },
    /// Object construction. `members` names each argument; `None` means a
    /// positional shape whose members are `Item1..ItemN`.
    NewValue {
        members: Option<Vec<String>>,
        args: Vec<Expr>,
        ty: TypeRef,
    },
    /// Collection initialization; each initializer is one `Add(..)` call.
    ListInit {
        initializers: Vec<Vec<Expr>>,
        ty: TypeRef,
    },
}

impl Expr {
    /// The static result type of the node.
    pub fn ty(&self) -> TypeRef {
        match self {
            Expr::Binary { ty, .. }
            | Expr::Unary { ty, .. }
            | Expr::Constant { ty, .. }
            | Expr::Conditional { ty, .. }
            | Expr::ArrayLiteral { ty, .. }
            | Expr::NewValue { ty, .. }
            | Expr::ListInit { ty, .. } => ty.clone(),
            Expr::MemberAccess { member, .. } => member.ty.clone(),
            Expr::MethodCall { method, .. } => method.return_type.clone(),
            Expr::TypeTest { .. } => TypeRef::boolean(),
            Expr::Lambda { params, body } => TypeRef::Function(
                params.iter().map(|p| p.ty.clone()).collect(),
                Box::new(body.ty()),
            ),
            Expr::Parameter(p) => p.ty.clone(),
        }
    }

    /// Short name of the node kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Binary { .. } => "Binary",
            Expr::Unary { .. } => "Unary",
            Expr::MemberAccess { .. } => "MemberAccess",
            Expr::Constant { .. } => "Constant",
            Expr::MethodCall { .. } => "MethodCall",
            Expr::TypeTest { .. } => "TypeTest",
            Expr::Lambda { .. } => "Lambda",
            Expr::Conditional { .. } => "Conditional",
            Expr::Parameter(_) => "Parameter",
            Expr::ArrayLiteral { .. } => "ArrayLiteral",
            Expr::NewValue { .. } => "NewValue",
            Expr::ListInit { .. } => "ListInit",
        }
    }

    pub fn is_parameter_named(&self, name: &str) -> bool {
        matches!(self, Expr::Parameter(p) if p.name == name)
    }

    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Expr::Constant { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_null_constant(&self) -> bool {
        matches!(self, Expr::Constant { value: Value::Null, .. })
    }

    /// The parameter list and body when this is a lambda.
    pub fn as_lambda(&self) -> Option<(&[Parameter], &Expr)> {
        match self {
            Expr::Lambda { params, body } => Some((params, body)),
            _ => None,
        }
    }
}
