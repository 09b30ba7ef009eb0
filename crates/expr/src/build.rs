//! Constructors mirroring the node shapes a host front end emits.

use crate::ast::{BinaryOperator, Expr, Parameter, UnaryKind};
use querywire_types::{MemberRef, MethodRef, TypeRef, Value};

impl Expr {
    pub fn parameter(name: impl Into<String>, ty: TypeRef) -> Self {
        Expr::Parameter(Parameter::new(name, ty))
    }

    /// A constant typed with the value's natural type.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        let ty = value.natural_type();
        Expr::Constant { value, ty }
    }

    pub fn typed_constant(value: impl Into<Value>, ty: TypeRef) -> Self {
        Expr::Constant {
            value: value.into(),
            ty,
        }
    }

    pub fn null(ty: TypeRef) -> Self {
        Expr::Constant {
            value: Value::Null,
            ty,
        }
    }

    /// A binary node; comparisons and logical operators yield `Boolean`,
    /// arithmetic keeps the left operand's type.
    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        let ty = if op.is_comparison() || op.is_logical() {
            TypeRef::boolean()
        } else {
            left.ty()
        };
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty,
        }
    }

    pub fn eq(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOperator::Equal, left, right)
    }

    pub fn ne(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOperator::NotEqual, left, right)
    }

    pub fn gt(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOperator::GreaterThan, left, right)
    }

    pub fn lt(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOperator::LessThan, left, right)
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOperator::And, left, right)
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOperator::Or, left, right)
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Unary {
            kind: UnaryKind::Not,
            operand: Box::new(operand),
            ty: TypeRef::boolean(),
        }
    }

    pub fn convert(operand: Expr, ty: TypeRef) -> Self {
        Expr::Unary {
            kind: UnaryKind::Convert,
            operand: Box::new(operand),
            ty,
        }
    }

    pub fn type_as(operand: Expr, ty: TypeRef) -> Self {
        Expr::Unary {
            kind: UnaryKind::TypeAs,
            operand: Box::new(operand),
            ty,
        }
    }

    /// Instance property access; the declaring type is taken from the target.
    pub fn property(self, name: impl Into<String>, ty: TypeRef) -> Self {
        let declaring = self.ty().descriptor();
        Expr::MemberAccess {
            target: Some(Box::new(self)),
            member: MemberRef::new(declaring, name, ty),
        }
    }

    /// Entity field access with the type looked up from the target's shape.
    /// Returns `None` when the target has no such member.
    pub fn field(self, name: &str) -> Option<Self> {
        let ty = self.ty().member_type(name)?;
        Some(self.property(name, ty))
    }

    pub fn static_property(
        declaring: impl Into<String>,
        name: impl Into<String>,
        ty: TypeRef,
    ) -> Self {
        Expr::MemberAccess {
            target: None,
            member: MemberRef::new(declaring, name, ty),
        }
    }

    pub fn call(self, method: MethodRef, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            target: Some(Box::new(self)),
            method,
            args,
        }
    }

    pub fn static_call(method: MethodRef, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            target: None,
            method,
            args,
        }
    }

    pub fn type_test(target: Expr, tested: TypeRef) -> Self {
        Expr::TypeTest {
            target: Box::new(target),
            tested,
        }
    }

    pub fn lambda(params: Vec<Parameter>, body: Expr) -> Self {
        Expr::Lambda {
            params,
            body: Box::new(body),
        }
    }

    pub fn conditional(test: Expr, then: Expr, otherwise: Expr) -> Self {
        let ty = then.ty();
        Expr::Conditional {
            test: Box::new(test),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
            ty,
        }
    }

    pub fn array(elements: Vec<Expr>, element_ty: TypeRef) -> Self {
        Expr::ArrayLiteral {
            elements,
            ty: TypeRef::sequence(element_ty),
        }
    }

    /// Positional construction; the result is a tuple of the argument types.
    pub fn tuple(args: Vec<Expr>) -> Self {
        let ty = TypeRef::Tuple(args.iter().map(Expr::ty).collect());
        Expr::NewValue {
            members: None,
            args,
            ty,
        }
    }

    /// Construction with named members, as produced for anonymous records.
    pub fn record<S: Into<String>>(fields: Vec<(S, Expr)>) -> Self {
        let mut members = Vec::with_capacity(fields.len());
        let mut args = Vec::with_capacity(fields.len());
        let mut shape = querywire_types::EntityDef::new("Anonymous");
        for (name, expr) in fields {
            let name = name.into();
            shape = shape.field(name.clone(), expr.ty());
            members.push(name);
            args.push(expr);
        }
        Expr::NewValue {
            members: Some(members),
            args,
            ty: TypeRef::Entity(shape),
        }
    }

    pub fn list_init(ty: TypeRef, initializers: Vec<Vec<Expr>>) -> Self {
        Expr::ListInit { initializers, ty }
    }
}
