//! Operand rewrites applied to binary nodes before rendering.

use querywire_expr::{BinaryOperator, Expr, UnaryKind};
use querywire_types::{EnumDef, PrimitiveType, TypeRef, Value};
use std::borrow::Cow;

/// Normalizes both operands of a binary node. Input trees are never
/// modified; rewritten operands are returned owned.
pub(crate) fn normalize_operands<'a>(
    op: BinaryOperator,
    left: &'a Expr,
    right: &'a Expr,
) -> (Cow<'a, Expr>, Cow<'a, Expr>) {
    let left = strip_redundant(left);
    let right = strip_redundant(right);

    if op.is_comparison() {
        if let Some((l, r)) = enum_comparison(left, right) {
            return (Cow::Owned(l), Cow::Owned(r));
        }
        if let Some((r, l)) = enum_comparison(right, left) {
            return (Cow::Owned(l), Cow::Owned(r));
        }
    }
    (Cow::Borrowed(left), Cow::Borrowed(right))
}

/// Removes conversions that do not change the value seen on the wire.
pub(crate) fn strip_redundant(expr: &Expr) -> &Expr {
    let Expr::Unary {
        kind: UnaryKind::Convert,
        operand,
        ty,
    } = expr
    else {
        return expr;
    };

    // (x as object) unwrapped back to x's own type
    if let Expr::Unary {
        kind: UnaryKind::TypeAs | UnaryKind::Convert,
        operand: inner,
        ty: boxed,
    } = &**operand
        && *boxed == TypeRef::object()
        && inner.ty().non_nullable() == ty.non_nullable()
    {
        return strip_redundant(inner);
    }

    // T lifted to Nullable<T>
    if let TypeRef::Nullable(underlying) = ty
        && **underlying == operand.ty()
    {
        return strip_redundant(operand);
    }

    // Nullability toggled and toggled back
    if let Expr::Unary {
        kind: UnaryKind::Convert,
        operand: inner,
        ty: toggled,
    } = &**operand
        && toggled.non_nullable() == ty.non_nullable()
        && inner.ty() == *ty
    {
        return strip_redundant(inner);
    }

    expr
}

/// Matches `Convert(e: Enum, integral) op <int constant>` and the nullable
/// variant, returning the enum operand and an enum-typed constant.
fn enum_comparison(converted: &Expr, constant: &Expr) -> Option<(Expr, Expr)> {
    let Expr::Unary {
        kind: UnaryKind::Convert,
        operand,
        ty: target,
    } = converted
    else {
        return None;
    };
    let operand_ty = operand.ty();

    match (&operand_ty, target) {
        (TypeRef::Enum(def), TypeRef::Primitive(p)) if p.is_integral() => {
            let Expr::Constant {
                value: Value::Int(raw),
                ty,
            } = constant
            else {
                return None;
            };
            if ty != target {
                return None;
            }
            let rewritten = enum_constant(def, *raw, operand_ty.clone());
            Some(((**operand).clone(), rewritten))
        }
        (TypeRef::Nullable(inner), TypeRef::Nullable(target_inner))
            if target_inner
                .as_primitive()
                .is_some_and(PrimitiveType::is_integral) =>
        {
            let def = inner.as_enum()?;
            let rewritten = match constant {
                Expr::Constant {
                    value: Value::Int(raw),
                    ty,
                } if ty.non_nullable() == &**target_inner => {
                    enum_constant(def, *raw, operand_ty.clone())
                }
                Expr::Constant {
                    value: Value::Null, ..
                } => Expr::null(operand_ty.clone()),
                _ => return None,
            };
            Some(((**operand).clone(), rewritten))
        }
        _ => None,
    }
}

fn enum_constant(def: &EnumDef, raw: i64, ty: TypeRef) -> Expr {
    Expr::typed_constant(
        Value::Enum {
            def: def.clone(),
            raw,
        },
        ty,
    )
}
