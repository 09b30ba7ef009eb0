//! A small product catalogue used across the integration tests.

use querywire::types::{EntityDef, EnumDef, MethodRef, TypeRef};
use querywire::{Expr, Parameter};

pub fn color() -> EnumDef {
    EnumDef::new("Color").member("Red", 0).member("Blue", 1)
}

pub fn order() -> TypeRef {
    TypeRef::Entity(
        EntityDef::new("Order")
            .field("Total", TypeRef::double())
            .field("Placed", TypeRef::date_time()),
    )
}

pub fn product() -> TypeRef {
    TypeRef::Entity(
        EntityDef::new("Product")
            .field("Name", TypeRef::string())
            .field("UnitPrice", TypeRef::double())
            .field("Discount", TypeRef::decimal())
            .field("Stock", TypeRef::int32())
            .field("Reorder", TypeRef::nullable(TypeRef::int32()))
            .field("Color", TypeRef::Enum(color()))
            .field("Finish", TypeRef::nullable(TypeRef::Enum(color())))
            .field("Released", TypeRef::date_time())
            .field("Tags", TypeRef::sequence(TypeRef::string()))
            .field("Orders", TypeRef::sequence(order()))
            .field(
                "Attributes",
                TypeRef::dictionary(TypeRef::string(), TypeRef::string()),
            ),
    )
}

/// The root parameter `x`.
pub fn x() -> Expr {
    Expr::parameter("x", product())
}

/// `x.<name>`; panics on an unknown field.
pub fn field(name: &str) -> Expr {
    x().field(name)
        .unwrap_or_else(|| panic!("Product has no field {}", name))
}

/// `x => body`
pub fn lambda(body: Expr) -> Expr {
    Expr::lambda(vec![Parameter::new("x", product())], body)
}

/// `o => body` over an order.
pub fn order_lambda(body: Expr) -> Expr {
    Expr::lambda(vec![Parameter::new("o", order())], body)
}

/// `o.<name>`
pub fn order_field(name: &str) -> Expr {
    Expr::parameter("o", order())
        .field(name)
        .unwrap_or_else(|| panic!("Order has no field {}", name))
}

pub fn method(declaring: &str, name: &str, params: Vec<TypeRef>, returns: TypeRef) -> MethodRef {
    MethodRef::new(declaring, name, params, returns)
}

/// `target.<name>()` with no wire mapping.
pub fn unmapped_call(target: Expr, name: &str) -> Expr {
    let declaring = target.ty().descriptor();
    target.call(method(&declaring, name, vec![], TypeRef::string()), vec![])
}

/// `Enumerable.<name>(x.Orders, o => body)`
pub fn orders_with(name: &str, body: Expr, returns: TypeRef) -> Expr {
    let lambda_ty = TypeRef::Function(vec![order()], Box::new(body.ty()));
    Expr::static_call(
        method(
            "Enumerable",
            name,
            vec![TypeRef::sequence(order()), lambda_ty],
            returns,
        ),
        vec![field("Orders"), order_lambda(body)],
    )
}
