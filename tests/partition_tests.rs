mod common;

use common::fixtures::*;
use common::{TestResult, init_logging, wire};
use querywire::types::{MemberSignature, TypeRef};
use querywire::{ClientEvaluation, CompileError, Expr, Parameter, QueryWireBuilder};

#[test]
fn test_repeated_leaf_uses_one_slot() -> TestResult {
    let body = Expr::record(vec![("A", field("Name")), ("B", field("Name"))]);
    let split = wire().partition(&lambda(body))?;
    assert_eq!(split.arity, 1);
    assert_eq!(split.server_text(), Some("name as Item1"));

    let tuple = TypeRef::Tuple(vec![TypeRef::string()]);
    let item = Expr::parameter("t", tuple.clone()).property("Item1", TypeRef::string());
    assert_eq!(
        split.client,
        Expr::lambda(
            vec![Parameter::new("t", tuple)],
            Expr::record(vec![("A", item.clone()), ("B", item)])
        )
    );
    Ok(())
}

#[test]
fn test_fully_supported_selector_is_identity() -> TestResult {
    let body = field("Released").property("Year", TypeRef::int32());
    let split = wire().partition(&lambda(body.clone()))?;
    assert_eq!(split.arity, 1);
    assert!(split.is_identity());
    let server = split.server.expect("server projection");
    assert_eq!(server.expression, Expr::tuple(vec![body]));
    assert_eq!(server.text, "year(released) as Item1");
    Ok(())
}

#[test]
fn test_slots_follow_first_appearance() -> TestResult {
    let body = Expr::record(vec![
        ("Label", unmapped_call(field("Name"), "Normalize")),
        ("Total", Expr::binary(
            querywire::BinaryOperator::Multiply,
            field("UnitPrice"),
            Expr::convert(field("Stock"), TypeRef::double()),
        )),
        ("Again", field("Name")),
    ]);
    let split = wire().partition(&lambda(body))?;
    assert_eq!(split.arity, 2);
    assert_eq!(
        split.server_text(),
        Some("name as Item1,(unitPrice mul cast(stock,Double)) as Item2")
    );
    assert_eq!(split.client_reasons.len(), 1);
    Ok(())
}

#[test]
fn test_forbidden_client_evaluation_aggregates() {
    init_logging();
    let strict = QueryWireBuilder::new()
        .with_client_evaluation(ClientEvaluation::Forbidden)
        .build();
    let body = Expr::record(vec![
        ("A", unmapped_call(field("Name"), "Normalize")),
        ("B", unmapped_call(field("Stock"), "Describe")),
    ]);
    let err = strict.partition(&lambda(body)).unwrap_err();
    assert!(matches!(err, CompileError::Aggregate(_)));
    assert_eq!(err.cause_count(), 2);
    assert!(err.to_string().starts_with("2 unsupported sub-expressions"));
}

#[test]
fn test_allowed_client_evaluation_explains_itself() -> TestResult {
    let body = Expr::record(vec![
        ("A", unmapped_call(field("Name"), "Normalize")),
        ("B", unmapped_call(field("Stock"), "Describe")),
    ]);
    let split = wire().partition(&lambda(body))?;
    assert_eq!(split.arity, 2);
    assert_eq!(split.server_text(), Some("name as Item1,stock as Item2"));
    assert_eq!(split.client_reasons.len(), 2);
    Ok(())
}

#[test]
fn test_nested_lambda_bodies_are_not_split() -> TestResult {
    // o => Describe(o.Total) has no mapping, yet the lambda is kept whole.
    let describe = unmapped_call(order_field("Total"), "Describe");
    let select = orders_with("Select", describe, TypeRef::sequence(TypeRef::string()));
    let split = wire().partition(&lambda(select))?;
    assert_eq!(split.arity, 1);
    assert_eq!(split.server_text(), Some("orders as Item1"));

    let (params, body) = split.client.as_lambda().expect("client lambda");
    let Expr::MethodCall { args, .. } = body else {
        panic!("expected the Select call to stay on the client");
    };
    assert_eq!(args[1], order_lambda(unmapped_call(order_field("Total"), "Describe")));
    assert_eq!(params[0].name, "t");
    Ok(())
}

#[test]
fn test_constant_and_parameter_selectors_stay_local() -> TestResult {
    let split = wire().partition(&lambda(x()))?;
    assert_eq!(split.arity, 0);
    assert!(split.server.is_none());
    assert_eq!(split.client, lambda(x()));

    let split = wire().partition(&lambda(Expr::constant("fixed")))?;
    assert_eq!(split.arity, 0);
    Ok(())
}

#[test]
fn test_shared_slot_converts_to_each_leaf_type() -> TestResult {
    let reorder_ty = TypeRef::nullable(TypeRef::int32());
    let body = Expr::record(vec![
        ("A", field("Reorder")),
        ("B", field("Reorder").property("Value", TypeRef::int32())),
    ]);
    let split = wire().partition(&lambda(body))?;
    assert_eq!(split.arity, 1);
    assert_eq!(split.server_text(), Some("reorder as Item1"));

    let tuple = TypeRef::Tuple(vec![reorder_ty.clone()]);
    let item = Expr::parameter("t", tuple.clone()).property("Item1", reorder_ty);
    assert_eq!(
        split.client,
        Expr::lambda(
            vec![Parameter::new("t", tuple)],
            Expr::record(vec![
                ("A", item.clone()),
                ("B", Expr::convert(item, TypeRef::int32())),
            ])
        )
    );
    Ok(())
}

#[test]
fn test_elided_enum_conversion_is_restored_on_the_client() -> TestResult {
    let color_ty = TypeRef::Enum(color());
    let body = Expr::record(vec![
        ("A", field("Color")),
        ("B", Expr::convert(field("Color"), TypeRef::int32())),
    ]);
    let split = wire().partition(&lambda(body))?;
    assert_eq!(split.arity, 1);
    assert_eq!(split.server_text(), Some("color as Item1"));

    let (_, body) = split.client.as_lambda().expect("client lambda");
    let Expr::NewValue { args, .. } = body else {
        panic!("expected the record to be rebuilt on the client");
    };
    assert_eq!(args[0].ty(), color_ty);
    assert_eq!(args[1].ty(), TypeRef::int32());
    assert!(matches!(&args[1], Expr::Unary { operand, .. } if operand.ty() == color_ty));
    Ok(())
}

#[test]
fn test_forbidden_rejects_unmapped_calls_without_the_root() -> TestResult {
    let magic = Expr::static_call(method("Util", "Magic", vec![], TypeRef::string()), vec![]);
    let body = Expr::record(vec![("A", field("Name")), ("B", magic)]);

    let strict = QueryWireBuilder::new()
        .with_client_evaluation(ClientEvaluation::Forbidden)
        .build();
    let err = strict.partition(&lambda(body.clone())).unwrap_err();
    assert_eq!(
        err,
        CompileError::unmapped(MemberSignature::method("Util", "Magic", Vec::<String>::new()))
    );

    let split = wire().partition(&lambda(body))?;
    assert_eq!(split.server_text(), Some("name as Item1"));
    Ok(())
}
