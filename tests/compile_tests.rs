mod common;

use common::fixtures::*;
use common::{TestResult, wire};
use querywire::types::{
    DateTimeValue, Decimal, MemberSignature, NaiveDateTime, TypeRef, Value,
};
use querywire::{BinaryOperator, CompileError, Expr, MemberNaming, QueryWireBuilder};
use std::str::FromStr;

fn filter(body: Expr) -> Result<String, CompileError> {
    wire().filter(&lambda(body))
}

fn canonical(body: Expr) -> Result<String, CompileError> {
    wire().compiler().compile_lambda(&lambda(body))
}

#[test]
fn test_every_operator_token() -> TestResult {
    let tokens = [
        (BinaryOperator::Equal, "eq"),
        (BinaryOperator::NotEqual, "ne"),
        (BinaryOperator::GreaterThan, "gt"),
        (BinaryOperator::GreaterThanOrEqual, "ge"),
        (BinaryOperator::LessThan, "lt"),
        (BinaryOperator::LessThanOrEqual, "le"),
        (BinaryOperator::Add, "add"),
        (BinaryOperator::Subtract, "sub"),
        (BinaryOperator::Multiply, "mul"),
        (BinaryOperator::Divide, "div"),
        (BinaryOperator::Modulo, "mod"),
    ];
    for (op, token) in tokens {
        let body = Expr::binary(op, field("UnitPrice"), field("Stock"));
        assert_eq!(canonical(body)?, format!("(unitPrice {} stock)", token));
    }

    let both = Expr::and(
        Expr::gt(field("Stock"), Expr::constant(0)),
        Expr::or(
            Expr::eq(field("Name"), Expr::constant("Chai")),
            Expr::eq(field("Name"), Expr::constant("Chang")),
        ),
    );
    assert_eq!(
        filter(both)?,
        "(stock gt 0) and ((name eq 'Chai') or (name eq 'Chang'))"
    );
    Ok(())
}

#[test]
fn test_string_literals_are_escaped() -> TestResult {
    let body = Expr::eq(field("Name"), Expr::constant("O'Brien"));
    assert_eq!(filter(body)?, "name eq 'O''Brien'");
    Ok(())
}

#[test]
fn test_numeric_literal_suffixes() -> TestResult {
    let cases = [
        (Expr::constant(5.0), "5.0"),
        (Expr::constant(5.5), "5.5"),
        (Expr::constant(5.0f32), "5f"),
        (Expr::constant(5.5f32), "5.5f"),
        (Expr::constant(Decimal::from_str("5.5")?), "5.5m"),
        (Expr::constant(7), "7"),
    ];
    for (literal, expected) in cases {
        let body = Expr::gt(field("UnitPrice"), literal);
        assert_eq!(filter(body)?, format!("unitPrice gt {}", expected));
    }
    Ok(())
}

#[test]
fn test_enum_comparison_renders_symbol() -> TestResult {
    let converted = Expr::convert(field("Color"), TypeRef::int32());
    let blue = Expr::constant(1);

    assert_eq!(canonical(Expr::eq(converted.clone(), blue))?, "(color eq 'Blue')");
    assert_eq!(filter(Expr::ne(converted, Expr::constant(0)))?, "color ne 'Red'");
    Ok(())
}

#[test]
fn test_enum_comparison_keeps_source_operand_order() -> TestResult {
    // Only the literal is rewritten; a constant on the left stays on the left.
    let converted = Expr::convert(field("Color"), TypeRef::int32());
    assert_eq!(canonical(Expr::eq(Expr::constant(1), converted))?, "('Blue' eq color)");
    Ok(())
}

#[test]
fn test_nullable_enum_comparison() -> TestResult {
    let nullable_int = TypeRef::nullable(TypeRef::int32());
    let finish = Expr::convert(field("Finish"), nullable_int.clone());

    let blue = Expr::convert(Expr::constant(1), nullable_int.clone());
    assert_eq!(filter(Expr::eq(finish.clone(), blue))?, "finish eq 'Blue'");

    let null = Expr::null(nullable_int);
    assert_eq!(filter(Expr::eq(finish, null))?, "finish eq null");
    Ok(())
}

#[test]
fn test_nullable_members() -> TestResult {
    let reorder = field("Reorder");
    let has_value = reorder.clone().property("HasValue", TypeRef::boolean());
    assert_eq!(filter(has_value)?, "reorder ne null");

    let value = reorder.clone().property("Value", TypeRef::int32());
    assert_eq!(filter(Expr::gt(value, Expr::constant(3)))?, "reorder gt 3");

    let lifted = Expr::convert(Expr::constant(3), TypeRef::nullable(TypeRef::int32()));
    assert_eq!(filter(Expr::gt(reorder, lifted))?, "reorder gt 3");
    Ok(())
}

#[test]
fn test_date_functions_and_literals() -> TestResult {
    let year = field("Released").property("Year", TypeRef::int32());
    assert_eq!(filter(Expr::eq(year, Expr::constant(2024)))?, "year(released) eq 2024");

    let cutoff = NaiveDateTime::parse_from_str("2024-01-31 23:59:00", "%Y-%m-%d %H:%M:%S")?;
    let after = Expr::gt(field("Released"), Expr::constant(DateTimeValue::utc(cutoff)));
    assert_eq!(filter(after)?, "released gt datetime'2024-01-31T23:59:00Z'");

    let now = Expr::static_property("DateTime", "UtcNow", TypeRef::date_time());
    assert_eq!(filter(Expr::lt(field("Released"), now))?, "released lt now()");
    Ok(())
}

#[test]
fn test_string_functions() -> TestResult {
    let contains = field("Name").call(
        method("String", "Contains", vec![TypeRef::string()], TypeRef::boolean()),
        vec![Expr::constant("tea")],
    );
    assert_eq!(filter(contains)?, "contains(name,'tea')");

    let lower = field("Name").call(method("String", "ToLower", vec![], TypeRef::string()), vec![]);
    assert_eq!(filter(Expr::eq(lower, Expr::constant("chai")))?, "tolower(name) eq 'chai'");

    let empty = Expr::static_call(
        method("String", "IsNullOrEmpty", vec![TypeRef::string()], TypeRef::boolean()),
        vec![field("Name")],
    );
    assert_eq!(filter(empty)?, "(name eq null) or (name eq '')");
    Ok(())
}

#[test]
fn test_sequence_operators_with_nested_lambdas() -> TestResult {
    let big = Expr::gt(order_field("Total"), Expr::constant(100.0));
    let any = orders_with("Any", big, TypeRef::boolean());
    assert_eq!(filter(any)?, "orders.any(o:(o.total gt 100.0))");

    let placed = order_field("Placed").property("Year", TypeRef::int32());
    let recent = Expr::eq(placed, field("Released").property("Year", TypeRef::int32()));
    let all = orders_with("All", recent, TypeRef::boolean());
    assert_eq!(filter(all)?, "orders.all(o:(year(o.placed) eq year(released)))");
    Ok(())
}

#[test]
fn test_membership_and_dictionaries() -> TestResult {
    let ids = Expr::constant(Value::Sequence(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
    let member = Expr::static_call(
        method(
            "Enumerable",
            "Contains",
            vec![TypeRef::sequence(TypeRef::int32()), TypeRef::int32()],
            TypeRef::boolean(),
        ),
        vec![ids, field("Stock")],
    );
    assert_eq!(filter(member)?, "stock in [1,2,3]");

    let origin = field("Attributes").call(
        method("Dictionary", "get_Item", vec![TypeRef::string()], TypeRef::string()),
        vec![Expr::constant("origin")],
    );
    assert_eq!(
        filter(Expr::eq(origin, Expr::constant("India")))?,
        "attributes['origin'] eq 'India'"
    );
    Ok(())
}

#[test]
fn test_type_tests_casts_and_conditionals() -> TestResult {
    assert_eq!(
        filter(Expr::type_test(x(), TypeRef::Entity(querywire::types::EntityDef::new("Tea"))))?,
        "isof(Tea)"
    );
    let rounded = Expr::convert(field("UnitPrice"), TypeRef::int32());
    assert_eq!(filter(Expr::gt(rounded, Expr::constant(3)))?, "cast(unitPrice,Int32) gt 3");

    let price = Expr::conditional(
        Expr::gt(field("Stock"), Expr::constant(0)),
        field("UnitPrice"),
        Expr::constant(0.0),
    );
    assert_eq!(
        filter(Expr::gt(price, Expr::constant(1.5)))?,
        "iif((stock gt 0),unitPrice,0.0) gt 1.5"
    );
    Ok(())
}

#[test]
fn test_unmapped_method_reports_signature() {
    let call = unmapped_call(field("Name"), "Normalize");
    let err = filter(call).unwrap_err();
    assert_eq!(
        err,
        CompileError::unmapped(MemberSignature::method("String", "Normalize", Vec::<String>::new()))
    );
    assert!(err.to_string().contains("String.Normalize()"));
}

#[test]
fn test_compilation_is_idempotent() -> TestResult {
    let body = Expr::and(
        Expr::eq(Expr::convert(field("Color"), TypeRef::int32()), Expr::constant(1)),
        Expr::gt(field("Discount"), Expr::constant(Decimal::from_str("0.25")?)),
    );
    let wire = wire();
    let predicate = lambda(body);
    let first = wire.filter(&predicate)?;
    let second = wire.filter(&predicate)?;
    assert_eq!(first, second);
    assert_eq!(first, "(color eq 'Blue') and (discount gt 0.25m)");
    Ok(())
}

#[test]
fn test_builder_options() -> TestResult {
    common::init_logging();
    let verbatim = QueryWireBuilder::new()
        .with_member_naming(MemberNaming::Verbatim)
        .with_strip_outer_parens(false)
        .build();
    let predicate = lambda(Expr::gt(field("UnitPrice"), Expr::constant(2.0)));
    assert_eq!(verbatim.filter(&predicate)?, "(UnitPrice gt 2.0)");
    Ok(())
}
