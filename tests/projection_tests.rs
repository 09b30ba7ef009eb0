mod common;

use common::fixtures::*;
use common::{TestResult, wire};
use querywire::types::TypeRef;
use querywire::{CompileError, Expr};

#[test]
fn test_named_projection() -> TestResult {
    let body = Expr::record(vec![
        ("Title", field("Name")),
        ("Price", field("UnitPrice")),
        ("Year", field("Released").property("Year", TypeRef::int32())),
    ]);
    assert_eq!(
        wire().select(&lambda(body))?,
        "name as Title,unitPrice as Price,year(released) as Year"
    );
    Ok(())
}

#[test]
fn test_positional_projection() -> TestResult {
    let body = Expr::tuple(vec![field("Name"), field("Stock")]);
    assert_eq!(wire().select(&lambda(body))?, "name as Item1,stock as Item2");
    Ok(())
}

#[test]
fn test_keyed_list_projection() -> TestResult {
    let body = Expr::list_init(
        TypeRef::dictionary(TypeRef::string(), TypeRef::object()),
        vec![
            vec![Expr::constant("label"), field("Name")],
            vec![Expr::constant("count"), field("Stock")],
        ],
    );
    assert_eq!(wire().select(&lambda(body))?, "name as label,stock as count");
    Ok(())
}

#[test]
fn test_scalar_projection() -> TestResult {
    assert_eq!(wire().select(&lambda(field("Name")))?, "name as this");
    let length = field("Name").property("Length", TypeRef::int32());
    assert_eq!(wire().select(&lambda(length))?, "length(name) as this");
    Ok(())
}

#[test]
fn test_nested_construction_is_unsupported() {
    let inner = Expr::tuple(vec![field("Name")]);
    let body = Expr::record(vec![("Inner", inner)]);
    assert!(matches!(
        wire().select(&lambda(body)),
        Err(CompileError::UnsupportedNode { .. })
    ));
}
