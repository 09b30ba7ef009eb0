//! The standard mapping table.

use crate::registry::{CallStyle, FunctionRegistry, MappingEntry};
use querywire_types::MemberSignature;

pub(crate) fn register_all(registry: &mut FunctionRegistry) {
    register_string(registry);
    register_date_time(registry);
    register_math(registry);
    register_sequence(registry);
    register_nullable(registry);
    register_object(registry);
}

// --- String ---

fn register_string(registry: &mut FunctionRegistry) {
    let instance = [
        ("Contains", vec!["String"], "contains"),
        ("StartsWith", vec!["String"], "startswith"),
        ("EndsWith", vec!["String"], "endswith"),
        ("IndexOf", vec!["String"], "indexof"),
        ("Replace", vec!["String", "String"], "replace"),
        ("Substring", vec!["Int32"], "substring"),
        ("Substring", vec!["Int32", "Int32"], "substring"),
        ("ToLower", vec![], "tolower"),
        ("ToUpper", vec![], "toupper"),
        ("Trim", vec![], "trim"),
    ];
    for (name, params, wire) in instance {
        let sig = MemberSignature::method("String", name, params);
        let arity = sig.arity(true);
        registry.register(MappingEntry::function(sig, CallStyle::Static, wire, arity));
    }

    registry.register(MappingEntry::function(
        MemberSignature::property("String", "Length"),
        CallStyle::Static,
        "length",
        1,
    ));
    registry.register(MappingEntry::function(
        MemberSignature::method("String", "Concat", ["String", "String"]),
        CallStyle::Static,
        "concat",
        2,
    ));

    let is_null_or_empty = "(({0} eq null) or ({0} eq ''))";
    registry.register(MappingEntry::new(
        MemberSignature::method("String", "IsNullOrEmpty", ["String"]),
        CallStyle::Static,
        is_null_or_empty,
        is_null_or_empty,
    ));
}

// --- Date and time ---

fn register_date_time(registry: &mut FunctionRegistry) {
    for (name, wire) in [
        ("Year", "year"),
        ("Month", "month"),
        ("Day", "day"),
        ("Hour", "hour"),
        ("Minute", "minute"),
        ("Second", "second"),
    ] {
        registry.register(MappingEntry::function(
            MemberSignature::property("DateTime", name),
            CallStyle::Static,
            wire,
            1,
        ));
    }
    for name in ["Now", "UtcNow"] {
        registry.register(MappingEntry::function(
            MemberSignature::property("DateTime", name),
            CallStyle::Static,
            "now",
            0,
        ));
    }
}

// --- Math ---

fn register_math(registry: &mut FunctionRegistry) {
    for operand in ["Double", "Decimal"] {
        for (name, wire) in [("Round", "round"), ("Floor", "floor"), ("Ceiling", "ceiling")] {
            registry.register(MappingEntry::function(
                MemberSignature::method("Math", name, [operand]),
                CallStyle::Static,
                wire,
                1,
            ));
        }
    }
}

// --- Sequence operators ---

fn register_sequence(registry: &mut FunctionRegistry) {
    let operators = [
        ("Any", vec!["Sequence"], "any"),
        ("Any", vec!["Sequence", "Lambda"], "any"),
        ("All", vec!["Sequence", "Lambda"], "all"),
        ("Count", vec!["Sequence"], "count"),
        ("Count", vec!["Sequence", "Lambda"], "count"),
        ("Sum", vec!["Sequence", "Lambda"], "sum"),
        ("Min", vec!["Sequence", "Lambda"], "min"),
        ("Max", vec!["Sequence", "Lambda"], "max"),
        ("Average", vec!["Sequence", "Lambda"], "average"),
    ];
    for (name, params, wire) in operators {
        let sig = MemberSignature::method("Enumerable", name, params);
        let arity = sig.arity(false);
        registry.register(MappingEntry::function(sig, CallStyle::Chained, wire, arity));
    }
}

// --- Nullable ---

fn register_nullable(registry: &mut FunctionRegistry) {
    registry.register(MappingEntry::new(
        MemberSignature::property("Nullable", "Value"),
        CallStyle::Static,
        "{0}",
        "{0}",
    ));
    registry.register(MappingEntry::new(
        MemberSignature::property("Nullable", "HasValue"),
        CallStyle::Static,
        "({0} ne null)",
        "({0} ne null)",
    ));
}

// --- Object ---

fn register_object(registry: &mut FunctionRegistry) {
    // Server and client string formatting differ, so splits keep this local.
    registry.register(
        MappingEntry::new(
            MemberSignature::method("Object", "ToString", Vec::<String>::new()),
            CallStyle::Static,
            "cast({0},String)",
            "cast({0},String)",
        )
        .prefer_local(),
    );
}
