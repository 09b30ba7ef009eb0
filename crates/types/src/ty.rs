//! Static type descriptors.
//!
//! A [`TypeRef`] is a plain value: enum and entity definitions are carried
//! inline, so two descriptors compare equal when they describe the same shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in scalar types with a native wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Int16,
    Int32,
    Int64,
    Single,
    Double,
    Decimal,
    String,
    Char,
    DateTime,
    Guid,
    Object,
}

impl PrimitiveType {
    /// The native name, used both as signature descriptor and as the
    /// externalized type name.
    pub fn native_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::Byte => "Byte",
            PrimitiveType::Int16 => "Int16",
            PrimitiveType::Int32 => "Int32",
            PrimitiveType::Int64 => "Int64",
            PrimitiveType::Single => "Single",
            PrimitiveType::Double => "Double",
            PrimitiveType::Decimal => "Decimal",
            PrimitiveType::String => "String",
            PrimitiveType::Char => "Char",
            PrimitiveType::DateTime => "DateTime",
            PrimitiveType::Guid => "Guid",
            PrimitiveType::Object => "Object",
        }
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            PrimitiveType::Byte | PrimitiveType::Int16 | PrimitiveType::Int32 | PrimitiveType::Int64
        )
    }
}

/// An enumeration with named integral members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    pub underlying: PrimitiveType,
    pub members: Vec<(String, i64)>,
    #[serde(default)]
    pub is_flags: bool,
}

impl EnumDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            underlying: PrimitiveType::Int32,
            members: Vec::new(),
            is_flags: false,
        }
    }

    pub fn member(mut self, symbol: impl Into<String>, value: i64) -> Self {
        self.members.push((symbol.into(), value));
        self
    }

    pub fn flags(mut self) -> Self {
        self.is_flags = true;
        self
    }

    /// Returns the first symbol declared with the given raw value.
    pub fn symbol_of(&self, raw: i64) -> Option<&str> {
        self.members
            .iter()
            .find(|(_, value)| *value == raw)
            .map(|(symbol, _)| symbol.as_str())
    }

    pub fn value_of(&self, symbol: &str) -> Option<i64> {
        self.members
            .iter()
            .find(|(name, _)| name == symbol)
            .map(|(_, value)| *value)
    }

    /// Formats a raw value as its symbolic form.
    ///
    /// Exact members render as their symbol. Flags enumerations decompose a
    /// combined value into `"A, B"` ordered by ascending member value. Values
    /// with no symbolic form fall back to their decimal digits.
    pub fn format(&self, raw: i64) -> String {
        if let Some(symbol) = self.symbol_of(raw) {
            return symbol.to_string();
        }
        if self.is_flags && raw != 0 {
            let mut by_value: Vec<&(String, i64)> =
                self.members.iter().filter(|(_, v)| *v != 0).collect();
            by_value.sort_by(|a, b| b.1.cmp(&a.1));

            let mut remaining = raw;
            let mut parts = Vec::new();
            for (symbol, value) in by_value {
                if remaining & *value == *value {
                    parts.push(symbol.as_str());
                    remaining &= !*value;
                }
            }
            if remaining == 0 && !parts.is_empty() {
                parts.reverse();
                return parts.join(", ");
            }
        }
        raw.to_string()
    }
}

/// A named field of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
}

/// A record type exposed by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityDef {
    pub name: String,
    /// Name declared for the wire when it differs from `name`.
    #[serde(default)]
    pub external_name: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl EntityDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external_name: None,
            fields: Vec::new(),
        }
    }

    pub fn with_external_name(mut self, external_name: impl Into<String>) -> Self {
        self.external_name = Some(external_name.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.fields.push(Field {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn field_type(&self, name: &str) -> Option<&TypeRef> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.ty)
    }

    pub fn wire_name(&self) -> &str {
        self.external_name.as_deref().unwrap_or(&self.name)
    }
}

/// The static type of an expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Nullable(Box<TypeRef>),
    Enum(EnumDef),
    Entity(EntityDef),
    /// An in-memory sequence.
    Sequence(Box<TypeRef>),
    /// A sequence wrapped for remote query composition.
    Query(Box<TypeRef>),
    Dictionary(Box<TypeRef>, Box<TypeRef>),
    /// Positional carrier with `Item1..ItemN` members.
    Tuple(Vec<TypeRef>),
    Function(Vec<TypeRef>, Box<TypeRef>),
    /// The type of a type-literal constant.
    TypeLiteral,
}

impl TypeRef {
    pub fn boolean() -> Self {
        TypeRef::Primitive(PrimitiveType::Boolean)
    }

    pub fn int32() -> Self {
        TypeRef::Primitive(PrimitiveType::Int32)
    }

    pub fn int64() -> Self {
        TypeRef::Primitive(PrimitiveType::Int64)
    }

    pub fn double() -> Self {
        TypeRef::Primitive(PrimitiveType::Double)
    }

    pub fn single() -> Self {
        TypeRef::Primitive(PrimitiveType::Single)
    }

    pub fn decimal() -> Self {
        TypeRef::Primitive(PrimitiveType::Decimal)
    }

    pub fn string() -> Self {
        TypeRef::Primitive(PrimitiveType::String)
    }

    pub fn date_time() -> Self {
        TypeRef::Primitive(PrimitiveType::DateTime)
    }

    pub fn guid() -> Self {
        TypeRef::Primitive(PrimitiveType::Guid)
    }

    pub fn object() -> Self {
        TypeRef::Primitive(PrimitiveType::Object)
    }

    pub fn nullable(inner: TypeRef) -> Self {
        TypeRef::Nullable(Box::new(inner))
    }

    pub fn sequence(element: TypeRef) -> Self {
        TypeRef::Sequence(Box::new(element))
    }

    pub fn query(element: TypeRef) -> Self {
        TypeRef::Query(Box::new(element))
    }

    pub fn dictionary(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Dictionary(Box::new(key), Box::new(value))
    }

    /// Strips one level of `Nullable`.
    pub fn non_nullable(&self) -> &TypeRef {
        match self {
            TypeRef::Nullable(inner) => inner,
            other => other,
        }
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            TypeRef::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDef> {
        match self {
            TypeRef::Enum(def) => Some(def),
            _ => None,
        }
    }

    /// The enum definition behind `E` or `Nullable<E>`.
    pub fn as_enum_or_nullable_enum(&self) -> Option<&EnumDef> {
        self.non_nullable().as_enum()
    }

    /// True for in-memory sequences and wrapped query sequences.
    pub fn is_sequence(&self) -> bool {
        matches!(self, TypeRef::Sequence(_) | TypeRef::Query(_))
    }

    /// Descriptor used inside a [`crate::MemberSignature`]. Generic shapes
    /// collapse to their constructor so one mapping covers every element type.
    pub fn descriptor(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.native_name().to_string(),
            TypeRef::Nullable(_) => "Nullable".to_string(),
            TypeRef::Enum(def) => def.name.clone(),
            TypeRef::Entity(def) => def.name.clone(),
            TypeRef::Sequence(_) => "Sequence".to_string(),
            TypeRef::Query(_) => "Query".to_string(),
            TypeRef::Dictionary(_, _) => "Dictionary".to_string(),
            TypeRef::Tuple(_) => "Tuple".to_string(),
            TypeRef::Function(_, _) => "Lambda".to_string(),
            TypeRef::TypeLiteral => "Type".to_string(),
        }
    }

    /// The externalized type name used by `cast`, `isof` and type literals.
    pub fn wire_name(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.native_name().to_string(),
            TypeRef::Nullable(inner) => format!("{}?", inner.wire_name()),
            TypeRef::Enum(def) => def.name.clone(),
            TypeRef::Entity(def) => def.wire_name().to_string(),
            TypeRef::Sequence(element) | TypeRef::Query(element) => {
                format!("Collection({})", element.wire_name())
            }
            TypeRef::Dictionary(_, _) => "Dictionary".to_string(),
            TypeRef::Tuple(items) => format!("Tuple{}", items.len()),
            TypeRef::Function(_, _) => "Lambda".to_string(),
            TypeRef::TypeLiteral => "Type".to_string(),
        }
    }

    /// Result type of member `name` when this is an entity or tuple.
    pub fn member_type(&self, name: &str) -> Option<TypeRef> {
        match self {
            TypeRef::Entity(def) => def.field_type(name).cloned(),
            TypeRef::Tuple(items) => name
                .strip_prefix("Item")
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| items.get(idx).cloned()),
            _ => None,
        }
    }
}

impl From<PrimitiveType> for TypeRef {
    fn from(p: PrimitiveType) -> Self {
        TypeRef::Primitive(p)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "{}", p.native_name()),
            TypeRef::Nullable(inner) => write!(f, "Nullable<{}>", inner),
            TypeRef::Enum(def) => write!(f, "{}", def.name),
            TypeRef::Entity(def) => write!(f, "{}", def.name),
            TypeRef::Sequence(element) => write!(f, "Sequence<{}>", element),
            TypeRef::Query(element) => write!(f, "Query<{}>", element),
            TypeRef::Dictionary(key, value) => write!(f, "Dictionary<{}, {}>", key, value),
            TypeRef::Tuple(items) => {
                write!(f, "Tuple<")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ">")
            }
            TypeRef::Function(params, result) => {
                write!(f, "Func<")?;
                for param in params {
                    write!(f, "{}, ", param)?;
                }
                write!(f, "{}>", result)
            }
            TypeRef::TypeLiteral => write!(f, "Type"),
        }
    }
}
