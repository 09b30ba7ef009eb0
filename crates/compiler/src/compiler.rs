//! The recursive renderer from expression trees to wire text.

use crate::error::CompileError;
use crate::literal;
use crate::normalize;
use querywire_expr::{BinaryOperator, Expr, Parameter, UnaryKind};
use querywire_functions::{FunctionRegistry, MappingEntry};
use querywire_types::{MemberRef, MethodRef, TypeRef, Value};
use std::borrow::Cow;

/// How member names are written on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MemberNaming {
    /// First letter lower-cased: `UnitPrice` -> `unitPrice`.
    #[default]
    CamelCase,
    Verbatim,
}

/// Tunables for a [`Compiler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    pub member_naming: MemberNaming,
    /// Drop one redundant pair of enclosing parentheses from predicates.
    pub strip_outer_parens: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            member_naming: MemberNaming::CamelCase,
            strip_outer_parens: true,
        }
    }
}

impl CompilerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member_naming(mut self, member_naming: MemberNaming) -> Self {
        self.member_naming = member_naming;
        self
    }

    pub fn with_strip_outer_parens(mut self, strip: bool) -> Self {
        self.strip_outer_parens = strip;
        self
    }
}

/// The outcome of classifying one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub text: String,
    /// A mapping reached while rendering prefers client-side evaluation.
    pub prefer_local: bool,
}

/// Translates typed expression trees into wire text.
///
/// A compiler borrows an immutable [`FunctionRegistry`] and holds no state
/// between calls, so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Compiler<'r> {
    registry: &'r FunctionRegistry,
    options: CompilerOptions,
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r FunctionRegistry) -> Self {
        Self {
            registry,
            options: CompilerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn registry(&self) -> &'r FunctionRegistry {
        self.registry
    }

    /// Renders `node`, treating the parameter named `this` as the root.
    pub fn compile(&self, node: &Expr, this: Option<&str>) -> Result<String, CompileError> {
        self.classify(node, this).map(|compiled| compiled.text)
    }

    /// Renders `node` and reports whether any mapping on the way prefers
    /// local evaluation.
    pub fn classify(&self, node: &Expr, this: Option<&str>) -> Result<Compiled, CompileError> {
        let mut ctx = RenderContext {
            registry: self.registry,
            options: &self.options,
            root: this,
            prefer_local: false,
        };
        let text = render(node, &mut ctx)?;
        Ok(Compiled {
            text,
            prefer_local: ctx.prefer_local,
        })
    }

    /// Renders the body of a one-parameter lambda with that parameter as root.
    pub fn compile_lambda(&self, lambda: &Expr) -> Result<String, CompileError> {
        let (param, body) = root_lambda(lambda)?;
        self.compile(body, Some(&param.name))
    }

    /// The `$filter` entry point.
    pub fn compile_predicate(&self, lambda: &Expr) -> Result<String, CompileError> {
        let text = self.compile_lambda(lambda)?;
        if self.options.strip_outer_parens {
            Ok(strip_outer_parens(&text).to_string())
        } else {
            Ok(text)
        }
    }
}

/// Splits a selector or predicate into its single parameter and body.
pub fn root_lambda(expr: &Expr) -> Result<(&Parameter, &Expr), CompileError> {
    match expr.as_lambda() {
        Some(([param], body)) => Ok((param, body)),
        Some((params, _)) => Err(CompileError::unsupported(
            "Lambda",
            format!("expected one parameter, found {}", params.len()),
        )),
        None => Err(CompileError::unsupported(
            expr.kind_name(),
            "expected a lambda expression",
        )),
    }
}

/// Removes one pair of enclosing parentheses when the opening one is closed
/// by the final character. Quoted literals are skipped while matching.
pub fn strip_outer_parens(text: &str) -> &str {
    if text.len() < 2 || !(text.starts_with('(') && text.ends_with(')')) {
        return text;
    }
    let last = text.len() - 1;
    let mut depth = 0usize;
    let mut in_string = false;
    for (i, c) in text.char_indices() {
        match c {
            '\'' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 && i != last {
                    return text;
                }
            }
            _ => {}
        }
    }
    &text[1..last]
}

struct RenderContext<'a> {
    registry: &'a FunctionRegistry,
    options: &'a CompilerOptions,
    root: Option<&'a str>,
    prefer_local: bool,
}

impl RenderContext<'_> {
    fn is_root(&self, expr: &Expr) -> bool {
        self.root.is_some_and(|root| expr.is_parameter_named(root))
    }

    fn member_name(&self, name: &str) -> String {
        match self.options.member_naming {
            MemberNaming::Verbatim => name.to_string(),
            MemberNaming::CamelCase => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }

    fn apply(&mut self, entry: &MappingEntry, args: &[String]) -> Result<String, CompileError> {
        if entry.prefer_local {
            log::debug!("Mapping for '{}' prefers local evaluation", entry.signature);
            self.prefer_local = true;
        }
        Ok(entry.render(args)?)
    }
}

fn render(expr: &Expr, ctx: &mut RenderContext<'_>) -> Result<String, CompileError> {
    log::trace!("Rendering {} node", expr.kind_name());
    match expr {
        Expr::Binary {
            op, left, right, ..
        } => render_binary(*op, left, right, ctx),
        Expr::Unary { kind, operand, ty } => render_unary(*kind, operand, ty, ctx),
        Expr::MemberAccess { target, member } => render_member(target.as_deref(), member, ctx),
        Expr::Constant { value, ty } => Ok(render_constant(value, ty)),
        Expr::MethodCall {
            target,
            method,
            args,
        } => render_call(target.as_deref(), method, args, ctx),
        Expr::TypeTest { target, tested } => {
            if ctx.is_root(target) {
                Ok(format!("isof({})", tested.wire_name()))
            } else {
                Ok(format!("isof({},{})", render(target, ctx)?, tested.wire_name()))
            }
        }
        Expr::Lambda { params, body } => render_lambda(params, body, ctx),
        Expr::Conditional {
            test,
            then,
            otherwise,
            ..
        } => Ok(format!(
            "iif({},{},{})",
            render(test, ctx)?,
            render(then, ctx)?,
            render(otherwise, ctx)?
        )),
        Expr::Parameter(p) => {
            if ctx.root == Some(p.name.as_str()) {
                Ok("this".to_string())
            } else {
                Ok(p.name.clone())
            }
        }
        Expr::ArrayLiteral { elements, .. } => {
            let rendered = elements
                .iter()
                .map(|e| render(e, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("[{}]", rendered.join(",")))
        }
        Expr::NewValue { .. } | Expr::ListInit { .. } => Err(CompileError::unsupported(
            expr.kind_name(),
            "construction is only valid as a projection root",
        )),
    }
}

fn binary_token(op: BinaryOperator) -> Option<&'static str> {
    Some(match op {
        BinaryOperator::And => "and",
        BinaryOperator::Or => "or",
        BinaryOperator::Equal => "eq",
        BinaryOperator::NotEqual => "ne",
        BinaryOperator::GreaterThan => "gt",
        BinaryOperator::GreaterThanOrEqual => "ge",
        BinaryOperator::LessThan => "lt",
        BinaryOperator::LessThanOrEqual => "le",
        BinaryOperator::Add => "add",
        BinaryOperator::Subtract => "sub",
        BinaryOperator::Multiply => "mul",
        BinaryOperator::Divide => "div",
        BinaryOperator::Modulo => "mod",
        BinaryOperator::Coalesce | BinaryOperator::ExclusiveOr | BinaryOperator::Power => {
            return None;
        }
    })
}

fn render_binary(
    op: BinaryOperator,
    left: &Expr,
    right: &Expr,
    ctx: &mut RenderContext<'_>,
) -> Result<String, CompileError> {
    let token = binary_token(op).ok_or_else(|| {
        CompileError::unsupported("Binary", format!("operator {:?} has no wire token", op))
    })?;
    let (left, right) = normalize::normalize_operands(op, left, right);
    let left = render(&left, ctx)?;
    let right = render(&right, ctx)?;
    Ok(format!("({} {} {})", left, token, right))
}

fn render_unary(
    kind: UnaryKind,
    operand: &Expr,
    ty: &TypeRef,
    ctx: &mut RenderContext<'_>,
) -> Result<String, CompileError> {
    match kind {
        UnaryKind::Not => {
            let inner = render(operand, ctx)?;
            Ok(format!("not ({})", strip_outer_parens(&inner)))
        }
        UnaryKind::Negate => Err(CompileError::unsupported(
            "Unary",
            "arithmetic negation has no wire form",
        )),
        UnaryKind::TypeAs => Ok(format!("({} as {})", render(operand, ctx)?, ty.wire_name())),
        UnaryKind::Convert => {
            let operand_ty = operand.ty();
            // Enum values travel as their symbols; nullability is not a wire type.
            if operand_ty.as_enum_or_nullable_enum().is_some()
                || operand_ty.non_nullable() == ty.non_nullable()
            {
                render(operand, ctx)
            } else if ctx.is_root(operand) {
                Ok(format!("cast({})", ty.wire_name()))
            } else {
                Ok(format!("cast({},{})", render(operand, ctx)?, ty.wire_name()))
            }
        }
    }
}

fn render_constant(value: &Value, ty: &TypeRef) -> String {
    // Integer constants typed as an enum render as the symbol.
    if let (Value::Int(raw), Some(def)) = (value, ty.as_enum_or_nullable_enum()) {
        return literal::quote(&def.format(*raw));
    }
    literal::encode_value(value)
}

fn render_member(
    target: Option<&Expr>,
    member: &MemberRef,
    ctx: &mut RenderContext<'_>,
) -> Result<String, CompileError> {
    let registry = ctx.registry;
    let signature = member.signature();
    if let Some(entry) = registry.try_resolve(&signature) {
        let mut args = Vec::with_capacity(1);
        if let Some(target) = target {
            args.push(render(target, ctx)?);
        }
        return ctx.apply(entry, &args);
    }

    let name = ctx.member_name(&member.name);
    match target {
        None => {
            log::debug!("No mapping for static member '{}'", signature);
            Err(CompileError::unmapped(signature))
        }
        Some(target) if ctx.is_root(target) => Ok(name),
        Some(target) => Ok(format!("{}.{}", render(target, ctx)?, name)),
    }
}

fn render_call(
    target: Option<&Expr>,
    method: &MethodRef,
    args: &[Expr],
    ctx: &mut RenderContext<'_>,
) -> Result<String, CompileError> {
    if let Some(text) = render_membership(target, method, args, ctx)? {
        return Ok(text);
    }
    if let Some(text) = render_dictionary_access(target, method, args, ctx)? {
        return Ok(text);
    }

    let method = if method.operates_on_query() {
        Cow::Owned(method.to_sequence_equivalent())
    } else {
        Cow::Borrowed(method)
    };
    let registry = ctx.registry;
    let signature = method.signature();
    let Some(entry) = registry.try_resolve(&signature) else {
        log::debug!("No mapping for method '{}'", signature);
        return Err(CompileError::unmapped(signature));
    };

    let mut rendered = Vec::with_capacity(args.len() + 1);
    if let Some(target) = target {
        rendered.push(render(target, ctx)?);
    }
    for arg in args {
        rendered.push(render(arg, ctx)?);
    }
    ctx.apply(entry, &rendered)
}

/// `Contains` over a non-string sequence becomes `value in set`.
fn render_membership(
    target: Option<&Expr>,
    method: &MethodRef,
    args: &[Expr],
    ctx: &mut RenderContext<'_>,
) -> Result<Option<String>, CompileError> {
    if method.name != "Contains" {
        return Ok(None);
    }
    let (set, value) = match (target, args) {
        (None, [set, value]) => (set, value),
        (Some(set), [value]) => (set, value),
        _ => return Ok(None),
    };
    if !set.ty().is_sequence() {
        return Ok(None);
    }
    let value = render(value, ctx)?;
    let set = render(set, ctx)?;
    Ok(Some(format!("{} in {}", value, set)))
}

/// Dictionary indexer (`get_Item`) and safe lookup (`GetValueOrDefault`).
fn render_dictionary_access(
    target: Option<&Expr>,
    method: &MethodRef,
    args: &[Expr],
    ctx: &mut RenderContext<'_>,
) -> Result<Option<String>, CompileError> {
    let safe = match method.name.as_str() {
        "get_Item" => false,
        "GetValueOrDefault" => true,
        _ => return Ok(None),
    };
    let (dictionary, key) = match (target, args) {
        (Some(dictionary), [key]) => (dictionary, key),
        (None, [dictionary, key]) => (dictionary, key),
        _ => return Ok(None),
    };
    if !matches!(dictionary.ty(), TypeRef::Dictionary(..)) {
        return Ok(None);
    }

    let key = key.as_constant().and_then(Value::as_str).ok_or_else(|| {
        CompileError::malformed(
            format!("{}.{}", method.declaring, method.name),
            format!("key must be a string constant, found {}", key.kind_name()),
        )
    })?;
    let receiver = if ctx.is_root(dictionary) {
        None
    } else {
        Some(render(dictionary, ctx)?)
    };

    if safe && is_identifier(key) {
        return Ok(Some(match receiver {
            Some(receiver) => format!("{}.{}", receiver, key),
            None => key.to_string(),
        }));
    }
    Ok(Some(format!(
        "{}[{}]",
        receiver.as_deref().unwrap_or("this"),
        literal::quote(key)
    )))
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn render_lambda(
    params: &[Parameter],
    body: &Expr,
    ctx: &mut RenderContext<'_>,
) -> Result<String, CompileError> {
    let [param] = params else {
        return Err(CompileError::unsupported(
            "Lambda",
            format!("expected one parameter, found {}", params.len()),
        ));
    };
    // A nested parameter with the root's name shadows it.
    let saved = ctx.root;
    if saved == Some(param.name.as_str()) {
        ctx.root = None;
    }
    let body = render(body, ctx);
    ctx.root = saved;
    Ok(format!("{}:{}", param.name, body?))
}
