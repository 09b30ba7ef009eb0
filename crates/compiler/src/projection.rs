//! Projection (`$select`) rendering.
//!
//! A projection root that constructs a value is flattened into `expr as name`
//! pairs; anything else renders as a single `expr as this`.

use crate::compiler::{Compiler, root_lambda};
use crate::error::CompileError;
use querywire_expr::Expr;
use querywire_types::Value;

impl Compiler<'_> {
    /// Renders a one-parameter selector lambda as a projection.
    pub fn compile_projection(&self, selector: &Expr) -> Result<String, CompileError> {
        let (param, body) = root_lambda(selector)?;
        self.compile_projection_body(body, Some(&param.name))
    }

    /// Renders a projection body with `this` as the root parameter.
    pub fn compile_projection_body(
        &self,
        body: &Expr,
        this: Option<&str>,
    ) -> Result<String, CompileError> {
        match body {
            Expr::NewValue { members, args, .. } => {
                let mut fields = Vec::with_capacity(args.len());
                for (i, arg) in args.iter().enumerate() {
                    let name = members
                        .as_ref()
                        .and_then(|names| names.get(i).cloned())
                        .unwrap_or_else(|| format!("Item{}", i + 1));
                    fields.push(format!("{} as {}", self.compile(arg, this)?, name));
                }
                Ok(fields.join(","))
            }
            Expr::ListInit { initializers, .. } => match keyed_pairs(initializers) {
                Some(pairs) => {
                    let mut fields = Vec::with_capacity(pairs.len());
                    for (key, value) in pairs {
                        fields.push(format!("{} as {}", self.compile(value, this)?, key));
                    }
                    Ok(fields.join(","))
                }
                None => Ok(format!("{} as this", self.compile(body, this)?)),
            },
            _ => Ok(format!("{} as this", self.compile(body, this)?)),
        }
    }
}

/// `Add(key, value)` initializers with string-constant keys and non-null values.
fn keyed_pairs(initializers: &[Vec<Expr>]) -> Option<Vec<(&str, &Expr)>> {
    initializers
        .iter()
        .map(|init| match init.as_slice() {
            [key, value] if !value.is_null_constant() => key
                .as_constant()
                .and_then(Value::as_str)
                .map(|key| (key, value)),
            _ => None,
        })
        .collect()
}
