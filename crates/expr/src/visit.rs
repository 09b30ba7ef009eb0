//! Child traversal and tree rewriting.
//!
//! Children are always visited left to right in source order; callers that
//! assign positions during a walk rely on this.

use crate::ast::{Expr, Parameter};
use std::collections::BTreeSet;
use std::convert::Infallible;

impl Expr {
    /// Direct children in pre-order, left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Binary { left, right, .. } => vec![&**left, &**right],
            Expr::Unary { operand, .. } => vec![&**operand],
            Expr::MemberAccess { target, .. } => target.iter().map(|t| &**t).collect(),
            Expr::MethodCall { target, args, .. } => {
                target.iter().map(|t| &**t).chain(args.iter()).collect()
            }
            Expr::TypeTest { target, .. } => vec![&**target],
            Expr::Lambda { body, .. } => vec![&**body],
            Expr::Conditional {
                test,
                then,
                otherwise,
                ..
            } => vec![&**test, &**then, &**otherwise],
            Expr::ArrayLiteral { elements, .. } => elements.iter().collect(),
            Expr::NewValue { args, .. } => args.iter().collect(),
            Expr::ListInit { initializers, .. } => initializers.iter().flatten().collect(),
            Expr::Constant { .. } | Expr::Parameter(_) => Vec::new(),
        }
    }

    /// Rebuilds this node with every direct child replaced by `f(child)`.
    /// Children are visited in the same order as [`Expr::children`].
    pub fn try_map_children<E>(
        &self,
        mut f: impl FnMut(&Expr) -> Result<Expr, E>,
    ) -> Result<Expr, E> {
        let mut boxed = |e: &Expr| f(e).map(Box::new);
        Ok(match self {
            Expr::Binary {
                op,
                left,
                right,
                ty,
            } => Expr::Binary {
                op: *op,
                left: boxed(left)?,
                right: boxed(right)?,
                ty: ty.clone(),
            },
            Expr::Unary { kind, operand, ty } => Expr::Unary {
                kind: *kind,
                operand: boxed(operand)?,
                ty: ty.clone(),
            },
            Expr::MemberAccess { target, member } => Expr::MemberAccess {
                target: target.as_deref().map(&mut boxed).transpose()?,
                member: member.clone(),
            },
            Expr::MethodCall {
                target,
                method,
                args,
            } => {
                let target = target.as_deref().map(&mut boxed).transpose()?;
                let args = args
                    .iter()
                    .map(|a| boxed(a).map(|b| *b))
                    .collect::<Result<Vec<_>, E>>()?;
                Expr::MethodCall {
                    target,
                    method: method.clone(),
                    args,
                }
            }
            Expr::TypeTest { target, tested } => Expr::TypeTest {
                target: boxed(target)?,
                tested: tested.clone(),
            },
            Expr::Lambda { params, body } => Expr::Lambda {
                params: params.clone(),
                body: boxed(body)?,
            },
            Expr::Conditional {
                test,
                then,
                otherwise,
                ty,
            } => Expr::Conditional {
                test: boxed(test)?,
                then: boxed(then)?,
                otherwise: boxed(otherwise)?,
                ty: ty.clone(),
            },
            Expr::ArrayLiteral { elements, ty } => Expr::ArrayLiteral {
                elements: elements
                    .iter()
                    .map(|e| boxed(e).map(|b| *b))
                    .collect::<Result<_, E>>()?,
                ty: ty.clone(),
            },
            Expr::NewValue { members, args, ty } => Expr::NewValue {
                members: members.clone(),
                args: args
                    .iter()
                    .map(|a| boxed(a).map(|b| *b))
                    .collect::<Result<_, E>>()?,
                ty: ty.clone(),
            },
            Expr::ListInit { initializers, ty } => Expr::ListInit {
                initializers: initializers
                    .iter()
                    .map(|init| {
                        init.iter()
                            .map(|a| boxed(a).map(|b| *b))
                            .collect::<Result<Vec<_>, E>>()
                    })
                    .collect::<Result<_, E>>()?,
                ty: ty.clone(),
            },
            Expr::Constant { .. } | Expr::Parameter(_) => self.clone(),
        })
    }

    /// True when a free occurrence of parameter `name` appears in the tree.
    /// Nested lambdas that rebind `name` shadow it.
    pub fn references_parameter(&self, name: &str) -> bool {
        match self {
            Expr::Parameter(p) => p.name == name,
            Expr::Lambda { params, body } => {
                !binds(params, name) && body.references_parameter(name)
            }
            _ => self
                .children()
                .into_iter()
                .any(|child| child.references_parameter(name)),
        }
    }

    /// Replaces every free occurrence of parameter `name` with `replacement`.
    pub fn replace_parameter(&self, name: &str, replacement: &Expr) -> Expr {
        let result: Result<Expr, Infallible> = match self {
            Expr::Parameter(p) if p.name == name => Ok(replacement.clone()),
            Expr::Lambda { params, .. } if binds(params, name) => Ok(self.clone()),
            _ => self.try_map_children(|child| Ok(child.replace_parameter(name, replacement))),
        };
        match result {
            Ok(expr) => expr,
            Err(never) => match never {},
        }
    }

    /// Every parameter name bound or referenced anywhere in the tree.
    pub fn parameter_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        collect_names(self, &mut names);
        names
    }
}

fn binds(params: &[Parameter], name: &str) -> bool {
    params.iter().any(|p| p.name == name)
}

fn collect_names(expr: &Expr, names: &mut BTreeSet<String>) {
    match expr {
        Expr::Parameter(p) => {
            names.insert(p.name.clone());
        }
        Expr::Lambda { params, .. } => {
            names.extend(params.iter().map(|p| p.name.clone()));
        }
        _ => {}
    }
    for child in expr.children() {
        collect_names(child, names);
    }
}
