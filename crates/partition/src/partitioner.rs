//! Splits a selector lambda between the server and the client.

use crate::split::{ServerProjection, SplitResult};
use crate::state::PartitionState;
use querywire_compiler::{CompileError, Compiler, root_lambda};
use querywire_expr::{Expr, Parameter};
use querywire_types::TypeRef;
use std::convert::Infallible;

/// Whether sub-expressions the server cannot evaluate may run locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClientEvaluation {
    #[default]
    Allowed,
    /// Any unsupported sub-expression fails the split.
    Forbidden,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionOptions {
    pub client_evaluation: ClientEvaluation,
}

impl PartitionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client_evaluation(mut self, client_evaluation: ClientEvaluation) -> Self {
        self.client_evaluation = client_evaluation;
        self
    }
}

/// Partitions selectors using a compiler's notion of what the server supports.
pub struct Partitioner<'c, 'r> {
    compiler: &'c Compiler<'r>,
    options: PartitionOptions,
}

impl<'c, 'r> Partitioner<'c, 'r> {
    pub fn new(compiler: &'c Compiler<'r>) -> Self {
        Self {
            compiler,
            options: PartitionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PartitionOptions) -> Self {
        self.options = options;
        self
    }

    /// Splits `selector` into a server tuple projection and a client lambda.
    ///
    /// Leaves are discovered in one pre-order, left-to-right walk and numbered
    /// in the order they are first seen; identical leaves share a slot.
    /// Nested lambdas are never split.
    pub fn partition(&self, selector: &Expr) -> Result<SplitResult, CompileError> {
        let (root, body) = root_lambda(selector)?;
        let mut state = PartitionState::new(root, fresh_tuple_name(selector));
        let rewritten = self.visit(body, &mut state);

        if self.options.client_evaluation == ClientEvaluation::Forbidden && state.cause_count() > 0 {
            let (_, causes) = state.into_parts();
            log::debug!("Client evaluation forbidden; {} unsupported sub-expressions", causes.len());
            return Err(CompileError::aggregate(causes));
        }

        if state.leaf_count() == 0 || state.is_bare_root() {
            let (_, causes) = state.into_parts();
            log::debug!("Selector stays client-side ({} reasons)", causes.len());
            return Ok(SplitResult::local(selector, causes));
        }

        let tuple_name = state.tuple_name().to_string();
        let (leaves, client_reasons) = state.into_parts();
        let tuple_ty = TypeRef::Tuple(leaves.iter().map(Expr::ty).collect());
        let tuple_param = Parameter::new(tuple_name.clone(), tuple_ty);
        let client_body = rewritten.replace_parameter(&tuple_name, &Expr::Parameter(tuple_param.clone()));
        let client = Expr::lambda(vec![tuple_param], client_body);

        let arity = leaves.len();
        let expression = Expr::tuple(leaves);
        let text = self
            .compiler
            .compile_projection_body(&expression, Some(&root.name))?;

        log::debug!(
            "Partitioned selector into {} server slots: {} ({} client reasons)",
            arity,
            text,
            client_reasons.len()
        );
        for reason in &client_reasons {
            log::debug!("Client-side: {}", reason);
        }

        Ok(SplitResult {
            arity,
            server: Some(ServerProjection { expression, text }),
            client,
            client_reasons,
        })
    }

    fn visit(&self, node: &Expr, state: &mut PartitionState<'_>) -> Expr {
        let root = state.root;

        if !node.references_parameter(&root.name) {
            if self.options.client_evaluation == ClientEvaluation::Forbidden {
                self.record_unsupported(node, state);
            }
            return node.clone();
        }

        if let Expr::Lambda { .. } = node {
            let slot = state.root_slot();
            let placeholder = state.placeholder(slot, root.ty.clone());
            return node.replace_parameter(&root.name, &placeholder);
        }

        let classified = self.compiler.classify(node, Some(&root.name));
        let allowed = self.options.client_evaluation == ClientEvaluation::Allowed;
        match classified {
            Ok(compiled) if !(compiled.prefer_local && allowed) => {
                let slot = state.slot_for(compiled.text, node);
                log::trace!("{} leaf in slot {}", node.kind_name(), slot);
                state.leaf_placeholder(slot, node.ty())
            }
            outcome => {
                let recorded = state.cause_count();
                let mapped: Result<Expr, Infallible> =
                    node.try_map_children(|child| Ok(self.visit(child, state)));
                let rewritten = match mapped {
                    Ok(expr) => expr,
                    Err(never) => match never {},
                };
                if let Err(cause) = outcome
                    && state.cause_count() == recorded
                    && !matches!(node, Expr::NewValue { .. } | Expr::ListInit { .. })
                {
                    log::debug!("{} node stays client-side: {}", node.kind_name(), cause);
                    state.record(cause);
                }
                rewritten
            }
        }
    }

    /// Records why a root-independent node could not run on the server.
    /// Construction nodes are looked through to their arguments.
    fn record_unsupported(&self, node: &Expr, state: &mut PartitionState<'_>) {
        let root = state.root;
        let Err(cause) = self.compiler.classify(node, Some(&root.name)) else {
            return;
        };
        if matches!(node, Expr::NewValue { .. } | Expr::ListInit { .. }) {
            for child in node.children() {
                self.record_unsupported(child, state);
            }
        } else {
            log::debug!("{} node cannot run on the server: {}", node.kind_name(), cause);
            state.record(cause);
        }
    }
}

/// `t`, or the first of `t0`, `t1`, .. not already used in the selector.
fn fresh_tuple_name(selector: &Expr) -> String {
    let taken = selector.parameter_names();
    if !taken.contains("t") {
        return "t".to_string();
    }
    let mut i = 0usize;
    loop {
        let candidate = format!("t{}", i);
        if !taken.contains(&candidate) {
            return candidate;
        }
        i += 1;
    }
}
