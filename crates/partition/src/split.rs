use querywire_compiler::CompileError;
use querywire_expr::Expr;

/// The server half of a split: a positional construction over the leaves
/// and its rendered projection text.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerProjection {
    pub expression: Expr,
    pub text: String,
}

/// The outcome of partitioning one selector.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    /// Number of values the server returns per row.
    pub arity: usize,
    /// `None` when nothing is worth evaluating remotely.
    pub server: Option<ServerProjection>,
    /// A one-parameter lambda over the server tuple, or the original
    /// selector when `arity` is zero.
    pub client: Expr,
    /// Why sub-expressions were left to the client.
    pub client_reasons: Vec<CompileError>,
}

impl SplitResult {
    pub(crate) fn local(selector: &Expr, client_reasons: Vec<CompileError>) -> Self {
        Self {
            arity: 0,
            server: None,
            client: selector.clone(),
            client_reasons,
        }
    }

    pub fn server_text(&self) -> Option<&str> {
        self.server.as_ref().map(|server| server.text.as_str())
    }

    /// True when the client lambda only unwraps `Item1`.
    pub fn is_identity(&self) -> bool {
        match self.client.as_lambda() {
            Some(([param], Expr::MemberAccess { target: Some(target), member })) => {
                self.arity == 1 && member.name == "Item1" && target.is_parameter_named(&param.name)
            }
            _ => false,
        }
    }
}
