// src/wire.rs
use crate::error::QueryWireError;
use crate::uri::QueryOptions;
use querywire_compiler::{CompileError, Compiler};
use querywire_expr::Expr;
use querywire_partition::{PartitionOptions, Partitioner, SplitResult};

/// Compiles predicates and selectors with one fixed configuration.
#[derive(Debug, Clone)]
pub struct QueryWire<'r> {
    compiler: Compiler<'r>,
    partition_options: PartitionOptions,
}

impl<'r> QueryWire<'r> {
    pub(crate) fn new(compiler: Compiler<'r>, partition_options: PartitionOptions) -> Self {
        Self {
            compiler,
            partition_options,
        }
    }

    pub fn compiler(&self) -> &Compiler<'r> {
        &self.compiler
    }

    /// `$filter` text for a one-parameter predicate lambda.
    pub fn filter(&self, predicate: &Expr) -> Result<String, CompileError> {
        self.compiler.compile_predicate(predicate)
    }

    /// `$select` text for a one-parameter selector lambda.
    pub fn select(&self, selector: &Expr) -> Result<String, CompileError> {
        self.compiler.compile_projection(selector)
    }

    /// Splits a selector between the server and the client.
    pub fn partition(&self, selector: &Expr) -> Result<SplitResult, CompileError> {
        Partitioner::new(&self.compiler)
            .with_options(self.partition_options.clone())
            .partition(selector)
    }

    /// Query options for an optional predicate and an optional selector. A
    /// selector is split first and only its server half is sent.
    pub fn query_options(
        &self,
        predicate: Option<&Expr>,
        selector: Option<&Expr>,
    ) -> Result<(QueryOptions, Option<SplitResult>), QueryWireError> {
        let mut options = QueryOptions::new();
        if let Some(predicate) = predicate {
            options = options.with_filter(self.filter(predicate)?);
        }
        let split = match selector {
            Some(selector) => {
                let split = self.partition(selector)?;
                if let Some(text) = split.server_text() {
                    options = options.with_select(text);
                }
                Some(split)
            }
            None => None,
        };
        Ok((options, split))
    }
}
