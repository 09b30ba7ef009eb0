// src/builder.rs
use crate::wire::QueryWire;
use querywire_compiler::{Compiler, CompilerOptions, MemberNaming};
use querywire_functions::FunctionRegistry;
use querywire_partition::{ClientEvaluation, PartitionOptions};

/// A builder for creating a [`QueryWire`].
pub struct QueryWireBuilder<'r> {
    registry: &'r FunctionRegistry,
    compiler_options: CompilerOptions,
    partition_options: PartitionOptions,
}

impl Default for QueryWireBuilder<'static> {
    fn default() -> Self {
        Self {
            registry: FunctionRegistry::shared(),
            compiler_options: CompilerOptions::default(),
            partition_options: PartitionOptions::default(),
        }
    }
}

impl QueryWireBuilder<'static> {
    /// Creates a builder over the shared standard registry.
    pub fn new() -> Self {
        Default::default()
    }
}

impl<'r> QueryWireBuilder<'r> {
    /// Uses a caller-built registry instead of the shared one.
    pub fn with_registry<'a>(self, registry: &'a FunctionRegistry) -> QueryWireBuilder<'a> {
        QueryWireBuilder {
            registry,
            compiler_options: self.compiler_options,
            partition_options: self.partition_options,
        }
    }

    pub fn with_member_naming(mut self, naming: MemberNaming) -> Self {
        self.compiler_options = self.compiler_options.with_member_naming(naming);
        self
    }

    /// Keeps enclosing parentheses on predicates when `false`.
    pub fn with_strip_outer_parens(mut self, strip: bool) -> Self {
        self.compiler_options = self.compiler_options.with_strip_outer_parens(strip);
        self
    }

    pub fn with_client_evaluation(mut self, client_evaluation: ClientEvaluation) -> Self {
        self.partition_options = self
            .partition_options
            .with_client_evaluation(client_evaluation);
        self
    }

    /// Consumes the builder and creates the facade.
    pub fn build(self) -> QueryWire<'r> {
        log::debug!(
            "Building query compiler over {} mappings ({:?}, client evaluation {:?})",
            self.registry.len(),
            self.compiler_options.member_naming,
            self.partition_options.client_evaluation
        );
        let compiler = Compiler::new(self.registry).with_options(self.compiler_options);
        QueryWire::new(compiler, self.partition_options)
    }
}
