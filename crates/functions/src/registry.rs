//! Defines the registry of member-to-wire mappings.

use crate::builtins;
use crate::error::TemplateError;
use crate::template::render_template;
use once_cell::sync::Lazy;
use querywire_types::MemberSignature;
use std::collections::HashMap;

/// Whether a mapped function renders as `target.fn(args)` or `fn(target,args)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStyle {
    Chained,
    Static,
}

/// How one member renders on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub signature: MemberSignature,
    pub preferred_style: CallStyle,
    pub chained_template: String,
    pub static_template: String,
    /// Renderable, but evaluating on the client is preferred when a
    /// projection is split.
    pub prefer_local: bool,
}

impl MappingEntry {
    pub fn new(
        signature: MemberSignature,
        preferred_style: CallStyle,
        chained_template: impl Into<String>,
        static_template: impl Into<String>,
    ) -> Self {
        Self {
            signature,
            preferred_style,
            chained_template: chained_template.into(),
            static_template: static_template.into(),
            prefer_local: false,
        }
    }

    /// Builds both templates for a plain wire function of `arity` arguments:
    /// `name(a0,..)` and `a0.name(a1,..)`.
    pub fn function(
        signature: MemberSignature,
        preferred_style: CallStyle,
        wire_name: &str,
        arity: usize,
    ) -> Self {
        let placeholders: Vec<String> = (0..arity).map(|i| format!("{{{}}}", i)).collect();
        let static_template = format!("{}({})", wire_name, placeholders.join(","));
        let chained_template = match placeholders.split_first() {
            Some((receiver, rest)) => format!("{}.{}({})", receiver, wire_name, rest.join(",")),
            None => static_template.clone(),
        };
        Self::new(signature, preferred_style, chained_template, static_template)
    }

    pub fn prefer_local(mut self) -> Self {
        self.prefer_local = true;
        self
    }

    pub fn template(&self, style: CallStyle) -> &str {
        match style {
            CallStyle::Chained => &self.chained_template,
            CallStyle::Static => &self.static_template,
        }
    }

    /// Renders the preferred template over already-rendered arguments
    /// (receiver first for instance members).
    pub fn render(&self, args: &[String]) -> Result<String, TemplateError> {
        render_template(self.template(self.preferred_style), args)
    }
}

static SHARED: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::default);

/// Signature-keyed mapping table.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    entries: HashMap<MemberSignature, MappingEntry>,
}

impl FunctionRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The process-wide default registry, built on first use.
    pub fn shared() -> &'static FunctionRegistry {
        &SHARED
    }

    /// Registers a mapping, returning the one it replaced.
    pub fn register(&mut self, entry: MappingEntry) -> Option<MappingEntry> {
        self.entries.insert(entry.signature.clone(), entry)
    }

    pub fn try_resolve(&self, signature: &MemberSignature) -> Option<&MappingEntry> {
        self.entries.get(signature)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.values()
    }
}

impl Default for FunctionRegistry {
    /// Creates a new registry populated with the standard mappings.
    fn default() -> Self {
        let mut registry = Self::new();
        builtins::register_all(&mut registry);
        log::debug!("Function registry built with {} mappings", registry.len());
        registry
    }
}
