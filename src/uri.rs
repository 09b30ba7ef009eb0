// src/uri.rs
//! Query-option assembly and the fixed value encoding used on the wire.

use itertools::Itertools;
use std::fmt::{self, Write};

/// Percent-encodes a query-option value.
///
/// Letters, digits and `' . ~ - _ ) ( $` pass through, a space becomes `+`,
/// and every other byte of the UTF-8 encoding becomes `%XX`.
pub fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'\''
            | b'.'
            | b'~'
            | b'-'
            | b'_'
            | b')'
            | b'('
            | b'$' => out.push(byte as char),
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}

/// The system query options of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub filter: Option<String>,
    pub select: Option<String>,
    pub order_by: Option<String>,
    pub top: Option<u64>,
    pub skip: Option<u64>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn with_top(mut self, top: u64) -> Self {
        self.top = Some(top);
        self
    }

    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }

    /// `name=value` pairs in canonical order with values encoded.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(filter) = &self.filter {
            pairs.push(("$filter", encode_query_value(filter)));
        }
        if let Some(select) = &self.select {
            pairs.push(("$select", encode_query_value(select)));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push(("$orderby", encode_query_value(order_by)));
        }
        if let Some(top) = self.top {
            pairs.push(("$top", top.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("$skip", skip.to_string()));
        }
        pairs
    }
}

impl fmt::Display for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .pairs()
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .join("&");
        f.write_str(&joined)
    }
}
