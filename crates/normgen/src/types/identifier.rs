// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fully-qualified type names used as cache keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Fully-qualified name of a data type (e.g. `app::model::Person`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeIdentifier(Arc<str>);

impl TypeIdentifier {
    /// Namespace separator.
    pub const SEPARATOR: &'static str = "::";

    /// Create an identifier; a leading `::` is dropped.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        let name = name.strip_prefix(Self::SEPARATOR).unwrap_or(name);
        Self(Arc::from(name))
    }

    /// Identifier of a Rust type, as reported by the compiler.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bare name, without namespace. Generic arguments stay attached.
    pub fn short_name(&self) -> &str {
        match self.separators().last() {
            Some(idx) => &self.0[idx + Self::SEPARATOR.len()..],
            None => &self.0,
        }
    }

    /// Namespace part, `None` for a bare name.
    pub fn namespace(&self) -> Option<&str> {
        self.separators()
            .last()
            .map(|idx| &self.0[..idx])
            .filter(|ns| !ns.is_empty())
    }

    /// Path segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        let mut segments = Vec::new();
        let mut start = 0;
        for idx in self.separators() {
            segments.push(&self.0[start..idx]);
            start = idx + Self::SEPARATOR.len();
        }
        segments.push(&self.0[start..]);
        segments.into_iter().filter(|s| !s.is_empty())
    }

    /// Byte offsets of the separators outside generic arguments, tuples and arrays.
    fn separators(&self) -> impl Iterator<Item = usize> + '_ {
        let bytes = self.0.as_bytes();
        let mut depth = 0usize;
        let mut idx = 0;
        std::iter::from_fn(move || {
            while idx < bytes.len() {
                let at = idx;
                idx += 1;
                match bytes[at] {
                    b'<' | b'(' | b'[' => depth += 1,
                    // `->` in fn types does not close anything.
                    b'>' if at > 0 && bytes[at - 1] == b'-' => {}
                    b'>' | b')' | b']' => depth = depth.saturating_sub(1),
                    b':' if depth == 0 && bytes.get(at + 1) == Some(&b':') => {
                        idx = at + Self::SEPARATOR.len();
                        return Some(at);
                    }
                    _ => {}
                }
            }
            None
        })
    }
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeIdentifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeIdentifier {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for TypeIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
