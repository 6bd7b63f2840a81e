// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-call normalization options.

use std::collections::BTreeSet;

/// Options for one normalization call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationContext {
    groups: Option<BTreeSet<String>>,
}

impl NormalizationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict output to attributes in at least one of `groups`.
    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Active group filter, if any.
    pub fn groups(&self) -> Option<&BTreeSet<String>> {
        self.groups.as_ref()
    }

    /// Check whether an attribute tagged with `attribute_groups` is emitted.
    ///
    /// Without a filter everything is emitted. With a filter, an attribute is
    /// emitted only if it shares a group with it; untagged attributes are not.
    pub fn allows<S: AsRef<str>>(&self, attribute_groups: &[S]) -> bool {
        match &self.groups {
            None => true,
            Some(filter) => attribute_groups
                .iter()
                .any(|group| filter.contains(group.as_ref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter_allows_all() {
        let ctx = NormalizationContext::new();
        assert!(ctx.allows(&["g1"]));
        assert!(ctx.allows::<&str>(&[]));
    }

    #[test]
    fn test_group_filter() {
        let ctx = NormalizationContext::new().with_groups(["g2"]);
        assert!(!ctx.allows(&["g1"]));
        assert!(ctx.allows(&["g1", "g2"]));
        assert!(!ctx.allows::<&str>(&[]));

        let ctx = NormalizationContext::new().with_groups(["g1", "g2"]);
        assert!(ctx.allows(&["g1"]));
    }
}
