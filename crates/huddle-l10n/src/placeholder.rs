//! Deployment-time placeholder substitution.
//!
//! The bundle markup embeds literal tokens (an absolute asset base URL
//! and product/site sentinels) that the packaging pass resolves once,
//! before the bundle ships. The bundle holds them verbatim; this module
//! is the one place that interprets them.
//!
//! # Invariants
//!
//! 1. **Closed key set**: every substitutable token is named by
//!    [`PlaceholderKey`]; there is no free-form templating.
//!
//! 2. **Lossless**: [`rewrite`] is a pure string substitution. Input
//!    outside the tokens passes through byte-for-byte, and replacement
//!    values are never re-scanned, so a value may safely contain another
//!    token's text.
//!
//! 3. **Non-empty values**: [`Substitutions::set`] rejects empty values;
//!    a key with no useful value is simply not supplied.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Empty value | `set` with `""` | `SubstitutionError::EmptyValue` |
//! | Token absent | supplied key matches nothing | counted as a miss in the report, never an error |
//! | Unknown token in text | text the keys don't name | left untouched |

use std::fmt;

/// The closed set of substitution keys.
///
/// Each key owns exactly one literal token as embedded in the bundle
/// markup. The token text is the contract with the authoring side: it
/// must stay stable and greppable so the rewrite is a pure string
/// substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlaceholderKey {
    /// Absolute base URL of the widget's image/audio assets.
    AssetBase,
    /// Sentinel for the product name shown in copy text.
    ProductName,
    /// Sentinel for the product link URL.
    ProductLink,
    /// Sentinel for the hosting site's name.
    SiteName,
}

impl PlaceholderKey {
    /// All keys, in rewrite scan order.
    pub const ALL: [PlaceholderKey; 4] = [
        PlaceholderKey::AssetBase,
        PlaceholderKey::ProductName,
        PlaceholderKey::ProductLink,
        PlaceholderKey::SiteName,
    ];

    /// The literal token embedded in the bundle markup.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            PlaceholderKey::AssetBase => "http://localhost:8080/togetherjs",
            PlaceholderKey::ProductName => "TOOL_NAME",
            PlaceholderKey::ProductLink => "TOOL_SITE_LINK",
            PlaceholderKey::SiteName => "SITE_NAME",
        }
    }

    /// Stable manifest field name for this key.
    #[must_use]
    pub const fn manifest_name(self) -> &'static str {
        match self {
            PlaceholderKey::AssetBase => "asset_base",
            PlaceholderKey::ProductName => "product_name",
            PlaceholderKey::ProductLink => "product_link",
            PlaceholderKey::SiteName => "site_name",
        }
    }
}

impl fmt::Display for PlaceholderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.manifest_name())
    }
}

/// Errors from building a substitution set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionError {
    /// A key was given an empty (or whitespace-only) value.
    EmptyValue(PlaceholderKey),
}

impl fmt::Display for SubstitutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue(key) => write!(f, "empty substitution value for '{key}'"),
        }
    }
}

impl std::error::Error for SubstitutionError {}

/// A validated set of substitution values.
///
/// Keys not supplied are left untouched by [`rewrite`].
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    // The key set is tiny and closed; a Vec keeps scan order stable.
    values: Vec<(PlaceholderKey, String)>,
}

impl Substitutions {
    /// Create an empty substitution set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply a value for a key, replacing any earlier value.
    pub fn set(
        &mut self,
        key: PlaceholderKey,
        value: impl Into<String>,
    ) -> Result<&mut Self, SubstitutionError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SubstitutionError::EmptyValue(key));
        }
        self.values.retain(|(k, _)| *k != key);
        self.values.push((key, value));
        Ok(self)
    }

    /// Look up the supplied value for a key.
    #[must_use]
    pub fn get(&self, key: PlaceholderKey) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of supplied keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys are supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Supplied keys in [`PlaceholderKey::ALL`] order.
    fn ordered_keys(&self) -> Vec<PlaceholderKey> {
        PlaceholderKey::ALL
            .into_iter()
            .filter(|key| self.get(*key).is_some())
            .collect()
    }
}

/// Per-key replacement count from a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReplacementCount {
    /// The substitution key.
    pub key: PlaceholderKey,
    /// How many times its token was replaced.
    pub occurrences: usize,
}

/// Outcome of a [`rewrite`] pass over one payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RewriteReport {
    /// One entry per supplied key, in scan order.
    pub counts: Vec<ReplacementCount>,
}

impl RewriteReport {
    /// Supplied keys whose token never occurred in the input.
    ///
    /// A miss is a packaging warning, not an error: the payload ships,
    /// but any asset links depending on the value stay broken.
    #[must_use]
    pub fn misses(&self) -> Vec<PlaceholderKey> {
        self.counts
            .iter()
            .filter(|c| c.occurrences == 0)
            .map(|c| c.key)
            .collect()
    }

    /// Total replacements across all keys.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.occurrences).sum()
    }

    /// Merge another report into this one, summing per-key counts.
    pub fn absorb(&mut self, other: &RewriteReport) {
        for entry in &other.counts {
            match self.counts.iter_mut().find(|c| c.key == entry.key) {
                Some(existing) => existing.occurrences += entry.occurrences,
                None => self.counts.push(entry.clone()),
            }
        }
    }
}

/// Replace every supplied token in `text`, single pass, left to right.
///
/// At each position the supplied tokens are tried in
/// [`PlaceholderKey::ALL`] order; on a match the value is emitted and
/// the scan resumes *after* the token, so replacement values are never
/// re-interpreted.
#[must_use]
pub fn rewrite(text: &str, subs: &Substitutions) -> (String, RewriteReport) {
    let keys = subs.ordered_keys();
    let mut counts: Vec<ReplacementCount> = keys
        .iter()
        .map(|&key| ReplacementCount {
            key,
            occurrences: 0,
        })
        .collect();

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'scan: while !rest.is_empty() {
        for (slot, &key) in counts.iter_mut().zip(&keys) {
            let token = key.token();
            if let Some(tail) = rest.strip_prefix(token) {
                // ordered_keys() guarantees the value exists
                if let Some(value) = subs.get(key) {
                    out.push_str(value);
                    slot.occurrences += 1;
                    rest = tail;
                    continue 'scan;
                }
            }
        }
        let Some(ch) = rest.chars().next() else { break };
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    (out, RewriteReport { counts })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(pairs: &[(PlaceholderKey, &str)]) -> Substitutions {
        let mut s = Substitutions::new();
        for (key, value) in pairs {
            s.set(*key, *value).unwrap();
        }
        s
    }

    #[test]
    fn rewrite_replaces_every_occurrence() {
        let s = subs(&[(PlaceholderKey::ProductName, "Huddle")]);
        let (out, report) = rewrite("TOOL_NAME helps. Try TOOL_NAME.", &s);
        assert_eq!(out, "Huddle helps. Try Huddle.");
        assert_eq!(report.total(), 2);
        assert!(report.misses().is_empty());
    }

    #[test]
    fn rewrite_without_tokens_is_identity() {
        let s = subs(&[(PlaceholderKey::AssetBase, "/static")]);
        let (out, report) = rewrite("<div id=\"x\"></div>", &s);
        assert_eq!(out, "<div id=\"x\"></div>");
        assert_eq!(report.misses(), vec![PlaceholderKey::AssetBase]);
    }

    #[test]
    fn unsupplied_tokens_pass_through() {
        let s = subs(&[(PlaceholderKey::ProductName, "Huddle")]);
        let (out, _) = rewrite("TOOL_NAME on SITE_NAME", &s);
        assert_eq!(out, "Huddle on SITE_NAME");
    }

    #[test]
    fn replacement_values_are_not_rescanned() {
        // A product name containing the site sentinel must survive.
        let s = subs(&[
            (PlaceholderKey::ProductName, "SITE_NAME-widget"),
            (PlaceholderKey::SiteName, "example.org"),
        ]);
        let (out, _) = rewrite("TOOL_NAME @ SITE_NAME", &s);
        assert_eq!(out, "SITE_NAME-widget @ example.org");
    }

    #[test]
    fn asset_base_rewrite_keeps_path_suffix() {
        let s = subs(&[(PlaceholderKey::AssetBase, "https://cdn.example.org/huddle")]);
        let (out, report) = rewrite(
            "<img src=\"http://localhost:8080/togetherjs/images/icn.png\">",
            &s,
        );
        assert_eq!(
            out,
            "<img src=\"https://cdn.example.org/huddle/images/icn.png\">"
        );
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn set_rejects_empty_values() {
        let mut s = Substitutions::new();
        assert!(matches!(
            s.set(PlaceholderKey::SiteName, "  "),
            Err(SubstitutionError::EmptyValue(PlaceholderKey::SiteName))
        ));
        assert!(s.is_empty());
    }

    #[test]
    fn set_replaces_earlier_value() {
        let mut s = Substitutions::new();
        s.set(PlaceholderKey::SiteName, "a.org").unwrap();
        s.set(PlaceholderKey::SiteName, "b.org").unwrap();
        assert_eq!(s.get(PlaceholderKey::SiteName), Some("b.org"));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn report_absorb_sums_counts() {
        let s = subs(&[(PlaceholderKey::ProductName, "Huddle")]);
        let (_, mut first) = rewrite("TOOL_NAME", &s);
        let (_, second) = rewrite("TOOL_NAME TOOL_NAME", &s);
        first.absorb(&second);
        assert_eq!(first.total(), 3);
    }

    #[test]
    fn manifest_names_match_display() {
        for key in PlaceholderKey::ALL {
            assert_eq!(key.to_string(), key.manifest_name());
        }
    }
}
