//! The immutable three-field template bundle.
//!
//! A bundle is pure data: three string payloads addressed by a closed
//! key set. Construction never parses or rewrites the payloads; the
//! placeholder tokens embedded in the markup are held verbatim for the
//! packaging pass to resolve (see [`crate::placeholder`]).

use std::borrow::Cow;
use std::fmt;

/// The fixed set of logical keys a locale bundle maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    /// The full static UI markup of the widget (dock, chat, modals).
    Interface,
    /// The onboarding carousel markup.
    Walkthrough,
    /// The comma-separated anonymous display-name pool.
    Names,
}

impl TemplateKey {
    /// All keys, in bundle-field order.
    pub const ALL: [TemplateKey; 3] = [
        TemplateKey::Interface,
        TemplateKey::Walkthrough,
        TemplateKey::Names,
    ];

    /// Stable string name, matching the key the host loader uses.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TemplateKey::Interface => "interface",
            TemplateKey::Walkthrough => "walkthrough",
            TemplateKey::Names => "names",
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One locale's template bundle.
///
/// Immutable after construction. Repeated [`TemplateBundle::get`] calls
/// return identical strings; locale switching replaces the whole bundle
/// reference (see [`crate::registry::ActiveBundle`]), never individual
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBundle {
    interface: Cow<'static, str>,
    walkthrough: Cow<'static, str>,
    names: Cow<'static, str>,
}

impl TemplateBundle {
    /// Create a bundle from owned payloads.
    #[must_use]
    pub fn new(
        interface: impl Into<String>,
        walkthrough: impl Into<String>,
        names: impl Into<String>,
    ) -> Self {
        Self {
            interface: Cow::Owned(interface.into()),
            walkthrough: Cow::Owned(walkthrough.into()),
            names: Cow::Owned(names.into()),
        }
    }

    /// Create a bundle from embedded static payloads without copying.
    #[must_use]
    pub const fn from_static(
        interface: &'static str,
        walkthrough: &'static str,
        names: &'static str,
    ) -> Self {
        Self {
            interface: Cow::Borrowed(interface),
            walkthrough: Cow::Borrowed(walkthrough),
            names: Cow::Borrowed(names),
        }
    }

    /// Look up a payload by key.
    #[must_use]
    pub fn get(&self, key: TemplateKey) -> &str {
        match key {
            TemplateKey::Interface => &self.interface,
            TemplateKey::Walkthrough => &self.walkthrough,
            TemplateKey::Names => &self.names,
        }
    }

    /// The static UI markup.
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// The onboarding carousel markup.
    #[must_use]
    pub fn walkthrough(&self) -> &str {
        &self.walkthrough
    }

    /// The raw comma-separated name pool.
    #[must_use]
    pub fn names(&self) -> &str {
        &self.names
    }
}
