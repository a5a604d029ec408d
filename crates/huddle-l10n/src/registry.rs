//! Locale registry and the process-wide active bundle.
//!
//! # Invariants
//!
//! 1. **Load-time validation**: a bundle that fails integrity checks is
//!    never registered; consumers can assume every served bundle passed
//!    [`crate::verify::verify_bundle`].
//!
//! 2. **Wholesale replacement**: locale switching swaps the whole
//!    `Arc<TemplateBundle>` reference. Readers never observe a bundle
//!    with fields from two locales.
//!
//! 3. **Read freedom**: served bundles are immutable, so any number of
//!    threads may hold and read them without coordination.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::bundle::TemplateBundle;
use crate::verify::{IntegrityError, verify_bundle};

/// Locale identifier (e.g., `"en"`, `"ru"`).
pub type Locale = String;

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    /// No bundle is registered under the requested locale.
    UnknownLocale(String),
    /// The bundle failed integrity verification at registration.
    Integrity {
        /// The locale being registered.
        locale: String,
        /// Every defect found, in check order.
        errors: Vec<IntegrityError>,
    },
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLocale(locale) => write!(f, "no bundle for locale '{locale}'"),
            Self::Integrity { locale, errors } => {
                write!(f, "bundle for locale '{locale}' failed {} check(s)", errors.len())
            }
        }
    }
}

impl std::error::Error for BundleError {}

/// Locale-keyed bundle storage.
///
/// One registered bundle per locale; registration replaces wholesale.
#[derive(Debug, Clone, Default)]
pub struct BundleRegistry {
    bundles: HashMap<Locale, Arc<TemplateBundle>>,
}

impl BundleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bundle under a locale, verifying it first.
    ///
    /// Every locale must satisfy the same structural contract as the
    /// reference bundle (slide count included); a locale that does not
    /// is rejected here rather than failing in the renderer later.
    pub fn register(
        &mut self,
        locale: impl Into<String>,
        bundle: TemplateBundle,
    ) -> Result<(), BundleError> {
        let locale = locale.into();
        if let Err(errors) = verify_bundle(&bundle) {
            for error in &errors {
                tracing::warn!(%locale, %error, "bundle integrity check failed");
            }
            return Err(BundleError::Integrity { locale, errors });
        }
        tracing::debug!(%locale, "registered locale bundle");
        self.bundles.insert(locale, Arc::new(bundle));
        Ok(())
    }

    /// Retrieve the bundle for a locale.
    pub fn get(&self, locale: &str) -> Result<Arc<TemplateBundle>, BundleError> {
        self.bundles
            .get(locale)
            .cloned()
            .ok_or_else(|| BundleError::UnknownLocale(locale.to_string()))
    }

    /// Registered locale tags, sorted for deterministic output.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Number of registered locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Whether no locales are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

/// The process-wide currently selected bundle.
///
/// Holds one `Arc<TemplateBundle>` behind a lock that is only ever used
/// to publish a replacement reference; readers clone the `Arc` and read
/// lock-free from then on.
#[derive(Debug)]
pub struct ActiveBundle {
    current: RwLock<Arc<TemplateBundle>>,
}

impl ActiveBundle {
    /// Create with an initial bundle.
    #[must_use]
    pub fn new(initial: Arc<TemplateBundle>) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Snapshot the current bundle.
    #[must_use]
    pub fn load(&self) -> Arc<TemplateBundle> {
        self.current
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Publish a replacement bundle, returning the one it displaced.
    pub fn swap(&self, next: Arc<TemplateBundle>) -> Arc<TemplateBundle> {
        let mut slot = self
            .current
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        std::mem::replace(&mut *slot, next)
    }
}
