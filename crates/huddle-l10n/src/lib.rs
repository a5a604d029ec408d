#![forbid(unsafe_code)]

//! Locale template bundles for the Huddle collaboration widget.
//!
//! This crate provides:
//! - [`TemplateBundle`] — the immutable three-field bundle (`interface`,
//!   `walkthrough`, `names`) a locale ships to the widget
//! - [`BundleRegistry`] and [`ActiveBundle`] for locale lookup and
//!   wholesale atomic locale switching
//! - [`NamePool`] — the ordered anonymous-participant alias pool
//! - Deployment-time placeholder substitution ([`placeholder`])
//! - Template integrity verification ([`verify`])
//!
//! The bundle itself is inert data: it performs no parsing or
//! transformation of its payloads. Everything that can go wrong belongs
//! to a collaborator (renderer, presence, packaging) and is surfaced
//! through [`verify`] and [`placeholder`] before the data ships.

/// The immutable three-field template bundle.
pub mod bundle;
/// Embedded reference bundles.
pub mod locales;
/// Ordered anonymous-participant name pool.
pub mod names;
/// Deployment-time placeholder substitution.
pub mod placeholder;
/// Locale registry and the process-wide active bundle.
pub mod registry;
/// Template integrity verification.
pub mod verify;

pub use bundle::{TemplateBundle, TemplateKey};
pub use names::{NamePool, NamePoolError};
pub use placeholder::{
    PlaceholderKey, RewriteReport, SubstitutionError, Substitutions, rewrite,
};
pub use registry::{ActiveBundle, BundleError, BundleRegistry, Locale};
pub use verify::{IntegrityError, verify_bundle};
