//! Embedded reference bundles.
//!
//! Payloads live under `assets/<locale>/` and are embedded verbatim:
//! placeholder tokens, CRLF line endings, and the authoring comments
//! are byte-identical to the shipped module. Substitution happens in
//! the packaging pass, never here.

use crate::bundle::TemplateBundle;
use crate::registry::{BundleError, BundleRegistry};

/// Locale tag of the embedded Russian bundle.
pub const RU: &str = "ru";

static RU_INTERFACE: &str = include_str!("../assets/ru/interface.html");
static RU_WALKTHROUGH: &str = include_str!("../assets/ru/walkthrough.html");
static RU_NAMES: &str = include_str!("../assets/ru/names.txt");

/// The embedded Russian reference bundle.
#[must_use]
pub fn ru() -> TemplateBundle {
    TemplateBundle::from_static(RU_INTERFACE, RU_WALKTHROUGH, RU_NAMES)
}

/// A registry holding every embedded locale.
///
/// Registration re-verifies the embedded payloads, so a corrupted asset
/// surfaces here rather than in a consumer.
pub fn builtin() -> Result<BundleRegistry, BundleError> {
    let mut registry = BundleRegistry::new();
    registry.register(RU, ru())?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::verify_bundle;

    #[test]
    fn embedded_ru_bundle_is_valid() {
        assert_eq!(verify_bundle(&ru()), Ok(()));
    }

    #[test]
    fn builtin_registry_serves_ru() {
        let registry = builtin().unwrap();
        assert_eq!(registry.locales(), vec![RU]);
        assert!(registry.get(RU).is_ok());
    }
}
