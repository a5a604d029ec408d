//! Template integrity verification.
//!
//! The bundle is inert data, but its consumers are not forgiving: the
//! renderer binds behavior to fixed element ids, the walkthrough
//! controller assumes a fixed slide count, and the presence layer
//! assumes a well-formed name pool. These checks catch authoring
//! defects when a locale is registered, not at bind time in a browser.
//!
//! The checks are deliberately structural string scans, not a DOM
//! reinterpretation: the same greppable patterns the packaging pass
//! relies on are the patterns verified here.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Empty field | blank payload | `IntegrityError::EmptyTemplate` |
//! | Missing required id | renderer binding target absent | `IntegrityError::MissingElementId` |
//! | Dangling reference | `data-bind-to`/`data-toggles` target undefined | `IntegrityError::DanglingReference` |
//! | Wrong slide count | walkthrough edited | `IntegrityError::SlideCountMismatch` |
//! | Bad name pool | empty/duplicate entries | `IntegrityError::NamePool` |

use std::fmt;

use crate::bundle::{TemplateBundle, TemplateKey};
use crate::names::{NamePool, NamePoolError};

/// Number of slide-section openers the walkthrough controller expects.
///
/// Both the first-time and the help-menu presentation reuse the same
/// sections, so the count must not vary per presentation mode.
pub const WALKTHROUGH_SLIDE_COUNT: usize = 8;

/// The stable opener pattern for a walkthrough slide section.
const SLIDE_OPENER: &str = "<section class=\"togetherjs-walkthrough-slide";

/// Element ids the renderer binds to unconditionally.
///
/// Renaming or dropping any of these breaks the binding contract no
/// matter what the rest of the markup looks like.
pub const REQUIRED_INTERFACE_IDS: &[&str] = &[
    "togetherjs-container",
    "togetherjs-dock",
    "togetherjs-profile-button",
    "togetherjs-share-button",
    "togetherjs-audio-button",
    "togetherjs-chat-button",
    "togetherjs-chat",
    "togetherjs-chat-input",
    "togetherjs-menu",
];

/// Bind targets the renderer instantiates at runtime by cloning dock
/// templates; they have no static definition in the markup.
const DYNAMIC_BIND_TARGETS: &[&str] = &["togetherjs-participantlist-button"];

/// A single integrity defect found in a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    /// A template field was empty.
    EmptyTemplate(TemplateKey),
    /// A required element id is missing from the interface markup.
    MissingElementId(String),
    /// A binding attribute points at an id the fragment never defines.
    DanglingReference {
        /// The attribute carrying the reference.
        attribute: &'static str,
        /// The referenced element id, without the `#`.
        target: String,
    },
    /// The walkthrough slide count differs from the controller contract.
    SlideCountMismatch {
        /// The count the controller expects.
        expected: usize,
        /// The count found in the markup.
        found: usize,
    },
    /// The name pool failed to parse.
    NamePool(NamePoolError),
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTemplate(key) => write!(f, "template '{key}' is empty"),
            Self::MissingElementId(id) => {
                write!(f, "required element id '{id}' missing from interface")
            }
            Self::DanglingReference { attribute, target } => {
                write!(f, "{attribute} references undefined element id '{target}'")
            }
            Self::SlideCountMismatch { expected, found } => {
                write!(f, "walkthrough has {found} slides, controller expects {expected}")
            }
            Self::NamePool(err) => write!(f, "name pool: {err}"),
        }
    }
}

impl std::error::Error for IntegrityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NamePool(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NamePoolError> for IntegrityError {
    fn from(err: NamePoolError) -> Self {
        Self::NamePool(err)
    }
}

/// Collect every `id="..."` attribute value, in document order.
///
/// Duplicate ids are preserved: the reference markup repeats a handful
/// of template ids and the renderer tolerates that, so deduplication
/// here would hide information from the caller.
#[must_use]
pub fn element_ids(html: &str) -> Vec<String> {
    scan_attribute(html, " id=\"")
}

/// Count walkthrough slide-section openers.
///
/// Counts occurrences of the stable `<section class="...-slide` opener
/// pattern; this is the same greppable structural count the controller
/// contract is stated in.
#[must_use]
pub fn count_walkthrough_slides(html: &str) -> usize {
    html.matches(SLIDE_OPENER).count()
}

/// Collect `(attribute, target-id)` pairs for every binding reference.
///
/// Only plain `#id` selectors participate; class and descendant
/// selectors are resolved dynamically by the renderer and cannot be
/// checked statically.
#[must_use]
pub fn reference_targets(html: &str) -> Vec<(&'static str, String)> {
    let mut targets = Vec::new();
    for attribute in ["data-bind-to", "data-toggles"] {
        let needle = format!(" {attribute}=\"");
        for value in scan_attribute(html, &needle) {
            if let Some(id) = value.strip_prefix('#') {
                if !id.is_empty() && !id.contains(' ') {
                    targets.push((attribute, id.to_string()));
                }
            }
        }
    }
    targets
}

/// Run every integrity check against a bundle.
///
/// All defects are collected before returning so a broken locale is
/// reported in one pass.
pub fn verify_bundle(bundle: &TemplateBundle) -> Result<(), Vec<IntegrityError>> {
    let mut errors = Vec::new();

    for key in TemplateKey::ALL {
        if bundle.get(key).trim().is_empty() {
            errors.push(IntegrityError::EmptyTemplate(key));
        }
    }

    let interface = bundle.interface();
    let ids = element_ids(interface);
    for required in REQUIRED_INTERFACE_IDS {
        if !ids.iter().any(|id| id == required) {
            errors.push(IntegrityError::MissingElementId((*required).to_string()));
        }
    }
    for (attribute, target) in reference_targets(interface) {
        if DYNAMIC_BIND_TARGETS.contains(&target.as_str()) {
            continue;
        }
        if !ids.iter().any(|id| *id == target) {
            errors.push(IntegrityError::DanglingReference { attribute, target });
        }
    }

    let found = count_walkthrough_slides(bundle.walkthrough());
    if found != WALKTHROUGH_SLIDE_COUNT {
        errors.push(IntegrityError::SlideCountMismatch {
            expected: WALKTHROUGH_SLIDE_COUNT,
            found,
        });
    }

    if let Err(err) = NamePool::parse(bundle.names()) {
        errors.push(err.into());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Scan for `needle` followed by a `"`-terminated value.
fn scan_attribute(html: &str, needle: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut rest = html;
    while let Some(pos) = rest.find(needle) {
        let after = &rest[pos + needle.len()..];
        match after.find('"') {
            Some(end) => {
                values.push(after[..end].to_string());
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    values
}
