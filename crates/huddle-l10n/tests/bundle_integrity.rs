//! Deployment-gating checks against the embedded reference bundle.

use huddle_l10n::bundle::TemplateKey;
use huddle_l10n::placeholder::{PlaceholderKey, Substitutions, rewrite};
use huddle_l10n::verify::{
    WALKTHROUGH_SLIDE_COUNT, count_walkthrough_slides, element_ids, reference_targets,
    verify_bundle,
};
use huddle_l10n::{NamePool, locales};

#[test]
fn ru_bundle_passes_verification() {
    assert_eq!(verify_bundle(&locales::ru()), Ok(()));
}

#[test]
fn repeated_retrieval_is_bit_identical() {
    let bundle = locales::ru();
    for key in TemplateKey::ALL {
        let first = bundle.get(key);
        let second = bundle.get(key);
        assert!(!first.is_empty());
        assert_eq!(first, second);
        // Static payloads are served without copying.
        assert!(std::ptr::eq(first, second));
    }
}

#[test]
fn chat_input_control_exists() {
    assert!(locales::ru().interface().contains("togetherjs-chat-input"));
}

#[test]
fn walkthrough_has_the_contracted_slide_count() {
    let bundle = locales::ru();
    assert_eq!(
        count_walkthrough_slides(bundle.walkthrough()),
        WALKTHROUGH_SLIDE_COUNT
    );
    assert_eq!(WALKTHROUGH_SLIDE_COUNT, 8);
}

#[test]
fn name_pool_matches_the_reference_sequence() {
    let bundle = locales::ru();
    let split: Vec<&str> = bundle.names().split(", ").collect();
    assert_eq!(split.len(), 9);
    assert_eq!(split[0], "Лысый Лис");

    let pool = NamePool::parse(bundle.names()).unwrap();
    assert_eq!(pool.len(), 9);
    let first: Vec<&str> = pool.names().take(1).collect();
    assert_eq!(first, vec!["Лысый Лис"]);
}

#[test]
fn name_assignment_follows_reference_order() {
    let bundle = locales::ru();
    let mut pool = NamePool::parse(bundle.names()).unwrap();
    assert_eq!(pool.assign(), Some("Лысый Лис"));
    assert_eq!(pool.assign(), Some("Большой Бобёр"));
    for _ in 0..7 {
        assert!(pool.assign().is_some());
    }
    assert_eq!(pool.assign(), None);
}

#[test]
fn static_bind_references_resolve() {
    let bundle = locales::ru();
    let ids = element_ids(bundle.interface());
    for (attribute, target) in reference_targets(bundle.interface()) {
        // The participant-list dock button is cloned from a template at
        // runtime; everything else must be statically defined.
        if target == "togetherjs-participantlist-button" {
            continue;
        }
        assert!(
            ids.iter().any(|id| *id == target),
            "{attribute} -> #{target} does not resolve"
        );
    }
}

#[test]
fn placeholder_tokens_are_held_verbatim() {
    let bundle = locales::ru();
    let interface = bundle.interface();
    let walkthrough = bundle.walkthrough();
    for key in PlaceholderKey::ALL {
        let token = key.token();
        assert!(
            interface.contains(token) || walkthrough.contains(token),
            "token for '{key}' not present in markup"
        );
    }
    // The names payload carries no placeholders.
    for key in PlaceholderKey::ALL {
        assert!(!bundle.names().contains(key.token()));
    }
}

#[test]
fn product_link_rewrite_consumes_the_whole_sentinel() {
    let bundle = locales::ru();
    let mut subs = Substitutions::new();
    subs.set(PlaceholderKey::ProductLink, "https://huddle.example.org")
        .unwrap();

    let (out, report) = rewrite(bundle.interface(), &subs);
    assert_eq!(report.total(), 1);
    assert!(!out.contains("TOOL_SITE_LINK"));
    // The sentinel is replaced whole, never by prefix.
    assert!(!out.contains("https://huddle.example.org_LINK"));
    assert!(!out.contains("_LINK"));
}

#[test]
fn no_token_is_a_prefix_of_another() {
    for a in PlaceholderKey::ALL {
        for b in PlaceholderKey::ALL {
            if a != b {
                assert!(
                    !b.token().starts_with(a.token()),
                    "token for '{a}' is a prefix of the token for '{b}'"
                );
            }
        }
    }
}

#[test]
fn full_rewrite_leaves_no_sentinel_text() {
    let bundle = locales::ru();
    let mut subs = Substitutions::new();
    subs.set(PlaceholderKey::AssetBase, "/static/huddle").unwrap();
    subs.set(PlaceholderKey::ProductName, "Huddle").unwrap();
    subs.set(PlaceholderKey::ProductLink, "https://huddle.example.org")
        .unwrap();
    subs.set(PlaceholderKey::SiteName, "example.org").unwrap();

    for key in [TemplateKey::Interface, TemplateKey::Walkthrough] {
        let (out, report) = rewrite(bundle.get(key), &subs);
        for token in PlaceholderKey::ALL.map(PlaceholderKey::token) {
            assert!(!out.contains(token), "'{token}' survived in {key}");
        }
        assert!(!out.contains("_LINK"), "sentinel remnant in {key}");
        assert!(report.total() > 0);
    }
}

#[test]
fn payloads_keep_their_crlf_line_endings() {
    let bundle = locales::ru();
    assert!(bundle.interface().contains("\r\n"));
    assert!(bundle.walkthrough().contains("\r\n"));
}
