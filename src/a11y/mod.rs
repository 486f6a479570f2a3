//! Accessibility Attribute Normalizer - ARIA roles for icon subtrees
//!
//! Icon components wrap inline SVG markup that screen readers otherwise
//! misreport. Given a subtree description and a decorative/functional
//! classification, this module plans the role/hidden/label attributes the
//! subtree should carry:
//! - decorative icons become presentational and hidden
//! - functional icons get an explicit or auto-detected role, a fallback
//!   `aria-label`, and keyboard reachability when they act as buttons
//! - the inner SVG elements themselves are always stripped of their own role
//!
//! The normalization is idempotent; hosts re-plan on every update of the
//! owning component, including after subtree mutations.
//!
//! # Example
//!
//! ```ignore
//! use spark_widgets::a11y::{normalize, Element, IconAria};
//!
//! let mut icon = Element::new("span").with_child(Element::new("svg"));
//! normalize(&mut icon, &IconAria { decorative: true, ..Default::default() });
//!
//! assert_eq!(icon.attr("role"), Some("presentation"));
//! assert_eq!(icon.attr("aria-hidden"), Some("true"));
//! ```

pub mod tree;

pub use tree::{apply, AttrEdit, Element};

use bitflags::bitflags;

/// Fallback label for icons resolved as buttons.
const DEFAULT_BUTTON_LABEL: &str = "icon button";

/// Fallback label for non-button functional icons.
const DEFAULT_ICON_LABEL: &str = "icon";

/// Resolved ARIA role for an icon root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconRole {
    Presentation,
    Img,
    Button,
}

impl IconRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Presentation => "presentation",
            Self::Img => "img",
            Self::Button => "button",
        }
    }
}

/// Classification of an icon subtree, read-only per invocation.
#[derive(Debug, Clone, Default)]
pub struct IconAria {
    /// Purely visual: hide the subtree from assistive technology.
    pub decorative: bool,
    /// Explicit role; wins over auto-detection.
    pub role: Option<IconRole>,
    /// Resolve to `button` when the root shows interactivity signals.
    pub auto_detect_button: bool,
}

bitflags! {
    /// Signals that an icon root behaves interactively.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InteractivitySignals: u8 {
        const TAB_INDEX = 1;
        const CLICK_HANDLER = 1 << 1;
        const KEY_HANDLER = 1 << 2;
        /// Framework event-binding attributes (`@click`, `v-on:...`).
        const FRAMEWORK_BINDING = 1 << 3;
    }
}

/// Inspect the root element for interactivity signals.
pub fn detect_interactivity(root: &Element) -> InteractivitySignals {
    let mut signals = InteractivitySignals::empty();

    if root.has_attr("tabindex") {
        signals |= InteractivitySignals::TAB_INDEX;
    }
    for name in root.attr_names() {
        match name {
            "onclick" | "ondblclick" => signals |= InteractivitySignals::CLICK_HANDLER,
            "onkeydown" | "onkeyup" | "onkeypress" => {
                signals |= InteractivitySignals::KEY_HANDLER;
            }
            _ if name.starts_with('@') || name.starts_with("v-on:") => {
                signals |= InteractivitySignals::FRAMEWORK_BINDING;
            }
            _ => {}
        }
    }

    signals
}

fn resolve_role(root: &Element, config: &IconAria) -> IconRole {
    if let Some(role) = config.role {
        return role;
    }
    if config.auto_detect_button && !detect_interactivity(root).is_empty() {
        return IconRole::Button;
    }
    IconRole::Img
}

/// Plan the attribute edits that normalize an icon subtree.
///
/// Returns an empty plan when the root has no SVG descendant. The root is
/// addressed by the empty path, SVG descendants by their child-index paths.
pub fn plan(root: &Element, config: &IconAria) -> Vec<AttrEdit> {
    let svg_paths = root.descendant_paths_by_tag("svg");
    if svg_paths.is_empty() {
        return Vec::new();
    }

    let mut edits = Vec::new();
    let root_path: Vec<usize> = Vec::new();

    if config.decorative {
        edits.push(AttrEdit::set(root_path.clone(), "role", "presentation"));
        edits.push(AttrEdit::set(root_path, "aria-hidden", "true"));
    } else {
        let role = resolve_role(root, config);
        edits.push(AttrEdit::set(root_path.clone(), "role", role.as_str()));

        // Never clobber an author-provided label
        if !root.has_attr("aria-label") {
            let label = if role == IconRole::Button {
                DEFAULT_BUTTON_LABEL
            } else {
                DEFAULT_ICON_LABEL
            };
            edits.push(AttrEdit::set(root_path.clone(), "aria-label", label));
        }

        edits.push(AttrEdit::remove(root_path.clone(), "aria-hidden"));

        if role == IconRole::Button && !root.has_attr("tabindex") {
            edits.push(AttrEdit::set(root_path, "tabindex", "0"));
        }
    }

    // The SVG elements never carry their own role; their hidden state
    // follows the classification.
    for path in svg_paths {
        edits.push(AttrEdit::remove(path.clone(), "role"));
        if config.decorative {
            edits.push(AttrEdit::set(path, "aria-hidden", "true"));
        } else {
            edits.push(AttrEdit::remove(path, "aria-hidden"));
        }
    }

    edits
}

/// Plan and apply in one step, for hosts whose tree lives in this
/// representation.
pub fn normalize(root: &mut Element, config: &IconAria) {
    let edits = plan(root, config);
    apply(root, &edits);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn icon_root() -> Element {
        Element::new("span").with_child(
            Element::new("svg")
                .with_attr("role", "img")
                .with_attr("viewBox", "0 0 24 24"),
        )
    }

    #[test]
    fn test_no_svg_is_noop() {
        let root = Element::new("span").with_child(Element::new("img"));
        let config = IconAria {
            decorative: true,
            ..Default::default()
        };
        assert!(plan(&root, &config).is_empty());
    }

    #[test]
    fn test_decorative_path() {
        let mut root = icon_root();
        normalize(
            &mut root,
            &IconAria {
                decorative: true,
                ..Default::default()
            },
        );

        assert_eq!(root.attr("role"), Some("presentation"));
        assert_eq!(root.attr("aria-hidden"), Some("true"));

        let svg = root.node_at(&[0]).unwrap();
        assert!(!svg.has_attr("role"));
        assert_eq!(svg.attr("aria-hidden"), Some("true"));
    }

    #[test]
    fn test_default_role_is_img() {
        let mut root = icon_root();
        normalize(&mut root, &IconAria::default());

        assert_eq!(root.attr("role"), Some("img"));
        assert_eq!(root.attr("aria-label"), Some("icon"));
        assert!(!root.has_attr("aria-hidden"));
        assert!(!root.has_attr("tabindex"));
    }

    #[test]
    fn test_explicit_role_wins_over_auto_detection() {
        let mut root = icon_root().with_attr("onclick", "");
        normalize(
            &mut root,
            &IconAria {
                role: Some(IconRole::Img),
                auto_detect_button: true,
                ..Default::default()
            },
        );

        assert_eq!(root.attr("role"), Some("img"));
        assert!(!root.has_attr("tabindex"));
    }

    #[test]
    fn test_auto_detected_button() {
        let mut root = icon_root().with_attr("@click", "toggle");
        normalize(
            &mut root,
            &IconAria {
                auto_detect_button: true,
                ..Default::default()
            },
        );

        assert_eq!(root.attr("role"), Some("button"));
        assert_eq!(root.attr("aria-label"), Some("icon button"));
        assert_eq!(root.attr("tabindex"), Some("0"));
    }

    #[test]
    fn test_button_keeps_existing_tabindex() {
        let mut root = icon_root().with_attr("tabindex", "-1");
        normalize(
            &mut root,
            &IconAria {
                auto_detect_button: true,
                ..Default::default()
            },
        );

        assert_eq!(root.attr("role"), Some("button"));
        assert_eq!(root.attr("tabindex"), Some("-1"));
    }

    #[test]
    fn test_existing_label_preserved() {
        let mut root = icon_root().with_attr("aria-label", "Close dialog");
        normalize(&mut root, &IconAria::default());

        assert_eq!(root.attr("aria-label"), Some("Close dialog"));
    }

    #[test]
    fn test_functional_path_unhides() {
        let mut root = icon_root().with_attr("aria-hidden", "true");
        normalize(&mut root, &IconAria::default());

        assert!(!root.has_attr("aria-hidden"));
        let svg = root.node_at(&[0]).unwrap();
        assert!(!svg.has_attr("aria-hidden"));
        assert!(!svg.has_attr("role"));
    }

    #[test]
    fn test_detect_interactivity() {
        let root = Element::new("span");
        assert!(detect_interactivity(&root).is_empty());

        let root = Element::new("span")
            .with_attr("tabindex", "0")
            .with_attr("onkeydown", "")
            .with_attr("v-on:click", "go");
        let signals = detect_interactivity(&root);
        assert!(signals.contains(InteractivitySignals::TAB_INDEX));
        assert!(signals.contains(InteractivitySignals::KEY_HANDLER));
        assert!(signals.contains(InteractivitySignals::FRAMEWORK_BINDING));
        assert!(!signals.contains(InteractivitySignals::CLICK_HANDLER));
    }

    #[test]
    fn test_idempotent() {
        for config in [
            IconAria {
                decorative: true,
                ..Default::default()
            },
            IconAria::default(),
            IconAria {
                auto_detect_button: true,
                ..Default::default()
            },
            IconAria {
                role: Some(IconRole::Button),
                ..Default::default()
            },
        ] {
            let mut root = icon_root();
            normalize(&mut root, &config);
            let once = root.clone();
            normalize(&mut root, &config);
            assert_eq!(root, once);
        }
    }

    #[test]
    fn test_nested_svgs_all_normalized() {
        let mut root = Element::new("span")
            .with_child(Element::new("svg"))
            .with_child(Element::new("div").with_child(Element::new("svg").with_attr("role", "img")));

        normalize(
            &mut root,
            &IconAria {
                decorative: true,
                ..Default::default()
            },
        );

        for path in [vec![0], vec![1, 0]] {
            let svg = root.node_at(&path).unwrap();
            assert!(!svg.has_attr("role"));
            assert_eq!(svg.attr("aria-hidden"), Some("true"));
        }
    }
}
