//! Slot resolution.
//!
//! Given a component definition and the children of an instance element,
//! collect content fills, locate slot placeholders in a clone of the
//! template, and substitute fills for placeholders. Placeholders without a
//! matching fill keep their own fallback children; fills naming the same
//! slot concatenate in document order.

use graft_core::{attrs, ComponentDefinition, Node};
use indexmap::IndexMap;

/// Name used for content not targeted at a named slot.
pub const DEFAULT_SLOT: &str = "default";

/// Per-instance record of which slot names received a fill. Only filled
/// names appear; all map to `true`.
pub type PresenceMap = IndexMap<String, bool>;

/// The output of slot resolution for one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The instance's new children.
    pub children: Vec<Node>,
    /// Which slot names were filled.
    pub slots: PresenceMap,
}

/// Resolve an instance's content against its component definition.
///
/// `instance_children` are consumed: fill nodes move into the resolved
/// tree exactly once.
pub fn resolve(def: &ComponentDefinition, instance_children: Vec<Node>) -> Resolved {
    let (mut fills, slots) = collect_fills(instance_children);
    let children = substitute(def.template.clone(), &mut fills);
    Resolved { children, slots }
}

/// Walk the instance's direct children and group them into fills by slot
/// name, in encounter order.
fn collect_fills(children: Vec<Node>) -> (IndexMap<String, Vec<Node>>, PresenceMap) {
    let mut fills: IndexMap<String, Vec<Node>> = IndexMap::new();
    for node in children {
        match node {
            Node::Template(template) => {
                let slot_name = template.attr(attrs::SLOT).map(str::to_string);
                match slot_name {
                    Some(name) => {
                        fills.entry(name).or_default().extend(template.content);
                    }
                    None if template.has_attr(attrs::FOR) || template.has_attr(attrs::IF) => {
                        // keep the wrapper so the directive stays live
                        fills
                            .entry(DEFAULT_SLOT.to_string())
                            .or_default()
                            .push(Node::Template(template));
                    }
                    None => {
                        fills
                            .entry(DEFAULT_SLOT.to_string())
                            .or_default()
                            .extend(template.content);
                    }
                }
            }
            node if node.is_blank_text() => {}
            node => {
                fills
                    .entry(DEFAULT_SLOT.to_string())
                    .or_default()
                    .push(node);
            }
        }
    }
    let slots = fills.keys().map(|name| (name.clone(), true)).collect();
    (fills, slots)
}

/// Depth-first placeholder substitution over a cloned template.
///
/// Recurses into descendant templates that are not themselves component
/// definitions, so slots inside conditional/repeated regions resolve too.
/// Each fill is taken out of the map on first use; a second placeholder
/// with the same name falls back to its own content.
fn substitute(nodes: Vec<Node>, fills: &mut IndexMap<String, Vec<Node>>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Element(el) if el.tag == attrs::SLOT_TAG => {
                let name = el.attr(attrs::NAME).unwrap_or(DEFAULT_SLOT).to_string();
                match fills.swap_remove(&name) {
                    Some(fill) => out.extend(fill),
                    None => out.extend(substitute(el.children, fills)),
                }
            }
            Node::Element(mut el) => {
                el.children = substitute(std::mem::take(&mut el.children), fills);
                out.push(Node::Element(el));
            }
            Node::Template(template) if template.has_attr(attrs::COMPONENT) => {
                // nested component definition: its placeholders are not ours
                out.push(Node::Template(template));
            }
            Node::Template(mut template) => {
                template.content = substitute(std::mem::take(&mut template.content), fills);
                out.push(Node::Template(template));
            }
            text => out.push(text),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComponentBuilder;
    use graft_core::{ElementNode, TemplateNode};

    fn slot(name: Option<&str>, fallback: Vec<Node>) -> Node {
        let mut el = ElementNode::new(attrs::SLOT_TAG);
        if let Some(name) = name {
            el.set_attr(attrs::NAME, name);
        }
        Node::Element(el.with_children(fallback))
    }

    fn named_fill(name: &str, content: Vec<Node>) -> Node {
        Node::Template(
            TemplateNode::new()
                .with_attr(attrs::SLOT, name)
                .with_content(content),
        )
    }

    #[test]
    fn test_empty_instance_no_fallback_renders_empty_default() {
        let def = ComponentBuilder::new("x-box")
            .template(vec![Node::element("div", vec![slot(None, vec![])])])
            .build();
        let resolved = resolve(&def, vec![]);
        assert_eq!(resolved.children, vec![Node::element("div", vec![])]);
        assert!(resolved.slots.is_empty());
    }

    #[test]
    fn test_single_default_fill_rendered_verbatim() {
        let def = ComponentBuilder::new("x-box")
            .template(vec![Node::element("div", vec![slot(None, vec![])])])
            .build();

        let resolved = resolve(&def, vec![Node::text("hello & <world>")]);
        assert_eq!(
            resolved.children,
            vec![Node::element("div", vec![Node::text("hello & <world>")])]
        );
        assert_eq!(resolved.slots.get(DEFAULT_SLOT), Some(&true));
    }

    #[test]
    fn test_loose_element_joins_default_fill_whole() {
        let def = ComponentBuilder::new("x-box")
            .template(vec![slot(None, vec![])])
            .build();
        let child = Node::element("p", vec![Node::text("body")]);
        let resolved = resolve(&def, vec![child.clone()]);
        assert_eq!(resolved.children, vec![child]);
    }

    #[test]
    fn test_named_slot_fallback_when_unfilled() {
        // template defines <slot name="header">Default Header</slot>
        let def = ComponentBuilder::new("x-card")
            .template(vec![slot(Some("header"), vec![Node::text("Default Header")])])
            .build();

        let resolved = resolve(&def, vec![]);
        assert_eq!(resolved.children, vec![Node::text("Default Header")]);
        // fallback use is not presence
        assert!(!resolved.slots.contains_key("header"));
    }

    #[test]
    fn test_duplicate_named_fills_merge_in_order() {
        let def = ComponentBuilder::new("x-card")
            .template(vec![slot(Some("header"), vec![Node::text("Default Header")])])
            .build();

        let resolved = resolve(
            &def,
            vec![
                named_fill("header", vec![Node::text("Header 1")]),
                named_fill("header", vec![Node::text("Header 2")]),
            ],
        );
        assert_eq!(
            resolved.children,
            vec![Node::text("Header 1"), Node::text("Header 2")]
        );
        assert_eq!(resolved.slots.get("header"), Some(&true));
    }

    #[test]
    fn test_presence_only_for_filled_names() {
        let def = ComponentBuilder::new("x-card")
            .template(vec![
                slot(Some("header"), vec![Node::text("fallback")]),
                slot(None, vec![]),
            ])
            .build();

        let resolved = resolve(&def, vec![Node::text("body text")]);
        assert_eq!(resolved.slots.get(DEFAULT_SLOT), Some(&true));
        assert!(!resolved.slots.contains_key("header"));
    }

    #[test]
    fn test_blank_text_dropped_from_default_fill() {
        let def = ComponentBuilder::new("x-box")
            .template(vec![slot(None, vec![Node::text("fallback")])])
            .build();

        // whitespace-only loose text does not count as a fill
        let resolved = resolve(&def, vec![Node::text("  \n  ")]);
        assert_eq!(resolved.children, vec![Node::text("fallback")]);
        assert!(resolved.slots.is_empty());
    }

    #[test]
    fn test_template_defined_whitespace_is_kept() {
        let def = ComponentBuilder::new("x-box")
            .template(vec![slot(None, vec![Node::text("fallback")])])
            .build();

        let resolved = resolve(
            &def,
            vec![Node::template(vec![Node::text("   ")])],
        );
        assert_eq!(resolved.children, vec![Node::text("   ")]);
        assert_eq!(resolved.slots.get(DEFAULT_SLOT), Some(&true));
    }

    #[test]
    fn test_directive_wrapper_passes_through_unopened() {
        let def = ComponentBuilder::new("x-list")
            .template(vec![slot(None, vec![])])
            .build();

        let wrapper = TemplateNode::new()
            .with_attr(attrs::FOR, "item in items")
            .with_content(vec![Node::element("li", vec![])]);
        let resolved = resolve(&def, vec![Node::Template(wrapper.clone())]);
        assert_eq!(resolved.children, vec![Node::Template(wrapper)]);
    }

    #[test]
    fn test_slot_inside_conditional_region_resolves() {
        let def = ComponentBuilder::new("x-card")
            .template(vec![Node::Template(
                TemplateNode::new()
                    .with_attr(attrs::IF, "open")
                    .with_content(vec![slot(Some("body"), vec![])]),
            )])
            .build();

        let resolved = resolve(&def, vec![named_fill("body", vec![Node::text("inner")])]);
        assert_eq!(
            resolved.children,
            vec![Node::Template(
                TemplateNode::new()
                    .with_attr(attrs::IF, "open")
                    .with_content(vec![Node::text("inner")]),
            )]
        );
    }

    #[test]
    fn test_nested_component_definition_is_skipped() {
        let inner_def = TemplateNode::new()
            .with_attr(attrs::COMPONENT, "x-inner")
            .with_content(vec![slot(Some("header"), vec![Node::text("inner default")])]);
        let def = ComponentBuilder::new("x-outer")
            .template(vec![
                Node::Template(inner_def.clone()),
                slot(Some("header"), vec![]),
            ])
            .build();

        let resolved = resolve(
            &def,
            vec![named_fill("header", vec![Node::text("outer header")])],
        );
        // the fill lands in the outer slot; the nested definition is untouched
        assert_eq!(
            resolved.children,
            vec![Node::Template(inner_def), Node::text("outer header")]
        );
    }

    #[test]
    fn test_fill_moves_once_second_placeholder_falls_back() {
        let def = ComponentBuilder::new("x-twice")
            .template(vec![
                slot(Some("x"), vec![Node::text("first fallback")]),
                slot(Some("x"), vec![Node::text("second fallback")]),
            ])
            .build();

        let resolved = resolve(&def, vec![named_fill("x", vec![Node::text("fill")])]);
        assert_eq!(
            resolved.children,
            vec![Node::text("fill"), Node::text("second fallback")]
        );
    }

    #[test]
    fn test_mixed_named_and_default_fills() {
        let def = ComponentBuilder::new("x-card")
            .template(vec![Node::element(
                "article",
                vec![
                    Node::element("header", vec![slot(Some("header"), vec![])]),
                    Node::element("main", vec![slot(None, vec![])]),
                ],
            )])
            .build();

        let resolved = resolve(
            &def,
            vec![
                named_fill("header", vec![Node::text("Title")]),
                Node::text("Body"),
                Node::element("em", vec![Node::text("more")]),
            ],
        );
        assert_eq!(
            resolved.children,
            vec![Node::element(
                "article",
                vec![
                    Node::element("header", vec![Node::text("Title")]),
                    Node::element(
                        "main",
                        vec![
                            Node::text("Body"),
                            Node::element("em", vec![Node::text("more")]),
                        ]
                    ),
                ],
            )]
        );
        assert_eq!(resolved.slots.get("header"), Some(&true));
        assert_eq!(resolved.slots.get(DEFAULT_SLOT), Some(&true));
    }

    #[test]
    fn test_unnamed_template_fill_unwraps_into_default() {
        let def = ComponentBuilder::new("x-box")
            .template(vec![slot(None, vec![])])
            .build();

        let resolved = resolve(
            &def,
            vec![Node::template(vec![
                Node::text("a"),
                Node::element("b", vec![]),
            ])],
        );
        assert_eq!(
            resolved.children,
            vec![Node::text("a"), Node::element("b", vec![])]
        );
    }
}
