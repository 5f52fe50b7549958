//! Component registry and markup-driven registration.

use graft_core::{attrs, ComponentDefinition, DisplayMode, Document, ExpandError, Node};
use indexmap::IndexMap;

/// A registry of component definitions keyed by tag name.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: IndexMap<String, ComponentDefinition>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            components: IndexMap::new(),
        }
    }

    /// Register a component definition. Registration is check-then-insert:
    /// defining a tag that already exists is a no-op, and this returns
    /// `false` to signal it.
    pub fn define(&mut self, component: ComponentDefinition) -> bool {
        if self.components.contains_key(&component.tag) {
            return false;
        }
        self.components.insert(component.tag.clone(), component);
        true
    }

    /// Get a component by tag name.
    pub fn get(&self, tag: &str) -> Option<&ComponentDefinition> {
        self.components.get(tag)
    }

    /// Check if a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.components.contains_key(tag)
    }

    /// All registered tag names, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(|s| s.as_str())
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The generated display rules for every registered tag, one per line.
    pub fn stylesheet(&self) -> String {
        self.components
            .values()
            .map(|def| display_rule(&def.tag, def.display))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The CSS display rule generated for a registered tag.
pub fn display_rule(tag: &str, display: DisplayMode) -> String {
    format!("{tag} {{ display: {}; }}", display.css_value())
}

/// Parse a `component` attribute value: `tag` or `tag.modifier`.
pub fn parse_component_attr(value: &str) -> Result<(String, DisplayMode), ExpandError> {
    let (tag, display) = match value.split_once('.') {
        Some((tag, modifier)) => {
            let display = DisplayMode::from_modifier(modifier).ok_or_else(|| {
                ExpandError::InvalidComponentAttribute {
                    value: value.to_string(),
                    reason: format!("unknown display modifier {modifier:?}"),
                }
            })?;
            (tag, display)
        }
        None => (value, DisplayMode::default()),
    };
    if tag.is_empty() {
        return Err(ExpandError::InvalidComponentAttribute {
            value: value.to_string(),
            reason: "empty tag name".to_string(),
        });
    }
    Ok((tag.to_string(), display))
}

/// Scan the live tree for template nodes carrying a `component` attribute,
/// register each, and remove the definition nodes from the tree. Template
/// content is not scanned; definitions nested inside other templates stay
/// inert.
pub fn collect_definitions(
    doc: &mut Document,
    registry: &mut ComponentRegistry,
) -> Result<(), ExpandError> {
    collect_from(&mut doc.roots, registry)
}

fn collect_from(
    nodes: &mut Vec<Node>,
    registry: &mut ComponentRegistry,
) -> Result<(), ExpandError> {
    let mut i = 0;
    while i < nodes.len() {
        let is_definition =
            matches!(&nodes[i], Node::Template(t) if t.has_attr(attrs::COMPONENT));
        if is_definition {
            let Node::Template(template) = nodes.remove(i) else {
                unreachable!("checked above");
            };
            let value = template
                .attr(attrs::COMPONENT)
                .unwrap_or_default()
                .to_string();
            let (tag, display) = parse_component_attr(&value)?;
            registry.define(
                ComponentDefinition::new(tag, template.content).with_display(display),
            );
        } else {
            if let Node::Element(el) = &mut nodes[i] {
                collect_from(&mut el.children, registry)?;
            }
            i += 1;
        }
    }
    Ok(())
}

/// Builder for creating component definitions programmatically.
pub struct ComponentBuilder {
    tag: String,
    display: DisplayMode,
    template: Vec<Node>,
}

impl ComponentBuilder {
    /// Create a new component builder.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            display: DisplayMode::default(),
            template: Vec::new(),
        }
    }

    /// Set the display mode.
    pub fn display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    /// Set the template content.
    pub fn template(mut self, template: Vec<Node>) -> Self {
        self.template = template;
        self
    }

    /// Build the component definition.
    pub fn build(self) -> ComponentDefinition {
        ComponentDefinition::new(self.tag, self.template).with_display(self.display)
    }
}
