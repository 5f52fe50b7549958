//! Component definitions.

use crate::node::Node;

/// A component definition: a template tree bound to a tag name.
/// Immutable after registration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentDefinition {
    /// The custom tag name instances use.
    pub tag: String,
    /// Display mode from the definition's style-modifier segment.
    pub display: DisplayMode,
    /// The component's template content.
    pub template: Vec<Node>,
}

impl ComponentDefinition {
    pub fn new(tag: impl Into<String>, template: Vec<Node>) -> Self {
        Self {
            tag: tag.into(),
            display: DisplayMode::default(),
            template,
        }
    }

    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }
}

/// Display mode for a registered tag, selected by the optional modifier
/// segment of the `component` attribute (`tag.inline`, `tag.none`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayMode {
    #[default]
    Block,
    Inline,
    None,
}

impl DisplayMode {
    /// Parse a modifier segment. Unknown modifiers are rejected.
    pub fn from_modifier(modifier: &str) -> Option<Self> {
        match modifier {
            "block" => Some(Self::Block),
            "inline" => Some(Self::Inline),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// The CSS `display` value for the generated rule.
    pub fn css_value(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Inline => "inline",
            Self::None => "none",
        }
    }
}
