//! Attribute names the engine consumes.

/// On a template node: declares a component, `tag` or `tag.modifier`.
pub const COMPONENT: &str = "component";

/// On a template child of an instance: names the target slot for its content.
pub const SLOT: &str = "slot";

/// On a `slot` placeholder element: the slot's name.
pub const NAME: &str = "name";

/// Repetition directive marker on a template wrapper.
pub const FOR: &str = "for";

/// Conditional directive marker on a template wrapper.
pub const IF: &str = "if";

/// Prefix for bound property attributes, e.g. `prop:count="items + 1"`.
pub const PROP_PREFIX: &str = "prop:";

/// Internal attribute marking an upgraded instance with its runtime id.
pub const ELEMENT_ID: &str = "data-graft-id";

/// Tag name of slot placeholder elements.
pub const SLOT_TAG: &str = "slot";
