//! Component expansion for Graft documents.
//!
//! This crate handles:
//! - The component registry and markup-driven registration
//! - Slot resolution: matching fills to placeholders, merging duplicates,
//!   falling back to placeholder content
//! - The deferred commit queue (build-then-swap)
//! - The document upgrade pipeline, including the prop bridge wiring

mod commit;
mod registry;
mod resolver;
mod upgrade;

pub use commit::CommitQueue;
pub use registry::{
    collect_definitions, display_rule, parse_component_attr, ComponentBuilder, ComponentRegistry,
};
pub use resolver::{resolve, PresenceMap, Resolved, DEFAULT_SLOT};
pub use upgrade::{
    process_document, upgrade_document, ElementId, Runtime, MAX_UPGRADE_PASSES, SLOTS_VAR,
};
