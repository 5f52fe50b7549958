//! The document upgrade pipeline.
//!
//! An upgrade pass walks the live tree, resolves slots for every
//! registered instance element it finds, publishes the presence map,
//! binds `prop:` attributes through the prop bridge, and defers the
//! content swap onto the commit queue. [`process_document`] drives passes
//! and drains to a fixpoint so instances nested inside committed content
//! get upgraded too.

use std::collections::HashMap;
use std::fmt;

use graft_core::{attrs, Document, ElementNode, ExpandError, Node, Value};
use graft_scope::{PropScope, Scope};
use indexmap::IndexMap;

use crate::commit::CommitQueue;
use crate::registry::{collect_definitions, ComponentRegistry};
use crate::resolver::resolve;

/// Upper bound on upgrade/commit rounds; hit only by a component whose
/// template instantiates itself.
pub const MAX_UPGRADE_PASSES: u32 = 100;

/// Scope name under which an instance's slot presence map is published.
pub const SLOTS_VAR: &str = "$slots";

/// Runtime identity of an upgraded element, carried in an internal
/// attribute so deferred commits can address it across tree edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

impl ElementId {
    /// Read an element's id back from its marker attribute.
    pub fn of(el: &ElementNode) -> Option<ElementId> {
        el.attr(attrs::ELEMENT_ID)?.parse().ok().map(ElementId)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-element runtime state: the scope chain and prop containers the
/// host framework would otherwise hang off live element objects.
#[derive(Debug)]
pub struct Runtime {
    root: Scope,
    next_id: u64,
    outer_scopes: HashMap<ElementId, Scope>,
    props: HashMap<ElementId, PropScope>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_root_scope(Scope::root())
    }

    /// Use an existing scope as the outermost frame for all elements.
    pub fn with_root_scope(root: Scope) -> Self {
        Self {
            root,
            next_id: 1,
            outer_scopes: HashMap::new(),
            props: HashMap::new(),
        }
    }

    pub fn root_scope(&self) -> &Scope {
        &self.root
    }

    fn mint(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The scope descendant evaluation should chain through for an
    /// element: its prop container when one exists, its outer scope
    /// otherwise.
    pub fn element_scope(&self, id: ElementId) -> Option<&Scope> {
        self.props
            .get(&id)
            .map(|p| p.scope())
            .or_else(|| self.outer_scopes.get(&id))
    }

    /// The element's prop container, if any property is bound.
    pub fn props_of(&self, id: ElementId) -> Option<&PropScope> {
        self.props.get(&id)
    }

    /// Tear down one bound property. The container is discarded when its
    /// last accessor goes.
    pub fn unbind_prop(&mut self, id: ElementId, name: &str) {
        let empty = match self.props.get_mut(&id) {
            Some(props) => props.unbind(name),
            None => return,
        };
        if empty {
            self.props.remove(&id);
        }
    }
}

/// Run one upgrade pass over the live tree. Returns how many instances
/// were upgraded; their content swaps are on `queue`.
pub fn upgrade_document(
    doc: &mut Document,
    registry: &ComponentRegistry,
    runtime: &mut Runtime,
    queue: &mut CommitQueue,
) -> Result<u32, ExpandError> {
    upgrade_nodes(&mut doc.roots, registry, runtime, queue)
}

fn upgrade_nodes(
    nodes: &mut [Node],
    registry: &ComponentRegistry,
    runtime: &mut Runtime,
    queue: &mut CommitQueue,
) -> Result<u32, ExpandError> {
    let mut upgraded = 0;
    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            if registry.contains(&el.tag) && !el.has_attr(attrs::ELEMENT_ID) {
                upgraded += upgrade_instance(el, registry, runtime, queue)?;
            } else {
                upgraded += upgrade_nodes(&mut el.children, registry, runtime, queue)?;
            }
        }
    }
    Ok(upgraded)
}

fn upgrade_instance(
    el: &mut ElementNode,
    registry: &ComponentRegistry,
    runtime: &mut Runtime,
    queue: &mut CommitQueue,
) -> Result<u32, ExpandError> {
    let Some(def) = registry.get(&el.tag) else {
        return Ok(0);
    };

    let id = runtime.mint();
    el.set_attr(attrs::ELEMENT_ID, id.to_string());

    // content is cleared now; the swap lands after this pass
    let instance_children = std::mem::take(&mut el.children);
    let resolved = resolve(def, instance_children);

    let outer = runtime.root.child();

    // presence lives on the element's own frame, not the prop container,
    // so it survives prop teardown; published before binding so binding
    // expressions can see it
    let presence: IndexMap<String, Value> = resolved
        .slots
        .iter()
        .map(|(name, filled)| (name.clone(), Value::Bool(*filled)))
        .collect();
    outer.define(SLOTS_VAR, Value::Map(presence));

    let bindings: Vec<(String, String)> = el
        .attrs
        .iter()
        .filter_map(|(name, value)| {
            name.strip_prefix(attrs::PROP_PREFIX)
                .map(|prop| (prop.to_string(), value.clone()))
        })
        .collect();
    if !bindings.is_empty() {
        // container created on first bound property only
        let mut props = PropScope::new(&outer);
        for (name, source) in bindings {
            // a malformed binding degrades to an unbound property
            let _ = props.bind(&name, &source);
        }
        if !props.is_empty() {
            runtime.props.insert(id, props);
        }
    }
    runtime.outer_scopes.insert(id, outer);

    let id_attr = id.to_string();
    let children = resolved.children;
    queue.defer(move |doc| {
        if let Some(el) = doc.find_element_mut(|el| el.attr(attrs::ELEMENT_ID) == Some(&id_attr)) {
            el.children = children;
        }
    });
    Ok(1)
}

/// Register definitions from markup, then upgrade and commit to a
/// fixpoint: instances revealed by committed content are picked up on the
/// following pass.
pub fn process_document(
    doc: &mut Document,
    registry: &mut ComponentRegistry,
    runtime: &mut Runtime,
) -> Result<(), ExpandError> {
    collect_definitions(doc, registry)?;
    let mut queue = CommitQueue::new();
    for _ in 0..MAX_UPGRADE_PASSES {
        let upgraded = upgrade_document(doc, registry, runtime, &mut queue)?;
        if upgraded == 0 && queue.is_empty() {
            return Ok(());
        }
        queue.run_until_idle(doc);
    }
    Err(ExpandError::MaxDepthExceeded {
        depth: MAX_UPGRADE_PASSES,
    })
}
