use std::collections::BTreeMap;
use std::fmt;

/// Handle to an element on a host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Handle to a frame's content window, the target of outbound messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// The document-like surface a frame is mounted on
pub trait Host {
    /// First element matching `selector`, if any
    fn query_selector(&self, selector: &str) -> Option<ElementId>;

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Create a detached frame element
    fn create_frame(&mut self) -> ElementId;

    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// Point a frame at the page it should load
    fn set_src(&mut self, frame: ElementId, url: &str);

    /// Put `new_child` where `old_child` sits in `parent`, detaching `old_child`
    fn replace_child(&mut self, parent: ElementId, new_child: ElementId, old_child: ElementId);

    /// Content window of a frame element; `None` for anything else
    fn content_window(&self, element: ElementId) -> Option<WindowId>;
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    style: BTreeMap<String, String>,
    src: Option<String>,
    window: Option<WindowId>,
}

/// In-memory document used by tests and the CLI.
///
/// Selectors support `#id` and bare tag names. Matches are returned in
/// creation order among elements attached to the document root.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    nodes: BTreeMap<ElementId, Node>,
    root: ElementId,
    next_id: u64,
    replacements: usize,
}

impl MemoryHost {
    /// New document with a single `body` root
    pub fn new() -> Self {
        let root = ElementId::new(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(root, Node::new("body", None));
        Self {
            nodes,
            root,
            next_id: 1,
            replacements: 0,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Create an element and append it under `parent`
    pub fn append_element(&mut self, parent: ElementId, tag: &str, id: Option<&str>) -> ElementId {
        let element = self.insert_node(Node::new(tag, id));
        self.attach(parent, element);
        element
    }

    /// Create a frame element and append it under `parent`
    pub fn append_frame(&mut self, parent: ElementId, id: Option<&str>) -> ElementId {
        let frame = self.create_frame();
        if let (Some(id), Some(node)) = (id, self.nodes.get_mut(&frame)) {
            node.id = Some(id.to_string());
        }
        self.attach(parent, frame);
        frame
    }

    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(&element).map(|node| node.tag.as_str())
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.nodes
            .get(&element)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.nodes
            .get(&element)
            .and_then(|node| node.style.get(property))
            .map(String::as_str)
    }

    pub fn src(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(&element).and_then(|node| node.src.as_deref())
    }

    /// Whether `element` is reachable from the document root
    pub fn is_connected(&self, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.nodes.get(&id).and_then(|node| node.parent);
        }
        false
    }

    /// Number of `replace_child` calls performed so far
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    fn insert_node(&mut self, node: Node) -> ElementId {
        let element = ElementId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(element, node);
        element
    }

    fn attach(&mut self, parent: ElementId, child: ElementId) {
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn matches(node: &Node, selector: &str) -> bool {
        match selector.strip_prefix('#') {
            Some(id) => node.id.as_deref() == Some(id),
            None => node.tag.eq_ignore_ascii_case(selector),
        }
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    fn new(tag: &str, id: Option<&str>) -> Self {
        Self {
            tag: tag.to_string(),
            id: id.map(str::to_string),
            parent: None,
            children: Vec::new(),
            style: BTreeMap::new(),
            src: None,
            window: None,
        }
    }
}

impl Host for MemoryHost {
    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        let selector = selector.trim();
        self.nodes
            .iter()
            .find(|(element, node)| Self::matches(node, selector) && self.is_connected(**element))
            .map(|(element, _)| *element)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(&element).and_then(|node| node.parent)
    }

    fn create_frame(&mut self) -> ElementId {
        let mut node = Node::new("iframe", None);
        node.window = Some(WindowId::new(self.next_id));
        self.insert_node(node)
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.style.insert(property.to_string(), value.to_string());
        }
    }

    fn set_src(&mut self, frame: ElementId, url: &str) {
        if let Some(node) = self.nodes.get_mut(&frame) {
            node.src = Some(url.to_string());
        }
    }

    fn replace_child(&mut self, parent: ElementId, new_child: ElementId, old_child: ElementId) {
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return;
        };
        let Some(slot) = parent_node.children.iter().position(|c| *c == old_child) else {
            return;
        };
        parent_node.children[slot] = new_child;

        if let Some(node) = self.nodes.get_mut(&old_child) {
            node.parent = None;
        }
        if let Some(node) = self.nodes.get_mut(&new_child) {
            node.parent = Some(parent);
        }
        self.replacements += 1;
    }

    fn content_window(&self, element: ElementId) -> Option<WindowId> {
        self.nodes.get(&element).and_then(|node| node.window)
    }
}
