// crates/apksplit-xml/src/model.rs

//! In-memory XML tree.
//!
//! Namespace declarations are nodes of their own that wrap the element they
//! were declared on, so a document that declares `xmlns:android` on
//! `<manifest>` has a [`Namespace`] root whose only child is the `manifest`
//! [`Element`]. Names are stored with resolved namespace URIs, never prefixes.

use apksplit::diag::Source;
use apksplit::{Item, ResourceId};

/// The attribute definition a compiled attribute refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AaptAttribute {
    pub id: Option<ResourceId>,
}

impl AaptAttribute {
    pub fn with_id(id: ResourceId) -> Self {
        Self { id: Some(id) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribute {
    pub namespace_uri: String,
    pub name: String,
    /// The source text of the value.
    pub value: String,
    pub compiled_attribute: Option<AaptAttribute>,
    /// The typed value, when the attribute has been compiled.
    pub compiled_value: Option<Item>,
}

/// How an attribute's value should be read. A compiled value takes precedence
/// over the text it was compiled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValue<'a> {
    Compiled(&'a Item),
    Text(&'a str),
    None,
}

impl Attribute {
    pub fn new(
        namespace_uri: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace_uri: namespace_uri.into(),
            name: name.into(),
            value: value.into(),
            compiled_attribute: None,
            compiled_value: None,
        }
    }

    /// Attaches the attribute id and typed value.
    pub fn compiled(mut self, id: ResourceId, value: Item) -> Self {
        self.compiled_attribute = Some(AaptAttribute::with_id(id));
        self.compiled_value = Some(value);
        self
    }

    pub fn value_repr(&self) -> AttributeValue<'_> {
        match &self.compiled_value {
            Some(item) => AttributeValue::Compiled(item),
            None if !self.value.is_empty() => AttributeValue::Text(&self.value),
            None => AttributeValue::None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub namespace_uri: String,
    pub name: String,
    pub line: usize,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(namespace_uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace_uri: namespace_uri.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn find_attribute(&self, namespace_uri: &str, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.namespace_uri == namespace_uri && a.name == name)
    }

    pub fn find_attribute_mut(&mut self, namespace_uri: &str, name: &str) -> Option<&mut Attribute> {
        self.attributes
            .iter_mut()
            .find(|a| a.namespace_uri == namespace_uri && a.name == name)
    }

    /// Finds a direct child element, looking through namespace declarations.
    pub fn find_child(&self, namespace_uri: &str, name: &str) -> Option<&Element> {
        self.child_elements()
            .find(|e| e.namespace_uri == namespace_uri && e.name == name)
    }

    /// Direct child elements in document order, looking through namespace
    /// declarations.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::element)
    }

    pub fn append_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    pub prefix: String,
    pub uri: String,
    pub line: usize,
    pub children: Vec<Node>,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
            ..Default::default()
        }
    }

    pub fn append_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub text: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Namespace(Namespace),
    Element(Element),
    Text(Text),
}

impl Node {
    /// The element this node is, or the first element wrapped by a chain of
    /// namespace declarations.
    pub fn element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Namespace(ns) => ns.children.iter().find_map(Node::element),
            Node::Text(_) => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Namespace(ns) => ns.children.iter_mut().find_map(Node::element_mut),
            Node::Text(_) => None,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Node::Namespace(ns) => ns.line,
            Node::Element(el) => el.line,
            Node::Text(t) => t.line,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<Namespace> for Node {
    fn from(ns: Namespace) -> Self {
        Node::Namespace(ns)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

/// A parsed or synthesized XML file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlResource {
    pub source: Source,
    pub root: Option<Node>,
}

impl XmlResource {
    /// The document element, looking through namespace declarations.
    pub fn find_root_element(&self) -> Option<&Element> {
        self.root.as_ref().and_then(Node::element)
    }

    pub fn find_root_element_mut(&mut self) -> Option<&mut Element> {
        self.root.as_mut().and_then(Node::element_mut)
    }
}
