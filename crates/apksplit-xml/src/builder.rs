// crates/apksplit-xml/src/builder.rs

//! Serializes an [`XmlResource`] back into XML text.

use crate::error::XmlError;
use crate::model::{Element, Node, XmlResource};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// A namespace binding visible to the element being written.
struct Scope {
    prefix: String,
    uri: String,
}

/// Serializes a document into an indented XML string with an XML declaration.
///
/// Namespace nodes emit their `xmlns` declaration on the first element they
/// wrap, and namespaced names are written with the nearest enclosing prefix
/// for their URI.
///
/// # Errors
/// Returns `XmlError::UnboundNamespace` when a name's namespace has no
/// declaring node above it, or an I/O error from the writer.
pub fn save_xml_to_string(doc: &XmlResource) -> Result<String, XmlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    if let Some(root) = &doc.root {
        let mut scopes = Vec::new();
        let mut pending = Vec::new();
        write_node(&mut writer, root, &mut scopes, &mut pending)?;
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    node: &Node,
    scopes: &mut Vec<Scope>,
    pending: &mut Vec<usize>,
) -> Result<(), XmlError> {
    match node {
        Node::Namespace(ns) => {
            scopes.push(Scope {
                prefix: ns.prefix.clone(),
                uri: ns.uri.clone(),
            });
            pending.push(scopes.len() - 1);
            for child in &ns.children {
                write_node(writer, child, scopes, pending)?;
            }
            // The declaration may not have been emitted if no element followed.
            pending.retain(|&idx| idx != scopes.len() - 1);
            scopes.pop();
        }
        Node::Element(el) => write_element(writer, el, scopes, pending)?,
        Node::Text(text) => {
            writer.write_event(Event::Text(BytesText::new(&text.text)))?;
        }
    }
    Ok(())
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    el: &Element,
    scopes: &mut Vec<Scope>,
    pending: &mut Vec<usize>,
) -> Result<(), XmlError> {
    let name = qualified_name(scopes, &el.namespace_uri, &el.name, false)?;
    let mut start = BytesStart::new(name.clone());

    for idx in pending.drain(..) {
        let scope = &scopes[idx];
        let key = if scope.prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{}", scope.prefix)
        };
        start.push_attribute((key.as_str(), scope.uri.as_str()));
    }

    for attr in &el.attributes {
        let key = qualified_name(scopes, &attr.namespace_uri, &attr.name, true)?;
        start.push_attribute((key.as_str(), attr.value.as_str()));
    }

    if el.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &el.children {
        write_node(writer, child, scopes, pending)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// `prefix:name` for the innermost binding of `uri`. Unprefixed attributes
/// are never in the default namespace, so they need a named prefix.
fn qualified_name(
    scopes: &[Scope],
    uri: &str,
    name: &str,
    attribute: bool,
) -> Result<String, XmlError> {
    if uri.is_empty() {
        return Ok(name.to_string());
    }
    scopes
        .iter()
        .rev()
        .find(|s| s.uri == uri && !(attribute && s.prefix.is_empty()))
        .map(|s| {
            if s.prefix.is_empty() {
                name.to_string()
            } else {
                format!("{}:{}", s.prefix, name)
            }
        })
        .ok_or_else(|| XmlError::UnboundNamespace {
            uri: uri.to_string(),
        })
}
