// crates/apksplit-xml/src/parser.rs

use crate::error::XmlError;
use crate::model::{Attribute, Element, Namespace, Node, Text, XmlResource};
use apksplit::diag::Source;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, ResolveResult};
use quick_xml::reader::NsReader;

/// Parses an XML document into an [`XmlResource`].
///
/// Namespace declarations become [`Namespace`] nodes wrapping the element
/// that declared them, element and attribute names carry resolved namespace
/// URIs, and every node records its 1-based line. Whitespace-only text is
/// dropped; other text is trimmed.
///
/// # Errors
/// Returns an `XmlError` if the document is not well-formed, uses an
/// undeclared prefix or entity, or has more than one root element.
pub fn load_xml_from_str(text: &str, source: Source) -> Result<XmlResource, XmlError> {
    let mut reader = NsReader::from_str(text);
    let mut lines = LineCounter::new(text);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut pending = PendingText::default();
    let mut root: Option<Node> = None;

    loop {
        let result = reader
            .read_resolved_event()
            .map(|(resolved, event)| (to_owned_namespace(resolved), event));
        let (resolved, event) = match result {
            Ok(pair) => pair,
            Err(e) => {
                let line = lines.line_at(offset(reader.error_position(), text));
                return Err(XmlError::Parse { line, source: e });
            }
        };

        match event {
            Event::Start(start) => {
                pending.flush_into(&mut stack);
                let line = lines.line_at(tag_start(text, offset(reader.buffer_position(), text)));
                if stack.is_empty() && root.is_some() {
                    return Err(XmlError::MultipleRoots { line });
                }
                let open = open_element(&reader, &start, resolved, line)?;
                stack.push(open);
            }
            Event::Empty(start) => {
                pending.flush_into(&mut stack);
                let line = lines.line_at(tag_start(text, offset(reader.buffer_position(), text)));
                if stack.is_empty() && root.is_some() {
                    return Err(XmlError::MultipleRoots { line });
                }
                let open = open_element(&reader, &start, resolved, line)?;
                close_element(open, &mut stack, &mut root);
            }
            Event::End(_) => {
                pending.flush_into(&mut stack);
                if let Some(open) = stack.pop() {
                    close_element(open, &mut stack, &mut root);
                }
            }
            Event::Text(t) => {
                let line = lines.line_at(offset(reader.buffer_position(), text));
                pending.push(&String::from_utf8(t.to_vec())?, line);
            }
            Event::CData(c) => {
                let line = lines.line_at(offset(reader.buffer_position(), text));
                pending.push(&String::from_utf8(c.to_vec())?, line);
            }
            Event::GeneralRef(r) => {
                let line = lines.line_at(offset(reader.buffer_position(), text));
                let name = String::from_utf8(r.to_vec())?;
                pending.push(&resolve_entity(&name, line)?, line);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry nothing the tree keeps.
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::UnclosedElement {
            name: open.element.name,
        });
    }

    if let Some(el) = root.as_ref().and_then(Node::element) {
        log::debug!("{}: loaded <{}> at line {}", source, el.name, el.line);
    }
    Ok(XmlResource { source, root })
}

/// An element whose end tag has not been read yet, with the namespaces it
/// declared.
struct OpenElement {
    element: Element,
    namespaces: Vec<Namespace>,
}

/// Character data collected between tags. Entity references arrive as their
/// own events, so text is assembled here before it is attached.
#[derive(Default)]
struct PendingText {
    text: String,
    line: Option<usize>,
}

impl PendingText {
    fn push(&mut self, piece: &str, line: usize) {
        if self.line.is_none() && !piece.trim().is_empty() {
            self.line = Some(line);
        }
        self.text.push_str(piece);
    }

    fn flush_into(&mut self, stack: &mut [OpenElement]) {
        let text = std::mem::take(&mut self.text);
        let line = self.line.take();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        // Text outside the root element is dropped.
        if let Some(parent) = stack.last_mut() {
            parent.element.children.push(Node::Text(Text {
                text: trimmed.to_string(),
                line: line.unwrap_or(parent.element.line),
            }));
        }
    }
}

/// Tracks 1-based line numbers for byte offsets that mostly increase.
struct LineCounter<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        if offset < self.offset {
            self.offset = 0;
            self.line = 1;
        }
        self.line += self.text.as_bytes()[self.offset..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.offset = offset;
        self.line
    }
}

fn offset<P>(position: P, text: &str) -> usize
where
    usize: TryFrom<P>,
{
    usize::try_from(position).unwrap_or(text.len())
}

/// The offset of the `<` opening the tag that ends at `end`.
fn tag_start(text: &str, end: usize) -> usize {
    let end = end.min(text.len());
    text.as_bytes()[..end]
        .iter()
        .rposition(|&b| b == b'<')
        .unwrap_or(0)
}

/// A resolved namespace with its borrow of the reader released. `Err` holds
/// an undeclared prefix.
fn to_owned_namespace(resolved: ResolveResult<'_>) -> Result<String, Vec<u8>> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => Err(prefix),
    }
}

fn unbound(prefix: Vec<u8>, line: usize) -> XmlError {
    XmlError::UnboundPrefix {
        prefix: String::from_utf8_lossy(&prefix).into_owned(),
        line,
    }
}

fn open_element(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
    resolved: Result<String, Vec<u8>>,
    line: usize,
) -> Result<OpenElement, XmlError> {
    let namespace_uri = resolved.map_err(|prefix| unbound(prefix, line))?;
    let name = String::from_utf8(start.local_name().as_ref().to_vec())?;

    let mut element = Element {
        namespace_uri,
        name,
        line,
        ..Default::default()
    };
    let mut namespaces = Vec::new();

    for attr in start.attributes() {
        let attr = attr?;
        let value = attr.decode_and_unescape_value(reader.decoder())?.into_owned();

        if let Some(decl) = attr.key.as_namespace_binding() {
            let prefix = match decl {
                PrefixDeclaration::Default => String::new(),
                PrefixDeclaration::Named(prefix) => String::from_utf8(prefix.to_vec())?,
            };
            namespaces.push(Namespace {
                prefix,
                uri: value,
                line,
                children: Vec::new(),
            });
            continue;
        }

        let (resolved, local_name) = reader.resolve_attribute(attr.key);
        let namespace_uri = to_owned_namespace(resolved).map_err(|prefix| unbound(prefix, line))?;
        element.attributes.push(Attribute {
            namespace_uri,
            name: String::from_utf8(local_name.as_ref().to_vec())?,
            value,
            compiled_attribute: None,
            compiled_value: None,
        });
    }

    Ok(OpenElement {
        element,
        namespaces,
    })
}

/// Wraps a finished element in its namespace declarations and attaches it to
/// its parent, or makes it the document root.
fn close_element(open: OpenElement, stack: &mut [OpenElement], root: &mut Option<Node>) {
    let mut node = Node::Element(open.element);
    for mut ns in open.namespaces.into_iter().rev() {
        ns.children.push(node);
        node = Node::Namespace(ns);
    }
    match stack.last_mut() {
        Some(parent) => parent.element.children.push(node),
        None => *root = Some(node),
    }
}

fn resolve_entity(name: &str, line: usize) -> Result<String, XmlError> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => number.parse().ok(),
        };
        return code
            .and_then(char::from_u32)
            .map(String::from)
            .ok_or_else(|| XmlError::UnknownEntity {
                name: name.to_string(),
                line,
            });
    }
    resolve_predefined_entity(name)
        .map(str::to_string)
        .ok_or_else(|| XmlError::UnknownEntity {
            name: name.to_string(),
            line,
        })
}
