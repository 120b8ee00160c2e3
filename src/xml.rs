//! Minimal in-memory XML element tree.
//!
//! The Tank-Datenbank export is small, so it is read into a tree of
//! [`Element`]s with quick-xml and queried by child tag name. Attributes,
//! comments and processing instructions are not needed and are dropped.

use quick_xml::Reader;
use quick_xml::events::Event;

/// One XML element with its text content and child elements in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a complete document and return its root element.
    ///
    /// The input is decoded as declared in its XML declaration (or BOM),
    /// defaulting to UTF-8. Element text is kept as written, including
    /// surrounding whitespace. The error string is the parser diagnostic,
    /// including the byte offset at which parsing stopped.
    pub fn parse(xml: impl AsRef<[u8]>) -> std::result::Result<Self, String> {
        let mut reader = Reader::from_reader(xml.as_ref());

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let position = reader.buffer_position();
            let event = reader
                .read_event()
                .map_err(|e| format!("{e} (at byte {position})"))?;

            match event {
                Event::Start(ref e) => {
                    let name = decode(&reader, e.name().as_ref(), position)?;
                    if root.is_some() && stack.is_empty() {
                        return Err(format!(
                            "extra content after root element: <{name}> (at byte {position})"
                        ));
                    }
                    stack.push(Element::new(name));
                }
                Event::Empty(ref e) => {
                    let name = decode(&reader, e.name().as_ref(), position)?;
                    attach(&mut stack, &mut root, Element::new(name), position)?;
                }
                Event::End(_) => {
                    // quick-xml checks that end names match their start tags
                    let element = stack
                        .pop()
                        .ok_or_else(|| format!("unexpected closing tag (at byte {position})"))?;
                    attach(&mut stack, &mut root, element, position)?;
                }
                Event::Text(ref e) => {
                    let text = e
                        .unescape()
                        .map_err(|e| format!("{e} (at byte {position})"))?;
                    push_text(&mut stack, &text, position)?;
                }
                Event::CData(ref e) => {
                    let text = decode(&reader, e, position)?;
                    push_text(&mut stack, &text, position)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(format!("unclosed element <{}> at end of document", open.name));
        }
        root.ok_or_else(|| "document has no root element".to_string())
    }

    /// Direct children with the given tag name, in document order
    pub fn children<'a, 't>(
        &'a self,
        tag: &'t str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 't> {
        self.children.iter().filter(move |child| child.name == tag)
    }

    /// Descendants reached by following `path` one tag at a time, in document order
    pub fn path<'a>(&'a self, path: &[&str]) -> Vec<&'a Element> {
        let mut current = vec![self];
        for tag in path {
            current = current
                .into_iter()
                .flat_map(|element| element.children(tag))
                .collect();
        }
        current
    }
}

/// Decode raw bytes with the encoding the reader detected so far
fn decode(
    reader: &Reader<&[u8]>,
    raw: &[u8],
    position: u64,
) -> std::result::Result<String, String> {
    reader
        .decoder()
        .decode(raw)
        .map(|text| text.into_owned())
        .map_err(|e| format!("{e} (at byte {position})"))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    position: u64,
) -> std::result::Result<(), String> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(format!(
                "extra content after root element: <{}> (at byte {position})",
                element.name
            ));
        }
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str, position: u64) -> std::result::Result<(), String> {
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(format!("text outside of root element (at byte {position})")),
    }
}
