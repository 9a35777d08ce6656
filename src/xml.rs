//! Owned XML element tree.
//!
//! Documents are parsed with `roxmltree` (read-only) and copied into an owned
//! [`Element`] tree so they can be edited in place and written back out with
//! `quick-xml`. Only elements, attributes and text are kept; libvirt's node
//! device schema has no mixed content, so each element carries at most one
//! text value.

use crate::error::{NodedevError, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

/// Split a `/`-separated path into element names, ignoring empty segments.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

impl Element {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Parse a complete document and return its root element.
    pub fn parse(content: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(content)?;
        Ok(Self::from_node(doc.root_element()))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let mut element = Element::new(node.tag_name().name());
        for attr in node.attributes() {
            element
                .attributes
                .push((attr.name().to_string(), attr.value().to_string()));
        }

        let mut text = String::new();
        for child in node.children() {
            if child.is_element() {
                element.children.push(Self::from_node(child));
            } else if child.is_text() {
                if let Some(t) = child.text() {
                    text.push_str(t);
                }
            }
        }

        // Indentation between child elements is not content
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            element.text = Some(trimmed.to_string());
        }
        element
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let idx = self.attributes.iter().position(|(k, _)| k == name)?;
        Some(self.attributes.remove(idx).1)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text<S: Into<String>>(&mut self, value: S) {
        self.text = Some(value.into());
    }

    /// First direct child with the given tag name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Follow `path` from this element. The empty path returns `self`.
    pub fn find(&self, path: &str) -> Option<&Element> {
        let mut current = self;
        for segment in segments(path) {
            current = current.child(segment)?;
        }
        Some(current)
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut Element> {
        let mut current = self;
        for segment in segments(path) {
            current = current.children.iter_mut().find(|c| c.name == segment)?;
        }
        Some(current)
    }

    /// Like [`Element::find_mut`], creating any missing elements along the way.
    pub fn ensure(&mut self, path: &str) -> &mut Element {
        let mut current = self;
        for segment in segments(path) {
            let idx = match current.children.iter().position(|c| c.name == segment) {
                Some(idx) => idx,
                None => {
                    current.children.push(Element::new(segment));
                    current.children.len() - 1
                }
            };
            current = &mut current.children[idx];
        }
        current
    }

    /// Detach the element at `path`, returning it if it existed.
    pub fn remove(&mut self, path: &str) -> Option<Element> {
        let path = path.trim_matches('/');
        let (parent_path, last) = path.rsplit_once('/').unwrap_or(("", path));
        if last.is_empty() {
            return None;
        }
        let parent = self.find_mut(parent_path)?;
        let idx = parent.children.iter().position(|c| c.name == last)?;
        Some(parent.children.remove(idx))
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Serialize this element and its subtree as indented XML.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write_into(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|e| NodedevError::serialize(e.to_string()))
    }

    fn write_into(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.text.is_none() && self.children.is_empty() {
            return emit(writer, Event::Empty(start));
        }

        emit(writer, Event::Start(start))?;
        if let Some(text) = &self.text {
            emit(writer, Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_into(writer)?;
        }
        emit(writer, Event::End(BytesEnd::new(self.name.as_str())))
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| NodedevError::serialize(e.to_string()))
}

#[cfg(test)]
#[path = "xml_test.rs"]
mod tests;
