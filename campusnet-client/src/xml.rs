//! Minimal owned XML element tree built on quick-xml
//!
//! CampusNet responses are small attribute-centric documents, so the reader
//! keeps element names, attributes and nesting and drops character data.
//! Names are stored as local names: namespace prefixes are stripped.
//! [`XmlElement`] is public so callers can write their own [`crate::Extractor`]s.

use crate::error::CampusNetError;
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

/// An element of a parsed response document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse a complete document and return its root element
    ///
    /// Fails on anything that is not exactly one well-formed root element:
    /// mismatched or unclosed tags, invalid names, undeclared namespace
    /// prefixes, bad entity references, stray text or declarations around
    /// the root, or an empty document.
    pub fn parse(text: &str) -> Result<Self, CampusNetError> {
        let mut reader = NsReader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut open: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let (namespace, event) = reader.read_resolved_event()?;
            if let ResolveResult::Unknown(prefix) = namespace {
                return Err(unknown_prefix(&prefix));
            }

            match event {
                Event::Start(start) => {
                    if open.is_empty() && root.is_some() {
                        return Err(malformed("more than one root element"));
                    }
                    open.push(Self::from_start(&reader, &start)?);
                }
                Event::Empty(start) => {
                    let element = Self::from_start(&reader, &start)?;
                    Self::attach(&mut open, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| malformed("closing tag without an open element"))?;
                    Self::attach(&mut open, &mut root, element)?;
                }
                Event::Text(text) => {
                    // Character data is dropped, but its references must resolve
                    let content = text.unescape()?;
                    if open.is_empty() && !content.trim().is_empty() {
                        return Err(malformed("text outside the root element"));
                    }
                }
                Event::CData(_) if open.is_empty() => {
                    return Err(malformed("character data outside the root element"));
                }
                Event::Decl(_) if root.is_some() || !open.is_empty() => {
                    return Err(malformed("XML declaration after the first element"));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(malformed(&format!("element <{}> is not closed", unclosed.name)));
        }
        root.ok_or_else(|| malformed("document has no root element"))
    }

    fn from_start(
        reader: &NsReader<&[u8]>,
        start: &BytesStart<'_>,
    ) -> Result<Self, CampusNetError> {
        check_name(start.name().as_ref())?;
        let name = utf8(start.local_name().as_ref())?;

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            check_name(attr.key.as_ref())?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            if let (ResolveResult::Unknown(prefix), _) = reader.resolve_attribute(attr.key) {
                return Err(unknown_prefix(&prefix));
            }
            let key = utf8(attr.key.local_name().as_ref())?;
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Hang a finished element on its parent, or make it the root
    fn attach(
        open: &mut [XmlElement],
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> Result<(), CampusNetError> {
        match open.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => return Err(malformed("more than one root element")),
        }
        Ok(())
    }

    /// Local name of the element
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an attribute by local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Look up an attribute that a well-formed response always carries
    pub fn required_attribute(&self, name: &str) -> Result<&str, CampusNetError> {
        self.attribute(name)
            .ok_or_else(|| CampusNetError::MissingAttribute {
                element: self.name.clone(),
                attribute: name.to_string(),
            })
    }

    /// First direct child with the given name
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All elements reached by following a `/`-separated path of direct
    /// children, in document order
    pub fn find_all<'a>(&'a self, path: &str) -> Vec<&'a XmlElement> {
        path.split('/')
            .filter(|step| !step.is_empty())
            .fold(vec![self], |current, step| {
                current
                    .into_iter()
                    .flat_map(|element| element.children.iter())
                    .filter(|child| child.name == step)
                    .collect()
            })
    }
}

fn utf8(bytes: &[u8]) -> Result<String, CampusNetError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| CampusNetError::Encoding)
}

/// Reject tag and attribute names that are not XML names
fn check_name(raw: &[u8]) -> Result<(), CampusNetError> {
    let name = std::str::from_utf8(raw).map_err(|_| CampusNetError::Encoding)?;
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.' | '\u{b7}'));
    if valid {
        Ok(())
    } else {
        Err(malformed(&format!("invalid name '{}'", name)))
    }
}

fn unknown_prefix(prefix: &[u8]) -> CampusNetError {
    malformed(&format!(
        "undeclared namespace prefix '{}'",
        String::from_utf8_lossy(prefix)
    ))
}

fn malformed(reason: &str) -> CampusNetError {
    CampusNetError::MalformedXml(reason.to_string())
}
