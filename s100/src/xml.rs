// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A small, owned, namespace-resolved element tree.
//!
//! S-100 datasets mix elements from the product namespace (e.g. S-124), the
//! S-100 GML profile and GML 3.2 itself. The same local name can appear in
//! more than one of them, so every lookup takes an explicit [`Scope`] which
//! either pins the namespace URI or deliberately matches any namespace.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use crate::error::Error;

/// Namespace of the S-100 GML profile 5.0.
pub const NS_S100: &str = "http://www.iho.int/s100gml/5.0";
/// Namespace of the S-124 Navigational Warnings product 1.0.
pub const NS_S124: &str = "http://www.iho.int/S124/1.0";
/// Namespace of GML 3.2.
pub const NS_GML: &str = "http://www.opengis.net/gml/3.2";

/// Which namespace an element lookup matches.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Scope<'a> {
    /// Matches the local name in any namespace, or none.
    Any,
    /// Matches the local name only in the namespace with this URI.
    Namespace(&'a str),
}

/// An attribute of an [`Element`].
#[derive(Clone, PartialEq, Debug)]
pub struct Attribute {
    /// Qualified name as written in the document (e.g. `"gml:id"`).
    pub name: String,
    /// Name without prefix (e.g. `"id"`).
    pub local_name: String,
    /// Resolved namespace URI. Unprefixed attributes have none.
    pub namespace: Option<String>,
    /// Unescaped attribute value.
    pub value: String,
}

impl Attribute {
    /// Returns `true` if the attribute name carries a namespace prefix.
    pub fn is_prefixed(&self) -> bool {
        self.name.len() > self.local_name.len()
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its resolved namespace and ordered children.
#[derive(Clone, PartialEq, Debug)]
pub struct Element {
    pub namespace: Option<String>,
    pub local_name: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Returns `true` if this element has the `local` name within `scope`.
    pub fn matches(&self, scope: Scope<'_>, local: &str) -> bool {
        if self.local_name != local {
            return false;
        }

        match scope {
            Scope::Any => true,
            Scope::Namespace(uri) => self.namespace.as_deref() == Some(uri),
        }
    }

    /// Returns the first child that is an element, skipping text.
    pub fn first_child_element(&self) -> Option<&Element> {
        self.child_elements().next()
    }

    /// Iterates over the direct child elements.
    pub fn child_elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Returns the first attribute value with the `local` name.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.local_name == local)
            .map(|attr| attr.value.as_str())
    }

    /// Concatenates the text of this element and all its descendants in
    /// document order.
    ///
    /// Whitespace is kept as is.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, text: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => text.push_str(t),
                Node::Element(e) => e.collect_text(text),
            }
        }
    }
}

/// Element lookup shared by [`Document`] and [`Element`].
pub trait Lookup {
    /// Returns all matching descendants in document order.
    fn descendants<'a, 's>(&'a self, scope: Scope<'s>, local: &'s str) -> Descendants<'a, 's>;

    /// Returns the first matching descendant in document order.
    fn first(&self, scope: Scope<'_>, local: &str) -> Option<&Element> {
        self.descendants(scope, local).next()
    }

    /// Returns `true` if any descendant matches.
    fn contains(&self, scope: Scope<'_>, local: &str) -> bool {
        self.first(scope, local).is_some()
    }
}

impl Lookup for Element {
    /// Descendants of an element don't include the element itself.
    fn descendants<'a, 's>(&'a self, scope: Scope<'s>, local: &'s str) -> Descendants<'a, 's> {
        Descendants {
            stack: self.child_elements().rev().collect(),
            scope,
            local,
        }
    }
}

/// Depth-first iterator over matching elements.
pub struct Descendants<'a, 's> {
    stack: Vec<&'a Element>,
    scope: Scope<'s>,
    local: &'s str,
}

impl<'a, 's> Iterator for Descendants<'a, 's> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(element) = self.stack.pop() {
            self.stack.extend(element.child_elements().rev());
            if element.matches(self.scope, self.local) {
                return Some(element);
            }
        }

        None
    }
}

/// A parsed XML document.
///
/// # Examples
///
/// ```
/// use s100::xml::{Document, Lookup, Scope, NS_GML};
///
/// let doc = Document::parse(
///     r#"<S124:Dataset xmlns:S124="http://www.iho.int/S124/1.0"
///                      xmlns:gml="http://www.opengis.net/gml/3.2">
///          <gml:pos>55.0 12.5</gml:pos>
///        </S124:Dataset>"#,
/// )?;
///
/// let pos = doc.first(Scope::Namespace(NS_GML), "pos").unwrap();
/// assert_eq!(pos.text_content(), "55.0 12.5");
/// assert!(!doc.contains(Scope::Namespace("urn:other"), "pos"));
/// # Ok::<(), s100::Error>(())
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parses a document from its XML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Xml`] if the text is not well-formed or has no root
    /// element.
    pub fn parse(xml: &str) -> Result<Self, Error> {
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let (ns, event) = reader.read_resolved_event()?;
            let namespace = namespace_uri(&ns)?;

            match event {
                Event::Start(ref e) => {
                    let element = new_element(&reader, e, namespace)?;
                    stack.push(element);
                }
                Event::Empty(ref e) => {
                    let element = new_element(&reader, e, namespace)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::Xml("unexpected closing tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        push_text(parent, e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let bytes = e.into_inner();
                        push_text(parent, Cow::Borrowed(std::str::from_utf8(&bytes)?));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::Xml("unexpected end of document".to_string()));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| Error::Xml("document has no root element".to_string()))
    }

    /// Returns the document element.
    pub fn root(&self) -> &Element {
        &self.root
    }
}

impl Lookup for Document {
    /// Descendants of a document include the document element.
    fn descendants<'a, 's>(&'a self, scope: Scope<'s>, local: &'s str) -> Descendants<'a, 's> {
        Descendants {
            stack: vec![&self.root],
            scope,
            local,
        }
    }
}

fn namespace_uri(ns: &ResolveResult<'_>) -> Result<Option<String>, Error> {
    match ns {
        ResolveResult::Bound(ns) => Ok(Some(std::str::from_utf8(ns.as_ref())?.to_string())),
        // An undeclared prefix is treated like no namespace at all so that
        // scoped lookups skip the element and unscoped lookups still find it.
        ResolveResult::Unbound | ResolveResult::Unknown(_) => Ok(None),
    }
}

fn new_element(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
    namespace: Option<String>,
) -> Result<Element, Error> {
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr?;

        // xmlns declarations are consumed by the reader
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }

        let (ns, local) = reader.resolve_attribute(attr.key);
        attributes.push(Attribute {
            name: std::str::from_utf8(attr.key.as_ref())?.to_string(),
            local_name: std::str::from_utf8(local.as_ref())?.to_string(),
            namespace: namespace_uri(&ns)?,
            value: attr.unescape_value()?.into_owned(),
        });
    }

    Ok(Element {
        namespace,
        local_name: std::str::from_utf8(start.local_name().as_ref())?.to_string(),
        name: std::str::from_utf8(start.name().as_ref())?.to_string(),
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), Error> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(Error::Xml("multiple root elements".to_string())),
    }

    Ok(())
}

fn push_text(parent: &mut Element, text: Cow<'_, str>) {
    // merge adjacent text and CDATA runs into one node
    if let Some(Node::Text(last)) = parent.children.last_mut() {
        last.push_str(&text);
    } else {
        parent.children.push(Node::Text(text.into_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<S124:Dataset xmlns:S124="http://www.iho.int/S124/1.0"
              xmlns:S100="http://www.iho.int/s100gml/5.0"
              xmlns:gml="http://www.opengis.net/gml/3.2"
              gml:id="DS1">
  <S124:member>
    <S124:NAVWARNPreamble gml:id="NW.1" code="x">
      <S124:text>first &amp; foremost</S124:text>
      <S124:text><![CDATA[second <raw>]]></S124:text>
    </S124:NAVWARNPreamble>
  </S124:member>
  <other:geometry xmlns:other="urn:other"/>
  <S124:geometry/>
</S124:Dataset>"#;

    #[test]
    fn parse_resolves_namespaces() {
        let doc = Document::parse(XML).unwrap();
        let root = doc.root();

        assert_eq!(root.local_name, "Dataset");
        assert_eq!(root.name, "S124:Dataset");
        assert_eq!(root.namespace.as_deref(), Some(NS_S124));
        assert_eq!(root.attribute("id"), Some("DS1"));
        // xmlns declarations aren't attributes
        assert_eq!(root.attributes.len(), 1);
        assert_eq!(root.attributes[0].namespace.as_deref(), Some(NS_GML));
    }

    #[test]
    fn scoped_and_unscoped_lookup() {
        let doc = Document::parse(XML).unwrap();

        assert_eq!(doc.descendants(Scope::Any, "geometry").count(), 2);
        assert_eq!(
            doc.descendants(Scope::Namespace(NS_S124), "geometry").count(),
            1
        );
        assert!(doc.contains(Scope::Namespace("urn:other"), "geometry"));
        assert!(!doc.contains(Scope::Namespace(NS_S100), "geometry"));
    }

    #[test]
    fn document_lookup_includes_root() {
        let doc = Document::parse(XML).unwrap();
        assert!(doc.contains(Scope::Namespace(NS_S124), "Dataset"));
        assert!(!doc.root().contains(Scope::Namespace(NS_S124), "Dataset"));
    }

    #[test]
    fn text_content_is_unescaped_and_untrimmed() {
        let doc = Document::parse(XML).unwrap();
        let texts: Vec<_> = doc
            .descendants(Scope::Any, "text")
            .map(Element::text_content)
            .collect();

        assert_eq!(texts, vec!["first & foremost", "second <raw>"]);
    }

    #[test]
    fn first_child_element_skips_text() {
        let doc = Document::parse(XML).unwrap();
        let preamble = doc.first(Scope::Any, "NAVWARNPreamble").unwrap();

        assert_eq!(preamble.first_child_element().unwrap().local_name, "text");
        assert_eq!(preamble.attribute("code"), Some("x"));
        assert!(preamble.attributes[0].is_prefixed());
        assert!(!preamble.attributes[1].is_prefixed());
    }

    #[test]
    fn descendants_in_document_order() {
        let doc = Document::parse(
            r#"<r><x n="1"><y/><x n="2"><x n="3"/></x></x><x n="4"/></r>"#,
        )
        .unwrap();

        let order: Vec<_> = doc
            .descendants(Scope::Any, "x")
            .filter_map(|e| e.attribute("n"))
            .collect();
        assert_eq!(order, ["1", "2", "3", "4"]);

        let last = doc.root().child_elements().next_back().unwrap();
        assert_eq!(last.attribute("n"), Some("4"));
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(matches!(Document::parse("<a><b></a>"), Err(Error::Xml(_))));
        assert!(matches!(Document::parse("<a>"), Err(Error::Xml(_))));
        assert!(matches!(Document::parse(""), Err(Error::Xml(_))));
    }
}
