use std::collections::BTreeMap;

use serde::Serialize;

/// A parsed XML element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Element tag name.
    pub name: String,
    /// Attributes keyed by name.
    pub attributes: BTreeMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// Accumulated text content, if any.
    pub text: Option<String>,
}

impl Element {
    /// Create an empty element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Return the first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterate over all child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a nested child path and return the terminal element's text.
    pub fn text_at<'a>(&'a self, path: &[&str]) -> Option<&'a str> {
        let mut current = self;
        for segment in path {
            current = current.child(segment)?;
        }
        current.text.as_deref()
    }

    /// Append a text fragment to this element's content.
    pub(crate) fn push_text(&mut self, fragment: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(fragment),
            None => self.text = Some(fragment.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Element;

    fn sample() -> Element {
        let mut leaf = Element::new("hostname");
        leaf.text = Some("firewall".to_string());
        let mut system = Element::new("system");
        system.children.push(leaf);
        let mut root = Element::new("opnsense");
        root.children.push(system);
        root
    }

    #[test]
    fn text_at_walks_nested_path() {
        assert_eq!(sample().text_at(&["system", "hostname"]), Some("firewall"));
    }

    #[test]
    fn text_at_returns_none_for_missing_segment() {
        assert_eq!(sample().text_at(&["system", "domain"]), None);
    }

    #[test]
    fn children_named_filters_by_tag() {
        let mut root = Element::new("aliases");
        root.children.push(Element::new("alias"));
        root.children.push(Element::new("alias"));
        root.children.push(Element::new("comment"));
        assert_eq!(root.children_named("alias").count(), 2);
    }
}
