//! Generic markup tree that typed xmeml nodes lower into

/// Content of an element: a text leaf or nested child elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Children(Vec<Element>),
}

/// A single markup element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub content: Content,
}

impl Element {
    /// Creates an element holding a text value
    pub fn text(name: &'static str, value: impl ToString) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            content: Content::Text(value.to_string()),
        }
    }

    /// Creates an element with nested children
    pub fn parent(name: &'static str, children: Vec<Element>) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            content: Content::Children(children),
        }
    }

    /// Adds an attribute
    pub fn with_attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.attributes.push((name, value.to_string()));
        self
    }

    /// Returns the value of an attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns child elements (empty for text leaves)
    pub fn children(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            Content::Text(_) => &[],
        }
    }

    /// Returns the text of a leaf element
    pub fn text_value(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Children(_) => None,
        }
    }

    /// Finds the first child with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().iter().find(|c| c.name == name)
    }

    /// Iterates over children with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children().iter().filter(move |c| c.name == name)
    }

    /// Follows a path of child names, returning the text at the end
    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        let mut current = self;
        for name in path {
            current = current.child(name)?;
        }
        current.text_value()
    }
}

/// Lowers a typed node into a markup element
pub trait ToElement {
    fn to_element(&self) -> Element;
}

/// Renders xmeml booleans
pub(crate) fn flag(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        let element = Element::parent(
            "clipitem",
            vec![
                Element::text("name", "Opener"),
                Element::parent("rate", vec![Element::text("timebase", 30)]),
                Element::text("filter", "a"),
                Element::text("filter", "b"),
            ],
        )
        .with_attr("id", "clip_0");

        assert_eq!(element.attr("id"), Some("clip_0"));
        assert_eq!(element.attr("missing"), None);
        assert_eq!(element.text_at(&["name"]), Some("Opener"));
        assert_eq!(element.text_at(&["rate", "timebase"]), Some("30"));
        assert_eq!(element.text_at(&["rate"]), None);
        assert_eq!(element.children_named("filter").count(), 2);
    }

    #[test]
    fn test_flag() {
        assert_eq!(flag(true), "TRUE");
        assert_eq!(flag(false), "FALSE");
    }
}
