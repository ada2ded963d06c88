//! Descriptor tree model and its XML form.

use crate::error::{ConveyorError, Result};
use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use std::collections::VecDeque;

/// One element of a descriptor: a name, ordered attributes, optional text,
/// and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder-style child appender.
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style text setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// A generated hierarchical descriptor such as an IDE `.classpath`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorTree {
    pub root: Node,
}

impl DescriptorTree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Visit every node mutably in breadth-first order.
    pub fn for_each_breadth_first_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Node),
    {
        let mut queue: VecDeque<&mut Node> = VecDeque::new();
        queue.push_back(&mut self.root);
        while let Some(node) = queue.pop_front() {
            visit(&mut *node);
            queue.extend(node.children.iter_mut());
        }
    }

    /// Nodes in breadth-first order.
    pub fn breadth_first(&self) -> Vec<&Node> {
        let mut order = Vec::new();
        let mut queue: VecDeque<&Node> = VecDeque::from([&self.root]);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            queue.extend(node.children.iter());
        }
        order
    }

    /// Parse an XML document. Comments, processing instructions and
    /// whitespace-only text are dropped.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Node> = Vec::new();
        let mut root: Option<Node> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                ConveyorError::DescriptorError(format!(
                    "at byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(start) => stack.push(node_from(&start)?),
                Event::Empty(start) => {
                    let node = node_from(&start)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::End(_) => {
                    let node = stack.pop().ok_or_else(|| {
                        ConveyorError::DescriptorError("unbalanced closing tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| ConveyorError::DescriptorError(e.to_string()))?;
                    if let Some(open) = stack.last_mut() {
                        open.text.get_or_insert_with(String::new).push_str(&text);
                    }
                }
                Event::CData(data) => {
                    let data = String::from_utf8_lossy(&data).into_owned();
                    if let Some(open) = stack.last_mut() {
                        open.text.get_or_insert_with(String::new).push_str(&data);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(ConveyorError::DescriptorError(format!(
                "unclosed element <{}>",
                stack[stack.len() - 1].name
            )));
        }

        root.map(Self::new)
            .ok_or_else(|| ConveyorError::DescriptorError("document has no root element".to_string()))
    }

    /// Serialize with an XML declaration and tab indentation.
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        write_node(&mut out, &self.root, 0);
        out
    }
}

fn node_from(start: &BytesStart<'_>) -> Result<Node> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| ConveyorError::DescriptorError(e.to_string()))?
        .to_string();
    let mut node = Node::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| ConveyorError::DescriptorError(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| ConveyorError::DescriptorError(e.to_string()))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| ConveyorError::DescriptorError(e.to_string()))?
            .into_owned();
        node.attributes.insert(key, value);
    }

    Ok(node)
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(ConveyorError::DescriptorError(format!(
            "second root element <{}>",
            node.name
        )));
    }
    *root = Some(node);
    Ok(())
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
    out.push('<');
    out.push_str(&node.name);
    for (key, value) in &node.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }

    match (&node.text, node.children.is_empty()) {
        (None, true) => out.push_str("/>\n"),
        (Some(text), true) => {
            out.push('>');
            out.push_str(&escape(text.as_str()));
            out.push_str("</");
            out.push_str(&node.name);
            out.push_str(">\n");
        }
        (text, false) => {
            out.push_str(">\n");
            if let Some(text) = text {
                for _ in 0..=depth {
                    out.push('\t');
                }
                out.push_str(&escape(text.as_str()));
                out.push('\n');
            }
            for child in &node.children {
                write_node(out, child, depth + 1);
            }
            for _ in 0..depth {
                out.push('\t');
            }
            out.push_str("</");
            out.push_str(&node.name);
            out.push_str(">\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSPATH: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<classpath>
	<classpathentry kind="src" path="src/main" output="bin/main">
		<attributes>
			<attribute name="gradle_scope" value="main"/>
		</attributes>
	</classpathentry>
	<classpathentry kind="output" path="bin/default"/>
</classpath>
"#;

    #[test]
    fn parses_nested_elements_and_attributes_in_order() {
        let tree = DescriptorTree::parse(CLASSPATH).unwrap();

        assert_eq!(tree.root.name, "classpath");
        assert_eq!(tree.root.children.len(), 2);
        let src = &tree.root.children[0];
        let keys: Vec<&str> = src.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["kind", "path", "output"]);
        assert_eq!(src.children[0].children[0].attribute("value"), Some("main"));
    }

    #[test]
    fn serialization_reproduces_tab_indented_input() {
        let tree = DescriptorTree::parse(CLASSPATH).unwrap();

        assert_eq!(tree.to_xml(), CLASSPATH);
    }

    #[test]
    fn text_content_is_kept() {
        let xml = "<projectDescription><name>acme:core &amp; co</name><comment/></projectDescription>";
        let tree = DescriptorTree::parse(xml).unwrap();

        assert_eq!(tree.root.children[0].text.as_deref(), Some("acme:core & co"));
        assert!(tree.to_xml().contains("\t<name>acme:core &amp; co</name>\n"));
    }

    #[test]
    fn breadth_first_visits_level_by_level() {
        let tree = DescriptorTree::new(
            Node::new("a")
                .child(Node::new("b").child(Node::new("d")))
                .child(Node::new("c")),
        );

        let names: Vec<&str> = tree.breadth_first().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn rejects_unclosed_documents() {
        let err = DescriptorTree::parse("<classpath><classpathentry kind=\"src\">").unwrap_err();

        assert!(matches!(err, ConveyorError::DescriptorError(_)));
    }

    #[test]
    fn rejects_empty_documents() {
        let err = DescriptorTree::parse("<?xml version=\"1.0\"?>").unwrap_err();

        assert!(err.to_string().contains("no root element"));
    }
}
