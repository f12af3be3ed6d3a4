//! Hand-built element trees for exercising the locator without an HTML parser.

use crate::dom::DomElement;
use std::ptr;

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct FixtureTree {
    nodes: Vec<NodeData>,
}

impl FixtureTree {
    /// A tree holding only a `body` root.
    pub fn new() -> Self {
        let mut tree = FixtureTree::default();
        tree.nodes.push(NodeData {
            tag: "body".to_string(),
            ..NodeData::default()
        });
        tree
    }

    pub fn root(&self) -> Node<'_> {
        Node { tree: self, id: 0 }
    }

    /// Append an element under `parent` and return its id.
    pub fn add(&mut self, parent: usize, tag: &str, attrs: &[(&str, &str)], text: &str) -> usize {
        let id = self.nodes.len();
        self.nodes.push(NodeData {
            tag: tag.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            text: text.to_string(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// `li > div.name > a[href]` with the given title.
    pub fn add_item(&mut self, list: usize, title: &str, href: &str) -> usize {
        let li = self.add(list, "li", &[], "");
        let name = self.add(li, "div", &[("class", "name")], "");
        self.add(name, "a", &[("href", href)], title);
        li
    }

    pub fn node(&self, id: usize) -> Node<'_> {
        Node { tree: self, id }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Node<'t> {
    tree: &'t FixtureTree,
    pub id: usize,
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<'t> Node<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id]
    }
}

impl<'t> DomElement for Node<'t> {
    fn tag(&self) -> &str {
        &self.data().tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.data()
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn text_content(&self) -> String {
        let mut text = self.data().text.clone();
        for child in self.child_elements() {
            text.push_str(&child.text_content());
        }
        text
    }

    fn parent_element(&self) -> Option<Self> {
        self.data().parent.map(|id| Node {
            tree: self.tree,
            id,
        })
    }

    fn child_elements(&self) -> Vec<Self> {
        self.data()
            .children
            .iter()
            .map(|&id| Node {
                tree: self.tree,
                id,
            })
            .collect()
    }
}
