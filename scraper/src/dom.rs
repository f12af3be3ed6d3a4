//! A minimal read-only view of an HTML element tree.
//!
//! The section locator and entry extractor only walk the tree through
//! [`DomElement`], so they work the same on a page parsed by the `scraper`
//! crate and on small trees built by hand in tests.

use scraper::ElementRef;

/// A cheap handle to one element of a document.
pub trait DomElement: Copy + PartialEq {
    /// Lowercase tag name
    fn tag(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
    /// Concatenated text of every descendant text node
    fn text_content(&self) -> String;
    fn parent_element(&self) -> Option<Self>;
    fn child_elements(&self) -> Vec<Self>;

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map_or(false, |classes| classes.split_whitespace().any(|c| c == class))
    }

    fn normalized_text(&self) -> String {
        normalize_text(&self.text_content())
    }

    fn next_sibling_elements(&self) -> Vec<Self> {
        let Some(parent) = self.parent_element() else {
            return Vec::new();
        };
        parent
            .child_elements()
            .into_iter()
            .skip_while(|sibling| sibling != self)
            .skip(1)
            .collect()
    }

    /// Descendants in document order, not including `self`.
    fn descendant_elements(&self) -> Vec<Self> {
        let mut out = Vec::new();
        for child in self.child_elements() {
            out.push(child);
            out.extend(child.descendant_elements());
        }
        out
    }

    /// Every element after `self` in document order, skipping its own subtree.
    fn following_elements(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut current = *self;
        loop {
            for sibling in current.next_sibling_elements() {
                out.push(sibling);
                out.extend(sibling.descendant_elements());
            }
            match current.parent_element() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        out
    }

    fn is_list(&self) -> bool {
        matches!(self.tag(), "ul" | "ol")
    }

    fn is_heading(&self) -> bool {
        matches!(self.tag(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
    }
}

/// Trim, turn non-breaking spaces into plain ones and collapse runs of whitespace.
pub fn normalize_text(s: &str) -> String {
    s.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl<'a> DomElement for ElementRef<'a> {
    fn tag(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn child_elements(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    fn next_sibling_elements(&self) -> Vec<Self> {
        self.next_siblings().filter_map(ElementRef::wrap).collect()
    }
}
