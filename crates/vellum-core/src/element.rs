//! Element tree used as the rendering target for controls.
//!
//! An [`Element`] is a tagged node with attributes, classes, inline style,
//! optional text and children. Charts build SVG trees out of them; the tree
//! serializes to markup for server-side rendering and can be walked in tests
//! without any DOM.
//!
//! # Example
//!
//! ```
//! use vellum_core::Element;
//!
//! let mut svg = Element::new("svg").attr("width", 100).attr("height", 50);
//! svg.add(Element::new("rect").attr("x", 0).attr("width", 10.5).class("bar"));
//! assert_eq!(
//!     svg.to_markup(),
//!     r#"<svg height="50" width="100"><rect class="bar" width="10.5" x="0"/></svg>"#
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

/// A single node in a control's render tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder: set an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl AttrValue) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: add a class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Builder: set text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: add a child.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl AttrValue) {
        self.attrs.insert(name.into(), value.to_attr());
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Get an attribute parsed as a number.
    #[must_use]
    pub fn num_attr(&self, name: &str) -> Option<f64> {
        self.get_attr(name).and_then(|v| v.parse().ok())
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.remove(name)
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    /// Remove a class.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Check for a class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add or remove a class depending on `on`.
    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Classes in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Set an inline style property.
    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.style.insert(property.into(), value.into());
    }

    /// Get an inline style property.
    #[must_use]
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Text content.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Append a child and return a mutable reference to it.
    pub fn add(&mut self, child: Self) -> &mut Self {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Append several children.
    pub fn extend(&mut self, children: impl IntoIterator<Item = Self>) {
        self.children.extend(children);
    }

    /// Remove all children and text.
    pub fn clear(&mut self) {
        self.children.clear();
        self.text = None;
    }

    /// Child elements.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Mutable child elements.
    pub fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }

    /// Depth-first iterator over this element and all descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// All descendants (including self) with the given tag.
    #[must_use]
    pub fn find_all(&self, tag: &str) -> Vec<&Self> {
        self.descendants().filter(|e| e.tag == tag).collect()
    }

    /// All descendants (including self) carrying the given class.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<&Self> {
        self.descendants().filter(|e| e.has_class(class)).collect()
    }

    /// First descendant (including self) matching a predicate, mutably.
    pub fn find_mut<F>(&mut self, pred: F) -> Option<&mut Self>
    where
        F: Fn(&Self) -> bool + Copy,
    {
        if pred(self) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(pred))
    }

    /// Serialize to markup.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        // class and style are folded into the sorted attribute stream
        let mut attrs: BTreeMap<&str, String> = self
            .attrs
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        if !self.classes.is_empty() {
            attrs.insert("class", self.classes.join(" "));
        }
        if !self.style.is_empty() {
            let style = self
                .style
                .iter()
                .map(|(k, v)| format!("{k}:{v}"))
                .collect::<Vec<_>>()
                .join(";");
            attrs.insert("style", style);
        }
        for (k, v) in &attrs {
            let _ = write!(out, r#" {k}="{}""#, escape(v));
        }

        if self.children.is_empty() && self.text.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_markup(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}

/// Values that can be stored as an attribute.
pub trait AttrValue {
    /// Render as attribute text.
    fn to_attr(&self) -> String;
}

impl AttrValue for f64 {
    fn to_attr(&self) -> String {
        fmt_num(*self)
    }
}

impl AttrValue for i32 {
    fn to_attr(&self) -> String {
        self.to_string()
    }
}

impl AttrValue for usize {
    fn to_attr(&self) -> String {
        self.to_string()
    }
}

impl AttrValue for &str {
    fn to_attr(&self) -> String {
        (*self).to_string()
    }
}

impl AttrValue for String {
    fn to_attr(&self) -> String {
        self.clone()
    }
}

impl AttrValue for &String {
    fn to_attr(&self) -> String {
        (*self).clone()
    }
}

/// Format a pixel value for SVG output.
///
/// Rounds to two decimals and trims trailing zeros. Non-finite values become
/// `0` so a bad sample can never produce an unparsable attribute.
#[must_use]
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let s = format!("{rounded:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

/// Format a data value without losing precision.
///
/// Uses the shortest representation that parses back to the same `f64`, so
/// `1.0` prints as `1` and `0.001` stays `0.001`. Non-finite values become `0`.
#[must_use]
pub fn fmt_exact(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
