//! HTML rendering of navigation lists.
//!
//! [HtmlTarget] implements [RenderTarget] by building an [Element] tree,
//! a minimal DOM-like record which serializes to HTML. The markup mirrors
//! what the page scripts of the documentation site expect:
//!
//! ```text
//! ul.tree
//! ├─ li                                   (leaf)
//! │  └─ a.item[href]
//! └─ li                                   (branch)
//!    ├─ div.toggle[data-id]
//!    │  ├─ a.item[href]
//!    │  └─ i.material-icons "expand_more"
//!    └─ ul.tree
//! ```

use crate::model::TypeRegistry;
use crate::render::{Label, NavListBuilder, RenderTarget};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Class of every (nested) list.
pub const TREE_CLASS: &str = "tree";

/// Class of the mask covering the page while the navigation is open.
pub const MASK_CLASS: &str = "dossier-nav-mask";

/// Keyboard tab order of item links.
const ITEM_TAB_INDEX: &str = "2";

/// Icon shown next to expandable items.
const EXPAND_ICON: &str = "expand_more";

/// Extra characters per element in HTML length estimate: `<tag ...></tag>`
const ELEMENT_OVERHEAD_CHARS: usize = 16;

// =#========================================================================#=
// ELEMENT
// =#========================================================================#=
/// A DOM-like element: tag, classes, attributes, text and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    /// Attributes in insertion order
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Adds a class, returning the element.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Adds a class unless already present.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    /// Sets an attribute, replacing an existing value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Sets the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Appends a child element.
    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Returns the tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the classes in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns `true` if the element has the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns the value of an attribute, if set.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the text content, if set.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the child elements.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Returns all descendants (self excluded) with the given tag and class,
    /// in document order.
    pub fn find_all(&self, tag: &str, class: &str) -> Vec<&Element> {
        fn collect<'e>(element: &'e Element, tag: &str, class: &str, found: &mut Vec<&'e Element>) {
            for child in &element.children {
                if child.tag == tag && child.has_class(class) {
                    found.push(child);
                }
                collect(child, tag, class, found);
            }
        }

        let mut found = Vec::new();
        collect(self, tag, class, &mut found);
        found
    }

    /// Returns the HTML serialization of this element.
    ///
    /// # Example
    /// ```
    /// use dossier_nav::render::Element;
    ///
    /// let mut a = Element::new("a").with_class("item");
    /// a.set_attribute("href", "a&b.html");
    /// a.set_text("a<b");
    /// assert_eq!(a.to_html(), r#"<a class="item" href="a&amp;b.html">a&lt;b</a>"#);
    /// ```
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(self.estimate_html_len());
        self.write_html(&mut html);
        html
    }

    /// Rough length of the serialization, to avoid reallocations.
    fn estimate_html_len(&self) -> usize {
        let own = 2 * self.tag.len()
            + ELEMENT_OVERHEAD_CHARS
            + self.classes.iter().map(|c| c.len() + 1).sum::<usize>()
            + self
                .attributes
                .iter()
                .map(|(n, v)| n.len() + v.len() + 4)
                .sum::<usize>()
            + self.text.as_ref().map_or(0, String::len);
        own + self
            .children
            .iter()
            .map(Element::estimate_html_len)
            .sum::<usize>()
    }

    fn write_html(&self, html: &mut String) {
        html.push('<');
        html.push_str(&self.tag);
        if !self.classes.is_empty() {
            html.push_str(" class=\"");
            push_escaped(html, &self.classes.join(" "), true);
            html.push('"');
        }
        for (name, value) in &self.attributes {
            html.push(' ');
            html.push_str(name);
            html.push_str("=\"");
            push_escaped(html, value, true);
            html.push('"');
        }
        html.push('>');

        if let Some(text) = &self.text {
            push_escaped(html, text, false);
        }
        for child in &self.children {
            child.write_html(html);
        }

        html.push_str("</");
        html.push_str(&self.tag);
        html.push('>');
    }
}

/// Escapes HTML special characters; quotes only inside attributes.
fn push_escaped(html: &mut String, raw: &str, in_attribute: bool) {
    for c in raw.chars() {
        match c {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '"' if in_attribute => html.push_str("&quot;"),
            _ => html.push(c),
        }
    }
}

/// Creates the element masking page content while the navigation is open.
pub fn create_mask() -> Element {
    Element::new("div").with_class(MASK_CLASS)
}

/// Writes the given elements to a file, one per line.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_html_file(file: File, elements: &[&Element]) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    for element in elements {
        writer.write_all(element.to_html().as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

// =#========================================================================#=
// HTML TARGET
// =#========================================================================#=
/// [RenderTarget] producing [Element]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTarget;

impl HtmlTarget {
    /// Creates a new target.
    pub fn new() -> Self {
        HtmlTarget
    }

    /// Creates the link of an item.
    fn create_link(label: &Label<'_>) -> Element {
        let mut a = Element::new("a").with_class("item");
        a.set_text(label.text);
        a.set_attribute("tabindex", ITEM_TAB_INDEX);
        if let Some(href) = &label.href {
            a.set_attribute("href", href.as_str());
        }
        if label.interface {
            a.add_class("interface");
        }
        if label.current {
            a.add_class("current");
        }
        a
    }
}

impl RenderTarget for HtmlTarget {
    type List = Element;
    type Item = Element;

    fn create_list(&mut self) -> Element {
        Element::new("ul").with_class(TREE_CLASS)
    }

    fn create_leaf_item(&mut self, label: &Label<'_>) -> Element {
        let mut li = Element::new("li");
        li.append_child(Self::create_link(label));
        li
    }

    fn create_branch_item(&mut self, label: &Label<'_>, toggle_id: &str, children: Element) -> Element {
        let mut icon = Element::new("i").with_class("material-icons");
        icon.set_text(EXPAND_ICON);

        let mut toggle = Element::new("div").with_class("toggle");
        toggle.set_attribute("data-id", toggle_id);
        toggle.append_child(Self::create_link(label));
        toggle.append_child(icon);

        let mut li = Element::new("li");
        li.append_child(toggle);
        li.append_child(children);
        li
    }

    fn append_item(&mut self, list: &mut Element, item: Element) {
        list.append_child(item);
    }
}

// =#========================================================================#=
// NAV DRAWER
// =#========================================================================#=
/// Everything the navigation drawer of one page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavDrawer {
    /// List of global-scope types
    pub types: Element,
    /// List of modules with their types
    pub modules: Element,
    /// Page mask shown while the drawer is open
    pub mask: Element,
}

impl NavDrawer {
    /// Renders both lists of a registry for the page at `current_path`.
    ///
    /// # Panics
    /// Panics if two descriptors of the same list resolve to the same path.
    pub fn render(registry: &TypeRegistry, base_path: &str, current_path: &str) -> Self {
        let builder = NavListBuilder::new()
            .with_base_path(base_path)
            .with_current_path(current_path);
        let mut target = HtmlTarget::new();

        NavDrawer {
            types: builder.clone().types().build(&registry.types, &mut target),
            modules: builder.modules().build(&registry.modules, &mut target),
            mask: create_mask(),
        }
    }

    /// Returns the HTML of types list, modules list and mask, one per line.
    pub fn to_html(&self) -> String {
        [&self.types, &self.modules, &self.mask]
            .iter()
            .map(|e| e.to_html())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
