//! In-memory [`UiSurface`] built from page markup.
//!
//! Only the elements named by the DOM contract are tracked: filter pills,
//! cards and the role singletons. Each tracked element keeps its classes,
//! attributes, inline styles and inner markup. Inserted children are spliced
//! into the card list at the position their container occupies in the
//! document, so [`UiSurface::cards`] keeps document order.
//!
//! Time does not pass on a headless surface: frames and timers resolve
//! after a cooperative yield, and their requests are recorded for inspection.

use super::{ElementId, FILTER_PILL, NewElement, PROJECT_CARD, Role, UiSurface};
use crate::utils::escape_html;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

static PILL_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse(FILTER_PILL).unwrap());
static CARD_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse(PROJECT_CARD).unwrap());
static CONTAINER_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(Role::ArticlesContainer.selector()).unwrap());
static ROLE_SELS: Lazy<Vec<(Role, Selector)>> = Lazy::new(|| {
    Role::ALL
        .iter()
        .map(|&role| (role, Selector::parse(role.selector()).unwrap()))
        .collect()
});

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    inner_html: String,
    parent: Option<ElementId>,
    attached: bool,
}

impl Node {
    fn from_element(el: ElementRef<'_>, parent: Option<ElementId>) -> Self {
        let value = el.value();
        Node {
            tag: value.name().to_string(),
            classes: value.classes().map(str::to_string).collect(),
            attrs: value
                .attrs()
                .filter(|(k, _)| *k != "class" && *k != "style")
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            styles: value.attr("style").map(parse_style).unwrap_or_default(),
            inner_html: el.inner_html(),
            parent,
            attached: true,
        }
    }

    fn from_new(child: NewElement, parent: ElementId) -> Self {
        Node {
            tag: child.tag,
            classes: child.classes,
            attrs: child.attrs,
            styles: child.styles,
            inner_html: child.inner_html,
            parent: Some(parent),
            attached: true,
        }
    }
}

fn parse_style(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .filter_map(|decl| decl.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

fn upsert(list: &mut Vec<(String, String)>, key: &str, value: &str) {
    match list.iter_mut().find(|(k, _)| k == key) {
        Some(entry) => entry.1 = value.to_string(),
        None => list.push((key.to_string(), value.to_string())),
    }
}

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    nodes: Vec<Node>,
    roles: HashMap<Role, ElementId>,
    pills: Vec<ElementId>,
    cards: Vec<ElementId>,
    /// Index in `cards` where children of a container begin.
    slots: HashMap<ElementId, usize>,
    frames: usize,
    timers: Vec<Duration>,
}

impl HeadlessSurface {
    /// Parse `markup` and pick out the contract elements.
    #[instrument(level = "debug", skip_all)]
    pub fn from_markup(markup: &str) -> Self {
        let document = Html::parse_document(markup);
        let mut surface = HeadlessSurface::default();

        for el in document.root_element().descendants().filter_map(ElementRef::wrap) {
            let role = ROLE_SELS
                .iter()
                .find(|(role, sel)| !surface.roles.contains_key(role) && sel.matches(&el))
                .map(|(role, _)| *role);
            let is_pill = PILL_SEL.matches(&el);
            let is_card = CARD_SEL.matches(&el);
            if role.is_none() && !is_pill && !is_card {
                continue;
            }

            let in_container = el
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| CONTAINER_SEL.matches(&a));
            let parent = if in_container {
                surface.element(Role::ArticlesContainer)
            } else {
                None
            };
            let id = surface.push(Node::from_element(el, parent));

            if let Some(role) = role {
                surface.roles.insert(role, id);
                if role == Role::ArticlesContainer {
                    surface.slots.insert(id, surface.cards.len());
                }
            }
            if is_pill {
                surface.pills.push(id);
            }
            if is_card {
                surface.cards.push(id);
            }
        }

        debug!(
            pills = surface.pills.len(),
            cards = surface.cards.len(),
            roles = surface.roles.len(),
            "Built headless surface"
        );
        surface
    }

    fn push(&mut self, node: Node) -> ElementId {
        self.nodes.push(node);
        ElementId(self.nodes.len() - 1)
    }

    fn node(&self, id: ElementId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Attached children of `parent`, in insertion order.
    pub fn children(&self, parent: ElementId) -> Vec<ElementId> {
        (0..self.nodes.len())
            .map(ElementId)
            .filter(|&id| {
                let n = self.node(id);
                n.attached && n.parent == Some(parent)
            })
            .collect()
    }

    /// Whether the element would be rendered (no inline `display: none`).
    pub fn is_displayed(&self, id: ElementId) -> bool {
        self.style(id, "display").as_deref() != Some("none")
    }

    /// Serialized markup of one tracked element.
    pub fn outer_html(&self, id: ElementId) -> String {
        let n = self.node(id);
        let mut out = format!("<{}", n.tag);
        if !n.classes.is_empty() {
            out.push_str(&format!(r#" class="{}""#, escape_html(&n.classes.join(" "))));
        }
        for (k, v) in &n.attrs {
            out.push_str(&format!(r#" {}="{}""#, k, escape_html(v)));
        }
        if !n.styles.is_empty() {
            let style = n
                .styles
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            out.push_str(&format!(r#" style="{}""#, escape_html(&style)));
        }
        out.push('>');
        out.push_str(&n.inner_html);
        out.push_str(&format!("</{}>", n.tag));
        out
    }

    /// Number of animation frames awaited so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Every timer duration requested so far.
    pub fn timers(&self) -> &[Duration] {
        &self.timers
    }
}

impl UiSurface for HeadlessSurface {
    fn element(&self, role: Role) -> Option<ElementId> {
        self.roles.get(&role).copied()
    }

    fn filter_pills(&self) -> Vec<ElementId> {
        self.pills.clone()
    }

    fn cards(&self) -> Vec<ElementId> {
        self.cards.clone()
    }

    fn attr(&self, id: ElementId, name: &str) -> Option<String> {
        self.node(id)
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        upsert(&mut self.node_mut(id).attrs, name, value);
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.node(id).classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, id: ElementId, class: &str) {
        if !self.has_class(id, class) {
            self.node_mut(id).classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, id: ElementId, class: &str) {
        self.node_mut(id).classes.retain(|c| c != class);
    }

    fn style(&self, id: ElementId, property: &str) -> Option<String> {
        self.node(id)
            .styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.clone())
    }

    fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        let styles = &mut self.node_mut(id).styles;
        if value.is_empty() {
            styles.retain(|(k, _)| k != property);
        } else {
            upsert(styles, property, value);
        }
    }

    fn clear_children(&mut self, parent: ElementId) {
        for id in self.children(parent) {
            self.node_mut(id).attached = false;
        }
        let nodes = &self.nodes;
        self.cards.retain(|id| nodes[id.0].attached);
        self.node_mut(parent).inner_html.clear();
    }

    fn append_child(&mut self, parent: ElementId, child: NewElement) -> ElementId {
        let card_class = PROJECT_CARD.trim_start_matches('.');
        let is_card = child.classes.iter().any(|c| c == card_class);
        let id = self.push(Node::from_new(child, parent));

        let rendered = self.outer_html(id);
        self.node_mut(parent).inner_html.push_str(&rendered);

        if is_card {
            let at = match self.slots.get(&parent) {
                Some(&slot) => {
                    let nodes = &self.nodes;
                    slot + self
                        .cards
                        .iter()
                        .filter(|c| nodes[c.0].parent == Some(parent))
                        .count()
                }
                None => self.cards.len(),
            };
            self.cards.insert(at.min(self.cards.len()), id);
        }
        id
    }

    async fn next_frame(&mut self) {
        self.frames += 1;
        tokio::task::yield_now().await;
    }

    async fn sleep(&mut self, duration: Duration) {
        self.timers.push(duration);
        tokio::task::yield_now().await;
    }
}
