//! Delegated click routing for rendered regions.
//!
//! The host document tree is abstracted behind [`Element`]. A [`LinkRegion`]
//! holds rendered markup and at most one attached [`ClickRouter`]; each
//! activation inside the region is dispatched to that router, which walks up
//! from the activated element looking for the internal-link marker.

use std::fmt;
use std::sync::Arc;

use crate::link::INTERNAL_LINK_ATTR;
use crate::markup::Markup;

/// A node of the host document tree.
pub trait Element {
    /// Value of the named attribute, if present.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Enclosing element, or `None` at the top of the tree.
    fn parent(&self) -> Option<&Self>;
}

/// One activation (click) event.
#[derive(Debug)]
pub struct Activation<'a, E> {
    target: &'a E,
    default_prevented: bool,
}

impl<'a, E: Element> Activation<'a, E> {
    #[must_use]
    pub fn new(target: &'a E) -> Self {
        Self {
            target,
            default_prevented: false,
        }
    }

    #[must_use]
    pub fn target(&self) -> &'a E {
        self.target
    }

    /// Suppress the host's default navigation for this activation.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What the router did with an activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Routed {
    /// Navigation callback invoked with this path.
    Navigated(String),
    /// Internal link hit but no callback installed; default still prevented.
    Suppressed(String),
    /// Not an internal link; default behavior kept.
    Ignored,
}

type NavigateFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Routes activations on internal links to a navigation callback.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use ink_renderer::{Activation, ClickRouter, Element, INTERNAL_LINK_ATTR, Routed};
///
/// struct Link(&'static str);
///
/// impl Element for Link {
///     fn attribute(&self, name: &str) -> Option<&str> {
///         (name == INTERNAL_LINK_ATTR).then_some(self.0)
///     }
///     fn parent(&self) -> Option<&Self> {
///         None
///     }
/// }
///
/// let visited = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&visited);
/// let router = ClickRouter::new().with_navigate(move |path| sink.lock().unwrap().push(path.to_owned()));
///
/// let link = Link("/docs/setup");
/// let mut activation = Activation::new(&link);
/// assert_eq!(router.handle(&mut activation), Routed::Navigated("/docs/setup".into()));
/// assert!(activation.is_default_prevented());
/// assert_eq!(*visited.lock().unwrap(), vec!["/docs/setup"]);
/// ```
#[derive(Clone, Default)]
pub struct ClickRouter {
    navigate: Option<NavigateFn>,
}

impl fmt::Debug for ClickRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickRouter")
            .field("navigate", &self.navigate.is_some())
            .finish()
    }
}

impl ClickRouter {
    /// Router with no navigation callback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the navigation callback.
    #[must_use]
    pub fn with_navigate(mut self, navigate: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.navigate = Some(Arc::new(navigate));
        self
    }

    /// Handle one activation.
    ///
    /// The nearest element (the target or an ancestor) carrying the internal
    /// link marker decides the path. The callback runs at most once.
    pub fn handle<E: Element>(&self, activation: &mut Activation<'_, E>) -> Routed {
        let Some(path) = find_internal_path(activation.target()) else {
            return Routed::Ignored;
        };
        activation.prevent_default();
        match &self.navigate {
            Some(navigate) => {
                navigate(path);
                Routed::Navigated(path.to_owned())
            }
            None => Routed::Suppressed(path.to_owned()),
        }
    }
}

fn find_internal_path<E: Element>(target: &E) -> Option<&str> {
    let mut node = Some(target);
    while let Some(element) = node {
        if let Some(path) = element.attribute(INTERNAL_LINK_ATTR) {
            return Some(path);
        }
        node = element.parent();
    }
    None
}

/// A stable rendered region with one delegated listener.
///
/// Replacing the markup keeps the listener; detaching removes it.
#[derive(Debug, Default)]
pub struct LinkRegion {
    markup: Markup,
    router: Option<ClickRouter>,
}

impl LinkRegion {
    #[must_use]
    pub fn new(markup: Markup) -> Self {
        Self {
            markup,
            router: None,
        }
    }

    /// Attach a router, replacing any previously attached one.
    pub fn attach(&mut self, router: ClickRouter) {
        self.router = Some(router);
    }

    /// Swap in new markup. The attached router stays.
    pub fn replace(&mut self, markup: Markup) {
        self.markup = markup;
    }

    /// Remove the router. Later activations are ignored.
    pub fn detach(&mut self) -> Option<ClickRouter> {
        self.router.take()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.router.is_some()
    }

    #[must_use]
    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    /// Deliver an activation from inside the region.
    pub fn dispatch<E: Element>(&self, activation: &mut Activation<'_, E>) -> Routed {
        match &self.router {
            Some(router) => router.handle(activation),
            None => Routed::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use pretty_assertions::assert_eq;

    struct Node<'p> {
        attrs: HashMap<&'static str, &'static str>,
        parent: Option<&'p Node<'p>>,
    }

    impl<'p> Node<'p> {
        fn new(attrs: &[(&'static str, &'static str)], parent: Option<&'p Node<'p>>) -> Self {
            Self {
                attrs: attrs.iter().copied().collect(),
                parent,
            }
        }
    }

    impl Element for Node<'_> {
        fn attribute(&self, name: &str) -> Option<&str> {
            self.attrs.get(name).copied()
        }

        fn parent(&self) -> Option<&Self> {
            self.parent
        }
    }

    fn recording_router() -> (ClickRouter, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let router =
            ClickRouter::new().with_navigate(move |path| sink.lock().unwrap().push(path.to_owned()));
        (router, calls)
    }

    #[test]
    fn test_internal_link_navigates_once() {
        let (router, calls) = recording_router();
        let link = Node::new(&[(INTERNAL_LINK_ATTR, "/docs/sdk/python#install")], None);
        let mut activation = Activation::new(&link);

        let routed = router.handle(&mut activation);

        assert_eq!(routed, Routed::Navigated("/docs/sdk/python#install".to_owned()));
        assert!(activation.is_default_prevented());
        assert_eq!(*calls.lock().unwrap(), vec!["/docs/sdk/python#install"]);
    }

    #[test]
    fn test_nested_target_walks_to_ancestor() {
        let (router, calls) = recording_router();
        let article = Node::new(&[("class", "prose")], None);
        let link = Node::new(&[(INTERNAL_LINK_ATTR, "/docs/a")], Some(&article));
        let strong = Node::new(&[], Some(&link));
        let mut activation = Activation::new(&strong);

        assert_eq!(router.handle(&mut activation), Routed::Navigated("/docs/a".to_owned()));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_external_link_ignored() {
        let (router, calls) = recording_router();
        let link = Node::new(&[("href", "https://example.com"), ("class", "external-link")], None);
        let mut activation = Activation::new(&link);

        assert_eq!(router.handle(&mut activation), Routed::Ignored);
        assert!(!activation.is_default_prevented());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_callback_still_prevents_default() {
        let router = ClickRouter::new();
        let link = Node::new(&[(INTERNAL_LINK_ATTR, "/docs/a")], None);
        let mut activation = Activation::new(&link);

        assert_eq!(router.handle(&mut activation), Routed::Suppressed("/docs/a".to_owned()));
        assert!(activation.is_default_prevented());
    }

    #[test]
    fn test_region_replace_keeps_listener() {
        let (router, calls) = recording_router();
        let mut region = LinkRegion::new(crate::render("[a](/docs/a)"));
        region.attach(router);
        region.replace(crate::render("[b](/docs/b)"));

        assert!(region.is_attached());
        assert_eq!(region.markup().internal_paths(), vec!["/docs/b"]);

        let link = Node::new(&[(INTERNAL_LINK_ATTR, "/docs/b")], None);
        region.dispatch(&mut Activation::new(&link));
        assert_eq!(*calls.lock().unwrap(), vec!["/docs/b"]);
    }

    #[test]
    fn test_detached_region_ignores_activations() {
        let (router, calls) = recording_router();
        let mut region = LinkRegion::new(Markup::default());
        region.attach(router);
        assert!(region.detach().is_some());

        let link = Node::new(&[(INTERNAL_LINK_ATTR, "/docs/a")], None);
        let mut activation = Activation::new(&link);
        assert_eq!(region.dispatch(&mut activation), Routed::Ignored);
        assert!(!activation.is_default_prevented());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_attach_replaces_previous_router() {
        let (first, first_calls) = recording_router();
        let (second, second_calls) = recording_router();
        let mut region = LinkRegion::default();
        region.attach(first);
        region.attach(second);

        let link = Node::new(&[(INTERNAL_LINK_ATTR, "/docs/a")], None);
        region.dispatch(&mut Activation::new(&link));
        assert!(first_calls.lock().unwrap().is_empty());
        assert_eq!(second_calls.lock().unwrap().len(), 1);
    }
}
