//! Registry type definitions.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// String props passed to a component, keyed by attribute name.
pub type Props = BTreeMap<String, String>;

/// Something an MDX tag can render to.
///
/// `children` is the already-rendered HTML of the element's content.
pub trait Component: Send + Sync {
    /// Render the component to HTML.
    fn render(&self, props: &Props, children: &str) -> String;
}

impl<F> Component for F
where
    F: Fn(&Props, &str) -> String + Send + Sync,
{
    fn render(&self, props: &Props, children: &str) -> String {
        (self)(props, children)
    }
}

/// Mapping from MDX tag name to rendering component.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, Arc<dyn Component>>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a component.
    pub fn insert(&mut self, name: impl Into<String>, component: impl Component + 'static) {
        self.components.insert(name.into(), Arc::new(component));
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, component: impl Component + 'static) -> Self {
        self.insert(name, component);
        self
    }

    /// Copies every entry of `other` into `self`; `other` wins on collisions.
    pub fn merge(&mut self, other: ComponentRegistry) {
        self.components.extend(other.components);
    }

    /// Looks a component up by tag name.
    pub fn get(&self, name: &str) -> Option<&dyn Component> {
        self.components.get(name).map(|c| c.as_ref())
    }

    /// Whether a tag name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Registered tag names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Escapes text content.
pub(crate) fn text(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

/// Escapes a double-quoted attribute value.
pub(crate) fn attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}
