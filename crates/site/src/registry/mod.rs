//! MDX component registry.

/// Site callout components.
pub mod callouts;
/// Framework default components.
pub mod defaults;
/// Registry types.
pub mod types;

pub use types::{Component, ComponentRegistry, Props};

/// Builds the registry used to render docs pages: framework defaults, then
/// the `Tip` and `Warning` callouts, then `overrides` (which win on collision).
///
/// ```
/// use archdocs_site::registry::build_registry;
///
/// let registry = build_registry(None);
/// assert!(registry.contains("Tip"));
/// assert!(registry.contains("Warning"));
/// ```
pub fn build_registry(overrides: Option<ComponentRegistry>) -> ComponentRegistry {
    let mut registry = defaults::default_components()
        .with("Tip", callouts::tip)
        .with("Warning", callouts::warning);
    if let Some(overrides) = overrides {
        registry.merge(overrides);
    }
    registry
}
