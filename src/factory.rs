//! Container creation seam for tree-building parses.

use crate::value::{Array, Object};

/// Supplies the containers the tree-building parser fills.
///
/// Implement this to substitute prepared containers, for example with a
/// capacity hint. Each hook is consulted at most once per container creation
/// point; returning `None` falls back to the default container, so an
/// implementation only overrides what it cares about.
///
/// # Examples
///
/// ```
/// use jsonsax::{parse_with_factory, ContainerFactory, Object, Value};
///
/// struct Roomy;
///
/// impl ContainerFactory for Roomy {
///     fn create_object(&self) -> Option<Object> {
///         Some(Object::with_capacity(64))
///     }
/// }
///
/// let v = parse_with_factory(r#"{"a": 1}"#, &Roomy).unwrap();
/// assert!(v.is_object());
/// ```
pub trait ContainerFactory {
    /// Returns a container for a JSON object, or `None` to use the default.
    fn create_object(&self) -> Option<Object> {
        None
    }

    /// Returns a container for a JSON array, or `None` to use the default.
    fn create_array(&self) -> Option<Array> {
        None
    }
}

/// The built-in containers: [`Object`] and [`Array`] as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContainers;

impl ContainerFactory for DefaultContainers {}
