//! Type container registry.

use kdl_core::{Lexeme, TypeContainer};

use crate::error::{Result, TargetError};

/// The type definitions contributed during a compilation run, in the order
/// they were added.
///
/// Names are not required to be unique; lookups return the first match.
#[derive(Debug, Clone, Default)]
pub struct TypeContainerRegistry {
    containers: Vec<TypeContainer>,
}

impl TypeContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, container: TypeContainer) {
        log::debug!("registered type '{}' ({})", container.name(), container.code());
        self.containers.push(container);
    }

    pub fn count(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// The container at `index`, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn at(&self, index: usize) -> &TypeContainer {
        &self.containers[index]
    }

    /// First container named `name`, if any.
    pub fn get(&self, name: &str) -> Option<&TypeContainer> {
        self.containers.iter().find(|c| c.name() == name)
    }

    /// First container named after `name`.
    ///
    /// A miss means the front end referenced a type it never defined, which
    /// ends the run; the error carries the location of the reference.
    pub fn named(&self, name: &Lexeme) -> Result<&TypeContainer> {
        self.get(name.text()).ok_or_else(|| TargetError::MissingType {
            name: name.text().to_string(),
            location: name.location().clone(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeContainer> {
        self.containers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kdl_core::{FieldKind, SourceLocation, TypeCode, TypeField};

    fn container(name: &str, code: &str) -> TypeContainer {
        TypeContainer::new(name, TypeCode::new(code).unwrap())
    }

    fn lexeme(text: &str) -> Lexeme {
        Lexeme::new(text, SourceLocation::new("main.kdl", 4, 9))
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut registry = TypeContainerRegistry::new();
        registry.add(container("A", "AAAA"));
        registry.add(container("B", "BBBB"));
        registry.add(container("C", "CCCC"));

        assert_eq!(registry.count(), 3);
        let names: Vec<_> = (0..3).map(|i| registry.at(i).name()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        let iterated: Vec<_> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(iterated, names);
    }

    #[test]
    fn first_match_wins() {
        let mut registry = TypeContainerRegistry::new();
        registry.add(container("Sprite", "spr1"));
        registry.add(container("Other", "othr"));
        registry.add(container("Sprite", "spr2"));

        let found = registry.named(&lexeme("Sprite")).unwrap();
        assert_eq!(found.code().as_str(), "spr1");
    }

    #[test]
    fn lookup_returns_layout() {
        let mut registry = TypeContainerRegistry::new();
        registry.add(
            container("Greeting", "STR ").with_field(TypeField::new("text", FieldKind::PString)),
        );
        let found = registry.named(&lexeme("Greeting")).unwrap();
        assert_eq!(found.fields().len(), 1);
    }

    #[test]
    fn missing_type_is_fatal_with_location() {
        let mut registry = TypeContainerRegistry::new();
        registry.add(container("Sprite", "spr1"));

        let err = registry.named(&lexeme("Weapon")).unwrap_err();
        match &err {
            TargetError::MissingType { name, location } => {
                assert_eq!(name, "Weapon");
                assert_eq!(location.line, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            err.to_string(),
            "main.kdl:4:9: missing definition for type 'Weapon'"
        );
    }

    #[test]
    fn empty_registry() {
        let registry = TypeContainerRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("Anything").is_none());
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let registry = TypeContainerRegistry::new();
        registry.at(0);
    }
}
