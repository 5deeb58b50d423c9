use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

/// Application-wide services made available to command trees when they are built and to actions
/// when they run. Entries are keyed by type, so at most one value of each type is held.
#[derive(Default, Clone)]
pub struct Registry {
    services: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service, replacing any previous value of the same type.
    pub fn insert<T: Any + Send + Sync>(&mut self, service: T) -> &mut Self {
        self.services.insert(TypeId::of::<T>(), Arc::new(service));
        self
    }

    /// Builder-style variant of [`insert`](Registry::insert).
    pub fn with<T: Any + Send + Sync>(mut self, service: T) -> Self {
        self.insert(service);
        self
    }

    /// Looks up a service by type.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.services
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|service| service.downcast::<T>().ok())
    }

    /// Looks up a service by type, failing with a descriptive error if it was never registered.
    pub fn require<T: Any + Send + Sync>(&self) -> anyhow::Result<Arc<T>> {
        self.get::<T>().ok_or_else(|| {
            anyhow::anyhow!(
                "no service of type {} is registered",
                std::any::type_name::<T>()
            )
        })
    }

    /// Returns whether a service of the given type is registered.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("services", &self.services.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Economy(u32);

    #[test]
    fn lookup_by_type() {
        let registry = Registry::new().with(Economy(7)).with("motd".to_owned());
        assert_eq!(registry.get::<Economy>().map(|e| e.0), Some(7));
        assert_eq!(registry.get::<String>().as_deref().map(String::as_str), Some("motd"));
        assert!(registry.get::<u8>().is_none());
        assert!(registry.require::<u8>().is_err());
        assert!(registry.contains::<Economy>());
    }

    #[test]
    fn insert_replaces() {
        let mut registry = Registry::new();
        registry.insert(Economy(1)).insert(Economy(2));
        assert_eq!(registry.require::<Economy>().map(|e| e.0).ok(), Some(2));
    }
}
