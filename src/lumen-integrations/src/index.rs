//! Name-keyed index of active integrations.

use indexmap::IndexMap;

use crate::integration::{Integration, IntegrationRef};

/// Map of integrations assigned to a client, keyed by name.
///
/// Keys are kept in resolution order. Inserting a name that is already
/// present replaces the instance but keeps the original position.
#[derive(Clone, Default, Debug)]
pub struct IntegrationIndex {
    entries: IndexMap<String, IntegrationRef>,
}

impl IntegrationIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an integration under its name, returning the replaced one.
    pub fn insert(&mut self, integration: IntegrationRef) -> Option<IntegrationRef> {
        let name = integration.name().to_string();
        self.entries.insert(name, integration)
    }

    /// Look up an integration by name.
    pub fn get(&self, name: &str) -> Option<&IntegrationRef> {
        self.entries.get(name)
    }

    /// Look up an integration by name and downcast it to its concrete type.
    pub fn get_as<T: Integration + 'static>(&self, name: &str) -> Option<&T> {
        self.entries
            .get(name)
            .and_then(|integration| integration.as_any().downcast_ref::<T>())
    }

    /// Check whether a name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names in resolution order.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, integration)` pairs in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IntegrationRef)> {
        self.entries.iter().map(|(name, i)| (name.as_str(), i))
    }
}

impl FromIterator<IntegrationRef> for IntegrationIndex {
    fn from_iter<I: IntoIterator<Item = IntegrationRef>>(iter: I) -> Self {
        let mut index = Self::new();
        for integration in iter {
            index.insert(integration);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use crate::hub::CurrentHub;
    use crate::processor::EventProcessors;
    use std::any::Any;
    use std::sync::Arc;

    struct Tagged {
        name: &'static str,
        tag: u32,
    }

    impl Integration for Tagged {
        fn name(&self) -> &str {
            self.name
        }

        fn setup_once(&self, _processors: &EventProcessors, _hub: &CurrentHub) -> Result<()> {
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn tagged(name: &'static str, tag: u32) -> IntegrationRef {
        Arc::new(Tagged { name, tag })
    }

    #[test]
    fn test_later_insert_overwrites_but_keeps_position() {
        let index: IntegrationIndex =
            vec![tagged("a", 1), tagged("b", 2), tagged("a", 3)].into_iter().collect();

        assert_eq!(index.names(), vec!["a", "b"]);
        assert_eq!(index.get_as::<Tagged>("a").map(|t| t.tag), Some(3));
    }

    #[test]
    fn test_lookup_missing() {
        let index = IntegrationIndex::new();
        assert!(index.is_empty());
        assert!(index.get("nope").is_none());
        assert!(!index.contains("nope"));
    }

    #[test]
    fn test_iter_pairs() {
        let index: IntegrationIndex = vec![tagged("x", 1), tagged("y", 2)].into_iter().collect();
        let pairs: Vec<(&str, u32)> = index
            .iter()
            .map(|(name, i)| (name, i.as_any().downcast_ref::<Tagged>().unwrap().tag))
            .collect();
        assert_eq!(pairs, vec![("x", 1), ("y", 2)]);
    }
}
