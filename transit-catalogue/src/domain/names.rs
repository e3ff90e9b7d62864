//! Name interning for stops and buses.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// A dense id handed out by a [`NameRegistry`].
pub trait NameId: Copy + Eq + Hash + fmt::Debug {
    /// Build the id for the `index`-th interned name.
    fn from_index(index: usize) -> Self;

    /// Position of the name in its registry.
    fn index(self) -> usize;
}

macro_rules! name_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl NameId for $name {
            fn from_index(index: usize) -> Self {
                $name(index as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

name_id! {
    /// Interned stop name.
    StopId
}

name_id! {
    /// Interned bus name.
    BusId
}

/// Owns every distinct name exactly once and maps it to a dense id.
///
/// Ids are assigned in first-seen order and never reused. The string storage
/// is shared between the lookup map and the id table, so cloning a registry
/// only bumps reference counts.
#[derive(Debug, Clone)]
pub struct NameRegistry<I> {
    names: Vec<Arc<str>>,
    ids: HashMap<Arc<str>, I>,
}

impl<I> Default for NameRegistry<I> {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            ids: HashMap::new(),
        }
    }
}

impl<I: NameId> NameRegistry<I> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, interning it on first sight.
    pub fn intern(&mut self, name: &str) -> I {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }

        let id = I::from_index(self.names.len());
        let name: Arc<str> = Arc::from(name);
        self.names.push(Arc::clone(&name));
        self.ids.insert(name, id);
        id
    }

    /// Look up the id of an already interned name.
    pub fn get(&self, name: &str) -> Option<I> {
        self.ids.get(name).copied()
    }

    /// Resolve an id issued by this registry.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    pub fn name(&self, id: I) -> &str {
        &self.names[id.index()]
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All names in id order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (I::from_index(index), name.as_ref()))
    }
}
