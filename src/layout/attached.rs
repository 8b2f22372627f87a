//! Per-element attributes kept by the layout.
//!
//! Elements are opaque to the layout, so their location and scale hints live in a side-table keyed
//! by element id. An entry exists exactly as long as the layout owns the element, either placed in
//! a cell or declared as pending contents.

use std::collections::HashMap;
use std::hash::Hash;

use super::types::{Location, ScaleHints};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Attached {
    /// Cell of a placed element, or the requested cell of a declared one.
    pub location: Location,
    pub hints: ScaleHints,
}

#[derive(Debug)]
pub(crate) struct AttachedTable<Id> {
    entries: HashMap<Id, Attached>,
}

impl<Id: Eq + Hash + Clone> AttachedTable<Id> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, id: &Id) -> Option<&Attached> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &Id) -> Option<&mut Attached> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.entries.contains_key(id)
    }

    /// Records the location of an element, keeping its hints if it already had an entry.
    pub fn set_location(&mut self, id: &Id, location: Location) {
        match self.entries.get_mut(id) {
            Some(entry) => entry.location = location,
            None => {
                self.entries.insert(
                    id.clone(),
                    Attached {
                        location,
                        hints: ScaleHints::empty(),
                    },
                );
            }
        }
    }

    pub fn insert(&mut self, id: Id, attached: Attached) {
        self.entries.insert(id, attached);
    }

    pub fn remove(&mut self, id: &Id) -> Option<Attached> {
        self.entries.remove(id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
