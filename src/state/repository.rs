use std::collections::HashMap;

use crate::calculator::IngredientLookup;
use crate::models::{Ingredient, Recipe};

/// Anything stored under a string id.
pub trait Record {
    fn id(&self) -> &str;
}

impl Record for Ingredient {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Recipe {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Storage seam for ingredients and recipes.
///
/// The cost book only talks to this trait, so the backing store can be
/// swapped without touching the calculation code.
pub trait Repository<T: Record> {
    fn get(&self, id: &str) -> Option<&T>;

    fn get_mut(&mut self, id: &str) -> Option<&mut T>;

    /// All records, in no particular order.
    fn list(&self) -> Vec<&T>;

    /// Insert or replace by id. Returns the replaced record, if any.
    fn upsert(&mut self, record: T) -> Option<T>;

    fn delete(&mut self, id: &str) -> Option<T>;

    fn clear(&mut self);

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process repository keyed by record id.
#[derive(Debug, Clone)]
pub struct MemoryRepository<T> {
    records: HashMap<String, T>,
}

impl<T: Record> MemoryRepository<T> {
    /// Build from a list; later duplicates of an id replace earlier ones.
    pub fn new(records: Vec<T>) -> Self {
        records.into_iter().collect()
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
}

impl<T: Record> FromIterator<T> for MemoryRepository<T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut records = HashMap::new();
        for record in iter {
            records.insert(record.id().to_string(), record);
        }
        Self { records }
    }
}

impl<T: Record> Repository<T> for MemoryRepository<T> {
    fn get(&self, id: &str) -> Option<&T> {
        self.records.get(id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.records.get_mut(id)
    }

    fn list(&self) -> Vec<&T> {
        self.records.values().collect()
    }

    fn upsert(&mut self, record: T) -> Option<T> {
        self.records.insert(record.id().to_string(), record)
    }

    fn delete(&mut self, id: &str) -> Option<T> {
        self.records.remove(id)
    }

    fn clear(&mut self) {
        self.records.clear();
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

impl IngredientLookup for MemoryRepository<Ingredient> {
    fn find(&self, id: &str) -> Option<&Ingredient> {
        self.records.get(id)
    }
}
