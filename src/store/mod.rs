//! Generic ordered item store
//!
//! [`ResourceStore`] is the storage substrate under both collection layers:
//! an ordered list of identifiable items with lookup by identity, positional
//! insertion, removal, placeholder-prefixed listings, and aggregation of
//! registered filter contributors into one query-parameter set.
//!
//! Read paths that return items hand out clones, never references into the
//! internal list, so a caller mutating a returned item cannot corrupt the
//! store.

use crate::filter::{merge_params, FilterParams, ParamMap};
use crate::resource::{Resource, ResourceId, Slot};


/// Ordered list of identifiable items plus registered filter contributors
pub struct ResourceStore<R: Resource> {
    items: Vec<R>,
    filters: Vec<Box<dyn FilterParams + Send + Sync>>,
}

impl<R: Resource> Default for ResourceStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceStore<R> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Create a store seeded with items
    pub fn with_items(items: Vec<R>) -> Self {
        Self {
            items,
            filters: Vec::new(),
        }
    }

    /// All items, in store order
    pub fn items(&self) -> &[R] {
        &self.items
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item, or `None` on an empty store
    pub fn first(&self) -> Option<&R> {
        self.items.first()
    }

    /// Last item, or `None` on an empty store
    pub fn last(&self) -> Option<&R> {
        self.items.last()
    }

    /// Clone of the first item whose identity equals `id`.
    ///
    /// `None` when `id` is `None` or no item matches.
    pub fn get_by_id(&self, id: Option<ResourceId>) -> Option<R> {
        let id = id?;
        self.items
            .iter()
            .find(|item| item.id() == Some(id))
            .cloned()
    }

    /// Clones of the items whose identity appears in `ids`, in store order
    pub fn get_many_ids(&self, ids: &[ResourceId]) -> Vec<R> {
        self.items
            .iter()
            .filter(|item| item.id().is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect()
    }

    /// Append an item. Duplicate identities are permitted.
    pub fn add(&mut self, item: R) {
        self.items.push(item);
    }

    /// Insert an item at `index`, shifting later items right
    pub fn insert(&mut self, index: usize, item: R) {
        self.items.insert(index, item);
    }

    /// Append a batch of items
    pub fn extend(&mut self, items: impl IntoIterator<Item = R>) {
        self.items.extend(items);
    }

    /// Remove the first item equal to `item`; no-op if absent
    pub fn remove(&mut self, item: &R)
    where
        R: PartialEq,
    {
        if let Some(index) = self.items.iter().position(|stored| stored == item) {
            self.items.remove(index);
        }
    }

    /// Remove the first item whose identity equals `id`; no-op if absent
    pub fn remove_by_id(&mut self, id: ResourceId) {
        if let Some(index) = self.items.iter().position(|item| item.id() == Some(id)) {
            self.items.remove(index);
        }
    }

    /// All items as cloned slots, with a synthetic "unselected" option first.
    ///
    /// With a tag, the leading slot is a zero-identity placeholder carrying it;
    /// without, it is an empty slot.
    pub fn all_with_placeholder(&self, tag: Option<&str>) -> Vec<Slot<R>> {
        let lead = match tag {
            Some(tag) => Slot::Placeholder(tag.to_string()),
            None => Slot::Empty,
        };

        let mut slots = Vec::with_capacity(self.items.len() + 1);
        slots.push(lead);
        slots.extend(self.items.iter().cloned().map(Slot::Item));
        slots
    }

    /// Empty the store
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Register a filter contributor. Contribution order is registration order.
    pub fn add_filter(&mut self, filter: impl FilterParams + Send + Sync + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Drop all registered filter contributors
    pub fn clear_filters(&mut self) -> &mut Self {
        self.filters.clear();
        self
    }

    /// Merge every registered contributor's non-null parameters into one set.
    ///
    /// Later-registered contributors win on key collision.
    pub fn params(&self) -> ParamMap {
        let mut result = ParamMap::new();
        for filter in &self.filters {
            merge_params(&mut result, filter.filter_params());
        }
        result
    }

    /// Serialization hook: a marshaling collaborator calls this immediately
    /// before writing a fresh payload into the store.
    pub fn on_before_serialization(&mut self) {
        self.clear();
    }
}
