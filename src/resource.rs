//! Identifiable resource contract
//!
//! Everything a collection stores implements [`Resource`]: a stable identity
//! used for lookups and removal, and a display tag used when rendering choices.
//! The collections are otherwise opaque to item contents.

/// Stable identity of a stored resource
pub type ResourceId = u64;

/// Contract for items managed by the collections.
///
/// `Clone` must produce a structurally independent copy: the stores hand out
/// clones on read paths so that callers can never mutate internal state through
/// a returned item.
pub trait Resource: Clone + Send + Sync {
    /// Stable identity, or `None` for items not yet persisted remotely
    fn id(&self) -> Option<ResourceId>;

    /// Display tag
    fn tag(&self) -> &str;
}

/// One entry in a placeholder-prefixed listing.
///
/// [`ResourceStore::all_with_placeholder`](crate::store::ResourceStore::all_with_placeholder)
/// prepends a synthetic "unselected" option ahead of the real items: either an
/// empty slot, or a zero-identity placeholder carrying a display tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<R> {
    /// No selection at all
    Empty,
    /// Synthetic zero-identity option with a display tag
    Placeholder(String),
    /// A real item
    Item(R),
}

impl<R: Resource> Slot<R> {
    /// Identity of this slot; placeholders read as id 0, empty slots as `None`
    pub fn id(&self) -> Option<ResourceId> {
        match self {
            Self::Empty => None,
            Self::Placeholder(_) => Some(0),
            Self::Item(item) => item.id(),
        }
    }

    /// Display tag, if the slot carries one
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Placeholder(tag) => Some(tag),
            Self::Item(item) => Some(item.tag()),
        }
    }

    /// The real item, if any
    pub fn item(&self) -> Option<&R> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Fruit {
        id: u64,
        name: String,
    }

    impl Resource for Fruit {
        fn id(&self) -> Option<ResourceId> {
            Some(self.id)
        }

        fn tag(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_slot_identity() {
        let empty: Slot<Fruit> = Slot::Empty;
        assert_eq!(empty.id(), None);
        assert_eq!(empty.tag(), None);
        assert!(empty.item().is_none());

        let placeholder: Slot<Fruit> = Slot::Placeholder("pick one".to_string());
        assert_eq!(placeholder.id(), Some(0));
        assert_eq!(placeholder.tag(), Some("pick one"));

        let item = Slot::Item(Fruit {
            id: 7,
            name: "plum".to_string(),
        });
        assert_eq!(item.id(), Some(7));
        assert_eq!(item.tag(), Some("plum"));
        assert_eq!(item.item().map(|f| f.id), Some(7));
    }
}
