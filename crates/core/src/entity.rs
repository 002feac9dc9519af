//! Things with a stable identity: inventory records, portal accounts.

/// An object whose identity survives edits to its other fields.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
