//! Lazily built lookup between element positions and element types.

use alloc::vec::Vec;
use core::any::TypeId;
#[cfg(feature = "std")]
use std::sync::OnceLock as OnceImpl;

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;
#[cfg(not(feature = "std"))]
use spin::Once as OnceImpl;

/// The [`TypeId`] of every element, and the reverse mapping from each
/// [`TypeId`] to the ascending positions holding that type.
pub(crate) struct TypeTable {
    type_ids: Vec<TypeId>,
    positions: HashMap<TypeId, Vec<usize>, FxBuildHasher>,
}

impl TypeTable {
    fn new(type_ids: Vec<TypeId>) -> Self {
        let mut positions = HashMap::with_hasher(FxBuildHasher);
        for (position, &type_id) in type_ids.iter().enumerate() {
            positions
                .entry(type_id)
                .or_insert_with(Vec::new)
                .push(position);
        }
        tracing::trace!(
            distinct_types = positions.len(),
            values_count = type_ids.len(),
            "built element type index"
        );
        Self {
            type_ids,
            positions,
        }
    }

    /// Returns the [`TypeId`] of the element at `position`.
    pub(crate) fn type_id(&self, position: usize) -> Option<TypeId> {
        self.type_ids.get(position).copied()
    }

    /// Returns the positions of the elements with type `type_id`.
    pub(crate) fn positions(&self, type_id: TypeId) -> &[usize] {
        self.positions
            .get(&type_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// A [`TypeTable`] that is built on first use, at most once.
///
/// It lives next to the structured value in the shared allocation, so clones
/// of an aggregate share one table.
pub(crate) struct TypeIndex(OnceImpl<TypeTable>);

impl TypeIndex {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self(OnceImpl::new())
    }

    /// Returns the table, building it from the element types returned by
    /// `type_ids` if this is the first lookup.
    pub(crate) fn get_or_build<F>(&self, type_ids: F) -> &TypeTable
    where
        F: FnOnce() -> Vec<TypeId>,
    {
        #[cfg(not(feature = "std"))]
        let table = self.0.call_once(|| TypeTable::new(type_ids()));

        #[cfg(feature = "std")]
        let table = self.0.get_or_init(|| TypeTable::new(type_ids()));

        table
    }

    #[cfg(test)]
    pub(crate) fn is_built(&self) -> bool {
        self.0.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_type_index_positions() {
        let index = TypeIndex::new();
        assert!(!index.is_built());

        let table = index.get_or_build(|| {
            vec![
                TypeId::of::<u8>(),
                TypeId::of::<char>(),
                TypeId::of::<u8>(),
                TypeId::of::<&'static str>(),
                TypeId::of::<u8>(),
            ]
        });
        assert!(index.is_built());

        assert_eq!(table.positions(TypeId::of::<u8>()), [0, 2, 4]);
        assert_eq!(table.positions(TypeId::of::<char>()), [1]);
        assert_eq!(table.positions(TypeId::of::<&'static str>()), [3]);
        assert!(table.positions(TypeId::of::<u16>()).is_empty());

        assert_eq!(table.type_id(1), Some(TypeId::of::<char>()));
        assert_eq!(table.type_id(5), None);
    }

    #[test]
    fn test_type_index_builds_once() {
        let index = TypeIndex::new();
        let mut builds = 0;

        index.get_or_build(|| {
            builds += 1;
            vec![TypeId::of::<u8>()]
        });
        let table = index.get_or_build(|| {
            builds += 1;
            Vec::new()
        });

        assert_eq!(builds, 1);
        assert_eq!(table.positions(TypeId::of::<u8>()), [0]);
    }

    #[test]
    fn test_type_index_empty() {
        let index = TypeIndex::new();
        let table = index.get_or_build(Vec::new);
        assert!(table.positions(TypeId::of::<u8>()).is_empty());
        assert_eq!(table.type_id(0), None);
    }
}
