//! Internal utility types.

/// Marker type used when type-erasing elements and visitors.
///
/// This zero-sized type serves as a placeholder in pointer types when the
/// actual concrete type has been erased. For example, `NonNull<Erased>`
/// inside a [`RawHandle`] points at an element whose concrete type is only
/// known to the vtable stored next to it.
///
/// Using a distinct marker type (rather than `()`) makes the intent clearer
/// in type signatures and error messages.
///
/// [`RawHandle`]: crate::RawHandle
pub(crate) struct Erased;
