//! The error raised when an element index does not exist.

/// An element index that is not smaller than the number of elements in a
/// [`VisitableTuple`].
///
/// [`VisitableTuple::accept`] treats such an index as a bug in the caller and
/// panics with this error's message. [`VisitableTuple::try_accept`] returns it
/// instead, for callers whose indices come from somewhere they do not control.
///
/// # Examples
///
/// ```
/// use visitable::{IndexOutOfBounds, VisitableTuple, Visitor};
///
/// struct Ignore;
///
/// impl<E> Visitor<E> for Ignore {
///     fn visit(&mut self, _element: &E) {}
/// }
///
/// let tuple: VisitableTuple<(u8, u8), Ignore> = VisitableTuple::new((1, 2));
/// let error = tuple.try_accept(&mut Ignore, 5).unwrap_err();
///
/// assert_eq!(error, IndexOutOfBounds { index: 5, count: 2 });
/// assert_eq!(
///     error.to_string(),
///     "index 5 passed to VisitableTuple exceeds the 2 tuple elements"
/// );
/// ```
///
/// [`VisitableTuple`]: crate::VisitableTuple
/// [`VisitableTuple::accept`]: crate::VisitableTuple::accept
/// [`VisitableTuple::try_accept`]: crate::VisitableTuple::try_accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::Error)]
#[display("index {index} passed to VisitableTuple exceeds the {count} tuple elements")]
pub struct IndexOutOfBounds {
    /// The index that was requested.
    pub index: usize,
    /// The number of elements in the tuple.
    pub count: usize,
}
