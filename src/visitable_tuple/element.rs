use core::marker::PhantomData;

use visitable_internals::RawHandle;

/// A borrowed view of one element of a [`VisitableTuple`], obtained without
/// naming the element's type.
///
/// The view can report the element's position and type name, and hand the
/// element to a visitor. It borrows the aggregate, so the element is
/// guaranteed to stay alive for `'a`. Typed access through a [`TypeId`] is
/// offered by the aggregate itself, see [`VisitableTuple::downcast_ref`].
///
/// # Examples
///
/// ```
/// use visitable::{ElementRef, VisitableTuple, Visitor};
///
/// struct Ignore;
///
/// impl<E> Visitor<E> for Ignore {
///     fn visit(&mut self, _element: &E) {}
/// }
///
/// let tuple: VisitableTuple<(i32, String), Ignore> = VisitableTuple::new((42, "x".to_string()));
/// let element: ElementRef<'_, Ignore> = tuple.element(1).unwrap();
///
/// assert_eq!(element.index(), 1);
/// assert_eq!(element.type_name(), std::any::type_name::<String>());
/// ```
///
/// [`TypeId`]: core::any::TypeId
/// [`VisitableTuple`]: crate::VisitableTuple
/// [`VisitableTuple::downcast_ref`]: crate::VisitableTuple::downcast_ref
pub struct ElementRef<'a, V: ?Sized> {
    raw: RawHandle<V>,
    index: usize,
    _tuple: PhantomData<&'a ()>,
}

impl<V: ?Sized> Copy for ElementRef<'_, V> {}
impl<V: ?Sized> Clone for ElementRef<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ?Sized> ElementRef<'_, V> {
    /// Creates a new [`ElementRef`] from a raw handle
    ///
    /// # Safety
    ///
    /// To call this method you must ensure the following:
    ///
    /// - The element behind `raw` is owned by an aggregate that is borrowed
    ///   for the lifetime of the returned view, and is never mutated.
    pub(crate) unsafe fn from_raw(raw: RawHandle<V>, index: usize) -> Self {
        Self {
            raw,
            index,
            _tuple: PhantomData,
        }
    }

    /// The position of the element in the tuple.
    pub fn index(self) -> usize {
        self.index
    }

    /// Returns the [`core::any::type_name`] of the element.
    pub fn type_name(self) -> &'static str {
        self.raw.element_type_name()
    }

    /// Hands the element to `visitor` with its original static type.
    pub fn accept(self, visitor: &mut V) {
        tracing::trace!(
            element_index = self.index,
            element_type = self.type_name(),
            "dispatching visitor"
        );
        // SAFETY: The element is owned by an aggregate that is still borrowed
        // and never mutated, as guaranteed by `ElementRef::from_raw`.
        unsafe { self.raw.accept(visitor) }
    }
}

impl<V: ?Sized> core::fmt::Debug for ElementRef<'_, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ElementRef")
            .field("index", &self.index)
            .field("type_name", &self.type_name())
            .finish()
    }
}
