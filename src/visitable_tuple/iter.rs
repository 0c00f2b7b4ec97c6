use core::iter::{Enumerate, FusedIterator};

use visitable_internals::RawHandle;

use crate::ElementRef;

/// An iterator over the elements of a [`VisitableTuple`], in tuple order.
///
/// This iterator yields [`ElementRef`] items and is created by calling
/// [`VisitableTuple::iter`].
///
/// # Examples
///
/// ```
/// use visitable::{Iter, VisitableTuple, Visitor};
///
/// struct Ignore;
///
/// impl<E> Visitor<E> for Ignore {
///     fn visit(&mut self, _element: &E) {}
/// }
///
/// let tuple: VisitableTuple<(u8, char), Ignore> = VisitableTuple::new((1, 'c'));
/// let iterator: Iter<'_, Ignore> = tuple.iter();
/// let names: Vec<&str> = iterator.map(|element| element.type_name()).collect();
/// assert_eq!(names, ["u8", "char"]);
/// ```
///
/// [`VisitableTuple`]: crate::VisitableTuple
/// [`VisitableTuple::iter`]: crate::VisitableTuple::iter
#[must_use]
pub struct Iter<'a, V: ?Sized> {
    iter: Enumerate<core::slice::Iter<'a, RawHandle<V>>>,
}

impl<'a, V: ?Sized> Iter<'a, V> {
    /// Creates a new [`Iter`] from the handles of an aggregate
    ///
    /// # Safety
    ///
    /// Every handle must point at an element owned by an aggregate that is
    /// borrowed for `'a` and never mutated.
    pub(crate) unsafe fn from_raw(handles: &'a [RawHandle<V>]) -> Self {
        Self {
            iter: handles.iter().enumerate(),
        }
    }
}

impl<'a, V: ?Sized> Iterator for Iter<'a, V> {
    type Item = ElementRef<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, raw) = self.iter.next()?;
        // SAFETY: Guaranteed by `Iter::from_raw`.
        unsafe { Some(ElementRef::from_raw(*raw, index)) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<V: ?Sized> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (index, raw) = self.iter.next_back()?;
        // SAFETY: Guaranteed by `Iter::from_raw`.
        unsafe { Some(ElementRef::from_raw(*raw, index)) }
    }
}

impl<V: ?Sized> ExactSizeIterator for Iter<'_, V> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<V: ?Sized> FusedIterator for Iter<'_, V> {}
