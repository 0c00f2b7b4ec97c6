//! The heterogeneous aggregate and its borrowed views.

pub(crate) mod element;
pub(crate) mod iter;
mod type_index;

use alloc::vec::Vec;
use core::{any::TypeId, fmt};

use triomphe::Arc;
use visitable_internals::RawHandle;

use self::type_index::{TypeIndex, TypeTable};
use crate::{ElementRef, IndexOutOfBounds, Iter, builder::HandleSink, builder::Visitable};

/// An immutable, strongly typed tuple of heterogeneous elements, together
/// with one type-erased handle per element for dispatching a visitor by
/// index.
///
/// `T` is the structured value: a tuple such as `(i32, String)`, or a
/// [`Snoc`] list for more than 16 elements. It is available unchanged
/// through [`value`], for code that needs the elements' original types.
///
/// `V` is the visitor type the handles were created for. It must implement
/// [`Visitor<E>`] for every element type `E`. It can be a trait object such as
/// `dyn MyVisitor`, which lets many concrete visitors share one aggregate.
///
/// The aggregate cannot be modified after construction. Cloning it is cheap:
/// the structured value is reference counted and shared between clones.
///
/// # Examples
///
/// ```
/// use visitable::{VisitableTuple, Visitor};
///
/// #[derive(Default)]
/// struct Describe(Vec<String>);
///
/// impl Visitor<i32> for Describe {
///     fn visit(&mut self, element: &i32) {
///         self.0.push(format!("int {element}"));
///     }
/// }
///
/// impl Visitor<String> for Describe {
///     fn visit(&mut self, element: &String) {
///         self.0.push(format!("string {element:?}"));
///     }
/// }
///
/// let tuple: VisitableTuple<(i32, String), Describe> = VisitableTuple::new((42, "x".to_string()));
/// assert_eq!(tuple.values_count(), 2);
/// assert_eq!(tuple.value().0, 42);
///
/// let mut describe = Describe::default();
/// tuple.accept(&mut describe, 1);
/// tuple.accept(&mut describe, 0);
/// assert_eq!(describe.0, ["string \"x\"", "int 42"]);
/// ```
///
/// [`Snoc`]: crate::list::Snoc
/// [`value`]: VisitableTuple::value
/// [`Visitor<E>`]: crate::Visitor
pub struct VisitableTuple<T, V: ?Sized> {
    /// The structured value, heap allocated so that the element addresses
    /// captured by `handles` survive moves of the aggregate.
    shared: Arc<Shared<T>>,
    values_count: usize,
    /// One handle per element of `shared.value`, in element order.
    ///
    /// # Safety
    ///
    /// Every handle points at an element inside `shared.value` and was created
    /// for that element's type.
    handles: Vec<RawHandle<V>>,
}

/// The part of an aggregate that is shared between its clones.
struct Shared<T> {
    value: T,
    type_index: TypeIndex,
}

impl<T, V: ?Sized> VisitableTuple<T, V> {
    /// Builds the aggregate from a structured value.
    ///
    /// The elements are wrapped left to right, so the handle at position `i`
    /// always dispatches to the `i`th element of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use visitable::{VisitableTuple, Visitor};
    ///
    /// struct Ignore;
    ///
    /// impl<E> Visitor<E> for Ignore {
    ///     fn visit(&mut self, _element: &E) {}
    /// }
    ///
    /// let empty: VisitableTuple<(), Ignore> = VisitableTuple::new(());
    /// assert!(empty.is_empty());
    ///
    /// let tuple: VisitableTuple<(u8, &str, f64), Ignore> = VisitableTuple::new((1, "two", 3.0));
    /// assert_eq!(tuple.values_count(), 3);
    /// ```
    pub fn new(value: T) -> Self
    where
        T: Visitable<V>,
    {
        let shared = Arc::new(Shared {
            value,
            type_index: TypeIndex::new(),
        });

        let mut sink = HandleSink::with_capacity(T::COUNT);
        shared.value.wrap_elements(&mut sink);
        let (values_count, handles) = sink.finish();
        debug_assert_eq!(values_count, T::COUNT);

        tracing::trace!(values_count, "built visitable tuple");

        Self {
            shared,
            values_count,
            handles,
        }
    }

    /// Builds the aggregate from the structured value returned by `builder`.
    ///
    /// This is the block form of [`VisitableTuple::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use visitable::{VisitableTuple, Visitor};
    ///
    /// struct Ignore;
    ///
    /// impl<E> Visitor<E> for Ignore {
    ///     fn visit(&mut self, _element: &E) {}
    /// }
    ///
    /// let tuple: VisitableTuple<_, Ignore> = VisitableTuple::create(|| {
    ///     let title = String::from("title");
    ///     (title, 7_u32)
    /// });
    /// assert_eq!(tuple.value().1, 7);
    /// ```
    pub fn create<F>(builder: F) -> Self
    where
        F: FnOnce() -> T,
        T: Visitable<V>,
    {
        Self::new(builder())
    }

    /// Returns the structured value, with every element at its original
    /// position and with its original type.
    pub fn value(&self) -> &T {
        &self.shared.value
    }

    /// The number of elements.
    pub fn values_count(&self) -> usize {
        self.values_count
    }

    /// The number of elements. Same as [`values_count`].
    ///
    /// [`values_count`]: VisitableTuple::values_count
    pub fn len(&self) -> usize {
        self.values_count
    }

    /// Returns `true` if the tuple has no elements.
    pub fn is_empty(&self) -> bool {
        self.values_count == 0
    }

    /// Hands the element at `element_index` to `visitor`, with the element's
    /// original static type.
    ///
    /// The visitor is called exactly once, before this method returns. Panics
    /// raised by the visitor propagate unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `element_index >= self.values_count()`. An index out of range
    /// is a bug in the caller, typically a count taken from a different
    /// tuple. Use [`try_accept`] when the index is not under the caller's
    /// control.
    ///
    /// [`try_accept`]: VisitableTuple::try_accept
    #[track_caller]
    pub fn accept(&self, visitor: &mut V, element_index: usize) {
        if let Err(error) = self.try_accept(visitor, element_index) {
            index_out_of_bounds(error)
        }
    }

    /// Hands the element at `element_index` to `visitor`, or returns an error
    /// without calling the visitor if there is no such element.
    pub fn try_accept(
        &self,
        visitor: &mut V,
        element_index: usize,
    ) -> Result<(), IndexOutOfBounds> {
        let element = self.element(element_index).ok_or(IndexOutOfBounds {
            index: element_index,
            count: self.values_count,
        })?;
        element.accept(visitor);
        Ok(())
    }

    /// Hands every element to `visitor`, in tuple order.
    pub fn accept_all(&self, visitor: &mut V) {
        for element in self {
            element.accept(visitor);
        }
    }

    /// Returns a view of the element at `element_index`, or `None` if there
    /// is no such element.
    pub fn element(&self, element_index: usize) -> Option<ElementRef<'_, V>> {
        let raw = *self.handles.get(element_index)?;
        // SAFETY: The handle points into `self.shared.value`, which is borrowed for the
        // lifetime of the returned reference and never mutated.
        unsafe { Some(ElementRef::from_raw(raw, element_index)) }
    }

    /// Returns an iterator over views of all elements, in tuple order.
    pub fn iter(&self) -> Iter<'_, V> {
        // SAFETY: Every handle points into `self.shared.value`, which is borrowed for
        // the lifetime of the iterator and never mutated.
        unsafe { Iter::from_raw(&self.handles) }
    }

    /// Returns the structured value if no clone of this aggregate exists, or
    /// the aggregate itself otherwise.
    pub fn try_into_value(self) -> Result<T, Self> {
        let Self {
            shared,
            values_count,
            handles,
        } = self;

        match Arc::try_unwrap(shared) {
            Ok(shared) => Ok(shared.value),
            Err(shared) => Err(Self {
                shared,
                values_count,
                handles,
            }),
        }
    }
}

/// Type inspection, available when every element type is `'static`.
impl<T, V> VisitableTuple<T, V>
where
    T: Visitable<V> + 'static,
    V: ?Sized,
{
    fn type_table(&self) -> &TypeTable {
        self.shared.type_index.get_or_build(|| {
            let mut type_ids = Vec::with_capacity(T::COUNT);
            T::element_type_ids(&mut type_ids);
            debug_assert_eq!(type_ids.len(), self.values_count);
            type_ids
        })
    }

    /// Returns the [`TypeId`] of the element at `element_index`, or `None` if
    /// there is no such element.
    pub fn element_type_id(&self, element_index: usize) -> Option<TypeId> {
        self.type_table().type_id(element_index)
    }

    /// Returns `true` if the element at `element_index` exists and has type
    /// `E`.
    pub fn element_is<E: 'static>(&self, element_index: usize) -> bool {
        self.element_type_id(element_index) == Some(TypeId::of::<E>())
    }

    /// Returns a reference to the element at `element_index` if it exists and
    /// has type `E`.
    ///
    /// # Examples
    ///
    /// ```
    /// use visitable::{VisitableTuple, Visitor};
    ///
    /// struct Ignore;
    ///
    /// impl<E> Visitor<E> for Ignore {
    ///     fn visit(&mut self, _element: &E) {}
    /// }
    ///
    /// let tuple: VisitableTuple<(i32, String), Ignore> = VisitableTuple::new((42, "x".to_string()));
    /// assert_eq!(tuple.downcast_ref::<String>(1).map(String::as_str), Some("x"));
    /// assert_eq!(tuple.downcast_ref::<i32>(1), None);
    /// assert_eq!(tuple.downcast_ref::<i32>(2), None);
    /// ```
    pub fn downcast_ref<E: 'static>(&self, element_index: usize) -> Option<&E> {
        if !self.element_is::<E>(element_index) {
            return None;
        }
        let raw = *self.handles.get(element_index)?;
        // SAFETY: The element at `element_index` has type `E` as checked above.
        // It lives in `self.shared.value`, which is borrowed for the lifetime of
        // the returned reference and never mutated.
        unsafe { Some(raw.element_ref::<E>()) }
    }

    /// Returns the positions of the elements of type `E`, in ascending order.
    ///
    /// The lookup table behind this method is built on its first call, and
    /// shared with every clone of this aggregate.
    ///
    /// # Examples
    ///
    /// ```
    /// use visitable::{VisitableTuple, Visitor};
    ///
    /// struct Ignore;
    ///
    /// impl<E> Visitor<E> for Ignore {
    ///     fn visit(&mut self, _element: &E) {}
    /// }
    ///
    /// let tuple: VisitableTuple<_, Ignore> = VisitableTuple::new((1_u8, 'a', 2_u8));
    /// assert_eq!(tuple.positions_of::<u8>(), [0, 2]);
    /// assert_eq!(tuple.positions_of::<char>(), [1]);
    /// assert!(tuple.positions_of::<bool>().is_empty());
    /// ```
    pub fn positions_of<E: 'static>(&self) -> &[usize] {
        self.type_table().positions(TypeId::of::<E>())
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn index_out_of_bounds(error: IndexOutOfBounds) -> ! {
    tracing::error!(
        index = error.index,
        count = error.count,
        "visitor dispatched to a missing tuple element"
    );
    panic!("{error}")
}

impl<T, V: ?Sized> Clone for VisitableTuple<T, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            values_count: self.values_count,
            handles: self.handles.clone(),
        }
    }
}

impl<T, V> fmt::Debug for VisitableTuple<T, V>
where
    T: fmt::Debug,
    V: ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitableTuple")
            .field("value", &self.shared.value)
            .field("values_count", &self.values_count)
            .finish()
    }
}

impl<T, V> PartialEq for VisitableTuple<T, V>
where
    T: PartialEq,
    V: ?Sized,
{
    fn eq(&self, other: &Self) -> bool {
        self.shared.value == other.shared.value
    }
}

impl<T: Eq, V: ?Sized> Eq for VisitableTuple<T, V> {}

impl<'a, T, V: ?Sized> IntoIterator for &'a VisitableTuple<T, V> {
    type Item = ElementRef<'a, V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// SAFETY: The handles only ever produce shared references to elements inside
// `shared.value`, so moving the aggregate to another thread is as safe as
// moving an `Arc<T>`. The visitor type is never stored, only borrowed from the caller for
// the duration of a dispatch.
unsafe impl<T: Send + Sync, V: ?Sized> Send for VisitableTuple<T, V> {}

// SAFETY: Dispatch never mutates the aggregate. Sharing it gives other threads
// shared access to the elements, which `T: Sync` allows. The type index next to
// the value is a once-initialized cell that is itself `Send + Sync`.
unsafe impl<T: Send + Sync, V: ?Sized> Sync for VisitableTuple<T, V> {}
