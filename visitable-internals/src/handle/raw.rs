//! Type-erased element handle.
//!
//! This module encapsulates the `ptr` and `vtable` fields of [`RawHandle`],
//! ensuring they are only visible within this module. This visibility
//! restriction guarantees the safety invariant: **the vtable always describes
//! the type of the element behind the pointer and the visitor type of the
//! handle**.
//!
//! # Safety Invariant
//!
//! Both fields can only be set together via [`RawHandle::new`], which derives
//! the vtable from the same `E` the pointer was taken from, and from the `V`
//! in the handle's own type. They cannot be modified afterward.
//!
//! # Liveness
//!
//! A [`RawHandle`] does not own its element and carries no lifetime. It is
//! the job of whoever creates the handle to keep the element alive, in place
//! and free of mutable aliases for as long as the handle is used. This is why
//! the operations that read through the pointer are `unsafe`, while the ones
//! that only consult the vtable are not.

use core::{marker::PhantomData, ptr::NonNull};

use crate::{handle::vtable::HandleVtable, util::Erased, visitor::Visitor};

/// A pointer to an element of some type `E`, together with the vtable that
/// knows how to hand that element to a visitor of type `V`.
///
/// The handle's own type only mentions the visitor type. Handles for elements
/// of completely different types therefore have the same type and can be
/// stored side by side in a single `Vec<RawHandle<V>>`.
pub struct RawHandle<V: ?Sized> {
    /// Pointer to the element
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer was created from a `&E` for the element type `E` that
    ///    `vtable` was created for.
    /// 2. The pointer will point to the same location for the entire lifetime
    ///    of this object.
    ptr: NonNull<Erased>,
    /// The vtable created for the element type and the visitor type `V`
    vtable: &'static HandleVtable,
    /// Marker binding the handle to the visitor type its vtable was created for
    _visitor: PhantomData<fn(&mut V)>,
}

impl<V: ?Sized> Copy for RawHandle<V> {}
impl<V: ?Sized> Clone for RawHandle<V> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ?Sized> RawHandle<V> {
    /// Creates a new [`RawHandle`] pointing at `element`.
    ///
    /// The visitor implementation used by [`accept`] is selected here, while
    /// the element type `E` is still known.
    ///
    /// Creating a handle is always safe. Using it afterwards requires the
    /// element to still be alive, see [`accept`].
    ///
    /// [`accept`]: Self::accept
    #[inline]
    pub fn new<E>(element: &E) -> Self
    where
        V: Visitor<E>,
    {
        Self {
            ptr: NonNull::from(element).cast::<Erased>(),
            vtable: HandleVtable::new::<E, V>(),
            _visitor: PhantomData,
        }
    }

    /// Returns the [`core::any::type_name`] of the element.
    #[inline]
    pub fn element_type_name(self) -> &'static str {
        self.vtable.type_name()
    }

    /// Returns the address of the element.
    ///
    /// Two handles return the same address exactly when they point at the same
    /// element, unless the element is zero-sized.
    #[inline]
    pub fn as_ptr(self) -> *const () {
        self.ptr.as_ptr().cast_const().cast::<()>()
    }

    /// Hands the element to `visitor`, calling the [`Visitor::visit`]
    /// implementation for the element's original type exactly once.
    ///
    /// Panics raised by the visitor propagate to the caller.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The element this handle was created from is still alive and has not
    ///    moved.
    /// 2. The element is not mutably borrowed for the duration of the call.
    #[inline]
    pub unsafe fn accept(self, visitor: &mut V) {
        let mut visitor: &mut V = visitor;
        let visitor_ptr = NonNull::from(&mut visitor).cast::<Erased>();

        // SAFETY:
        // 1. The vtable matches the element type behind `self.ptr` and the
        //    visitor type `V`, as guaranteed by `RawHandle::new`. The element is
        //    live and not mutably aliased, as guaranteed by the caller.
        // 2. `visitor_ptr` points to the local `&mut V` above, which is live
        //    and not otherwise used until the call returns.
        unsafe {
            self.vtable.accept(self.ptr, visitor_ptr);
        }
    }

    /// Returns a reference to the element as an `E`.
    ///
    /// The handle does not know the [`TypeId`] of its element, because the
    /// element type is not required to be `'static`. Checking the type is up to
    /// the caller, who knows the layout of the value the handle points into.
    ///
    /// [`TypeId`]: core::any::TypeId
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `E` is the element type this handle was created for.
    /// 2. The element this handle was created from is still alive and has not
    ///    moved, and stays that way for the lifetime `'a`.
    /// 3. The element is not mutably borrowed during `'a`.
    #[inline]
    pub unsafe fn element_ref<'a, E>(self) -> &'a E {
        let ptr = self.ptr.cast::<E>();
        // SAFETY: The pointer was created from a `&E` (guaranteed by
        // `RawHandle::new` and requirement 1). Liveness and the absence of
        // mutable aliases for `'a` are guaranteed by the caller.
        unsafe { ptr.as_ref() }
    }
}

impl<V: ?Sized> core::fmt::Debug for RawHandle<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawHandle")
            .field("element_type", &self.element_type_name())
            .field("ptr", &self.ptr)
            .finish()
    }
}
