//! Vtable for type-erased element dispatch.
//!
//! This module contains the [`HandleVtable`] which enables handing an element
//! to a visitor when the concrete element type `E` and the visitor type `V`
//! have been erased. The vtable stores function pointers that dispatch to the
//! correct typed implementations.
//!
//! This module encapsulates the fields of [`HandleVtable`] so they cannot be
//! accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's type parameters must match the actual element
//! type pointed to by the handle, and the visitor type the handle is used
//! with**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via [`HandleVtable::new`], which pairs the function pointers
//! with specific types `E` and `V` at compile time.

use core::ptr::NonNull;

use crate::{util::Erased, visitor::Visitor};

/// Vtable for type-erased element operations.
///
/// Contains function pointers for performing operations on elements without
/// knowing their concrete type at compile time.
///
/// # Safety Invariant
///
/// The fields `type_name` and `accept` are guaranteed to point to the
/// functions below instantiated with the element type `E` and visitor type `V`
/// that were used to create this [`HandleVtable`].
///
/// The element type is not required to be `'static`, so the vtable does not
/// carry a `TypeId`.
pub(crate) struct HandleVtable {
    /// Gets the [`core::any::type_name`] of the element type that was used to
    /// create this [`HandleVtable`].
    type_name: fn() -> &'static str,
    /// Calls [`Visitor::visit`] with the element and the visitor behind the
    /// two pointers.
    accept: unsafe fn(NonNull<Erased>, NonNull<Erased>),
}

impl HandleVtable {
    /// Creates a new [`HandleVtable`] for the element type `E` and the
    /// visitor type `V`.
    pub(super) const fn new<E, V>() -> &'static Self
    where
        V: ?Sized + Visitor<E>,
    {
        const {
            &Self {
                type_name: core::any::type_name::<E>,
                accept: accept::<E, V>,
            }
        }
    }

    /// Gets the [`core::any::type_name`] of the element type that was used to
    /// create this [`HandleVtable`].
    #[inline]
    pub(super) fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Hands the element to the visitor using the `Visitor<E>` implementation
    /// of `V` selected when creating this [`HandleVtable`].
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`HandleVtable`] must be a vtable for the element type `E`
    ///    stored behind `element`, and `element` must point to a live,
    ///    properly aligned `E` that is not mutably aliased for the duration of
    ///    the call.
    /// 2. `visitor` must point to a live `&mut V`, where `V` is the visitor
    ///    type this [`HandleVtable`] was created for, and nothing else may
    ///    access that `&mut V` for the duration of the call.
    #[inline]
    pub(super) unsafe fn accept(&self, element: NonNull<Erased>, visitor: NonNull<Erased>) {
        // SAFETY: We know that `self.accept` points to the function `accept::<E, V>`
        // below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe {
            (self.accept)(element, visitor);
        }
    }
}

/// Recovers the element and visitor types and calls [`Visitor::visit`].
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `element` points to a live, properly aligned `E` that is not mutably
///    aliased for the duration of the call.
/// 2. `visitor` points to a live `&mut V` that nothing else accesses for the
///    duration of the call.
unsafe fn accept<E, V>(element: NonNull<Erased>, visitor: NonNull<Erased>)
where
    V: ?Sized + Visitor<E>,
{
    let element = element.cast::<E>();
    // SAFETY:
    // 1. Guaranteed by the caller
    let element: &E = unsafe { element.as_ref() };

    let mut visitor = visitor.cast::<&mut V>();
    // SAFETY:
    // 2. Guaranteed by the caller
    let visitor: &mut &mut V = unsafe { visitor.as_mut() };

    <V as Visitor<E>>::visit(&mut **visitor, element);
}
