//! Module containing the type-erased element handle

mod raw;
mod vtable;

pub use self::raw::RawHandle;
