//! Per-alternative lifecycle dispatch.
//!
//! Each alternative contributes one descriptor of monomorphised thunks over
//! an erased slot pointer; a set collects the descriptors into a fixed table
//! ([`crate::set::AltSet::VTABLES`]) indexed by the runtime discriminant, so
//! destroy/copy/move of the active value is a single table row away.

use std::ptr;

/// Lifecycle operations of one alternative, resolved at compile time.
///
/// The thunks operate on the variant's slot pointer. Every call site must
/// guarantee that the slot really holds (or receives) a value of the
/// descriptor's type; the container upholds this by only selecting the row
/// named by its discriminant.
pub struct AltVTable {
    /// Runs the alternative's destructor on the value in the slot.
    pub(crate) drop_in_place: unsafe fn(*mut u8),
    /// Clones the value in `src` into the vacant slot `dst`; `src` is left
    /// untouched. Panics if the alternative's `Clone` impl panics, in which
    /// case `dst` has not been written.
    pub(crate) clone_into: unsafe fn(*const u8, *mut u8),
    /// Transfers the value in `src` into the vacant slot `dst`. The caller
    /// must treat the source slot as vacated afterwards.
    pub(crate) move_into: unsafe fn(*mut u8, *mut u8),
    /// Size of the alternative in bytes.
    pub size: usize,
    /// Alignment requirement of the alternative.
    pub align: usize,
}

impl AltVTable {
    /// Descriptor of alternative `T`.
    pub const fn of<T: Clone>() -> Self {
        AltVTable {
            drop_in_place: drop_thunk::<T>,
            clone_into: clone_thunk::<T>,
            move_into: move_thunk::<T>,
            size: size_of::<T>(),
            align: align_of::<T>(),
        }
    }
}

unsafe fn drop_thunk<T>(slot: *mut u8) {
    // SAFETY: the caller guarantees `slot` holds a live, aligned `T`.
    unsafe { ptr::drop_in_place(slot.cast::<T>()) }
}

unsafe fn clone_thunk<T: Clone>(src: *const u8, dst: *mut u8) {
    // The clone runs before the write, so an unwinding `Clone` impl leaves
    // `dst` untouched.
    // SAFETY: the caller guarantees `src` holds a live `T` and `dst` is a
    // vacant slot sized and aligned for `T`.
    let value = unsafe { &*src.cast::<T>() }.clone();
    unsafe { ptr::write(dst.cast::<T>(), value) }
}

unsafe fn move_thunk<T>(src: *mut u8, dst: *mut u8) {
    // SAFETY: the caller guarantees `src` holds a live `T`, `dst` is a
    // vacant slot sized and aligned for `T`, and the source slot is marked
    // vacated after the call.
    unsafe { ptr::write(dst.cast::<T>(), ptr::read(src.cast::<T>())) }
}
