//! Alternative sets: tuple types carrying storage layout and dispatch tables.
//!
//! Each arity gets a dedicated storage union with one `ManuallyDrop` field
//! per alternative, so the union's size and alignment are by construction
//! the maxima over the set, and a block of position impls wiring up
//! [`Member`] and [`At`]. Arities 1 through 12 are generated by a macro
//! ladder.

use std::mem::ManuallyDrop;

use crate::meta::{At, Ix, Member, max_of};
use crate::vtable::AltVTable;

/// A closed, ordered set of distinct alternative types.
///
/// Implemented for tuples `(T0,)` through `(T0, ..., T11)` where every
/// member is `Clone`. Describes the shared storage layout of the set and
/// owns the dispatch table the container indexes by discriminant.
///
/// # Safety
///
/// `Raw` must place every alternative at offset zero of a region sized and
/// aligned for all of them, `VTABLES[i]` must describe the `i`-th
/// alternative of the declared order, and `LEN` must be the arity.
/// Implemented only by this crate's arity ladder.
pub unsafe trait AltSet: Sized {
    /// Storage union; its size and alignment are the maxima over the set.
    type Raw;
    /// Number of alternatives.
    const LEN: usize;
    /// Maximum size among the alternatives.
    const MAX_SIZE: usize;
    /// Maximum alignment among the alternatives.
    const MAX_ALIGN: usize;
    /// Dispatch table, one descriptor per alternative, indexed by the
    /// discriminant.
    const VTABLES: &'static [AltVTable];
}

// Emits the `Member` and `At` impls for one position, then recurses on the
// remaining positions. The full parameter list rides along so each impl can
// name every tuple element.
macro_rules! impl_positions {
    (($($list:ident),+) |) => {};
    (($($list:ident),+) | $idx:tt => $alt:ident $(, $rest_idx:tt => $rest_alt:ident)*) => {
        unsafe impl<$($list: Clone),+> Member<$alt, Ix<$idx>> for ($($list,)+) {
            const INDEX: usize = $idx;
        }

        unsafe impl<$($list: Clone),+> At<$idx> for ($($list,)+) {
            type Out = $alt;
        }

        impl_positions!(($($list),+) | $($rest_idx => $rest_alt),*);
    };
}

macro_rules! impl_alt_set {
    ($raw:ident, ($($list:ident),+), { $($idx:tt => $field:ident: $alt:ident),+ }) => {
        // Fields exist for layout only; values are reached through the
        // variant's slot pointer. `repr(C)` pins every field to offset zero.
        #[doc(hidden)]
        #[repr(C)]
        pub union $raw<$($list),+> {
            $( pub $field: ManuallyDrop<$alt>, )+
        }

        unsafe impl<$($list: Clone),+> AltSet for ($($list,)+) {
            type Raw = $raw<$($list),+>;
            const LEN: usize = Self::VTABLES.len();
            const MAX_SIZE: usize = max_of(&[$(size_of::<$alt>()),+]);
            const MAX_ALIGN: usize = max_of(&[$(align_of::<$alt>()),+]);
            const VTABLES: &'static [AltVTable] = &[$(AltVTable::of::<$alt>()),+];
        }

        impl_positions!(($($list),+) | $($idx => $alt),+);
    };
}

impl_alt_set!(Raw1, (T0), { 0 => t0: T0 });
impl_alt_set!(Raw2, (T0, T1), { 0 => t0: T0, 1 => t1: T1 });
impl_alt_set!(Raw3, (T0, T1, T2), { 0 => t0: T0, 1 => t1: T1, 2 => t2: T2 });
impl_alt_set!(Raw4, (T0, T1, T2, T3), { 0 => t0: T0, 1 => t1: T1, 2 => t2: T2, 3 => t3: T3 });
impl_alt_set!(Raw5, (T0, T1, T2, T3, T4), { 0 => t0: T0, 1 => t1: T1, 2 => t2: T2, 3 => t3: T3, 4 => t4: T4 });
impl_alt_set!(Raw6, (T0, T1, T2, T3, T4, T5), { 0 => t0: T0, 1 => t1: T1, 2 => t2: T2, 3 => t3: T3, 4 => t4: T4, 5 => t5: T5 });
impl_alt_set!(Raw7, (T0, T1, T2, T3, T4, T5, T6), { 0 => t0: T0, 1 => t1: T1, 2 => t2: T2, 3 => t3: T3, 4 => t4: T4, 5 => t5: T5, 6 => t6: T6 });
impl_alt_set!(Raw8, (T0, T1, T2, T3, T4, T5, T6, T7), { 0 => t0: T0, 1 => t1: T1, 2 => t2: T2, 3 => t3: T3, 4 => t4: T4, 5 => t5: T5, 6 => t6: T6, 7 => t7: T7 });
impl_alt_set!(Raw9, (T0, T1, T2, T3, T4, T5, T6, T7, T8), { 0 => t0: T0, 1 => t1: T1, 2 => t2: T2, 3 => t3: T3, 4 => t4: T4, 5 => t5: T5, 6 => t6: T6, 7 => t7: T7, 8 => t8: T8 });
impl_alt_set!(Raw10, (T0, T1, T2, T3, T4, T5, T6, T7, T8, T9), { 0 => t0: T0, 1 => t1: T1, 2 => t2: T2, 3 => t3: T3, 4 => t4: T4, 5 => t5: T5, 6 => t6: T6, 7 => t7: T7, 8 => t8: T8, 9 => t9: T9 });
impl_alt_set!(Raw11, (T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10), { 0 => t0: T0, 1 => t1: T1, 2 => t2: T2, 3 => t3: T3, 4 => t4: T4, 5 => t5: T5, 6 => t6: T6, 7 => t7: T7, 8 => t8: T8, 9 => t9: T9, 10 => t10: T10 });
impl_alt_set!(Raw12, (T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11), { 0 => t0: T0, 1 => t1: T1, 2 => t2: T2, 3 => t3: T3, 4 => t4: T4, 5 => t5: T5, 6 => t6: T6, 7 => t7: T7, 8 => t8: T8, 9 => t9: T9, 10 => t10: T10, 11 => t11: T11 });
