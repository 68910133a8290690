//! Compile-time machinery over an ordered list of alternative types.
//!
//! Everything here is resolved by the trait solver or `const` evaluation;
//! nothing has a runtime representation. The impls of [`Member`] and [`At`]
//! come exclusively from the arity ladder in [`crate::set`].

use crate::set::AltSet;

/// Maximum of a nonempty list of values.
///
/// Sizes and alignments of an alternative set run through this to produce
/// [`AltSet::MAX_SIZE`] and [`AltSet::MAX_ALIGN`]. The generated storage
/// union is the layout authority; tests hold the two in agreement.
pub const fn max_of(values: &[usize]) -> usize {
    assert!(!values.is_empty(), "max_of over an empty list");
    let mut max = values[0];
    let mut i = 1;
    while i < values.len() {
        if values[i] > max {
            max = values[i];
        }
        i += 1;
    }
    max
}

/// Zero-sized marker naming position `N` of an alternative set.
///
/// Appears only as the inferred `I` parameter of [`Member`]: each position
/// gets a distinct `Ix`, which keeps the per-position impls coherent while
/// letting the compiler find the position from the alternative type alone.
/// Callers spell it `_`, as in `v.get::<String, _>()`.
pub struct Ix<const N: usize>;

/// Position of alternative `T` within the set.
///
/// For a well-formed set exactly one impl applies and `I` is inferred. A set
/// with duplicate entries makes the lookup ambiguous, so every typed
/// operation on such a set fails to compile:
///
/// ```compile_fail
/// use varia::Variant;
///
/// // Two identical alternatives: the position of `u32` is ambiguous.
/// let _v = Variant::<(u32, u32)>::new(7u32);
/// ```
///
/// A type that is not in the set has no impl at all:
///
/// ```compile_fail
/// use varia::Variant;
///
/// let _v = Variant::<(u32, String)>::new(3.5f64);
/// ```
///
/// # Safety
///
/// `INDEX` must be the position of `T` in the set's declared order; the
/// container casts its slot to `T` whenever the discriminant equals `INDEX`.
pub unsafe trait Member<T, I>: AltSet {
    /// Position of `T` in the set.
    const INDEX: usize;
}

/// The alternative type at position `N` of the set.
///
/// An out-of-range position has no impl and is rejected at compile time:
///
/// ```compile_fail
/// use varia::Variant;
///
/// let v = Variant::<(u8, u16)>::empty();
/// let _ = v.at::<5>();
/// ```
///
/// # Safety
///
/// `Out` must be the type at position `N` in the set's declared order; the
/// container casts its slot to `Out` whenever the discriminant equals `N`.
pub unsafe trait At<const N: usize>: AltSet {
    /// The alternative at position `N`.
    type Out;
}
