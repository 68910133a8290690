//! The variant container: one live alternative (or none) in an inline slot.

use std::fmt;
use std::mem::MaybeUninit;
use std::ptr;

use crate::error::AccessError;
use crate::meta::{At, Member};
use crate::set::AltSet;

/// Discriminant value meaning "no active alternative".
const VALUELESS: usize = usize::MAX;

/// A tagged union over the alternative set `L`.
///
/// The set is an ordered tuple of up to 12 distinct `Clone` types. The
/// active value lives inline in a slot sized and aligned for the largest
/// alternative; a discriminant records which alternative it is. Destroy,
/// copy and move of the active value dispatch through the set's table,
/// selected by discriminant.
///
/// ```
/// use varia::Variant;
///
/// let mut v = Variant::<(i64, String, f64)>::new(42i64);
/// assert_eq!(v.index(), Some(0));
/// assert_eq!(v.get::<i64, _>().copied(), Ok(42));
///
/// v.emplace::<String, _>("hi".to_string());
/// assert!(v.holds::<String, _>());
/// assert!(v.get::<i64, _>().is_err());
/// ```
///
/// A variant may also be *valueless*: holding no alternative at all. That
/// state is reached by default construction, [`take`](Variant::take),
/// [`clear`](Variant::clear), or copying from a valueless source, and every
/// access on it reports a mismatch.
///
/// Set validation happens at the first typed operation, not at declaration:
/// a set with duplicate entries can still be named, and
/// [`empty`](Variant::empty) still produces a valueless instance of it, but
/// construction and access are ambiguous for the duplicated type and fail
/// to compile, so no value of such a set can ever exist.
pub struct Variant<L: AltSet> {
    /// Inline slot for the active value.
    raw: MaybeUninit<L::Raw>,
    /// Index of the live alternative, or `VALUELESS`.
    ///
    /// Invariant: whenever `idx != VALUELESS` the slot holds a live value of
    /// the `idx`-th alternative; otherwise the slot holds nothing and must
    /// not be read.
    idx: usize,
}

impl<L: AltSet> Variant<L> {
    /// Creates a valueless variant.
    pub const fn empty() -> Self {
        Self {
            raw: MaybeUninit::uninit(),
            idx: VALUELESS,
        }
    }

    /// Creates a variant holding `value`.
    ///
    /// Fails to compile if the value's type is not a member of the set.
    pub fn new<T, I>(value: T) -> Self
    where
        L: Member<T, I>,
    {
        let mut out = Self::empty();
        out.emplace(value);
        out
    }

    /// The current discriminant, or `None` for a valueless variant.
    pub fn index(&self) -> Option<usize> {
        (self.idx != VALUELESS).then_some(self.idx)
    }

    /// Whether no alternative is active.
    pub fn is_valueless(&self) -> bool {
        self.idx == VALUELESS
    }

    /// Whether the active alternative is `T`.
    pub fn holds<T, I>(&self) -> bool
    where
        L: Member<T, I>,
    {
        self.idx == <L as Member<T, I>>::INDEX
    }

    /// Destroys the current value (if any), constructs `value` in place and
    /// records its discriminant. Returns a reference to the new value.
    ///
    /// Fails to compile if `T` is not a member of the set.
    pub fn emplace<T, I>(&mut self, value: T) -> &mut T
    where
        L: Member<T, I>,
    {
        self.clear();
        let slot = self.slot_mut().cast::<T>();
        // SAFETY: the slot is vacant and sized and aligned for every
        // alternative, `T` included.
        unsafe { ptr::write(slot, value) };
        self.idx = <L as Member<T, I>>::INDEX;
        // SAFETY: just initialised as `T`.
        unsafe { &mut *slot }
    }

    /// Assigns `value`, replacing whatever was active. Equivalent to
    /// [`emplace`](Variant::emplace).
    ///
    /// The value is fully constructed before this is entered and the
    /// in-place write cannot fail, so assignment never raises.
    pub fn set<T, I>(&mut self, value: T)
    where
        L: Member<T, I>,
    {
        self.emplace(value);
    }

    /// Destroys the active value, if any, leaving the variant valueless.
    pub fn clear(&mut self) {
        if let Some(i) = self.index() {
            // Mark valueless before running the destructor: an unwinding
            // drop then leaves the variant empty instead of pointing at a
            // destroyed value.
            self.idx = VALUELESS;
            // SAFETY: the slot held the live `i`-th alternative.
            unsafe { (L::VTABLES[i].drop_in_place)(self.slot_mut()) };
        }
    }

    /// Moves the contents out, leaving this variant valueless.
    ///
    /// The returned variant carries the source's discriminant and value.
    pub fn take(&mut self) -> Self {
        let mut out = Self::empty();
        if let Some(i) = self.index() {
            // SAFETY: the slot holds the live `i`-th alternative and `out`'s
            // slot is vacant; marking the source valueless completes the
            // ownership transfer.
            unsafe { (L::VTABLES[i].move_into)(self.slot_mut(), out.slot_mut()) };
            out.idx = i;
            self.idx = VALUELESS;
        }
        out
    }

    /// A reference to the active value as `T`, or `None` on mismatch.
    ///
    /// Never fails; this is the non-raising probe path next to
    /// [`get`](Variant::get).
    pub fn downcast_ref<T, I>(&self) -> Option<&T>
    where
        L: Member<T, I>,
    {
        if self.idx == <L as Member<T, I>>::INDEX {
            // SAFETY: the slot holds the live alternative, which is `T`.
            Some(unsafe { &*self.slot().cast::<T>() })
        } else {
            None
        }
    }

    /// A mutable reference to the active value as `T`, or `None` on
    /// mismatch.
    pub fn downcast_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L: Member<T, I>,
    {
        if self.idx == <L as Member<T, I>>::INDEX {
            // SAFETY: the slot holds the live alternative, which is `T`.
            Some(unsafe { &mut *self.slot_mut().cast::<T>() })
        } else {
            None
        }
    }

    /// A reference to the active value at position `N`, or `None` on
    /// mismatch. Out-of-range positions fail to compile.
    pub fn at<const N: usize>(&self) -> Option<&<L as At<N>>::Out>
    where
        L: At<N>,
    {
        if self.idx == N {
            // SAFETY: the slot holds the live `N`-th alternative.
            Some(unsafe { &*self.slot().cast::<<L as At<N>>::Out>() })
        } else {
            None
        }
    }

    /// A mutable reference to the active value at position `N`, or `None`
    /// on mismatch.
    pub fn at_mut<const N: usize>(&mut self) -> Option<&mut <L as At<N>>::Out>
    where
        L: At<N>,
    {
        if self.idx == N {
            // SAFETY: the slot holds the live `N`-th alternative.
            Some(unsafe { &mut *self.slot_mut().cast::<<L as At<N>>::Out>() })
        } else {
            None
        }
    }

    /// A reference to the active value as `T`, or an [`AccessError`]
    /// carrying the requested and actual discriminants.
    pub fn get<T, I>(&self) -> Result<&T, AccessError>
    where
        L: Member<T, I>,
    {
        self.downcast_ref::<T, I>()
            .ok_or_else(|| AccessError::new(<L as Member<T, I>>::INDEX, self.index()))
    }

    /// A mutable reference to the active value as `T`, or an
    /// [`AccessError`].
    pub fn get_mut<T, I>(&mut self) -> Result<&mut T, AccessError>
    where
        L: Member<T, I>,
    {
        let requested = <L as Member<T, I>>::INDEX;
        if self.idx == requested {
            // SAFETY: the slot holds the live alternative, which is `T`.
            Ok(unsafe { &mut *self.slot_mut().cast::<T>() })
        } else {
            Err(AccessError::new(requested, self.index()))
        }
    }

    /// A reference to the active value at position `N`, or an
    /// [`AccessError`].
    pub fn get_at<const N: usize>(&self) -> Result<&<L as At<N>>::Out, AccessError>
    where
        L: At<N>,
    {
        self.at::<N>()
            .ok_or_else(|| AccessError::new(N, self.index()))
    }

    /// A mutable reference to the active value at position `N`, or an
    /// [`AccessError`].
    pub fn get_at_mut<const N: usize>(&mut self) -> Result<&mut <L as At<N>>::Out, AccessError>
    where
        L: At<N>,
    {
        if self.idx == N {
            // SAFETY: the slot holds the live `N`-th alternative.
            Ok(unsafe { &mut *self.slot_mut().cast::<<L as At<N>>::Out>() })
        } else {
            Err(AccessError::new(N, self.index()))
        }
    }

    fn slot(&self) -> *const u8 {
        self.raw.as_ptr().cast()
    }

    fn slot_mut(&mut self) -> *mut u8 {
        self.raw.as_mut_ptr().cast()
    }
}

impl<L: AltSet> Default for Variant<L> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<L: AltSet> Clone for Variant<L> {
    fn clone(&self) -> Self {
        let mut out = Self::empty();
        if let Some(i) = self.index() {
            // SAFETY: the source slot holds the live `i`-th alternative and
            // `out`'s slot is vacant. `out.idx` is recorded only after the
            // clone ran, so an unwinding `Clone` impl leaves `out`
            // valueless.
            unsafe { (L::VTABLES[i].clone_into)(self.slot(), out.slot_mut()) };
            out.idx = i;
        }
        out
    }

    /// Destroy-then-construct: the current value is destroyed first, then
    /// the source's alternative is copy-constructed in place. Alternatives
    /// are never assigned to, only constructed and destroyed. A valueless
    /// source leaves `self` valueless.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        if let Some(i) = source.index() {
            // SAFETY: as in `clone`; `self` is valueless and its slot
            // vacant.
            unsafe { (L::VTABLES[i].clone_into)(source.slot(), self.slot_mut()) };
            self.idx = i;
        }
    }
}

impl<L: AltSet> Drop for Variant<L> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<L: AltSet> fmt::Debug for Variant<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("index", &self.index())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts destructor runs through a shared cell.
    #[derive(Clone)]
    struct Tracked {
        drops: Rc<Cell<usize>>,
    }

    impl Tracked {
        fn new(drops: &Rc<Cell<usize>>) -> Self {
            Tracked {
                drops: Rc::clone(drops),
            }
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    /// Alternative whose copy construction always unwinds.
    struct Explosive;

    impl Clone for Explosive {
        fn clone(&self) -> Self {
            panic!("refusing to clone");
        }
    }

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn test_value_construction_roundtrip() {
        let v = Variant::<(i64, String, f64)>::new(42i64);
        assert_eq!(v.index(), Some(0));
        assert!(v.holds::<i64, _>());
        assert!(!v.holds::<f64, _>());
        assert_eq!(v.get::<i64, _>().copied(), Ok(42));
        assert!(v.get::<String, _>().is_err());
    }

    #[test]
    fn test_default_is_valueless() {
        let v = Variant::<(i64, String)>::default();
        assert!(v.is_valueless());
        assert_eq!(v.index(), None);
        assert!(v.downcast_ref::<i64, _>().is_none());
        assert!(v.downcast_ref::<String, _>().is_none());

        let err = v.get::<i64, _>().unwrap_err();
        assert_eq!(err.requested(), 0);
        assert_eq!(err.actual(), None);
    }

    #[test]
    fn test_emplace_destroys_old_value_once() {
        let drops = Rc::new(Cell::new(0));
        let mut v = Variant::<(Tracked, String)>::new(Tracked::new(&drops));
        assert_eq!(drops.get(), 0);

        v.emplace::<String, _>("replacement".to_string());
        assert_eq!(drops.get(), 1);
        assert_eq!(v.index(), Some(1));
    }

    #[test]
    fn test_emplace_returns_reference_to_new_value() {
        let mut v = Variant::<(i64, String)>::empty();
        let s = v.emplace::<String, _>("ab".to_string());
        s.push('c');
        assert_eq!(v.get::<String, _>().map(String::as_str), Ok("abc"));
    }

    #[test]
    fn test_set_is_value_assignment() {
        let mut v = Variant::<(i64, String)>::empty();
        v.set(5i64);
        assert_eq!(v.index(), Some(0));
        *v.get_mut::<i64, _>().unwrap() += 1;
        assert_eq!(v.get::<i64, _>().copied(), Ok(6));

        v.set("x".to_string());
        assert_eq!(v.index(), Some(1));
    }

    #[test]
    fn test_take_transfers_and_empties_source() {
        let drops = Rc::new(Cell::new(0));
        let mut a = Variant::<(Tracked, u8)>::new(Tracked::new(&drops));

        let b = a.take();
        assert!(a.is_valueless());
        assert_eq!(a.index(), None);
        assert_eq!(b.index(), Some(0));
        assert_eq!(drops.get(), 0); // transferred, not destroyed

        drop(b);
        assert_eq!(drops.get(), 1);
        drop(a);
        assert_eq!(drops.get(), 1); // valueless source drops nothing
    }

    #[test]
    fn test_take_on_valueless_is_valueless() {
        let mut v = Variant::<(i64, String)>::empty();
        let taken = v.take();
        assert!(v.is_valueless());
        assert!(taken.is_valueless());
    }

    #[test]
    fn test_clone_is_independent() {
        let a = Variant::<(i64, String, f64)>::new("hi".to_string());
        let mut b = a.clone();
        b.emplace::<f64, _>(3.25);

        assert_eq!(a.index(), Some(1));
        assert_eq!(a.get::<String, _>().map(String::as_str), Ok("hi"));
        assert_eq!(b.index(), Some(2));
        assert_eq!(b.get::<f64, _>().copied(), Ok(3.25));
    }

    #[test]
    fn test_clone_of_valueless_is_valueless() {
        let a = Variant::<(i64, String)>::empty();
        let b = a.clone();
        assert!(b.is_valueless());
    }

    #[test]
    fn test_clone_from_destroys_then_constructs() {
        let drops = Rc::new(Cell::new(0));
        let mut dst = Variant::<(Tracked, String)>::new(Tracked::new(&drops));
        let src = Variant::<(Tracked, String)>::new(Tracked::new(&drops));

        dst.clone_from(&src);
        assert_eq!(drops.get(), 1); // dst's old value destroyed exactly once
        assert_eq!(dst.index(), Some(0));

        let empty = Variant::<(Tracked, String)>::empty();
        dst.clone_from(&empty);
        assert!(dst.is_valueless());
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn test_unwinding_clone_leaves_target_valueless() {
        let drops = Rc::new(Cell::new(0));
        let mut dst = Variant::<(Explosive, Tracked)>::new(Tracked::new(&drops));
        let src = Variant::<(Explosive, Tracked)>::new(Explosive);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            dst.clone_from(&src);
        }));
        assert!(outcome.is_err());

        // The old value was destroyed before the clone ran, and the unwind
        // left the target empty rather than pointing at destroyed memory.
        assert!(dst.is_valueless());
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_duplicate_set_names_only_a_valueless_type() {
        // A duplicated set can be named and produce a valueless instance;
        // every typed operation on it is ambiguous and fails to compile, so
        // no value of it can ever exist.
        let v = Variant::<(u32, u32)>::empty();
        assert!(v.is_valueless());
        assert_eq!(v.index(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let drops = Rc::new(Cell::new(0));
        let mut v = Variant::<(Tracked, u8)>::new(Tracked::new(&drops));

        v.clear();
        assert!(v.is_valueless());
        assert_eq!(drops.get(), 1);

        v.clear();
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_drop_runs_active_destructor_once() {
        let drops = Rc::new(Cell::new(0));
        {
            let _v = Variant::<(Tracked, u8)>::new(Tracked::new(&drops));
        }
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_indexed_access() {
        let mut v = Variant::<(u8, String)>::new("abc".to_string());
        assert_eq!(v.at::<1>().map(String::as_str), Some("abc"));
        assert!(v.at::<0>().is_none());

        let err = v.get_at::<0>().unwrap_err();
        assert_eq!(err.requested(), 0);
        assert_eq!(err.actual(), Some(1));

        v.get_at_mut::<1>().unwrap().push('d');
        assert_eq!(v.get_at::<1>().map(String::as_str), Ok("abcd"));
        assert_eq!(v.at_mut::<1>().map(|s| s.len()), Some(4));
    }

    #[test]
    fn test_downcast_mut() {
        let mut v = Variant::<(i64, String)>::new(1i64);
        *v.downcast_mut::<i64, _>().unwrap() = 7;
        assert_eq!(v.get::<i64, _>().copied(), Ok(7));
        assert!(v.downcast_mut::<String, _>().is_none());
    }

    #[test]
    fn test_mismatch_error_reports_discriminants() {
        let v = Variant::<(i64, String, f64)>::new(2.5f64);
        let err = v.get::<String, _>().unwrap_err();
        assert_eq!(err.requested(), 1);
        assert_eq!(err.actual(), Some(2));
    }

    #[test]
    fn test_debug_reports_discriminant() {
        let v = Variant::<(u8, u16)>::new(9u16);
        let rendered = format!("{v:?}");
        assert!(rendered.contains("index: Some(1)"), "got {rendered}");

        let rendered = format!("{:?}", Variant::<(u8, u16)>::empty());
        assert!(rendered.contains("index: None"), "got {rendered}");
    }

    #[test]
    fn test_auto_traits_propagate() {
        assert_send::<Variant<(i32, String)>>();
        assert_sync::<Variant<(i32, String)>>();
    }

    // The end-to-end walk: construct, mismatch, replace, move, copy.
    #[test]
    fn test_full_scenario() {
        let mut v = Variant::<(i64, String, f64)>::new(42i64);
        assert_eq!(v.index(), Some(0));
        assert_eq!(v.get::<i64, _>().copied(), Ok(42));
        assert!(v.get::<String, _>().is_err());

        v.emplace::<String, _>("hi".to_string());
        assert_eq!(v.index(), Some(1));
        assert_eq!(v.get::<String, _>().map(String::as_str), Ok("hi"));

        let moved = v.take();
        assert!(v.is_valueless());
        assert_eq!(moved.get::<String, _>().map(String::as_str), Ok("hi"));

        let mut copy = moved.clone();
        copy.emplace::<f64, _>(3.14);
        assert_eq!(moved.get::<String, _>().map(String::as_str), Ok("hi"));
        assert_eq!(copy.get::<f64, _>().copied(), Ok(3.14));
    }
}
