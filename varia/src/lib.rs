//! A type-safe tagged union over a closed, ordered set of alternatives.
//!
//! Declare the set as a tuple type of up to 12 distinct `Clone` types and
//! hold exactly one active value of one of them at a time:
//!
//! ```
//! use varia::Variant;
//!
//! let mut v = Variant::<(i64, String, f64)>::new(42i64);
//! assert_eq!(v.index(), Some(0));
//! assert_eq!(v.get::<i64, _>().copied(), Ok(42));
//!
//! v.emplace::<String, _>("hi".to_string());
//! assert!(v.holds::<String, _>());
//! assert!(v.get::<i64, _>().is_err());
//! ```
//!
//! The active value lives inline, in a slot sized and aligned for the
//! largest alternative; a discriminant records which one it is. Destroy,
//! copy-construct and move-construct of the active value dispatch in O(1)
//! through a per-set table ([`AltSet::VTABLES`]) fixed when the set is
//! declared.
//!
//! # Compile-time validation
//!
//! The set is validated by the type system, not at runtime. Declaring a set
//! with duplicate entries makes every typed operation on it ambiguous and
//! therefore ill-typed:
//!
//! ```compile_fail
//! use varia::Variant;
//!
//! let _v = Variant::<(u32, u32)>::new(7u32);
//! ```
//!
//! Rejection happens at the first typed operation rather than at the
//! declaration itself: a duplicated set can still be named and a valueless
//! instance produced, but no value of it can ever be constructed or read.
//!
//! Likewise, a type outside the set has no position:
//!
//! ```compile_fail
//! use varia::Variant;
//!
//! let _v = Variant::<(u32, String)>::new(3.5f64);
//! ```
//!
//! and an out-of-range position does not resolve:
//!
//! ```compile_fail
//! use varia::Variant;
//!
//! let v = Variant::<(u8, u16)>::empty();
//! let _ = v.at::<5>();
//! ```
//!
//! # The valueless state
//!
//! A variant holding no alternative at all is *valueless*. It is produced by
//! [`Variant::empty`]/`Default`, by [`Variant::take`] on the source, by
//! [`Variant::clear`], and by copying from a valueless source. Checked
//! accessors report it through [`AccessError`]; the `Option`-returning
//! probes ([`Variant::downcast_ref`], [`Variant::at`]) simply return `None`.
//!
//! ```
//! use varia::Variant;
//!
//! let mut v = Variant::<(i64, String)>::new("owned".to_string());
//! let moved = v.take();
//! assert!(v.is_valueless());
//! assert_eq!(moved.get::<String, _>().map(String::as_str), Ok("owned"));
//! ```

pub mod error;
pub mod meta;
pub mod set;
pub mod variant;
pub mod vtable;

pub use error::AccessError;
pub use meta::{At, Ix, Member};
pub use set::AltSet;
pub use variant::Variant;
pub use vtable::AltVTable;
