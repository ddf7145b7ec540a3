//! The value model: what the classifier and renderer can see of a value.
//!
//! Every value glimpse can summarize implements [`Inspect`]. The trait is a
//! set of *capability probes*, each returning `None` by default:
//!
//! | Probe | Capability |
//! |-------|------------|
//! | [`primitive`](Inspect::primitive) | scalar, text or null |
//! | [`container`](Inspect::container) | native sequence, set, tuple, range or mapping |
//! | [`as_record`](Inspect::as_record) | [`HasLabeledFields`] |
//! | [`as_frame`](Inspect::as_frame) | [`TabularFrame`] |
//! | [`as_series`](Inspect::as_series) | [`TabularSeries`] |
//! | [`as_callable`](Inspect::as_callable) | [`IsCallable`] |
//! | [`as_array`](Inspect::as_array) | [`HasShape`] (tensor-like when it has a [`Placement`]) |
//! | [`as_module`](Inspect::as_module) | [`IsComposable`] |
//!
//! The classifier asks the probes in that fixed order and stops at the first
//! answer, so a type exposing several capabilities is classified by the
//! earliest one. A type answering none is classified as *Other* and rendered
//! through [`fallback_text`](Inspect::fallback_text).
//!
//! Implementations ship for primitives, strings, std collections, tuples,
//! integer ranges, smart pointers, `Option` and (with the `json` feature)
//! `serde_json::Value`. Record types usually get theirs from
//! `#[derive(Inspect)]`.
//!
//! # Manual implementation
//!
//! ```rust
//! use glimpse::{format_summary, Field, HasLabeledFields, Inspect};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Inspect for Point {
//!     fn as_record(&self) -> Option<&dyn HasLabeledFields> {
//!         Some(self)
//!     }
//! }
//!
//! impl HasLabeledFields for Point {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![Field::new("x", &self.x), Field::new("y", &self.y)]
//!     }
//! }
//!
//! let line = format_summary("p", &Point { x: 1, y: 2 }, 60);
//! assert_eq!(line, "p (Point) = x=1 (int), y=2 (int)");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use crate::util::short_type_name;

mod array;
mod capability;
#[cfg(feature = "json")]
mod json;
mod std_impls;
mod wrappers;

pub use array::{ArrayView, HostArray};
pub use capability::{
    count_parameters, flatten_layers, Field, HasLabeledFields, HasShape, IsCallable,
    IsComposable, ParamCount, Parameter, Placement, TabularFrame, TabularSeries,
};
pub use wrappers::{Function, Opaque};

/// A value the formatter can classify and render.
///
/// See the [module documentation](self) for the probe order.
pub trait Inspect {
    /// Scalar, text or null view of this value.
    fn primitive(&self) -> Option<Primitive<'_>> {
        None
    }

    /// Native container view: sequence, set, tuple, range or mapping.
    fn container(&self) -> Option<Container<'_>> {
        None
    }

    fn as_record(&self) -> Option<&dyn HasLabeledFields> {
        None
    }

    fn as_frame(&self) -> Option<&dyn TabularFrame> {
        None
    }

    fn as_series(&self) -> Option<&dyn TabularSeries> {
        None
    }

    fn as_callable(&self) -> Option<&dyn IsCallable> {
        None
    }

    fn as_array(&self) -> Option<&dyn HasShape> {
        None
    }

    fn as_module(&self) -> Option<&dyn IsComposable> {
        None
    }

    /// Short type name used as the label for records, frames, series, modules
    /// and unclassified values.
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Owned(short_type_name(std::any::type_name::<Self>()))
    }

    /// Generic text used for unclassified values and for values whose shape
    /// turned out to be inconsistent.
    fn fallback_text(&self) -> String {
        format!("<{}>", self.type_name())
    }

    /// Identity used by the renderer's cycle guard.
    fn identity(&self) -> Identity {
        Identity::of(self)
    }
}

/// Address and concrete type of a value.
///
/// Two identities are equal only if they name the same type at the same
/// address, so a struct and its first field never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    addr: usize,
    type_name: &'static str,
}

impl Identity {
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Identity {
            addr: value as *const T as *const () as usize,
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// A numeric or boolean scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i128),
    UInt(u128),
    F32(f32),
    F64(f64),
}

impl Scalar {
    pub fn is_float(&self) -> bool {
        matches!(self, Scalar::F32(_) | Scalar::F64(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::UInt(n) => write!(f, "{}", n),
            // Debug keeps the trailing ".0" on whole floats
            Scalar::F32(x) => write!(f, "{:?}", x),
            Scalar::F64(x) => write!(f, "{:?}", x),
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<f32> for Scalar {
    fn from(x: f32) -> Self {
        Scalar::F32(x)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::F64(x)
    }
}

macro_rules! scalar_from_int {
    ($variant:ident, $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(n: $t) -> Self {
                    Scalar::$variant(n as $wide)
                }
            }
        )*
    };
}

scalar_from_int!(Int, i128: i8, i16, i32, i64, i128, isize);
scalar_from_int!(UInt, u128: u8, u16, u32, u64, u128, usize);

/// Primitive view of a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive<'a> {
    Null,
    Scalar(Scalar),
    Text(Cow<'a, str>),
}

/// Flavor of a native sequence, which decides its label and brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqKind {
    List,
    Tuple,
    Set,
    Range,
}

/// Lazy iterator over sequence elements.
pub type Items<'a> = Box<dyn Iterator<Item = Item<'a>> + 'a>;

/// Lazy iterator over mapping entries.
pub type Entries<'a> = Box<dyn Iterator<Item = (Item<'a>, Item<'a>)> + 'a>;

/// Container view of a value.
///
/// Elements are produced lazily: the renderer stops pulling once its budget
/// is spent, so a million-element range costs only what is displayed.
pub enum Container<'a> {
    Sequence {
        kind: SeqKind,
        len: usize,
        items: Items<'a>,
    },
    Mapping {
        len: usize,
        entries: Entries<'a>,
    },
}

impl<'a> Container<'a> {
    pub fn sequence(
        kind: SeqKind,
        len: usize,
        items: impl Iterator<Item = Item<'a>> + 'a,
    ) -> Self {
        Container::Sequence {
            kind,
            len,
            items: Box::new(items),
        }
    }

    pub fn mapping(len: usize, entries: impl Iterator<Item = (Item<'a>, Item<'a>)> + 'a) -> Self {
        Container::Mapping {
            len,
            entries: Box::new(entries),
        }
    }

    /// Number of elements (or entries) the container reports.
    pub fn len(&self) -> usize {
        match self {
            Container::Sequence { len, .. } | Container::Mapping { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Container<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Sequence { kind, len, .. } => f
                .debug_struct("Sequence")
                .field("kind", kind)
                .field("len", len)
                .finish_non_exhaustive(),
            Container::Mapping { len, .. } => f
                .debug_struct("Mapping")
                .field("len", len)
                .finish_non_exhaustive(),
        }
    }
}

/// An element yielded by a container: borrowed from it, or built on the fly
/// (range values, array slices, module listings).
pub enum Item<'a> {
    Borrowed(&'a dyn Inspect),
    Owned(Box<dyn Inspect + 'a>),
}

impl<'a> Item<'a> {
    pub fn from_ref<T: Inspect + 'a>(value: &'a T) -> Self {
        Item::Borrowed(value)
    }

    pub fn owned<T: Inspect + 'a>(value: T) -> Self {
        Item::Owned(Box::new(value))
    }
}

impl<'a> Deref for Item<'a> {
    type Target = dyn Inspect + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            Item::Borrowed(value) => *value,
            Item::Owned(value) => value.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_display() {
        assert_eq!(Scalar::from(true).to_string(), "true");
        assert_eq!(Scalar::from(-42i32).to_string(), "-42");
        assert_eq!(Scalar::from(7u8).to_string(), "7");
        assert_eq!(Scalar::from(1.0f64).to_string(), "1.0");
        assert_eq!(Scalar::from(0.1f32).to_string(), "0.1");
    }

    #[test]
    fn scalar_float_flag() {
        assert!(Scalar::from(1.5f64).is_float());
        assert!(!Scalar::from(1u64).is_float());
    }

    #[test]
    fn identity_distinguishes_type_at_same_address() {
        struct Outer {
            inner: u64,
        }
        let outer = Outer { inner: 3 };
        assert_ne!(Identity::of(&outer), Identity::of(&outer.inner));
        assert_eq!(Identity::of(&outer), Identity::of(&outer));
    }

    #[test]
    fn item_deref_reaches_value() {
        let n = 5i32;
        let borrowed = Item::from_ref(&n);
        let owned = Item::owned(Scalar::from(6i32));
        assert_eq!(
            borrowed.primitive(),
            Some(Primitive::Scalar(Scalar::Int(5)))
        );
        assert_eq!(owned.primitive(), Some(Primitive::Scalar(Scalar::Int(6))));
    }

    #[test]
    fn container_len() {
        let v = vec![1, 2, 3];
        let container = v.container().unwrap();
        assert_eq!(container.len(), 3);
        assert!(!container.is_empty());
    }
}
