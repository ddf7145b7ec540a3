use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::ops::{Range, RangeInclusive};
use std::rc::Rc;
use std::sync::Arc;

use super::{
    Container, HasLabeledFields, HasShape, Identity, Inspect, IsCallable, IsComposable, Item,
    Primitive, Scalar, SeqKind, TabularFrame, TabularSeries,
};

impl Inspect for Scalar {
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(Primitive::Scalar(*self))
    }
}

macro_rules! impl_scalar {
    ($($t:ty),*) => {
        $(
            impl Inspect for $t {
                fn primitive(&self) -> Option<Primitive<'_>> {
                    Some(Primitive::Scalar(Scalar::from(*self)))
                }
            }
        )*
    };
}

impl_scalar!(bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Inspect for char {
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(Primitive::Text(Cow::Owned(self.to_string())))
    }
}

impl Inspect for str {
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(Primitive::Text(Cow::Borrowed(self)))
    }
}

impl Inspect for String {
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(Primitive::Text(Cow::Borrowed(self)))
    }
}

impl Inspect for Cow<'_, str> {
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(Primitive::Text(Cow::Borrowed(self.as_ref())))
    }
}

impl Inspect for () {
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(Primitive::Null)
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn primitive(&self) -> Option<Primitive<'_>> {
        match self {
            Some(value) => value.primitive(),
            None => Some(Primitive::Null),
        }
    }

    fn container(&self) -> Option<Container<'_>> {
        self.as_ref().and_then(|v| v.container())
    }

    fn as_record(&self) -> Option<&dyn HasLabeledFields> {
        self.as_ref().and_then(|v| v.as_record())
    }

    fn as_frame(&self) -> Option<&dyn TabularFrame> {
        self.as_ref().and_then(|v| v.as_frame())
    }

    fn as_series(&self) -> Option<&dyn TabularSeries> {
        self.as_ref().and_then(|v| v.as_series())
    }

    fn as_callable(&self) -> Option<&dyn IsCallable> {
        self.as_ref().and_then(|v| v.as_callable())
    }

    fn as_array(&self) -> Option<&dyn HasShape> {
        self.as_ref().and_then(|v| v.as_array())
    }

    fn as_module(&self) -> Option<&dyn IsComposable> {
        self.as_ref().and_then(|v| v.as_module())
    }

    fn type_name(&self) -> Cow<'_, str> {
        match self {
            Some(value) => value.type_name(),
            None => Cow::Borrowed("None"),
        }
    }

    fn fallback_text(&self) -> String {
        match self {
            Some(value) => value.fallback_text(),
            None => "None".to_string(),
        }
    }

    fn identity(&self) -> Identity {
        match self {
            Some(value) => value.identity(),
            None => Identity::of(self),
        }
    }
}

// Pointers are transparent: they classify, render and cycle-check as the
// value they point to.
macro_rules! forward_inspect {
    () => {
        fn primitive(&self) -> Option<Primitive<'_>> {
            (**self).primitive()
        }

        fn container(&self) -> Option<Container<'_>> {
            (**self).container()
        }

        fn as_record(&self) -> Option<&dyn HasLabeledFields> {
            (**self).as_record()
        }

        fn as_frame(&self) -> Option<&dyn TabularFrame> {
            (**self).as_frame()
        }

        fn as_series(&self) -> Option<&dyn TabularSeries> {
            (**self).as_series()
        }

        fn as_callable(&self) -> Option<&dyn IsCallable> {
            (**self).as_callable()
        }

        fn as_array(&self) -> Option<&dyn HasShape> {
            (**self).as_array()
        }

        fn as_module(&self) -> Option<&dyn IsComposable> {
            (**self).as_module()
        }

        fn type_name(&self) -> Cow<'_, str> {
            (**self).type_name()
        }

        fn fallback_text(&self) -> String {
            (**self).fallback_text()
        }

        fn identity(&self) -> Identity {
            (**self).identity()
        }
    };
}

impl<T: Inspect + ?Sized> Inspect for &T {
    forward_inspect!();
}

impl<T: Inspect + ?Sized> Inspect for &mut T {
    forward_inspect!();
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    forward_inspect!();
}

impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    forward_inspect!();
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    forward_inspect!();
}

macro_rules! impl_list {
    ($kind:ident: $($ty:ty),*) => {
        $(
            impl<T: Inspect> Inspect for $ty {
                fn container(&self) -> Option<Container<'_>> {
                    Some(Container::sequence(
                        SeqKind::$kind,
                        self.len(),
                        self.iter().map(Item::from_ref),
                    ))
                }
            }
        )*
    };
}

impl_list!(List: [T], Vec<T>, VecDeque<T>, LinkedList<T>);
impl_list!(Set: BTreeSet<T>);

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn container(&self) -> Option<Container<'_>> {
        Some(Container::sequence(
            SeqKind::List,
            N,
            self.iter().map(Item::from_ref),
        ))
    }
}

impl<T: Inspect, S> Inspect for HashSet<T, S> {
    fn container(&self) -> Option<Container<'_>> {
        Some(Container::sequence(
            SeqKind::Set,
            self.len(),
            self.iter().map(Item::from_ref),
        ))
    }
}

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn container(&self) -> Option<Container<'_>> {
        Some(Container::mapping(
            self.len(),
            self.iter()
                .map(|(k, v)| (Item::from_ref(k), Item::from_ref(v))),
        ))
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn container(&self) -> Option<Container<'_>> {
        Some(Container::mapping(
            self.len(),
            self.iter()
                .map(|(k, v)| (Item::from_ref(k), Item::from_ref(v))),
        ))
    }
}

macro_rules! impl_tuple {
    ($len:expr => $($name:ident $idx:tt),+) => {
        impl<$($name: Inspect),+> Inspect for ($($name,)+) {
            fn container(&self) -> Option<Container<'_>> {
                let items = vec![$(Item::from_ref(&self.$idx)),+];
                Some(Container::sequence(SeqKind::Tuple, $len, items.into_iter()))
            }
        }
    };
}

impl_tuple!(1 => A 0);
impl_tuple!(2 => A 0, B 1);
impl_tuple!(3 => A 0, B 1, C 2);
impl_tuple!(4 => A 0, B 1, C 2, D 3);
impl_tuple!(5 => A 0, B 1, C 2, D 3, E 4);
impl_tuple!(6 => A 0, B 1, C 2, D 3, E 4, F 5);

macro_rules! impl_range {
    ($($t:ty),*) => {
        $(
            impl Inspect for Range<$t> {
                fn container(&self) -> Option<Container<'_>> {
                    let len = (self.end as i128 - self.start as i128).max(0);
                    Some(Container::sequence(
                        SeqKind::Range,
                        usize::try_from(len).unwrap_or(usize::MAX),
                        self.clone().map(|n| Item::owned(Scalar::from(n))),
                    ))
                }
            }

            impl Inspect for RangeInclusive<$t> {
                fn container(&self) -> Option<Container<'_>> {
                    let len = if self.is_empty() {
                        0
                    } else {
                        *self.end() as i128 - *self.start() as i128 + 1
                    };
                    Some(Container::sequence(
                        SeqKind::Range,
                        usize::try_from(len).unwrap_or(usize::MAX),
                        self.clone().map(|n| Item::owned(Scalar::from(n))),
                    ))
                }
            }
        )*
    };
}

impl_range!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    fn seq_kind(value: &dyn Inspect) -> Option<(SeqKind, usize)> {
        match value.container()? {
            Container::Sequence { kind, len, .. } => Some((kind, len)),
            Container::Mapping { .. } => None,
        }
    }

    #[test]
    fn text_and_null() {
        assert_eq!(
            "hi".primitive(),
            Some(Primitive::Text(Cow::Borrowed("hi")))
        );
        assert_eq!(None::<i32>.primitive(), Some(Primitive::Null));
        assert_eq!(Some(3u8).primitive(), Some(Primitive::Scalar(Scalar::UInt(3))));
        assert_eq!(().primitive(), Some(Primitive::Null));
    }

    #[test]
    fn sequence_kinds() {
        assert_eq!(seq_kind(&vec![1, 2]), Some((SeqKind::List, 2)));
        assert_eq!(seq_kind(&[1u8; 4]), Some((SeqKind::List, 4)));
        assert_eq!(seq_kind(&(1, "a")), Some((SeqKind::Tuple, 2)));
        assert_eq!(
            seq_kind(&BTreeSet::from([1, 2, 3])),
            Some((SeqKind::Set, 3))
        );
        assert_eq!(seq_kind(&(0..10)), Some((SeqKind::Range, 10)));
        assert_eq!(seq_kind(&(5..=5)), Some((SeqKind::Range, 1)));
        let (start, end) = (5, 2);
        assert_eq!(seq_kind(&(start..end)), Some((SeqKind::Range, 0)));
    }

    #[test]
    fn mapping_len() {
        let map = BTreeMap::from([("a", 1), ("b", 2)]);
        assert!(matches!(
            map.container(),
            Some(Container::Mapping { len: 2, .. })
        ));
    }

    #[test]
    fn pointers_forward_identity() {
        let v = vec![1, 2];
        let boxed: Box<dyn Inspect + '_> = Box::new(&v);
        assert_eq!(boxed.identity(), v.identity());
        assert_eq!(Rc::new(7i32).type_name(), "i32");
    }

    #[test]
    fn huge_range_is_lazy() {
        let r = 0..u64::MAX;
        let Some(Container::Sequence { len, mut items, .. }) = r.container() else {
            panic!("expected a range");
        };
        assert_eq!(len, usize::MAX);
        let first = items.next().and_then(|i| match i.primitive() {
            Some(Primitive::Scalar(s)) => Some(s),
            _ => None,
        });
        assert_eq!(first, Some(Scalar::UInt(0)));
    }
}
