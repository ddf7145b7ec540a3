//! Adapters for values that carry no structure of their own.

use std::borrow::Cow;
use std::fmt;

use super::{Identity, Inspect, IsCallable};
use crate::util::short_type_name;

/// A callable paired with the name it is displayed under.
///
/// Rust closures and fn items have no runtime name, so the name is given at
/// construction, usually through [`named_fn!`](crate::named_fn).
///
/// ```rust
/// use glimpse::{format_summary, Function};
///
/// fn area(w: f64, h: f64) -> f64 {
///     w * h
/// }
///
/// let f = Function::new("area", area);
/// assert_eq!(format_summary("f", &f, 40), "f (function) = area");
/// ```
#[derive(Clone)]
pub struct Function<F> {
    name: Cow<'static, str>,
    signature: Option<Cow<'static, str>>,
    func: F,
}

impl<F> Function<F> {
    pub fn new(name: impl Into<Cow<'static, str>>, func: F) -> Self {
        Function {
            name: name.into(),
            signature: None,
            func,
        }
    }

    pub fn with_signature(mut self, signature: impl Into<Cow<'static, str>>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// The wrapped callable.
    pub fn get(&self) -> &F {
        &self.func
    }

    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<F> fmt::Debug for Function<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl<F> Inspect for Function<F> {
    fn as_callable(&self) -> Option<&dyn IsCallable> {
        Some(self)
    }
}

impl<F> IsCallable for Function<F> {
    fn callable_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }

    fn signature(&self) -> Option<Cow<'_, str>> {
        self.signature.as_deref().map(Cow::Borrowed)
    }
}

/// Wraps a callable in a [`Function`] named after its path.
///
/// ```rust
/// use glimpse::{named_fn, IsCallable};
///
/// let f = named_fn!(str::len);
/// assert_eq!(f.callable_name(), "str::len");
/// ```
#[macro_export]
macro_rules! named_fn {
    ($path:path) => {
        $crate::Function::new(::core::stringify!($path), $path)
    };
}

/// Shows any `Debug` value as an unclassified value with its `Debug` text.
///
/// ```rust
/// use glimpse::{format_summary, Opaque};
///
/// #[derive(Debug)]
/// enum Mode {
///     Fast,
/// }
///
/// assert_eq!(format_summary("m", &Opaque(&Mode::Fast), 40), "m (Mode) = Fast");
/// ```
pub struct Opaque<'a, T: ?Sized>(pub &'a T);

impl<T: fmt::Debug + ?Sized> Inspect for Opaque<'_, T> {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Owned(short_type_name(std::any::type_name::<T>()))
    }

    fn fallback_text(&self) -> String {
        format!("{:?}", self.0)
    }

    fn identity(&self) -> Identity {
        Identity::of(self.0)
    }
}
