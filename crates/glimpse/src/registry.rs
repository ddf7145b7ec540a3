//! Runtime adapters for types that do not implement [`Inspect`].
//!
//! Foreign types (a tensor from another crate, a third-party data frame)
//! cannot implement `Inspect` here, and the core never names them. Instead an
//! application registers an adapter that borrows the value as something that
//! does implement `Inspect`. The `*_any` entry points consult the registry by
//! [`TypeId`] and fall back to an unclassified value otherwise.
//!
//! ```rust
//! use glimpse::{format_summary_any, register_adapter};
//!
//! #[derive(Debug)]
//! struct Celsius(f64);
//!
//! // Before registration the type is opaque.
//! assert_eq!(format_summary_any("t", &Celsius(21.5), 40), "t (Celsius) = <Celsius>");
//!
//! register_adapter::<Celsius>(|c| Box::new(c.0));
//! assert_eq!(format_summary_any("t", &Celsius(21.5), 40), "t (float) = 21.5");
//! ```

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::HashMap;
use std::panic::Location;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;

use crate::compose::format_summary;
use crate::inspect::Inspect;
use crate::modes::Inspector;
use crate::name::name_or_resolve;
use crate::util::short_type_name;

/// Borrows a `T` as an inspectable value.
pub type Adapter<T> = for<'a> fn(&'a T) -> Box<dyn Inspect + 'a>;

trait ErasedAdapter: Send + Sync {
    fn adapt<'a>(&self, value: &'a dyn Any) -> Option<Box<dyn Inspect + 'a>>;
}

struct TypedAdapter<T: 'static> {
    adapter: Adapter<T>,
}

impl<T: Any> ErasedAdapter for TypedAdapter<T> {
    fn adapt<'a>(&self, value: &'a dyn Any) -> Option<Box<dyn Inspect + 'a>> {
        value.downcast_ref::<T>().map(|v| (self.adapter)(v))
    }
}

static ADAPTERS: Lazy<Mutex<HashMap<TypeId, Arc<dyn ErasedAdapter>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Registers (or replaces) the adapter for `T`.
pub fn register_adapter<T: Any>(adapter: Adapter<T>) {
    let mut adapters = ADAPTERS.lock().unwrap_or_else(PoisonError::into_inner);
    adapters.insert(TypeId::of::<T>(), Arc::new(TypedAdapter { adapter }));
}

/// Removes the adapter for `T`, returning whether one was registered.
pub fn unregister_adapter<T: Any>() -> bool {
    let mut adapters = ADAPTERS.lock().unwrap_or_else(PoisonError::into_inner);
    adapters.remove(&TypeId::of::<T>()).is_some()
}

pub fn has_adapter<T: Any>() -> bool {
    let adapters = ADAPTERS.lock().unwrap_or_else(PoisonError::into_inner);
    adapters.contains_key(&TypeId::of::<T>())
}

/// Looks up and applies the adapter for `T`.
pub fn adapt<T: Any>(value: &T) -> Option<Box<dyn Inspect + '_>> {
    let adapter = {
        let adapters = ADAPTERS.lock().unwrap_or_else(PoisonError::into_inner);
        adapters.get(&TypeId::of::<T>()).cloned()
    }?;
    adapter.adapt(value)
}

/// Stand-in for a value without an adapter.
struct Unregistered {
    type_name: String,
}

impl Inspect for Unregistered {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.type_name)
    }
}

fn adapted_or_opaque<T: Any>(value: &T) -> Box<dyn Inspect + '_> {
    adapt(value).unwrap_or_else(|| {
        Box::new(Unregistered {
            type_name: short_type_name(std::any::type_name::<T>()),
        })
    })
}

/// [`format_summary`] for any `'static` type, through the registry.
pub fn format_summary_any<T: Any>(name: &str, value: &T, max_length: usize) -> String {
    format_summary(name, &*adapted_or_opaque(value), max_length)
}

/// [`compact_debug`](crate::compact_debug) for any `'static` type, through
/// the registry.
#[track_caller]
pub fn compact_debug_any<T: Any>(value: &T, name_hint: Option<&str>, highlighted: bool) {
    let name = name_or_resolve(name_hint, Location::caller(), "compact_debug_any");
    let adapted = adapted_or_opaque(value);
    println!(
        "{}",
        Inspector::from_env().compact(&name, &*adapted, highlighted)
    );
}
