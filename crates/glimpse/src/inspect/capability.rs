//! Capability traits for structured values.
//!
//! Each trait answers one structural question the classifier would otherwise
//! have to guess from a type's shape: does it have named fields, rows and
//! columns, a shape and dtype, sub-layers?

use std::borrow::Cow;

use super::{HostArray, Inspect, Item};
use crate::error::Result;

/// A named field of a record.
pub struct Field<'a> {
    pub name: Cow<'a, str>,
    pub value: Item<'a>,
}

impl<'a> Field<'a> {
    pub fn new<T: Inspect + 'a>(name: impl Into<Cow<'a, str>>, value: &'a T) -> Self {
        Field {
            name: name.into(),
            value: Item::from_ref(value),
        }
    }

    /// A field whose value is computed rather than stored.
    pub fn computed<T: Inspect + 'a>(name: impl Into<Cow<'a, str>>, value: T) -> Self {
        Field {
            name: name.into(),
            value: Item::owned(value),
        }
    }
}

/// A user-defined record whose fields are listed in declaration order.
pub trait HasLabeledFields {
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Rows and labeled columns of numbers, like a data frame.
pub trait TabularFrame {
    fn row_count(&self) -> usize;

    fn column_labels(&self) -> Vec<Cow<'_, str>>;

    /// The cell values as a `row_count x column_count` array.
    fn values(&self) -> Result<HostArray>;
}

/// A single labeled column of numbers.
pub trait TabularSeries {
    fn element_count(&self) -> usize;

    fn values(&self) -> Result<HostArray>;
}

pub trait IsCallable {
    fn callable_name(&self) -> Cow<'_, str>;

    fn signature(&self) -> Option<Cow<'_, str>> {
        None
    }
}

/// Where a tensor lives and whether it tracks gradients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement<'a> {
    pub device: Cow<'a, str>,
    pub requires_grad: bool,
}

/// A multi-dimensional numeric array.
///
/// Values reporting a [`Placement`] classify as tensors, the rest as plain
/// numeric arrays. Both are read through [`to_host`](HasShape::to_host),
/// which copies the data into a fresh [`HostArray`] and leaves the source
/// untouched.
pub trait HasShape {
    fn shape(&self) -> Vec<usize>;

    fn dtype(&self) -> Cow<'_, str>;

    fn to_host(&self) -> Result<HostArray>;

    fn placement(&self) -> Option<Placement<'_>> {
        None
    }
}

/// A parameter tensor owned directly by a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    pub numel: usize,
    pub trainable: bool,
}

/// Parameter totals across a layer tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamCount {
    pub trainable: usize,
    pub total: usize,
}

/// A composable model made of nested layers.
pub trait IsComposable {
    /// One-line description of this layer alone, e.g. `Linear(in=4, out=2)`.
    fn layer_repr(&self) -> String;

    fn sublayers(&self) -> Vec<&dyn IsComposable>;

    fn own_parameters(&self) -> Vec<Parameter> {
        Vec::new()
    }

    /// Pure containers are skipped when listing layers.
    fn is_sequential(&self) -> bool {
        false
    }

    fn device(&self) -> Option<Cow<'_, str>> {
        None
    }
}

/// True when `layer` is already on the path from the root, i.e. the layer
/// tree loops back on itself.
///
/// Layers compare by data address and vtable, so a struct and its first field
/// (same address, different types) are distinct, and so are sibling
/// zero-sized layers, which are never on each other's path.
fn on_path<'a>(path: &[&'a dyn IsComposable], layer: &'a dyn IsComposable) -> bool {
    path.iter().any(|ancestor| std::ptr::eq(*ancestor, layer))
}

/// Sums parameters over `module` and every layer below it.
///
/// A layer reached again below itself is not counted twice.
pub fn count_parameters(module: &dyn IsComposable) -> ParamCount {
    fn walk<'a>(
        layer: &'a dyn IsComposable,
        path: &mut Vec<&'a dyn IsComposable>,
        count: &mut ParamCount,
    ) {
        if on_path(path, layer) {
            return;
        }
        for param in layer.own_parameters() {
            count.total += param.numel;
            if param.trainable {
                count.trainable += param.numel;
            }
        }
        path.push(layer);
        for child in layer.sublayers() {
            walk(child, path, count);
        }
        path.pop();
    }

    let mut count = ParamCount::default();
    walk(module, &mut Vec::new(), &mut count);
    count
}

/// Lists `module` and its descendants in pre-order, skipping sequential
/// containers (their children are still listed).
pub fn flatten_layers(module: &dyn IsComposable) -> Vec<&dyn IsComposable> {
    fn walk<'a>(
        layer: &'a dyn IsComposable,
        path: &mut Vec<&'a dyn IsComposable>,
        out: &mut Vec<&'a dyn IsComposable>,
    ) {
        if on_path(path, layer) {
            return;
        }
        if !layer.is_sequential() {
            out.push(layer);
        }
        path.push(layer);
        for child in layer.sublayers() {
            walk(child, path, out);
        }
        path.pop();
    }

    let mut out = Vec::new();
    walk(module, &mut Vec::new(), &mut out);
    out
}
