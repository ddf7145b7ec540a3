//! Host-resident numeric arrays.
//!
//! Arrays, tensors, frames and series are all rendered through a
//! [`HostArray`]: a row-major copy of the values plus the shape. An
//! [`ArrayView`] exposes it to the renderer as nested lists, one level per
//! dimension, with a 0-d array collapsing to its single scalar.

use super::{Container, Inspect, Item, Primitive, Scalar, SeqKind};
use crate::error::{GlimpseError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct HostArray {
    shape: Vec<usize>,
    data: Vec<Scalar>,
}

impl HostArray {
    /// Builds an array, checking that `data` holds exactly the number of
    /// elements `shape` describes.
    ///
    /// ```rust
    /// use glimpse::{HostArray, Scalar};
    ///
    /// let ok = HostArray::new(vec![2, 2], vec![Scalar::from(1i64); 4]);
    /// assert!(ok.is_ok());
    ///
    /// let bad = HostArray::new(vec![2, 3], vec![Scalar::from(1i64); 4]);
    /// assert!(bad.is_err());
    /// ```
    pub fn new(shape: Vec<usize>, data: Vec<Scalar>) -> Result<Self> {
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim));
        match expected {
            Some(expected) if expected == data.len() => Ok(HostArray { shape, data }),
            expected => Err(GlimpseError::ShapeMismatch {
                shape,
                expected: expected.unwrap_or(usize::MAX),
                actual: data.len(),
            }),
        }
    }

    /// A one-dimensional array.
    pub fn from_vec<T: Into<Scalar>>(values: Vec<T>) -> Self {
        let data: Vec<Scalar> = values.into_iter().map(Into::into).collect();
        HostArray {
            shape: vec![data.len()],
            data,
        }
    }

    /// A 0-d array holding one value.
    pub fn scalar(value: impl Into<Scalar>) -> Self {
        HostArray {
            shape: Vec::new(),
            data: vec![value.into()],
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[Scalar] {
        &self.data
    }

    pub fn view(&self) -> ArrayView<'_> {
        ArrayView {
            shape: &self.shape,
            data: &self.data,
        }
    }
}

/// A borrowed sub-array.
#[derive(Debug, Clone, Copy)]
pub struct ArrayView<'a> {
    shape: &'a [usize],
    data: &'a [Scalar],
}

impl<'a> ArrayView<'a> {
    fn scalar(self) -> Option<Primitive<'a>> {
        if self.shape.is_empty() {
            self.data.first().map(|s| Primitive::Scalar(*s))
        } else {
            None
        }
    }

    fn rows(self) -> Option<Container<'a>> {
        let (&rows, rest) = self.shape.split_first()?;
        let stride: usize = rest.iter().product();
        let data = self.data;
        let items = (0..rows).map(move |i| {
            Item::owned(ArrayView {
                shape: rest,
                data: &data[i * stride..(i + 1) * stride],
            })
        });
        Some(Container::sequence(SeqKind::List, rows, items))
    }
}

impl Inspect for ArrayView<'_> {
    fn primitive(&self) -> Option<Primitive<'_>> {
        self.scalar()
    }

    fn container(&self) -> Option<Container<'_>> {
        self.rows()
    }
}

impl Inspect for HostArray {
    fn primitive(&self) -> Option<Primitive<'_>> {
        self.view().scalar()
    }

    fn container(&self) -> Option<Container<'_>> {
        self.view().rows()
    }
}
