//! Summaries of values that expose structure through the capability traits.

use std::borrow::Cow;

use glimpse::{
    classify, format_summary, render, GlimpseError, HasShape, HostArray, Inspect, IsComposable,
    Parameter, Placement, Result, Scalar, SemanticType, TabularFrame, TabularSeries,
};

struct Tensor {
    shape: Vec<usize>,
    data: Vec<f32>,
    device: &'static str,
    requires_grad: bool,
}

impl Inspect for Tensor {
    fn as_array(&self) -> Option<&dyn HasShape> {
        Some(self)
    }
}

impl HasShape for Tensor {
    fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn dtype(&self) -> Cow<'_, str> {
        "float32".into()
    }

    fn to_host(&self) -> Result<HostArray> {
        HostArray::new(
            self.shape.clone(),
            self.data.iter().copied().map(Scalar::from).collect(),
        )
    }

    fn placement(&self) -> Option<Placement<'_>> {
        Some(Placement {
            device: self.device.into(),
            requires_grad: self.requires_grad,
        })
    }
}

/// A host array without placement, declared with a wrong length on purpose
/// when `broken` is set.
struct NdArray {
    data: Vec<i64>,
    broken: bool,
}

impl Inspect for NdArray {
    fn as_array(&self) -> Option<&dyn HasShape> {
        Some(self)
    }

    fn fallback_text(&self) -> String {
        "<Broken>".to_string()
    }
}

impl HasShape for NdArray {
    fn shape(&self) -> Vec<usize> {
        vec![self.data.len()]
    }

    fn dtype(&self) -> Cow<'_, str> {
        "int64".into()
    }

    fn to_host(&self) -> Result<HostArray> {
        let declared = if self.broken {
            self.data.len() + 1
        } else {
            self.data.len()
        };
        HostArray::new(
            vec![declared],
            self.data.iter().copied().map(Scalar::from).collect(),
        )
    }
}

struct Frame {
    columns: Vec<&'static str>,
    rows: Vec<Vec<f64>>,
}

impl Inspect for Frame {
    fn as_frame(&self) -> Option<&dyn TabularFrame> {
        Some(self)
    }
}

impl TabularFrame for Frame {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_labels(&self) -> Vec<Cow<'_, str>> {
        self.columns.iter().map(|c| Cow::Borrowed(*c)).collect()
    }

    fn values(&self) -> Result<HostArray> {
        let data = self.rows.iter().flatten().copied().map(Scalar::from).collect();
        HostArray::new(vec![self.rows.len(), self.columns.len()], data)
    }
}

struct Series(Vec<f64>);

impl Inspect for Series {
    fn as_series(&self) -> Option<&dyn TabularSeries> {
        Some(self)
    }
}

impl TabularSeries for Series {
    fn element_count(&self) -> usize {
        self.0.len()
    }

    fn values(&self) -> Result<HostArray> {
        Ok(HostArray::from_vec(self.0.clone()))
    }
}

struct Linear {
    inputs: usize,
    outputs: usize,
    frozen: bool,
}

impl IsComposable for Linear {
    fn layer_repr(&self) -> String {
        format!("Linear(in={}, out={})", self.inputs, self.outputs)
    }

    fn sublayers(&self) -> Vec<&dyn IsComposable> {
        Vec::new()
    }

    fn own_parameters(&self) -> Vec<Parameter> {
        let trainable = !self.frozen;
        vec![
            Parameter {
                numel: self.inputs * self.outputs,
                trainable,
            },
            Parameter {
                numel: self.outputs,
                trainable,
            },
        ]
    }
}

struct Sequential {
    layers: Vec<Linear>,
    device: Option<&'static str>,
}

impl Inspect for Sequential {
    fn as_module(&self) -> Option<&dyn IsComposable> {
        Some(self)
    }
}

impl IsComposable for Sequential {
    fn layer_repr(&self) -> String {
        "Sequential".to_string()
    }

    fn sublayers(&self) -> Vec<&dyn IsComposable> {
        self.layers.iter().map(|l| l as &dyn IsComposable).collect()
    }

    fn is_sequential(&self) -> bool {
        true
    }

    fn device(&self) -> Option<Cow<'_, str>> {
        self.device.map(Cow::Borrowed)
    }
}

fn model(device: Option<&'static str>) -> Sequential {
    Sequential {
        layers: vec![
            Linear {
                inputs: 4,
                outputs: 3,
                frozen: true,
            },
            Linear {
                inputs: 3,
                outputs: 2,
                frozen: false,
            },
        ],
        device,
    }
}

#[test]
fn test_tensor() {
    let t = Tensor {
        shape: vec![2, 2],
        data: vec![0.5, 1.0, 1.5, 2.0],
        device: "cpu",
        requires_grad: false,
    };
    assert_eq!(classify(&t).kind(), SemanticType::TensorLike);
    assert_eq!(
        format_summary("t", &t, 80),
        "t (Tensor) = [[0.5, 1.0], [1.5, 2.0]] (2, 2) (float32) (cpu) (no-grad)"
    );
}

#[test]
fn test_tensor_with_grad() {
    let t = Tensor {
        shape: vec![3],
        data: vec![1.0, 2.0, 3.0],
        device: "cuda:0",
        requires_grad: true,
    };
    assert_eq!(
        format_summary("w", &t, 80),
        "w (Tensor) = [1.0, 2.0, 3.0] (3,) (float32) (cuda:0) (req-grad)"
    );
}

#[test]
fn test_array_without_placement() {
    let a = NdArray {
        data: vec![1, 2, 3],
        broken: false,
    };
    assert_eq!(classify(&a).kind(), SemanticType::NumericArray);
    assert_eq!(
        format_summary("a", &a, 60),
        "a (ndarray) = [1, 2, 3] (3,) (int64)"
    );
}

#[test]
fn test_malformed_array_degrades_to_text() {
    let a = NdArray {
        data: vec![1, 2, 3],
        broken: true,
    };
    assert!(matches!(
        a.to_host(),
        Err(GlimpseError::ShapeMismatch {
            expected: 4,
            actual: 3,
            ..
        })
    ));
    assert_eq!(
        format_summary("b", &a, 60),
        "b (ndarray) = <Broken> (3,) (int64)"
    );
}

#[test]
fn test_frame() {
    let df = Frame {
        columns: vec!["a", "b"],
        rows: vec![vec![1.0, 2.0], vec![3.0, 4.0]],
    };
    assert_eq!(classify(&df).kind(), SemanticType::TabularFrame);
    assert_eq!(
        format_summary("df", &df, 80),
        "df (Frame) = [[1.0, 2.0], [3.0, 4.0]] (2 rows, 2 cols)"
    );
}

#[test]
fn test_series() {
    let s = Series(vec![0.25, 0.5]);
    assert_eq!(classify(&s).kind(), SemanticType::TabularSeries);
    assert_eq!(
        format_summary("s", &s, 60),
        "s (Series) = [0.25, 0.5] (2 elts)"
    );
}

#[test]
fn test_module() {
    let m = model(None);
    assert_eq!(classify(&m).kind(), SemanticType::ModuleLike);
    assert_eq!(
        format_summary("model", &m, 100),
        "model (Sequential) = [Linear(in=4, out=3), Linear(in=3, out=2)] (8/23 params)"
    );
}

#[test]
fn test_module_on_device() {
    let m = model(Some("cuda:0"));
    let line = format_summary("model", &m, 120);
    assert!(line.ends_with("(8/23 params) (cuda:0)"), "{line}");
}

/// A model whose layers are plain struct fields.
struct Net {
    fc1: Linear,
    fc2: Linear,
}

impl Inspect for Net {
    fn as_module(&self) -> Option<&dyn IsComposable> {
        Some(self)
    }
}

impl IsComposable for Net {
    fn layer_repr(&self) -> String {
        "Net".to_string()
    }

    fn sublayers(&self) -> Vec<&dyn IsComposable> {
        vec![&self.fc1 as &dyn IsComposable, &self.fc2]
    }

    fn is_sequential(&self) -> bool {
        true
    }
}

struct ReLU;

impl IsComposable for ReLU {
    fn layer_repr(&self) -> String {
        "ReLU()".to_string()
    }

    fn sublayers(&self) -> Vec<&dyn IsComposable> {
        Vec::new()
    }
}

struct Mlp {
    a: ReLU,
    b: ReLU,
}

impl Inspect for Mlp {
    fn as_module(&self) -> Option<&dyn IsComposable> {
        Some(self)
    }
}

impl IsComposable for Mlp {
    fn layer_repr(&self) -> String {
        "Mlp".to_string()
    }

    fn sublayers(&self) -> Vec<&dyn IsComposable> {
        vec![&self.a as &dyn IsComposable, &self.b]
    }

    fn is_sequential(&self) -> bool {
        true
    }
}

#[test]
fn test_module_with_field_layers() {
    let net = Net {
        fc1: Linear {
            inputs: 4,
            outputs: 3,
            frozen: false,
        },
        fc2: Linear {
            inputs: 3,
            outputs: 2,
            frozen: false,
        },
    };
    assert_eq!(
        format_summary("net", &net, 100),
        "net (Net) = [Linear(in=4, out=3), Linear(in=3, out=2)] (23/23 params)"
    );
}

#[test]
fn test_module_with_unit_layers() {
    let mlp = Mlp { a: ReLU, b: ReLU };
    assert_eq!(render(&mlp, 80), "[ReLU(), ReLU()]");
}
