//! Type classification.
//!
//! [`classify`] maps a value to exactly one [`SemanticType`] by asking the
//! [`Inspect`] probes in a fixed priority order. The same ordering drives the
//! renderer and the metadata suffixes.

use std::fmt;

use crate::inspect::{
    Container, HasLabeledFields, HasShape, Inspect, IsCallable, IsComposable, Placement,
    Primitive, Scalar, SeqKind, TabularFrame, TabularSeries,
};

/// The closed set of semantic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Integer,
    Float,
    Boolean,
    Text,
    Null,
    Sequence,
    Mapping,
    SetLike,
    Range,
    Function,
    Record,
    NumericArray,
    TensorLike,
    TabularFrame,
    TabularSeries,
    ModuleLike,
    Other,
}

impl SemanticType {
    /// Whether the label of this type names its first element.
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            SemanticType::Sequence
                | SemanticType::Mapping
                | SemanticType::SetLike
                | SemanticType::Range
        )
    }
}

/// A semantic type together with its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTag {
    pub kind: SemanticType,
    pub name: String,
}

impl TypeTag {
    fn new(kind: SemanticType, name: impl Into<String>) -> Self {
        TypeTag {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// What a collection holds, judged from its first element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementSummary {
    Empty,
    Item(TypeTag),
    Pair(TypeTag, TypeTag),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub tag: TypeTag,
    /// Present for sequences, sets, ranges and mappings.
    pub element: Option<ElementSummary>,
}

impl Classification {
    pub fn kind(&self) -> SemanticType {
        self.tag.kind
    }

    /// Display label: `int`, `list: int`, `dict: str -> int`, `set: empty`.
    pub fn label(&self) -> String {
        match &self.element {
            None => self.tag.name.clone(),
            Some(ElementSummary::Empty) => format!("{}: empty", self.tag),
            Some(ElementSummary::Item(item)) => format!("{}: {}", self.tag, item),
            Some(ElementSummary::Pair(key, value)) => {
                format!("{}: {} -> {}", self.tag, key, value)
            }
        }
    }
}

/// The capability a value answered with, in priority order.
pub(crate) enum Probe<'a> {
    Primitive(Primitive<'a>),
    Container(Container<'a>),
    Record(&'a dyn HasLabeledFields),
    Frame(&'a dyn TabularFrame),
    Series(&'a dyn TabularSeries),
    Callable(&'a dyn IsCallable),
    Tensor(&'a dyn HasShape, Placement<'a>),
    Array(&'a dyn HasShape),
    Module(&'a dyn IsComposable),
    Other,
}

pub(crate) fn probe<'a>(value: &'a dyn Inspect) -> Probe<'a> {
    if let Some(p) = value.primitive() {
        return Probe::Primitive(p);
    }
    if let Some(c) = value.container() {
        return Probe::Container(c);
    }
    if let Some(r) = value.as_record() {
        return Probe::Record(r);
    }
    if let Some(f) = value.as_frame() {
        return Probe::Frame(f);
    }
    if let Some(s) = value.as_series() {
        return Probe::Series(s);
    }
    if let Some(c) = value.as_callable() {
        return Probe::Callable(c);
    }
    if let Some(a) = value.as_array() {
        return match a.placement() {
            Some(placement) => Probe::Tensor(a, placement),
            None => Probe::Array(a),
        };
    }
    if let Some(m) = value.as_module() {
        return Probe::Module(m);
    }
    Probe::Other
}

fn primitive_tag(p: &Primitive<'_>) -> TypeTag {
    match p {
        Primitive::Scalar(Scalar::Bool(_)) => TypeTag::new(SemanticType::Boolean, "bool"),
        Primitive::Scalar(Scalar::Int(_) | Scalar::UInt(_)) => {
            TypeTag::new(SemanticType::Integer, "int")
        }
        Primitive::Scalar(Scalar::F32(_) | Scalar::F64(_)) => {
            TypeTag::new(SemanticType::Float, "float")
        }
        Primitive::Null => TypeTag::new(SemanticType::Null, "None"),
        Primitive::Text(_) => TypeTag::new(SemanticType::Text, "str"),
    }
}

fn container_tag(c: &Container<'_>) -> TypeTag {
    match c {
        Container::Sequence { kind, .. } => match kind {
            SeqKind::List => TypeTag::new(SemanticType::Sequence, "list"),
            SeqKind::Tuple => TypeTag::new(SemanticType::Sequence, "tuple"),
            SeqKind::Set => TypeTag::new(SemanticType::SetLike, "set"),
            SeqKind::Range => TypeTag::new(SemanticType::Range, "range"),
        },
        Container::Mapping { .. } => TypeTag::new(SemanticType::Mapping, "dict"),
    }
}

/// The tag of a single value, without looking inside it.
pub fn tag_of(value: &dyn Inspect) -> TypeTag {
    let named = |kind| TypeTag::new(kind, value.type_name());
    match probe(value) {
        Probe::Primitive(p) => primitive_tag(&p),
        Probe::Container(c) => container_tag(&c),
        Probe::Record(_) => named(SemanticType::Record),
        Probe::Frame(_) => named(SemanticType::TabularFrame),
        Probe::Series(_) => named(SemanticType::TabularSeries),
        Probe::Callable(_) => TypeTag::new(SemanticType::Function, "function"),
        Probe::Tensor(..) => TypeTag::new(SemanticType::TensorLike, "Tensor"),
        Probe::Array(_) => TypeTag::new(SemanticType::NumericArray, "ndarray"),
        Probe::Module(_) => named(SemanticType::ModuleLike),
        Probe::Other => named(SemanticType::Other),
    }
}

/// Classifies a value, including the element type of collections.
///
/// ```rust
/// use glimpse::{classify, SemanticType};
/// use std::collections::BTreeMap;
///
/// let c = classify(&vec![1, 2, 3]);
/// assert_eq!(c.kind(), SemanticType::Sequence);
/// assert_eq!(c.label(), "list: int");
///
/// let m = BTreeMap::from([("a", 1.5)]);
/// assert_eq!(classify(&m).label(), "dict: str -> float");
///
/// assert_eq!(classify(&Vec::<i32>::new()).label(), "list: empty");
/// ```
pub fn classify(value: &dyn Inspect) -> Classification {
    match probe(value) {
        Probe::Container(c) => Classification {
            tag: container_tag(&c),
            element: Some(first_element(c)),
        },
        _ => Classification {
            tag: tag_of(value),
            element: None,
        },
    }
}

fn first_element(container: Container<'_>) -> ElementSummary {
    match container {
        Container::Sequence { mut items, .. } => match items.next() {
            Some(item) => ElementSummary::Item(tag_of(&*item)),
            None => ElementSummary::Empty,
        },
        Container::Mapping { mut entries, .. } => match entries.next() {
            Some((key, value)) => ElementSummary::Pair(tag_of(&*key), tag_of(&*value)),
            None => ElementSummary::Empty,
        },
    }
}
