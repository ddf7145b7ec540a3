use std::borrow::Cow;

use serde_json::Value;

use super::{Container, Inspect, Item, Primitive, Scalar, SeqKind};

impl Inspect for Value {
    fn primitive(&self) -> Option<Primitive<'_>> {
        match self {
            Value::Null => Some(Primitive::Null),
            Value::Bool(b) => Some(Primitive::Scalar(Scalar::Bool(*b))),
            Value::Number(n) => {
                let scalar = if let Some(i) = n.as_i64() {
                    Scalar::from(i)
                } else if let Some(u) = n.as_u64() {
                    Scalar::from(u)
                } else {
                    Scalar::from(n.as_f64().unwrap_or(f64::NAN))
                };
                Some(Primitive::Scalar(scalar))
            }
            Value::String(s) => Some(Primitive::Text(Cow::Borrowed(s))),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn container(&self) -> Option<Container<'_>> {
        match self {
            Value::Array(items) => Some(Container::sequence(
                SeqKind::List,
                items.len(),
                items.iter().map(Item::from_ref),
            )),
            Value::Object(map) => Some(Container::mapping(
                map.len(),
                map.iter()
                    .map(|(k, v)| (Item::from_ref(k), Item::from_ref(v))),
            )),
            _ => None,
        }
    }
}
