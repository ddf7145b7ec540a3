//! Summary line composition: `name (label) = rendered (metadata)`.

use crate::classify::{classify, probe, Probe};
use crate::inspect::{count_parameters, Inspect, Primitive};
use crate::palette::{Palette, Role};
use crate::render::render;
use crate::util::display_width;

/// Columns around the name and label: ` (`, `) = `.
const FRAME_OVERHEAD: usize = 6;

/// A metadata fragment appended after the rendered value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Suffix {
    pub(crate) text: String,
    pub(crate) role: Role,
}

impl Suffix {
    fn new(role: Role, text: String) -> Self {
        Suffix {
            text: format!(" ({text})"),
            role,
        }
    }
}

fn shape_text(shape: &[usize]) -> String {
    match shape {
        [single] => format!("{single},"),
        dims => dims
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Metadata suffixes for a value, in display order.
pub(crate) fn metadata(value: &dyn Inspect) -> Vec<Suffix> {
    match probe(value) {
        Probe::Primitive(Primitive::Text(s)) => {
            vec![Suffix::new(Role::Count, format!("{} chars", s.chars().count()))]
        }
        Probe::Container(c) => vec![Suffix::new(Role::Count, format!("{} elts", c.len()))],
        Probe::Frame(frame) => vec![Suffix::new(
            Role::Count,
            format!(
                "{} rows, {} cols",
                frame.row_count(),
                frame.column_labels().len()
            ),
        )],
        Probe::Series(series) => vec![Suffix::new(
            Role::Count,
            format!("{} elts", series.element_count()),
        )],
        Probe::Tensor(array, placement) => {
            let grad = if placement.requires_grad {
                Role::Grad
            } else {
                Role::NoGrad
            };
            vec![
                Suffix::new(Role::Count, shape_text(&array.shape())),
                Suffix::new(Role::Label, array.dtype().into_owned()),
                Suffix::new(Role::Device, placement.device.into_owned()),
                Suffix::new(grad, "req-grad".to_string()),
            ]
        }
        Probe::Array(array) => vec![
            Suffix::new(Role::Count, shape_text(&array.shape())),
            Suffix::new(Role::Label, array.dtype().into_owned()),
        ],
        Probe::Module(module) => {
            let params = count_parameters(module);
            let mut suffixes = vec![Suffix::new(
                Role::Count,
                format!("{}/{} params", params.trainable, params.total),
            )];
            if let Some(device) = module.device() {
                suffixes.push(Suffix::new(Role::Device, device.into_owned()));
            }
            suffixes
        }
        _ => Vec::new(),
    }
}

fn header(name: &str, label: &str, palette: &Palette) -> String {
    let label = palette.paint(Role::Label, &format!("({label})"));
    if name.is_empty() {
        format!("{label} = ")
    } else {
        format!("{name} {label} = ")
    }
}

/// Composes one summary line no wider than `max_length`, styled with
/// `palette`.
///
/// The value gets whatever is left after the name, the label, the fixed
/// punctuation and the metadata suffixes.
pub fn compose(name: &str, value: &dyn Inspect, max_length: usize, palette: &Palette) -> String {
    let label = classify(value).label();
    let suffixes = metadata(value);
    let reserved: usize = suffixes.iter().map(|s| display_width(&s.text)).sum();
    let available =
        max_length.saturating_sub(display_width(name) + display_width(&label) + FRAME_OVERHEAD);

    let mut line = header(name, &label, palette);
    line.push_str(&render(value, available.saturating_sub(reserved)));
    for suffix in &suffixes {
        line.push_str(&palette.paint(suffix.role, &suffix.text));
    }
    line
}

/// Composes a summary without truncation or metadata.
pub fn compose_raw(name: &str, value: &dyn Inspect, palette: &Palette) -> String {
    let label = classify(value).label();
    let mut line = header(name, &label, palette);
    line.push_str(&render(value, usize::MAX));
    line
}

/// Plain (unstyled) summary line.
///
/// ```rust
/// use glimpse::format_summary;
///
/// assert_eq!(format_summary("x", &vec![1, 2, 3], 50), "x (list: int) = [1, 2, 3] (3 elts)");
/// assert_eq!(format_summary("n", &42, 50), "n (int) = 42");
/// assert_eq!(format_summary("", &"hi", 50), "(str) = \"hi\" (2 chars)");
/// ```
pub fn format_summary(name: &str, value: &dyn Inspect, max_length: usize) -> String {
    compose(name, value, max_length, &Palette::plain())
}
