//! Budgeted recursive rendering.
//!
//! [`render`] turns a value into plain text no wider than a column budget.
//! Containers hand each element a strictly smaller budget, so recursion
//! always bottoms out, and once the budget is spent the remaining elements are
//! replaced by an ellipsis without being visited.
//!
//! | Category | Form | When too wide |
//! |----------|------|---------------|
//! | scalar, callable, other | `42`, `area`, fallback text | head + `...` + last 5 |
//! | text | `"abc"` | head + `...` + last 3, still quoted |
//! | sequence, range | `[1, 2]` | cut + `...]` |
//! | set, tuple | `{1, 2}`, `(1, 2)` | cut + `...}`, `...)` |
//! | mapping | `{k: v}` | cut + `...}` |
//! | record | `a=1 (int), b=2 (int)` | cut + `...` |
//! | array, tensor, frame, series | nested lists | as sequences |
//! | module | `[Linear(..), ReLU()]` | as sequences |

use std::borrow::Cow;

use crate::classify::{probe, tag_of, Probe};
use crate::error::Result;
use crate::inspect::{
    flatten_layers, Container, Entries, HasLabeledFields, HostArray, Identity, Inspect,
    IsCallable, IsComposable, Item, Items, Primitive, SeqKind,
};
use crate::util::{display_width, dots, elide, fit_or_dots, take_head, ELLIPSIS};

/// Columns kept from the end of a truncated scalar.
const SCALAR_TAIL: usize = 5;
/// Columns kept from the end of a truncated string.
const TEXT_TAIL: usize = 3;

const CYCLIC: &str = "<cyclic>";

/// Renders `value` in at most `budget` display columns.
///
/// ```rust
/// use glimpse::render;
///
/// assert_eq!(render(&vec![1, 2, 3], 20), "[1, 2, 3]");
/// assert_eq!(render(&(1..100).collect::<Vec<i32>>(), 20), "[1, 2, 3, 4, 5, ...]");
/// assert_eq!(render(&"hello", 20), "\"hello\"");
/// ```
pub fn render(value: &dyn Inspect, budget: usize) -> String {
    Renderer::new().render(value, budget)
}

/// Recursive renderer state: the containers currently being rendered.
#[derive(Debug, Default)]
pub struct Renderer {
    ancestors: Vec<Identity>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, value: &dyn Inspect, budget: usize) -> String {
        match probe(value) {
            Probe::Primitive(p) => render_primitive(&p, budget),
            Probe::Container(c) => self.guarded(value, budget, |r| r.render_container(c, budget)),
            Probe::Record(record) => {
                self.guarded(value, budget, |r| r.render_record(record, budget))
            }
            Probe::Frame(frame) => self.render_host(value, frame.values(), budget),
            Probe::Series(series) => self.render_host(value, series.values(), budget),
            Probe::Callable(callable) => render_callable(callable, budget),
            Probe::Tensor(array, _) | Probe::Array(array) => {
                self.render_host(value, array.to_host(), budget)
            }
            Probe::Module(module) => {
                self.guarded(value, budget, |r| r.render_module(module, budget))
            }
            Probe::Other => elide(&value.fallback_text(), budget, SCALAR_TAIL),
        }
    }

    fn guarded(
        &mut self,
        value: &dyn Inspect,
        budget: usize,
        f: impl FnOnce(&mut Self) -> String,
    ) -> String {
        let id = value.identity();
        if self.ancestors.contains(&id) {
            return fit_or_dots(CYCLIC, budget);
        }
        self.ancestors.push(id);
        let out = f(self);
        self.ancestors.pop();
        out
    }

    fn render_container(&mut self, container: Container<'_>, budget: usize) -> String {
        match container {
            Container::Sequence { kind, len, items } => {
                let body = self.render_items(items, len, budget);
                match kind {
                    SeqKind::Set => rewrap(body, '{', '}'),
                    SeqKind::Tuple => rewrap(body, '(', ')'),
                    SeqKind::List | SeqKind::Range => body,
                }
            }
            Container::Mapping { len, entries } => self.render_entries(entries, len, budget),
        }
    }

    /// `[e0, e1, ...]`: every element but the last keeps 6 columns in reserve
    /// for `, ...]`, the last keeps 1 for `]`. An element with no room left
    /// cuts the sequence, so a non-empty one never reads as `[]`.
    fn render_items(&mut self, items: Items<'_>, len: usize, budget: usize) -> String {
        if len == 0 {
            return fit_or_dots("[]", budget);
        }

        let mut out = String::from("[");
        let mut used = 1;
        for (i, item) in items.enumerate() {
            let last = i + 1 == len;
            let reserve = if last { 1 } else { 6 };
            let piece = self.render(&*item, budget.saturating_sub(used + reserve));
            if piece.is_empty() {
                return truncated(&out, budget, ']');
            }
            used += display_width(&piece);
            out.push_str(&piece);
            if last {
                break;
            }
            out.push_str(", ");
            used += 2;
            if used >= budget.saturating_sub(4) {
                return truncated(&out, budget, ']');
            }
        }

        if out.ends_with(", ") {
            out.truncate(out.len() - 2);
        }
        out.push(']');
        clamp(out, budget)
    }

    /// `{k: v, ...}`. Keys get half of what is left after the brackets; unlike
    /// sequences the last pair keeps the full 6-column reserve.
    fn render_entries(&mut self, entries: Entries<'_>, len: usize, budget: usize) -> String {
        if len == 0 {
            return fit_or_dots("{}", budget);
        }

        let key_budget = budget.saturating_sub(8) / 2;
        let mut out = String::from("{");
        let mut used = 1;
        for (key, value) in entries {
            let key = self.render(&*key, key_budget);
            if key.is_empty() {
                return truncated(&out, budget, '}');
            }
            used += display_width(&key) + 2;
            out.push_str(&key);
            out.push_str(": ");

            let value = self.render(&*value, budget.saturating_sub(used + 6));
            if value.is_empty() {
                return truncated(&out, budget, '}');
            }
            used += display_width(&value) + 2;
            out.push_str(&value);
            out.push_str(", ");

            if used >= budget.saturating_sub(4) {
                return truncated(&out, budget, '}');
            }
        }

        if out.ends_with(", ") {
            out.truncate(out.len() - 2);
        }
        out.push('}');
        clamp(out, budget)
    }

    /// `a=1, b=[1, 2]` in a first pass, then ` (type)` after each field for
    /// as long as the annotations fit.
    fn render_record(&mut self, record: &dyn HasLabeledFields, budget: usize) -> String {
        let fields = record.fields();
        if fields.is_empty() {
            return fit_or_dots("()", budget);
        }

        let count = fields.len();
        let mut parts: Vec<(String, &Item<'_>)> = Vec::with_capacity(count);
        let mut used = 0;
        let mut complete = true;

        for (i, field) in fields.iter().enumerate() {
            let last = i + 1 == count;
            let separator = if i == 0 { 0 } else { 2 };
            let prefix = format!("{}=", field.name);
            let reserve = if last { 1 } else { 6 };
            let avail = budget.saturating_sub(used + separator + display_width(&prefix) + reserve);
            let rendered = self.render(&*field.value, avail);
            if rendered.is_empty() {
                complete = false;
                break;
            }
            let part = format!("{prefix}{rendered}");
            used += separator + display_width(&part);
            parts.push((part, &field.value));

            if !last && used >= budget.saturating_sub(3) {
                complete = false;
                break;
            }
        }

        let limit = if complete {
            budget
        } else {
            budget.saturating_sub(3)
        };
        for (part, value) in parts.iter_mut() {
            let note = format!(" ({})", tag_of(&***value).name);
            let width = display_width(&note);
            if used + width > limit {
                break;
            }
            used += width;
            part.push_str(&note);
        }

        let mut line = parts
            .into_iter()
            .map(|(part, _)| part)
            .collect::<Vec<_>>()
            .join(", ");
        if complete && display_width(&line) <= budget {
            return line;
        }
        if !complete && !line.is_empty() {
            line.push_str(", ");
        }
        if budget < ELLIPSIS.len() {
            return dots(budget);
        }
        format!("{}{}", take_head(&line, budget - ELLIPSIS.len()), ELLIPSIS)
    }

    fn render_module(&mut self, module: &dyn IsComposable, budget: usize) -> String {
        let layers = flatten_layers(module);
        let len = layers.len();
        let items = layers
            .into_iter()
            .map(|layer| Item::owned(LayerLine(layer.layer_repr())));
        self.render_items(Box::new(items), len, budget)
    }

    fn render_host(
        &mut self,
        value: &dyn Inspect,
        values: Result<HostArray>,
        budget: usize,
    ) -> String {
        match values {
            Ok(host) => self.render(&host.view(), budget),
            Err(err) => {
                tracing::debug!(
                    error = %err,
                    type_name = %value.type_name(),
                    "array values unavailable, rendering generic text"
                );
                elide(&value.fallback_text(), budget, SCALAR_TAIL)
            }
        }
    }
}

/// `area(w, h)` when the signature fits, otherwise just the name.
fn render_callable(callable: &dyn IsCallable, budget: usize) -> String {
    let name = callable.callable_name();
    if let Some(signature) = callable.signature() {
        let full = format!("{name}{signature}");
        if display_width(&full) <= budget {
            return full;
        }
    }
    elide(&name, budget, SCALAR_TAIL)
}

fn render_primitive(p: &Primitive<'_>, budget: usize) -> String {
    match p {
        Primitive::Null => fit_or_dots("None", budget),
        Primitive::Scalar(s) => elide(&s.to_string(), budget, SCALAR_TAIL),
        Primitive::Text(s) => render_text(s, budget),
    }
}

fn render_text(s: &str, budget: usize) -> String {
    let s = escape_controls(s);
    if display_width(&s) + 2 <= budget {
        return format!("\"{s}\"");
    }
    if budget < 2 {
        return dots(budget);
    }
    format!("\"{}\"", elide(&s, budget - 2, TEXT_TAIL))
}

/// Keeps the summary on one line.
fn escape_controls(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.extend(c.escape_default()),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Swaps the outer `[` `]` of a rendered sequence for other brackets.
fn rewrap(s: String, open: char, close: char) -> String {
    match s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        Some(inner) => format!("{open}{inner}{close}"),
        None => s,
    }
}

/// Cuts a partially rendered container to `budget - 4` columns and closes it
/// with `...` and `close`.
fn truncated(out: &str, budget: usize, close: char) -> String {
    let cut = take_head(out, budget.saturating_sub(4));
    clamp(format!("{cut}{ELLIPSIS}{close}"), budget)
}

fn clamp(s: String, budget: usize) -> String {
    if display_width(&s) > budget {
        dots(budget)
    } else {
        s
    }
}

/// One entry of a module listing.
struct LayerLine(String);

impl Inspect for LayerLine {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("layer")
    }

    fn fallback_text(&self) -> String {
        self.0.clone()
    }
}
