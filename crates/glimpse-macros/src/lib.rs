//! Derive macro for glimpse.
//!
//! - [`Inspect`] - Implement `glimpse::Inspect` and `glimpse::HasLabeledFields`
//!   for a struct, so it is summarized as a record.
//!
//! The generated code names the runtime crate as `::glimpse`, so use the macro
//! through `glimpse::Inspect` (re-exported with the default `derive` feature).

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod inspect;

/// Derives `Inspect` for a struct, exposing its fields as a record.
///
/// Fields are listed in declaration order. Tuple struct fields are named
/// `0`, `1`, ... Every listed field type must implement `Inspect`; generic
/// type parameters get an `Inspect` bound.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Leave the field out of the summary |
/// | `rename = "..."` | Display the field under another name |
///
/// # Container Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `name = "..."` | Type label (default: the struct name) |
///
/// # Example
///
/// ```ignore
/// use glimpse::{format_summary, Inspect};
///
/// #[derive(Inspect)]
/// #[inspect(name = "Run")]
/// struct TrainingRun {
///     epoch: u32,
///     #[inspect(rename = "lr")]
///     learning_rate: f64,
///     #[inspect(skip)]
///     checkpoint: Vec<u8>,
/// }
///
/// let run = TrainingRun { epoch: 3, learning_rate: 0.01, checkpoint: vec![] };
/// assert_eq!(
///     format_summary("run", &run, 60),
///     "run (Run) = epoch=3 (int), lr=0.01 (float)"
/// );
/// ```
#[proc_macro_derive(Inspect, attributes(inspect))]
pub fn inspect_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    inspect::inspect_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
