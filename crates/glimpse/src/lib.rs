//! Glimpse - bounded-width summaries of runtime values.
//!
//! Glimpse turns a value into a single annotated line that fits the terminal:
//!
//! ```text
//! DEBUG: scores (list: int) = [12, 7, 31, 4, 18, 9, 27, ...] (250 elts)
//! ```
//!
//! The line carries the display name, a type label (with the element type for
//! containers), the value rendered under a column budget, and a metadata
//! suffix (length, shape, dtype, device or parameter count).
//!
//! # Quick Start
//!
//! ```rust
//! use glimpse::format_summary;
//!
//! let scores: Vec<i64> = (0..250).collect();
//! assert_eq!(
//!     format_summary("scores", &scores, 60),
//!     "scores (list: int) = [0, 1, 2, 3, 4, 5, 6, ...] (250 elts)"
//! );
//! ```
//!
//! In application code the macros name the value after its expression and
//! print to stdout:
//!
//! ```rust,no_run
//! let scores = vec![3, 1, 4];
//! glimpse::glimpse!(scores);
//! glimpse::glimpse_raw!(scores);
//! glimpse::glimpse_wrapped!(scores, lines = 2, highlighted);
//! ```
//!
//! # Pipeline
//!
//! | Stage | Entry point |
//! |-------|-------------|
//! | classification | [`classify`], [`tag_of`] |
//! | budgeted rendering | [`render`], [`Renderer`] |
//! | line composition | [`compose`], [`format_summary`] |
//! | presentation | [`Inspector`], [`compact_debug`], [`raw_debug`], [`wrapped_debug`] |
//! | log file | [`DebugLog`] |
//!
//! # Making types inspectable
//!
//! Anything implementing [`Inspect`] can be summarized. Std scalars, strings,
//! collections, tuples, ranges and smart pointers are covered, as is
//! `serde_json::Value` with the `json` feature. Record types derive it:
//!
//! ```rust
//! use glimpse::{format_summary, Inspect};
//!
//! #[derive(Inspect)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! assert_eq!(
//!     format_summary("p", &Point { x: 1, y: 2 }, 60),
//!     "p (Point) = x=1 (int), y=2 (int)"
//! );
//! ```
//!
//! Richer shapes (data frames, tensors, layered models) implement one of the
//! capability traits ([`TabularFrame`], [`HasShape`], [`IsComposable`], ...)
//! and return themselves from the matching `Inspect` probe. Foreign types the
//! crate cannot implement `Inspect` for go through the [adapter
//! registry](register_adapter).
//!
//! # Configuration
//!
//! [`Settings`] holds width, margin, prefix, line limit, color and border.
//! [`Settings::from_env`] reads `GLIMPSE_WIDTH`, `GLIMPSE_MAX_LINES`,
//! `GLIMPSE_COLOR` and `NO_COLOR`.

// Lets the derive's `::glimpse::` paths resolve inside this crate's tests.
extern crate self as glimpse;

mod banner;
mod classify;
mod compose;
mod config;
mod error;
mod inspect;
mod modes;
mod name;
mod palette;
mod registry;
mod render;
mod sink;
mod terminal;
mod util;

pub use error::{GlimpseError, Result};

pub use inspect::{
    count_parameters, flatten_layers, ArrayView, Container, Entries, Field, Function,
    HasLabeledFields, HasShape, HostArray, Identity, Inspect, IsCallable, IsComposable, Item,
    Items, Opaque, ParamCount, Parameter, Placement, Primitive, Scalar, SeqKind, TabularFrame,
    TabularSeries,
};

pub use classify::{classify, tag_of, Classification, ElementSummary, SemanticType, TypeTag};
pub use compose::{compose, compose_raw, format_summary};
pub use render::{render, Renderer};

pub use banner::{Banner, BorderStyle};
pub use config::{Settings, ENV_COLOR, ENV_MAX_LINES, ENV_NO_COLOR, ENV_WIDTH};
pub use palette::{ColorChoice, Palette, Role};
pub use terminal::{reset_width_detector, set_width_detector, terminal_width, DEFAULT_WIDTH};

pub use modes::{compact_debug, raw_debug, wrapped_debug, Inspector};
pub use name::{extract_argument, resolve_name, strip_trailing_args};

pub use registry::{
    adapt, compact_debug_any, format_summary_any, has_adapter, register_adapter,
    unregister_adapter, Adapter,
};
pub use sink::{DebugLog, LOG_FILE};

pub use util::{
    chunk_by_width, display_width, elide, short_type_name, strip_styling, take_head, take_tail,
    ELLIPSIS,
};

#[cfg(feature = "derive")]
pub use glimpse_macros::Inspect;
