//! Split rendered text into units that can be styled or animated independently
//!
//! A [`Schism`] takes an element of a [`BaseDocument`](schism_dom::BaseDocument) and replaces its
//! content with nested wrapper elements at one of three granularities:
//!
//!  - `words`: one unit per space-separated token. The default.
//!  - `chars`: one unit per character, grouped inside one outer boundary per word.
//!  - `lines`: one unit per visual row, inferred from the laid out position of each word.
//!
//! Every unit is an inner `<span data-split="inner">` inside an outer `<span data-split="outer">`.
//! The outer boundary is an `inline-block` that clips its content; the inner boundary carries the
//! configured overflow policy.
//!
//! The host's original content is captured once at construction. Every rebuild starts from that
//! snapshot, so rebuilding is idempotent, and [`Schism::destroy`] puts the original back.
//!
//! Rebuilds after window or container resizes are debounced. Resize notifications arrive over a
//! channel and are processed by [`Schism::poll`], which takes the current time from the caller.
//!
//! ```ignore
//! let mut doc = HtmlDocument::from_html("<p id=title>Hello brave new world</p>", config).into_inner();
//! let title = doc.get_element_by_id("title");
//! let schism = Schism::new(&mut doc, title, SchismOptions::default().with_mutation("lines"));
//! for line in schism.result().lines() {
//!     // style or animate `line`
//! }
//! ```

mod chars;
mod debounce;
mod error;
mod lines;
mod options;
mod probe;
mod result;
mod schism;
mod snapshot;
mod tokenizer;
mod units;

pub use chars::split_chars;
pub use debounce::Debouncer;
pub use error::{ConfigError, ProbeError};
pub use lines::{group_rows, line_threshold, reference_font_size, split_lines};
pub use options::{
    DEFAULT_RESIZE_DEBOUNCE_MS, LINE_THRESHOLD_RATIO, Mutation, Overflow, SchismOptions,
    ValidatedOptions,
};
pub use probe::{GeometryProbe, LayoutProbe, measure};
pub use result::SplitResult;
pub use schism::{LifecycleState, Schism};
pub use snapshot::SourceSnapshot;
pub use tokenizer::tokenize;
pub use units::{INNER_MARKER, OUTER_MARKER, SPLIT_ATTR, UnitTemplates, build_words};
