//! Breakpoint storage and hit evaluation for a line-hook driven debugger
//! attached to an interpreted VM.
//!
//! The protocol layer feeds breakpoint updates into a [`SourceRegistry`];
//! the VM's line hook resolves its frame once through
//! [`SourceRegistry::resolve_for_frame`] and then asks
//! [`SourceRegistry::evaluate_hit`] on every line, which is O(1) for
//! lines without breakpoints. Expression evaluation, path normalization
//! and console output stay behind traits.

mod breakpoint;
mod error;
mod eval;
mod frame;
mod line_table;
mod output;
mod path;
mod registry;
mod source;

pub use breakpoint::{Breakpoint, BreakpointInfo};
pub use error::EvalError;
pub use eval::{render_log, FrameEval, Truth};
pub use frame::{FrameInfo, RawSource};
pub use line_table::LineTable;
pub use output::{OutputSink, OutputStream};
pub use path::PathConverter;
pub use registry::{Binding, SourceRegistry};
pub use source::{SourceKey, SourceTable};
