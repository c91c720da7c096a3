//! Python Wrapper Generator for arbor Operations
//!
//! Given an operation registry and its API customizations, this crate emits
//! one Python source document of callable wrapper functions. Each wrapper
//! dispatches to the eager fast path when immediate execution is active,
//! falls back to the deferred graph-building path otherwise, and is paired
//! with a standalone `*_eager_fallback` function usable when the fast path
//! raises a recoverable error.
//!
//! # Architecture
//!
//! ```text
//! OpRegistry + ApiMap
//!        ↓
//!   classify   (which attributes are inferred from inputs)
//!        ↓
//!   params     (ordered parameter plan, two renderings)
//!        ↓
//!   emitter    (fast path / deferred path / fallback / raw export)
//!        ↓
//!   driver     (visibility filtering, document assembly)
//! ```
//!
//! Generation is a pure function of its inputs: no I/O, no global state,
//! byte-identical output across runs.

mod annotations;
mod buffer;
mod classify;
mod driver;
mod emitter;
mod flatten;
mod literals;
mod names;
mod params;
mod wrap;

pub use buffer::SourceBuffer;
pub use classify::InferenceMap;
pub use driver::generate_python_ops;
pub use emitter::OpEmitter;
pub use flatten::{flatten_inputs, unflatten, FlattenedInputs};
pub use names::{avoid_reserved, is_python_reserved, lower_case_op_name};
pub use params::{Param, ParameterPlan};
pub use wrap::{word_wrap, RIGHT_MARGIN};

/// A per-operation emission failure.
///
/// The only recoverable case: an attribute whose kind this generator does
/// not support. The driver substitutes a diagnostic comment for the
/// operation and continues with the rest of the registry.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EmitError {
    #[error("op '{op}' has attr '{attr}' of unsupported kind '{kind}'")]
    UnsupportedAttrKind {
        op: String,
        attr: String,
        kind: String,
    },
}
