//! Operation Schema Data Model
//!
//! Plain data types describing arbor operations: typed input/output slots,
//! statically-known attributes, and the per-operation API customizations
//! applied on top of the registry. The binding generator (`arbor_pygen`)
//! consumes these types; nothing in this crate performs I/O or emission.
//!
//! # Architecture
//!
//! ```text
//! OpRegistry (ordered OpSchema)  +  ApiMap (name-keyed ApiCustomization)
//!        ↓
//!   arbor_pygen::generate_python_ops
//! ```

mod api;
mod attr;
mod dtype;
mod op;
mod registry;

pub use api::{ApiCustomization, Visibility};
pub use attr::{AttrKind, AttrSchema, AttrValue, TensorLiteral};
pub use dtype::ElementType;
pub use op::{ArgSlot, OpSchema, SlotType};
pub use registry::{ApiMap, OpRegistry};
