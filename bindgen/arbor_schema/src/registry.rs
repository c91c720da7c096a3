//! Operation registry and customization map.

use rustc_hash::FxHashMap;

use crate::api::ApiCustomization;
use crate::op::OpSchema;

/// An ordered collection of operation schemas.
///
/// Generation processes operations strictly in registry order, so the
/// backing store is a vector, never a map.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpRegistry {
    ops: Vec<OpSchema>,
}

impl OpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, op: OpSchema) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[OpSchema] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl FromIterator<OpSchema> for OpRegistry {
    fn from_iter<T: IntoIterator<Item = OpSchema>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

/// Customizations keyed by operation name.
///
/// Lookup for an operation without a customization yields the shared
/// default-constructed customization (identity renames, visible tier).
#[derive(Clone, Debug, Default)]
pub struct ApiMap {
    map: FxHashMap<String, ApiCustomization>,
    identity: ApiCustomization,
}

impl ApiMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, op_name: impl Into<String>, api: ApiCustomization) {
        self.map.insert(op_name.into(), api);
    }

    pub fn get(&self, op_name: &str) -> &ApiCustomization {
        self.map.get(op_name).unwrap_or(&self.identity)
    }
}
