//! Attribute classification.
//!
//! Walks an operation's inputs and determines which attributes are
//! inferred (their value is derivable from the arity or element types of
//! one or more inputs) versus explicit (must appear in the generated
//! signature). Built fresh per operation, never persisted.

use arbor_schema::{ApiCustomization, ArgSlot};
use rustc_hash::FxHashMap;

/// Bidirectional map between inferred attributes and the inputs that
/// reference them.
///
/// Keys are attribute schema names. Indices are positions in the resolved
/// (API-ordered) input list. The representative is the rendered name of
/// the first referencing input, used in emitted error messages.
#[derive(Debug, Default)]
pub struct InferenceMap {
    attr_to_args: FxHashMap<String, Vec<usize>>,
    representative: FxHashMap<String, String>,
}

impl InferenceMap {
    /// Classify the attributes referenced by `inputs` (in API order).
    ///
    /// An input referencing a type attribute or a list-of-types attribute
    /// registers that attribute; an input with a list-length attribute
    /// registers that as well. Attributes absent from the result are
    /// explicit.
    pub fn build(inputs: &[&ArgSlot], api: &ApiCustomization) -> Self {
        let mut map = Self::default();
        for (index, input) in inputs.iter().enumerate() {
            if let Some(attr) = input.type_attr() {
                map.add(attr, index, api.arg_name(&input.name));
            } else if let Some(attr) = input.type_list_attr() {
                map.add(attr, index, api.arg_name(&input.name));
            }
            if let Some(attr) = &input.number_attr {
                map.add(attr, index, api.arg_name(&input.name));
            }
        }
        map
    }

    fn add(&mut self, attr: &str, arg_index: usize, arg_rendered: &str) {
        self.representative
            .entry(attr.to_string())
            .or_insert_with(|| arg_rendered.to_string());
        self.attr_to_args
            .entry(attr.to_string())
            .or_default()
            .push(arg_index);
    }

    /// Whether the named attribute is inferred.
    pub fn is_inferred(&self, attr: &str) -> bool {
        self.attr_to_args.contains_key(attr)
    }

    /// Input indices the named attribute is inferred from, in input order.
    pub fn args_for(&self, attr: &str) -> Option<&[usize]> {
        self.attr_to_args.get(attr).map(Vec::as_slice)
    }

    /// Rendered name of the representative input for error messages.
    pub fn representative(&self, attr: &str) -> Option<&str> {
        self.representative.get(attr).map(String::as_str)
    }
}
