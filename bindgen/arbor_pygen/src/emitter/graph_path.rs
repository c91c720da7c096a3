//! The deferred graph-building path.
//!
//! Re-runs type-based dispatch for public operations, validates list
//! inputs, invokes the graph-builder primitive, records gradients when the
//! runtime asks for them, and reshapes outputs the same way the eager
//! paths do.

use arbor_schema::AttrKind;

use crate::flatten::unflatten;

use super::OpEmitter;

impl OpEmitter<'_> {
    pub(super) fn handle_graph_mode(&mut self, function_setup: &str) {
        if self.is_visible() {
            self.result.line("  else:");
            self.add_type_based_dispatch("    ");
        }
        self.result.line("  # Add nodes to the arbor graph.");
        self.result.push(function_setup);
        if self.is_visible() {
            self.result.push("  try:\n  ");
        }
        self.result
            .push("  _, _, _op, _outputs = _op_library.apply_op(\n");
        let kwargs = self.plan.body_kwargs();
        self.result
            .wrapped(&format!("        \"{}\", ", self.op.name), &kwargs);
        self.add_fallback_dispatch("  ");

        if self.num_outs() == 0 {
            self.result.line("  return _op");
            return;
        }

        self.result.line("  _result = _outputs[:]");
        if self.has_stateful_list_output() {
            self.result.push("  if not _result:\n    return _op\n");
        }

        self.result.line("  if _execute.must_record_gradient():");
        if self.op.attrs.is_empty() {
            self.result.line("    _attrs = ()");
        } else {
            let mut attr_values = String::new();
            for (i, attr) in self.op.attrs.iter().enumerate() {
                if i > 0 {
                    attr_values.push_str(", ");
                }
                let getter = match attr.kind {
                    AttrKind::Type => "_get_attr_type",
                    AttrKind::Bool => "_get_attr_bool",
                    AttrKind::Int => "_get_attr_int",
                    _ => "get_attr",
                };
                attr_values.push_str(&format!(
                    "\"{name}\", _op.{getter}(\"{name}\")",
                    name = attr.name
                ));
            }
            attr_values.push(')');
            self.result.wrapped("    _attrs = (", &attr_values);
        }
        self.result.line("    _inputs_flat = _op.inputs");
        self.result.push(&format!(
            "    _execute.record_gradient(\n        \"{}\", _inputs_flat, _attrs, _result)\n",
            self.op.name
        ));

        if self.num_outs() == 1 && !self.output_sizes[0].is_empty() {
            // Single list result, already shaped.
        } else if self.num_outs() == 1 {
            self.result.line("  _result, = _result");
        } else {
            let sizes = self.output_sizes.clone();
            unflatten("  ", &sizes, "_result", &mut self.result);
            self.result.line(&format!(
                "  _result = {}._make(_result)",
                self.output_tuple_name()
            ));
        }
        self.result.push("  return _result\n\n");
    }

    /// A stateful operation whose single list-typed output may be
    /// legitimately empty returns the raw operation handle instead of an
    /// empty list. Narrow compatibility exception, not generalized.
    fn has_stateful_list_output(&self) -> bool {
        self.num_outs() == 1
            && self.op.is_stateful
            && (self.op.outputs[0].number_attr.is_some()
                || self.op.outputs[0].type_list_attr().is_some())
    }
}
