//! The standalone eager-fallback function.
//!
//! Usable without the fast-path context: performs its own attribute
//! inference, coerces inputs to eager tensors, and calls the runtime
//! execute primitive directly. Built with the non-defaulted parameter
//! rendering since it is never called with defaults omitted.

use arbor_schema::{AttrKind, SlotType};

use crate::flatten::{flatten_inputs, unflatten, vector_to_tuple};
use crate::literals::{attr_value_to_python, dtype_expr};
use crate::names::attr_var_name;

use super::{OpEmitter, EAGER_FALLBACK_SUFFIX};

impl OpEmitter<'_> {
    pub(super) fn add_eager_fallback_code(&mut self) -> Result<(), crate::EmitError> {
        let params = self.plan.render_required(&self.annotations);
        let def_name = format!("{}{}", self.function_name, EAGER_FALLBACK_SUFFIX);
        self.add_def_line(&def_name, &format!("{params}, ctx"));

        if let Some(error) = self.eager_not_allowed.clone() {
            self.result.push(&format!("  {error}"));
            return Ok(());
        }

        let function_setup = self.eager_function_setup("  ")?;
        self.result.push(&function_setup);

        self.add_eager_inferred_attrs("  ");
        self.add_eager_input_casts("  ");
        let flat = flatten_inputs(&self.inputs, &self.input_renames, None, &self.attr_exprs);
        self.result.line(&format!("  _inputs_flat = {}", flat.expr));
        self.add_eager_attrs("  ");
        self.add_eager_execute("  ");
        self.add_eager_function_teardown("  ", true);
        Ok(())
    }

    /// Compute values for inferred type attributes and convert the
    /// referencing inputs to eager tensors in the same step.
    fn add_eager_inferred_attrs(&mut self, indentation: &str) {
        for attr in &self.op.attrs {
            let Some(arg_indices) = self.inference.args_for(&attr.name) else {
                continue;
            };
            match attr.kind {
                AttrKind::Type => {
                    let flat = flatten_inputs(
                        &self.inputs,
                        &self.input_renames,
                        Some(arg_indices),
                        &self.attr_exprs,
                    );
                    let mut conversion =
                        format!("_execute.args_to_matching_eager({}, ctx", flat.expr);
                    conversion.push_str(", [");
                    for dtype in &attr.allowed_types {
                        conversion.push_str(&format!("{}, ", dtype_expr(*dtype)));
                    }
                    conversion.push(']');
                    if let Some(default) = self.api.attr_default(&attr.name, attr.default.as_ref())
                    {
                        conversion.push_str(&format!(", {}", attr_value_to_python(default)));
                    }
                    conversion.push(')');

                    let var_name = attr_var_name(&attr.name);
                    if flat.sizes.len() == 1 {
                        // One referencing input: assign it back directly.
                        let inputs_var = &self.input_renames[arg_indices[0]];
                        if flat.sizes[0].is_empty() {
                            self.result.line(&format!(
                                "{indentation}{var_name}, ({inputs_var},) = {conversion}"
                            ));
                        } else {
                            self.result.line(&format!(
                                "{indentation}{var_name}, {inputs_var} = {conversion}"
                            ));
                        }
                    } else {
                        let inputs_var = format!("_inputs_{}", attr.name);
                        self.result.line(&format!(
                            "{indentation}{var_name}, {inputs_var} = {conversion}"
                        ));
                        unflatten(indentation, &flat.sizes, &inputs_var, &mut self.result);
                        let names: Vec<String> = arg_indices
                            .iter()
                            .map(|&index| self.input_renames[index].clone())
                            .collect();
                        self.result.line(&format!(
                            "{indentation}{} = {inputs_var}",
                            vector_to_tuple(&names)
                        ));
                    }
                }
                AttrKind::TypeList => {
                    // Defaults are ignored for list-of-types attributes.
                    let var_name = attr_var_name(&attr.name);
                    let (inputs_var, conversion) = if arg_indices.len() > 1 {
                        let lists: Vec<String> = arg_indices
                            .iter()
                            .map(|&index| self.input_renames[index].clone())
                            .collect();
                        (
                            vector_to_tuple(&lists),
                            "_execute.args_to_mixed_eager_tensors",
                        )
                    } else {
                        (
                            self.input_renames[arg_indices[0]].clone(),
                            "_execute.convert_to_mixed_eager_tensors",
                        )
                    };
                    self.result.line(&format!(
                        "{indentation}{var_name}, {inputs_var} = {conversion}({inputs_var}, ctx)"
                    ));
                }
                _ => continue,
            }
            self.attr_exprs
                .insert(attr.name.clone(), attr_var_name(&attr.name));
        }
    }

    /// Cast fixed-dtype inputs to eager tensors.
    fn add_eager_input_casts(&mut self, indentation: &str) {
        for (slot, rename) in self.inputs.iter().zip(&self.input_renames) {
            let SlotType::Fixed(dtype) = &slot.slot_type else {
                continue;
            };
            let func = if slot.number_attr.is_some() {
                "convert_n_to_tensor"
            } else {
                "convert_to_tensor"
            };
            self.result.line(&format!(
                "{indentation}{rename} = _ops.{func}({rename}, {})",
                dtype_expr(*dtype)
            ));
        }
    }

    /// The flat attribute name/value tuple passed to execute.
    fn add_eager_attrs(&mut self, indentation: &str) {
        if self.op.attrs.is_empty() {
            self.result.line(&format!("{indentation}_attrs = None"));
            return;
        }
        let mut attr_values = String::new();
        for (i, attr) in self.op.attrs.iter().enumerate() {
            if i > 0 {
                attr_values.push_str(", ");
            }
            let expr = self
                .attr_exprs
                .get(&attr.name)
                .cloned()
                .unwrap_or_else(|| attr_var_name(&attr.name));
            attr_values.push_str(&format!("\"{}\", {expr}", attr.name));
        }
        attr_values.push(')');
        self.result
            .wrapped(indentation, &format!("_attrs = ({attr_values}"));
    }

    fn add_eager_execute(&mut self, indentation: &str) {
        let prefix = format!("{indentation}_result = _execute.execute(");
        let args = format!(
            "b\"{}\", {}, inputs=_inputs_flat, attrs=_attrs, ctx=ctx, name=name)",
            self.op.name, self.num_outputs_expr
        );
        self.result.wrapped(&prefix, &args);
    }

    /// Gradient recording and output reshaping shared by the fallback.
    fn add_eager_function_teardown(&mut self, indentation: &str, record_gradient: bool) {
        if self.num_outs() > 0 {
            if record_gradient {
                self.result
                    .line(&format!("{indentation}if _execute.must_record_gradient():"));
                self.result.push(&format!(
                    "{indentation}  _execute.record_gradient(\n        \
                     \"{}\", _inputs_flat, _attrs, _result)\n",
                    self.op.name
                ));
            }
            if self.num_outs() == 1 && !self.output_sizes[0].is_empty() {
                // Single list result, already shaped.
            } else if self.num_outs() == 1 {
                self.result.line(&format!("{indentation}_result, = _result"));
            } else {
                let sizes = self.output_sizes.clone();
                unflatten(indentation, &sizes, "_result", &mut self.result);
                self.result.line(&format!(
                    "{indentation}_result = {}._make(_result)",
                    self.output_tuple_name()
                ));
            }
        } else {
            self.result.line(&format!("{indentation}_result = None"));
        }
        self.result.push(&format!("{indentation}return _result\n\n"));
    }
}
