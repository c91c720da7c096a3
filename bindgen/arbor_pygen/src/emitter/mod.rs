//! Dual-path emitter.
//!
//! One `OpEmitter` per operation, discarded after its pass. Emission order:
//! type-variable preamble, signature and docstring, the eager fast path
//! with its error boundary, the deferred graph-building path, the raw-op
//! export and dispatcher alias, and finally the standalone eager-fallback
//! function. Each state lives in its own module and writes through the
//! shared buffers.

mod dispatch;
mod docstring;
mod fallback;
mod fast_path;
mod graph_path;
mod setup;

use arbor_schema::{ApiCustomization, ArgSlot, AttrKind, AttrSchema, AttrValue, OpSchema, Visibility};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::annotations::{generate_type_vars, get_type_annotations, return_annotation};
use crate::buffer::SourceBuffer;
use crate::classify::InferenceMap;
use crate::flatten::vector_to_tuple;
use crate::literals::{attr_value_to_python, tensor_literal_string};
use crate::names::{attr_var_name, avoid_reserved};
use crate::params::ParameterPlan;
use crate::EmitError;

const EAGER_FALLBACK_SUFFIX: &str = "_eager_fallback";

/// Emits the full wrapper code of one operation.
pub struct OpEmitter<'a> {
    op: &'a OpSchema,
    api: &'a ApiCustomization,
    /// Generated function name, underscore-prefixed for hidden ops.
    function_name: String,
    /// `function_name` without the hidden-op underscore, for messages.
    op_name: String,
    annotate: bool,
    /// Inputs in API order (customization ordering override applied).
    inputs: Vec<&'a ArgSlot>,
    /// Rendered input names, parallel to `inputs`.
    input_renames: Vec<String>,
    inference: InferenceMap,
    plan: ParameterPlan,
    /// Expression holding each attribute's value at emission time.
    attr_exprs: FxHashMap<String, String>,
    annotations: FxHashMap<String, String>,
    /// Per-output size expressions, empty for single-tensor outputs.
    output_sizes: SmallVec<[String; 4]>,
    num_outputs_expr: String,
    /// The raise line replacing the fast path when a slot is a ref.
    eager_not_allowed: Option<String>,
    prelude: SourceBuffer,
    result: SourceBuffer,
}

impl<'a> OpEmitter<'a> {
    pub fn new(
        op: &'a OpSchema,
        api: &'a ApiCustomization,
        function_name: String,
        annotate: bool,
    ) -> Self {
        let inputs: Vec<&ArgSlot> = if api.arg_order.is_empty() {
            op.inputs.iter().collect()
        } else {
            api.arg_order
                .iter()
                .filter_map(|name| op.inputs.iter().find(|slot| slot.name == *name))
                .collect()
        };
        let input_renames: Vec<String> = inputs
            .iter()
            .map(|slot| api.arg_name(&slot.name).to_string())
            .collect();
        let inference = InferenceMap::build(&inputs, api);

        let mut plan = ParameterPlan::new();
        for (slot, rename) in inputs.iter().zip(&input_renames) {
            plan.push_required(slot.name.clone(), rename.clone());
        }
        let mut defaulted: Vec<(&AttrSchema, String, String)> = Vec::new();
        for attr in &op.attrs {
            if inference.is_inferred(&attr.name) {
                continue;
            }
            let rendered = api.attr_name(&attr.name).to_string();
            match api.attr_default(&attr.name, attr.default.as_ref()) {
                Some(default) => {
                    let expr = default_expr(attr, &rendered, default);
                    defaulted.push((attr, rendered, expr));
                }
                None => plan.push_required(attr.name.clone(), rendered),
            }
        }
        for (attr, rendered, expr) in defaulted {
            plan.push_defaulted(attr.name.clone(), rendered, expr);
        }

        let mut attr_exprs = FxHashMap::default();
        for param in &plan.params()[inputs.len()..] {
            attr_exprs.insert(param.schema_name.clone(), param.rendered.clone());
        }
        for attr in &op.attrs {
            if attr.kind == AttrKind::Int && inference.is_inferred(&attr.name) {
                attr_exprs.insert(attr.name.clone(), attr_var_name(&attr.name));
            }
        }

        let annotations = if annotate {
            get_type_annotations(op)
        } else {
            FxHashMap::default()
        };

        let op_name = function_name.trim_start_matches('_').to_string();
        let mut emitter = Self {
            op,
            api,
            function_name,
            op_name,
            annotate,
            inputs,
            input_renames,
            inference,
            plan,
            attr_exprs,
            annotations,
            output_sizes: SmallVec::new(),
            num_outputs_expr: String::new(),
            eager_not_allowed: None,
            prelude: SourceBuffer::new(),
            result: SourceBuffer::with_capacity(2048),
        };
        emitter.compute_output_sizes();
        emitter.eager_not_allowed = emitter.eager_not_allowed_error();
        emitter
    }

    /// Emit the complete wrapper text for this operation.
    pub fn emit(mut self) -> Result<String, EmitError> {
        self.add_fast_path_and_graph_code()?;
        self.add_eager_fallback_code()?;
        let mut out = self.prelude.take();
        out.push_str(self.result.as_str());
        Ok(out)
    }

    fn add_fast_path_and_graph_code(&mut self) -> Result<(), EmitError> {
        if self.annotate {
            generate_type_vars(self.op, &self.annotations, &mut self.result);
        }
        if self.is_visible() {
            self.result.line("@_dispatch.add_fallback_dispatch_list");
            self.result.line("@_dispatch.add_type_based_api_dispatcher");
            self.add_export();
        }
        let params = self.plan.render_with_defaults(&self.annotations);
        self.add_def_line(&self.function_name.clone(), &params);
        self.add_docstring();
        self.add_output_globals();

        self.result.push(
            "  _ctx = _context._context or _context.context()\n  \
             tld = _ctx._thread_local_data\n  if tld.is_eager:\n",
        );
        match self.eager_not_allowed.clone() {
            Some(error) => self.result.push(&format!("    {error}")),
            None => self.add_eager_fast_path_execute(),
        }

        let function_setup = self.eager_function_setup("  ")?;
        self.handle_graph_mode(&function_setup);

        self.add_raw_op_export();
        self.add_type_based_dispatcher_alias();
        self.result.push("\n\n");
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.api.visibility == Visibility::Visible
    }

    fn num_outs(&self) -> usize {
        self.op.outputs.len()
    }

    /// `_<Name>Output`, the namedtuple holding multi-output results.
    fn output_tuple_name(&self) -> String {
        format!("_{}Output", avoid_reserved(&self.op.name))
    }

    fn add_def_line(&mut self, name: &str, params: &str) {
        let return_type = if self.annotate {
            return_annotation(self.op, &self.annotations)
        } else {
            None
        };
        match return_type {
            Some(return_type) => self
                .result
                .line(&format!("def {name}({params}) -> {return_type}:")),
            None => self.result.line(&format!("def {name}({params}):")),
        }
    }

    fn add_export(&mut self) {
        let endpoints: Vec<String> = if self.api.endpoints.is_empty() {
            vec![format!("'{}'", self.function_name)]
        } else {
            self.api
                .endpoints
                .iter()
                .map(|e| format!("'{e}'"))
                .collect()
        };
        self.result
            .line(&format!("@api_export({})", endpoints.join(", ")));
    }

    /// The namedtuple binding for multi-output ops, emitted to the prelude.
    fn add_output_globals(&mut self) {
        if self.num_outs() <= 1 {
            return;
        }
        let names: Vec<String> = self
            .op
            .outputs
            .iter()
            .map(|slot| format!("\"{}\"", self.api.arg_name(&slot.name)))
            .collect();
        self.prelude
            .line(&format!("{} = collections.namedtuple(", self.output_tuple_name()));
        self.prelude.line(&format!("    \"{}\",", self.op.name));
        self.prelude.line(&format!("    [{}])", names.join(", ")));
        self.prelude.blank();
        self.prelude.blank();
    }

    /// Per-output size expressions and the total-output-count expression.
    fn compute_output_sizes(&mut self) {
        let mut num_fixed_outputs = 0usize;
        let mut num_outputs_expr = String::new();
        for slot in &self.op.outputs {
            if let Some(number_attr) = &slot.number_attr {
                let size = self
                    .attr_exprs
                    .get(number_attr)
                    .cloned()
                    .unwrap_or_else(|| attr_var_name(number_attr));
                if !num_outputs_expr.is_empty() {
                    num_outputs_expr.push_str(" + ");
                }
                num_outputs_expr.push_str(&size);
                self.output_sizes.push(size);
            } else if let Some(type_list_attr) = slot.type_list_attr() {
                // The expression has to work in both the graph and eager
                // paths, so an inferred attribute reads the length of its
                // representative input rather than the attribute value.
                let size = match self.inference.representative(type_list_attr) {
                    Some(representative) => format!("len({representative})"),
                    None => {
                        let expr = self
                            .attr_exprs
                            .get(type_list_attr)
                            .cloned()
                            .unwrap_or_else(|| attr_var_name(type_list_attr));
                        format!("len({expr})")
                    }
                };
                if !num_outputs_expr.is_empty() {
                    num_outputs_expr.push_str(" + ");
                }
                num_outputs_expr.push_str(&size);
                self.output_sizes.push(size);
            } else {
                self.output_sizes.push(String::new());
                num_fixed_outputs += 1;
            }
        }
        if num_fixed_outputs > 0 {
            if !num_outputs_expr.is_empty() {
                num_outputs_expr.push_str(" + ");
            }
            num_outputs_expr.push_str(&num_fixed_outputs.to_string());
        } else if num_outputs_expr.is_empty() {
            num_outputs_expr.push('0');
        }
        self.num_outputs_expr = num_outputs_expr;
    }

    /// The raise line replacing the fast path when any slot is a ref.
    fn eager_not_allowed_error(&self) -> Option<String> {
        let mut ref_arg: Option<&str> = None;
        for (slot, rename) in self.inputs.iter().zip(&self.input_renames) {
            if slot.is_ref {
                ref_arg = Some(rename.as_str());
            }
        }
        for slot in &self.op.outputs {
            if slot.is_ref {
                ref_arg = Some(self.api.arg_name(&slot.name));
            }
        }
        ref_arg.map(|arg| {
            format!(
                "raise RuntimeError(\"{} op does not support eager execution. \
                 Arg '{arg}' is a ref.\")\n",
                self.op_name
            )
        })
    }
}

/// The default-value expression embedded in the entry-point signature.
fn default_expr(attr: &AttrSchema, rendered: &str, default: &AttrValue) -> String {
    match (&attr.kind, default) {
        (AttrKind::Tensor, AttrValue::Tensor(tensor)) => format!(
            "_execute.make_tensor({}, \"{rendered}\")",
            tensor_literal_string(tensor)
        ),
        (AttrKind::TensorList, AttrValue::List(values)) => {
            let literals: Vec<String> = values
                .iter()
                .map(|value| match value {
                    AttrValue::Tensor(tensor) => tensor_literal_string(tensor),
                    other => attr_value_to_python(other),
                })
                .collect();
            format!(
                "[_execute.make_tensor(_pb, \"{rendered}\") for _pb in {}]",
                vector_to_tuple(&literals)
            )
        }
        _ => attr_value_to_python(default),
    }
}
