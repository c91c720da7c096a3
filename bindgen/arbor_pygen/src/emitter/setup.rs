//! Shared function setup: list validation, inferred length attributes,
//! default application, and attribute coercions.
//!
//! Both the deferred graph path and the standalone eager fallback begin
//! with this text. The coercion table is the single exhaustive match over
//! `AttrKind`; the `Other` arm is the per-operation fatal path.

use arbor_schema::AttrKind;

use crate::buffer::SourceBuffer;
use crate::names::attr_var_name;
use crate::EmitError;

use super::OpEmitter;

impl OpEmitter<'_> {
    /// Build the setup text emitted at the head of the graph path and the
    /// eager fallback.
    ///
    /// Inferred `int` attributes are the lengths of list inputs: every
    /// referencing input is validated to be list-like, the attribute is
    /// assigned from the first input's length, and later inputs are
    /// cross-checked against it. Explicit attributes then get their
    /// default applied (when the caller passed `None`) and their kind
    /// coercion.
    pub(super) fn eager_function_setup(&self, indentation: &str) -> Result<String, EmitError> {
        let mut setup = SourceBuffer::new();

        for attr in &self.op.attrs {
            if attr.kind != AttrKind::Int {
                continue;
            }
            let Some(arg_indices) = self.inference.args_for(&attr.name) else {
                continue;
            };
            let attr_var = attr_var_name(&attr.name);
            for (position, &arg_index) in arg_indices.iter().enumerate() {
                let arg_api_name = &self.input_renames[arg_index];
                self.expect_list_arg(&mut setup, indentation, arg_api_name);
                if position == 0 {
                    setup.line(&format!("{indentation}{attr_var} = len({arg_api_name})"));
                } else {
                    let representative =
                        self.inference.representative(&attr.name).unwrap_or_default();
                    setup.push(&format!(
                        "{indentation}if len({arg_api_name}) != {attr_var}:\n\
                         {indentation}  raise ValueError(\n\
                         {indentation}      \"List argument '{arg_api_name}' to '{op}' Op \
                         with length %d \"\n\
                         {indentation}      \"must match length %d of argument \
                         '{representative}'.\" %\n\
                         {indentation}      (len({arg_api_name}), {attr_var}))\n",
                        op = self.op_name,
                    ));
                }
            }
        }

        for param in &self.plan.params()[self.inputs.len()..] {
            let Some(attr) = self.op.find_attr(&param.schema_name) else {
                continue;
            };
            let attr_api_name = &param.rendered;
            if let Some(default) = &param.default_expr {
                setup.push(&format!(
                    "{indentation}if {attr_api_name} is None:\n\
                     {indentation}  {attr_api_name} = {default}\n"
                ));
            }
            if attr.kind.is_list() {
                self.expect_list_arg(&mut setup, indentation, attr_api_name);
            }
            match &attr.kind {
                AttrKind::String => coerce(&mut setup, indentation, attr_api_name, "make_str"),
                AttrKind::StringList => {
                    coerce_list(&mut setup, indentation, attr_api_name, "make_str", "_s");
                }
                AttrKind::Int => coerce(&mut setup, indentation, attr_api_name, "make_int"),
                AttrKind::IntList => {
                    coerce_list(&mut setup, indentation, attr_api_name, "make_int", "_i");
                }
                AttrKind::Float => coerce(&mut setup, indentation, attr_api_name, "make_float"),
                AttrKind::FloatList => {
                    coerce_list(&mut setup, indentation, attr_api_name, "make_float", "_f");
                }
                AttrKind::Bool => coerce(&mut setup, indentation, attr_api_name, "make_bool"),
                AttrKind::BoolList => {
                    coerce_list(&mut setup, indentation, attr_api_name, "make_bool", "_b");
                }
                AttrKind::Type => coerce(&mut setup, indentation, attr_api_name, "make_type"),
                AttrKind::TypeList => {
                    coerce_list(&mut setup, indentation, attr_api_name, "make_type", "_t");
                }
                AttrKind::Shape => coerce(&mut setup, indentation, attr_api_name, "make_shape"),
                AttrKind::ShapeList => {
                    coerce_list(&mut setup, indentation, attr_api_name, "make_shape", "_s");
                }
                AttrKind::Tensor => coerce(&mut setup, indentation, attr_api_name, "make_tensor"),
                AttrKind::TensorList => {
                    coerce_list(&mut setup, indentation, attr_api_name, "make_tensor", "_t");
                }
                AttrKind::Func | AttrKind::FuncList => {}
                AttrKind::Other(kind) => {
                    return Err(EmitError::UnsupportedAttrKind {
                        op: self.op.name.clone(),
                        attr: attr.name.clone(),
                        kind: kind.clone(),
                    });
                }
            }
        }
        Ok(setup.take())
    }

    /// Emit the list-likeness check for one argument.
    fn expect_list_arg(&self, setup: &mut SourceBuffer, indentation: &str, arg_name: &str) {
        setup.push(&format!(
            "{indentation}if not isinstance({arg_name}, (list, tuple)):\n\
             {indentation}  raise TypeError(\n\
             {indentation}      \"Expected list for '{arg_name}' argument to \"\n\
             {indentation}      \"'{op}' Op, not %r.\" % {arg_name})\n",
            op = self.op_name,
        ));
    }
}

fn coerce(setup: &mut SourceBuffer, indentation: &str, name: &str, func: &str) {
    setup.line(&format!(
        "{indentation}{name} = _execute.{func}({name}, \"{name}\")"
    ));
}

fn coerce_list(setup: &mut SourceBuffer, indentation: &str, name: &str, func: &str, var: &str) {
    setup.line(&format!(
        "{indentation}{name} = [_execute.{func}({var}, \"{name}\") for {var} in {name}]"
    ));
}
