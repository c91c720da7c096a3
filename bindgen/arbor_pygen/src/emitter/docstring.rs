//! Docstring emission.
//!
//! Documentation text is pass-through: summaries and descriptions come
//! straight from the schema, with fixed fallbacks where the schema is
//! silent.

use super::OpEmitter;

impl OpEmitter<'_> {
    pub(super) fn add_docstring(&mut self) {
        let summary = if self.op.summary.is_empty() {
            "TODO: add doc."
        } else {
            self.op.summary.as_str()
        };
        self.result.line(&format!("  r\"\"\"{summary}"));

        if !self.op.description.is_empty() {
            self.result.blank();
            let description = self.op.description.clone();
            for line in description.lines() {
                if line.is_empty() {
                    self.result.blank();
                } else {
                    self.result.line(&format!("  {line}"));
                }
            }
        }

        self.result.blank();
        self.result.line("  Args:");
        for (slot, rename) in self.inputs.iter().zip(&self.input_renames) {
            let description = if slot.description.is_empty() {
                "A `Tensor`."
            } else {
                slot.description.as_str()
            };
            self.result.line(&format!("    {rename}: {description}"));
        }
        for param in &self.plan.params()[self.inputs.len()..] {
            let Some(attr) = self.op.find_attr(&param.schema_name) else {
                continue;
            };
            let mut text = if attr.description.is_empty() {
                format!("An `{}`.", attr.kind.spec_name())
            } else {
                attr.description.clone()
            };
            if let Some(default) = &param.default_expr {
                text.push_str(&format!(" Defaults to `{default}`."));
            }
            self.result.line(&format!("    {}: {text}", param.rendered));
        }
        self.result
            .line("    name: A name for the operation (optional).");

        self.result.blank();
        self.result.line("  Returns:");
        match self.op.outputs.len() {
            0 => self.result.line("    The created Operation."),
            1 => {
                let slot = &self.op.outputs[0];
                let description = if slot.description.is_empty() {
                    "A `Tensor`."
                } else {
                    slot.description.as_str()
                };
                self.result.line(&format!("    {description}"));
            }
            _ => {
                let names: Vec<&str> = self
                    .op
                    .outputs
                    .iter()
                    .map(|slot| self.api.arg_name(&slot.name))
                    .collect();
                self.result.line(&format!(
                    "    A tuple of `Tensor` objects ({}).",
                    names.join(", ")
                ));
                self.result.blank();
                let lines: Vec<String> = self
                    .op
                    .outputs
                    .iter()
                    .map(|slot| {
                        let description = if slot.description.is_empty() {
                            "A `Tensor`."
                        } else {
                            slot.description.as_str()
                        };
                        format!("    {}: {description}", self.api.arg_name(&slot.name))
                    })
                    .collect();
                for line in lines {
                    self.result.line(&line);
                }
            }
        }
        self.result.line("  \"\"\"");
    }
}
