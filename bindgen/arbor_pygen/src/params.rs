//! Parameter planning for generated signatures.
//!
//! Parameters are ordered: input slots first, then explicit attributes
//! without a default, then explicit attributes with a default. Two
//! renderings exist: the entry point embeds defaults inline, while the
//! standalone fallback function requires every value (it is never called
//! with defaults omitted). Both append a trailing `name` parameter.

use rustc_hash::FxHashMap;

/// One planned parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    /// Logical (schema) name, the key for annotation lookup.
    pub schema_name: String,
    /// Rendered token after API renames.
    pub rendered: String,
    /// Default value expression, for the defaulted partition only.
    pub default_expr: Option<String>,
}

/// The ordered parameter plan of one operation.
///
/// Defaulted entries follow all required entries; the schema guarantees
/// the ordering, so pushes out of order are a caller bug.
#[derive(Debug, Default)]
pub struct ParameterPlan {
    params: Vec<Param>,
    required_count: usize,
}

impl ParameterPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_required(&mut self, schema_name: impl Into<String>, rendered: impl Into<String>) {
        debug_assert_eq!(
            self.required_count,
            self.params.len(),
            "required parameter pushed after a defaulted one"
        );
        self.params.push(Param {
            schema_name: schema_name.into(),
            rendered: rendered.into(),
            default_expr: None,
        });
        self.required_count += 1;
    }

    pub fn push_defaulted(
        &mut self,
        schema_name: impl Into<String>,
        rendered: impl Into<String>,
        default_expr: impl Into<String>,
    ) {
        self.params.push(Param {
            schema_name: schema_name.into(),
            rendered: rendered.into(),
            default_expr: Some(default_expr.into()),
        });
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn defaulted(&self) -> &[Param] {
        &self.params[self.required_count..]
    }

    pub fn defaulted_count(&self) -> usize {
        self.params.len() - self.required_count
    }

    /// Signature tokens with every parameter required, ending in `name`.
    /// Annotations, when present, render as `: T`.
    pub fn render_required(&self, annotations: &FxHashMap<String, String>) -> String {
        let mut out = String::new();
        for param in &self.params {
            if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str(&param.rendered);
            if let Some(annotation) = annotations.get(&param.schema_name) {
                out.push_str(": ");
                out.push_str(annotation);
            }
        }
        if !out.is_empty() {
            out.push_str(", ");
        }
        out.push_str("name");
        out
    }

    /// Signature tokens with defaults embedded inline, ending in
    /// `name=None`. Defaulted annotations render as `:T` before the `=`.
    pub fn render_with_defaults(&self, annotations: &FxHashMap<String, String>) -> String {
        let mut out = String::new();
        for param in &self.params {
            if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str(&param.rendered);
            match &param.default_expr {
                None => {
                    if let Some(annotation) = annotations.get(&param.schema_name) {
                        out.push_str(": ");
                        out.push_str(annotation);
                    }
                }
                Some(default_expr) => {
                    if let Some(annotation) = annotations.get(&param.schema_name) {
                        out.push(':');
                        out.push_str(annotation);
                    }
                    out.push('=');
                    out.push_str(default_expr);
                }
            }
        }
        if !out.is_empty() {
            out.push_str(", ");
        }
        out.push_str("name=None");
        out
    }

    /// Argument tuple for the type-based dispatcher call:
    /// `(x, y, name,), None`.
    pub fn dispatch_args(&self) -> String {
        let mut out = String::from("(");
        for param in &self.params {
            out.push_str(&param.rendered);
            out.push_str(", ");
        }
        out.push_str("name,), None");
        out
    }

    /// Keyword-argument tail for builder and dispatch calls:
    /// `x=x, y=y, name=name)`.
    pub fn body_kwargs(&self) -> String {
        let mut out = String::new();
        for param in &self.params {
            out.push_str(&param.rendered);
            out.push('=');
            out.push_str(&param.rendered);
            out.push_str(", ");
        }
        out.push_str("name=name)");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plan() -> ParameterPlan {
        let mut plan = ParameterPlan::new();
        plan.push_required("x", "x");
        plan.push_required("reduction_indices", "axis");
        plan.push_defaulted("keep_dims", "keepdims", "False");
        plan
    }

    #[test]
    fn test_render_required() {
        let annotations = FxHashMap::default();
        assert_eq!(plan().render_required(&annotations), "x, axis, keepdims, name");
    }

    #[test]
    fn test_render_with_defaults() {
        let annotations = FxHashMap::default();
        assert_eq!(
            plan().render_with_defaults(&annotations),
            "x, axis, keepdims=False, name=None"
        );
    }

    #[test]
    fn test_annotation_spacing() {
        let mut annotations = FxHashMap::default();
        annotations.insert("x".to_string(), "_ops.Tensor[TV_Sum_T]".to_string());
        annotations.insert("keep_dims".to_string(), "bool".to_string());
        assert_eq!(
            plan().render_with_defaults(&annotations),
            "x: _ops.Tensor[TV_Sum_T], axis, keepdims:bool=False, name=None"
        );
        assert_eq!(
            plan().render_required(&annotations),
            "x: _ops.Tensor[TV_Sum_T], axis, keepdims: bool, name"
        );
    }

    #[test]
    fn test_empty_plan_renders_name_only() {
        let plan = ParameterPlan::new();
        let annotations = FxHashMap::default();
        assert_eq!(plan.render_required(&annotations), "name");
        assert_eq!(plan.render_with_defaults(&annotations), "name=None");
        assert_eq!(plan.dispatch_args(), "(name,), None");
        assert_eq!(plan.body_kwargs(), "name=name)");
    }

    #[test]
    fn test_dispatch_and_kwargs() {
        assert_eq!(plan().dispatch_args(), "(x, axis, keepdims, name,), None");
        assert_eq!(
            plan().body_kwargs(),
            "x=x, axis=axis, keepdims=keepdims, name=name)"
        );
    }
}
