//! Type-annotation generation.
//!
//! For an allow-listed subset of operations, each polymorphic type
//! attribute binds a fresh type variable scoped to the operation, and each
//! input or output with a fixed element type or a bound type attribute
//! gets a tensor annotation. Slots behind a length or list-of-types
//! attribute are never annotated, and the return type is annotated only
//! when there is exactly one non-list output.

use arbor_schema::{ArgSlot, AttrKind, ElementType, OpSchema, SlotType};
use rustc_hash::FxHashMap;

use crate::buffer::SourceBuffer;
use crate::literals::dtype_class_expr;

/// Map from logical (schema) parameter names to annotation expressions.
pub fn get_type_annotations(op: &OpSchema) -> FxHashMap<String, String> {
    let mut annotations = FxHashMap::default();

    for attr in &op.attrs {
        match attr.kind {
            AttrKind::Type => {
                annotations.insert(attr.name.clone(), type_var_name(&op.name, &attr.name));
            }
            AttrKind::Bool => {
                annotations.insert(attr.name.clone(), "bool".to_string());
            }
            AttrKind::Float => {
                annotations.insert(attr.name.clone(), "float".to_string());
            }
            AttrKind::Int => {
                annotations.insert(attr.name.clone(), "int".to_string());
            }
            AttrKind::String => {
                annotations.insert(attr.name.clone(), "str".to_string());
            }
            _ => {}
        }
    }

    for arg in &op.inputs {
        if arg.is_list() {
            continue;
        }
        if let Some(annotation) = arg_annotation(arg, &annotations) {
            annotations.insert(arg.name.clone(), annotation);
        }
    }

    if op.outputs.len() == 1 {
        let arg = &op.outputs[0];
        if !arg.is_list() {
            if let Some(annotation) = arg_annotation(arg, &annotations) {
                annotations.insert(arg.name.clone(), annotation);
            }
        }
    }

    annotations
}

/// The annotation of a single-tensor slot: the bound type variable when
/// the slot's type comes from an attribute, the dtype class otherwise.
fn arg_annotation(
    arg: &ArgSlot,
    annotations: &FxHashMap<String, String>,
) -> Option<String> {
    if let Some(type_attr) = arg.type_attr() {
        let bound = annotations.get(type_attr)?;
        return Some(format!("_ops.Tensor[{bound}]"));
    }
    match &arg.slot_type {
        SlotType::Fixed(dtype) => Some(format!("_ops.Tensor[{}]", dtype_class_expr(*dtype))),
        SlotType::Attr(_) | SlotType::List(_) => None,
    }
}

/// The fresh type-variable name bound for one polymorphic attribute.
pub fn type_var_name(op_name: &str, attr_name: &str) -> String {
    format!("TV_{op_name}_{attr_name}")
}

/// Emit one `TypeVar` declaration per polymorphic type attribute, with the
/// permitted element types enumerated in sorted order. An attribute with
/// no restriction enumerates every known element type.
pub fn generate_type_vars(
    op: &OpSchema,
    annotations: &FxHashMap<String, String>,
    out: &mut SourceBuffer,
) {
    let mut added = false;
    for attr in &op.attrs {
        if attr.kind != AttrKind::Type {
            continue;
        }
        let mut allowed: Vec<String> = if attr.allowed_types.is_empty() {
            ElementType::ALL.iter().map(|t| dtype_class_expr(*t)).collect()
        } else {
            attr.allowed_types.iter().map(|t| dtype_class_expr(*t)).collect()
        };
        allowed.sort();

        if let Some(type_var) = annotations.get(&attr.name) {
            out.line(&format!(
                "{type_var} = TypeVar(\"{type_var}\", {})",
                allowed.join(", ")
            ));
            added = true;
        }
    }
    if added {
        out.blank();
    }
}

/// The return annotation: present only for exactly one non-list output.
pub fn return_annotation(
    op: &OpSchema,
    annotations: &FxHashMap<String, String>,
) -> Option<String> {
    if op.outputs.len() != 1 {
        return None;
    }
    let arg = &op.outputs[0];
    if arg.is_list() {
        return None;
    }
    annotations.get(&arg.name).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_schema::AttrSchema;
    use pretty_assertions::assert_eq;

    fn cast_op() -> OpSchema {
        OpSchema::new("Cast")
            .input(ArgSlot::typed("x", "SrcT"))
            .output(ArgSlot::typed("y", "DstT"))
            .attr(AttrSchema::new("SrcT", AttrKind::Type))
            .attr(AttrSchema::new("DstT", AttrKind::Type))
    }

    #[test]
    fn test_attrs_bind_type_vars() {
        let op = cast_op();
        let annotations = get_type_annotations(&op);
        assert_eq!(annotations.get("SrcT").map(String::as_str), Some("TV_Cast_SrcT"));
        assert_eq!(
            annotations.get("x").map(String::as_str),
            Some("_ops.Tensor[TV_Cast_SrcT]")
        );
        assert_eq!(
            return_annotation(&op, &annotations).as_deref(),
            Some("_ops.Tensor[TV_Cast_DstT]")
        );
    }

    #[test]
    fn test_list_slots_are_not_annotated() {
        let op = OpSchema::new("Pack")
            .input(ArgSlot::typed("values", "T").with_number_attr("N"))
            .output(ArgSlot::typed("output", "T"))
            .attr(AttrSchema::new("N", AttrKind::Int))
            .attr(AttrSchema::new("T", AttrKind::Type));
        let annotations = get_type_annotations(&op);
        assert!(annotations.get("values").is_none());
        assert!(annotations.get("output").is_some());
    }

    #[test]
    fn test_scalar_attr_kinds() {
        let op = OpSchema::new("Save")
            .attr(AttrSchema::new("path", AttrKind::String))
            .attr(AttrSchema::new("count", AttrKind::Int))
            .attr(AttrSchema::new("overwrite", AttrKind::Bool));
        let annotations = get_type_annotations(&op);
        assert_eq!(annotations.get("path").map(String::as_str), Some("str"));
        assert_eq!(annotations.get("count").map(String::as_str), Some("int"));
        assert_eq!(annotations.get("overwrite").map(String::as_str), Some("bool"));
    }

    #[test]
    fn test_type_vars_sorted_and_restricted() {
        let op = OpSchema::new("Sum").input(ArgSlot::typed("x", "T")).attr(
            AttrSchema::new("T", AttrKind::Type).with_allowed_types(vec![
                ElementType::Int32,
                ElementType::Float32,
            ]),
        );
        let annotations = get_type_annotations(&op);
        let mut out = SourceBuffer::new();
        generate_type_vars(&op, &annotations, &mut out);
        assert_eq!(
            out.as_str(),
            "TV_Sum_T = TypeVar(\"TV_Sum_T\", _dtypes.Float32, _dtypes.Int32)\n\n"
        );
    }

    #[test]
    fn test_unrestricted_attr_enumerates_all_types() {
        let op = OpSchema::new("Identity")
            .input(ArgSlot::typed("x", "T"))
            .attr(AttrSchema::new("T", AttrKind::Type));
        let annotations = get_type_annotations(&op);
        let mut out = SourceBuffer::new();
        generate_type_vars(&op, &annotations, &mut out);
        for dtype in ElementType::ALL {
            assert!(out.as_str().contains(&dtype_class_expr(dtype)));
        }
    }

    #[test]
    fn test_multi_output_has_no_return_annotation() {
        let op = OpSchema::new("Split")
            .input(ArgSlot::typed("value", "T"))
            .output(ArgSlot::typed("a", "T"))
            .output(ArgSlot::typed("b", "T"))
            .attr(AttrSchema::new("T", AttrKind::Type));
        let annotations = get_type_annotations(&op);
        assert_eq!(return_annotation(&op, &annotations), None);
    }
}
