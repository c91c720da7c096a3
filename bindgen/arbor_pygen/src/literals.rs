//! Python literal rendering for attribute values and element types.

use arbor_schema::{AttrValue, ElementType, TensorLiteral};

/// The runtime dtype expression, e.g. `_dtypes.float32`.
pub fn dtype_expr(dtype: ElementType) -> String {
    format!("_dtypes.{}", dtype.python_name())
}

/// The dtype class expression used in annotations, e.g. `_dtypes.Float32`.
pub fn dtype_class_expr(dtype: ElementType) -> String {
    format!("_dtypes.{}", dtype.class_name())
}

/// Render an attribute value as a Python literal expression.
pub fn attr_value_to_python(value: &AttrValue) -> String {
    match value {
        AttrValue::String(s) => string_to_python(s),
        AttrValue::Int(i) => i.to_string(),
        AttrValue::Float(f) => float_to_python(*f),
        AttrValue::Bool(true) => "True".to_string(),
        AttrValue::Bool(false) => "False".to_string(),
        AttrValue::Type(t) => dtype_expr(*t),
        AttrValue::Shape(shape) => shape_to_python(shape.as_deref()),
        AttrValue::Tensor(t) => tensor_literal_string(t),
        AttrValue::Func(name) => string_to_python(name),
        AttrValue::List(values) => {
            let rendered: Vec<String> = values.iter().map(attr_value_to_python).collect();
            format!("[{}]", rendered.join(", "))
        }
    }
}

/// A double-quoted Python string literal with escapes.
pub fn string_to_python(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A Python float literal, with spelled-out non-finite values.
pub fn float_to_python(f: f32) -> String {
    if f.is_nan() {
        "float('nan')".to_string()
    } else if f.is_infinite() {
        if f > 0.0 {
            "float('inf')".to_string()
        } else {
            "float('-inf')".to_string()
        }
    } else {
        format!("{f}")
    }
}

/// A shape literal: `[2, 3]`, or `None` for unknown rank.
pub fn shape_to_python(dims: Option<&[i64]>) -> String {
    match dims {
        None => "None".to_string(),
        Some(dims) => {
            let rendered: Vec<String> = dims.iter().map(ToString::to_string).collect();
            format!("[{}]", rendered.join(", "))
        }
    }
}

/// The single-line textual encoding of a tensor literal, triple-quoted so
/// it survives naive word wrapping in emitted argument lists.
pub fn tensor_literal_string(tensor: &TensorLiteral) -> String {
    let mut body = format!("dtype: {}", tensor.dtype.python_name());
    body.push_str(" shape {");
    for dim in &tensor.dims {
        body.push_str(&format!(" dim {{ size: {dim} }}"));
    }
    body.push_str(" }");
    for value in &tensor.values {
        body.push_str(" value: ");
        for piece in value.split_whitespace() {
            body.push_str(piece);
        }
    }
    format!("\"\"\"{body}\"\"\"")
}
