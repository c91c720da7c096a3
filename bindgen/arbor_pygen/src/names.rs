//! Lexical helpers for generated Python identifiers.

/// Convert a registry op name to the snake_case wrapper name.
///
/// A joiner is inserted on a lower-to-upper transition and before the last
/// upper of an upper run followed by a lower, so `MatMul` becomes `mat_mul`
/// and `CSVReader` becomes `csv_reader`.
pub fn lower_case_op_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev_lower = chars[i - 1].is_ascii_lowercase();
            let next_lower = i + 1 < chars.len() && chars[i + 1].is_ascii_lowercase();
            if prev_lower || next_lower {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Whether `name` is a Python reserved word.
pub fn is_python_reserved(name: &str) -> bool {
    matches!(
        name,
        "False"
            | "None"
            | "True"
            | "and"
            | "as"
            | "assert"
            | "async"
            | "await"
            | "break"
            | "class"
            | "continue"
            | "def"
            | "del"
            | "elif"
            | "else"
            | "except"
            | "finally"
            | "for"
            | "from"
            | "global"
            | "if"
            | "import"
            | "in"
            | "is"
            | "lambda"
            | "nonlocal"
            | "not"
            | "or"
            | "pass"
            | "raise"
            | "return"
            | "try"
            | "while"
            | "with"
            | "yield"
    )
}

/// Produce a valid, non-reserved Python identifier from an op name.
///
/// Namespace separators (`>`) map to `_`; a reserved result gets a
/// trailing `_`.
pub fn avoid_reserved(name: &str) -> String {
    let result: String = name
        .chars()
        .map(|c| if c == '>' { '_' } else { c })
        .collect();
    if is_python_reserved(&result) {
        format!("{result}_")
    } else {
        result
    }
}

/// The local variable holding an inferred attribute's value.
pub fn attr_var_name(attr: &str) -> String {
    format!("_attr_{attr}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lower_case_simple() {
        assert_eq!(lower_case_op_name("Add"), "add");
        assert_eq!(lower_case_op_name("MatMul"), "mat_mul");
        assert_eq!(lower_case_op_name("SparseMatMul"), "sparse_mat_mul");
    }

    #[test]
    fn test_lower_case_upper_runs() {
        assert_eq!(lower_case_op_name("CSVReader"), "csv_reader");
        assert_eq!(lower_case_op_name("FFT"), "fft");
    }

    #[test]
    fn test_lower_case_digits() {
        assert_eq!(lower_case_op_name("Conv2D"), "conv2d");
        assert_eq!(
            lower_case_op_name("Conv2DBackpropInput"),
            "conv2d_backprop_input"
        );
    }

    #[test]
    fn test_reserved_words() {
        assert!(is_python_reserved("if"));
        assert!(is_python_reserved("lambda"));
        assert!(!is_python_reserved("add"));
    }

    #[test]
    fn test_avoid_reserved() {
        assert_eq!(avoid_reserved("Assert"), "Assert");
        assert_eq!(avoid_reserved("lambda"), "lambda_");
        assert_eq!(avoid_reserved("linalg>MatMul"), "linalg_MatMul");
    }

    #[test]
    fn test_attr_var_name() {
        assert_eq!(attr_var_name("N"), "_attr_N");
    }
}
