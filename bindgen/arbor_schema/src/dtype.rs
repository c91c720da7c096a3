//! Element types supported by the arbor runtime.

use std::fmt;

/// An element type of a tensor value.
///
/// The set is closed: it mirrors the dtypes the runtime registers, and the
/// generator enumerates `ALL` when a polymorphic attribute carries no
/// permitted-type restriction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementType {
    Float16,
    BFloat16,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Bool,
    String,
    QInt8,
    QUInt8,
    QInt16,
    QUInt16,
    QInt32,
    Resource,
    Variant,
}

impl ElementType {
    /// Every element type the runtime knows, in declaration order.
    pub const ALL: [ElementType; 23] = [
        ElementType::Float16,
        ElementType::BFloat16,
        ElementType::Float32,
        ElementType::Float64,
        ElementType::Complex64,
        ElementType::Complex128,
        ElementType::Int8,
        ElementType::Int16,
        ElementType::Int32,
        ElementType::Int64,
        ElementType::UInt8,
        ElementType::UInt16,
        ElementType::UInt32,
        ElementType::UInt64,
        ElementType::Bool,
        ElementType::String,
        ElementType::QInt8,
        ElementType::QUInt8,
        ElementType::QInt16,
        ElementType::QUInt16,
        ElementType::QInt32,
        ElementType::Resource,
        ElementType::Variant,
    ];

    /// The lowercase dtype spelling used in runtime expressions,
    /// e.g. `float32` in `_dtypes.float32`.
    pub fn python_name(self) -> &'static str {
        match self {
            ElementType::Float16 => "float16",
            ElementType::BFloat16 => "bfloat16",
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
            ElementType::Complex64 => "complex64",
            ElementType::Complex128 => "complex128",
            ElementType::Int8 => "int8",
            ElementType::Int16 => "int16",
            ElementType::Int32 => "int32",
            ElementType::Int64 => "int64",
            ElementType::UInt8 => "uint8",
            ElementType::UInt16 => "uint16",
            ElementType::UInt32 => "uint32",
            ElementType::UInt64 => "uint64",
            ElementType::Bool => "bool",
            ElementType::String => "string",
            ElementType::QInt8 => "qint8",
            ElementType::QUInt8 => "quint8",
            ElementType::QInt16 => "qint16",
            ElementType::QUInt16 => "quint16",
            ElementType::QInt32 => "qint32",
            ElementType::Resource => "resource",
            ElementType::Variant => "variant",
        }
    }

    /// The capitalized dtype class spelling used in type annotations,
    /// e.g. `Float32` in `_dtypes.Float32`.
    pub fn class_name(self) -> &'static str {
        match self {
            ElementType::Float16 => "Float16",
            ElementType::BFloat16 => "BFloat16",
            ElementType::Float32 => "Float32",
            ElementType::Float64 => "Float64",
            ElementType::Complex64 => "Complex64",
            ElementType::Complex128 => "Complex128",
            ElementType::Int8 => "Int8",
            ElementType::Int16 => "Int16",
            ElementType::Int32 => "Int32",
            ElementType::Int64 => "Int64",
            ElementType::UInt8 => "UInt8",
            ElementType::UInt16 => "UInt16",
            ElementType::UInt32 => "UInt32",
            ElementType::UInt64 => "UInt64",
            ElementType::Bool => "Bool",
            ElementType::String => "String",
            ElementType::QInt8 => "QInt8",
            ElementType::QUInt8 => "QUInt8",
            ElementType::QInt16 => "QInt16",
            ElementType::QUInt16 => "QUInt16",
            ElementType::QInt32 => "QInt32",
            ElementType::Resource => "Resource",
            ElementType::Variant => "Variant",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.python_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_exhaustive_and_distinct() {
        use std::collections::HashSet;
        let names: HashSet<_> = ElementType::ALL.iter().map(|t| t.python_name()).collect();
        assert_eq!(names.len(), ElementType::ALL.len());
    }

    #[test]
    fn test_spellings_pair_up() {
        assert_eq!(ElementType::Float32.python_name(), "float32");
        assert_eq!(ElementType::Float32.class_name(), "Float32");
        assert_eq!(ElementType::QUInt16.python_name(), "quint16");
        assert_eq!(ElementType::QUInt16.class_name(), "QUInt16");
    }

    #[test]
    fn test_display_uses_python_name() {
        assert_eq!(ElementType::BFloat16.to_string(), "bfloat16");
    }
}
