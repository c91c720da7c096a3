//! Operation attributes: kinds, values, and schemas.
//!
//! An attribute is a statically-known parameter of an operation, not a
//! runtime value slot. Its kind is one of a closed set; the generator
//! matches kinds exhaustively, so an unrecognized kind string is carried
//! as data (`AttrKind::Other`) rather than panicking at construction.

use crate::dtype::ElementType;

/// The kind of an attribute.
///
/// `Other` carries a kind string this generator does not recognize; the
/// emission layer treats it as a per-operation fatal condition.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrKind {
    Type,
    TypeList,
    String,
    StringList,
    Int,
    IntList,
    Float,
    FloatList,
    Bool,
    BoolList,
    Shape,
    ShapeList,
    Tensor,
    TensorList,
    Func,
    FuncList,
    Other(std::string::String),
}

impl AttrKind {
    /// Parse the registry's kind spelling, e.g. `"list(int)"`.
    ///
    /// Unrecognized spellings parse to `Other`; rejecting them is the
    /// emitter's job, one operation at a time.
    pub fn from_spec(spec: &str) -> AttrKind {
        match spec {
            "type" => AttrKind::Type,
            "list(type)" => AttrKind::TypeList,
            "string" => AttrKind::String,
            "list(string)" => AttrKind::StringList,
            "int" => AttrKind::Int,
            "list(int)" => AttrKind::IntList,
            "float" => AttrKind::Float,
            "list(float)" => AttrKind::FloatList,
            "bool" => AttrKind::Bool,
            "list(bool)" => AttrKind::BoolList,
            "shape" => AttrKind::Shape,
            "list(shape)" => AttrKind::ShapeList,
            "tensor" => AttrKind::Tensor,
            "list(tensor)" => AttrKind::TensorList,
            "func" => AttrKind::Func,
            "list(func)" => AttrKind::FuncList,
            other => AttrKind::Other(other.to_string()),
        }
    }

    /// The registry spelling of this kind.
    pub fn spec_name(&self) -> &str {
        match self {
            AttrKind::Type => "type",
            AttrKind::TypeList => "list(type)",
            AttrKind::String => "string",
            AttrKind::StringList => "list(string)",
            AttrKind::Int => "int",
            AttrKind::IntList => "list(int)",
            AttrKind::Float => "float",
            AttrKind::FloatList => "list(float)",
            AttrKind::Bool => "bool",
            AttrKind::BoolList => "list(bool)",
            AttrKind::Shape => "shape",
            AttrKind::ShapeList => "list(shape)",
            AttrKind::Tensor => "tensor",
            AttrKind::TensorList => "list(tensor)",
            AttrKind::Func => "func",
            AttrKind::FuncList => "list(func)",
            AttrKind::Other(s) => s,
        }
    }

    /// Whether values of this kind are lists.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            AttrKind::TypeList
                | AttrKind::StringList
                | AttrKind::IntList
                | AttrKind::FloatList
                | AttrKind::BoolList
                | AttrKind::ShapeList
                | AttrKind::TensorList
                | AttrKind::FuncList
        )
    }
}

/// A tensor literal used as an attribute default.
///
/// Carried structurally so the generator can render the single-line
/// textual encoding the runtime's `make_tensor` accepts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TensorLiteral {
    pub dtype: ElementType,
    /// Dimension sizes, outermost first. Empty means a scalar.
    pub dims: Vec<i64>,
    /// Scalar value texts in row-major order.
    pub values: Vec<String>,
}

impl TensorLiteral {
    pub fn new(dtype: ElementType, dims: Vec<i64>, values: Vec<String>) -> Self {
        Self { dtype, dims, values }
    }
}

/// A statically-known attribute value (a default, or a default override).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrValue {
    String(String),
    Int(i64),
    Float(f32),
    Bool(bool),
    Type(ElementType),
    /// `None` is an unknown-rank shape.
    Shape(Option<Vec<i64>>),
    Tensor(TensorLiteral),
    /// A function attribute, referenced by name.
    Func(String),
    List(Vec<AttrValue>),
}

/// Declaration of one attribute of an operation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrSchema {
    pub name: String,
    pub kind: AttrKind,
    pub default: Option<AttrValue>,
    /// Permitted element types when `kind` is `Type` or `TypeList`.
    /// Empty means every known element type is accepted.
    pub allowed_types: Vec<ElementType>,
    pub description: String,
}

impl AttrSchema {
    pub fn new(name: impl Into<String>, kind: AttrKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            allowed_types: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_default(mut self, default: AttrValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_allowed_types(mut self, types: Vec<ElementType>) -> Self {
        self.allowed_types = types;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
