//! Operation schemas: typed input/output slots and their attributes.

use crate::attr::AttrSchema;
use crate::dtype::ElementType;

/// How an input or output slot is typed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotType {
    /// A concrete element type.
    Fixed(ElementType),
    /// The element type is the value of the named `type` attribute.
    Attr(String),
    /// A heterogeneous list whose element types are the value of the named
    /// `list(type)` attribute. The slot is list-valued.
    List(String),
}

/// One input or output slot of an operation.
///
/// A slot referencing a length attribute (`number_attr`) is a homogeneous
/// list of that many tensors; a `SlotType::List` slot is a heterogeneous
/// list. Every referenced attribute must be declared on the same operation;
/// the registry guarantees this before generation begins.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArgSlot {
    pub name: String,
    pub slot_type: SlotType,
    /// Name of the `int` attribute holding this slot's list length.
    pub number_attr: Option<String>,
    /// Mutable/reference slots are rejected by the eager fast path.
    pub is_ref: bool,
    pub description: String,
}

impl ArgSlot {
    /// A slot with a concrete element type.
    pub fn fixed(name: impl Into<String>, dtype: ElementType) -> Self {
        Self {
            name: name.into(),
            slot_type: SlotType::Fixed(dtype),
            number_attr: None,
            is_ref: false,
            description: String::new(),
        }
    }

    /// A slot typed by a `type` attribute.
    pub fn typed(name: impl Into<String>, type_attr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot_type: SlotType::Attr(type_attr.into()),
            number_attr: None,
            is_ref: false,
            description: String::new(),
        }
    }

    /// A heterogeneous list slot typed by a `list(type)` attribute.
    pub fn type_list(name: impl Into<String>, type_list_attr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot_type: SlotType::List(type_list_attr.into()),
            number_attr: None,
            is_ref: false,
            description: String::new(),
        }
    }

    /// Mark this slot as a homogeneous list whose length is the named
    /// `int` attribute.
    pub fn with_number_attr(mut self, attr: impl Into<String>) -> Self {
        self.number_attr = Some(attr.into());
        self
    }

    /// Mark this slot as a mutable/reference slot.
    pub fn with_ref(mut self) -> Self {
        self.is_ref = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether this slot holds a list of tensors rather than one tensor.
    pub fn is_list(&self) -> bool {
        self.number_attr.is_some() || matches!(self.slot_type, SlotType::List(_))
    }

    /// The `type` attribute this slot's element type is inferred from.
    pub fn type_attr(&self) -> Option<&str> {
        match &self.slot_type {
            SlotType::Attr(name) => Some(name),
            SlotType::Fixed(_) | SlotType::List(_) => None,
        }
    }

    /// The `list(type)` attribute this slot's element types are inferred from.
    pub fn type_list_attr(&self) -> Option<&str> {
        match &self.slot_type {
            SlotType::List(name) => Some(name),
            SlotType::Fixed(_) | SlotType::Attr(_) => None,
        }
    }
}

/// Schema of one operation: identity, slots, attributes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpSchema {
    pub name: String,
    pub inputs: Vec<ArgSlot>,
    pub outputs: Vec<ArgSlot>,
    pub attrs: Vec<AttrSchema>,
    pub is_stateful: bool,
    pub summary: String,
    pub description: String,
}

impl OpSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            attrs: Vec::new(),
            is_stateful: false,
            summary: String::new(),
            description: String::new(),
        }
    }

    pub fn input(mut self, slot: ArgSlot) -> Self {
        self.inputs.push(slot);
        self
    }

    pub fn output(mut self, slot: ArgSlot) -> Self {
        self.outputs.push(slot);
        self
    }

    pub fn attr(mut self, attr: AttrSchema) -> Self {
        self.attrs.push(attr);
        self
    }

    pub fn stateful(mut self) -> Self {
        self.is_stateful = true;
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Look up a declared attribute by name.
    pub fn find_attr(&self, name: &str) -> Option<&AttrSchema> {
        self.attrs.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slot_kinds() {
        let solo = ArgSlot::fixed("x", ElementType::Int32);
        assert!(!solo.is_list());
        assert_eq!(solo.type_attr(), None);

        let homo = ArgSlot::typed("values", "T").with_number_attr("N");
        assert!(homo.is_list());
        assert_eq!(homo.type_attr(), Some("T"));
        assert_eq!(homo.number_attr.as_deref(), Some("N"));

        let hetero = ArgSlot::type_list("components", "Ts");
        assert!(hetero.is_list());
        assert_eq!(hetero.type_list_attr(), Some("Ts"));
    }

    #[test]
    fn test_op_builder() {
        let op = OpSchema::new("Pack")
            .input(ArgSlot::typed("values", "T").with_number_attr("N"))
            .output(ArgSlot::typed("output", "T"))
            .attr(AttrSchema::new("N", AttrKind::Int))
            .attr(AttrSchema::new("T", AttrKind::Type))
            .with_summary("Packs tensors.");
        assert_eq!(op.name, "Pack");
        assert_eq!(op.inputs.len(), 1);
        assert_eq!(op.outputs.len(), 1);
        assert!(op.find_attr("T").is_some());
        assert!(op.find_attr("missing").is_none());
        assert!(!op.is_stateful);
    }
}
