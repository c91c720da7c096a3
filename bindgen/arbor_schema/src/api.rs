//! Per-operation API customization.
//!
//! A customization refines exactly one operation schema: visibility tier,
//! renames, default overrides, and parameter ordering. Absence of a
//! customization means identity renames and the visible tier.

use rustc_hash::FxHashMap;

use crate::attr::AttrValue;

/// Visibility tier of an operation in the generated API.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    #[default]
    Visible,
    /// Emitted under an underscore-prefixed name.
    Hidden,
    /// Not emitted at all.
    Skip,
}

/// Customization applied to one operation's generated API.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApiCustomization {
    pub visibility: Visibility,
    /// Export endpoint names. Empty means the single default endpoint,
    /// the snake-case function name.
    pub endpoints: Vec<String>,
    /// Input slot renames, keyed by schema name.
    pub arg_renames: FxHashMap<String, String>,
    /// Attribute renames, keyed by schema name.
    pub attr_renames: FxHashMap<String, String>,
    /// Attribute default overrides, keyed by schema name.
    pub attr_defaults: FxHashMap<String, AttrValue>,
    /// Input ordering override (schema names). Empty means schema order.
    pub arg_order: Vec<String>,
}

impl ApiCustomization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.push(endpoint.into());
        self
    }

    pub fn rename_arg(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.arg_renames.insert(from.into(), to.into());
        self
    }

    pub fn rename_attr(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.attr_renames.insert(from.into(), to.into());
        self
    }

    pub fn override_attr_default(mut self, attr: impl Into<String>, value: AttrValue) -> Self {
        self.attr_defaults.insert(attr.into(), value);
        self
    }

    pub fn with_arg_order(mut self, order: Vec<String>) -> Self {
        self.arg_order = order;
        self
    }

    /// The rendered name of an input slot.
    pub fn arg_name<'a>(&'a self, schema_name: &'a str) -> &'a str {
        self.arg_renames
            .get(schema_name)
            .map_or(schema_name, String::as_str)
    }

    /// The rendered name of an attribute.
    pub fn attr_name<'a>(&'a self, schema_name: &'a str) -> &'a str {
        self.attr_renames
            .get(schema_name)
            .map_or(schema_name, String::as_str)
    }

    /// The effective default of an attribute, preferring the override.
    pub fn attr_default<'a>(&'a self, schema_name: &'a str, schema_default: Option<&'a AttrValue>) -> Option<&'a AttrValue> {
        self.attr_defaults.get(schema_name).or(schema_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identity_customization() {
        let api = ApiCustomization::new();
        assert_eq!(api.visibility, Visibility::Visible);
        assert_eq!(api.arg_name("x"), "x");
        assert_eq!(api.attr_name("T"), "T");
        assert!(api.attr_default("T", None).is_none());
    }

    #[test]
    fn test_renames_and_overrides() {
        let api = ApiCustomization::new()
            .rename_arg("input", "x")
            .rename_attr("keep_dims", "keepdims")
            .override_attr_default("keep_dims", AttrValue::Bool(true));
        assert_eq!(api.arg_name("input"), "x");
        assert_eq!(api.attr_name("keep_dims"), "keepdims");

        let schema_default = AttrValue::Bool(false);
        assert_eq!(
            api.attr_default("keep_dims", Some(&schema_default)),
            Some(&AttrValue::Bool(true))
        );
        assert_eq!(
            api.attr_default("other", Some(&schema_default)),
            Some(&AttrValue::Bool(false))
        );
    }
}
