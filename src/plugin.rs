//! Registration descriptor handed to the hosting form engine.
use std::collections::BTreeMap;

pub const ELEMENT_NAME: &str = "arcgis-geocoder-plugin";

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMeta {
    pub control_name: String,
    pub fallback_disable_submit: bool,
    pub icon_url: String,
    pub version: String,
    pub properties: BTreeMap<String, PropertyMeta>,
    pub standard_properties: StandardProperties,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMeta {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_value_field: bool,
}

impl PropertyMeta {
    fn string(title: &str) -> Self {
        Self {
            kind: "string".to_string(),
            title: title.to_string(),
            is_value_field: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardProperties {
    pub field_label: bool,
    pub description: bool,
    pub default_value: bool,
    pub read_only: bool,
}

/// Descriptor for the geocoder control: an `address` input and the
/// `coordinates` value field.
pub fn meta_config() -> PluginMeta {
    let mut properties = BTreeMap::new();
    properties.insert("address".to_string(), PropertyMeta::string("Address"));
    properties.insert(
        "coordinates".to_string(),
        PropertyMeta {
            is_value_field: true,
            ..PropertyMeta::string("Coordinates")
        },
    );

    PluginMeta {
        control_name: "ArcGIS Geocoder".to_string(),
        fallback_disable_submit: false,
        icon_url: "one-line-text".to_string(),
        version: "1".to_string(),
        properties,
        standard_properties: StandardProperties {
            field_label: true,
            description: true,
            default_value: true,
            read_only: true,
        },
    }
}
