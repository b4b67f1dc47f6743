//! 節點的宣告式描述：操作選項與欄位定義，序列化後交由宿主的渲染層使用。

use crate::domain::model::Operation;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub display_name: String,
    pub name: String,
    pub description: String,
    pub version: u32,
    pub credentials: Vec<CredentialRef>,
    pub properties: Vec<PropertyDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRef {
    pub name: String,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<ChoiceDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub properties: Vec<PropertyDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
    /// 渲染層應以密碼欄位呈現
    #[serde(skip_serializing_if = "is_false")]
    pub masked: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    String,
    Options,
    Boolean,
    Collection,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceDescriptor {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 顯示條件以資料表示，由渲染層解讀
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    pub show: HashMap<String, Vec<String>>,
}

impl PropertyDescriptor {
    fn base(display_name: &str, name: &str, kind: PropertyKind) -> Self {
        Self {
            display_name: display_name.to_string(),
            name: name.to_string(),
            kind,
            default: None,
            required: false,
            description: None,
            placeholder: None,
            options: Vec::new(),
            properties: Vec::new(),
            display_options: None,
            masked: false,
        }
    }

    pub fn masked_string(display_name: &str, name: &str) -> Self {
        Self {
            masked: true,
            ..Self::base(display_name, name, PropertyKind::String)
        }
    }
}

fn choice(name: &str, value: &str, description: Option<&str>) -> ChoiceDescriptor {
    ChoiceDescriptor {
        name: name.to_string(),
        value: value.to_string(),
        description: description.map(str::to_string),
    }
}

fn show_for_remove_background() -> Option<DisplayOptions> {
    Some(DisplayOptions {
        show: HashMap::from([(
            "operation".to_string(),
            vec![Operation::REMOVE_BACKGROUND.to_string()],
        )]),
    })
}

pub fn descriptor() -> NodeDescriptor {
    let operation = PropertyDescriptor {
        default: Some(json!(Operation::REMOVE_BACKGROUND)),
        required: true,
        options: vec![
            choice(
                "Remove Background",
                Operation::REMOVE_BACKGROUND,
                Some("Remove background from an image"),
            ),
            choice(
                "Get Account",
                Operation::GET_ACCOUNT,
                Some("Get account information and credit usage"),
            ),
        ],
        ..PropertyDescriptor::base("Operation", "operation", PropertyKind::Options)
    };

    let binary_property = PropertyDescriptor {
        default: Some(json!("data")),
        required: true,
        description: Some("Name of the binary property containing the image to process".to_string()),
        display_options: show_for_remove_background(),
        ..PropertyDescriptor::base("Input Binary Field", "binaryPropertyName", PropertyKind::String)
    };

    let output_binary_property = PropertyDescriptor {
        default: Some(json!("data")),
        required: true,
        description: Some("Name of the binary property to store the processed image".to_string()),
        display_options: show_for_remove_background(),
        ..PropertyDescriptor::base(
            "Output Binary Field",
            "outputBinaryPropertyName",
            PropertyKind::String,
        )
    };

    let format = PropertyDescriptor {
        default: Some(json!("png")),
        description: Some("Output image format".to_string()),
        options: vec![
            choice("PNG", "png", None),
            choice("JPG", "jpg", None),
            choice("WebP", "webp", None),
        ],
        ..PropertyDescriptor::base("Format", "format", PropertyKind::Options)
    };

    let channels = PropertyDescriptor {
        default: Some(json!("rgba")),
        description: Some(
            "Output color channels. Use RGBA for transparency, RGB for opaque background."
                .to_string(),
        ),
        options: vec![
            choice("RGBA (Transparent)", "rgba", None),
            choice("RGB (Opaque)", "rgb", None),
        ],
        ..PropertyDescriptor::base("Channels", "channels", PropertyKind::Options)
    };

    let bg_color = PropertyDescriptor {
        default: Some(json!("")),
        description: Some(
            "Background color (hex, rgb, or color name). Only applies when channels is RGB."
                .to_string(),
        ),
        placeholder: Some("#ffffff".to_string()),
        ..PropertyDescriptor::base("Background Color", "bg_color", PropertyKind::String)
    };

    let size = PropertyDescriptor {
        default: Some(json!("full")),
        description: Some("Output image size preset".to_string()),
        options: vec![
            choice("Full", "full", None),
            choice("Preview", "preview", None),
            choice("Small", "small", None),
            choice("Medium", "medium", None),
            choice("Large", "large", None),
        ],
        ..PropertyDescriptor::base("Size", "size", PropertyKind::Options)
    };

    let crop = PropertyDescriptor {
        default: Some(json!(false)),
        description: Some("Whether to crop the image to the subject bounds".to_string()),
        ..PropertyDescriptor::base("Crop to Subject", "crop", PropertyKind::Boolean)
    };

    let options = PropertyDescriptor {
        default: Some(json!({})),
        display_options: show_for_remove_background(),
        properties: vec![format, channels, bg_color, size, crop],
        ..PropertyDescriptor::base("Options", "options", PropertyKind::Collection)
    };

    NodeDescriptor {
        display_name: "Poof".to_string(),
        name: "poof".to_string(),
        description: "Remove backgrounds from images with Poof API".to_string(),
        version: 1,
        credentials: vec![CredentialRef {
            name: crate::credentials::CREDENTIAL_NAME.to_string(),
            required: true,
        }],
        properties: vec![operation, binary_property, output_binary_property, options],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let value = serde_json::to_value(descriptor()).unwrap();
        assert_eq!(value["displayName"], "Poof");
        assert_eq!(value["name"], "poof");
        assert_eq!(value["credentials"][0]["name"], "poofApi");
        assert_eq!(value["properties"][0]["name"], "operation");
        assert_eq!(value["properties"][0]["type"], "options");
    }

    #[test]
    fn test_operation_choices_and_default() {
        let value = serde_json::to_value(descriptor()).unwrap();
        let operation = &value["properties"][0];
        assert_eq!(operation["default"], "removeBackground");
        let choices: Vec<&str> = operation["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["value"].as_str().unwrap())
            .collect();
        assert_eq!(choices, vec!["removeBackground", "getAccount"]);
    }

    #[test]
    fn test_binary_fields_only_shown_for_remove_background() {
        let value = serde_json::to_value(descriptor()).unwrap();
        for index in [1, 2, 3] {
            let shown_for = &value["properties"][index]["displayOptions"]["show"]["operation"];
            assert_eq!(shown_for[0], "removeBackground");
        }
    }

    #[test]
    fn test_options_collection_covers_all_removal_options() {
        let value = serde_json::to_value(descriptor()).unwrap();
        let options = &value["properties"][3];
        assert_eq!(options["type"], "collection");
        let names: Vec<&str> = options["properties"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["format", "channels", "bg_color", "size", "crop"]);
        let crop = &options["properties"][4];
        assert_eq!(crop["type"], "boolean");
        assert_eq!(crop["default"], false);
    }
}
