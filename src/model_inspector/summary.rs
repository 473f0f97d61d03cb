use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use super::proto::{
    feature_type::Kind, key_type::KeyType, sequence_type::ElementType, FeatureDescription,
    FeatureType, Model,
};
use crate::error::{Result, RiskError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSummary {
    pub name: String,
    pub kind: String,
    pub optional: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelMetadata {
    pub short_description: String,
    pub version: String,
    pub author: String,
    pub license: String,
    pub user_defined: BTreeMap<String, String>,
}

/// Interface of a model: what it takes, what it returns, who made it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub specification_version: i32,
    pub updatable: bool,
    pub inputs: Vec<FeatureSummary>,
    pub outputs: Vec<FeatureSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_feature: Option<String>,
    pub metadata: ModelMetadata,
}

impl ModelSummary {
    pub fn from_model(model: &Model) -> Result<Self> {
        let description = model
            .description
            .as_ref()
            .ok_or(RiskError::MissingDescription)?;
        let metadata = description
            .metadata
            .as_ref()
            .map(|meta| ModelMetadata {
                short_description: meta.short_description.clone(),
                version: meta.version_string.clone(),
                author: meta.author.clone(),
                license: meta.license.clone(),
                user_defined: meta
                    .user_defined
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            })
            .unwrap_or_default();

        Ok(ModelSummary {
            specification_version: model.specification_version,
            updatable: model.is_updatable,
            inputs: description.input.iter().map(summarize_feature).collect(),
            outputs: description.output.iter().map(summarize_feature).collect(),
            predicted_feature: Some(description.predicted_feature_name.clone())
                .filter(|name| !name.is_empty()),
            metadata,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Model ===");
        let _ = writeln!(out, "Specification version: {}", self.specification_version);
        if !self.metadata.short_description.is_empty() {
            let _ = writeln!(out, "Description: {}", self.metadata.short_description);
        }
        for (label, value) in [
            ("Version", &self.metadata.version),
            ("Author", &self.metadata.author),
            ("License", &self.metadata.license),
        ] {
            if !value.is_empty() {
                let _ = writeln!(out, "{}: {}", label, value);
            }
        }
        if let Some(name) = &self.predicted_feature {
            let _ = writeln!(out, "Predicted feature: {}", name);
        }
        if self.updatable {
            let _ = writeln!(out, "Updatable: yes");
        }

        render_features(&mut out, "Inputs", &self.inputs);
        render_features(&mut out, "Outputs", &self.outputs);

        let _ = writeln!(out, "\n=== User-defined metadata ===");
        if self.metadata.user_defined.is_empty() {
            let _ = writeln!(out, "(none)");
        }
        for (key, value) in &self.metadata.user_defined {
            let _ = writeln!(out, "- {}: {}", key, value);
        }
        out
    }
}

fn render_features(out: &mut String, title: &str, features: &[FeatureSummary]) {
    let _ = writeln!(out, "\n=== {} ===", title);
    if features.is_empty() {
        let _ = writeln!(out, "(none)");
    }
    for feature in features {
        let optional = if feature.optional { " (optional)" } else { "" };
        let _ = write!(out, "- {}: {}{}", feature.name, feature.kind, optional);
        if !feature.description.is_empty() {
            let _ = write!(out, " - {}", feature.description);
        }
        out.push('\n');
    }
}

fn summarize_feature(feature: &FeatureDescription) -> FeatureSummary {
    FeatureSummary {
        name: feature.name.clone(),
        kind: describe_type(feature.r#type.as_ref()),
        optional: feature.r#type.as_ref().map_or(false, |t| t.is_optional),
        description: feature.short_description.clone(),
    }
}

fn describe_type(feature_type: Option<&FeatureType>) -> String {
    let Some(kind) = feature_type.and_then(|t| t.kind.as_ref()) else {
        return "unknown".to_string();
    };
    match kind {
        Kind::Int64Type(_) => "int64".to_string(),
        Kind::DoubleType(_) => "double".to_string(),
        Kind::StringType(_) => "string".to_string(),
        Kind::ImageType(image) => format!(
            "image {}x{} {}",
            image.width,
            image.height,
            color_space_name(image.color_space)
        ),
        Kind::MultiArrayType(array) => {
            let shape = array
                .shape
                .iter()
                .map(|dim| dim.to_string())
                .collect::<Vec<_>>()
                .join("x");
            format!(
                "multiarray<{}> [{}]",
                array_data_type_name(array.data_type),
                shape
            )
        }
        Kind::DictionaryType(dict) => match dict.key_type {
            Some(KeyType::Int64Type(_)) => "dictionary<int64, double>".to_string(),
            Some(KeyType::StringType(_)) => "dictionary<string, double>".to_string(),
            None => "dictionary".to_string(),
        },
        Kind::SequenceType(seq) => match seq.element_type {
            Some(ElementType::Int64Type(_)) => "sequence<int64>".to_string(),
            Some(ElementType::StringType(_)) => "sequence<string>".to_string(),
            None => "sequence".to_string(),
        },
    }
}

fn color_space_name(value: i32) -> &'static str {
    match value {
        10 => "grayscale",
        20 => "rgb",
        30 => "bgr",
        40 => "grayscale-f16",
        _ => "invalid",
    }
}

fn array_data_type_name(value: i32) -> &'static str {
    match value {
        65552 => "float16",
        65568 => "float32",
        65600 => "double",
        131104 => "int32",
        _ => "invalid",
    }
}
