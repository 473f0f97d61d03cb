//! The subset of the Core ML model spec needed to describe a model's
//! interface. Field tags follow `Model.proto` / `FeatureTypes.proto`; every
//! other field of the spec is skipped on decode.

use std::collections::HashMap;

#[derive(Clone, PartialEq, prost::Message)]
pub struct Model {
    #[prost(int32, tag = "1")]
    pub specification_version: i32,
    #[prost(message, optional, tag = "2")]
    pub description: Option<ModelDescription>,
    #[prost(bool, tag = "10")]
    pub is_updatable: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ModelDescription {
    #[prost(message, repeated, tag = "1")]
    pub input: Vec<FeatureDescription>,
    #[prost(message, repeated, tag = "10")]
    pub output: Vec<FeatureDescription>,
    #[prost(string, tag = "11")]
    pub predicted_feature_name: String,
    #[prost(string, tag = "12")]
    pub predicted_probabilities_name: String,
    #[prost(message, optional, tag = "100")]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Metadata {
    #[prost(string, tag = "1")]
    pub short_description: String,
    #[prost(string, tag = "2")]
    pub version_string: String,
    #[prost(string, tag = "3")]
    pub author: String,
    #[prost(string, tag = "4")]
    pub license: String,
    #[prost(map = "string, string", tag = "100")]
    pub user_defined: HashMap<String, String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FeatureDescription {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub short_description: String,
    #[prost(message, optional, tag = "3")]
    pub r#type: Option<FeatureType>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FeatureType {
    #[prost(oneof = "feature_type::Kind", tags = "1, 2, 3, 4, 5, 6, 7")]
    pub kind: Option<feature_type::Kind>,
    #[prost(bool, tag = "1000")]
    pub is_optional: bool,
}

pub mod feature_type {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "1")]
        Int64Type(super::Int64FeatureType),
        #[prost(message, tag = "2")]
        DoubleType(super::DoubleFeatureType),
        #[prost(message, tag = "3")]
        StringType(super::StringFeatureType),
        #[prost(message, tag = "4")]
        ImageType(super::ImageFeatureType),
        #[prost(message, tag = "5")]
        MultiArrayType(super::ArrayFeatureType),
        #[prost(message, tag = "6")]
        DictionaryType(super::DictionaryFeatureType),
        #[prost(message, tag = "7")]
        SequenceType(super::SequenceFeatureType),
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Int64FeatureType {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DoubleFeatureType {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct StringFeatureType {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ImageFeatureType {
    #[prost(int64, tag = "1")]
    pub width: i64,
    #[prost(int64, tag = "2")]
    pub height: i64,
    /// `ColorSpace` enum value.
    #[prost(int32, tag = "3")]
    pub color_space: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ArrayFeatureType {
    #[prost(int64, repeated, tag = "1")]
    pub shape: Vec<i64>,
    /// `ArrayDataType` enum value.
    #[prost(int32, tag = "2")]
    pub data_type: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DictionaryFeatureType {
    #[prost(oneof = "key_type::KeyType", tags = "1, 2")]
    pub key_type: Option<key_type::KeyType>,
}

pub mod key_type {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum KeyType {
        #[prost(message, tag = "1")]
        Int64Type(super::Int64FeatureType),
        #[prost(message, tag = "2")]
        StringType(super::StringFeatureType),
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SequenceFeatureType {
    #[prost(oneof = "sequence_type::ElementType", tags = "1, 3")]
    pub element_type: Option<sequence_type::ElementType>,
}

pub mod sequence_type {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum ElementType {
        #[prost(message, tag = "1")]
        Int64Type(super::Int64FeatureType),
        #[prost(message, tag = "3")]
        StringType(super::StringFeatureType),
    }
}
