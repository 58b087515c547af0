use std::collections::BTreeMap;

use garde::Validate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

/// Declared label fields, in report order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldName {
    BrandName,
    ClassType,
    NetContents,
    ProducerName,
    City,
    Country,
    AlcoholContent,
    GovernmentWarning,
}

/// Operator-declared values for one label. Absent or blank means "not provided".
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct FieldValues {
    #[garde(length(max = 200))]
    pub brand_name: String,

    #[garde(length(max = 200))]
    pub class_type: String,

    #[garde(length(max = 100))]
    pub net_contents: String,

    #[garde(length(max = 200))]
    pub producer_name: String,

    #[garde(length(max = 200))]
    pub city: String,

    #[garde(length(max = 200))]
    pub country: String,

    #[garde(length(max = 100))]
    pub alcohol_content: String,
}

impl FieldValues {
    /// Declared value for a field; the government warning is never declared.
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::BrandName => &self.brand_name,
            FieldName::ClassType => &self.class_type,
            FieldName::NetContents => &self.net_contents,
            FieldName::ProducerName => &self.producer_name,
            FieldName::City => &self.city,
            FieldName::Country => &self.country,
            FieldName::AlcoholContent => &self.alcohol_content,
            FieldName::GovernmentWarning => "",
        }
    }
}

/// Outcome of verifying one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    pub input: String,
    pub passed: bool,
    /// Confidence, 0-100.
    pub score: u8,
    pub details: String,
    pub optional: bool,
}

/// Result of verifying all declared fields against one extracted text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelVerificationReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extracted_text: Option<String>,
    pub fields: BTreeMap<FieldName, FieldResult>,
    /// AND of `passed` over required fields only.
    pub overall_pass: bool,
    /// Wall-clock seconds for the whole call.
    #[serde(rename = "processing_time")]
    pub processing_time_seconds: f64,
}

impl LabelVerificationReport {
    pub fn failed_fields(&self) -> impl Iterator<Item = (FieldName, &FieldResult)> {
        self.fields
            .iter()
            .filter(|(_, result)| !result.passed)
            .map(|(name, result)| (*name, result))
    }
}
