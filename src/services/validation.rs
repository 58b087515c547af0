use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info};

use crate::models::label::{FieldName, FieldResult, FieldValues, LabelVerificationReport};
use crate::services::corrections::CorrectionCategory;
use crate::services::field_verifiers::{self, FuzzyPolicy, Verdict};
use crate::services::warning::{self, WARNING_COVERAGE_THRESHOLD};

/// Verification problems surfaced as report or field details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("No text extracted from label")]
    EmptyExtraction,

    #[error("Could not parse input {quantity}")]
    UnparsableNumeric { quantity: &'static str },
}

/// Whether a field's outcome counts toward `overall_pass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
    /// Optional when not declared, required once a value is given.
    RequiredIfProvided,
}

/// Verification strategy for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    FuzzyContainment(FuzzyPolicy),
    Location { label: &'static str, threshold: u8 },
    NetContents,
    AlcoholContent,
    GovernmentWarning { threshold: u8 },
}

/// Static policy for one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub requirement: Requirement,
    pub category: Option<CorrectionCategory>,
    pub strategy: Strategy,
}

/// Field policy table, in report order.
pub static FIELD_SPECS: [FieldSpec; 8] = [
    FieldSpec {
        name: FieldName::BrandName,
        requirement: Requirement::Required,
        category: Some(CorrectionCategory::Brand),
        strategy: Strategy::FuzzyContainment(FuzzyPolicy {
            label: "Brand",
            threshold: 80,
            min_word_len: 2,
        }),
    },
    FieldSpec {
        name: FieldName::ClassType,
        requirement: Requirement::Required,
        category: Some(CorrectionCategory::Type),
        strategy: Strategy::FuzzyContainment(FuzzyPolicy {
            label: "Type",
            threshold: 75,
            min_word_len: 3,
        }),
    },
    FieldSpec {
        name: FieldName::NetContents,
        requirement: Requirement::Required,
        category: Some(CorrectionCategory::Volume),
        strategy: Strategy::NetContents,
    },
    FieldSpec {
        name: FieldName::ProducerName,
        requirement: Requirement::Required,
        category: Some(CorrectionCategory::Brand),
        strategy: Strategy::FuzzyContainment(FuzzyPolicy {
            label: "Producer",
            threshold: 75,
            min_word_len: 3,
        }),
    },
    FieldSpec {
        name: FieldName::City,
        requirement: Requirement::Optional,
        category: None,
        strategy: Strategy::Location {
            label: "City",
            threshold: 70,
        },
    },
    FieldSpec {
        name: FieldName::Country,
        requirement: Requirement::Optional,
        category: None,
        strategy: Strategy::Location {
            label: "Country",
            threshold: 70,
        },
    },
    FieldSpec {
        name: FieldName::AlcoholContent,
        requirement: Requirement::RequiredIfProvided,
        category: Some(CorrectionCategory::Alcohol),
        strategy: Strategy::AlcoholContent,
    },
    FieldSpec {
        name: FieldName::GovernmentWarning,
        requirement: Requirement::Required,
        category: Some(CorrectionCategory::Warning),
        strategy: Strategy::GovernmentWarning {
            threshold: WARNING_COVERAGE_THRESHOLD,
        },
    },
];

/// Policy for a field name.
pub fn field_spec(name: FieldName) -> &'static FieldSpec {
    // FIELD_SPECS is indexed in FieldName declaration order.
    &FIELD_SPECS[name as usize]
}

impl FieldSpec {
    fn is_optional(&self, provided: bool) -> bool {
        match self.requirement {
            Requirement::Required => false,
            Requirement::Optional => true,
            Requirement::RequiredIfProvided => !provided,
        }
    }

    /// Run this field's strategy. The warning is always evaluated; any other
    /// field with no declared value has nothing to verify and passes.
    pub fn verify(&self, input: &str, extracted_text: &str) -> FieldResult {
        let provided = !input.trim().is_empty();
        let optional = self.is_optional(provided);

        let verdict = match self.strategy {
            Strategy::GovernmentWarning { threshold } => {
                warning::verify_government_warning(extracted_text, threshold)
            }
            _ if !provided => Verdict::pass(100, "Field not provided"),
            Strategy::FuzzyContainment(policy) => field_verifiers::verify_fuzzy_containment(
                input,
                extracted_text,
                self.category,
                &policy,
            ),
            Strategy::Location { label, threshold } => {
                field_verifiers::verify_location(input, extracted_text, label, threshold)
            }
            Strategy::NetContents => field_verifiers::verify_net_contents(input, extracted_text),
            Strategy::AlcoholContent => {
                field_verifiers::verify_alcohol_content(input, extracted_text)
            }
        };

        FieldResult {
            input: match self.strategy {
                Strategy::GovernmentWarning { .. } => "Required".to_string(),
                _ => input.to_string(),
            },
            passed: verdict.passed,
            score: verdict.score,
            details: verdict.details,
            optional,
        }
    }
}

/// Verify declared field values against the text recognized from a label.
///
/// Runs every field in [`FIELD_SPECS`] independently and sets
/// `overall_pass` to the AND of `passed` over non-optional fields. Empty
/// extracted text short-circuits to an unsuccessful report with no fields.
pub fn verify_label(extracted_text: &str, values: &FieldValues) -> LabelVerificationReport {
    let start = Instant::now();

    if extracted_text.trim().is_empty() {
        info!("Verification aborted: empty extracted text");
        return LabelVerificationReport {
            success: false,
            error: Some(VerificationError::EmptyExtraction.to_string()),
            extracted_text: None,
            fields: BTreeMap::new(),
            overall_pass: false,
            processing_time_seconds: start.elapsed().as_secs_f64(),
        };
    }

    let mut fields = BTreeMap::new();
    for spec in &FIELD_SPECS {
        let result = spec.verify(values.get(spec.name), extracted_text);
        debug!(
            field = %spec.name,
            passed = result.passed,
            score = result.score,
            details = %result.details,
            "Field verified"
        );
        fields.insert(spec.name, result);
    }

    let overall_pass = fields
        .values()
        .filter(|result| !result.optional)
        .all(|result| result.passed);

    let report = LabelVerificationReport {
        success: true,
        error: None,
        extracted_text: Some(extracted_text.to_string()),
        fields,
        overall_pass,
        processing_time_seconds: start.elapsed().as_secs_f64(),
    };

    info!(
        overall_pass = report.overall_pass,
        failed_fields = report.failed_fields().count(),
        text_chars = extracted_text.chars().count(),
        processing_ms = (report.processing_time_seconds * 1000.0) as u64,
        "Label verification complete"
    );

    report
}
