//! Label fixtures: recognized text, declared values and the expected outcome.
//!
//! Texts are transcriptions of real OCR output, including its misreadings.

#![allow(dead_code)]

use label_verify_core::models::label::{FieldName, FieldValues};
use label_verify_core::services::warning::GOVERNMENT_WARNING;

#[derive(Debug, Clone)]
pub struct LabelFixture {
    pub name: &'static str,
    /// Recognized label text, without the health warning.
    pub label_text: &'static str,
    /// Append the canonical government warning to `label_text`.
    pub with_warning: bool,
    pub brand_name: &'static str,
    pub class_type: &'static str,
    pub net_contents: &'static str,
    pub producer_name: &'static str,
    pub city: &'static str,
    pub country: &'static str,
    pub alcohol_content: &'static str,
    pub should_pass: bool,
    /// Fields expected to fail, required or optional.
    pub failing: &'static [FieldName],
}

impl LabelFixture {
    pub fn extracted_text(&self) -> String {
        if self.with_warning {
            format!("{}\n{}", self.label_text, GOVERNMENT_WARNING)
        } else {
            self.label_text.to_string()
        }
    }

    pub fn fields(&self) -> FieldValues {
        FieldValues {
            brand_name: self.brand_name.to_string(),
            class_type: self.class_type.to_string(),
            net_contents: self.net_contents.to_string(),
            producer_name: self.producer_name.to_string(),
            city: self.city.to_string(),
            country: self.country.to_string(),
            alcohol_content: self.alcohol_content.to_string(),
        }
    }
}

const EMPTY: LabelFixture = LabelFixture {
    name: "",
    label_text: "",
    with_warning: true,
    brand_name: "",
    class_type: "",
    net_contents: "",
    producer_name: "",
    city: "",
    country: "",
    alcohol_content: "",
    should_pass: true,
    failing: &[],
};

pub const TEST_FIXTURES: &[LabelFixture] = &[
    LabelFixture {
        name: "budweiser_clean",
        label_text: "BUDWEISER\nLAGER BEER\n12 FL OZ\nALC 5% BY VOL\n\
                     BREWED BY ANHEUSER-BUSCH ST. LOUIS, MO",
        brand_name: "Budweiser",
        class_type: "Lager Beer",
        net_contents: "12 fl oz",
        producer_name: "Anheuser-Busch",
        city: "St. Louis",
        alcohol_content: "5%",
        ..EMPTY
    },
    LabelFixture {
        name: "michelob_ocr_damage",
        label_text: "MAHELEB UTTRA\nSUPERIOR LIGHT BEER\n12 FL. OZ.\n4.2% ALC/VOL",
        brand_name: "Michelob Ultra",
        class_type: "Light Beer",
        net_contents: "12 fl oz",
        alcohol_content: "4.2%",
        ..EMPTY
    },
    LabelFixture {
        name: "barefoot_glued_units",
        label_text: "BAREF00T\nCABERNETT SAUVIGNON\n750 M1\nALC. 13.5% BY VOL\n\
                     CELLARED AND BOTTLED BY BAREFOOT CELLARS, MODESTO, CA",
        brand_name: "Barefoot",
        class_type: "Cabernet Sauvignon",
        net_contents: "750 mL",
        producer_name: "Barefoot Cellars",
        city: "Modesto",
        alcohol_content: "13.5%",
        ..EMPTY
    },
    LabelFixture {
        name: "jack_daniels_spirit",
        label_text: "JACK DANIE1S\nOLD NO. 7\nTENNESSEE WHISKEY\n40% ALC/VOL (80 PROOF)\n750 ML",
        brand_name: "Jack Daniels",
        class_type: "Tennessee Whiskey",
        net_contents: "750 mL",
        alcohol_content: "40%",
        ..EMPTY
    },
    LabelFixture {
        name: "optional_country_missing",
        label_text: "BUDWEISER\nLAGER BEER\n12 FL OZ\nALC 5% BY VOL",
        brand_name: "Budweiser",
        net_contents: "12 fl oz",
        country: "Belgium",
        alcohol_content: "5%",
        failing: &[FieldName::Country],
        ..EMPTY
    },
    LabelFixture {
        name: "volume_off_by_one",
        label_text: "STONE CREEK\nCHARDONNAY\n751 ML\n13.5% ALC/VOL",
        brand_name: "Stone Creek",
        class_type: "Chardonnay",
        net_contents: "750 mL",
        alcohol_content: "13.5%",
        should_pass: false,
        failing: &[FieldName::NetContents],
        ..EMPTY
    },
    LabelFixture {
        name: "alcohol_mismatch",
        label_text: "BUDWEISER\nLAGER BEER\n12 FL OZ\nALC 5% BY VOL",
        brand_name: "Budweiser",
        net_contents: "12 fl oz",
        alcohol_content: "6%",
        should_pass: false,
        failing: &[FieldName::AlcoholContent],
        ..EMPTY
    },
    LabelFixture {
        name: "brand_mismatch",
        label_text: "BUDWEISER\nLAGER BEER\n12 FL OZ\nALC 5% BY VOL\n\
                     BREWED BY ANHEUSER-BUSCH ST. LOUIS, MO",
        brand_name: "Coors Light",
        net_contents: "12 fl oz",
        should_pass: false,
        failing: &[FieldName::BrandName],
        ..EMPTY
    },
    LabelFixture {
        name: "warning_header_missing",
        label_text: "GALLO\nCABERNET SAUVIGNON\n750 ML\nALC 13% BY VOL\n\
                     WARNING: (1) ACCORDING TO THE SURGEON GENERAL, WOMEN SHOULD NOT DRINK \
                     ALCOHOLIC BEVERAGES DURING PREGNANCY BECAUSE OF THE RISK OF BIRTH \
                     DEFECTS. (2) CONSUMPTION OF ALCOHOLIC BEVERAGES IMPAIRS YOUR ABILITY \
                     TO DRIVE A CAR OR OPERATE MACHINERY, AND MAY CAUSE HEALTH PROBLEMS.",
        with_warning: false,
        brand_name: "Gallo",
        class_type: "Cabernet Sauvignon",
        net_contents: "750 mL",
        alcohol_content: "13%",
        should_pass: false,
        failing: &[FieldName::GovernmentWarning],
        ..EMPTY
    },
];

/// Fixture lookup by name; panics on unknown names.
pub fn fixture(name: &str) -> &'static LabelFixture {
    TEST_FIXTURES
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("unknown fixture {name}"))
}
