//! Label verification core
//!
//! Checks the values an operator declared for an alcohol beverage label
//! (brand, class/type, net contents, producer, origin, alcohol content)
//! against the text an OCR engine recognized on the label image, tolerating
//! common OCR misreadings, and checks the mandatory government health
//! warning.

pub mod app_state;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
