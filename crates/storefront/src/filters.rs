//! Askama filters for the page chrome.
//!
//! Both ignore their input; templates call them as `{{ ""|stylesheet_href }}`.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::Datelike;

/// URL of the stylesheet, fingerprinted by the build script when possible.
#[must_use]
pub const fn main_stylesheet() -> &'static str {
    env!("MAIN_CSS_HREF")
}

/// Year shown in the footer copyright line.
#[must_use]
pub fn copyright_year() -> i32 {
    chrono::Utc::now().year()
}

#[askama::filter_fn]
pub fn stylesheet_href(
    _value: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(main_stylesheet())
}

#[askama::filter_fn]
pub fn footer_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(copyright_year())
}
