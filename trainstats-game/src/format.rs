//! Display helpers for stat readouts and failures.
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::error::Error;

use crate::error::StatsError;
use crate::numbers::{floor_f64_to_i64, i64_to_f64};

const GENERIC_FAILURE: &str = "Error: unknown failure";

/// Glyph set used for fractional parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FractionGlyphs {
    /// Unicode vulgar fractions (`⅓`, `⅔`, `½`).
    #[default]
    Unicode,
    /// HTML character entities (`&frac13;`, `&frac23;`, `&frac12;`).
    Html,
}

impl FractionGlyphs {
    #[must_use]
    pub const fn one_third(self) -> &'static str {
        match self {
            Self::Unicode => "⅓",
            Self::Html => "&frac13;",
        }
    }

    #[must_use]
    pub const fn two_thirds(self) -> &'static str {
        match self {
            Self::Unicode => "⅔",
            Self::Html => "&frac23;",
        }
    }

    #[must_use]
    pub const fn one_half(self) -> &'static str {
        match self {
            Self::Unicode => "½",
            Self::Html => "&frac12;",
        }
    }
}

fn with_glyph(whole: i64, glyph: &str) -> String {
    if whole == 0 {
        glyph.to_string()
    } else {
        format!("{whole}{glyph}")
    }
}

/// Render `x` to the nearest third, e.g. `2⅓`.
#[must_use]
pub fn round_to_third(x: f64) -> String {
    round_to_third_with(x, FractionGlyphs::Unicode)
}

/// Render `x` to the nearest third using the given glyph set.
///
/// A remainder of at most 1/6 rounds down, at most 1/2 becomes one third, at
/// most 5/6 becomes two thirds, and anything above rounds up.
#[must_use]
pub fn round_to_third_with(x: f64, glyphs: FractionGlyphs) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let whole = floor_f64_to_i64(x);
    let remainder = x - i64_to_f64(whole);
    if remainder <= 1.0 / 6.0 {
        whole.to_string()
    } else if remainder <= 1.0 / 2.0 {
        with_glyph(whole, glyphs.one_third())
    } else if remainder <= 5.0 / 6.0 {
        with_glyph(whole, glyphs.two_thirds())
    } else {
        (whole + 1).to_string()
    }
}

/// Render `x` to the nearest half, e.g. `15½`.
#[must_use]
pub fn round_to_half(x: f64) -> String {
    round_to_half_with(x, FractionGlyphs::Unicode)
}

/// Render `x` to the nearest half using the given glyph set.
///
/// A remainder of at most 1/4 rounds down, at most 3/4 becomes a half, and
/// anything above rounds up.
#[must_use]
pub fn round_to_half_with(x: f64, glyphs: FractionGlyphs) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let whole = floor_f64_to_i64(x);
    let remainder = x - i64_to_f64(whole);
    if remainder <= 1.0 / 4.0 {
        whole.to_string()
    } else if remainder <= 3.0 / 4.0 {
        with_glyph(whole, glyphs.one_half())
    } else {
        (whole + 1).to_string()
    }
}

/// Describe an error for display.
///
/// Uses the error's own message; an error with an empty message is described
/// through its source instead.
#[must_use]
pub fn describe_error(error: &(dyn Error + 'static)) -> String {
    let message = error.to_string();
    if !message.is_empty() {
        return format!("Error: {message}");
    }
    error
        .source()
        .map_or_else(|| GENERIC_FAILURE.to_string(), describe_error)
}

/// Describe an arbitrary caught failure, such as a panic payload, for display.
///
/// Known error types are described through [`describe_error`]; `anyhow` errors
/// include their context chain. String payloads are shown verbatim behind a
/// generic `Error:` tag.
#[must_use]
pub fn describe_failure(failure: &(dyn Any + Send)) -> String {
    if let Some(error) = failure.downcast_ref::<StatsError>() {
        return describe_error(error);
    }
    if let Some(error) = failure.downcast_ref::<anyhow::Error>() {
        let chain = format!("{error:#}");
        if chain.is_empty() {
            return describe_error(&**error);
        }
        return format!("Error: {chain}");
    }
    if let Some(error) = failure.downcast_ref::<Box<dyn Error + Send + Sync>>() {
        return describe_error(&**error);
    }
    if let Some(error) = failure.downcast_ref::<Box<dyn Error + Send>>() {
        return describe_error(&**error);
    }
    if let Some(message) = failure.downcast_ref::<&str>() {
        return format!("Error: {message}");
    }
    if let Some(message) = failure.downcast_ref::<String>() {
        return format!("Error: {message}");
    }
    GENERIC_FAILURE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::EngineKind;
    use std::fmt;

    #[test]
    fn third_boundaries_are_inclusive_below() {
        assert_eq!(round_to_third(13.0 / 6.0), "2");
        assert_eq!(round_to_third(2.1667), "2⅓");
        assert_eq!(round_to_third(2.5), "2⅓");
        assert_eq!(round_to_third(2.51), "2⅔");
        assert_eq!(round_to_third(2.9), "3");
        assert_eq!(round_to_third(3.0), "3");
    }

    #[test]
    fn third_omits_zero_whole_part() {
        assert_eq!(round_to_third(1.0 / 3.0), "⅓");
        assert_eq!(round_to_third(0.7), "⅔");
        assert_eq!(round_to_third(0.1), "0");
    }

    #[test]
    fn half_boundaries() {
        assert_eq!(round_to_half(0.25), "0");
        assert_eq!(round_to_half(0.26), "½");
        assert_eq!(round_to_half(15.5), "15½");
        assert_eq!(round_to_half(15.75), "15½");
        assert_eq!(round_to_half(15.76), "16");
    }

    #[test]
    fn html_glyphs_render_entities() {
        assert_eq!(
            round_to_third_with(3.4, FractionGlyphs::Html),
            "3&frac13;"
        );
        assert_eq!(round_to_half_with(0.5, FractionGlyphs::Html), "&frac12;");
        assert_eq!(
            round_to_third_with(0.8, FractionGlyphs::Html),
            "&frac23;"
        );
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert_eq!(round_to_third(f64::NAN), "NaN");
        assert_eq!(round_to_half(f64::INFINITY), "inf");
    }

    #[derive(Debug)]
    struct Silent {
        cause: StatsError,
    }

    impl fmt::Display for Silent {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Ok(())
        }
    }

    impl Error for Silent {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.cause)
        }
    }

    fn too_large() -> StatsError {
        StatsError::InputTooLarge {
            kind: EngineKind::Workhorse,
            reduced: 1_300_001,
        }
    }

    #[test]
    fn describes_structured_errors_by_message() {
        let described = describe_failure(&too_large());
        assert!(described.starts_with("Error: provided number(s) too large"));
    }

    #[test]
    fn describes_silent_errors_through_their_cause() {
        let silent = Silent { cause: too_large() };
        assert_eq!(describe_error(&silent), describe_error(&too_large()));
    }

    #[test]
    fn describes_anyhow_and_string_payloads() {
        let wrapped = anyhow::Error::new(too_large());
        assert!(describe_failure(&wrapped).contains("too large"));
        assert_eq!(describe_failure(&"boom"), "Error: boom");
        assert_eq!(describe_failure(&String::from("bang")), "Error: bang");
        assert_eq!(describe_failure(&42_u8), "Error: unknown failure");
    }

    #[test]
    fn describes_boxed_error_payloads() {
        let shared: Box<dyn Error + Send + Sync> = Box::new(too_large());
        assert!(describe_failure(&shared).starts_with("Error: provided number(s) too large"));

        let unsync: Box<dyn Error + Send> = Box::new(Silent { cause: too_large() });
        assert_eq!(describe_failure(&unsync), describe_error(&too_large()));
    }

    #[test]
    fn anyhow_context_is_kept() {
        let wrapped = anyhow::Error::new(too_large()).context("pricing train");
        let described = describe_failure(&wrapped);
        assert!(described.starts_with("Error: pricing train: provided number(s)"));
    }

    #[test]
    fn describes_panic_payloads() {
        let result: std::thread::Result<()> = std::panic::catch_unwind(|| panic!("derailed"));
        let payload = result.unwrap_err();
        assert_eq!(describe_failure(payload.as_ref()), "Error: derailed");
    }
}
