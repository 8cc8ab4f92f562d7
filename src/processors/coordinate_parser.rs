use crate::error::{ProcessingError, Result};
use crate::models::{CoordinatePair, DmsAngle, Hemisphere};
use crate::utils::constants::SENTINEL_VALUES;
use crate::utils::coordinates::{
    format_dms_text, normalize_decimal_separator, parse_dms_tokens, validate_coordinate_ranges,
};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Latitude DMS, separators, longitude DMS. Hemisphere letters in any case,
/// `e`/`E` ("and") allowed among the separators.
static DMS_PAIR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"([0-9]{1,3})[º°]([0-9]{1,2})'([0-9]+[.,]?[0-9]*|[.,][0-9]+)"?\s*([NSns])"#,
        r#"[\s,;eE]*"#,
        r#"([0-9]{1,3})[º°]([0-9]{1,2})'([0-9]+[.,]?[0-9]*|[.,][0-9]+)"?\s*([WOwo])"#,
    ))
    .expect("DMS pair pattern is valid")
});

/// Tokens of one DMS half as they appear in the text, seconds normalized
struct DmsTokens<'t> {
    degrees: &'t str,
    minutes: &'t str,
    seconds: String,
    hemisphere: &'t str,
}

impl<'t> DmsTokens<'t> {
    fn from_captures(caps: &Captures<'t>, first_group: usize) -> Option<Self> {
        Some(Self {
            degrees: caps.get(first_group)?.as_str(),
            minutes: caps.get(first_group + 1)?.as_str(),
            seconds: normalize_decimal_separator(caps.get(first_group + 2)?.as_str()),
            hemisphere: caps.get(first_group + 3)?.as_str(),
        })
    }

    fn hemisphere_letter(&self) -> Option<char> {
        self.hemisphere.chars().next()
    }

    fn to_angle(&self, hemisphere: Hemisphere) -> Result<DmsAngle> {
        parse_dms_tokens(self.degrees, self.minutes, &self.seconds, hemisphere)
    }

    fn dms_text(&self) -> String {
        format_dms_text(self.degrees, self.minutes, &self.seconds, self.hemisphere)
    }
}

/// Extracts DMS coordinate pairs from free text
#[derive(Debug, Clone, Default)]
pub struct CoordinateParser {
    validate_ranges: bool,
}

impl CoordinateParser {
    pub fn new() -> Self {
        Self {
            validate_ranges: false,
        }
    }

    /// Drop pairs with minutes/seconds >= 60 or decimals outside ±90 / ±180
    pub fn with_range_validation(mut self, validate_ranges: bool) -> Self {
        self.validate_ranges = validate_ranges;
        self
    }

    /// Extract every coordinate pair in `text`, left to right.
    ///
    /// Never fails: absent, blank, sentinel or unmatched text yields an
    /// empty vector.
    pub fn parse(&self, text: Option<&str>) -> Vec<CoordinatePair> {
        let Some(text) = text else {
            return Vec::new();
        };

        if is_sentinel(text) {
            return Vec::new();
        }

        let mut pairs = Vec::new();
        for caps in DMS_PAIR_PATTERN.captures_iter(text) {
            match self.convert_match(&caps) {
                Ok(pair) => pairs.push(pair),
                Err(e) => {
                    let matched = caps.get(0).map_or("", |m| m.as_str());
                    warn!("Skipping coordinate '{}': {}", matched, e);
                }
            }
        }

        debug!("Extracted {} coordinate pair(s)", pairs.len());
        pairs
    }

    fn convert_match(&self, caps: &Captures<'_>) -> Result<CoordinatePair> {
        let (lat_tokens, lon_tokens) = DmsTokens::from_captures(caps, 1)
            .zip(DmsTokens::from_captures(caps, 5))
            .ok_or_else(|| ProcessingError::InvalidCoordinate("Incomplete match".to_string()))?;

        let lat_hemisphere = lat_tokens
            .hemisphere_letter()
            .and_then(Hemisphere::from_latitude_letter)
            .ok_or_else(|| {
                ProcessingError::InvalidCoordinate(format!(
                    "Invalid latitude hemisphere: '{}'",
                    lat_tokens.hemisphere
                ))
            })?;
        let lon_hemisphere = lon_tokens
            .hemisphere_letter()
            .and_then(Hemisphere::from_longitude_letter)
            .ok_or_else(|| {
                ProcessingError::InvalidCoordinate(format!(
                    "Invalid longitude hemisphere: '{}'",
                    lon_tokens.hemisphere
                ))
            })?;

        let latitude = lat_tokens.to_angle(lat_hemisphere)?;
        let longitude = lon_tokens.to_angle(lon_hemisphere)?;

        let pair = CoordinatePair::new(
            latitude.to_decimal(),
            longitude.to_decimal(),
            lat_tokens.dms_text(),
            lon_tokens.dms_text(),
        );

        if self.validate_ranges {
            validate_coordinate_ranges(&latitude, &longitude, &pair)?;
        }

        Ok(pair)
    }
}

/// Parse with default options (no range validation)
pub fn parse_coordinates(text: Option<&str>) -> Vec<CoordinatePair> {
    CoordinateParser::new().parse(text)
}

fn is_sentinel(text: &str) -> bool {
    let normalized = text.trim().to_uppercase();
    SENTINEL_VALUES.contains(&normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.000001,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_reference_pair() {
        let pairs = parse_coordinates(Some("3º03'52,9838\"S 59º54'46,6013\"W"));

        assert_eq!(pairs.len(), 1);
        assert_close(pairs[0].latitude_decimal, -3.064718);
        assert_close(pairs[0].longitude_decimal, -59.912945);
        assert_eq!(pairs[0].latitude_dms, "3º03'52.9838\"S");
        assert_eq!(pairs[0].longitude_dms, "59º54'46.6013\"W");
    }

    #[test]
    fn test_decimal_conversion_formula() {
        let pairs = parse_coordinates(Some("12°30'36\"N, 45°15'18\"W"));

        assert_eq!(pairs.len(), 1);
        assert_close(pairs[0].latitude_decimal, 12.0 + 30.0 / 60.0 + 36.0 / 3600.0);
        assert_close(pairs[0].longitude_decimal, -(45.0 + 15.0 / 60.0 + 18.0 / 3600.0));
        assert_eq!(pairs[0].latitude_dms, "12º30'36\"N");
    }

    #[test]
    fn test_sentinels_yield_nothing() {
        for text in [
            "NÃO CONSTA",
            "não consta",
            "  Nao Consta  ",
            "NOT INFORMED",
            "not informed",
            "",
            "   ",
        ] {
            assert!(parse_coordinates(Some(text)).is_empty(), "{:?}", text);
        }
        assert!(parse_coordinates(None).is_empty());
    }

    #[test]
    fn test_unmatched_text_yields_nothing() {
        assert!(parse_coordinates(Some("Sem coordenadas")).is_empty());
        assert!(parse_coordinates(Some("3º03'52\"S")).is_empty());
        assert!(parse_coordinates(Some("-3.0647, -59.9129")).is_empty());
    }

    #[test]
    fn test_hemisphere_signs() {
        let pairs = parse_coordinates(Some("1º0'0\"N 2º0'0\"W"));
        assert!(pairs[0].latitude_decimal > 0.0);
        assert!(pairs[0].longitude_decimal < 0.0);

        let pairs = parse_coordinates(Some("1º0'0\"S 2º0'0\"O"));
        assert!(pairs[0].latitude_decimal < 0.0);
        assert!(pairs[0].longitude_decimal < 0.0);
    }

    #[test]
    fn test_lowercase_hemispheres_keep_original_case_in_text() {
        let pairs = parse_coordinates(Some("3º03'52\"s e 59º54'46\"o"));

        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].latitude_decimal < 0.0);
        assert!(pairs[0].longitude_decimal < 0.0);
        assert_eq!(pairs[0].latitude_dms, "3º03'52\"s");
        assert_eq!(pairs[0].longitude_dms, "59º54'46\"o");
    }

    #[test]
    fn test_comma_and_dot_seconds_are_equivalent() {
        let comma = parse_coordinates(Some("3º03'52,9838\"S 59º54'46,6013\"W"));
        let dot = parse_coordinates(Some("3º03'52.9838\"S 59º54'46.6013\"W"));

        assert_eq!(comma, dot);
    }

    #[test]
    fn test_seconds_with_bare_separator() {
        let pairs = parse_coordinates(Some("3º03'52,\"S 59º54'46.\"W"));

        assert_eq!(pairs.len(), 1);
        assert_close(pairs[0].latitude_decimal, -(3.0 + 3.0 / 60.0 + 52.0 / 3600.0));
        assert_close(pairs[0].longitude_decimal, -(59.0 + 54.0 / 60.0 + 46.0 / 3600.0));
        assert_eq!(pairs[0].latitude_dms, "3º03'52.\"S");
        assert_eq!(pairs[0].longitude_dms, "59º54'46.\"W");

        let pairs = parse_coordinates(Some("3º03',5\"S 59º54'.5\"W"));

        assert_eq!(pairs.len(), 1);
        assert_close(pairs[0].latitude_decimal, -(3.0 + 3.0 / 60.0 + 0.5 / 3600.0));
        assert_eq!(pairs[0].latitude_dms, "3º03'.5\"S");
        assert_eq!(pairs[0].longitude_dms, "59º54'.5\"W");
    }

    #[test]
    fn test_separator_only_seconds_do_not_match() {
        assert!(parse_coordinates(Some("3º03',\"S 59º54'.\"W")).is_empty());
    }

    #[test]
    fn test_multiple_pairs_in_order() {
        let text = "Ponto A: 3º03'52,9838\"S 59º54'46,6013\"W; Ponto B: 2º10'5\"N e 60º1'2\"W";
        let pairs = parse_coordinates(Some(text));

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].latitude_dms, "3º03'52.9838\"S");
        assert_eq!(pairs[1].latitude_dms, "2º10'5\"N");
        assert!(pairs[1].latitude_decimal > 0.0);
    }

    #[test]
    fn test_separators_between_halves() {
        for text in [
            "3º03'52\"S59º54'46\"W",
            "3º03'52\"S, 59º54'46\"W",
            "3º03'52\"S ; 59º54'46\"W",
            "3º03'52\"S E 59º54'46\"W",
            "3º03'52S 59º54'46W",
        ] {
            assert_eq!(parse_coordinates(Some(text)).len(), 1, "{:?}", text);
        }
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let pairs = parse_coordinates(Some("99º99'99\"N 999º99'99\"W"));

        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].latitude_decimal > 90.0);
        assert!(pairs[0].longitude_decimal < -180.0);
    }

    #[test]
    fn test_range_validation_drops_invalid_pairs() {
        let parser = CoordinateParser::new().with_range_validation(true);
        let text = "99º99'99\"N 999º99'99\"W; 3º03'52\"S 59º54'46\"W";
        let pairs = parser.parse(Some(text));

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].latitude_dms, "3º03'52\"S");
    }
}
