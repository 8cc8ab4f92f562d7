use crate::error::{ProcessingError, Result};
use crate::models::{CoordinatePair, DmsAngle, Hemisphere};
use validator::Validate;

/// Replace a `,` decimal separator with `.`
///
/// # Examples
/// ```
/// use coord_extractor::utils::coordinates::normalize_decimal_separator;
///
/// assert_eq!(normalize_decimal_separator("52,9838"), "52.9838");
/// assert_eq!(normalize_decimal_separator("52.9838"), "52.9838");
/// ```
pub fn normalize_decimal_separator(token: &str) -> String {
    token.replace(',', ".")
}

/// Convert matched DMS tokens into their numeric form.
///
/// `seconds` must already be normalized to a `.` decimal separator.
pub fn parse_dms_tokens(
    degrees: &str,
    minutes: &str,
    seconds: &str,
    hemisphere: Hemisphere,
) -> Result<DmsAngle> {
    let degrees = degrees.parse::<u32>().map_err(|_| {
        ProcessingError::InvalidCoordinate(format!("Invalid degrees value: '{}'", degrees))
    })?;

    let minutes = minutes.parse::<u32>().map_err(|_| {
        ProcessingError::InvalidCoordinate(format!("Invalid minutes value: '{}'", minutes))
    })?;

    let seconds = seconds.parse::<f64>().map_err(|_| {
        ProcessingError::InvalidCoordinate(format!("Invalid seconds value: '{}'", seconds))
    })?;

    Ok(DmsAngle::new(degrees, minutes, seconds, hemisphere))
}

/// Display text of one DMS half, built from the matched tokens.
///
/// The degree sign is always written as `º`.
pub fn format_dms_text(degrees: &str, minutes: &str, seconds: &str, hemisphere: &str) -> String {
    format!("{}º{}'{}\"{}", degrees, minutes, seconds, hemisphere)
}

/// Check minutes/seconds below 60 and decimals within ±90 / ±180
pub fn validate_coordinate_ranges(
    latitude: &DmsAngle,
    longitude: &DmsAngle,
    pair: &CoordinatePair,
) -> Result<()> {
    for (label, angle) in [("latitude", latitude), ("longitude", longitude)] {
        if !angle.has_valid_components() {
            return Err(ProcessingError::InvalidCoordinate(format!(
                "{} minutes and seconds must be below 60, got {}'{}\"",
                label, angle.minutes, angle.seconds
            )));
        }
    }

    pair.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dms_tokens() {
        let angle = parse_dms_tokens("3", "03", "52.9838", Hemisphere::South).unwrap();
        assert_eq!(angle.degrees, 3);
        assert_eq!(angle.minutes, 3);
        assert!((angle.seconds - 52.9838).abs() < 1e-9);
        assert!((angle.to_decimal() - -3.064718).abs() < 0.000001);
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(parse_dms_tokens("", "03", "1", Hemisphere::North).is_err());
        assert!(parse_dms_tokens("3", "x", "1", Hemisphere::North).is_err());
        assert!(parse_dms_tokens("3", "03", "52,98", Hemisphere::North).is_err());
    }

    #[test]
    fn test_format_dms_text() {
        assert_eq!(format_dms_text("3", "03", "52.9838", "S"), "3º03'52.9838\"S");
        assert_eq!(format_dms_text("59", "54", "46", "o"), "59º54'46\"o");
    }

    #[test]
    fn test_validate_coordinate_ranges() {
        let lat = DmsAngle::new(3, 3, 52.0, Hemisphere::South);
        let lon = DmsAngle::new(59, 54, 46.0, Hemisphere::West);
        let pair = CoordinatePair::new(lat.to_decimal(), lon.to_decimal(), String::new(), String::new());
        assert!(validate_coordinate_ranges(&lat, &lon, &pair).is_ok());

        let lat = DmsAngle::new(9, 99, 52.0, Hemisphere::North);
        let pair = CoordinatePair::new(lat.to_decimal(), lon.to_decimal(), String::new(), String::new());
        assert!(validate_coordinate_ranges(&lat, &lon, &pair).is_err());

        let lat = DmsAngle::new(95, 0, 0.0, Hemisphere::North);
        let pair = CoordinatePair::new(lat.to_decimal(), lon.to_decimal(), String::new(), String::new());
        assert!(validate_coordinate_ranges(&lat, &lon, &pair).is_err());
    }
}
