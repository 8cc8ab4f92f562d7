use serde::{Deserialize, Serialize};
use validator::Validate;

/// Hemisphere context of one DMS half, as given by its trailing letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
    West,
}

impl Hemisphere {
    /// Map a latitude letter (`N`/`S`, any case)
    pub fn from_latitude_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            _ => None,
        }
    }

    /// Map a longitude letter (`W`, or `O` for "Oeste", any case)
    pub fn from_longitude_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'W' | 'O' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn sign(&self) -> f64 {
        match self {
            Hemisphere::North => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }
}

/// Numeric form of one matched DMS half. Display text is kept separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmsAngle {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl DmsAngle {
    pub fn new(degrees: u32, minutes: u32, seconds: f64, hemisphere: Hemisphere) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
            hemisphere,
        }
    }

    /// Signed decimal degrees. No range capping is applied.
    pub fn to_decimal(&self) -> f64 {
        let magnitude =
            self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0;
        self.hemisphere.sign() * magnitude
    }

    pub fn has_valid_components(&self) -> bool {
        self.minutes < 60 && (0.0..60.0).contains(&self.seconds)
    }
}

/// One extracted point.
///
/// The range rules below are only checked when range validation is
/// requested; by default out-of-range values pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CoordinatePair {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude_decimal: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude_decimal: f64,

    pub latitude_dms: String,

    pub longitude_dms: String,
}

impl CoordinatePair {
    pub fn new(
        latitude_decimal: f64,
        longitude_decimal: f64,
        latitude_dms: String,
        longitude_dms: String,
    ) -> Self {
        Self {
            latitude_decimal,
            longitude_decimal,
            latitude_dms,
            longitude_dms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemisphere_letters() {
        assert_eq!(Hemisphere::from_latitude_letter('s'), Some(Hemisphere::South));
        assert_eq!(Hemisphere::from_latitude_letter('N'), Some(Hemisphere::North));
        assert_eq!(Hemisphere::from_latitude_letter('W'), None);
        assert_eq!(Hemisphere::from_longitude_letter('o'), Some(Hemisphere::West));
        assert_eq!(Hemisphere::from_longitude_letter('W'), Some(Hemisphere::West));
        assert_eq!(Hemisphere::from_longitude_letter('E'), None);
    }

    #[test]
    fn test_dms_angle_to_decimal() {
        let angle = DmsAngle::new(50, 30, 15.0, Hemisphere::North);
        assert!((angle.to_decimal() - 50.504167).abs() < 0.000001);

        let angle = DmsAngle::new(0, 7, 39.0, Hemisphere::West);
        assert!((angle.to_decimal() - -0.1275).abs() < 0.000001);
    }

    #[test]
    fn test_out_of_range_components_are_not_capped() {
        let angle = DmsAngle::new(99, 99, 99.0, Hemisphere::North);
        assert!(!angle.has_valid_components());
        assert!(angle.to_decimal() > 90.0);
    }

    #[test]
    fn test_pair_validation() {
        let pair = CoordinatePair::new(-3.06, -59.91, String::new(), String::new());
        assert!(pair.validate().is_ok());

        let pair = CoordinatePair::new(100.0, -59.91, String::new(), String::new());
        assert!(pair.validate().is_err());
    }
}
