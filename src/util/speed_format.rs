use std::fmt;
use std::str::FromStr;

use crate::error::HudError;

pub const MPS_TO_MPH: f64 = 2.236936;
pub const MPS_TO_KPH: f64 = 3.6;
pub const MPS_TO_KNOTS: f64 = 1.943844;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedUnit {
    #[default]
    Mph,
    Kph,
    Knots,
}

impl SpeedUnit {
    pub fn factor(&self) -> f64 {
        match self {
            SpeedUnit::Mph => MPS_TO_MPH,
            SpeedUnit::Kph => MPS_TO_KPH,
            SpeedUnit::Knots => MPS_TO_KNOTS,
        }
    }

    /// The name used on the command line and in preferences.
    pub fn key(&self) -> &'static str {
        match self {
            SpeedUnit::Mph => "mph",
            SpeedUnit::Kph => "kmh",
            SpeedUnit::Knots => "knots",
        }
    }
}

impl FromStr for SpeedUnit {
    type Err = HudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mph" => Ok(SpeedUnit::Mph),
            "kmh" => Ok(SpeedUnit::Kph),
            "knots" => Ok(SpeedUnit::Knots),
            _ => Err(HudError::Configuration(format!(
                "{:?} is not a valid speed unit",
                s
            ))),
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Convert a speed in meters per second to `unit`.
pub fn convert(speed_mps: f64, unit: SpeedUnit) -> f64 {
    speed_mps * unit.factor()
}

pub struct SpeedFormat {
    unit: SpeedUnit,
}

impl SpeedFormat {
    pub fn new(unit: SpeedUnit) -> Self {
        SpeedFormat { unit }
    }

    pub fn format(&self, speed_mps: f64) -> String {
        format!("{:.0}", convert(speed_mps, self.unit))
    }

    pub fn label(&self) -> String {
        self.unit.key().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::{convert, SpeedFormat, SpeedUnit, MPS_TO_MPH};

    #[test]
    fn test_fmt_speed() {
        assert_eq!(SpeedFormat::new(SpeedUnit::Mph).format(10.0), "22");
        assert_eq!(SpeedFormat::new(SpeedUnit::Kph).format(10.0), "36");
        assert_eq!(SpeedFormat::new(SpeedUnit::Knots).format(10.0), "19");
        assert_eq!(SpeedFormat::new(SpeedUnit::Mph).format(0.0), "0");
    }

    #[test]
    fn test_label() {
        assert_eq!(SpeedFormat::new(SpeedUnit::Mph).label(), "MPH");
        assert_eq!(SpeedFormat::new(SpeedUnit::Kph).label(), "KMH");
        assert_eq!(SpeedFormat::new(SpeedUnit::Knots).label(), "KNOTS");
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("mph".parse::<SpeedUnit>().unwrap(), SpeedUnit::Mph);
        assert_eq!("KMH".parse::<SpeedUnit>().unwrap(), SpeedUnit::Kph);
        assert_eq!("knots".parse::<SpeedUnit>().unwrap(), SpeedUnit::Knots);
        assert!("furlongs".parse::<SpeedUnit>().is_err());
        assert!("".parse::<SpeedUnit>().is_err());
    }

    #[test]
    fn test_convert_zero_and_monotonic() {
        for unit in [SpeedUnit::Mph, SpeedUnit::Kph, SpeedUnit::Knots] {
            assert_eq!(convert(0.0, unit), 0.0);
            let mut last = convert(0.0, unit);
            for i in 1..500 {
                let next = convert(i as f64 * 0.37, unit);
                assert!(next > last);
                last = next;
            }
        }
    }

    #[test]
    fn test_mph_round_trip_to_kph() {
        for speed in [0.5, 1.0, 13.3, 27.777, 250.0] {
            let via_mph = convert(speed, SpeedUnit::Mph) / MPS_TO_MPH;
            let direct = convert(speed, SpeedUnit::Kph);
            let indirect = convert(via_mph, SpeedUnit::Kph);
            assert!(((indirect - direct) / direct).abs() <= 1e-9);
        }
    }
}
