//! Category boundaries shared by the on-screen tips and the emailed report.
//!
//! Every "high" bound is exclusive and every "moderate" band is
//! `(MODERATE, HIGH]`, so the bands of one category never overlap.

/// kWh per month.
pub const ELECTRICITY_HIGH: f64 = 250.0;
pub const ELECTRICITY_MODERATE: f64 = 100.0;

/// km per month by private vehicle.
pub const TRAVEL_HIGH: f64 = 300.0;
pub const TRAVEL_MODERATE: f64 = 100.0;

/// kg per month.
pub const WASTE_HIGH: f64 = 30.0;
pub const WASTE_MODERATE: f64 = 15.0;

/// Percent of electricity from renewables.
pub const RENEWABLE_LOW: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Low,
    Moderate,
    High,
}

impl Band {
    pub fn classify(value: f64, moderate: f64, high: f64) -> Self {
        if value > high {
            Band::High
        } else if value > moderate {
            Band::Moderate
        } else {
            Band::Low
        }
    }
}

pub fn electricity_band(kwh: f64) -> Band {
    Band::classify(kwh, ELECTRICITY_MODERATE, ELECTRICITY_HIGH)
}

pub fn travel_band(km: f64) -> Band {
    Band::classify(km, TRAVEL_MODERATE, TRAVEL_HIGH)
}

pub fn waste_band(kg: f64) -> Band {
    Band::classify(kg, WASTE_MODERATE, WASTE_HIGH)
}

pub fn renewable_is_low(percent: f64) -> bool {
    percent < RENEWABLE_LOW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_respect_exact_boundaries() {
        assert_eq!(electricity_band(100.0), Band::Low);
        assert_eq!(electricity_band(100.5), Band::Moderate);
        assert_eq!(electricity_band(250.0), Band::Moderate);
        assert_eq!(electricity_band(250.1), Band::High);

        assert_eq!(waste_band(15.0), Band::Low);
        assert_eq!(waste_band(30.0), Band::Moderate);
        assert_eq!(waste_band(31.0), Band::High);

        assert_eq!(travel_band(300.0), Band::Moderate);
        assert_eq!(travel_band(301.0), Band::High);
    }

    #[test]
    fn renewable_low_is_strict() {
        assert!(renewable_is_low(19.9));
        assert!(!renewable_is_low(20.0));
    }
}
