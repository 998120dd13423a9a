use crate::models::{DietType, EmissionBreakdown, HouseholdProfile};

/// Fixed illustrative factors, kg CO2e per unit.
pub const ELECTRICITY_FACTOR: f64 = 0.8;
pub const TRAVEL_FACTOR: f64 = 0.12;
pub const WASTE_FACTOR: f64 = 0.4;

pub const NONVEG_DIET_EXTRA: f64 = 10.0;
pub const MIXED_DIET_EXTRA: f64 = 5.0;

/// Flat monthly add-on for the diet category.
pub fn diet_extra(diet: DietType) -> f64 {
    match diet {
        DietType::NonVeg => NONVEG_DIET_EXTRA,
        DietType::Mixed => MIXED_DIET_EXTRA,
        DietType::Veg | DietType::Vegan => 0.0,
    }
}

/// Estimate monthly emissions for a profile.
///
/// Linear weighted sum over electricity, travel distance and waste plus a
/// diet add-on. LPG, electricity source, efficiency and renewable share are
/// collected but do not enter the score.
pub fn estimate(profile: &HouseholdProfile) -> EmissionBreakdown {
    EmissionBreakdown {
        energy: profile.electricity_kwh * ELECTRICITY_FACTOR,
        transport: profile.travel_km * TRAVEL_FACTOR,
        waste: profile.waste_kg * WASTE_FACTOR,
        diet_extra: diet_extra(profile.diet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleType;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mixed_diet_example() {
        let profile = HouseholdProfile {
            electricity_kwh: 150.0,
            travel_km: 300.0,
            waste_kg: 20.0,
            diet: DietType::Mixed,
            ..HouseholdProfile::default()
        };

        let breakdown = estimate(&profile);
        assert!(approx(breakdown.energy, 120.0));
        assert!(approx(breakdown.transport, 36.0));
        assert!(approx(breakdown.waste, 8.0));
        assert_eq!(breakdown.diet_extra, 5.0);
        assert_eq!(format!("{:.2}", breakdown.total()), "169.00");
    }

    #[test]
    fn diet_extra_values() {
        assert_eq!(diet_extra(DietType::NonVeg), 10.0);
        assert_eq!(diet_extra(DietType::Mixed), 5.0);
        assert_eq!(diet_extra(DietType::Veg), 0.0);
        assert_eq!(diet_extra(DietType::Vegan), 0.0);
    }

    #[test]
    fn total_matches_formula_and_component_sum() {
        let cases = [
            (0.0, 0.0, 0.0, DietType::Vegan),
            (1.0, 1.0, 1.0, DietType::Veg),
            (312.5, 48.0, 7.25, DietType::NonVeg),
            (1000.0, 2500.0, 90.0, DietType::Mixed),
        ];

        for (electricity, travel, waste, diet) in cases {
            let profile = HouseholdProfile {
                electricity_kwh: electricity,
                travel_km: travel,
                waste_kg: waste,
                diet,
                ..HouseholdProfile::default()
            };
            let b = estimate(&profile);
            let expected = 0.8 * electricity + 0.12 * travel + 0.4 * waste + diet_extra(diet);

            assert!(approx(b.total(), expected), "formula mismatch for {:?}", profile);
            assert_eq!(b.total(), b.energy + b.transport + b.waste + b.diet_extra);
            assert!(b.energy >= 0.0 && b.transport >= 0.0 && b.waste >= 0.0);
        }
    }

    #[test]
    fn unscored_fields_do_not_change_total() {
        let base = HouseholdProfile::default();
        let varied = HouseholdProfile {
            lpg_kg: 99.0,
            vehicle_type: VehicleType::Train,
            vehicle_efficiency: 3.0,
            renewable_percent: 100.0,
            household_size: 9,
            ..base.clone()
        };
        assert_eq!(estimate(&base), estimate(&varied));
    }
}
