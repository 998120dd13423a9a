//! Plain-text report bodies for the emailed footprint summary.

use crate::logic::thresholds::{electricity_band, renewable_is_low, travel_band, waste_band, Band};
use crate::models::{DietType, EmissionBreakdown, HouseholdProfile, Suggestion, VehicleType};

pub const NARRATIVE_SUBJECT: &str = "Your Personalised Monthly Carbon Emission Report 🌍";
pub const SHORT_SUBJECT: &str = "Your Monthly Carbon Emission Report 🌍";

/// Used by the short report when fewer than three suggestions are supplied.
pub const FALLBACK_SUGGESTIONS: [&str; 3] =
    ["Use LED bulbs", "Cycle for short trips", "Compost waste"];

const SIGNATURE: &str = "Sustainability Assistant";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub subject: String,
    pub body: String,
}

/// Pick the long narrative when the full profile is known, the short
/// three-suggestion note otherwise.
pub fn compose(
    name: &str,
    emissions: &EmissionBreakdown,
    profile: Option<&HouseholdProfile>,
    suggestions: &[Suggestion],
) -> Report {
    match profile {
        Some(profile) => narrative(name, emissions, profile),
        None => short(name, emissions.total(), suggestions),
    }
}

pub fn short(name: &str, total: f64, suggestions: &[Suggestion]) -> Report {
    let picked: Vec<&str> = if suggestions.len() >= FALLBACK_SUGGESTIONS.len() {
        suggestions.iter().take(3).map(|s| s.text.as_str()).collect()
    } else {
        FALLBACK_SUGGESTIONS.to_vec()
    };

    let mut lines = vec![
        format!("Hi {},", name),
        String::new(),
        format!(
            "Your estimated carbon footprint for this month is: {:.2} kg CO₂.",
            total
        ),
        String::new(),
        "Here are some personalised suggestions to help reduce your emissions:".to_string(),
    ];
    lines.extend(picked.iter().map(|s| format!("- {}", s)));
    lines.extend([
        String::new(),
        "Every small step counts 🌱 — together, we can make a difference!".to_string(),
        String::new(),
        "Regards,".to_string(),
        SIGNATURE.to_string(),
    ]);

    Report {
        subject: SHORT_SUBJECT.to_string(),
        body: lines.join("\n"),
    }
}

pub fn narrative(name: &str, emissions: &EmissionBreakdown, profile: &HouseholdProfile) -> Report {
    let total = emissions.total();
    let household = profile.household_size.max(1);

    let mut lines: Vec<String> = vec![
        format!("Hi {},", name),
        String::new(),
        "Thank you for using the Carbon Emission Measurement tool. 🌍".into(),
        "Here is your personalised monthly carbon footprint report:".into(),
        format!("→ Estimated total footprint: {:.2} kg CO₂e / month", total),
        format!(
            "→ Approx. per-person footprint: {:.2} kg CO₂e (household size: {})",
            emissions.per_capita(household),
            household
        ),
        String::new(),
        "Below is a breakdown by category with suggestions tailored to your inputs:".into(),
    ];

    energy_section(&mut lines, profile);
    transport_section(&mut lines, profile);
    diet_section(&mut lines, profile);
    waste_section(&mut lines, profile);

    lines.extend([
        String::new(),
        "You don’t need to change everything at once.".into(),
        "Pick 2–3 actions from any section and try them this month. Small, consistent steps \
         lead to big impact over time. 🌱"
            .into(),
        String::new(),
        "Regards,".into(),
        SIGNATURE.into(),
    ]);

    Report {
        subject: NARRATIVE_SUBJECT.to_string(),
        body: lines.join("\n"),
    }
}

fn push_actions(lines: &mut Vec<String>, heading: &str, tips: &[&str]) {
    lines.push(format!("Recommended actions for {}:", heading));
    lines.extend(tips.iter().map(|tip| format!("• {}", tip)));
}

fn energy_section(lines: &mut Vec<String>, p: &HouseholdProfile) {
    lines.push(String::new());
    lines.push("1️⃣ Home Energy Use".into());

    let level = match electricity_band(p.electricity_kwh) {
        Band::High => "this is on the higher side.",
        Band::Moderate => "moderate level.",
        Band::Low => "relatively low 👍.",
    };
    lines.push(format!(
        "- Electricity use: {:.0} kWh/month — {}",
        p.electricity_kwh, level
    ));
    lines.push(format!(
        "- Reported electricity source: {}, about {:.0}% from renewables.",
        p.electricity_source.label(),
        p.renewable_percent
    ));
    if p.lpg_kg > 0.0 {
        lines.push(format!(
            "- LPG / cooking gas usage: {:.1} kg per month.",
            p.lpg_kg
        ));
    }

    let mut tips = vec![
        "Replace old tube lights/CFLs with LED bulbs in frequently used rooms.",
        "Turn off fans, lights and ACs whenever you leave the room.",
        "Use natural daylight and cross-ventilation to reduce the need for lights and AC.",
    ];
    if electricity_band(p.electricity_kwh) == Band::High {
        tips.push("Set AC at 24–26°C and keep doors/windows closed while it runs.");
        tips.push("Use washing machine only with full loads and eco/quick wash modes.");
    }
    if renewable_is_low(p.renewable_percent) {
        tips.push("Explore rooftop solar or green power options in your area (if available).");
    }
    push_actions(lines, "energy", &tips);
}

fn transport_section(lines: &mut Vec<String>, p: &HouseholdProfile) {
    lines.push(String::new());
    lines.push("2️⃣ Transport & Travel".into());

    let vehicle = p.vehicle_type;
    if vehicle.is_private() && travel_band(p.travel_km) == Band::High {
        lines.push(format!(
            "- You travel about {:.0} km/month using a {}, mostly private transport.",
            p.travel_km, vehicle
        ));
        lines.push("- This is likely one of the bigger contributors to your footprint.".into());
    } else if vehicle.is_public() {
        lines.push(format!(
            "- You mainly use {} for around {:.0} km/month, which is lower-carbon than solo car use.",
            vehicle, p.travel_km
        ));
    } else if vehicle == VehicleType::None {
        lines.push(
            "- You reported no regular motorised transport — your travel emissions are very low. 👍"
                .into(),
        );
    } else {
        lines.push(format!(
            "- You travel about {:.0} km/month by {}.",
            p.travel_km, vehicle
        ));
    }

    if p.vehicle_efficiency > 0.0 && vehicle.is_private() {
        lines.push(format!(
            "- Vehicle efficiency: ~{:.1} km per litre/kWh.",
            p.vehicle_efficiency
        ));
    }

    let mut tips = if vehicle.is_private() {
        vec![
            "Use public transport, metro or shared cabs for regular routes when possible.",
            "Carpool with colleagues/friends to reduce solo trips.",
            "Plan errands to combine multiple small trips into one journey.",
            "Keep tyres properly inflated and service your vehicle regularly for better mileage.",
        ]
    } else {
        vec!["Continue choosing public transport or non-motorised options whenever possible."]
    };
    tips.push("For very short distances, prefer walking or cycling instead of using a vehicle.");
    push_actions(lines, "transport", &tips);
}

fn diet_section(lines: &mut Vec<String>, p: &HouseholdProfile) {
    lines.push(String::new());
    lines.push("3️⃣ Food & Diet".into());

    let status = match p.diet {
        DietType::Veg => {
            "- You follow a vegetarian diet, which is generally lower in emissions compared to heavy meat diets. 🌱"
        }
        DietType::Vegan => {
            "- You follow a vegan diet — one of the lowest-carbon diet patterns. 🌱💚"
        }
        DietType::NonVeg => {
            "- You reported a mainly non-vegetarian diet, which tends to have a higher carbon footprint."
        }
        DietType::Mixed => {
            "- You reported a mixed diet (some vegetarian and some non-vegetarian meals)."
        }
    };
    lines.push(status.into());

    let mut tips = Vec::new();
    if p.diet.includes_meat() {
        tips.push(
            "Try 2–3 fully vegetarian days per week to gradually lower your food emissions.",
        );
        tips.push(
            "Reduce red meat (mutton/beef) and prefer pulses, paneer, eggs or chicken instead.",
        );
    }
    tips.push(
        "Prefer seasonal, locally grown fruits and vegetables over heavily packaged or imported options.",
    );
    tips.push("Plan meals and store leftovers properly to avoid food waste.");
    push_actions(lines, "food", &tips);
}

fn waste_section(lines: &mut Vec<String>, p: &HouseholdProfile) {
    lines.push(String::new());
    lines.push("4️⃣ Waste & Lifestyle".into());

    let level = match waste_band(p.waste_kg) {
        Band::High => "there is strong scope to reduce this.",
        Band::Moderate => "moderate level.",
        Band::Low => "relatively low 👍.",
    };
    lines.push(format!(
        "- You generate about {:.0} kg of waste per month — {}",
        p.waste_kg, level
    ));

    push_actions(
        lines,
        "waste & lifestyle",
        &[
            "Segregate waste at source: wet (organic), dry (recyclable) and reject waste.",
            "Compost kitchen waste such as peels, leftover food and tea powder.",
            "Avoid single-use plastics (bags, cutlery, straws); carry your own bottle and cloth bag.",
            "Repair, reuse or donate usable items instead of throwing them away quickly.",
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::estimator::estimate;
    use crate::models::SuggestionCategory;

    fn heavy_profile() -> HouseholdProfile {
        HouseholdProfile {
            electricity_kwh: 300.0,
            vehicle_type: VehicleType::Car,
            travel_km: 400.0,
            diet: DietType::NonVeg,
            waste_kg: 40.0,
            renewable_percent: 10.0,
            household_size: 2,
            ..HouseholdProfile::default()
        }
    }

    #[test]
    fn narrative_contains_totals_and_sections() {
        let profile = heavy_profile();
        let emissions = estimate(&profile);
        let report = narrative("Asha", &emissions, &profile);

        assert_eq!(report.subject, NARRATIVE_SUBJECT);
        assert!(report.body.starts_with("Hi Asha,"));
        assert!(report
            .body
            .contains("Estimated total footprint: 314.00 kg CO₂e / month"));
        assert!(report.body.contains("per-person footprint: 157.00 kg CO₂e (household size: 2)"));
        for heading in [
            "1️⃣ Home Energy Use",
            "2️⃣ Transport & Travel",
            "3️⃣ Food & Diet",
            "4️⃣ Waste & Lifestyle",
        ] {
            assert!(report.body.contains(heading), "missing {}", heading);
        }
        assert!(report.body.ends_with("Regards,\nSustainability Assistant"));
    }

    #[test]
    fn narrative_uses_canonical_thresholds() {
        let profile = HouseholdProfile {
            electricity_kwh: 220.0,
            waste_kg: 12.0,
            renewable_percent: 30.0,
            ..HouseholdProfile::default()
        };
        let report = narrative("User", &estimate(&profile), &profile);

        // 220 kWh is moderate; AC tips only appear in the high band.
        assert!(report.body.contains("220 kWh/month — moderate level."));
        assert!(!report.body.contains("Set AC at 24–26°C"));
        // 12 kg is under the 15 kg moderate boundary.
        assert!(report.body.contains("12 kg of waste per month — relatively low"));
        assert!(!report.body.contains("rooftop solar"));
    }

    #[test]
    fn narrative_high_usage_adds_extra_energy_tips() {
        let profile = heavy_profile();
        let report = narrative("User", &estimate(&profile), &profile);

        assert!(report.body.contains("this is on the higher side."));
        assert!(report.body.contains("Set AC at 24–26°C"));
        assert!(report.body.contains("rooftop solar"));
        assert!(report.body.contains("using a car, mostly private transport."));
        assert!(report.body.contains("Vehicle efficiency: ~15.0 km per litre/kWh."));
    }

    #[test]
    fn narrative_no_vehicle_and_zero_lpg() {
        let profile = HouseholdProfile {
            vehicle_type: VehicleType::None,
            lpg_kg: 0.0,
            ..HouseholdProfile::default()
        };
        let report = narrative("User", &estimate(&profile), &profile);

        assert!(report.body.contains("no regular motorised transport"));
        assert!(!report.body.contains("LPG / cooking gas usage"));
        assert!(!report.body.contains("Vehicle efficiency"));
    }

    #[test]
    fn narrative_per_capita_floors_household() {
        let profile = HouseholdProfile {
            household_size: 0,
            ..HouseholdProfile::default()
        };
        let emissions = estimate(&profile);
        let report = narrative("User", &emissions, &profile);
        assert!(report.body.contains(&format!(
            "per-person footprint: {:.2} kg CO₂e (household size: 1)",
            emissions.total()
        )));
    }

    #[test]
    fn short_lists_first_three_suggestions() {
        let suggestions: Vec<Suggestion> = (1..=4)
            .map(|i| {
                Suggestion::new(
                    format!("s{}", i),
                    SuggestionCategory::General,
                    format!("Tip {}", i),
                )
            })
            .collect();
        let report = short("Ravi", 169.0, &suggestions);

        assert_eq!(report.subject, SHORT_SUBJECT);
        assert!(report.body.contains("is: 169.00 kg CO₂."));
        assert!(report.body.contains("- Tip 1\n- Tip 2\n- Tip 3"));
        assert!(!report.body.contains("Tip 4"));
    }

    #[test]
    fn short_falls_back_when_suggestions_missing() {
        let report = short("Ravi", 10.0, &[]);
        assert!(report
            .body
            .contains("- Use LED bulbs\n- Cycle for short trips\n- Compost waste"));
    }

    #[test]
    fn compose_selects_by_profile_presence() {
        let profile = HouseholdProfile::default();
        let emissions = estimate(&profile);

        assert_eq!(
            compose("User", &emissions, Some(&profile), &[]).subject,
            NARRATIVE_SUBJECT
        );
        assert_eq!(compose("User", &emissions, None, &[]).subject, SHORT_SUBJECT);
    }
}
