use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectricitySource {
    Coal,
    Renewable,
    Mixed,
}

impl ElectricitySource {
    pub const ALL: &'static [ElectricitySource] = &[
        ElectricitySource::Coal,
        ElectricitySource::Renewable,
        ElectricitySource::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElectricitySource::Coal => "coal",
            ElectricitySource::Renewable => "renewable",
            ElectricitySource::Mixed => "mixed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ElectricitySource::Coal => "Coal",
            ElectricitySource::Renewable => "Renewable",
            ElectricitySource::Mixed => "Mixed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "coal" => Some(ElectricitySource::Coal),
            "renewable" | "green" => Some(ElectricitySource::Renewable),
            "mixed" | "grid" => Some(ElectricitySource::Mixed),
            _ => None,
        }
    }
}

impl std::fmt::Display for ElectricitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Bike,
    Bus,
    Train,
    None,
}

impl VehicleType {
    pub const ALL: &'static [VehicleType] = &[
        VehicleType::Car,
        VehicleType::Bike,
        VehicleType::Bus,
        VehicleType::Train,
        VehicleType::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Bike => "bike",
            VehicleType::Bus => "bus",
            VehicleType::Train => "train",
            VehicleType::None => "none",
        }
    }

    /// Car or motorbike, i.e. fuel burned per traveller.
    pub fn is_private(&self) -> bool {
        matches!(self, VehicleType::Car | VehicleType::Bike)
    }

    pub fn is_public(&self) -> bool {
        matches!(self, VehicleType::Bus | VehicleType::Train)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "car" => Some(VehicleType::Car),
            "bike" | "motorbike" | "scooter" => Some(VehicleType::Bike),
            "bus" => Some(VehicleType::Bus),
            "train" | "metro" => Some(VehicleType::Train),
            "none" | "" => Some(VehicleType::None),
            _ => None,
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietType {
    Veg,
    NonVeg,
    Vegan,
    Mixed,
}

impl DietType {
    pub const ALL: &'static [DietType] = &[
        DietType::Veg,
        DietType::NonVeg,
        DietType::Vegan,
        DietType::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Veg => "veg",
            DietType::NonVeg => "nonveg",
            DietType::Vegan => "vegan",
            DietType::Mixed => "mixed",
        }
    }

    pub fn includes_meat(&self) -> bool {
        matches!(self, DietType::NonVeg | DietType::Mixed)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "veg" | "vegetarian" => Some(DietType::Veg),
            "nonveg" | "non-veg" | "non veg" => Some(DietType::NonVeg),
            "vegan" => Some(DietType::Vegan),
            "mixed" => Some(DietType::Mixed),
            _ => None,
        }
    }
}

impl std::fmt::Display for DietType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive bounds the input surface clamps numeric fields to.
pub mod limits {
    pub const MIN_QUANTITY: f64 = 0.0;
    pub const MIN_HOUSEHOLD: i64 = 1;
    pub const MAX_RENEWABLE_PERCENT: f64 = 100.0;
}

/// Monthly household figures entered on the calculator form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdProfile {
    pub electricity_kwh: f64,
    pub electricity_source: ElectricitySource,
    pub lpg_kg: f64,
    pub vehicle_type: VehicleType,
    pub travel_km: f64,
    pub vehicle_efficiency: f64,
    pub diet: DietType,
    pub waste_kg: f64,
    pub household_size: i64,
    pub renewable_percent: f64,
}

impl HouseholdProfile {
    /// Returns a copy with every numeric field forced into its valid range.
    /// Non-finite values collapse to the lower bound.
    pub fn clamped(&self) -> Self {
        use limits::*;

        Self {
            electricity_kwh: clamp_quantity(self.electricity_kwh),
            lpg_kg: clamp_quantity(self.lpg_kg),
            travel_km: clamp_quantity(self.travel_km),
            vehicle_efficiency: clamp_quantity(self.vehicle_efficiency),
            waste_kg: clamp_quantity(self.waste_kg),
            household_size: self.household_size.max(MIN_HOUSEHOLD),
            renewable_percent: if self.renewable_percent.is_finite() {
                self.renewable_percent
                    .clamp(MIN_QUANTITY, MAX_RENEWABLE_PERCENT)
            } else {
                MIN_QUANTITY
            },
            ..self.clone()
        }
    }

    /// Names of fields that fall outside the accepted ranges.
    pub fn out_of_range_fields(&self) -> Vec<&'static str> {
        use limits::*;

        let mut fields = Vec::new();
        let quantities = [
            ("electricity", self.electricity_kwh),
            ("lpg", self.lpg_kg),
            ("travel", self.travel_km),
            ("efficiency", self.vehicle_efficiency),
            ("waste", self.waste_kg),
        ];
        for (name, value) in quantities {
            if !value.is_finite() || value < MIN_QUANTITY {
                fields.push(name);
            }
        }
        if self.household_size < MIN_HOUSEHOLD {
            fields.push("household");
        }
        if !(MIN_QUANTITY..=MAX_RENEWABLE_PERCENT).contains(&self.renewable_percent) {
            fields.push("renewable");
        }
        fields
    }
}

fn clamp_quantity(value: f64) -> f64 {
    if value.is_finite() {
        value.max(limits::MIN_QUANTITY)
    } else {
        limits::MIN_QUANTITY
    }
}

impl Default for HouseholdProfile {
    fn default() -> Self {
        Self {
            electricity_kwh: 150.0,
            electricity_source: ElectricitySource::Coal,
            lpg_kg: 10.0,
            vehicle_type: VehicleType::Car,
            travel_km: 300.0,
            vehicle_efficiency: 15.0,
            diet: DietType::Veg,
            waste_kg: 20.0,
            household_size: 4,
            renewable_percent: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_type_from_str_valid() {
        assert_eq!(VehicleType::from_str("car"), Some(VehicleType::Car));
        assert_eq!(VehicleType::from_str("CAR"), Some(VehicleType::Car));
        assert_eq!(VehicleType::from_str(" bike "), Some(VehicleType::Bike));
        assert_eq!(VehicleType::from_str("Train"), Some(VehicleType::Train));
        assert_eq!(VehicleType::from_str("none"), Some(VehicleType::None));
    }

    #[test]
    fn vehicle_type_from_str_invalid() {
        assert_eq!(VehicleType::from_str("rocket"), None);
        assert_eq!(VehicleType::from_str("cars"), None);
    }

    #[test]
    fn vehicle_type_private_and_public_are_disjoint() {
        for vehicle in VehicleType::ALL {
            assert!(
                !(vehicle.is_private() && vehicle.is_public()),
                "{:?} is both private and public",
                vehicle
            );
        }
        assert!(!VehicleType::None.is_private());
        assert!(!VehicleType::None.is_public());
    }

    #[test]
    fn as_str_parses_back() {
        for source in ElectricitySource::ALL {
            assert_eq!(ElectricitySource::from_str(source.as_str()), Some(*source));
        }
        for vehicle in VehicleType::ALL {
            assert_eq!(VehicleType::from_str(vehicle.as_str()), Some(*vehicle));
        }
        for diet in DietType::ALL {
            assert_eq!(DietType::from_str(diet.as_str()), Some(*diet));
        }
    }

    #[test]
    fn diet_type_from_str_aliases() {
        assert_eq!(DietType::from_str("non-veg"), Some(DietType::NonVeg));
        assert_eq!(DietType::from_str("Vegetarian"), Some(DietType::Veg));
        assert_eq!(DietType::from_str("pescatarian"), None);
    }

    #[test]
    fn diet_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&DietType::NonVeg).unwrap();
        assert_eq!(json, "\"nonveg\"");
        let parsed: DietType = serde_json::from_str("\"mixed\"").unwrap();
        assert_eq!(parsed, DietType::Mixed);
    }

    #[test]
    fn default_matches_form_defaults() {
        let profile = HouseholdProfile::default();
        assert_eq!(profile.electricity_kwh, 150.0);
        assert_eq!(profile.travel_km, 300.0);
        assert_eq!(profile.household_size, 4);
        assert_eq!(profile.diet, DietType::Veg);
        assert!(profile.out_of_range_fields().is_empty());
    }

    #[test]
    fn clamped_forces_ranges() {
        let profile = HouseholdProfile {
            electricity_kwh: -5.0,
            travel_km: f64::NAN,
            household_size: 0,
            renewable_percent: 140.0,
            ..HouseholdProfile::default()
        };

        let clamped = profile.clamped();
        assert_eq!(clamped.electricity_kwh, 0.0);
        assert_eq!(clamped.travel_km, 0.0);
        assert_eq!(clamped.household_size, 1);
        assert_eq!(clamped.renewable_percent, 100.0);
        assert!(clamped.out_of_range_fields().is_empty());
    }

    #[test]
    fn out_of_range_fields_lists_offenders() {
        let profile = HouseholdProfile {
            waste_kg: -1.0,
            household_size: -3,
            ..HouseholdProfile::default()
        };
        assert_eq!(profile.out_of_range_fields(), vec!["waste", "household"]);
    }
}
