use serde::{Deserialize, Serialize};

pub const NUM_ELEMENTS: usize = 3;

// Magnitudes 1 and 2 are never worth casting, so the search jumps from 0 straight to 3.
pub const MIN_CAST_MAGNITUDE: u32 = 3;
pub const DEFAULT_MAX_MAGNITUDE: u32 = 100;

pub const MAGNITUDE_EXPONENT: f64 = 1.28;
pub const AREA_SCALE: f64 = 0.15;
pub const SKILL_MULTIPLIER_BASE: f64 = 1.4;
pub const SKILL_MULTIPLIER_SLOPE: f64 = 0.012;

pub const MAX_SKILL: u32 = 100;
pub const MAX_EFFECTIVENESS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Frost,
    Shock,
}

impl Element {
    pub const ALL: [Element; NUM_ELEMENTS] = [Element::Fire, Element::Frost, Element::Shock];

    /// Base cost coefficient of the element's damage effect.
    pub const fn base_cost(self) -> f64 {
        match self {
            Element::Fire => 0.75,
            Element::Frost => 0.74,
            Element::Shock => 0.78,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Frost => "frost",
            Element::Shock => "shock",
        }
    }
}

/// How the spell is delivered. Ranged spells cost half again as much.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastRange {
    #[default]
    Touch,
    Target,
}

impl CastRange {
    pub const fn cost_multiplier(self) -> f64 {
        match self {
            CastRange::Touch => 1.0,
            CastRange::Target => 1.5,
        }
    }
}

/// Candidate magnitudes for one element, ascending: `0` then `3..=max_magnitude`.
pub fn search_domain(max_magnitude: u32) -> impl Iterator<Item = u32> + Clone {
    std::iter::once(0).chain(MIN_CAST_MAGNITUDE..=max_magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_domain_skips_one_and_two() {
        let domain: Vec<u32> = search_domain(6).collect();
        assert_eq!(domain, vec![0, 3, 4, 5, 6]);
    }

    #[test]
    fn search_domain_below_min_cast_is_only_zero() {
        assert_eq!(search_domain(2).collect::<Vec<_>>(), vec![0]);
        assert_eq!(search_domain(0).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn element_order_and_costs() {
        let bases: Vec<f64> = Element::ALL.iter().map(|e| e.base_cost()).collect();
        assert_eq!(bases, vec![0.75, 0.74, 0.78]);
        assert_eq!(Element::Frost.name(), "frost");
    }

    #[test]
    fn cast_range_parses_lowercase() {
        let range: CastRange = serde_json::from_str("\"target\"").unwrap();
        assert_eq!(range, CastRange::Target);
        assert_eq!(range.cost_multiplier(), 1.5);
        assert_eq!(CastRange::default().cost_multiplier(), 1.0);
    }
}
