use crate::SpellParameters;
use crate::data::{
    AREA_SCALE, Element, MAGNITUDE_EXPONENT, SKILL_MULTIPLIER_BASE, SKILL_MULTIPLIER_SLOPE,
};

/// Cost discount from caster skill, rounded to 3 decimals (1.4 at skill 0, 0.2 at skill 100).
pub fn skill_multiplier(skill: u32) -> f64 {
    let multiplier = SKILL_MULTIPLIER_BASE - SKILL_MULTIPLIER_SLOPE * skill as f64;
    (multiplier * 1000.0).round() / 1000.0
}

/// Areas below 1 after scaling (including "no area") count as 1.
fn scaled_area(area: f64) -> f64 {
    let scaled = area * AREA_SCALE;
    if scaled < 1.0 { 1.0 } else { scaled }
}

/// Magicka cost of a single elemental effect.
///
/// Must ensure `skill` is in 0..=100 so the skill multiplier stays positive.
pub fn spell_cost(
    base_cost: f64,
    magnitude: u32,
    duration: u32,
    area: f64,
    cast_range_multiplier: f64,
    skill: u32,
) -> u64 {
    raw_to_cost(
        base_cost,
        magnitude,
        duration as f64,
        scaled_area(area),
        cast_range_multiplier,
        skill_multiplier(skill),
    )
}

#[inline(always)]
fn raw_to_cost(
    base_cost: f64,
    magnitude: u32,
    duration: f64,
    scaled_area: f64,
    cast_range_multiplier: f64,
    skill_multiplier: f64,
) -> u64 {
    let raw = (base_cost
        * (magnitude as f64).powf(MAGNITUDE_EXPONENT)
        * duration
        * scaled_area
        * cast_range_multiplier)
        .floor();
    (raw * skill_multiplier).floor() as u64
}

/// Cost model with everything except the magnitude fixed by the spell parameters.
///
/// The cost is non-decreasing in magnitude. The optimizer's pruning relies on
/// this, so any change to the formula has to keep it.
#[derive(Debug, Clone)]
pub struct CostModel {
    duration: f64,
    scaled_area: f64,
    cast_range_multiplier: f64,
    skill_multiplier: f64,
}

impl CostModel {
    /// Build a cost model from parameters that already passed validation.
    pub fn new(params: &SpellParameters) -> Self {
        Self {
            duration: params.duration as f64,
            scaled_area: scaled_area(params.area),
            cast_range_multiplier: params.cast_range_multiplier,
            skill_multiplier: skill_multiplier(params.caster_skill),
        }
    }

    pub fn skill_multiplier(&self) -> f64 {
        self.skill_multiplier
    }

    pub fn cost(&self, element: Element, magnitude: u32) -> u64 {
        self.cost_with_base(element.base_cost(), magnitude)
    }

    pub fn cost_with_base(&self, base_cost: f64, magnitude: u32) -> u64 {
        raw_to_cost(
            base_cost,
            magnitude,
            self.duration,
            self.scaled_area,
            self.cast_range_multiplier,
            self.skill_multiplier,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RawInputs, build_parameters};

    #[test]
    fn skill_multiplier_endpoints() {
        assert_eq!(skill_multiplier(0), 1.4);
        assert_eq!(skill_multiplier(100), 0.2);
        assert_eq!(skill_multiplier(50), 0.8);
        assert_eq!(skill_multiplier(33), 1.004);
    }

    #[test]
    fn worked_example() {
        // 0.75 * 10^1.28 * 4 = 57.16 -> 57, then 57 * 0.2 = 11.4 -> 11
        assert_eq!(spell_cost(0.75, 10, 4, 0.0, 1.0, 100), 11);
    }

    #[test]
    fn zero_magnitude_is_free() {
        for skill in [0, 37, 100] {
            for area in [0.0, 10.0, 100.0] {
                assert_eq!(spell_cost(0.78, 0, 120, area, 1.5, skill), 0);
            }
        }
    }

    #[test]
    fn small_area_clamps_to_one() {
        let no_area = spell_cost(0.74, 20, 10, 0.0, 1.0, 40);
        assert_eq!(spell_cost(0.74, 20, 10, 6.0, 1.0, 40), no_area);
        assert!(spell_cost(0.74, 20, 10, 10.0, 1.0, 40) > no_area);
    }

    #[test]
    fn cost_is_monotonic_in_magnitude() {
        for &(duration, area, mult, skill) in &[
            (1, 0.0, 1.0, 100),
            (4, 0.0, 1.5, 0),
            (30, 50.0, 1.0, 73),
            (120, 100.0, 1.5, 12),
        ] {
            for element in Element::ALL {
                let mut prev = 0;
                for magnitude in 0..=150 {
                    let cost =
                        spell_cost(element.base_cost(), magnitude, duration, area, mult, skill);
                    assert!(cost >= prev, "{element:?} m={magnitude}: {cost} < {prev}");
                    prev = cost;
                }
            }
        }
    }

    #[test]
    fn model_matches_free_function() {
        let raw = RawInputs {
            duration: 7,
            area: 40,
            skill: 64,
            luck: 50,
            ..RawInputs::default()
        };
        let params = build_parameters(&raw).unwrap();
        let model = CostModel::new(&params);
        for element in Element::ALL {
            for magnitude in [0, 3, 17, 100] {
                assert_eq!(
                    model.cost(element, magnitude),
                    spell_cost(element.base_cost(), magnitude, 7, 40.0, 1.0, 64)
                );
            }
        }
    }
}
