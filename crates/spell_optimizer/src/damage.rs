use crate::data::Element;
use crate::{ElementWeights, SpellParameters};

/// Damage per second of one effect after spell effectiveness.
///
/// The effectiveness-scaled magnitude is floored before the weight is applied.
pub fn damage_after_effectiveness(magnitude: u32, weight: f64, effectiveness: u32) -> f64 {
    ((effectiveness as f64 / 100.0) * magnitude as f64).floor() * weight
}

#[derive(Debug, Clone)]
pub struct DamageModel {
    effectiveness: u32,
    weights: ElementWeights,
}

impl DamageModel {
    pub fn new(params: &SpellParameters) -> Self {
        Self {
            effectiveness: params.spell_effectiveness,
            weights: params.element_weights,
        }
    }

    pub fn damage(&self, element: Element, magnitude: u32) -> f64 {
        damage_after_effectiveness(magnitude, self.weights.get(element), self.effectiveness)
    }

    /// Damage over the whole duration for per-second element damages.
    pub fn total_damage(duration: u32, fire: f64, frost: f64, shock: f64) -> f64 {
        duration as f64 * (fire + frost + shock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example() {
        assert_eq!(damage_after_effectiveness(10, 1.0, 95), 9.0);
    }

    #[test]
    fn floor_happens_before_weighting() {
        // floor(0.95 * 10) * 1.5 = 13.5, not floor(14.25) = 14
        assert_eq!(damage_after_effectiveness(10, 1.5, 95), 13.5);
    }

    #[test]
    fn zero_magnitude_deals_nothing() {
        for weight in [0.5, 1.0, 3.25] {
            for eff in [0, 70, 95, 100] {
                assert_eq!(damage_after_effectiveness(0, weight, eff), 0.0);
            }
        }
    }

    #[test]
    fn full_effectiveness_keeps_magnitude() {
        assert_eq!(damage_after_effectiveness(37, 1.0, 100), 37.0);
    }

    #[test]
    fn total_scales_with_duration() {
        assert_eq!(DamageModel::total_damage(4, 9.0, 8.1, 9.9), 4.0 * (9.0 + 8.1 + 9.9));
        assert_eq!(DamageModel::total_damage(1, 0.0, 0.0, 0.0), 0.0);
    }
}
