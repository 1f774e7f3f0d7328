//! Spell parameters and their construction from raw form inputs.
//!
//! [`SpellParameters`] is what the cost and damage models consume. Front ends
//! collect a [`RawInputs`] instead and call [`build_parameters`], which checks
//! the input ranges offered to players and folds luck into the caster skill.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{CastRange, DEFAULT_MAX_MAGNITUDE, Element, MAX_EFFECTIVENESS, MAX_SKILL};

const LUCK_BASELINE: f64 = 50.0;
const LUCK_SKILL_FACTOR: f64 = 0.4;

const INPUT_BUDGET_RANGE: (u32, u32) = (1, 1000);
const INPUT_DURATION_RANGE: (u32, u32) = (1, 120);
const INPUT_AREA_RANGE: (u32, u32) = (10, 100);
const INPUT_EFFECTIVENESS_RANGE: (u32, u32) = (70, 95);
const INPUT_LUCK_RANGE: (u32, u32) = (0, 120);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("budget must be positive")]
    ZeroBudget,
    #[error("max magnitude must be positive")]
    ZeroMaxMagnitude,
    #[error("duration must be positive")]
    ZeroDuration,
    #[error("area must be a non-negative finite number, got {value}")]
    InvalidArea { value: f64 },
    #[error("cast range multiplier must be a positive finite number, got {value}")]
    InvalidCastRangeMultiplier { value: f64 },
    #[error("caster skill must be in 0..=100, got {value}")]
    SkillOutOfRange { value: u32 },
    #[error("spell effectiveness must be in 0..=100, got {value}")]
    EffectivenessOutOfRange { value: u32 },
    #[error("{element:?} weight must be a positive finite number, got {value}")]
    InvalidWeight { element: Element, value: f64 },
    #[error("{field} = {value} is outside the allowed range {expected}")]
    InputOutOfRange {
        field: &'static str,
        value: u32,
        expected: &'static str,
    },
}

/// Per-element damage multipliers (e.g. from the target's weaknesses).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementWeights {
    pub fire: f64,
    pub frost: f64,
    pub shock: f64,
}

impl Default for ElementWeights {
    fn default() -> Self {
        Self {
            fire: 1.0,
            frost: 0.9,
            shock: 1.1,
        }
    }
}

impl ElementWeights {
    pub fn get(&self, element: Element) -> f64 {
        match element {
            Element::Fire => self.fire,
            Element::Frost => self.frost,
            Element::Shock => self.shock,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellParameters {
    pub budget: u32,
    pub max_magnitude: u32,
    pub duration: u32,
    /// `0` means the spell has no area.
    pub area: f64,
    pub cast_range_multiplier: f64,
    pub caster_skill: u32,
    pub spell_effectiveness: u32,
    pub element_weights: ElementWeights,
}

impl SpellParameters {
    /// Reject values outside the domain of the cost and damage formulas.
    ///
    /// Constraints enforced:
    /// - budget, max_magnitude and duration are positive
    /// - area is finite and >= 0
    /// - cast_range_multiplier is finite and > 0
    /// - caster_skill and spell_effectiveness are in 0..=100
    /// - every element weight is finite and > 0
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.budget == 0 {
            return Err(ParameterError::ZeroBudget);
        }
        if self.max_magnitude == 0 {
            return Err(ParameterError::ZeroMaxMagnitude);
        }
        if self.duration == 0 {
            return Err(ParameterError::ZeroDuration);
        }
        if !self.area.is_finite() || self.area < 0.0 {
            return Err(ParameterError::InvalidArea { value: self.area });
        }
        if !self.cast_range_multiplier.is_finite() || self.cast_range_multiplier <= 0.0 {
            return Err(ParameterError::InvalidCastRangeMultiplier {
                value: self.cast_range_multiplier,
            });
        }
        if self.caster_skill > MAX_SKILL {
            return Err(ParameterError::SkillOutOfRange {
                value: self.caster_skill,
            });
        }
        if self.spell_effectiveness > MAX_EFFECTIVENESS {
            return Err(ParameterError::EffectivenessOutOfRange {
                value: self.spell_effectiveness,
            });
        }
        for element in Element::ALL {
            let value = self.element_weights.get(element);
            if !value.is_finite() || value <= 0.0 {
                return Err(ParameterError::InvalidWeight { element, value });
            }
        }
        Ok(())
    }
}

/// Values exactly as a player enters them in the calculator form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawInputs {
    pub budget: u32,
    pub duration: u32,
    pub area: u32,
    pub range: CastRange,
    pub weights: ElementWeights,
    pub skill: u32,
    pub effectiveness: u32,
    pub luck: u32,
    pub max_magnitude: u32,
}

impl Default for RawInputs {
    fn default() -> Self {
        Self {
            budget: 100,
            duration: 4,
            area: 0,
            range: CastRange::Touch,
            weights: ElementWeights::default(),
            skill: 100,
            effectiveness: 95,
            luck: 50,
            max_magnitude: DEFAULT_MAX_MAGNITUDE,
        }
    }
}

/// Skill after the luck bonus: `floor(skill + 0.4 * (luck - 50))`, clamped to 0..=100.
pub fn adjusted_skill(raw_skill: u32, luck: u32) -> u32 {
    let skill = (raw_skill as f64 + LUCK_SKILL_FACTOR * (luck as f64 - LUCK_BASELINE)).floor();
    skill.clamp(0.0, MAX_SKILL as f64) as u32
}

fn check_range(
    field: &'static str,
    value: u32,
    (lo, hi): (u32, u32),
    expected: &'static str,
) -> Result<(), ParameterError> {
    if (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::InputOutOfRange {
            field,
            value,
            expected,
        })
    }
}

/// Turn raw form inputs into validated [`SpellParameters`].
pub fn build_parameters(raw: &RawInputs) -> Result<SpellParameters, ParameterError> {
    check_range("budget", raw.budget, INPUT_BUDGET_RANGE, "1..=1000")?;
    check_range("duration", raw.duration, INPUT_DURATION_RANGE, "1..=120")?;
    if raw.area != 0 {
        check_range("area", raw.area, INPUT_AREA_RANGE, "0 or 10..=100")?;
    }
    check_range("skill", raw.skill, (0, MAX_SKILL), "0..=100")?;
    if raw.effectiveness != MAX_EFFECTIVENESS {
        check_range(
            "effectiveness",
            raw.effectiveness,
            INPUT_EFFECTIVENESS_RANGE,
            "70..=95 or 100",
        )?;
    }
    check_range("luck", raw.luck, INPUT_LUCK_RANGE, "0..=120")?;

    let params = SpellParameters {
        budget: raw.budget,
        max_magnitude: raw.max_magnitude,
        duration: raw.duration,
        area: raw.area as f64,
        cast_range_multiplier: raw.range.cost_multiplier(),
        caster_skill: adjusted_skill(raw.skill, raw.luck),
        spell_effectiveness: raw.effectiveness,
        element_weights: raw.weights,
    };
    params.validate()?;
    Ok(params)
}
