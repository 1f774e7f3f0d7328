use serde::Serialize;

use crate::data::{Element, NUM_ELEMENTS};
use crate::{CostModel, DamageModel, ParameterError, SpellParameters};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBreakdown {
    pub element: Element,
    pub magnitude: u32,
    pub cost: u64,
    /// Damage per second, before duration.
    pub damage: f64,
}

/// Cost and damage of a hand-picked combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellBreakdown {
    pub elements: [ElementBreakdown; NUM_ELEMENTS],
    pub total_cost: u64,
    pub total_damage: f64,
    pub budget: u32,
    pub within_budget: bool,
}

impl SpellBreakdown {
    pub fn element(&self, element: Element) -> &ElementBreakdown {
        match element {
            Element::Fire => &self.elements[0],
            Element::Frost => &self.elements[1],
            Element::Shock => &self.elements[2],
        }
    }
}

/// Price out one fire/frost/shock combination without searching.
///
/// Any magnitude is accepted, including 1 and 2 and values past the search cap.
pub fn evaluate_combination(
    params: &SpellParameters,
    fire: u32,
    frost: u32,
    shock: u32,
) -> Result<SpellBreakdown, ParameterError> {
    params.validate()?;
    let cost_model = CostModel::new(params);
    let damage_model = DamageModel::new(params);

    let elements = [(Element::Fire, fire), (Element::Frost, frost), (Element::Shock, shock)].map(
        |(element, magnitude)| ElementBreakdown {
            element,
            magnitude,
            cost: cost_model.cost(element, magnitude),
            damage: damage_model.damage(element, magnitude),
        },
    );

    let total_cost = elements
        .iter()
        .fold(0u64, |total, e| total.saturating_add(e.cost));
    let total_damage = DamageModel::total_damage(
        params.duration,
        elements[0].damage,
        elements[1].damage,
        elements[2].damage,
    );

    Ok(SpellBreakdown {
        elements,
        total_cost,
        total_damage,
        budget: params.budget,
        within_budget: total_cost <= params.budget as u64,
    })
}
