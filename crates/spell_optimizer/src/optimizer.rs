mod breakdown;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::data::{Element, NUM_ELEMENTS, search_domain};
use crate::{CostModel, DamageModel, ParameterError, SpellParameters};

pub use breakdown::{ElementBreakdown, SpellBreakdown, evaluate_combination};

#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("invalid spell parameters: {0}")]
    InvalidParameters(#[from] ParameterError),
    #[error("search cancelled after {frost_values_searched} frost magnitudes")]
    Cancelled { frost_values_searched: usize },
}

/// One evaluated fire/frost/shock combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResult {
    pub total_damage: f64,
    pub fire: u32,
    pub frost: u32,
    pub shock: u32,
    pub total_cost: u64,
}

/// The candidate kept by the search.
pub type BestResult = CandidateResult;

/// Starting point of every search. Also what comes back when nothing but the
/// empty spell fits the budget.
pub const NO_SPELL: CandidateResult = CandidateResult {
    total_damage: 0.0,
    fire: 0,
    frost: 0,
    shock: 0,
    total_cost: 0,
};

impl CandidateResult {
    /// More damage wins; equal damage goes to the strictly cheaper spell.
    pub fn beats(&self, best: &CandidateResult) -> bool {
        self.total_damage > best.total_damage
            || (self.total_damage == best.total_damage && self.total_cost < best.total_cost)
    }

    pub fn magnitude(&self, element: Element) -> u32 {
        match element {
            Element::Fire => self.fire,
            Element::Frost => self.frost,
            Element::Shock => self.shock,
        }
    }

    pub fn is_no_spell(&self) -> bool {
        self.fire == 0 && self.frost == 0 && self.shock == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub best: BestResult,
    pub candidates_evaluated: u64,
}

impl SearchReport {
    fn new() -> Self {
        Self {
            best: NO_SPELL,
            candidates_evaluated: 0,
        }
    }
}

/// Cost and damage per second for each magnitude in one element's search domain
/// that is affordable on its own.
///
/// Cost never decreases with magnitude, so the table stops at the first
/// magnitude over budget. Its size follows the budget, not `max_magnitude`.
struct ElementTable {
    magnitudes: Vec<u32>,
    costs: Vec<u64>,
    damages: Vec<f64>,
}

impl ElementTable {
    fn build(
        element: Element,
        max_magnitude: u32,
        budget: u64,
        cost_model: &CostModel,
        damage_model: &DamageModel,
    ) -> Self {
        let mut table = Self {
            magnitudes: Vec::new(),
            costs: Vec::new(),
            damages: Vec::new(),
        };
        for magnitude in search_domain(max_magnitude) {
            let cost = cost_model.cost(element, magnitude);
            if cost > budget {
                break;
            }
            table.magnitudes.push(magnitude);
            table.costs.push(cost);
            table.damages.push(damage_model.damage(element, magnitude));
        }
        table
    }

    fn len(&self) -> usize {
        self.magnitudes.len()
    }
}

/// Bounded search for the most damaging affordable magnitude triple.
///
/// Frost is the outer loop, fire the middle, shock the inner, all ascending.
/// Because cost never decreases with magnitude, each loop stops at the first
/// unaffordable value: an unaffordable frost ends the whole search, an
/// unaffordable fire or shock only ends its own loop.
pub struct Optimizer {
    budget: u64,
    duration: u32,
    max_magnitude: u32,
    tables: [ElementTable; NUM_ELEMENTS],
}

impl Optimizer {
    /// `max_magnitude` caps every element and takes precedence over
    /// `params.max_magnitude`.
    pub fn new(params: &SpellParameters, max_magnitude: u32) -> Result<Self, OptimizerError> {
        params.validate()?;
        if max_magnitude == 0 {
            return Err(ParameterError::ZeroMaxMagnitude.into());
        }

        let cost_model = CostModel::new(params);
        let damage_model = DamageModel::new(params);
        let budget = params.budget as u64;
        let tables = Element::ALL.map(|element| {
            ElementTable::build(element, max_magnitude, budget, &cost_model, &damage_model)
        });

        Ok(Self {
            budget,
            duration: params.duration,
            max_magnitude,
            tables,
        })
    }

    fn table(&self, element: Element) -> &ElementTable {
        match element {
            Element::Fire => &self.tables[0],
            Element::Frost => &self.tables[1],
            Element::Shock => &self.tables[2],
        }
    }

    pub fn search(&self) -> SearchReport {
        debug!(
            budget = self.budget,
            max_magnitude = self.max_magnitude,
            "starting spell search"
        );
        let mut report = SearchReport::new();
        for frost_idx in 0..self.table(Element::Frost).len() {
            if !self.search_frost(frost_idx, &mut report) {
                break;
            }
        }
        self.log_finished(&report);
        report
    }

    /// Like [`Optimizer::search`], but asks `should_stop` before every frost magnitude.
    pub fn search_until<F>(&self, mut should_stop: F) -> Result<SearchReport, OptimizerError>
    where
        F: FnMut() -> bool,
    {
        debug!(
            budget = self.budget,
            max_magnitude = self.max_magnitude,
            "starting cancellable spell search"
        );
        let mut report = SearchReport::new();
        for frost_idx in 0..self.table(Element::Frost).len() {
            if should_stop() {
                debug!(frost_values_searched = frost_idx, "spell search cancelled");
                return Err(OptimizerError::Cancelled {
                    frost_values_searched: frost_idx,
                });
            }
            if !self.search_frost(frost_idx, &mut report) {
                break;
            }
        }
        self.log_finished(&report);
        Ok(report)
    }

    /// Scan every fire/shock pair for one frost magnitude.
    ///
    /// Returns false once frost alone is over budget, which ends the search.
    fn search_frost(&self, frost_idx: usize, report: &mut SearchReport) -> bool {
        let fire = self.table(Element::Fire);
        let frost = self.table(Element::Frost);
        let shock = self.table(Element::Shock);

        let frost_cost = frost.costs[frost_idx];
        if frost_cost > self.budget {
            return false;
        }

        for fire_idx in 0..fire.len() {
            let fire_cost = fire.costs[fire_idx];
            if fire_cost.saturating_add(frost_cost) > self.budget {
                break;
            }

            for shock_idx in 0..shock.len() {
                let total_cost = fire_cost
                    .saturating_add(frost_cost)
                    .saturating_add(shock.costs[shock_idx]);
                if total_cost > self.budget {
                    break;
                }

                report.candidates_evaluated += 1;
                let candidate = CandidateResult {
                    total_damage: DamageModel::total_damage(
                        self.duration,
                        fire.damages[fire_idx],
                        frost.damages[frost_idx],
                        shock.damages[shock_idx],
                    ),
                    fire: fire.magnitudes[fire_idx],
                    frost: frost.magnitudes[frost_idx],
                    shock: shock.magnitudes[shock_idx],
                    total_cost,
                };
                if candidate.beats(&report.best) {
                    report.best = candidate;
                }
            }
        }
        true
    }

    fn log_finished(&self, report: &SearchReport) {
        debug!(
            candidates = report.candidates_evaluated,
            damage = report.best.total_damage,
            fire = report.best.fire,
            frost = report.best.frost,
            shock = report.best.shock,
            cost = report.best.total_cost,
            "spell search finished"
        );
    }
}

/// Find the best spell for `params` with every element capped at `max_magnitude`.
///
/// The `max_magnitude` argument overrides `params.max_magnitude`; callers that
/// want the parameter's own cap pass it explicitly.
pub fn optimize(
    params: &SpellParameters,
    max_magnitude: u32,
) -> Result<BestResult, OptimizerError> {
    Ok(Optimizer::new(params, max_magnitude)?.search().best)
}
