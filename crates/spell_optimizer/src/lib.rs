mod cost;
mod damage;
mod data;
mod optimizer;
mod params;

pub use cost::{CostModel, skill_multiplier, spell_cost};
pub use damage::{DamageModel, damage_after_effectiveness};
pub use data::{CastRange, DEFAULT_MAX_MAGNITUDE, Element, MIN_CAST_MAGNITUDE, search_domain};
pub use optimizer::{
    BestResult, CandidateResult, ElementBreakdown, NO_SPELL, Optimizer, OptimizerError,
    SearchReport, SpellBreakdown, evaluate_combination, optimize,
};
pub use params::{
    ElementWeights, ParameterError, RawInputs, SpellParameters, adjusted_skill, build_parameters,
};
