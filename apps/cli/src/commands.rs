//! Subcommands, their request merging, and the response records they print.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

use spell_optimizer::{
    BestResult, CastRange, Element, Optimizer, RawInputs, SpellBreakdown, SpellParameters,
    build_parameters, evaluate_combination,
};

use crate::config::{CliConfig, OutputFormat};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RangeArg {
    /// On touch (1x cost)
    Touch,
    /// On target (1.5x cost)
    Target,
}

impl From<RangeArg> for CastRange {
    fn from(range: RangeArg) -> Self {
        match range {
            RangeArg::Touch => CastRange::Touch,
            RangeArg::Target => CastRange::Target,
        }
    }
}

/// Spell inputs shared by every subcommand. Flags override the request file.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// JSON request file (camelCase keys, missing keys use defaults)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Magicka budget (1-1000)
    #[arg(long)]
    pub budget: Option<u32>,

    /// Duration in seconds (1-120)
    #[arg(long)]
    pub duration: Option<u32>,

    /// Area (0 = none, otherwise 10-100)
    #[arg(long)]
    pub area: Option<u32>,

    #[arg(long, value_enum)]
    pub range: Option<RangeArg>,

    #[arg(long)]
    pub fire_weight: Option<f64>,

    #[arg(long)]
    pub frost_weight: Option<f64>,

    #[arg(long)]
    pub shock_weight: Option<f64>,

    /// Destruction skill before the luck bonus (0-100)
    #[arg(long)]
    pub skill: Option<u32>,

    /// Spell effectiveness percent (70-95 or 100)
    #[arg(long)]
    pub effectiveness: Option<u32>,

    /// Luck attribute (0-120)
    #[arg(long)]
    pub luck: Option<u32>,

    /// Highest magnitude tried per element
    #[arg(long)]
    pub max_magnitude: Option<u32>,
}

impl InputArgs {
    /// Resolve the raw inputs: request file or defaults, then flags on top.
    pub fn resolve(&self, config: &CliConfig) -> Result<RawInputs> {
        let mut raw = match &self.input {
            Some(path) => load_request(path)?,
            None => {
                let mut raw = RawInputs::default();
                if let Some(max) = config.max_magnitude {
                    raw.max_magnitude = max;
                }
                raw
            }
        };
        self.apply(&mut raw);
        Ok(raw)
    }

    fn apply(&self, raw: &mut RawInputs) {
        if let Some(budget) = self.budget {
            raw.budget = budget;
        }
        if let Some(duration) = self.duration {
            raw.duration = duration;
        }
        if let Some(area) = self.area {
            raw.area = area;
        }
        if let Some(range) = self.range {
            raw.range = range.into();
        }
        if let Some(weight) = self.fire_weight {
            raw.weights.fire = weight;
        }
        if let Some(weight) = self.frost_weight {
            raw.weights.frost = weight;
        }
        if let Some(weight) = self.shock_weight {
            raw.weights.shock = weight;
        }
        if let Some(skill) = self.skill {
            raw.skill = skill;
        }
        if let Some(effectiveness) = self.effectiveness {
            raw.effectiveness = effectiveness;
        }
        if let Some(luck) = self.luck {
            raw.luck = luck;
        }
        if let Some(max) = self.max_magnitude {
            raw.max_magnitude = max;
        }
    }

    fn parameters(&self, config: &CliConfig) -> Result<SpellParameters> {
        let raw = self.resolve(config)?;
        build_parameters(&raw).context("Invalid spell inputs")
    }
}

fn load_request(path: &Path) -> Result<RawInputs> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse request file {}", path.display()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub best: BestResult,
    pub candidates_evaluated: u64,
    pub compute_seconds: f64,
    pub parameters: SpellParameters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub breakdown: SpellBreakdown,
    pub parameters: SpellParameters,
}

/// Search for the most damaging spell within budget
#[derive(Args, Debug)]
pub struct Optimize {
    #[command(flatten)]
    pub inputs: InputArgs,
}

impl Optimize {
    pub fn execute(self, config: &CliConfig, format: OutputFormat) -> Result<()> {
        let parameters = self.inputs.parameters(config)?;
        info!(
            budget = parameters.budget,
            skill = parameters.caster_skill,
            max_magnitude = parameters.max_magnitude,
            "optimizing spell"
        );

        let start = Instant::now();
        let report = Optimizer::new(&parameters, parameters.max_magnitude)
            .context("Failed to set up optimizer")?
            .search();
        let compute_seconds = start.elapsed().as_secs_f64();

        let response = OptimizeResponse {
            best: report.best,
            candidates_evaluated: report.candidates_evaluated,
            compute_seconds,
            parameters,
        };
        emit(format, &response, render_optimize)
    }
}

/// Price out a specific fire/frost/shock combination
#[derive(Args, Debug)]
pub struct Evaluate {
    #[arg(long, default_value_t = 0)]
    pub fire: u32,

    #[arg(long, default_value_t = 0)]
    pub frost: u32,

    #[arg(long, default_value_t = 0)]
    pub shock: u32,

    #[command(flatten)]
    pub inputs: InputArgs,
}

impl Evaluate {
    pub fn execute(self, config: &CliConfig, format: OutputFormat) -> Result<()> {
        let parameters = self.inputs.parameters(config)?;
        let breakdown = evaluate_combination(&parameters, self.fire, self.frost, self.shock)
            .context("Failed to evaluate combination")?;
        let response = EvaluateResponse {
            breakdown,
            parameters,
        };
        emit(format, &response, render_evaluate)
    }
}

fn emit<T: Serialize>(format: OutputFormat, response: &T, render: fn(&T) -> String) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(response).context("Failed to serialize response")?;
            println!("{json}");
        }
        OutputFormat::Text => println!("{}", render(response)),
    }
    Ok(())
}

fn label(element: Element) -> &'static str {
    match element {
        Element::Fire => "Fire",
        Element::Frost => "Frost",
        Element::Shock => "Shock",
    }
}

pub fn render_optimize(response: &OptimizeResponse) -> String {
    let best = &response.best;
    let mut out = String::new();
    if best.is_no_spell() {
        out.push_str(&format!(
            "No useful spell fits a budget of {}\n",
            response.parameters.budget
        ));
    }
    out.push_str(&format!("Best Damage = {}\n", best.total_damage));
    out.push_str(&format!("Cost = {}\n", best.total_cost));
    out.push_str(&format!(
        "Fire = {} | Frost = {} | Shock = {}",
        best.fire, best.frost, best.shock
    ));
    out
}

pub fn render_evaluate(response: &EvaluateResponse) -> String {
    let breakdown = &response.breakdown;
    let mut out = String::new();
    for element in Element::ALL {
        let part = breakdown.element(element);
        out.push_str(&format!(
            "{:<6} magnitude = {:>3} | cost = {:>5} | damage/s = {}\n",
            label(element),
            part.magnitude,
            part.cost,
            part.damage
        ));
    }
    out.push_str(&format!("Total Damage = {}\n", breakdown.total_damage));
    out.push_str(&format!("Total Cost = {}", breakdown.total_cost));
    if breakdown.within_budget {
        out.push_str(&format!(" (budget {})", breakdown.budget));
    } else {
        out.push_str(&format!(
            " (over budget {} by {})",
            breakdown.budget,
            breakdown.total_cost - breakdown.budget as u64
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = InputArgs {
            budget: Some(250),
            range: Some(RangeArg::Target),
            frost_weight: Some(1.3),
            luck: Some(60),
            ..InputArgs::default()
        };
        let raw = args.resolve(&CliConfig::default()).unwrap();
        assert_eq!(raw.budget, 250);
        assert_eq!(raw.range, CastRange::Target);
        assert_eq!(raw.weights.frost, 1.3);
        assert_eq!(raw.weights.fire, 1.0);
        assert_eq!(raw.luck, 60);
        assert_eq!(raw.duration, 4);
    }

    #[test]
    fn env_cap_applies_without_request_file() {
        let config = CliConfig {
            max_magnitude: Some(40),
            ..CliConfig::default()
        };
        let raw = InputArgs::default().resolve(&config).unwrap();
        assert_eq!(raw.max_magnitude, 40);

        let args = InputArgs {
            max_magnitude: Some(70),
            ..InputArgs::default()
        };
        assert_eq!(args.resolve(&config).unwrap().max_magnitude, 70);
    }

    #[test]
    fn request_file_then_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"budget": 300, "duration": 8, "skill": 40}}"#).unwrap();

        let args = InputArgs {
            input: Some(file.path().to_path_buf()),
            duration: Some(12),
            ..InputArgs::default()
        };
        let raw = args.resolve(&CliConfig::default()).unwrap();
        assert_eq!(raw.budget, 300);
        assert_eq!(raw.skill, 40);
        assert_eq!(raw.duration, 12);
    }

    #[test]
    fn malformed_request_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let args = InputArgs {
            input: Some(file.path().to_path_buf()),
            ..InputArgs::default()
        };
        assert!(args.resolve(&CliConfig::default()).is_err());
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        let args = InputArgs {
            duration: Some(500),
            ..InputArgs::default()
        };
        assert!(args.parameters(&CliConfig::default()).is_err());
    }

    #[test]
    fn optimize_text_output() {
        let parameters = build_parameters(&RawInputs::default()).unwrap();
        let response = OptimizeResponse {
            best: BestResult {
                total_damage: 36.0,
                fire: 3,
                frost: 0,
                shock: 7,
                total_cost: 12,
            },
            candidates_evaluated: 10,
            compute_seconds: 0.0,
            parameters,
        };
        assert_eq!(
            render_optimize(&response),
            "Best Damage = 36\nCost = 12\nFire = 3 | Frost = 0 | Shock = 7"
        );
    }

    #[test]
    fn evaluate_text_reports_overspend() {
        let parameters = build_parameters(&RawInputs {
            budget: 10,
            ..RawInputs::default()
        })
        .unwrap();
        let breakdown = evaluate_combination(&parameters, 50, 50, 50).unwrap();
        let text = render_evaluate(&EvaluateResponse {
            breakdown,
            parameters,
        });
        assert!(text.contains("over budget 10 by"));
        assert!(text.starts_with("Fire   magnitude =  50"));
    }
}
