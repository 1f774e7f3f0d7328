//! Environment-driven defaults for the command-line front end.
use std::env;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Overrides the default per-element magnitude cap when no request file is given.
    pub max_magnitude: Option<u32>,
    pub output: OutputFormat,
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SPELL_OPTIMIZER_MAX_MAGNITUDE` - Magnitude cap per element (default: 100)
    /// - `SPELL_OPTIMIZER_OUTPUT` - `text` or `json` (default: text)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(max) = read_env::<u32>("SPELL_OPTIMIZER_MAX_MAGNITUDE") {
            config.max_magnitude = Some(max.max(1));
        }
        if let Some(output) = env::var("SPELL_OPTIMIZER_OUTPUT")
            .ok()
            .as_deref()
            .and_then(OutputFormat::parse)
        {
            config.output = output;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parsing() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse(" text "), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("yaml"), None);
    }
}
