//! Mathle target validation

use crate::core::{Equation, Grammar, Ratio};
use crate::error::ConfigError;
use crate::game::{ModeConfig, TargetSequence};

/// Whether an equation can be used as a Mathle target
pub struct EquationReport {
    pub input: String,
    pub length: usize,
    /// Both sides' values, when the equation parses and evaluates
    pub values: Option<(Ratio, Ratio)>,
    pub error: Option<ConfigError>,
}

impl EquationReport {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Check `input` against `config` and evaluate it where possible
#[must_use]
pub fn validate_equation(input: &str, config: &ModeConfig) -> EquationReport {
    let input = input.trim();
    let tokens = Grammar::Equation.tokenize(input).ok();
    let values = tokens
        .as_deref()
        .and_then(|tokens| Equation::parse(tokens).ok())
        .and_then(|equation| equation.evaluate().ok());

    EquationReport {
        input: input.to_string(),
        length: tokens.as_ref().map_or_else(|| input.chars().count(), Vec::len),
        values,
        error: TargetSequence::new(input, config).err(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EquationError;
    use crate::game::GameMode;

    fn mathle() -> ModeConfig {
        ModeConfig::for_mode(GameMode::Mathle)
    }

    #[test]
    fn balanced_equation_is_valid() {
        let report = validate_equation("3*4=12", &mathle());
        assert!(report.is_valid());
        assert_eq!(report.length, 6);
        assert_eq!(report.values, Some((Ratio::integer(12), Ratio::integer(12))));
    }

    #[test]
    fn unbalanced_equation_reports_values() {
        let report = validate_equation("2+2=5", &mathle());
        assert!(!report.is_valid());
        assert_eq!(report.values, Some((Ratio::integer(4), Ratio::integer(5))));
        assert!(matches!(
            report.error,
            Some(ConfigError::InvalidEquation {
                source: EquationError::Unbalanced { .. },
                ..
            })
        ));
    }

    #[test]
    fn malformed_equation_has_no_values() {
        let report = validate_equation("12+=19", &mathle());
        assert!(!report.is_valid());
        assert_eq!(report.values, None);
    }

    #[test]
    fn letters_are_rejected() {
        let report = validate_equation("x+1=2", &mathle());
        assert_eq!(report.length, 5);
        assert!(matches!(
            report.error,
            Some(ConfigError::InvalidTarget { .. })
        ));
    }
}
