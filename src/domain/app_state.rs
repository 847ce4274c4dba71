use serde::{Deserialize, Serialize};

use super::batch::BatchRow;
use super::entities::{Constraint, Goal, QuoteResult};
use crate::config::AppConfig;
use crate::infra::rates::RateSnapshot;

/// Shipment details as typed into the quote form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipmentForm {
    pub origin: String,
    pub destination: String,
    pub weight_input: String,
}

impl Default for ShipmentForm {
    fn default() -> Self {
        Self {
            origin: "Shanghai".to_string(),
            destination: "Los Angeles".to_string(),
            weight_input: "1000".to_string(),
        }
    }
}

/// Optional upper bounds, kept as entered. Empty means "no limit".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintForm {
    pub max_cost: String,
    pub max_days: String,
}

impl ConstraintForm {
    pub fn to_constraint(&self) -> Result<Constraint, String> {
        let max_cost = parse_limit(&self.max_cost, "Max cost")?;
        let max_days = parse_limit(&self.max_days, "Max days")?;
        Ok(Constraint::new(max_cost, max_days))
    }
}

fn parse_limit(raw: &str, label: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(f64::INFINITY);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(format!("{label} must be a non-negative number")),
    }
}

/// The result of the most recent Calculate click.
#[derive(Clone, Debug, PartialEq)]
pub struct QuoteView {
    pub origin: String,
    pub destination: String,
    pub weight_kg: f64,
    /// Every lane for the pair, ranked by cost.
    pub ranked: Vec<QuoteResult>,
    /// `ranked` after the constraint.
    pub allowed: Vec<QuoteResult>,
    /// The limits `allowed` was filtered with, as they stood at Calculate.
    pub constraint: Constraint,
}

impl QuoteView {
    /// Whether the quote was run with at least one finite limit.
    pub fn is_limited(&self) -> bool {
        self.constraint != Constraint::unbounded()
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub shipment: ShipmentForm,
    pub constraint: ConstraintForm,
    pub goal: Goal,
    pub settings: AppConfig,
    pub snapshot: Option<RateSnapshot>,
    pub last_quote: Option<QuoteView>,
    pub batch_input: String,
    pub batch_rows: Vec<BatchRow>,
}

impl AppState {
    pub fn with_config(settings: AppConfig) -> Self {
        Self {
            settings,
            batch_input: DEFAULT_BATCH_INPUT.to_string(),
            ..Self::default()
        }
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.shipment = persisted.shipment;
        self.constraint = persisted.constraint;
        self.goal = persisted.goal;
        if let Some(source) = persisted.data_source {
            self.settings.data_source = source;
        }
        if let Some(dir) = persisted.output_dir {
            self.settings.output_dir = dir.into();
        }
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            shipment: self.shipment.clone(),
            constraint: self.constraint.clone(),
            goal: self.goal,
            data_source: Some(self.settings.data_source.clone()),
            output_dir: Some(self.settings.output_dir.display().to_string()),
        }
    }
}

pub const DEFAULT_BATCH_INPUT: &str = "origin,destination,weight\nShanghai,Los Angeles,1000kg\n";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub shipment: ShipmentForm,
    #[serde(default)]
    pub constraint: ConstraintForm,
    #[serde(default)]
    pub goal: Goal,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub output_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_limits_are_unbounded() {
        let constraint = ConstraintForm::default().to_constraint().unwrap();
        assert_eq!(constraint, Constraint::unbounded());
    }

    #[test]
    fn limits_must_be_non_negative_numbers() {
        let form = ConstraintForm {
            max_cost: "1500".into(),
            max_days: " 10 ".into(),
        };
        assert_eq!(form.to_constraint(), Ok(Constraint::new(1500.0, 10.0)));

        let bad = ConstraintForm {
            max_cost: "-1".into(),
            max_days: String::new(),
        };
        assert!(bad.to_constraint().is_err());
    }

    #[test]
    fn quote_view_remembers_its_own_limits() {
        let mut state = AppState::default();
        state.constraint.max_cost = "900".into();
        let applied = state.constraint.to_constraint().unwrap();
        state.last_quote = Some(QuoteView {
            origin: "A".into(),
            destination: "B".into(),
            weight_kg: 1.0,
            ranked: Vec::new(),
            allowed: Vec::new(),
            constraint: applied,
        });

        // editing the form after the run does not change what the view reports
        state.constraint.max_cost.clear();
        let view = state.last_quote.as_ref().unwrap();
        assert!(view.is_limited());

        let unlimited = QuoteView {
            constraint: Constraint::unbounded(),
            ..view.clone()
        };
        assert!(!unlimited.is_limited());
    }

    #[test]
    fn persisted_state_round_trips_settings() {
        let mut state = AppState::with_config(AppConfig::default());
        state.goal = Goal::Greenest;
        state.settings.data_source = "https://example.com/rates.csv".into();

        let mut restored = AppState::default();
        restored.apply_persisted(state.to_persisted());
        assert_eq!(restored.goal, Goal::Greenest);
        assert_eq!(restored.settings.data_source, "https://example.com/rates.csv");
    }
}
