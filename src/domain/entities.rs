use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Freight transport mode offered on a lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Air,
    Sea,
    Rail,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [TransportMode::Air, TransportMode::Sea, TransportMode::Rail];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Sea => "sea",
            Self::Rail => "rail",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Air => "✈️",
            Self::Sea => "🚢",
            Self::Rail => "🚆",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl FromStr for TransportMode {
    type Err = UnknownMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownMode(value.to_string()))
    }
}

/// One row of the rate table. Identity is `(origin, destination, mode)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub origin: String,
    pub destination: String,
    pub mode: TransportMode,
    pub rate_per_km: f64,
    pub distance_km: f64,
    pub transit_days: f64,
    pub co2_per_km: f64,
}

impl RateRecord {
    /// Cost of moving `weight_kg` along this lane.
    pub fn total_cost(&self, weight_kg: f64) -> f64 {
        self.rate_per_km * self.distance_km * weight_kg
    }

    pub fn serves(&self, origin: &str, destination: &str) -> bool {
        self.origin == origin && self.destination == destination
    }

    pub fn identity(&self) -> (&str, &str, TransportMode) {
        (&self.origin, &self.destination, self.mode)
    }
}

/// A rate record priced for one specific weight.
///
/// Built fresh by every quote; the total is never carried over to a query
/// with a different weight.
#[derive(Clone, Debug, PartialEq)]
pub struct QuoteResult {
    pub record: RateRecord,
    pub weight_kg: f64,
    pub total_cost: f64,
}

impl QuoteResult {
    pub fn new(record: RateRecord, weight_kg: f64) -> Self {
        let total_cost = record.total_cost(weight_kg);
        Self {
            record,
            weight_kg,
            total_cost,
        }
    }

    pub fn mode(&self) -> TransportMode {
        self.record.mode
    }

    pub fn transit_days(&self) -> f64 {
        self.record.transit_days
    }

    pub fn co2_per_km(&self) -> f64 {
        self.record.co2_per_km
    }
}

/// Upper bounds applied to quoted results.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub max_cost: f64,
    pub max_days: f64,
}

impl Constraint {
    pub fn new(max_cost: f64, max_days: f64) -> Self {
        Self { max_cost, max_days }
    }

    /// A constraint that admits every result.
    pub fn unbounded() -> Self {
        Self {
            max_cost: f64::INFINITY,
            max_days: f64::INFINITY,
        }
    }

    pub fn admits(&self, result: &QuoteResult) -> bool {
        result.total_cost <= self.max_cost && result.transit_days() <= self.max_days
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// What the shipper is optimising for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    #[default]
    Cheapest,
    Fastest,
    Greenest,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::Cheapest, Goal::Fastest, Goal::Greenest];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cheapest => "Cheapest",
            Self::Fastest => "Fastest",
            Self::Greenest => "Greenest",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Cheapest => "🔹",
            Self::Fastest => "🚀",
            Self::Greenest => "🌱",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Cheapest => "cheapest",
            Self::Fastest => "fastest",
            Self::Greenest => "greenest",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownGoal(pub String);

impl fmt::Display for UnknownGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown goal '{}' (expected cheapest, fastest or greenest)", self.0)
    }
}

impl std::error::Error for UnknownGoal {}

impl FromStr for Goal {
    type Err = UnknownGoal;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Goal::ALL
            .into_iter()
            .find(|goal| goal.key().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownGoal(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane(mode: TransportMode) -> RateRecord {
        RateRecord {
            origin: "Shanghai".into(),
            destination: "Los Angeles".into(),
            mode,
            rate_per_km: 0.002,
            distance_km: 10_000.0,
            transit_days: 20.0,
            co2_per_km: 0.01,
        }
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Air".parse::<TransportMode>(), Ok(TransportMode::Air));
        assert_eq!(" SEA ".parse::<TransportMode>(), Ok(TransportMode::Sea));
        assert!("truck".parse::<TransportMode>().is_err());
    }

    #[test]
    fn quote_result_prices_for_its_own_weight() {
        let light = QuoteResult::new(lane(TransportMode::Sea), 100.0);
        let heavy = QuoteResult::new(lane(TransportMode::Sea), 300.0);
        assert_eq!(light.total_cost, 2_000.0);
        assert_eq!(heavy.total_cost, 6_000.0);
    }

    #[test]
    fn unbounded_constraint_admits_everything() {
        let result = QuoteResult::new(lane(TransportMode::Air), 1e9);
        assert!(Constraint::unbounded().admits(&result));
        assert!(!Constraint::new(10.0, 100.0).admits(&result));
    }

    #[test]
    fn goal_parses_from_key() {
        assert_eq!("fastest".parse::<Goal>(), Ok(Goal::Fastest));
        assert_eq!("Greenest".parse::<Goal>(), Ok(Goal::Greenest));
        assert!("slowest".parse::<Goal>().is_err());
    }

    #[test]
    fn records_match_lanes_exactly() {
        let record = lane(TransportMode::Rail);
        assert!(record.serves("Shanghai", "Los Angeles"));
        assert!(!record.serves("shanghai", "Los Angeles"));
        assert!(!record.serves("Shanghai ", "Los Angeles"));
    }
}
