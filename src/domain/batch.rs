//! Bulk quoting: many shipments against one rate snapshot.

use tracing::{debug, warn};

use super::entities::{Constraint, Goal, QuoteResult, RateRecord};
use super::selector::{filter_by_constraint, quote, select_best};
use super::weight::{parse_weight, WeightFormatError};

pub const NO_ROUTE_MODE: &str = "N/A";
pub const NO_ROUTE_COST: &str = "No valid route";

/// One shipment in a batch, with the weight still as the user typed it.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchRequest {
    pub origin: String,
    pub destination: String,
    pub weight_input: String,
}

impl BatchRequest {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        weight_input: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            weight_input: weight_input.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum BatchOutcome {
    /// Best lane for the batch goal.
    Routed(QuoteResult),
    /// No lane for the pair survives the constraint.
    NoValidRoute,
    /// The weight could not be parsed; the request was never quoted.
    InvalidWeight(WeightFormatError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct BatchRow {
    pub request: BatchRequest,
    pub outcome: BatchOutcome,
}

impl BatchRow {
    pub fn is_routed(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Routed(_))
    }

    pub fn best(&self) -> Option<&QuoteResult> {
        match &self.outcome {
            BatchOutcome::Routed(result) => Some(result),
            _ => None,
        }
    }

    pub fn mode_label(&self) -> String {
        self.best()
            .map(|result| result.mode().to_string())
            .unwrap_or_else(|| NO_ROUTE_MODE.to_string())
    }

    pub fn cost_label(&self) -> String {
        match &self.outcome {
            BatchOutcome::Routed(result) => format!("{:.2}", result.total_cost),
            BatchOutcome::NoValidRoute => NO_ROUTE_COST.to_string(),
            BatchOutcome::InvalidWeight(err) => format!("{NO_ROUTE_COST} ({err})"),
        }
    }
}

/// Quote every request independently.
///
/// A request that fails (bad weight, unknown lane, nothing within the
/// constraint) becomes a sentinel row; the rest of the batch still runs.
/// Rows come back in request order.
pub fn process_batch(
    records: &[RateRecord],
    requests: &[BatchRequest],
    goal: Goal,
    constraint: Constraint,
) -> Vec<BatchRow> {
    let rows: Vec<BatchRow> = requests
        .iter()
        .map(|request| BatchRow {
            request: request.clone(),
            outcome: process_request(records, request, goal, constraint),
        })
        .collect();

    let routed = rows.iter().filter(|row| row.is_routed()).count();
    debug!(
        requests = requests.len(),
        routed,
        goal = goal.key(),
        "processed batch"
    );
    rows
}

fn process_request(
    records: &[RateRecord],
    request: &BatchRequest,
    goal: Goal,
    constraint: Constraint,
) -> BatchOutcome {
    let weight_kg = match parse_weight(&request.weight_input) {
        Ok(weight) => weight,
        Err(err) => {
            warn!(
                origin = %request.origin,
                destination = %request.destination,
                "skipping batch row: {err}"
            );
            return BatchOutcome::InvalidWeight(err);
        }
    };

    let quoted = quote(records, &request.origin, &request.destination, weight_kg);
    let allowed = filter_by_constraint(&quoted, constraint.max_cost, constraint.max_days);
    match select_best(&allowed, goal) {
        Ok(best) => BatchOutcome::Routed(best),
        Err(_) => BatchOutcome::NoValidRoute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TransportMode;

    fn records() -> Vec<RateRecord> {
        let lane = |mode, rate_per_km, transit_days| RateRecord {
            origin: "A".into(),
            destination: "B".into(),
            mode,
            rate_per_km,
            distance_km: 100.0,
            transit_days,
            co2_per_km: 0.1,
        };
        vec![
            lane(TransportMode::Air, 0.05, 1.0),
            lane(TransportMode::Sea, 0.01, 30.0),
        ]
    }

    #[test]
    fn bad_rows_do_not_abort_the_batch() {
        crate::logging::init_test_logging();
        let requests = vec![
            BatchRequest::new("A", "B", "1000kg"),
            BatchRequest::new("X", "Y", "bad"),
        ];
        let rows = process_batch(&records(), &requests, Goal::Cheapest, Constraint::unbounded());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].best().map(|r| r.mode()), Some(TransportMode::Sea));
        assert!(matches!(rows[1].outcome, BatchOutcome::InvalidWeight(_)));
        assert_eq!(rows[1].mode_label(), NO_ROUTE_MODE);
        assert!(rows[1].cost_label().starts_with(NO_ROUTE_COST));
    }

    #[test]
    fn unknown_lane_is_a_sentinel_row() {
        let requests = vec![
            BatchRequest::new("X", "Y", "10"),
            BatchRequest::new("A", "B", "10"),
        ];
        let rows = process_batch(&records(), &requests, Goal::Fastest, Constraint::unbounded());

        assert_eq!(rows[0].outcome, BatchOutcome::NoValidRoute);
        assert_eq!(rows[0].cost_label(), NO_ROUTE_COST);
        assert_eq!(rows[1].mode_label(), "air");
    }

    #[test]
    fn constraint_applies_before_selection() {
        let requests = vec![BatchRequest::new("A", "B", "10")];
        // air costs 50 and takes 1 day, sea costs 10 and takes 30 days
        let rows = process_batch(&records(), &requests, Goal::Cheapest, Constraint::new(100.0, 5.0));
        assert_eq!(rows[0].mode_label(), "air");

        let rows = process_batch(&records(), &requests, Goal::Cheapest, Constraint::new(20.0, 5.0));
        assert_eq!(rows[0].outcome, BatchOutcome::NoValidRoute);
    }

    #[test]
    fn each_row_uses_its_own_weight() {
        let requests = vec![
            BatchRequest::new("A", "B", "10"),
            BatchRequest::new("A", "B", "20 kg"),
        ];
        let rows = process_batch(&records(), &requests, Goal::Cheapest, Constraint::unbounded());
        let first = rows[0].best().unwrap().total_cost;
        let second = rows[1].best().unwrap().total_cost;
        assert!((second - 2.0 * first).abs() < 1e-9);
    }
}
