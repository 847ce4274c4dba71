//! Quote ranking and selection.

use thiserror::Error;
use tracing::debug;

use super::entities::{Constraint, Goal, QuoteResult, RateRecord, TransportMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("cannot select the {0} option from an empty result set")]
    Empty(&'static str),
}

/// Price every lane between `origin` and `destination` for `weight_kg`.
///
/// Matching is exact and case-sensitive. Results are ordered by ascending
/// total cost; lanes with equal totals keep their table order. A pair with no
/// lanes yields an empty vector.
pub fn quote(
    records: &[RateRecord],
    origin: &str,
    destination: &str,
    weight_kg: f64,
) -> Vec<QuoteResult> {
    let mut results: Vec<QuoteResult> = records
        .iter()
        .filter(|record| record.serves(origin, destination))
        .map(|record| QuoteResult::new(record.clone(), weight_kg))
        .collect();

    // sort_by is stable, so ties keep their input order.
    results.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));

    debug!(
        origin,
        destination,
        weight_kg,
        matches = results.len(),
        "quoted lanes"
    );
    results
}

/// Keep only results within `max_cost` and `max_days` (both inclusive).
pub fn filter_by_constraint(
    results: &[QuoteResult],
    max_cost: f64,
    max_days: f64,
) -> Vec<QuoteResult> {
    let constraint = Constraint::new(max_cost, max_days);
    results
        .iter()
        .filter(|result| constraint.admits(result))
        .cloned()
        .collect()
}

type GoalKey = fn(&QuoteResult) -> f64;

fn by_total_cost(result: &QuoteResult) -> f64 {
    result.total_cost
}

/// Per-goal key extractor, in `Goal::ALL` order. Lower keys win.
const GOAL_KEYS: [GoalKey; 3] = [by_total_cost, QuoteResult::transit_days, QuoteResult::co2_per_km];

fn goal_key(goal: Goal) -> GoalKey {
    let slot = match goal {
        Goal::Cheapest => 0,
        Goal::Fastest => 1,
        Goal::Greenest => 2,
    };
    GOAL_KEYS[slot]
}

/// Pick the result that best serves `goal`.
///
/// On ties the earliest result in `results` wins, so feeding the output of
/// [`quote`] breaks ties towards the cheaper lane.
pub fn select_best(results: &[QuoteResult], goal: Goal) -> Result<QuoteResult, SelectionError> {
    let key = goal_key(goal);
    let mut iter = results.iter();
    let first = iter.next().ok_or(SelectionError::Empty(goal.key()))?;

    let mut best = first;
    let mut best_key = key(first);
    for candidate in iter {
        let candidate_key = key(candidate);
        // strictly less: an equal key never displaces an earlier winner
        if candidate_key < best_key {
            best = candidate;
            best_key = candidate_key;
        }
    }

    Ok(best.clone())
}

/// The three headline picks for one quote.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSummary {
    pub cheapest: QuoteResult,
    pub fastest: QuoteResult,
    pub greenest: QuoteResult,
}

impl RouteSummary {
    pub fn pick(&self, goal: Goal) -> &QuoteResult {
        match goal {
            Goal::Cheapest => &self.cheapest,
            Goal::Fastest => &self.fastest,
            Goal::Greenest => &self.greenest,
        }
    }

    /// One-line insight per goal, e.g. `Cheapest: sea at $1234.50`.
    pub fn insight(&self, goal: Goal) -> String {
        let pick = self.pick(goal);
        match goal {
            Goal::Cheapest => format!("Cheapest: {} at ${:.2}", pick.mode(), pick.total_cost),
            Goal::Fastest => format!("Fastest: {} in {} days", pick.mode(), pick.transit_days()),
            Goal::Greenest => format!(
                "Greenest: {} with {} kg CO₂/km",
                pick.mode(),
                pick.co2_per_km()
            ),
        }
    }
}

/// Summarise a result set, or `None` when there is nothing to pick from.
pub fn summarize(results: &[QuoteResult]) -> Option<RouteSummary> {
    if results.is_empty() {
        return None;
    }
    Some(RouteSummary {
        cheapest: select_best(results, Goal::Cheapest).ok()?,
        fastest: select_best(results, Goal::Fastest).ok()?,
        greenest: select_best(results, Goal::Greenest).ok()?,
    })
}

/// Modes present in a result set, in result order.
pub fn modes(results: &[QuoteResult]) -> Vec<TransportMode> {
    results.iter().map(QuoteResult::mode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(
        origin: &str,
        destination: &str,
        mode: TransportMode,
        rate_per_km: f64,
        transit_days: f64,
        co2_per_km: f64,
    ) -> RateRecord {
        RateRecord {
            origin: origin.into(),
            destination: destination.into(),
            mode,
            rate_per_km,
            distance_km: 1_000.0,
            transit_days,
            co2_per_km,
        }
    }

    fn table() -> Vec<RateRecord> {
        vec![
            record("Shanghai", "Los Angeles", TransportMode::Air, 0.0012, 2.0, 0.5),
            record("Shanghai", "Los Angeles", TransportMode::Sea, 0.0005, 25.0, 0.01),
            record("Shanghai", "Los Angeles", TransportMode::Rail, 0.0008, 14.0, 0.03),
            record("Hamburg", "New York", TransportMode::Sea, 0.0004, 12.0, 0.01),
        ]
    }

    fn priced(mode: TransportMode, total_cost: f64) -> QuoteResult {
        QuoteResult {
            record: record("A", "B", mode, 1.0, 1.0, 1.0),
            weight_kg: 1.0,
            total_cost,
        }
    }

    #[test]
    fn quote_computes_totals_and_sorts_ascending() {
        let results = quote(&table(), "Shanghai", "Los Angeles", 1_000.0);
        assert_eq!(results.len(), 3);
        assert_eq!(modes(&results), vec![TransportMode::Sea, TransportMode::Rail, TransportMode::Air]);
        assert_relative_eq!(results[0].total_cost, 500.0, epsilon = 1e-9);
        assert_relative_eq!(results[2].total_cost, 1_200.0, epsilon = 1e-9);
        assert!(results.windows(2).all(|w| w[0].total_cost <= w[1].total_cost));
    }

    #[test]
    fn total_cost_is_linear_in_weight() {
        let base = quote(&table(), "Shanghai", "Los Angeles", 250.0);
        let tripled = quote(&table(), "Shanghai", "Los Angeles", 750.0);
        for (a, b) in base.iter().zip(&tripled) {
            assert_relative_eq!(b.total_cost, a.total_cost * 3.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn unknown_lane_is_empty_not_an_error() {
        assert!(quote(&table(), "Lima", "Oslo", 10.0).is_empty());
        assert!(quote(&table(), "shanghai", "Los Angeles", 10.0).is_empty());
    }

    #[test]
    fn equal_totals_keep_table_order() {
        let records = vec![
            record("A", "B", TransportMode::Rail, 1.0, 3.0, 0.2),
            record("A", "B", TransportMode::Sea, 1.0, 9.0, 0.1),
        ];
        let results = quote(&records, "A", "B", 10.0);
        assert_eq!(modes(&results), vec![TransportMode::Rail, TransportMode::Sea]);
    }

    #[test]
    fn constraint_filter_is_inclusive_and_idempotent() {
        let results = quote(&table(), "Shanghai", "Los Angeles", 1_000.0);
        let filtered = filter_by_constraint(&results, 850.0, 14.0);
        assert_eq!(modes(&filtered), vec![TransportMode::Rail]);
        assert_eq!(filter_by_constraint(&filtered, 850.0, 14.0), filtered);
        assert!(filter_by_constraint(&[], 1.0, 1.0).is_empty());
    }

    #[test]
    fn cheapest_picks_lowest_total() {
        let results = vec![
            priced(TransportMode::Sea, 500.0),
            priced(TransportMode::Air, 1_200.0),
            priced(TransportMode::Rail, 800.0),
        ];
        let best = select_best(&results, Goal::Cheapest).unwrap();
        assert_eq!(best.mode(), TransportMode::Sea);
    }

    #[test]
    fn fastest_and_greenest_use_their_own_keys() {
        let results = quote(&table(), "Shanghai", "Los Angeles", 1_000.0);
        assert_eq!(select_best(&results, Goal::Fastest).unwrap().mode(), TransportMode::Air);
        assert_eq!(select_best(&results, Goal::Greenest).unwrap().mode(), TransportMode::Sea);
    }

    #[test]
    fn every_goal_ranks_by_its_own_field() {
        let result = QuoteResult {
            record: record("A", "B", TransportMode::Rail, 1.0, 7.0, 0.25),
            weight_kg: 1.0,
            total_cost: 42.0,
        };
        let keys: Vec<f64> = Goal::ALL.into_iter().map(|goal| goal_key(goal)(&result)).collect();
        assert_eq!(keys, vec![42.0, 7.0, 0.25]);
    }

    #[test]
    fn ties_go_to_the_first_result() {
        let results = vec![
            priced(TransportMode::Rail, 100.0),
            priced(TransportMode::Sea, 100.0),
        ];
        assert_eq!(select_best(&results, Goal::Fastest).unwrap().mode(), TransportMode::Rail);
        assert_eq!(select_best(&results, Goal::Cheapest).unwrap().mode(), TransportMode::Rail);
    }

    #[test]
    fn selecting_from_nothing_fails() {
        assert_eq!(
            select_best(&[], Goal::Greenest),
            Err(SelectionError::Empty("greenest"))
        );
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn summary_reports_each_goal() {
        let results = quote(&table(), "Shanghai", "Los Angeles", 1_000.0);
        let summary = summarize(&results).unwrap();
        assert_eq!(summary.cheapest.mode(), TransportMode::Sea);
        assert_eq!(summary.fastest.mode(), TransportMode::Air);
        assert_eq!(summary.insight(Goal::Cheapest), "Cheapest: sea at $500.00");
        assert_eq!(summary.insight(Goal::Fastest), "Fastest: air in 2 days");
    }
}
