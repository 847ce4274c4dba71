//! Freight quoting logic lives here.

pub mod app_state;
pub mod batch;
pub mod entities;
pub mod selector;
pub mod weight;

pub use app_state::{AppState, ConstraintForm, PersistedState, QuoteView, ShipmentForm};
pub use batch::{process_batch, BatchOutcome, BatchRequest, BatchRow, NO_ROUTE_COST, NO_ROUTE_MODE};
pub use entities::{Constraint, Goal, QuoteResult, RateRecord, TransportMode, UnknownGoal};
pub use selector::{
    filter_by_constraint, modes, quote, select_best, summarize, RouteSummary, SelectionError,
};
pub use weight::{parse_weight, WeightFormatError, KG_PER_LB};
