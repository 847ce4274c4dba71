use dioxus::prelude::*;

use freight_cost_optimizer::domain::{BatchRow, QuoteResult};

use crate::ui::theme;

/// Ranked lanes for one shipment. Lanes outside the constraint are shown
/// struck through rather than hidden.
#[component]
pub fn QuoteTable(ranked: Vec<QuoteResult>, allowed: Vec<QuoteResult>) -> Element {
    rsx! {
        table { class: "table",
            thead {
                tr {
                    th { "#" }
                    th { "Mode" }
                    th { class: "numeric", "Total cost (USD)" }
                    th { class: "numeric", "Transit (days)" }
                    th { class: "numeric", "CO₂ (kg/km)" }
                    th { class: "numeric", "Distance (km)" }
                }
            }
            tbody {
                for (idx, result) in ranked.iter().enumerate() {
                    tr {
                        key: "{result.mode()}",
                        class: theme::quote_row(allowed.contains(result)),
                        td { "{idx + 1}" }
                        td { "{result.mode().emoji()} {result.mode()}" }
                        td { class: "numeric", {format!("{:.2}", result.total_cost)} }
                        td { class: "numeric", "{result.transit_days()}" }
                        td { class: "numeric", "{result.co2_per_km()}" }
                        td { class: "numeric", "{result.record.distance_km}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn BatchTable(rows: Vec<BatchRow>) -> Element {
    rsx! {
        table { class: "table",
            thead {
                tr {
                    th { "Origin" }
                    th { "Destination" }
                    th { "Weight" }
                    th { "Mode" }
                    th { class: "numeric", "Total cost (USD)" }
                    th { class: "numeric", "Transit (days)" }
                }
            }
            tbody {
                for (idx, row) in rows.iter().enumerate() {
                    tr {
                        key: "{idx}",
                        class: theme::batch_row(row.is_routed()),
                        td { "{row.request.origin}" }
                        td { "{row.request.destination}" }
                        td { "{row.request.weight_input}" }
                        td { "{row.mode_label()}" }
                        td { class: "numeric", "{row.cost_label()}" }
                        td {
                            class: "numeric",
                            {row.best().map(|best| best.transit_days().to_string()).unwrap_or_default()}
                        }
                    }
                }
            }
        }
    }
}
