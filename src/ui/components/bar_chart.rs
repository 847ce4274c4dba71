use dioxus::prelude::*;

use freight_cost_optimizer::{domain::QuoteResult, infra::ChartKind};

#[component]
pub fn BarChart(kind: ChartKind, results: Vec<QuoteResult>) -> Element {
    let svg = kind.render(&results);
    rsx! {
        div { class: "panel chart",
            div { dangerous_inner_html: "{svg}" }
        }
    }
}

#[component]
pub fn ChartGrid(results: Vec<QuoteResult>) -> Element {
    rsx! {
        div { class: "chart-grid",
            for kind in ChartKind::ALL {
                BarChart { key: "{kind.file_name()}", kind, results: results.clone() }
            }
        }
    }
}
