use dioxus::prelude::*;

use freight_cost_optimizer::domain::{Goal, RouteSummary};

use crate::ui::theme;

#[component]
pub fn KpiCard(title: String, value: String, description: Option<String>, goal: Goal, selected: bool) -> Element {
    rsx! {
        div {
            class: "{theme::kpi_card(goal, selected)}",
            h2 { "{goal.emoji()} {title}" }
            p { class: "kpi-value", "{value}" }
            if let Some(desc) = description {
                p { class: "hint", "{desc}" }
            }
        }
    }
}

/// Cheapest, fastest and greenest picks side by side; the chosen goal is highlighted.
#[component]
pub fn SummaryCards(summary: RouteSummary, goal: Goal) -> Element {
    rsx! {
        div { class: "kpi-grid",
            for card_goal in Goal::ALL {
                KpiCard {
                    key: "{card_goal.key()}",
                    title: card_goal.label().to_string(),
                    value: headline(&summary, card_goal),
                    description: Some(summary.insight(card_goal)),
                    goal: card_goal,
                    selected: card_goal == goal,
                }
            }
        }
    }
}

fn headline(summary: &RouteSummary, goal: Goal) -> String {
    let pick = summary.pick(goal);
    match goal {
        Goal::Cheapest => format!("${:.2}", pick.total_cost),
        Goal::Fastest => format!("{} days", pick.transit_days()),
        Goal::Greenest => format!("{} kg/km", pick.co2_per_km()),
    }
}
