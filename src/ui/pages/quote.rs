//! Single-shipment quoting: form, ranked lanes, summary cards and charts.

use dioxus::prelude::*;
use tracing::{info, warn};

use freight_cost_optimizer::{
    domain::{
        filter_by_constraint, parse_weight, quote, summarize, AppState, Goal, QuoteView,
    },
    infra::{write_charts, write_results_table, RateRepository},
};

use crate::{
    app::persist_user_state,
    ui::{
        components::{
            bar_chart::ChartGrid,
            kpi_card::SummaryCards,
            quote_table::QuoteTable,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

#[component]
pub fn QuotePage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut loading = use_signal(|| false);

    let (shipment, constraint, goal, data_source) = state.with(|st| {
        (
            st.shipment.clone(),
            st.constraint.clone(),
            st.goal,
            st.settings.data_source.clone(),
        )
    });
    let last_quote = state.with(|st| st.last_quote.clone());
    let lanes = state.with(|st| {
        st.snapshot
            .as_ref()
            .map(|snapshot| snapshot.lanes())
            .unwrap_or_default()
    });
    let origins = distinct(lanes.iter().map(|(origin, _)| origin));
    let destinations = distinct(lanes.iter().map(|(_, destination)| destination));

    let on_calculate = move |_| {
        let request = state.with(|st| {
            (
                st.shipment.clone(),
                st.constraint.to_constraint(),
                st.settings.data_source.clone(),
            )
        });
        let (shipment, constraint, data_source) = request;

        let weight_kg = match parse_weight(&shipment.weight_input) {
            Ok(weight) => weight,
            Err(err) => {
                push_toast(toasts, ToastKind::Error, format!("Invalid weight: {err}"));
                return;
            }
        };
        let constraint = match constraint {
            Ok(constraint) => constraint,
            Err(message) => {
                push_toast(toasts, ToastKind::Error, message);
                return;
            }
        };
        persist_user_state(&state);

        loading.set(true);
        spawn(async move {
            let loaded = match RateRepository::from_source_str(&data_source) {
                Ok(repository) => repository.load().await,
                Err(err) => Err(err),
            };
            loading.set(false);

            let snapshot = match loaded {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!("rate table unavailable: {err}");
                    push_toast(
                        toasts,
                        ToastKind::Error,
                        format!("Could not load rates: {err}"),
                    );
                    return;
                }
            };

            let ranked = quote(
                &snapshot.records,
                &shipment.origin,
                &shipment.destination,
                weight_kg,
            );
            let allowed = filter_by_constraint(&ranked, constraint.max_cost, constraint.max_days);
            info!(
                origin = %shipment.origin,
                destination = %shipment.destination,
                weight_kg,
                lanes = ranked.len(),
                allowed = allowed.len(),
                "quoted shipment"
            );

            if ranked.is_empty() {
                push_toast(
                    toasts,
                    ToastKind::Warning,
                    format!(
                        "No available routes from {} to {}.",
                        shipment.origin, shipment.destination
                    ),
                );
            } else if allowed.is_empty() {
                push_toast(
                    toasts,
                    ToastKind::Warning,
                    "No route satisfies the cost and time limits.",
                );
            }

            state.with_mut(|st| {
                st.snapshot = Some(snapshot);
                st.last_quote = Some(QuoteView {
                    origin: shipment.origin,
                    destination: shipment.destination,
                    weight_kg,
                    ranked,
                    allowed,
                    constraint,
                });
            });
        });
    };

    let on_export = move |_| {
        let Some(view) = state.with(|st| st.last_quote.clone()) else {
            return;
        };
        let dir = state.with(|st| st.settings.output_dir.clone());
        let written = write_results_table(
            &view.allowed,
            &dir,
            &view.origin,
            &view.destination,
            view.weight_kg,
        )
        .and_then(|table| write_charts(&view.allowed, &dir).map(|charts| (table, charts)));
        match written {
            Ok((table, charts)) => push_toast(
                toasts,
                ToastKind::Success,
                format!("Saved {} and {} charts.", table.display(), charts.len()),
            ),
            Err(err) => push_toast(toasts, ToastKind::Error, format!("Export failed: {err}")),
        }
    };

    rsx! {
        div {
            section { class: "panel",
                h2 { "Shipment" }
                div { class: "form-grid",
                    div { class: "field",
                        label { "Origin" }
                        input {
                            list: "known-origins",
                            value: "{shipment.origin}",
                            oninput: move |evt| state.with_mut(|st| st.shipment.origin = evt.value()),
                        }
                    }
                    div { class: "field",
                        label { "Destination" }
                        input {
                            list: "known-destinations",
                            value: "{shipment.destination}",
                            oninput: move |evt| state.with_mut(|st| st.shipment.destination = evt.value()),
                        }
                    }
                    div { class: "field",
                        label { "Weight (kg or lbs)" }
                        input {
                            value: "{shipment.weight_input}",
                            placeholder: "1000kg",
                            oninput: move |evt| state.with_mut(|st| st.shipment.weight_input = evt.value()),
                        }
                    }
                    div { class: "field",
                        label { "Rate table" }
                        input {
                            value: "{data_source}",
                            oninput: move |evt| state.with_mut(|st| st.settings.data_source = evt.value()),
                        }
                    }
                    div { class: "field",
                        label { "Max cost (USD)" }
                        input {
                            value: "{constraint.max_cost}",
                            placeholder: "no limit",
                            oninput: move |evt| state.with_mut(|st| st.constraint.max_cost = evt.value()),
                        }
                    }
                    div { class: "field",
                        label { "Max transit (days)" }
                        input {
                            value: "{constraint.max_days}",
                            placeholder: "no limit",
                            oninput: move |evt| state.with_mut(|st| st.constraint.max_days = evt.value()),
                        }
                    }
                }
                datalist { id: "known-origins",
                    for origin in origins {
                        option { value: "{origin}" }
                    }
                }
                datalist { id: "known-destinations",
                    for destination in destinations {
                        option { value: "{destination}" }
                    }
                }
                div { class: "actions",
                    for option_goal in Goal::ALL {
                        button {
                            key: "{option_goal.key()}",
                            class: theme::goal_button(option_goal == goal),
                            onclick: move |_| state.with_mut(|st| st.goal = option_goal),
                            "{option_goal.emoji()} {option_goal.label()}"
                        }
                    }
                }
                div { class: "actions",
                    button {
                        class: "btn btn-primary",
                        disabled: loading(),
                        onclick: on_calculate,
                        if loading() { "Loading rates..." } else { "Calculate" }
                    }
                    if last_quote.as_ref().is_some_and(|view| !view.allowed.is_empty()) {
                        button { class: "btn", onclick: on_export, "Export results" }
                    }
                }
            }

            if let Some(view) = last_quote {
                QuoteResults { view, goal }
            }
        }
    }
}

#[component]
fn QuoteResults(view: QuoteView, goal: Goal) -> Element {
    if view.ranked.is_empty() {
        return rsx! {
            section { class: "panel",
                p { class: "hint", "No available routes from {view.origin} to {view.destination}." }
            }
        };
    }

    let summary = summarize(&view.allowed);
    rsx! {
        if let Some(summary) = summary {
            SummaryCards { summary, goal }
        } else {
            section { class: "panel",
                p { class: "hint", "No route satisfies the cost and time limits." }
            }
        }
        section { class: "panel",
            h2 { {format!("{} → {} · {:.2} kg", view.origin, view.destination, view.weight_kg)} }
            if view.is_limited() {
                p { class: "hint", "{view.allowed.len()} of {view.ranked.len()} lanes within your limits" }
            }
            QuoteTable { ranked: view.ranked.clone(), allowed: view.allowed.clone() }
        }
        if !view.allowed.is_empty() {
            ChartGrid { results: view.allowed.clone() }
        }
    }
}

fn distinct<'a>(names: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}
