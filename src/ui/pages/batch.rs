//! Bulk quoting from pasted or loaded request CSV.

use dioxus::prelude::*;
use tracing::warn;

use freight_cost_optimizer::{
    domain::{process_batch, AppState, Goal},
    infra::{parse_batch_requests, write_batch_table, RateRepository},
};

use crate::ui::{
    components::{
        quote_table::BatchTable,
        toast::{push_toast, ToastKind, ToastMessage},
    },
    theme,
};

#[component]
pub fn BatchPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut running = use_signal(|| false);
    let mut file_path = use_signal(String::new);

    let (input, rows, goal) = state.with(|st| (st.batch_input.clone(), st.batch_rows.clone(), st.goal));
    let routed = rows.iter().filter(|row| row.is_routed()).count();

    let on_load_file = move |_| {
        let path = file_path();
        if path.trim().is_empty() {
            push_toast(toasts, ToastKind::Warning, "Enter a request file path first.");
            return;
        }
        let text = match std::fs::read_to_string(path.trim()) {
            Ok(text) => text,
            Err(err) => {
                push_toast(toasts, ToastKind::Error, format!("Could not read {}: {err}", path.trim()));
                return;
            }
        };
        // Validate now so a broken file is reported before the run.
        match parse_batch_requests(&text) {
            Ok(requests) => {
                state.with_mut(|st| st.batch_input = text);
                push_toast(toasts, ToastKind::Info, format!("Loaded {} requests.", requests.len()));
            }
            Err(err) => push_toast(toasts, ToastKind::Error, format!("Invalid request file: {err}")),
        }
    };

    let on_run = move |_| {
        let (text, goal, constraint, data_source) = state.with(|st| {
            (
                st.batch_input.clone(),
                st.goal,
                st.constraint.to_constraint(),
                st.settings.data_source.clone(),
            )
        });
        let requests = match parse_batch_requests(&text) {
            Ok(requests) => requests,
            Err(err) => {
                push_toast(toasts, ToastKind::Error, format!("Invalid requests: {err}"));
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

        running.set(true);
        spawn(async move {
            let loaded = match RateRepository::from_source_str(&data_source) {
                Ok(repository) => repository.load().await,
                Err(err) => Err(err),
            };
            running.set(false);

            match loaded {
                Ok(snapshot) => {
                    let rows = process_batch(&snapshot.records, &requests, goal, constraint);
                    state.with_mut(|st| {
                        st.snapshot = Some(snapshot);
                        st.batch_rows = rows;
                    });
                }
                Err(err) => {
                    warn!("rate table unavailable: {err}");
                    push_toast(toasts, ToastKind::Error, format!("Could not load rates: {err}"));
                }
            }
        });
    };

    let on_export = move |_| {
        let (rows, dir) = state.with(|st| (st.batch_rows.clone(), st.settings.output_dir.clone()));
        match write_batch_table(&rows, &dir) {
            Ok(path) => push_toast(toasts, ToastKind::Success, format!("Saved {}.", path.display())),
            Err(err) => push_toast(toasts, ToastKind::Error, format!("Export failed: {err}")),
        }
    };

    rsx! {
        div {
            section { class: "panel",
                h2 { "Requests" }
                p { class: "hint", "CSV with origin, destination and weight columns. Weights accept kg or lbs." }
                textarea {
                    value: "{input}",
                    oninput: move |evt| state.with_mut(|st| st.batch_input = evt.value()),
                }
                div { class: "form-grid",
                    div { class: "field",
                        label { "Request file" }
                        input {
                            value: file_path(),
                            placeholder: "requests.csv",
                            oninput: move |evt| file_path.set(evt.value()),
                        }
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
                    button { class: "btn", onclick: on_load_file, "Load file" }
                    button {
                        class: "btn btn-primary",
                        disabled: running(),
                        onclick: on_run,
                        if running() { "Running..." } else { "Run batch" }
                    }
                    if !rows.is_empty() {
                        button { class: "btn", onclick: on_export, "Export results" }
                    }
                }
            }

            if !rows.is_empty() {
                section { class: "panel",
                    h2 { "{routed} of {rows.len()} routed · {goal.label()}" }
                    BatchTable { rows: rows.clone() }
                }
            }
        }
    }
}
