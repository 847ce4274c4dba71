use std::path::PathBuf;

use dioxus::prelude::*;

use freight_cost_optimizer::{
    config::AppConfig,
    domain::AppState,
    infra::DataSource,
    util::version::{version_label, APP_NAME},
};

use crate::{
    app::persist_user_state,
    ui::components::toast::{push_toast, ToastKind, ToastMessage},
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let initial = state.with(|st| st.settings.clone());
    let mut data_source_input = use_signal(|| initial.data_source.clone());
    let mut output_dir_input = use_signal(|| initial.output_dir.display().to_string());

    let snapshot_info = state.with(|st| {
        st.snapshot.as_ref().map(|snapshot| {
            (
                snapshot.source.clone(),
                snapshot.loaded_at_label(),
                snapshot.records.len(),
                snapshot.lanes().len(),
            )
        })
    });

    let on_apply = {
        let mut state = state.clone();
        move |_| {
            let source = data_source_input().trim().to_string();
            let output_dir = output_dir_input().trim().to_string();
            if source.is_empty() || output_dir.is_empty() {
                push_toast(toasts, ToastKind::Error, "Data source and output directory are required.");
                return;
            }
            if let Err(err) = source.parse::<DataSource>() {
                push_toast(toasts, ToastKind::Error, format!("Invalid data source: {err}"));
                return;
            }
            state.with_mut(|st| {
                st.settings.data_source = source;
                st.settings.output_dir = PathBuf::from(output_dir);
                st.snapshot = None;
            });
            persist_user_state(&state);
            push_toast(toasts, ToastKind::Success, "Updated settings.");
        }
    };

    let on_reset = {
        let mut state = state.clone();
        move |_| {
            let defaults = AppConfig::from_env();
            data_source_input.set(defaults.data_source.clone());
            output_dir_input.set(defaults.output_dir.display().to_string());
            state.with_mut(|st| {
                st.settings = defaults;
                st.snapshot = None;
            });
            persist_user_state(&state);
            push_toast(toasts, ToastKind::Info, "Restored default settings.");
        }
    };

    rsx! {
        div {
            section { class: "panel",
                h2 { "Rate Data" }
                div { class: "form-grid",
                    div { class: "field",
                        label { "Rate table (path or URL)" }
                        input {
                            value: data_source_input(),
                            oninput: move |evt| data_source_input.set(evt.value()),
                        }
                    }
                    div { class: "field",
                        label { "Output directory" }
                        input {
                            value: output_dir_input(),
                            oninput: move |evt| output_dir_input.set(evt.value()),
                        }
                    }
                }
                div { class: "actions",
                    button { class: "btn btn-primary", onclick: on_apply, "Apply" }
                    button { class: "btn", onclick: on_reset, "Reset Defaults" }
                }
            }

            section { class: "panel",
                h2 { "Loaded Snapshot" }
                if let Some((source, loaded_at, records, lanes)) = snapshot_info {
                    p { "{source}" }
                    p { class: "hint", "{records} rates across {lanes} lanes, loaded {loaded_at}" }
                } else {
                    p { class: "hint", "Rates are read fresh on every Calculate." }
                }
            }

            section { class: "panel",
                h2 { "About" }
                p { class: "hint", "{APP_NAME} {version_label()}" }
            }
        }
    }
}
