use dioxus::{prelude::*, signals::Signal};
use tracing::warn;

use freight_cost_optimizer::{
    config::AppConfig,
    domain::AppState,
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

use crate::ui::{
    components::toast::{Toast, ToastMessage},
    pages::{BatchPage, QuotePage, SettingsPage},
    shell::Shell,
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/quote")]
    Quote {},
    #[route("/batch")]
    Batch {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(|| AppState::with_config(AppConfig::from_env()));
    use_hook({
        let mut state = state.clone();
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        warn!("failed to persist user state: {err}");
    }
}

#[component]
pub fn Quote() -> Element {
    rsx! { Shell { QuotePage {} } }
}

#[component]
pub fn Batch() -> Element {
    rsx! { Shell { BatchPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
