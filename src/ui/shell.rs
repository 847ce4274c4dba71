use dioxus::prelude::*;

use freight_cost_optimizer::{domain::AppState, util::version::{version_label, APP_NAME}};

use crate::app::Route;

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let source_hint = state.with(|st| match &st.snapshot {
        Some(snapshot) => format!("{} · loaded {}", snapshot.source, snapshot.loaded_at_label()),
        None => st.settings.data_source.clone(),
    });

    rsx! {
        div { class: "app",
            header { class: "app-header",
                div {
                    h1 { class: "app-title", "🚚 {APP_NAME}" }
                    span { class: "app-version", "{version_label()} · {source_hint}" }
                }
                nav { class: "nav",
                    NavButton { active: matches!(current_route, Route::Quote {}), onclick: move |_| { nav.push(Route::Quote {}); }, label: "📦 Quote" }
                    NavButton { active: matches!(current_route, Route::Batch {}), onclick: move |_| { nav.push(Route::Batch {}); }, label: "📑 Batch" }
                    NavButton { active: matches!(current_route, Route::Settings {}), onclick: move |_| { nav.push(Route::Settings {}); }, label: "⚙️" }
                }
            }
            main { class: "app-main",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active { "nav-button active" } else { "nav-button" };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
