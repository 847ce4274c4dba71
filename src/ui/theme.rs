//! Class helpers so pages agree on how goals and outcomes look.

use freight_cost_optimizer::domain::Goal;

pub fn goal_class(goal: Goal) -> &'static str {
    match goal {
        Goal::Cheapest => "goal-cheapest",
        Goal::Fastest => "goal-fastest",
        Goal::Greenest => "goal-greenest",
    }
}

pub fn goal_button(active: bool) -> &'static str {
    if active {
        "btn btn-primary"
    } else {
        "btn"
    }
}

pub fn kpi_card(goal: Goal, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!("panel kpi-card {}{selected}", goal_class(goal))
}

/// Rows dropped by the constraint stay visible but struck through.
pub fn quote_row(admitted: bool) -> &'static str {
    if admitted {
        ""
    } else {
        "excluded"
    }
}

pub fn batch_row(routed: bool) -> &'static str {
    if routed {
        ""
    } else {
        "sentinel"
    }
}
