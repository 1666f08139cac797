//! Small pill showing a user's role.

#[cfg(test)]
#[path = "role_badge_test.rs"]
mod role_badge_test;

use leptos::prelude::*;

use crate::net::types::Role;

fn badge_class(role: Role) -> &'static str {
    match role {
        Role::Admin => "role-badge role-badge--admin",
        Role::Member => "role-badge role-badge--member",
    }
}

#[component]
pub fn RoleBadge(role: Role) -> impl IntoView {
    view! { <span class=badge_class(role)>{role.label()}</span> }
}
