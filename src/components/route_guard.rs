//! Wrapper that renders protected page content only once access is decided.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages wrap their body in [`RouteGuard`]. While the session is still being
//! verified the wrapper shows [`Loading`] and does nothing else; once it is
//! settled it either renders the children or redirects.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::loading::Loading;
use crate::state::session::SessionStore;
use crate::util::guard::{Access, GuardDecision, guard_decision, install_route_guard};

#[component]
pub fn RouteGuard(access: Access, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionStore>();
    install_route_guard(session, access, use_navigate());

    let allowed = Memo::new(move |_| session.with(|s| guard_decision(s, access)) == GuardDecision::Allow);

    view! {
        <Show when=move || allowed.get() fallback=|| view! { <Loading/> }>
            {children()}
        </Show>
    }
}
