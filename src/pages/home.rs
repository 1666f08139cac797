//! Public entry page.

use leptos::prelude::*;

use crate::routes;
use crate::state::session::SessionStore;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<SessionStore>();

    view! {
        <div class="home-page">
            <h1>"Candidate Organizer"</h1>
            <p class="home-page__subtitle">"Track job postings and the candidates applying to them."</p>
            <Show
                when=move || session.is_authenticated()
                fallback=|| view! { <a href=routes::LOGIN class="button">"Sign In"</a> }
            >
                <a href=routes::DASHBOARD class="button">"Go to Dashboard"</a>
            </Show>
        </div>
    }
}
