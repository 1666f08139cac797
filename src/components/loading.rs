//! Neutral loading indicator.

use leptos::prelude::*;

#[component]
pub fn Loading(#[prop(default = "Loading...")] label: &'static str) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="loading__spinner"></div>
            <p class="loading__label">{label}</p>
        </div>
    }
}
