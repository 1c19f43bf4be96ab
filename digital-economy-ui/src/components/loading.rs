//! Loading Component
//!
//! Loading spinners and skeleton states.

use leptos::*;

/// Page-section loading spinner
#[component]
pub fn Loading(
    #[prop(default = "加载中…")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="loading-spinner" />
            <span>{label}</span>
        </div>
    }
}

/// Skeleton loader for cards
#[component]
pub fn CardSkeleton(
    #[prop(default = 3)]
    rows: usize,
) -> impl IntoView {
    view! {
        <div class="card card-skeleton">
            {(0..rows).map(|_| view! { <div class="skeleton-row" /> }).collect_view()}
        </div>
    }
}

/// Inline error panel for a failed request
#[component]
pub fn ErrorPanel(
    #[prop(into)]
    message: String,
) -> impl IntoView {
    view! {
        <div class="card error-panel">
            <span class="error-title">"数据加载失败"</span>
            <span class="error-detail">{message}</span>
        </div>
    }
}
