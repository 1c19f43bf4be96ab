//! Toast Notification Component
//!
//! Shows success and error messages.

use leptos::*;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let dismiss_state = state.clone();

    view! {
        <div class="toast-stack">
            {move || {
                state.success.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Success />
                })
            }}

            {move || {
                let state = dismiss_state.clone();
                dismiss_state.error.get().map(move |msg| view! {
                    <div on:click=move |_| state.clear_error()>
                        <ToastMessage message=msg variant=ToastVariant::Error />
                    </div>
                })
            }}
        </div>
    }
}

#[derive(Clone, Copy)]
enum ToastVariant {
    Success,
    Error,
}

impl ToastVariant {
    fn class(&self) -> &'static str {
        match self {
            ToastVariant::Success => "toast toast-success",
            ToastVariant::Error => "toast toast-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Success => "✓",
            ToastVariant::Error => "✕",
        }
    }
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    variant: ToastVariant,
) -> impl IntoView {
    view! {
        <div class=variant.class() role="alert">
            <span class="toast-icon">{variant.icon()}</span>
            <span class="toast-text">{message}</span>
        </div>
    }
}
