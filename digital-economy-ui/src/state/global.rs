//! Global Application State
//!
//! Reactive state management using Leptos signals.

use digital_economy::Locale;
use leptos::*;

/// Local storage key for the signed-in user name
const USERNAME_KEY: &str = "digital_economy_user";

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Locale installed by the UI library step of the bootstrap
    pub locale: RwSignal<Locale>,
    /// Signed-in user, if any
    pub username: RwSignal<Option<String>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state(locale: Locale) {
    let state = GlobalState {
        locale: create_rw_signal(locale),
        username: create_rw_signal(stored_username()),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn stored_username() -> Option<String> {
    storage()?
        .get_item(USERNAME_KEY)
        .ok()?
        .filter(|name| !name.is_empty())
}

impl GlobalState {
    /// Format an entry time in the active locale
    pub fn format_datetime(&self, value: &chrono::NaiveDateTime) -> String {
        self.locale.get_untracked().format_datetime(value)
    }

    pub fn sign_in(&self, username: &str) {
        if let Some(storage) = storage() {
            let _ = storage.set_item(USERNAME_KEY, username);
        }
        self.username.set(Some(username.to_string()));
    }

    pub fn sign_out(&self) {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(USERNAME_KEY);
        }
        self.username.set(None);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.try_set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.try_set(None);
        })
        .forget();
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }
}
