//! Sign-in controls reflecting the server session.

use shared_types::UserSessionRecord;
use yew::prelude::*;

use crate::api::ApiService;

const SHOWN: &str = "inline-flex";
const HIDDEN: &str = "none";

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    SignedOut,
    SignedIn(UserSessionRecord),
}

/// What the controls should look like for a given [`AuthState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsView {
    pub login_display: &'static str,
    pub logout_display: &'static str,
    pub badge: String,
}

impl AuthState {
    /// Interpret the outcome of one `/api/me` query. Anything but a decoded
    /// user counts as signed out.
    pub fn from_me(result: Result<Option<UserSessionRecord>, String>) -> Self {
        match result {
            Ok(Some(user)) => AuthState::SignedIn(user),
            Ok(None) => AuthState::SignedOut,
            Err(e) => {
                tracing::debug!("Session check failed: {}", e);
                AuthState::SignedOut
            }
        }
    }

    pub fn view(&self) -> ControlsView {
        match self {
            AuthState::SignedIn(user) => ControlsView {
                login_display: HIDDEN,
                logout_display: SHOWN,
                badge: user.badge_label().to_string(),
            },
            AuthState::SignedOut => ControlsView {
                login_display: SHOWN,
                logout_display: HIDDEN,
                badge: String::new(),
            },
        }
    }
}

#[function_component(AuthWidget)]
pub fn auth_widget() -> Html {
    let auth = use_state(|| AuthState::SignedOut);

    // One best-effort session check per call, no retries
    let refresh = {
        let auth = auth.clone();
        Callback::from(move |_: ()| {
            let auth = auth.clone();
            wasm_bindgen_futures::spawn_local(async move {
                auth.set(AuthState::from_me(ApiService::me().await));
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let on_logout = {
        let refresh = refresh.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let refresh = refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = ApiService::logout().await {
                    tracing::warn!("Logout failed: {}", e);
                }
                refresh.emit(());
            });
        })
    };

    let view = auth.view();

    html! {
        <div class="auth-controls">
            <span id="account-badge" class="account-badge">{ view.badge }</span>
            <a
                id="google-login"
                class="btn btn-google"
                href="/auth/google"
                style={format!("display: {}", view.login_display)}
            >
                { "Sign in with Google" }
            </a>
            <button
                id="logout"
                type="button"
                class="btn btn-ghost"
                style={format!("display: {}", view.logout_display)}
                onclick={on_logout}
            >
                { "Log out" }
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AuthProvider;

    fn user(email: Option<&str>) -> UserSessionRecord {
        UserSessionRecord {
            id: "42".to_string(),
            email: email.map(str::to_string),
            name: "Ada".to_string(),
            picture: String::new(),
            provider: AuthProvider::Google,
        }
    }

    #[test]
    fn test_signed_in_view() {
        let state = AuthState::from_me(Ok(Some(user(Some("a@b.com")))));
        assert_eq!(
            state.view(),
            ControlsView {
                login_display: "none",
                logout_display: "inline-flex",
                badge: "a@b.com".to_string(),
            }
        );
    }

    #[test]
    fn test_signed_in_without_email_shows_name() {
        let state = AuthState::from_me(Ok(Some(user(None))));
        assert_eq!(state.view().badge, "Ada");
        assert_eq!(state.view().logout_display, "inline-flex");
    }

    #[test]
    fn test_unauthorized_view() {
        let state = AuthState::from_me(Ok(None));
        assert_eq!(state, AuthState::SignedOut);
        assert_eq!(
            state.view(),
            ControlsView {
                login_display: "inline-flex",
                logout_display: "none",
                badge: String::new(),
            }
        );
    }

    #[test]
    fn test_network_failure_is_signed_out() {
        let state = AuthState::from_me(Err("Request failed: offline".to_string()));
        assert_eq!(state, AuthState::SignedOut);
        assert_eq!(state.view().login_display, "inline-flex");
    }
}
