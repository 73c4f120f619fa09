//! Account Client
//!
//! Login, registration and logout against the auth API, plus the account button
//! that flips between "Log in" and "Log out <user>".

use serde::{Deserialize, Serialize};
use std::cell::Cell;

use crate::config::{ApiConfig, Config, NavigationConfig};
use crate::error::{DashboardError, DashboardResult};
use crate::session::{Session, SessionState, SessionStore};
use crate::transport::{ApiRequest, Transport};
use crate::validation::{LoginForm, RegisterForm};

/// Where the page should go once an action completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Navigate to a path
    To(String),
    /// Reload the current page
    Reload,
}

/// The submit button of a form, disabled while its request is in flight
pub trait SubmitControl {
    fn set_disabled(&self, disabled: bool);
}

impl SubmitControl for Cell<bool> {
    fn set_disabled(&self, disabled: bool) {
        self.set(disabled);
    }
}

/// For callers with no button to toggle (the CLI)
pub struct NoControl;

impl SubmitControl for NoControl {
    fn set_disabled(&self, _disabled: bool) {}
}

/// Keeps a control disabled until dropped
struct DisabledGuard<'a, C: SubmitControl + ?Sized>(&'a C);

impl<'a, C: SubmitControl + ?Sized> DisabledGuard<'a, C> {
    fn new(control: &'a C) -> Self {
        control.set_disabled(true);
        Self(control)
    }
}

impl<C: SubmitControl + ?Sized> Drop for DisabledGuard<'_, C> {
    fn drop(&mut self) {
        self.0.set_disabled(false);
    }
}

/// What the account button does when clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountAction {
    Logout,
    Navigate(String),
}

/// Label and action of the account button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountButton {
    pub label: String,
    pub action: AccountAction,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Body of a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub role: String,
}

impl From<LoginResponse> for Session {
    fn from(r: LoginResponse) -> Self {
        Session {
            token: r.token,
            username: r.username,
            role: r.role,
        }
    }
}

/// Auth API client bound to a transport and a session store
pub struct AuthClient<T, S> {
    transport: T,
    session: SessionState<S>,
    api: ApiConfig,
    navigation: NavigationConfig,
}

impl<T: Transport, S: SessionStore> AuthClient<T, S> {
    pub fn new(transport: T, store: S, config: &Config) -> Self {
        Self {
            transport,
            session: SessionState::new(store, config.session.clone()),
            api: config.api.clone(),
            navigation: config.navigation.clone(),
        }
    }

    pub fn session(&self) -> &SessionState<S> {
        &self.session
    }

    /// True iff a session token is stored
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Submit credentials and store the issued session
    ///
    /// `control` stays disabled for the duration of the request.
    pub async fn login<C: SubmitControl + ?Sized>(
        &self,
        form: &LoginForm,
        control: &C,
    ) -> DashboardResult<Navigation> {
        if !form.is_valid() {
            return Err(DashboardError::InvalidForm("login form".to_string()));
        }

        let response = {
            let _guard = DisabledGuard::new(control);
            tracing::debug!(username = %form.username, "Sending login request");
            let request = ApiRequest::post(&self.api.login).json(&LoginRequest {
                username: &form.username,
                password: &form.password,
            })?;
            self.transport.send(request).await
        };

        let response = response.map_err(|e| {
            tracing::warn!(error = %e, "Login request failed");
            e
        })?;
        if !response.is_success() {
            tracing::warn!(status = response.status, "Failed to login");
            return Err(DashboardError::LoginFailed {
                status: response.status,
            });
        }

        let result: LoginResponse = response.json()?;
        tracing::info!(username = %result.username, role = %result.role, "Logged in");
        self.session.save(&result.into())?;

        Ok(Navigation::To(self.navigation.landing.clone()))
    }

    /// Submit the registration form as a native form post would
    pub async fn register(&self, form: &RegisterForm) -> DashboardResult<Navigation> {
        form.validate()?;

        let request = ApiRequest::post(&self.api.register).form(&[
            ("username", form.username.as_str()),
            ("password", form.password.as_str()),
            ("passwordRepeat", form.password_repeat.as_str()),
        ]);
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(error = %e, "Registration request failed");
            e
        })?;

        if !response.is_success() {
            tracing::warn!(status = response.status, "Failed to register");
            return Err(DashboardError::RegistrationFailed {
                status: response.status,
            });
        }

        tracing::info!(username = %form.username, "Registered");
        Ok(Navigation::To(self.navigation.login.clone()))
    }

    /// Invalidate the token server-side and wipe session storage
    ///
    /// On failure the stored session is left untouched.
    pub async fn logout(&self) -> DashboardResult<Navigation> {
        let token = self.session.token()?.ok_or(DashboardError::NotLoggedIn)?;

        let request = ApiRequest::post(&self.api.logout).bearer(&token);
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(error = %e, "Logout request failed");
            e
        })?;

        if !response.is_success() {
            tracing::warn!(status = response.status, "Failed to logout");
            return Err(DashboardError::LogoutFailed {
                status: response.status,
            });
        }

        self.session.clear()?;
        tracing::info!("Logged out");
        Ok(Navigation::Reload)
    }

    /// Current label and action of the account button
    pub fn account_button(&self) -> AccountButton {
        if self.is_logged_in() {
            let username = self.session.username().ok().flatten().unwrap_or_default();
            AccountButton {
                label: format!("Log out {}", username),
                action: AccountAction::Logout,
            }
        } else {
            AccountButton {
                label: "Log in".to_string(),
                action: AccountAction::Navigate(self.navigation.login.clone()),
            }
        }
    }

    /// Perform the account button's action
    pub async fn on_account_click(&self) -> DashboardResult<Navigation> {
        match self.account_button().action {
            AccountAction::Logout => self.logout().await,
            AccountAction::Navigate(path) => Ok(Navigation::To(path)),
        }
    }
}
