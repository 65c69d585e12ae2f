//! Login, registration and password reset

use ims_client::{HttpClient, ImsClient, Session};
use shared::client::{LoginRequest, RegisterRequest, VerifyResetRequest};
use shared::models::Role;
use validator::Validate;

use crate::error::{ConsoleError, ConsoleResult};
use crate::forms::{FieldErrors, validate_form};
use crate::notify::Notifier;

/// Where the user lands after an auth action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    ResetPassword,
    Admin,
    Home,
}

impl Route {
    pub fn for_role(role: Role) -> Self {
        if role.is_admin() { Route::Admin } else { Route::Home }
    }
}

#[derive(Debug)]
pub struct AuthPage<H> {
    client: ImsClient<H>,
    notifier: Notifier,
    field_errors: FieldErrors,
}

impl<H: HttpClient> AuthPage<H> {
    pub fn new(client: ImsClient<H>, notifier: Notifier) -> Self {
        Self {
            client,
            notifier,
            field_errors: FieldErrors::new(),
        }
    }

    /// Field messages of the last rejected form
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    fn check<T: Validate>(&mut self, form: &T) -> bool {
        match validate_form(form) {
            Ok(()) => {
                self.field_errors = FieldErrors::new();
                true
            }
            Err(errors) => {
                if let Some((_, message)) = errors.iter().next() {
                    self.notifier.error(message);
                }
                self.field_errors = errors;
                false
            }
        }
    }

    /// Sign in. Returns the route to navigate to, or `None` to stay on the
    /// login form.
    pub async fn login(&mut self, username: &str, password: &str) -> Option<Route> {
        let req = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        if !self.check(&req) {
            return None;
        }

        match self.client.auth().login(&req.username, &req.password).await {
            Ok(resp) => {
                let route = Route::for_role(resp.role);
                self.client.session().sign_in(Session {
                    access_token: resp.access_token,
                    refresh_token: resp.refresh_token,
                    username: resp.username.or(Some(req.username)),
                    role: resp.role,
                });
                self.notifier.success("Login successful");
                Some(route)
            }
            Err(e) => {
                tracing::warn!(username = %req.username, error = %e, "Login failed");
                self.notifier.error(e.user_message("Login failed"));
                None
            }
        }
    }

    pub async fn register(&mut self, req: RegisterRequest) -> Option<Route> {
        if !self.check(&req) {
            return None;
        }
        match self.client.auth().register(&req).await {
            Ok(()) => {
                self.notifier.success("Registration successful, please log in");
                Some(Route::Login)
            }
            Err(e) => {
                self.notifier.error(e.user_message("Registration failed"));
                None
            }
        }
    }

    /// Ask for a one-time reset code. Returns whether the code was sent.
    pub async fn request_reset(&mut self, email: &str) -> bool {
        let req = shared::client::ResetRequest {
            email: email.trim().to_string(),
        };
        if !self.check(&req) {
            return false;
        }
        match self.client.auth().request_reset(&req.email).await {
            Ok(()) => {
                self.notifier.success("Verification code sent to your email");
                true
            }
            Err(e) => {
                self.notifier.error(e.user_message("Failed to send verification code"));
                false
            }
        }
    }

    pub async fn verify_reset(&mut self, req: VerifyResetRequest) -> Option<Route> {
        if !self.check(&req) {
            return None;
        }
        match self.client.auth().verify_reset(&req).await {
            Ok(()) => {
                self.notifier.success("Password reset successful");
                Some(Route::Login)
            }
            Err(e) => {
                self.notifier.error(e.user_message("Password reset failed"));
                None
            }
        }
    }

    /// Clear the session; subscribers see the logout.
    pub fn logout(&self) -> Route {
        self.client.session().sign_out();
        self.notifier.info("Logged out");
        Route::Login
    }

    /// Exchange the refresh token for a new access token.
    pub async fn refresh_session(&self) -> ConsoleResult<()> {
        let session = self.client.session();
        let Some(refresh_token) = session.refresh_token() else {
            return Err(ConsoleError::invalid_state("no refresh token in session"));
        };
        let resp = self.client.auth().refresh(&refresh_token).await?;
        if !session.update_tokens(resp.access_token, resp.refresh_token) {
            return Err(ConsoleError::invalid_state("signed out during token refresh"));
        }
        tracing::debug!("Access token refreshed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_for_role() {
        assert_eq!(Route::for_role(Role::Admin), Route::Admin);
        assert_eq!(Route::for_role(Role::User), Route::Home);
    }
}
