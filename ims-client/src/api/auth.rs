//! `/api/auth/*`

use shared::client::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, RegisterRequest, ResetRequest,
    VerifyResetRequest,
};

use super::{into_ack, into_data};
use crate::client::HttpClient;
use crate::{ApiResponse, ClientResult};

pub struct AuthApi<'a, H> {
    http: &'a H,
}

impl<'a, H: HttpClient> AuthApi<'a, H> {
    pub(crate) fn new(http: &'a H) -> Self {
        Self { http }
    }

    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp: ApiResponse<LoginResponse> = self.http.post("/api/auth/login", &req).await?;
        into_data(resp, "login")
    }

    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<()> {
        let resp = self.http.post("/api/auth/register", req).await?;
        into_ack(resp, "register")
    }

    /// Ask the backend to send a reset code to `email`
    pub async fn request_reset(&self, email: &str) -> ClientResult<()> {
        let req = ResetRequest {
            email: email.to_string(),
        };
        let resp = self.http.post("/api/auth/request-reset", &req).await?;
        into_ack(resp, "password reset request")
    }

    pub async fn verify_reset(&self, req: &VerifyResetRequest) -> ClientResult<()> {
        let resp = self.http.post("/api/auth/verify-reset", req).await?;
        into_ack(resp, "password reset")
    }

    pub async fn refresh(&self, refresh_token: &str) -> ClientResult<RefreshResponse> {
        let req = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let resp: ApiResponse<RefreshResponse> =
            self.http.post("/api/auth/refresh", &req).await?;
        into_data(resp, "token refresh")
    }
}
