//! Authentication routes under `/api/v1/auth`.
//!
//! These routes carry no security metadata: credentials are established by
//! the routes themselves or read from the refresh cookie.

use libra_schema::auth::{
    AuthLogin, AuthRegister, AuthResult, GoogleCallbackQuery, GoogleDevicePoll,
    GoogleDevicePollResponse, GoogleDeviceStart, VerifyEmail, VerifyEmailResponse,
};
use libra_schema::user::User;
use libra_schema::{Empty, Response};

use crate::{ContractRouter, RouteDescriptor};

const BASE: &str = "/api/v1/auth";

fn path(suffix: &str) -> String {
    format!("{BASE}{suffix}")
}

pub fn contract() -> ContractRouter {
    ContractRouter::new()
        .route(
            "register",
            RouteDescriptor::post(path("/register"))
                .with_summary("Register")
                .with_description("Register a new user")
                .with_body::<AuthRegister>()
                .response::<201, AuthResult>()
                .with_fail_responses(),
        )
        .route(
            "login",
            RouteDescriptor::post(path("/login"))
                .with_summary("Login")
                .with_description("Login with email/username and password")
                .with_body::<AuthLogin>()
                .response::<200, AuthResult>()
                .with_fail_responses(),
        )
        .route(
            "googleLogin",
            RouteDescriptor::get(path("/google"))
                .with_summary("Google login")
                .with_description("Redirect to Google OAuth")
                .response::<302, Empty>(),
        )
        .route(
            "googleCallback",
            RouteDescriptor::get(path("/google/callback"))
                .with_summary("Google login callback")
                .with_description("Handle Google OAuth callback and redirect")
                .with_query::<GoogleCallbackQuery>()
                .response::<302, Empty>(),
        )
        .route(
            "googleDeviceStart",
            RouteDescriptor::post(path("/google/device/start"))
                .with_summary("Google device auth start")
                .with_description("Start browser-assisted Google auth for terminal clients.")
                .with_body::<Empty>()
                .response::<200, GoogleDeviceStart>()
                .with_fail_responses(),
        )
        .route(
            "googleDevicePoll",
            RouteDescriptor::post(path("/google/device/poll"))
                .with_summary("Google device auth poll")
                .with_description(
                    "Poll terminal Google auth status and receive auth result when approved.",
                )
                .with_body::<GoogleDevicePoll>()
                .response::<200, GoogleDevicePollResponse>()
                .with_fail_responses(),
        )
        .route(
            "verifyEmail",
            RouteDescriptor::post(path("/verify-email"))
                .with_summary("Verify email")
                .with_description("Verify user email using a verification code")
                .with_body::<VerifyEmail>()
                .response::<200, VerifyEmailResponse>()
                .with_fail_responses(),
        )
        .route(
            "refresh",
            RouteDescriptor::post(path("/refresh"))
                .with_summary("Refresh session")
                .with_description("Refresh access using the refresh cookie")
                .with_body::<Empty>()
                .response::<200, AuthResult>()
                .with_fail_responses(),
        )
        .route(
            "me",
            RouteDescriptor::get(path("/me"))
                .with_summary("Get current user")
                .with_description("Return the current authenticated user")
                .response::<200, User>()
                .with_fail_responses(),
        )
        .route(
            "resendVerification",
            RouteDescriptor::post(path("/resend-verification"))
                .with_summary("Resend verification")
                .with_description("Resend the email verification code")
                .with_body::<Empty>()
                .response::<200, Response>()
                .with_fail_responses(),
        )
        .route(
            "logout",
            RouteDescriptor::post(path("/logout"))
                .with_summary("Logout")
                .with_description("Logout the current session")
                .with_body::<Empty>()
                .response::<200, Response>()
                .with_fail_responses(),
        )
        .route(
            "logoutAll",
            RouteDescriptor::post(path("/logout-all"))
                .with_summary("Logout all")
                .with_description("Logout from all sessions")
                .with_body::<Empty>()
                .response::<200, Response>()
                .with_fail_responses(),
        )
}
