//! Authentication phase: login, who-am-i, logout.

use super::{banner, failure_reason};
use crate::model::{LoginRequest, LoginResponse, MeResponse};
use crate::runner::RunContext;

/// Exercise the auth endpoints. Returns `false` when login failed, which
/// aborts the run: no protected endpoint can be exercised without a token.
///
/// Logout failure is recorded but non-fatal, and never clears the locally
/// held token; subsequent phases still need it.
pub async fn run(cx: &mut RunContext) -> bool {
    banner("Testing Authentication");

    let login = LoginRequest {
        email: &cx.email,
        password: &cx.password,
    };
    let result = cx.client.post_json("/api/auth/login", Some(&login)).await;
    match &result {
        Ok(response) if response.status == 200 => match response.decode::<LoginResponse>() {
            Ok(body) => {
                cx.client.set_token(body.token);
                cx.user = Some(body.user);
                cx.recorder
                    .record("Login", true, "Successfully logged in", None);
            }
            Err(_) => {
                cx.recorder.record(
                    "Login",
                    false,
                    "Missing token or user in response",
                    Some(response.body.clone()),
                );
                return false;
            }
        },
        _ => {
            cx.recorder.record(
                "Login",
                false,
                format!("Login failed: {}", failure_reason(&result)),
                None,
            );
            return false;
        }
    }

    let result = cx.client.get("/api/auth/me").await;
    match &result {
        Ok(response) if response.status == 200 => match response.decode::<MeResponse>() {
            Ok(_) => {
                cx.recorder
                    .record("Get Me", true, "Successfully retrieved user info", None);
            }
            Err(_) => {
                cx.recorder.record(
                    "Get Me",
                    false,
                    "Missing user in response",
                    Some(response.body.clone()),
                );
            }
        },
        _ => {
            cx.recorder.record(
                "Get Me",
                false,
                format!("Get me failed: {}", failure_reason(&result)),
                None,
            );
        }
    }

    let result = cx.client.post_json::<()>("/api/auth/logout", None).await;
    match &result {
        Ok(response) if response.status == 200 => {
            cx.recorder
                .record("Logout", true, "Successfully logged out", None);
        }
        _ => {
            cx.recorder.record(
                "Logout",
                false,
                format!("Logout failed: {}", failure_reason(&result)),
                None,
            );
        }
    }

    true
}
