use std::fmt;
use std::process::ExitCode;

use colored::Colorize;

use board_auth::AuthError;
use board_client::{ApiError, Disposition};
use board_rbac::{AccessDecision, Route};

/// Exit code when a command is redirected instead of run.
const REDIRECT_EXIT: u8 = 2;

/// A command stopped by the access policy before reaching the service.
#[derive(Debug)]
pub enum Denied {
    Redirect(Route),
    Rejected(String),
}

impl Denied {
    /// `Ok(())` when `decision` allows the operation.
    pub fn check(decision: AccessDecision) -> Result<(), Denied> {
        match decision {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Redirect { route } => Err(Denied::Redirect(route)),
            AccessDecision::Reject { reason } => Err(Denied::Rejected(reason)),
        }
    }
}

impl fmt::Display for Denied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denied::Redirect(route) => write!(f, "Access denied, redirecting to {}", route),
            Denied::Rejected(reason) => f.write_str(reason),
        }
    }
}

impl std::error::Error for Denied {}

/// Print an error and choose the exit code.
///
/// Redirects (policy denials, 401, 403) print the route and exit with 2.
pub fn handle_error(err: anyhow::Error) -> ExitCode {
    ExitCode::from(report(&err))
}

fn report(err: &anyhow::Error) -> u8 {
    if let Some(Denied::Redirect(route)) = err.downcast_ref::<Denied>() {
        return redirect(*route);
    }

    if let Some(api) = err.downcast_ref::<ApiError>() {
        tracing::debug!(status = ?api.status_code(), "API call failed");
        return match api.disposition() {
            Disposition::Redirect(route) => redirect(route),
            Disposition::Inline(_) => {
                let message = api.detail().unwrap_or_else(|| api.to_string());
                eprintln!("{} {}", "Error:".red().bold(), message);
                1
            }
        };
    }

    if let Some(auth) = err.downcast_ref::<AuthError>() {
        if auth.is_server_error() {
            tracing::error!(code = auth.error_code(), "{}", auth);
        } else {
            tracing::debug!(code = auth.error_code(), "{}", auth);
        }
        eprintln!("{} {}", "Error:".red().bold(), auth);
        return 1;
    }

    eprintln!("{} {:#}", "Error:".red().bold(), err);
    1
}

fn redirect(route: Route) -> u8 {
    if route == Route::Login {
        eprintln!("{}", "Not signed in.".yellow().bold());
        eprintln!("  Sign in with:");
        eprintln!("  {} board login --email <email>", "$".dimmed());
    }
    println!("Redirect: {}", route);
    REDIRECT_EXIT
}
