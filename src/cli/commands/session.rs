use clap::{Args, Subcommand};
use serde_json::json;

use crate::cli::context::ShellContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::session::{Credentials, LogoutDecision, LogoutOutcome, Role, SessionState};

#[derive(Subcommand)]
pub enum SessionCommands {
    #[command(about = "Start-up check: silently sign in again with stored credentials")]
    Check,

    #[command(about = "Show the stored session without contacting the server")]
    Status,
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long, default_value = "hr", help = "Role to sign in as (hr or admin)")]
    pub role: Role,
    #[arg(long, help = "Email")]
    pub email: String,
    #[arg(long, help = "Password (will prompt if not provided)")]
    pub password: Option<String>,
}

pub async fn handle(cmd: SessionCommands, ctx: &ShellContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut controller = ctx.session_controller();
    match cmd {
        SessionCommands::Check => {
            let state = controller.cold_start().await.clone();
            report_state(&state, &output_format)
        }
        SessionCommands::Status => {
            let state = controller.resume().await.clone();
            report_state(&state, &output_format)
        }
    }
}

fn report_state(state: &SessionState, output_format: &OutputFormat) -> anyhow::Result<()> {
    match state {
        SessionState::Authenticated(session) => output_success(
            output_format,
            &format!("Signed in as {} ({})", session.user.display_name(), session.role),
            Some(json!({ "role": session.role, "user": session.user })),
        ),
        SessionState::Unauthenticated { error: Some(message) } => {
            output_error(output_format, message, Some("SESSION_EXPIRED"))?;
            anyhow::bail!("Please log in again with `hrms login`")
        }
        _ => {
            output_error(output_format, "Not signed in", Some("UNAUTHENTICATED"))?;
            anyhow::bail!("Please log in with `hrms login`")
        }
    }
}

pub async fn login(args: LoginArgs, ctx: &ShellContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };

    let mut controller = ctx.session_controller();
    match controller.login(Credentials::new(args.role, args.email, password)).await {
        Ok(session) => output_success(
            &output_format,
            &format!("Welcome, {}", session.user.display_name()),
            Some(json!({ "role": session.role, "user": session.user })),
        ),
        Err(e) => {
            let message = e.user_message();
            output_error(&output_format, &message, Some("LOGIN_FAILED"))?;
            anyhow::bail!("Login failed: {}", message)
        }
    }
}

pub async fn logout(yes: bool, ctx: &ShellContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let decision = if yes {
        LogoutDecision::Confirm
    } else {
        match prompt("Are you sure you want to log out? [y/N] ")?.to_ascii_lowercase().as_str() {
            "y" | "yes" => LogoutDecision::Confirm,
            _ => LogoutDecision::Cancel,
        }
    };

    let mut controller = ctx.session_controller();
    controller.resume().await;
    match controller.logout(decision).await {
        Ok(LogoutOutcome::Cancelled) => output_success(&output_format, "Logout cancelled", None),
        Ok(LogoutOutcome::LoggedOut) => output_success(&output_format, "Logged out", None),
        Err(e) => {
            output_error(&output_format, &e.user_message(), Some("LOGOUT_FAILED"))?;
            Err(e.into())
        }
    }
}
