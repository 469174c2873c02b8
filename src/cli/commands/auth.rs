use clap::Subcommand;
use serde_json::json;

use crate::api::models::Credentials;
use crate::cli::utils::output_success;
use crate::cli::{AppContext, OutputFormat};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the platform")]
    Login {
        #[arg(help = "Account email")]
        email: String,
        #[arg(long, help = "Account password")]
        password: String,
    },

    #[command(about = "Logout and revoke the refresh token")]
    Logout,

    #[command(about = "Show current session status")]
    Status,

    #[command(about = "Show current user information")]
    Whoami,
}

pub async fn handle(
    ctx: &AppContext,
    cmd: AuthCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            ctx.session
                .login(&ctx.api.auth(), &Credentials { email, password })
                .await?;

            let role = ctx.session.current_role();
            output_success(
                &output_format,
                "Logged in",
                Some(json!({ "role": role })),
            )?;

            // Land on the dashboard; the evaluator funnels sessions without
            // a role through role selection.
            let outcome = ctx.navigator.navigate("/dashboard")?;
            tracing::debug!(?outcome, "post-login navigation");
            Ok(())
        }

        AuthCommands::Logout => {
            ctx.session.logout(&ctx.api).await;
            output_success(&output_format, "Logged out", None)
        }

        AuthCommands::Status => {
            let session = ctx.session.snapshot();
            match output_format {
                OutputFormat::Json => output_success(
                    &output_format,
                    "Session status",
                    Some(json!({
                        "authenticated": session.is_authenticated,
                        "role": session.role,
                        "has_token": session.token.is_some(),
                    })),
                ),
                OutputFormat::Text => {
                    if session.is_authenticated {
                        match session.role {
                            Some(role) => println!("Authenticated (role: {})", role),
                            None => println!("Authenticated (no role selected)"),
                        }
                    } else {
                        println!("Not authenticated");
                    }
                    Ok(())
                }
            }
        }

        AuthCommands::Whoami => {
            let session = ctx.session.snapshot();
            let Some(user) = session.user else {
                anyhow::bail!("no user profile loaded (login required)");
            };
            match output_format {
                OutputFormat::Json => crate::cli::utils::output_json(&user),
                OutputFormat::Text => {
                    println!("{} {} <{}>", user.first_name, user.last_name, user.email);
                    if let Some(role) = user.role {
                        println!("Role: {}", role);
                    }
                    Ok(())
                }
            }
        }
    }
}
