use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::{AppContext, OutputFormat};
use crate::router::{default_route_for_role, NavigationOutcome};
use crate::types::Role;

#[derive(Subcommand)]
pub enum RoleCommands {
    #[command(about = "Select the active role and land on its dashboard")]
    Select {
        #[arg(help = "Role: student, doctor, hospital-admin or doyen")]
        role: Role,
    },

    #[command(about = "Show the currently selected role")]
    Show,
}

pub async fn handle(
    ctx: &AppContext,
    cmd: RoleCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        RoleCommands::Select { role } => {
            ctx.session.select_role(role)?;
            let outcome = ctx.navigator.navigate(default_route_for_role(role))?;

            let landed = match &outcome {
                NavigationOutcome::Completed { path, .. } => path.clone(),
                NavigationOutcome::Duplicate => default_route_for_role(role).to_string(),
            };
            output_success(
                &output_format,
                &format!("Role selected: {}", role),
                Some(json!({ "role": role, "landed_on": landed })),
            )
        }

        RoleCommands::Show => match ctx.session.current_role() {
            Some(role) => output_success(
                &output_format,
                &format!("Current role: {}", role),
                Some(json!({ "role": role })),
            ),
            None => {
                anyhow::bail!("no role selected");
            }
        },
    }
}
