use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_json, output_success};
use crate::cli::{AppContext, OutputFormat};
use crate::router::{NavigationOutcome, RouteTable};

#[derive(Subcommand)]
pub enum NavCommands {
    #[command(about = "Navigate to a path, running the access guards")]
    Go {
        #[arg(help = "Target path, e.g. /student/dashboard")]
        path: String,
    },

    #[command(about = "List the route table")]
    Routes,

    #[command(about = "Show the breadcrumb trail for a path")]
    Breadcrumbs {
        #[arg(help = "Path to resolve")]
        path: String,
    },
}

pub async fn handle(
    ctx: &AppContext,
    cmd: NavCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        NavCommands::Go { path } => {
            let outcome = ctx.navigator.navigate(&path)?;
            match outcome {
                NavigationOutcome::Completed {
                    name,
                    path: landed,
                    redirected,
                } => output_success(
                    &output_format,
                    &format!("Arrived at {}", landed),
                    Some(json!({
                        "route": name,
                        "path": landed,
                        "redirected": redirected,
                        "title": ctx.navigator.title(),
                    })),
                ),
                NavigationOutcome::Duplicate => {
                    output_success(&output_format, "Already on that route", None)
                }
            }
        }

        NavCommands::Routes => {
            let table = RouteTable::shared();
            match output_format {
                OutputFormat::Json => {
                    let routes: Vec<_> = table
                        .routes()
                        .iter()
                        .map(|r| {
                            json!({
                                "path": r.path,
                                "name": r.name,
                                "requires_auth": r.requires_auth,
                                "requires_guest": r.requires_guest,
                                "required_role": r.required_role,
                                "required_permissions": r.required_permissions,
                            })
                        })
                        .collect();
                    output_json(&routes)
                }
                OutputFormat::Text => {
                    for route in table.routes() {
                        let mut markers = Vec::new();
                        if route.requires_guest {
                            markers.push("guest".to_string());
                        }
                        if let Some(role) = route.required_role {
                            markers.push(format!("role:{}", role));
                        } else if route.requires_auth {
                            markers.push("auth".to_string());
                        }
                        if markers.is_empty() {
                            println!("{:40} {}", route.path, route.name);
                        } else {
                            println!("{:40} {} [{}]", route.path, route.name, markers.join(", "));
                        }
                    }
                    Ok(())
                }
            }
        }

        NavCommands::Breadcrumbs { path } => {
            let table = RouteTable::shared();
            let crumbs = table.breadcrumbs(&path);
            match output_format {
                OutputFormat::Json => {
                    let crumbs: Vec<_> = crumbs
                        .iter()
                        .map(|c| json!({ "text": c.text, "to": c.to }))
                        .collect();
                    output_json(&crumbs)
                }
                OutputFormat::Text => {
                    let trail: Vec<&str> = crumbs.iter().map(|c| c.text).collect();
                    println!("{}", trail.join(" > "));
                    Ok(())
                }
            }
        }
    }
}
