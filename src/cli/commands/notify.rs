use clap::Subcommand;

use crate::cli::utils::{output_json, output_success};
use crate::cli::{AppContext, OutputFormat};

#[derive(Subcommand)]
pub enum NotifyCommands {
    #[command(about = "List notifications")]
    List,

    #[command(about = "Show the unread notification count")]
    Unread,

    #[command(about = "Mark all notifications as read")]
    MarkAllRead,
}

pub async fn handle(
    ctx: &AppContext,
    cmd: NotifyCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        NotifyCommands::List => {
            let notifications = ctx.api.notifications().list().await?;
            match output_format {
                OutputFormat::Json => output_json(&notifications),
                OutputFormat::Text => {
                    if notifications.is_empty() {
                        println!("No notifications");
                        return Ok(());
                    }
                    for n in notifications {
                        let marker = if n.read { " " } else { "*" };
                        println!("{} {:?}: {}", marker, n.notification_type, n.message);
                    }
                    Ok(())
                }
            }
        }

        NotifyCommands::Unread => {
            let unread = ctx.api.notifications().unread_count().await?;
            output_success(
                &output_format,
                &format!("{} unread notifications", unread.count),
                Some(serde_json::json!({ "count": unread.count })),
            )
        }

        NotifyCommands::MarkAllRead => {
            ctx.api.notifications().mark_all_read().await?;
            output_success(&output_format, "All notifications marked as read", None)
        }
    }
}
