use clap::Subcommand;
use uuid::Uuid;

use crate::api::internships::OfferFilters;
use crate::cli::utils::output_json;
use crate::cli::{AppContext, OutputFormat};
use crate::stores::InternshipStore;
use crate::types::AnnouncementStatus;

#[derive(Subcommand)]
pub enum OfferCommands {
    #[command(about = "List internship offers")]
    List {
        #[arg(long, help = "Filter by medical specialty")]
        specialty: Option<String>,
        #[arg(long, help = "Filter by establishment id")]
        establishment: Option<Uuid>,
        #[arg(long, help = "Filter by status (draft, published, ...)")]
        status: Option<AnnouncementStatus>,
    },

    #[command(about = "Show one offer")]
    Show {
        #[arg(help = "Announcement id")]
        id: Uuid,
    },
}

pub async fn handle(
    ctx: &AppContext,
    cmd: OfferCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        OfferCommands::List {
            specialty,
            establishment,
            status,
        } => {
            let store = InternshipStore::default();
            store.update_filters(OfferFilters {
                specialty,
                establishment,
                status,
            });
            store.refresh(&ctx.api).await?;

            let offers = store.filtered();
            match output_format {
                OutputFormat::Json => output_json(&offers),
                OutputFormat::Text => {
                    if offers.is_empty() {
                        println!("No offers match the current filters");
                        return Ok(());
                    }
                    for offer in offers {
                        println!(
                            "{}  {} ({}, {})",
                            offer.id, offer.title, offer.service.specialty, offer.establishment.name
                        );
                    }
                    Ok(())
                }
            }
        }

        OfferCommands::Show { id } => {
            let offer = ctx.api.internships().get(id).await?;
            match output_format {
                OutputFormat::Json => output_json(&offer),
                OutputFormat::Text => {
                    println!("{}", offer.title);
                    println!("Service: {} ({})", offer.service.name, offer.service.specialty);
                    println!("Establishment: {}", offer.establishment.name);
                    if let Some(description) = &offer.description {
                        println!("\n{}", description);
                    }
                    Ok(())
                }
            }
        }
    }
}
