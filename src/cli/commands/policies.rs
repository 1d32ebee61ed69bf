use clap::Subcommand;
use serde_json::json;

use crate::api::{endpoints, policies};
use crate::cli::context::ShellContext;
use crate::cli::format;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::Policy;

const NO_ATTACHMENT: &str = "This policy does not have an attached PDF file.";

#[derive(Subcommand)]
pub enum PolicyCommands {
    #[command(about = "List policies")]
    List {
        #[arg(long, help = "Filter by title or publish date")]
        search: Option<String>,
    },

    #[command(about = "Show a policy")]
    Show {
        #[arg(help = "Policy ID")]
        id: String,
    },

    #[command(about = "Print the download link of a policy's PDF")]
    Download {
        #[arg(help = "Policy ID")]
        id: String,
    },
}

pub async fn handle(cmd: PolicyCommands, ctx: &ShellContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        PolicyCommands::List { search } => {
            show_list(ctx, endpoints::policies(), "policies", search.as_deref(), &output_format, |policies: &[Policy]| {
                for policy in policies {
                    let attachment = if policy.has_attachment() { " (PDF)" } else { "" };
                    println!(
                        "[{}] {}{}  {}",
                        policy.id,
                        policy.title,
                        attachment,
                        format::day_month_year(policy.published_at.as_deref())
                    );
                }
            })
            .await
        }
        PolicyCommands::Show { id } => {
            show_detail(ctx, endpoints::policy(&id), &output_format, |policy: &Policy| {
                println!("{}", policy.title);
                println!("Published: {}", format::day_month_year(policy.published_at.as_deref()));
                println!();
                println!("{}", policy.content.as_deref().unwrap_or("No content available"));
                if policy.has_attachment() {
                    println!();
                    println!("Attachment available: run `hrms policies download {}`", policy.id);
                }
            })
            .await
        }
        PolicyCommands::Download { id } => match policies::download_url(&ctx.api, &ctx.session(), &id).await {
            Ok(Some(url)) => output_success(&output_format, &url, Some(json!({ "file_url": url }))),
            Ok(None) => output_success(&output_format, NO_ATTACHMENT, Some(json!({ "file_url": null }))),
            Err(e) => {
                let message = e.user_message();
                output_error(&output_format, &message, Some(e.error_code()))?;
                anyhow::bail!(message)
            }
        },
    }
}
