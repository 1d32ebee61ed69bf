use clap::Subcommand;

use crate::api::endpoints;
use crate::cli::context::ShellContext;
use crate::cli::format;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::Announcement;

#[derive(Subcommand)]
pub enum AnnouncementCommands {
    #[command(about = "List announcements")]
    List {
        #[arg(long, help = "Filter by title")]
        search: Option<String>,
    },

    #[command(about = "Show an announcement")]
    Show {
        #[arg(help = "Announcement ID")]
        id: String,
    },
}

pub async fn handle(cmd: AnnouncementCommands, ctx: &ShellContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AnnouncementCommands::List { search } => {
            show_list(
                ctx,
                endpoints::announcements(),
                "announcements",
                search.as_deref(),
                &output_format,
                |announcements: &[Announcement]| {
                    for a in announcements {
                        println!("[{}] {}", a.id, a.title);
                        println!(
                            "    {} | {} | {}",
                            or_na(a.category.as_deref()),
                            or_na(a.target_team.as_deref()),
                            format::date_time(a.published_at.as_deref())
                        );
                    }
                },
            )
            .await
        }
        AnnouncementCommands::Show { id } => {
            show_detail(ctx, endpoints::announcement(&id), &output_format, |a: &Announcement| {
                println!("{}", a.title);
                println!("Category:  {}", or_na(a.category.as_deref()));
                println!("Audience:  {}", or_na(a.target_team.as_deref()));
                println!("Published: {}", format::date_time(a.published_at.as_deref()));
                println!();
                println!("{}", a.content.as_deref().unwrap_or("No content available"));
            })
            .await
        }
    }
}
