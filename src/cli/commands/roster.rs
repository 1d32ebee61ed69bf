use clap::Args;

use crate::api::endpoints;
use crate::cli::context::ShellContext;
use crate::cli::format;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::RosterEntry;

#[derive(Args)]
pub struct RosterArgs {
    #[arg(long, default_value = "All", help = "Shift status (Onsite, Remote, ... or All)")]
    pub status: String,
    #[arg(long, default_value = "All", help = "Day of the week (Monday ... or All)")]
    pub day: String,
    #[arg(long, help = "Filter by employee name")]
    pub search: Option<String>,
}

pub async fn handle(args: RosterArgs, ctx: &ShellContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let resource = endpoints::rosters(&args.status, &args.day);
    show_list(ctx, resource, "rosters", args.search.as_deref(), &output_format, |entries: &[RosterEntry]| {
        println!("{:<26} {:<12} {:<22} {}", "EMPLOYEE", "DAY", "SHIFT", "STATUS");
        for entry in entries {
            println!(
                "{:<26} {:<12} {:<22} {}",
                employee_name(&entry.employee),
                or_na(entry.day.as_deref()),
                format::shift_range(entry.start_time.as_deref(), entry.end_time.as_deref()),
                or_na(entry.status.as_deref())
            );
        }
    })
    .await
}
