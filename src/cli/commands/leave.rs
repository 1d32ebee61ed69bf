use clap::Args;

use crate::api::endpoints;
use crate::cli::context::ShellContext;
use crate::cli::format;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::LeaveRequest;

#[derive(Args)]
pub struct LeaveArgs {
    #[arg(long, default_value = "today_only", help = "Status filter (today_only, pending, approved, rejected or all)")]
    pub status: String,
    #[arg(long, help = "Filter by employee name")]
    pub search: Option<String>,
}

pub async fn handle(args: LeaveArgs, ctx: &ShellContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let resource = endpoints::leave_requests(&args.status);
    show_list(ctx, resource, "leave_requests", args.search.as_deref(), &output_format, |requests: &[LeaveRequest]| {
        println!("{:<26} {:<16} {:<28} {:<6} {}", "EMPLOYEE", "TYPE", "DATES", "DAYS", "STATUS");
        for request in requests {
            let leave_type = request.leave_type.as_ref().and_then(|t| t.name.as_deref());
            let days = request
                .number_of_days
                .as_ref()
                .filter(|d| !d.is_null())
                .map(|d| d.to_string().trim_matches('"').to_string())
                .unwrap_or_else(|| "N/A".to_string());
            println!(
                "{:<26} {:<16} {:<28} {:<6} {}",
                employee_name(&request.employee),
                or_na(leave_type),
                format!(
                    "{} - {}",
                    format::short_date(request.start_date.as_deref()),
                    format::short_date(request.end_date.as_deref())
                ),
                days,
                format::humanize(request.status.as_deref())
            );
        }
    })
    .await
}
