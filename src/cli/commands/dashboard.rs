use crate::api::endpoints;
use crate::cli::context::ShellContext;
use crate::cli::format;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::DashboardSummary;

pub async fn handle(ctx: &ShellContext, output_format: OutputFormat) -> anyhow::Result<()> {
    show_detail(ctx, endpoints::dashboard(), &output_format, |summary: &DashboardSummary| {
        let attendance = &summary.attendance;
        let tasks = &summary.team_tasks;

        println!("Dashboard - {}", format::long_date(format::today()));
        println!();
        println!("Attendance");
        println!("  Active employees:   {}", attendance.total_active_users);
        println!("  Present:            {}", attendance.total_present_users);
        println!("  Absent:             {}", attendance.total_absent_users);
        println!("  Checked in:         {}", attendance.total_checkin_users);
        println!("  Late check-ins:     {}", attendance.total_late_checkin_users);
        println!("  Leave requests:     {}", attendance.total_leave_requests);
        println!();
        println!("Team tasks");
        println!("  Today:              {}", tasks.total_tasks_today);
        println!("  In progress:        {}", tasks.total_tasks_in_progress);
        println!("  Completed:          {}", tasks.total_tasks_completed);
    })
    .await
}
