use chrono::{Datelike, NaiveDate};
use clap::Subcommand;

use crate::api::endpoints;
use crate::cli::context::ShellContext;
use crate::cli::format;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::{AttendanceRecord, MonthlyAttendance};

#[derive(Subcommand)]
pub enum AttendanceCommands {
    #[command(about = "Attendance for one day")]
    Daily {
        #[arg(long, help = "Date (YYYY-MM-DD, default today)")]
        date: Option<NaiveDate>,
        #[arg(long, help = "Filter by employee name")]
        search: Option<String>,
    },

    #[command(about = "Attendance between two dates")]
    Filter {
        #[arg(long, help = "Employee ID (default everyone)")]
        employee: Option<String>,
        #[arg(long, help = "Start date (YYYY-MM-DD)")]
        start: NaiveDate,
        #[arg(long, help = "End date (YYYY-MM-DD, default start date)")]
        end: Option<NaiveDate>,
        #[arg(long, help = "Filter by employee name")]
        search: Option<String>,
    },

    #[command(about = "Monthly attendance grid")]
    Monthly {
        #[arg(long, help = "Month 1-12 (default current month)")]
        month: Option<u32>,
        #[arg(long, help = "Year (default current year)")]
        year: Option<i32>,
    },
}

fn render_records(records: &[AttendanceRecord]) {
    println!(
        "{:<26} {:<12} {:<10} {:<10} {:<10} {:<8} {}",
        "EMPLOYEE", "DATE", "STATUS", "CHECK IN", "CHECK OUT", "HOURS", "SHIFT"
    );
    for record in records {
        let hours = record
            .total_hours
            .as_ref()
            .filter(|h| !h.is_null())
            .map(|h| h.to_string().trim_matches('"').to_string())
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "{:<26} {:<12} {:<10} {:<10} {:<10} {:<8} {}",
            record.employee_name,
            format::short_date(record.date.as_deref()),
            format::humanize(record.status.as_deref()),
            or_na(record.check_in.as_deref()),
            or_na(record.check_out.as_deref()),
            hours,
            format::shift_range(record.roster_start.as_deref(), record.roster_end.as_deref())
        );
    }
}

pub async fn handle(cmd: AttendanceCommands, ctx: &ShellContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AttendanceCommands::Daily { date, search } => {
            let date = date.unwrap_or_else(format::today);
            if matches!(output_format, OutputFormat::Text) {
                println!("{}", format::long_date(date));
            }
            show_list(ctx, endpoints::attendance_daily(date), "attendance", search.as_deref(), &output_format, render_records).await
        }
        AttendanceCommands::Filter {
            employee,
            start,
            end,
            search,
        } => {
            let end = end.unwrap_or(start);
            if end < start {
                anyhow::bail!("End date must not be before start date");
            }
            let resource = endpoints::attendance_filter(employee.as_deref(), start, end);
            show_list(ctx, resource, "attendance", search.as_deref(), &output_format, render_records).await
        }
        AttendanceCommands::Monthly { month, year } => {
            let today = format::today();
            let month = month.unwrap_or_else(|| today.month());
            let year = year.unwrap_or_else(|| today.year());

            let resource = match endpoints::attendance_monthly(month, year, today) {
                Ok(resource) => resource,
                Err(e) => {
                    output_error(&output_format, &e.to_string(), Some(e.error_code()))?;
                    return Err(e.into());
                }
            };

            show_detail(ctx, resource, &output_format, |grid: &MonthlyAttendance| {
                let rows: Vec<_> = grid.data.iter().filter(|row| row.is_active()).collect();
                if rows.is_empty() {
                    println!("No attendance found for {}/{}", month, year);
                    return;
                }
                for row in rows {
                    let present = grid.dates.iter().filter(|d| row.status_on(d) == "present").count();
                    let absent = grid.dates.iter().filter(|d| row.status_on(d) == "absent").count();
                    let leave = grid.dates.iter().filter(|d| row.status_on(d) == "leave").count();
                    println!(
                        "{:<26} present {:>3}  absent {:>3}  leave {:>3}",
                        row.employee_name, present, absent, leave
                    );
                }
            })
            .await
        }
    }
}
