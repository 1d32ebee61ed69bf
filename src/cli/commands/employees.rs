use clap::Subcommand;

use crate::api::endpoints;
use crate::cli::context::ShellContext;
use crate::cli::format;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::{Employee, EmployeeDetail};

#[derive(Subcommand)]
pub enum EmployeeCommands {
    #[command(about = "List employees")]
    List {
        #[arg(long, help = "Filter by name, designation or department")]
        search: Option<String>,
    },

    #[command(about = "Show an employee profile")]
    Show {
        #[arg(help = "Employee ID")]
        id: String,
    },
}

pub async fn handle(cmd: EmployeeCommands, ctx: &ShellContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        EmployeeCommands::List { search } => {
            show_list(ctx, endpoints::employees(), "employees", search.as_deref(), &output_format, |employees: &[Employee]| {
                println!("{:<8} {:<28} {:<24} {}", "ID", "NAME", "DESIGNATION", "DEPARTMENT");
                for employee in employees {
                    println!(
                        "{:<8} {:<28} {:<24} {}",
                        employee.id,
                        employee.name,
                        or_na(employee.designation.as_deref()),
                        or_na(employee.department.as_deref())
                    );
                }
            })
            .await
        }
        EmployeeCommands::Show { id } => {
            show_detail(ctx, endpoints::employee(&id), &output_format, |e: &EmployeeDetail| {
                println!("{}", e.name);
                println!("  Employee ID:  {}", or_na(e.employee_id.as_deref()));
                println!("  Designation:  {}", or_na(e.designation.as_deref()));
                println!("  Department:   {}", or_na(e.department.as_deref()));
                println!("  Joined:       {}", format::short_date(e.date_of_joining.as_deref()));
                println!("  Email:        {}", or_na(e.contact_info.email.as_deref()));
                println!("  Phone:        {}", or_na(e.contact_info.phone.as_deref()));
                if let Some(remarks) = e.remarks.as_deref().filter(|r| !r.is_empty()) {
                    println!("  Remarks:      {}", remarks);
                }
                println!();
                println!(
                    "Attendance: {} present, {} absent",
                    e.attendance_stats.present, e.attendance_stats.absent
                );
                println!(
                    "Leave:      {} approved ({} paid, {} unpaid)",
                    e.leave_stats.approved, e.leave_stats.paid, e.leave_stats.unpaid
                );

                if !e.leave_requests.is_empty() {
                    println!();
                    println!("Leave history");
                    for leave in &e.leave_requests {
                        println!(
                            "  {:<14} {} - {}  {}",
                            or_na(leave.leave_type.as_deref()),
                            format::short_date(leave.start_date.as_deref()),
                            format::short_date(leave.end_date.as_deref()),
                            format::humanize(leave.status.as_deref())
                        );
                    }
                }
            })
            .await
        }
    }
}
