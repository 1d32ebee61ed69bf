use clap::Subcommand;

use crate::api::endpoints;
use crate::cli::context::ShellContext;
use crate::cli::format;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::{EmployeeTrainingHistory, TrainingRecord};

#[derive(Subcommand)]
pub enum TrainingCommands {
    #[command(about = "List training records")]
    List {
        #[arg(long, default_value = "all", help = "Approval status filter (pending, approved, ... or all)")]
        status: String,
        #[arg(long, help = "Filter by program, employee or training type")]
        search: Option<String>,
    },

    #[command(about = "Training history of one employee")]
    Employee {
        #[arg(help = "Employee ID")]
        id: String,
    },
}

fn render_trainings(records: &[TrainingRecord]) {
    println!("{:<32} {:<24} {:<14} {:<28} {}", "PROGRAM", "EMPLOYEE", "TYPE", "DATES", "STATUS");
    for record in records {
        println!(
            "{:<32} {:<24} {:<14} {:<28} {}",
            or_na(record.program_title.as_deref()),
            employee_name(&record.employee),
            or_na(record.training_type.as_deref()),
            format!(
                "{} - {}",
                format::short_date(record.start_date.as_deref()),
                format::short_date(record.end_date.as_deref())
            ),
            format::humanize(record.approval_status.as_deref().or(record.completion_status.as_deref()))
        );
    }
}

pub async fn handle(cmd: TrainingCommands, ctx: &ShellContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TrainingCommands::List { status, search } => {
            show_list(ctx, endpoints::training(&status), "trainings", search.as_deref(), &output_format, render_trainings).await
        }
        TrainingCommands::Employee { id } => {
            show_detail(
                ctx,
                endpoints::training_for_employee(&id),
                &output_format,
                |history: &EmployeeTrainingHistory| {
                    println!(
                        "{} trainings: {} completed, {} pending",
                        history.data.len(),
                        history.completed(),
                        history.pending()
                    );
                    if !history.data.is_empty() {
                        println!();
                        render_trainings(&history.data);
                    }
                },
            )
            .await
        }
    }
}
