use clap::{Subcommand, ValueEnum};

use crate::api::endpoints::{self, TaskScope};
use crate::cli::context::ShellContext;
use crate::cli::format;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::TeamTask;
use crate::screen::ResourceController;

#[derive(Clone, Copy, ValueEnum)]
pub enum ScopeArg {
    Daily,
    Overall,
}

impl From<ScopeArg> for TaskScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Daily => TaskScope::Daily,
            ScopeArg::Overall => TaskScope::Overall,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    #[command(about = "List team tasks")]
    List {
        #[arg(long, value_enum, default_value = "daily", help = "Today's tasks or all tasks")]
        scope: ScopeArg,
        #[arg(long, default_value = "in_progress", help = "Task status (in_progress, completed, ...)")]
        status: String,
        #[arg(long, default_value = "1", help = "Number of pages to fetch")]
        pages: u32,
        #[arg(long, help = "Filter by title, assignee or date")]
        search: Option<String>,
    },

    #[command(about = "Show a task")]
    Show {
        #[arg(help = "Task ID")]
        id: String,
    },
}

fn render_tasks(tasks: &[TeamTask]) {
    println!("{:<6} {:<32} {:<24} {:<14} {:<10} {}", "ID", "TITLE", "ASSIGNED TO", "DEADLINE", "PRIORITY", "STATUS");
    for task in tasks {
        println!(
            "{:<6} {:<32} {:<24} {:<14} {:<10} {}",
            task.id,
            or_na(task.title.as_deref()),
            employee_name(&task.assigned_to),
            format::short_date(task.deadline.as_deref()),
            format::humanize(task.priority.as_deref()),
            format::humanize(task.status.as_deref())
        );
    }
}

pub async fn handle(cmd: TaskCommands, ctx: &ShellContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TaskCommands::List {
            scope,
            status,
            pages,
            search,
        } => {
            let controller: ResourceController<Vec<TeamTask>> = ctx.controller(endpoints::team_tasks(scope.into(), &status));
            controller.load().await;

            for _ in 1..pages.max(1) {
                if !controller.load_more().await {
                    break;
                }
                if let Some(message) = controller.state().error_message {
                    tracing::warn!("Stopped paging: {}", message);
                    break;
                }
            }

            render_list(&controller, "tasks", search.as_deref(), &output_format, render_tasks)?;

            let cursor = controller.cursor();
            if cursor.has_more && matches!(output_format, OutputFormat::Text) {
                println!();
                println!("More tasks available (page {} loaded, use --pages {})", cursor.page, cursor.page + 1);
            }
            Ok(())
        }
        TaskCommands::Show { id } => {
            show_detail(ctx, endpoints::team_task(&id), &output_format, |task: &TeamTask| {
                println!("{}", or_na(task.title.as_deref()));
                println!("  Assigned to: {}", employee_name(&task.assigned_to));
                println!("  Date:        {}", format::short_date(task.date.as_deref()));
                println!("  Deadline:    {}", format::short_date(task.deadline.as_deref()));
                println!("  Status:      {}", format::humanize(task.status.as_deref()));
                println!("  Priority:    {}", format::humanize(task.priority.as_deref()));
                println!("  Created:     {}", format::date_time(task.created_at.as_deref()));
                println!("  Updated:     {}", format::date_time(task.updated_at.as_deref()));
                if let Some(details) = task.details.as_deref().filter(|d| !d.is_empty()) {
                    println!();
                    println!("{}", details);
                }
                if let Some(remarks) = task.remarks.as_deref().filter(|r| !r.is_empty()) {
                    println!();
                    println!("Remarks: {}", remarks);
                }
            })
            .await
        }
    }
}
