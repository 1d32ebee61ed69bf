pub mod commands;
pub mod context;
pub mod format;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config;
use context::ShellContext;

#[derive(Parser)]
#[command(name = "hrms")]
#[command(about = "HRMS CLI - sign in and browse employees, attendance, rosters, leave, tasks, training, announcements and policies")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Session check and status")]
    Session {
        #[command(subcommand)]
        cmd: commands::session::SessionCommands,
    },

    #[command(about = "Sign in to the HRMS server")]
    Login(commands::session::LoginArgs),

    #[command(about = "Sign out")]
    Logout {
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    #[command(about = "Dashboard summary counters")]
    Dashboard,

    #[command(about = "Employee directory")]
    Employees {
        #[command(subcommand)]
        cmd: commands::employees::EmployeeCommands,
    },

    #[command(about = "Attendance records")]
    Attendance {
        #[command(subcommand)]
        cmd: commands::attendance::AttendanceCommands,
    },

    #[command(about = "Shift roster")]
    Roster(commands::roster::RosterArgs),

    #[command(about = "Leave requests")]
    Leave(commands::leave::LeaveArgs),

    #[command(about = "Team tasks")]
    Tasks {
        #[command(subcommand)]
        cmd: commands::tasks::TaskCommands,
    },

    #[command(about = "Training records")]
    Training {
        #[command(subcommand)]
        cmd: commands::training::TrainingCommands,
    },

    #[command(about = "Announcements")]
    Announcements {
        #[command(subcommand)]
        cmd: commands::announcements::AnnouncementCommands,
    },

    #[command(about = "Policy documents")]
    Policies {
        #[command(subcommand)]
        cmd: commands::policies::PolicyCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = ShellContext::from_config(config::config().clone())?;

    match cli.command {
        Commands::Session { cmd } => commands::session::handle(cmd, &ctx, output_format).await,
        Commands::Login(args) => commands::session::login(args, &ctx, output_format).await,
        Commands::Logout { yes } => commands::session::logout(yes, &ctx, output_format).await,
        Commands::Dashboard => commands::dashboard::handle(&ctx, output_format).await,
        Commands::Employees { cmd } => commands::employees::handle(cmd, &ctx, output_format).await,
        Commands::Attendance { cmd } => commands::attendance::handle(cmd, &ctx, output_format).await,
        Commands::Roster(args) => commands::roster::handle(args, &ctx, output_format).await,
        Commands::Leave(args) => commands::leave::handle(args, &ctx, output_format).await,
        Commands::Tasks { cmd } => commands::tasks::handle(cmd, &ctx, output_format).await,
        Commands::Training { cmd } => commands::training::handle(cmd, &ctx, output_format).await,
        Commands::Announcements { cmd } => commands::announcements::handle(cmd, &ctx, output_format).await,
        Commands::Policies { cmd } => commands::policies::handle(cmd, &ctx, output_format).await,
    }
}
