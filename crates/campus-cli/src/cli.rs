//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "campus", version, about = "Campus school-management client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend base URL, overriding the config file and CAMPUS_API_URL.
    #[arg(long = "api-url", global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and store the session token.
    Login(LoginArgs),

    /// Forget the stored session token.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// Print a reference list as `id<TAB>label`.
    List {
        #[arg(value_enum)]
        entity: Entity,
    },

    /// Walk the enrollment chain and print the options of the deepest
    /// enabled level.
    Cascade(CascadeArgs),

    /// Print a teacher's routine for an academic year.
    Routine(RoutineArgs),

    /// Enroll a student into a section.
    Enroll(EnrollArgs),
}

#[derive(Parser)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Entity {
    Years,
    Departments,
    Classes,
    Sections,
    Subjects,
    Teachers,
    ExamTypes,
    ExamSlots,
    Days,
    Slots,
    /// Requires a signed-in user.
    Students,
}

#[derive(Parser)]
pub struct CascadeArgs {
    #[arg(long)]
    pub department: Option<i64>,

    #[arg(long = "class")]
    pub class: Option<i64>,

    #[arg(long)]
    pub section: Option<i64>,
}

#[derive(Parser)]
pub struct RoutineArgs {
    /// Teacher id (default: the signed-in teacher).
    #[arg(long)]
    pub teacher: Option<i64>,

    #[arg(long)]
    pub year: i64,
}

#[derive(Parser)]
pub struct EnrollArgs {
    #[arg(long)]
    pub student: i64,

    #[arg(long)]
    pub year: i64,

    #[arg(long = "class")]
    pub class: i64,

    #[arg(long)]
    pub section: i64,

    /// mm/dd/yyyy or yyyy-mm-dd.
    #[arg(long = "admission-date")]
    pub admission_date: String,

    #[arg(long, default_value = "Active")]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_api_url_after_subcommand() {
        let cli = Cli::try_parse_from(["campus", "whoami", "--api-url", "http://10.0.0.2:5074/api"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.2:5074/api"));
        assert!(matches!(cli.command, Command::Whoami));
    }

    #[test]
    fn test_list_entity_names() {
        let cli = Cli::try_parse_from(["campus", "list", "exam-types"]).unwrap();
        assert!(matches!(cli.command, Command::List { entity: Entity::ExamTypes }));
    }

    #[test]
    fn test_enroll_defaults_status() {
        let cli = Cli::try_parse_from([
            "campus",
            "enroll",
            "--student",
            "4",
            "--year",
            "1",
            "--class",
            "9",
            "--section",
            "2",
            "--admission-date",
            "01/15/2025",
        ])
        .unwrap();
        match cli.command {
            Command::Enroll(args) => assert_eq!(args.status, "Active"),
            _ => panic!("expected enroll"),
        }
    }
}
