use crate::domain::model::{CourseId, CourseInput, StudentInput};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "roster")]
#[command(about = "Administer course rosters and export them as CSV")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "roster.toml")]
    pub config: String,

    /// Override `store.data_dir` from the config file
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Manage courses
    #[command(subcommand)]
    Course(CourseCommand),
    /// Manage students
    #[command(subcommand)]
    Student(StudentCommand),
    /// Export a CSV report
    #[command(subcommand)]
    Export(ExportCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum CourseCommand {
    List,
    Get {
        #[arg(long)]
        id: i64,
    },
    Add(CourseArgs),
    Update {
        #[arg(long)]
        id: i64,
        #[command(flatten)]
        course: CourseArgs,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum StudentCommand {
    Get {
        #[arg(long)]
        id: i64,
    },
    /// List the roster of one course
    List {
        #[arg(long)]
        course_id: i64,
    },
    Add(StudentArgs),
    Update {
        #[arg(long)]
        id: i64,
        #[command(flatten)]
        student: StudentArgs,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ExportCommand {
    Courses {
        /// Output file; `-` writes to stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    Students {
        /// Restrict the export to one course's roster
        #[arg(long)]
        course_id: Option<i64>,
        /// Output file; `-` writes to stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct CourseArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub term: String,
}

#[derive(Debug, Clone, Args)]
pub struct StudentArgs {
    #[arg(long)]
    pub course_id: i64,
    /// External roster identifier
    #[arg(long)]
    pub student_id: String,
    #[arg(long)]
    pub fname: String,
    #[arg(long)]
    pub lname: String,
    #[arg(long)]
    pub email: String,
}

impl From<CourseArgs> for CourseInput {
    fn from(args: CourseArgs) -> Self {
        CourseInput {
            name: args.name,
            term: args.term,
        }
    }
}

impl From<StudentArgs> for StudentInput {
    fn from(args: StudentArgs) -> Self {
        StudentInput {
            course_id: CourseId(args.course_id),
            student_id: args.student_id,
            fname: args.fname,
            lname: args.lname,
            email: args.email,
        }
    }
}

impl CliConfig {
    /// Whether the command changes the roster and the snapshot must be saved.
    pub fn mutates(&self) -> bool {
        matches!(
            self.command,
            Command::Course(CourseCommand::Add(_))
                | Command::Course(CourseCommand::Update { .. })
                | Command::Course(CourseCommand::Delete { .. })
                | Command::Student(StudentCommand::Add(_))
                | Command::Student(StudentCommand::Update { .. })
                | Command::Student(StudentCommand::Delete { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_student_add() {
        let config = CliConfig::try_parse_from([
            "roster",
            "student",
            "add",
            "--course-id",
            "1",
            "--student-id",
            "12345",
            "--fname",
            "John",
            "--lname",
            "Doe",
            "--email",
            "8TbGZ@example.com",
        ])
        .unwrap();

        assert!(config.mutates());
        match config.command {
            Command::Student(StudentCommand::Add(args)) => {
                let input = StudentInput::from(args);
                assert_eq!(input.course_id, CourseId(1));
                assert_eq!(input.student_id, "12345");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_export_defaults() {
        let config = CliConfig::try_parse_from(["roster", "export", "students"]).unwrap();

        assert_eq!(config.config, "roster.toml");
        assert!(!config.mutates());
        assert!(matches!(
            config.command,
            Command::Export(ExportCommand::Students {
                course_id: None,
                output: None
            })
        ));
    }

    #[test]
    fn test_student_add_requires_every_field() {
        let result = CliConfig::try_parse_from([
            "roster",
            "student",
            "add",
            "--course-id",
            "1",
            "--fname",
            "John",
        ]);
        assert!(result.is_err());
    }
}
