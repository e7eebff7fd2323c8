//! Dispatch of parsed `roster` subcommands onto [`RosterAdmin`].

use crate::config::cli::{Command, CourseCommand, ExportCommand, StudentCommand};
use crate::core::admin::{deleted_message, RosterAdmin};
use crate::core::{CourseId, CourseRepository, StudentId, StudentRepository};
use crate::domain::model::EntityKind;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Text for stdout: JSON records or a confirmation message.
    Message(String),
    /// A rendered CSV report and where the user asked to put it.
    Report {
        kind: &'static str,
        csv: String,
        output: Option<String>,
    },
}

pub fn run_command<R>(admin: &RosterAdmin<'_, R>, command: Command) -> Result<CommandOutput>
where
    R: CourseRepository + StudentRepository + ?Sized,
{
    match command {
        Command::Course(course) => match course {
            CourseCommand::List => to_json(&admin.list_courses()?),
            CourseCommand::Get { id } => to_json(&admin.get_course(CourseId(id))?),
            CourseCommand::Add(args) => to_json(&admin.create_course(args.into())?),
            CourseCommand::Update { id, course } => {
                to_json(&admin.update_course(CourseId(id), course.into())?)
            }
            CourseCommand::Delete { id } => {
                admin.delete_course(CourseId(id))?;
                Ok(CommandOutput::Message(deleted_message(
                    EntityKind::Course,
                    id,
                )))
            }
        },
        Command::Student(student) => match student {
            StudentCommand::Get { id } => to_json(&admin.get_student(StudentId(id))?),
            StudentCommand::List { course_id } => {
                to_json(&admin.list_students_by_course(CourseId(course_id))?)
            }
            StudentCommand::Add(args) => to_json(&admin.create_student(args.into())?),
            StudentCommand::Update { id, student } => {
                to_json(&admin.update_student(StudentId(id), student.into())?)
            }
            StudentCommand::Delete { id } => {
                admin.delete_student(StudentId(id))?;
                Ok(CommandOutput::Message(deleted_message(
                    EntityKind::Student,
                    id,
                )))
            }
        },
        Command::Export(export) => match export {
            ExportCommand::Courses { output } => Ok(CommandOutput::Report {
                kind: "courses",
                csv: admin.export_courses()?,
                output,
            }),
            ExportCommand::Students { course_id, output } => Ok(CommandOutput::Report {
                kind: "students",
                csv: admin.export_students(course_id.map(CourseId))?,
                output,
            }),
        },
    }
}

/// Default file name for a report, e.g. `students_20261019_093000.csv`.
pub fn default_report_name(kind: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}.csv", kind, now.format("%Y%m%d_%H%M%S"))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<CommandOutput> {
    Ok(CommandOutput::Message(serde_json::to_string_pretty(value)?))
}
