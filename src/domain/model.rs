use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub i64);

/// Storage identity of a student record. Not to be confused with
/// [`Student::student_id`], the external roster number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub i64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CourseId> for i64 {
    fn from(id: CourseId) -> Self {
        id.0
    }
}

impl From<StudentId> for i64 {
    fn from(id: StudentId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Course,
    Student,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Course => f.write_str("Course"),
            EntityKind::Student => f.write_str("Student"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: Option<CourseId>,
    pub name: String,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInput {
    pub name: String,
    pub term: String,
}

impl Course {
    pub fn from_input(input: CourseInput) -> Self {
        Self {
            id: None,
            name: input.name,
            term: input.term,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Option<StudentId>,
    pub course_id: CourseId,
    /// External roster identifier, free text.
    pub student_id: String,
    pub fname: String,
    pub lname: String,
    pub email: String,
}

/// Every field is required; an update replaces all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub course_id: CourseId,
    pub student_id: String,
    pub fname: String,
    pub lname: String,
    pub email: String,
}

impl Student {
    pub(crate) fn assemble(id: Option<StudentId>, input: StudentInput) -> Self {
        Self {
            id,
            course_id: input.course_id,
            student_id: input.student_id,
            fname: input.fname,
            lname: input.lname,
            email: input.email,
        }
    }
}
