//! Standard column sets for roster exports.

use crate::core::export::Column;
use crate::domain::model::{Course, Student};

fn optional_id<T: ToString>(id: Option<T>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

/// `id,name,term`
pub fn course_columns() -> Vec<Column<Course>> {
    vec![
        Column::new("id", |c: &Course| optional_id(c.id)),
        Column::new("name", |c: &Course| c.name.clone()),
        Column::new("term", |c: &Course| c.term.clone()),
    ]
}

/// `id,courseId,studentId,fname,lname,email`
pub fn student_columns() -> Vec<Column<Student>> {
    vec![
        Column::new("id", |s: &Student| optional_id(s.id)),
        Column::new("courseId", |s: &Student| s.course_id.to_string()),
        Column::new("studentId", |s: &Student| s.student_id.clone()),
        Column::new("fname", |s: &Student| s.fname.clone()),
        Column::new("lname", |s: &Student| s.lname.clone()),
        Column::new("email", |s: &Student| s.email.clone()),
    ]
}
