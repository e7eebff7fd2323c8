use crate::core::export::render;
use crate::core::reports::{course_columns, student_columns};
use crate::core::roster::RosterLinker;
use crate::core::{CourseRepository, StudentRepository};
use crate::domain::model::{
    Course, CourseId, CourseInput, EntityKind, Student, StudentId, StudentInput,
};
use crate::utils::error::{Result, RosterError};

/// Administrative operations on courses and their rosters.
///
/// Request handlers call these and pick a transport response; nothing here
/// knows about status codes or authorization.
pub struct RosterAdmin<'a, R: ?Sized> {
    store: &'a R,
}

impl<'a, R> RosterAdmin<'a, R>
where
    R: CourseRepository + StudentRepository + ?Sized,
{
    pub fn new(store: &'a R) -> Self {
        Self { store }
    }

    fn linker(&self) -> RosterLinker<'a, R, R> {
        RosterLinker::new(self.store, self.store)
    }

    pub fn list_courses(&self) -> Result<Vec<Course>> {
        self.store.list_courses()
    }

    pub fn get_course(&self, id: CourseId) -> Result<Course> {
        self.store
            .find_course_by_id(id)?
            .ok_or_else(|| RosterError::not_found(EntityKind::Course, id))
    }

    pub fn create_course(&self, input: CourseInput) -> Result<Course> {
        let course = self.store.save_course(Course::from_input(input))?;
        tracing::info!("Created course {:?} ({} {})", course.id, course.name, course.term);
        Ok(course)
    }

    pub fn update_course(&self, id: CourseId, input: CourseInput) -> Result<Course> {
        let mut course = self.get_course(id)?;
        course.name = input.name;
        course.term = input.term;
        let course = self.store.save_course(course)?;
        tracing::info!("Updated course {}", id);
        Ok(course)
    }

    /// Deletes a course and returns it. Students still pointing at the
    /// course are left in place.
    pub fn delete_course(&self, id: CourseId) -> Result<Course> {
        let course = self
            .store
            .delete_course(id)?
            .ok_or_else(|| RosterError::not_found(EntityKind::Course, id))?;

        let orphaned = self.store.list_students_by_course(id)?.len();
        if orphaned > 0 {
            tracing::warn!(
                "Course {} deleted while {} student(s) still reference it",
                id,
                orphaned
            );
        } else {
            tracing::info!("Deleted course {}", id);
        }
        Ok(course)
    }

    pub fn get_student(&self, id: StudentId) -> Result<Student> {
        self.store
            .find_student_by_id(id)?
            .ok_or_else(|| RosterError::not_found(EntityKind::Student, id))
    }

    /// Unknown courses simply have an empty roster.
    pub fn list_students_by_course(&self, course_id: CourseId) -> Result<Vec<Student>> {
        self.store.list_students_by_course(course_id)
    }

    pub fn create_student(&self, input: StudentInput) -> Result<Student> {
        let student = self.linker().prepare_create(input)?;
        let saved = self.store.save_student(student)?;
        tracing::info!("Enrolled student {:?} in course {}", saved.id, saved.course_id);
        Ok(saved)
    }

    pub fn update_student(&self, id: StudentId, input: StudentInput) -> Result<Student> {
        let student = self.linker().prepare_update(id, input)?;
        let saved = self.store.save_student(student)?;
        tracing::info!("Updated student {}", id);
        Ok(saved)
    }

    pub fn delete_student(&self, id: StudentId) -> Result<Student> {
        let student = self
            .store
            .delete_student(id)?
            .ok_or_else(|| RosterError::not_found(EntityKind::Student, id))?;
        tracing::info!("{}", deleted_message(EntityKind::Student, id));
        Ok(student)
    }

    pub fn export_courses(&self) -> Result<String> {
        let courses = self.store.list_courses()?;
        tracing::info!("Exporting {} course(s)", courses.len());
        render(&course_columns(), &courses)
    }

    /// Exports one course's roster, or every student when `course` is `None`.
    pub fn export_students(&self, course: Option<CourseId>) -> Result<String> {
        let students = match course {
            Some(course_id) => self.store.list_students_by_course(course_id)?,
            None => self.store.list_students()?,
        };
        tracing::info!("Exporting {} student(s)", students.len());
        render(&student_columns(), &students)
    }
}

/// Confirmation text for a successful delete, e.g. `Student with id 1 deleted`.
pub fn deleted_message(entity: EntityKind, id: impl Into<i64>) -> String {
    format!("{} with id {} deleted", entity, id.into())
}
