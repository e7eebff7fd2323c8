//! Application-level referential integrity between students and courses.
//!
//! Storage does not enforce that a student's `course_id` names an existing
//! course, so every student write goes through [`RosterLinker`] first. The
//! linker only reads; persisting the value it returns is the caller's job.

use crate::core::{CourseRepository, StudentRepository};
use crate::domain::model::{CourseId, EntityKind, Student, StudentId, StudentInput};
use crate::utils::error::{Result, RosterError};

pub struct RosterLinker<'a, C: ?Sized, S: ?Sized> {
    courses: &'a C,
    students: &'a S,
}

impl<'a, C, S> RosterLinker<'a, C, S>
where
    C: CourseRepository + ?Sized,
    S: StudentRepository + ?Sized,
{
    /// Wraps the two read-side collaborators. They may be the same store.
    pub fn new(courses: &'a C, students: &'a S) -> Self {
        Self { courses, students }
    }

    /// Validates a new student against the course table.
    ///
    /// The returned value carries no identity; storage assigns one on save.
    pub fn prepare_create(&self, candidate: StudentInput) -> Result<Student> {
        self.require_course(candidate.course_id)?;
        Ok(Student::assemble(None, candidate))
    }

    /// Validates a full replacement of student `id`.
    ///
    /// The student lookup always runs first, so a missing student is
    /// reported even when the incoming course is missing too.
    pub fn prepare_update(&self, id: StudentId, incoming: StudentInput) -> Result<Student> {
        // Student first: a missing student short-circuits the course lookup
        let existing = self
            .students
            .find_student_by_id(id)?
            .ok_or_else(|| RosterError::not_found(EntityKind::Student, id))?;

        self.require_course(incoming.course_id)?;

        // Re-linking to another course is allowed once that course exists
        if existing.course_id != incoming.course_id {
            tracing::debug!(
                "Student {} moves from course {} to course {}",
                id,
                existing.course_id,
                incoming.course_id
            );
        }

        // Full replacement: only the identity survives from the stored record
        Ok(Student::assemble(existing.id.or(Some(id)), incoming))
    }

    /// Fails with `NotFound(Course, course_id)` unless the course is stored.
    fn require_course(&self, course_id: CourseId) -> Result<()> {
        tracing::debug!("Checking course {} exists", course_id);
        match self.courses.find_course_by_id(course_id)? {
            Some(_) => Ok(()),
            None => Err(RosterError::not_found(EntityKind::Course, course_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Course;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockCourses {
        courses: HashMap<CourseId, Course>,
        lookups: AtomicUsize,
    }

    impl MockCourses {
        fn with(ids: &[i64]) -> Self {
            let courses = ids
                .iter()
                .map(|&id| {
                    (
                        CourseId(id),
                        Course {
                            id: Some(CourseId(id)),
                            name: format!("CS{}", id),
                            term: "F23".to_string(),
                        },
                    )
                })
                .collect();
            Self {
                courses,
                lookups: AtomicUsize::new(0),
            }
        }
    }

    impl CourseRepository for MockCourses {
        fn find_course_by_id(&self, id: CourseId) -> Result<Option<Course>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.courses.get(&id).cloned())
        }

        fn list_courses(&self) -> Result<Vec<Course>> {
            Ok(self.courses.values().cloned().collect())
        }

        fn save_course(&self, _course: Course) -> Result<Course> {
            panic!("linker must not write courses");
        }

        fn delete_course(&self, _id: CourseId) -> Result<Option<Course>> {
            panic!("linker must not delete courses");
        }
    }

    struct MockStudents {
        students: HashMap<StudentId, Student>,
    }

    impl MockStudents {
        fn empty() -> Self {
            Self {
                students: HashMap::new(),
            }
        }

        fn with(student: Student) -> Self {
            let mut students = HashMap::new();
            students.insert(student.id.unwrap(), student);
            Self { students }
        }
    }

    impl StudentRepository for MockStudents {
        fn find_student_by_id(&self, id: StudentId) -> Result<Option<Student>> {
            Ok(self.students.get(&id).cloned())
        }

        fn list_students(&self) -> Result<Vec<Student>> {
            Ok(self.students.values().cloned().collect())
        }

        fn list_students_by_course(&self, course_id: CourseId) -> Result<Vec<Student>> {
            Ok(self
                .students
                .values()
                .filter(|s| s.course_id == course_id)
                .cloned()
                .collect())
        }

        fn save_student(&self, _student: Student) -> Result<Student> {
            panic!("linker must not write students");
        }

        fn delete_student(&self, _id: StudentId) -> Result<Option<Student>> {
            panic!("linker must not delete students");
        }
    }

    fn john(course_id: i64) -> StudentInput {
        StudentInput {
            course_id: CourseId(course_id),
            student_id: "12345".to_string(),
            fname: "John".to_string(),
            lname: "Doe".to_string(),
            email: "8TbGZ@example.com".to_string(),
        }
    }

    fn existing_john() -> Student {
        Student::assemble(Some(StudentId(1)), john(1))
    }

    #[test]
    fn test_prepare_create_copies_fields_without_identity() {
        let courses = MockCourses::with(&[1]);
        let students = MockStudents::empty();
        let linker = RosterLinker::new(&courses, &students);

        let student = linker.prepare_create(john(1)).unwrap();

        assert_eq!(student.id, None);
        assert_eq!(student.course_id, CourseId(1));
        assert_eq!(student.student_id, "12345");
        assert_eq!(student.fname, "John");
        assert_eq!(student.lname, "Doe");
        assert_eq!(student.email, "8TbGZ@example.com");
    }

    #[test]
    fn test_prepare_create_rejects_missing_course() {
        let courses = MockCourses::with(&[]);
        let students = MockStudents::empty();
        let linker = RosterLinker::new(&courses, &students);

        let err = linker.prepare_create(john(1)).unwrap_err();

        assert!(matches!(
            err,
            RosterError::NotFound {
                entity: EntityKind::Course,
                id: 1
            }
        ));
    }

    #[test]
    fn test_prepare_update_missing_student_skips_course_lookup() {
        let courses = MockCourses::with(&[1]);
        let students = MockStudents::empty();
        let linker = RosterLinker::new(&courses, &students);

        let err = linker.prepare_update(StudentId(67), john(1)).unwrap_err();

        assert_eq!(err.to_string(), "Student with id 67 not found");
        assert_eq!(courses.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_prepare_update_reports_student_before_course() {
        let courses = MockCourses::with(&[]);
        let students = MockStudents::empty();
        let linker = RosterLinker::new(&courses, &students);

        let err = linker.prepare_update(StudentId(67), john(9)).unwrap_err();

        assert!(matches!(
            err,
            RosterError::NotFound {
                entity: EntityKind::Student,
                id: 67
            }
        ));
    }

    #[test]
    fn test_prepare_update_rejects_missing_course() {
        let courses = MockCourses::with(&[1]);
        let students = MockStudents::with(existing_john());
        let linker = RosterLinker::new(&courses, &students);

        let err = linker.prepare_update(StudentId(1), john(2)).unwrap_err();

        assert_eq!(err.to_string(), "Course with id 2 not found");
        assert_eq!(
            students.find_student_by_id(StudentId(1)).unwrap(),
            Some(existing_john())
        );
    }

    #[test]
    fn test_prepare_update_replaces_every_field() {
        let courses = MockCourses::with(&[1, 2]);
        let students = MockStudents::with(existing_john());
        let linker = RosterLinker::new(&courses, &students);

        let incoming = StudentInput {
            course_id: CourseId(2),
            student_id: "67890".to_string(),
            fname: "Bob".to_string(),
            lname: "Builder".to_string(),
            email: "hehe@example.com".to_string(),
        };
        let updated = linker.prepare_update(StudentId(1), incoming).unwrap();

        assert_eq!(updated.id, Some(StudentId(1)));
        assert_eq!(updated.course_id, CourseId(2));
        assert_eq!(updated.student_id, "67890");
        assert_eq!(updated.fname, "Bob");
        assert_eq!(updated.lname, "Builder");
        assert_eq!(updated.email, "hehe@example.com");
    }

    #[test]
    fn test_prepare_update_with_empty_fields_clears_them() {
        let courses = MockCourses::with(&[1]);
        let students = MockStudents::with(existing_john());
        let linker = RosterLinker::new(&courses, &students);

        let incoming = StudentInput {
            email: String::new(),
            ..john(1)
        };
        let updated = linker.prepare_update(StudentId(1), incoming).unwrap();

        assert_eq!(updated.email, "");
    }
}
