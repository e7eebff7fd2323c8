use crate::domain::model::{Course, CourseId, Student, StudentId};
use crate::utils::error::Result;

/// Course side of the storage collaborator.
pub trait CourseRepository: Send + Sync {
    fn find_course_by_id(&self, id: CourseId) -> Result<Option<Course>>;
    fn list_courses(&self) -> Result<Vec<Course>>;
    /// Inserts when `course.id` is `None`, replaces otherwise.
    fn save_course(&self, course: Course) -> Result<Course>;
    fn delete_course(&self, id: CourseId) -> Result<Option<Course>>;
}

/// Student side of the storage collaborator. Implementations are not
/// expected to check `course_id`; that is the roster linker's job.
pub trait StudentRepository: Send + Sync {
    fn find_student_by_id(&self, id: StudentId) -> Result<Option<Student>>;
    fn list_students(&self) -> Result<Vec<Student>>;
    fn list_students_by_course(&self, course_id: CourseId) -> Result<Vec<Student>>;
    /// Inserts when `student.id` is `None`, replaces otherwise.
    fn save_student(&self, student: Student) -> Result<Student>;
    fn delete_student(&self, id: StudentId) -> Result<Option<Student>>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn store_file(&self) -> &str;
    fn export_dir(&self) -> &str;
}
