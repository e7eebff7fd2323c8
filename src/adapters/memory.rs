use crate::core::{CourseRepository, StudentRepository};
use crate::domain::model::{Course, CourseId, EntityKind, Student, StudentId};
use crate::utils::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Serialized form of an [`InMemoryRoster`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshot {
    pub next_course_id: i64,
    pub next_student_id: i64,
    pub courses: Vec<Course>,
    pub students: Vec<Student>,
}

#[derive(Debug, Default)]
struct RosterState {
    next_course_id: i64,
    next_student_id: i64,
    courses: BTreeMap<CourseId, Course>,
    students: BTreeMap<StudentId, Student>,
}

/// Storage collaborator kept in memory. Ids start at 1 per entity type and
/// are never reused. It does not check `Student::course_id`.
#[derive(Debug, Default)]
pub struct InMemoryRoster {
    state: RwLock<RosterState>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a roster from its serialized form.
    ///
    /// Fails on a record without an id or on two records sharing one, so a
    /// damaged file is never loaded and then saved back with rows missing.
    pub fn from_snapshot(snapshot: RosterSnapshot) -> Result<Self> {
        let courses = index_by_id(EntityKind::Course, snapshot.courses, |c| c.id)?;
        let students = index_by_id(EntityKind::Student, snapshot.students, |s| s.id)?;

        // Never hand out an id that is already taken, even if the counters
        // in the file are stale.
        let max_course = courses.keys().next_back().map_or(0, |id| id.0);
        let max_student = students.keys().next_back().map_or(0, |id| id.0);

        Ok(Self {
            state: RwLock::new(RosterState {
                next_course_id: snapshot.next_course_id.max(max_course),
                next_student_id: snapshot.next_student_id.max(max_student),
                courses,
                students,
            }),
        })
    }

    pub fn snapshot(&self) -> Result<RosterSnapshot> {
        let state = self.read()?;
        Ok(RosterSnapshot {
            next_course_id: state.next_course_id,
            next_student_id: state.next_student_id,
            courses: state.courses.values().cloned().collect(),
            students: state.students.values().cloned().collect(),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RosterState>> {
        self.state.read().map_err(|_| RosterError::StoreError {
            message: "roster lock poisoned".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RosterState>> {
        self.state.write().map_err(|_| RosterError::StoreError {
            message: "roster lock poisoned".to_string(),
        })
    }
}

fn index_by_id<K, T>(
    entity: EntityKind,
    records: Vec<T>,
    id_of: impl Fn(&T) -> Option<K>,
) -> Result<BTreeMap<K, T>>
where
    K: Ord + Copy + Into<i64>,
{
    let mut indexed = BTreeMap::new();
    for (position, record) in records.into_iter().enumerate() {
        let id = id_of(&record).ok_or_else(|| RosterError::StoreError {
            message: format!("{} at position {} in snapshot has no id", entity, position),
        })?;
        if indexed.insert(id, record).is_some() {
            return Err(RosterError::StoreError {
                message: format!("duplicate {} id {} in snapshot", entity, id.into()),
            });
        }
    }
    Ok(indexed)
}

/// Advances an id counter, failing instead of wrapping at `i64::MAX`.
fn allocate_id(counter: &mut i64, entity: EntityKind) -> Result<i64> {
    *counter = counter.checked_add(1).ok_or_else(|| RosterError::StoreError {
        message: format!("{} id space exhausted", entity),
    })?;
    Ok(*counter)
}

impl CourseRepository for InMemoryRoster {
    fn find_course_by_id(&self, id: CourseId) -> Result<Option<Course>> {
        Ok(self.read()?.courses.get(&id).cloned())
    }

    fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(self.read()?.courses.values().cloned().collect())
    }

    fn save_course(&self, mut course: Course) -> Result<Course> {
        let mut state = self.write()?;
        let id = match course.id {
            Some(id) => id,
            None => CourseId(allocate_id(&mut state.next_course_id, EntityKind::Course)?),
        };
        course.id = Some(id);
        state.courses.insert(id, course.clone());
        Ok(course)
    }

    fn delete_course(&self, id: CourseId) -> Result<Option<Course>> {
        Ok(self.write()?.courses.remove(&id))
    }
}

impl StudentRepository for InMemoryRoster {
    fn find_student_by_id(&self, id: StudentId) -> Result<Option<Student>> {
        Ok(self.read()?.students.get(&id).cloned())
    }

    fn list_students(&self) -> Result<Vec<Student>> {
        Ok(self.read()?.students.values().cloned().collect())
    }

    fn list_students_by_course(&self, course_id: CourseId) -> Result<Vec<Student>> {
        Ok(self
            .read()?
            .students
            .values()
            .filter(|s| s.course_id == course_id)
            .cloned()
            .collect())
    }

    fn save_student(&self, mut student: Student) -> Result<Student> {
        let mut state = self.write()?;
        let id = match student.id {
            Some(id) => id,
            None => StudentId(allocate_id(&mut state.next_student_id, EntityKind::Student)?),
        };
        student.id = Some(id);
        state.students.insert(id, student.clone());
        Ok(student)
    }

    fn delete_student(&self, id: StudentId) -> Result<Option<Student>> {
        Ok(self.write()?.students.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(name: &str) -> Course {
        Course {
            id: None,
            name: name.to_string(),
            term: "F23".to_string(),
        }
    }

    #[test]
    fn test_save_assigns_increasing_ids() {
        let roster = InMemoryRoster::new();

        let first = roster.save_course(course("CS16")).unwrap();
        let second = roster.save_course(course("CS24")).unwrap();

        assert_eq!(first.id, Some(CourseId(1)));
        assert_eq!(second.id, Some(CourseId(2)));
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let roster = InMemoryRoster::new();
        roster.save_course(course("CS16")).unwrap();
        roster.delete_course(CourseId(1)).unwrap();

        let next = roster.save_course(course("CS24")).unwrap();

        assert_eq!(next.id, Some(CourseId(2)));
    }

    #[test]
    fn test_store_accepts_student_for_unknown_course() {
        let roster = InMemoryRoster::new();
        let student = Student {
            id: None,
            course_id: CourseId(99),
            student_id: "12345".to_string(),
            fname: "John".to_string(),
            lname: "Doe".to_string(),
            email: "8TbGZ@example.com".to_string(),
        };

        let saved = roster.save_student(student).unwrap();

        assert_eq!(saved.id, Some(StudentId(1)));
        assert_eq!(roster.list_students_by_course(CourseId(99)).unwrap().len(), 1);
    }

    #[test]
    fn test_snapshot_restores_counters_past_existing_ids() {
        let snapshot = RosterSnapshot {
            next_course_id: 0,
            next_student_id: 0,
            courses: vec![Course {
                id: Some(CourseId(7)),
                name: "CS16".to_string(),
                term: "F23".to_string(),
            }],
            students: vec![],
        };

        let roster = InMemoryRoster::from_snapshot(snapshot).unwrap();
        let saved = roster.save_course(course("CS24")).unwrap();

        assert_eq!(saved.id, Some(CourseId(8)));
        assert_eq!(roster.snapshot().unwrap().courses.len(), 2);
    }

    #[test]
    fn test_exhausted_id_counter_is_an_error() {
        let snapshot = RosterSnapshot {
            next_course_id: i64::MAX,
            ..RosterSnapshot::default()
        };
        let roster = InMemoryRoster::from_snapshot(snapshot).unwrap();

        let err = roster.save_course(course("CS16")).unwrap_err();

        assert!(matches!(err, RosterError::StoreError { .. }));
        assert!(roster.list_courses().unwrap().is_empty());
    }

    #[test]
    fn test_parallel_saves_get_distinct_ids() {
        let roster = InMemoryRoster::new();

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let roster = &roster;
                scope.spawn(move || {
                    for n in 0..25 {
                        roster
                            .save_student(Student {
                                id: None,
                                course_id: CourseId(1),
                                student_id: format!("{}-{}", worker, n),
                                fname: "John".to_string(),
                                lname: "Doe".to_string(),
                                email: "8TbGZ@example.com".to_string(),
                            })
                            .unwrap();
                    }
                });
            }
        });

        let ids: Vec<StudentId> = roster
            .list_students()
            .unwrap()
            .into_iter()
            .filter_map(|s| s.id)
            .collect();
        assert_eq!(ids.len(), 200);
        assert_eq!(ids.first(), Some(&StudentId(1)));
        assert_eq!(ids.last(), Some(&StudentId(200)));
    }
}
