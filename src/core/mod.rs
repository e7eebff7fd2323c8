pub mod admin;
pub mod export;
pub mod reports;
pub mod roster;

pub use crate::domain::model::{Course, CourseId, CourseInput, Student, StudentId, StudentInput};
pub use crate::domain::ports::{ConfigProvider, CourseRepository, Storage, StudentRepository};
pub use crate::utils::error::Result;
