//! Clients for the `content/*` endpoints.

pub mod courses;

pub use courses::{CourseAttributes, Courses, IntegerParam, NewCourse};
