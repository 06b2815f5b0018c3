pub mod course;
pub mod cv;
pub mod job;
pub mod user;
