pub mod handlers;
pub mod quiz;
pub mod repo;
pub mod validation;
