pub mod auth;
pub mod items;
pub mod progress;
pub mod study;
pub mod subjects;
pub mod users;
