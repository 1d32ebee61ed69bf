pub mod announcements;
pub mod attendance;
pub mod dashboard;
pub mod employees;
pub mod leave;
pub mod policies;
pub mod roster;
pub mod session;
pub mod tasks;
pub mod training;
