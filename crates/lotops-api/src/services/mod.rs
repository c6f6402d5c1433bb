pub mod import;
pub mod schedule;

pub use import::ImportService;
pub use schedule::ScheduleService;
