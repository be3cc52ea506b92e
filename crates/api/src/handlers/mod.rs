pub mod audit;
pub mod backup;
pub mod bug_reports;
pub mod contributions;
pub mod cron;
pub mod media;
pub mod people;
pub mod profile;
pub mod quiz;
