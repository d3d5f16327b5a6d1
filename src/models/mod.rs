pub mod sems_envelope;
pub mod monitor_detail;
pub mod station_day;
pub mod readings;
