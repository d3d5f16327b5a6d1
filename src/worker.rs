use std::thread;
use std::time::Duration;
use chrono::{Local, NaiveDate, Timelike};
use log::{info, warn};
use crate::config::PollParameters;
use crate::manager_sems::SemsClient;
use crate::manager_sems::transport::Transport;
use crate::models::readings::DayReadings;

/// Polls the station forever.
///
/// Current readings are fetched every poll interval, and once a day, when the report
/// hour has been reached, the day's energy curve is rebuilt and summarized.
///
/// # Arguments
///
/// * 'poll' - poll interval and day report hour
/// * 'sems' - client for the station to poll
pub fn run<T: Transport>(poll: &PollParameters, sems: &mut SemsClient<T>) {
    let mut reported_day: Option<NaiveDate> = None;
    info!("Polling station {} at {} every {} seconds", sems.system_id(), sems.session().base_url(), poll.interval_secs);

    loop {
        let local_now = Local::now();

        if let Err(e) = sems.get_current_readings() {
            warn!("Current readings unavailable: {}", e);
        }

        let today = local_now.date_naive();
        if is_report_time(reported_day, today, local_now.hour(), poll.day_report_hour) {
            let readings = sems.get_day_readings(today);
            report_day(today, &readings);
            reported_day = Some(today);
        }

        thread::sleep(Duration::from_secs(poll.interval_secs));
    }
}

/// Returns true if the day hasn't been reported yet and the report hour has been reached
///
/// # Arguments
///
/// * 'reported_day' - the last day reported, if any
/// * 'today' - the current date
/// * 'hour' - the current hour
/// * 'report_hour' - the hour from which the day may be reported
fn is_report_time(reported_day: Option<NaiveDate>, today: NaiveDate, hour: u32, report_hour: u32) -> bool {
    reported_day != Some(today) && hour >= report_hour
}

/// Logs a summary of the day's readings
///
/// # Arguments
///
/// * 'date' - the day the readings belong to
/// * 'readings' - the readings to summarize
fn report_day(date: NaiveDate, readings: &DayReadings) {
    match readings.entries.last() {
        Some(last) => info!("{} - {} entries, {:.3} kWh produced, last at {}",
                            date, readings.entries.len(), last.eday_kwh, last.date_time.format("%H:%M")),
        None => warn!("{} - no energy entries", date),
    }
}
