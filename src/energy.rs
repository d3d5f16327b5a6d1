use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::Serialize;

/// Instantaneous power reading tagged with time of day
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerSample {
    pub time: NaiveTime,
    pub power_w: f64,
}

impl PowerSample {
    fn minute_of_day(&self) -> i64 {
        (self.time.hour() * 60 + self.time.minute()) as i64
    }
}

/// Calibrated point on the accumulated energy curve
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct EnergyEntry {
    pub date_time: NaiveDateTime,
    pub pgrid_w: f64,
    /// Energy produced since midnight, rounded to Wh
    pub eday_kwh: f64,
}

/// Distributes the day total over the power curve and returns the accumulated energy
/// for every sample that adds energy.
///
/// The power curve integrated over the day is scaled so that it sums up to the day
/// total reported by the inverter. Energy before the first sample is attributed to the
/// first sample, i.e. the minutes since midnight count as its interval. Samples giving
/// a zero or negative increase (no power, sensor noise) are left out of the result
/// altogether.
///
/// # Arguments
///
/// * 'eday_kwh' - the authoritative energy total for the day
/// * 'day_start' - midnight of the day the samples belong to
/// * 'samples' - the day's power samples in time order
pub fn reconstruct_day(eday_kwh: f64, day_start: NaiveDateTime, samples: &[PowerSample]) -> Vec<EnergyEntry> {
    // First pass, integrate the raw curve (W * minutes) to find the scale factor
    let mut intervals: Vec<i64> = Vec::with_capacity(samples.len());
    let mut previous_minute: i64 = 0;
    let mut raw_energy: f64 = 0.0;

    for sample in samples {
        let minute = sample.minute_of_day();
        let minutes = minute - previous_minute;
        raw_energy += sample.power_w * minutes as f64;
        intervals.push(minutes);
        previous_minute = minute;
    }

    let factor = if raw_energy > 0.0 { eday_kwh / raw_energy } else { 1.0 };

    // Second pass, accumulate the scaled increases
    let mut entries: Vec<EnergyEntry> = Vec::new();
    let mut date_time = day_start;
    let mut accumulated: f64 = 0.0;

    for (sample, minutes) in samples.iter().zip(intervals) {
        date_time += TimeDelta::minutes(minutes);
        let increase = sample.power_w * minutes as f64 * factor;
        if increase > 0.0 {
            accumulated += increase;
            entries.push(EnergyEntry {
                date_time,
                pgrid_w: sample.power_w,
                eday_kwh: round_wh(accumulated),
            });
        }
    }

    entries
}

fn round_wh(kwh: f64) -> f64 {
    (kwh * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;
    use super::*;

    fn midnight() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn sample(hour: u32, minute: u32, power_w: f64) -> PowerSample {
        PowerSample { time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap(), power_w }
    }

    #[test]
    fn test_noon_scenario() {
        let samples = [sample(0, 0, 0.0), sample(12, 0, 1000.0), sample(12, 1, 1000.0)];

        let entries = reconstruct_day(10.0, midnight(), &samples);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date_time, midnight() + TimeDelta::hours(12));
        assert_eq!(entries[1].date_time, midnight() + TimeDelta::minutes(12 * 60 + 1));
        assert_eq!(entries[0].pgrid_w, 1000.0);
        assert_abs_diff_eq!(entries[0].eday_kwh, 9.986, epsilon = 1e-9);
        assert_abs_diff_eq!(entries[1].eday_kwh, 10.0, epsilon = 0.001);
    }

    #[test]
    fn test_ends_at_day_total() {
        let samples = (6 * 60..20 * 60)
            .step_by(5)
            .map(|m| {
                let x = (m - 6 * 60) as f64 / (14.0 * 60.0);
                sample(m / 60, m % 60, 4200.0 * (x * std::f64::consts::PI).sin())
            })
            .collect::<Vec<PowerSample>>();

        let entries = reconstruct_day(27.35, midnight(), &samples);

        let last = entries.last().unwrap();
        assert_abs_diff_eq!(last.eday_kwh, 27.35, epsilon = 0.001);
        assert!(entries.windows(2).all(|w| w[1].eday_kwh >= w[0].eday_kwh));
        assert!(entries.windows(2).all(|w| w[1].date_time > w[0].date_time));
    }

    #[test]
    fn test_all_zero_power() {
        let samples = [sample(8, 0, 0.0), sample(8, 5, 0.0), sample(8, 10, 0.0)];
        assert!(reconstruct_day(3.2, midnight(), &samples).is_empty());
    }

    #[test]
    fn test_no_samples() {
        assert!(reconstruct_day(3.2, midnight(), &[]).is_empty());
    }

    #[test]
    fn test_first_sample_counts_from_midnight() {
        let entries = reconstruct_day(2.0, midnight(), &[sample(8, 0, 100.0)]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date_time, midnight() + TimeDelta::hours(8));
        assert_abs_diff_eq!(entries[0].eday_kwh, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_power_is_dropped() {
        let samples = [sample(6, 0, 500.0), sample(6, 5, -20.0), sample(6, 10, 500.0)];

        let entries = reconstruct_day(1.0, midnight(), &samples);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date_time, midnight() + TimeDelta::hours(6));
        assert_eq!(entries[1].date_time, midnight() + TimeDelta::minutes(6 * 60 + 10));
        // The dropped sample's negative share is missing, so the end lands slightly above the total
        assert_abs_diff_eq!(entries[1].eday_kwh, 1.001, epsilon = 1e-9);
    }
}
