use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::{info, warn};
use serde_json::Value;
use crate::energy::{reconstruct_day, PowerSample};
use crate::manager_sems::SemsClient;
use crate::manager_sems::errors::SemsError;
use crate::manager_sems::transport::Transport;
use crate::models::monitor_detail::{MonitorDetail, StationInfo};
use crate::models::readings::{CurrentReadings, DayReadings, InverterStatus};
use crate::models::station_day::{DayIncome, DayPacs};

const MONITOR_DETAIL_PATH: &str = "v1/PowerStation/GetMonitorDetailByPowerstationId";
const POWER_AND_INCOME_PATH: &str = "PowerStationMonitor/GetPowerStationPowerAndIncomeByDay";
const PAC_BY_DAY_PATH: &str = "PowerStationMonitor/GetPowerStationPacByDayForApp";

impl<T: Transport> SemsClient<T> {
    /// Downloads the most recent readings of the station's first inverter
    ///
    pub fn get_current_readings(&mut self) -> Result<CurrentReadings, SemsError> {
        let payload = [("powerStationId", self.system_id().to_string())];

        let data = self.call(MONITOR_DETAIL_PATH, &payload);
        let detail: MonitorDetail = serde_json::from_value(data)?;

        let inverter = detail.inverter.first()
            .ok_or(SemsError::from("no inverter in monitor detail"))?;

        let readings = CurrentReadings {
            status: InverterStatus::from(inverter.status),
            pgrid_w: inverter.out_pac,
            eday_kwh: inverter.eday,
            etotal_kwh: inverter.etotal,
            grid_voltage: parse_value(&inverter.output_voltage, "V"),
            latitude: detail.info.latitude,
            longitude: detail.info.longitude,
        };

        match readings.status {
            InverterStatus::Normal | InverterStatus::Offline => info!("{}", readings),
            InverterStatus::Unknown(_) => warn!("{}", readings),
        }

        Ok(readings)
    }

    /// Builds the accumulated energy curve for a day.
    ///
    /// Three calls are made: station details for the coordinates, the day's energy total and
    /// the day's power curve. If any of them comes back without the expected content, a
    /// warning is logged and whatever has been collected so far is returned.
    ///
    /// # Arguments
    ///
    /// * 'date' - the day to get readings for
    pub fn get_day_readings(&mut self, date: NaiveDate) -> DayReadings {
        let date_s = date.format("%Y-%m-%d").to_string();
        let system_id = self.system_id().to_string();

        let data = self.call(MONITOR_DETAIL_PATH, &[("powerStationId", system_id.clone())]);
        let info = match data.get("info").map(|i| serde_json::from_value::<StationInfo>(i.clone())) {
            Some(Ok(info)) => info,
            _ => {
                warn!("{} - Received bad data {}", date_s, data);
                return DayReadings::default();
            }
        };

        let mut result = DayReadings { latitude: info.latitude, longitude: info.longitude, entries: Vec::new() };

        let payload = [
            ("powerstation_id", system_id.clone()),
            ("count", "1".to_string()),
            ("date", date_s.clone()),
        ];
        let data = self.call(POWER_AND_INCOME_PATH, &payload);
        let eday_kwh = match serde_json::from_value::<Vec<DayIncome>>(data.clone()) {
            Ok(days) if !days.is_empty() => days[0].energy_kwh,
            _ => {
                warn!("{} - Received bad data {}", date_s, data);
                return result;
            }
        };

        let payload = [("id", system_id), ("date", date_s.clone())];
        let data = self.call(PAC_BY_DAY_PATH, &payload);
        let samples = match to_power_samples(&data) {
            Ok(samples) => samples,
            Err(e) => {
                warn!("{} - Received bad data {}: {}", date_s, data, e);
                return result;
            }
        };

        let day_start = NaiveDateTime::new(date, NaiveTime::MIN);
        result.entries = reconstruct_day(eday_kwh, day_start, &samples);

        result
    }
}

/// Transforms the pacs of a day into power samples
///
/// # Arguments
///
/// * 'data' - data part of the pac by day response
fn to_power_samples(data: &Value) -> Result<Vec<PowerSample>, SemsError> {
    let day: DayPacs = serde_json::from_value(data.clone())?;

    let mut samples: Vec<PowerSample> = Vec::with_capacity(day.pacs.len());
    for pac in day.pacs {
        let date_time = NaiveDateTime::parse_from_str(&pac.date, "%m/%d/%Y %H:%M:%S")
            .map_err(|e| SemsError::Document(format!("illegal date time format [{}]: {}", pac.date, e)))?;

        samples.push(PowerSample { time: date_time.time(), power_w: pac.pac });
    }

    Ok(samples)
}

/// Parses a value like "231.5V" into a float, a warning is logged and zero returned if
/// that fails
///
/// # Arguments
///
/// * 'value' - the value, either a string with unit or a plain number
/// * 'unit' - the unit suffix to strip
fn parse_value(value: &Value, unit: &str) -> f64 {
    if let Some(v) = value.as_f64() {
        return v;
    }

    let s = value.as_str().unwrap_or_default();
    match s.trim_end_matches(unit).trim().parse::<f64>() {
        Ok(v) => v,
        Err(e) => {
            warn!("could not parse [{}] as {}: {}", value, unit, e);
            0.0
        }
    }
}
