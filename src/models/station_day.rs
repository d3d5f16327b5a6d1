use serde::Deserialize;
use crate::models::monitor_detail::deserialize_number;

/// One day from the power and income listing
#[derive(Deserialize)]
pub struct DayIncome {
    /// Energy produced the given day in kWh
    #[serde(rename = "p", deserialize_with = "deserialize_number")]
    pub energy_kwh: f64,
}

#[derive(Deserialize)]
pub struct DayPacs {
    pub pacs: Vec<Pac>,
}

/// Power reading, the date is formatted as %m/%d/%Y %H:%M:%S
#[derive(Deserialize)]
pub struct Pac {
    pub date: String,
    #[serde(deserialize_with = "deserialize_number")]
    pub pac: f64,
}
