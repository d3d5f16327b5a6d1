use std::fmt;
use std::fmt::Formatter;
use serde::Serialize;
use crate::energy::EnergyEntry;

/// Inverter status as reported by SEMS
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum InverterStatus {
    Offline,
    Normal,
    Unknown(i64),
}

impl From<i64> for InverterStatus {
    fn from(code: i64) -> Self {
        match code {
            -1 => InverterStatus::Offline,
            1 => InverterStatus::Normal,
            c => InverterStatus::Unknown(c),
        }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for InverterStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            InverterStatus::Offline => write!(f, "Offline"),
            InverterStatus::Normal => write!(f, "Normal"),
            InverterStatus::Unknown(c) => write!(f, "Unknown({})", c),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CurrentReadings {
    pub status: InverterStatus,
    pub pgrid_w: f64,
    pub eday_kwh: f64,
    pub etotal_kwh: f64,
    pub grid_voltage: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for CurrentReadings {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}, {} W now, {} kWh today", self.status, self.pgrid_w, self.eday_kwh)
    }
}

#[derive(Serialize, Default, Debug)]
pub struct DayReadings {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub entries: Vec<EnergyEntry>,
}
