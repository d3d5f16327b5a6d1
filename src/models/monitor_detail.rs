use serde::{Deserialize, Deserializer};
use serde::de::Error;
use serde_json::Value;

#[derive(Deserialize)]
pub struct MonitorDetail {
    pub info: StationInfo,
    pub inverter: Vec<InverterDetail>,
}

#[derive(Deserialize, Default)]
pub struct StationInfo {
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub longitude: Option<f64>,
}

#[derive(Deserialize)]
pub struct InverterDetail {
    pub status: i64,
    #[serde(deserialize_with = "deserialize_number")]
    pub out_pac: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub eday: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub etotal: f64,
    pub output_voltage: Value,
}

/// SEMS is not consistent in whether numbers are sent as json numbers or as strings
pub fn deserialize_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where D: Deserializer<'de> {

    let v = Value::deserialize(deserializer)?;
    let x = v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| D::Error::custom(format!("not a number: {}", v)))?;

    Ok(x)
}

/// Like deserialize_number but null, empty strings and garbage all become None
fn deserialize_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where D: Deserializer<'de> {

    let v = Value::deserialize(deserializer)?;

    Ok(v.as_f64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok())))
}
