use crate::dates;
use crate::models::{DEFAULT_SEVERITY, Entry, MAX_SEVERITY, MIN_SEVERITY};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

const ID_FIELDS: [&str; 2] = ["id", "_id"];

pub fn normalize_entry(raw: &Value) -> Option<Entry> {
    let record = raw.as_object()?;
    let raw_date = record.get("date").and_then(Value::as_str);

    let day = record
        .get("dateKey")
        .and_then(Value::as_str)
        .and_then(dates::parse_date_key)
        .or_else(|| raw_date.and_then(dates::date_from_instant))?;

    let is_sick = record.get("isSick")?.as_bool()?;
    let severity = is_sick.then(|| coerce_severity(record.get("severity")));

    let id = ID_FIELDS
        .iter()
        .find_map(|field| record.get(*field).and_then(identifier));

    Some(Entry {
        id,
        date_key: dates::date_key(day),
        date: raw_date
            .map(str::to_owned)
            .unwrap_or_else(|| dates::utc_midnight_iso(day)),
        is_sick,
        severity,
    })
}

/// Normalizes a whole response: malformed records are dropped, the last
/// record per day wins, and the result is ascending by date.
pub fn normalize_entries(raws: &[Value]) -> Vec<Entry> {
    let mut by_key = BTreeMap::new();
    let mut dropped = 0usize;

    for raw in raws {
        match normalize_entry(raw) {
            Some(entry) => {
                by_key.insert(entry.date_key.clone(), entry);
            }
            None => {
                dropped += 1;
                debug!(record = %raw, "dropping malformed entry");
            }
        }
    }

    if dropped > 0 {
        warn!(dropped, kept = by_key.len(), "ignored malformed entries from server");
    }

    by_key.into_values().collect()
}

fn coerce_severity(value: Option<&Value>) -> u8 {
    let numeric = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(Value::Bool(true)) => Some(1.0),
        _ => None,
    };

    match numeric {
        Some(level) if level.is_finite() && level >= f64::from(MIN_SEVERITY) => {
            level.round().min(f64::from(MAX_SEVERITY)) as u8
        }
        _ => DEFAULT_SEVERITY,
    }
}

fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
