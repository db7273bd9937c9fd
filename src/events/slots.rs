//! Event time slots
//!
//! Slots are stored as loosely-typed JSON written by two generations of the admin tooling,
//! so each entry is read field by field.

use serde_json::Value;

/// A collection slot offered on an event day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    /// Slot start, as configured (e.g. `"12:00"`)
    pub time: String,

    /// Order cap for the slot; `None` means uncapped
    pub max_orders: Option<u32>,
}

/// Normalize a stored `time_slots` value.
///
/// Anything but an array yields no slots. Entries without a string `time` are skipped. The cap
/// is read from `max_orders`, then `maxOrders`; zero, negative or non-numeric caps are treated
/// as missing.
pub fn normalize_time_slots(value: &Value) -> Vec<TimeSlot> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    entries.iter().filter_map(normalize_slot).collect()
}

fn normalize_slot(entry: &Value) -> Option<TimeSlot> {
    let time = entry.get("time")?.as_str()?.to_string();

    let max_orders = read_cap(entry, "max_orders").or_else(|| read_cap(entry, "maxOrders"));

    Some(TimeSlot { time, max_orders })
}

fn read_cap(entry: &Value, key: &str) -> Option<u32> {
    entry
        .get(key)
        .and_then(Value::as_u64)
        .filter(|cap| *cap > 0)
        .map(|cap| u32::try_from(cap).unwrap_or(u32::MAX))
}
