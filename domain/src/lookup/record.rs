//! Flight records returned by the record store

use serde::{Deserialize, Serialize};

/// A single flight record (read-only copy held for one run).
///
/// Also accepts the long field names used by flight data exports
/// (`flight_number`, `departure_time`, `arrival_time`, `available_seats`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Flight number, e.g. `FL101`
    #[serde(alias = "flight_number")]
    pub id: String,
    pub origin: String,
    pub destination: String,
    /// Departure timestamp (RFC 3339)
    #[serde(alias = "departure_time")]
    pub departure: String,
    /// Arrival timestamp (RFC 3339)
    #[serde(alias = "arrival_time")]
    pub arrival: String,
    pub price: f64,
    /// Available seats
    #[serde(alias = "available_seats", default)]
    pub capacity: u32,
}

impl FlightRecord {
    pub fn new(
        id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure: impl Into<String>,
        arrival: impl Into<String>,
        price: f64,
        capacity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            origin: origin.into(),
            destination: destination.into(),
            departure: departure.into(),
            arrival: arrival.into(),
            price,
            capacity,
        }
    }

    /// One-line summary used inside prompts.
    ///
    /// Field order is fixed: id, origin, destination, departure, arrival, price.
    pub fn summary_line(&self) -> String {
        format!(
            "Flight {}: {} -> {}, departure {}, arrival {}, price ${:.2}",
            self.id, self.origin, self.destination, self.departure, self.arrival, self.price
        )
    }
}

/// Render records as a newline-terminated block, one line per record.
pub fn summarize_records(records: &[FlightRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.summary_line());
        out.push('\n');
    }
    out
}
