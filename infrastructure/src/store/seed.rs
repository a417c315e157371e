//! Built-in sample flights

use tandem_domain::FlightRecord;

/// `(id, origin, destination, departure, arrival, price, seats)`
const SAMPLE_FLIGHTS: [(&str, &str, &str, &str, &str, f64, u32); 20] = [
    ("FL101", "Madrid", "Paris", "2025-08-10T09:00:00Z", "2025-08-10T11:00:00Z", 120.0, 50),
    ("FL102", "Madrid", "Paris", "2025-08-10T15:00:00Z", "2025-08-10T17:00:00Z", 150.0, 30),
    ("FL103", "Madrid", "Paris", "2025-08-11T10:00:00Z", "2025-08-11T12:00:00Z", 110.0, 20),
    ("FL104", "Madrid", "Paris", "2025-08-11T18:00:00Z", "2025-08-11T20:00:00Z", 130.0, 40),
    ("FL105", "Madrid", "Barcelona", "2025-08-12T07:00:00Z", "2025-08-12T08:30:00Z", 90.0, 60),
    ("FL106", "Barcelona", "Madrid", "2025-08-12T19:00:00Z", "2025-08-12T20:30:00Z", 95.0, 55),
    ("FL107", "London", "New York", "2025-08-13T09:00:00Z", "2025-08-13T17:00:00Z", 550.0, 120),
    ("FL108", "New York", "London", "2025-08-14T10:00:00Z", "2025-08-14T18:00:00Z", 540.0, 110),
    ("FL109", "Rome", "Paris", "2025-08-15T11:00:00Z", "2025-08-15T12:30:00Z", 115.0, 65),
    ("FL110", "London", "Paris", "2025-08-16T09:00:00Z", "2025-08-16T11:30:00Z", 200.0, 100),
    ("FL111", "Paris", "London", "2025-08-16T14:00:00Z", "2025-08-16T16:30:00Z", 195.0, 100),
    ("FL112", "London", "Berlin", "2025-08-17T08:00:00Z", "2025-08-17T10:00:00Z", 160.0, 80),
    ("FL113", "Berlin", "London", "2025-08-17T18:00:00Z", "2025-08-17T20:00:00Z", 155.0, 85),
    ("FL114", "Barcelona", "Seville", "2025-08-18T07:30:00Z", "2025-08-18T08:45:00Z", 80.0, 70),
    ("FL115", "Seville", "Barcelona", "2025-08-18T19:30:00Z", "2025-08-18T20:45:00Z", 82.0, 70),
    ("FL116", "Madrid", "Valencia", "2025-08-19T06:00:00Z", "2025-08-19T07:00:00Z", 70.0, 90),
    ("FL117", "Valencia", "Madrid", "2025-08-19T18:00:00Z", "2025-08-19T19:00:00Z", 72.0, 88),
    ("FL118", "Tokyo", "Los Angeles", "2025-08-20T02:00:00Z", "2025-08-20T12:00:00Z", 900.0, 250),
    ("FL119", "Los Angeles", "Tokyo", "2025-08-21T03:00:00Z", "2025-08-21T13:00:00Z", 880.0, 245),
    ("FL120", "New York", "Tokyo", "2025-08-22T04:00:00Z", "2025-08-22T18:00:00Z", 950.0, 200),
];

/// The sample flight table used when no data file is configured.
pub fn sample_flights() -> Vec<FlightRecord> {
    SAMPLE_FLIGHTS
        .iter()
        .map(|&(id, origin, destination, departure, arrival, price, seats)| {
            FlightRecord::new(id, origin, destination, departure, arrival, price, seats)
        })
        .collect()
}
