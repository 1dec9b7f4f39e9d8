//! meetroom-http - HTTP transport and reservation API client.

mod client;
mod config;
pub mod endpoints;
pub mod models;
mod transport;

pub use client::ReservationClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use models::{AvailableRoom, Reservation, ReservationStatus, Room};
pub use transport::HttpTransport;
