//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use meetroom_http::ReservationStatus;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a hint on stderr.
pub fn hint(msg: &str) {
    eprintln!("  {}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Colored label for a reservation status.
pub fn status(status: ReservationStatus) -> String {
    let label = status.as_str();
    match status {
        ReservationStatus::Pending => label.yellow().to_string(),
        ReservationStatus::Approved => label.green().to_string(),
        ReservationStatus::Rejected => label.red().to_string(),
        ReservationStatus::Canceled | ReservationStatus::Unknown => label.dimmed().to_string(),
        ReservationStatus::Used => label.blue().to_string(),
    }
}
