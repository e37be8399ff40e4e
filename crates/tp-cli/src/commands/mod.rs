//! CLI subcommand implementations.

pub mod estimate;
pub mod overlap;
pub mod resolve;
pub mod slot;

/// Formats fractional hours with two decimals, e.g. `2.50h`.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}h")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(2.5), "2.50h");
        assert_eq!(format_hours(15.0 / 7.0), "2.14h");
        assert_eq!(format_hours(0.0), "0.00h");
    }
}
