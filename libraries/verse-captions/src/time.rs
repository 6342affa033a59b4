//! Timestamp formatting

/// Format seconds as `m:ss`
///
/// Minutes are not wrapped into hours. Negative or non-finite input renders
/// as `0:00`.
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(9.99), "0:09");
        assert_eq!(format_timestamp(65.0), "1:05");
        assert_eq!(format_timestamp(3725.4), "62:05");
    }

    #[test]
    fn invalid_input() {
        assert_eq!(format_timestamp(f64::NAN), "0:00");
        assert_eq!(format_timestamp(-3.0), "0:00");
        assert_eq!(format_timestamp(f64::INFINITY), "0:00");
    }
}
