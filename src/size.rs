//! Human-readable byte sizes

use crate::error::{Error, Result};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Parse a size string like "50k", "1.5m", "100KB" or "512" into bytes.
/// Suffixes: B, K/KB (1024), M/MB (1024^2), G/GB (1024^3), case-insensitive.
/// Without suffix, interprets as bytes.
pub fn parse_size(input: &str) -> Result<u64> {
    let s = input.trim().to_uppercase();
    let invalid = |reason: String| Error::InvalidSize {
        input: input.to_string(),
        reason,
    };

    if s.is_empty() {
        return Err(invalid("empty size".to_string()));
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, GB)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, GB)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, MB)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, MB)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, KB)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, KB)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1)
    } else {
        (s.as_str(), 1)
    };

    let num_str = num_str.trim();
    if let Ok(whole) = num_str.parse::<u64>() {
        return whole
            .checked_mul(multiplier)
            .ok_or_else(|| invalid("size is too large".to_string()));
    }

    let value: f64 = num_str
        .parse()
        .map_err(|_| invalid(format!("invalid number: {}", num_str)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!("invalid number: {}", num_str)));
    }
    let bytes = value * multiplier as f64;
    if bytes > u64::MAX as f64 {
        return Err(invalid("size is too large".to_string()));
    }
    Ok(bytes as u64)
}

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("512").unwrap(), 512);
        assert_eq!(parse_size("512b").unwrap(), 512);
        assert_eq!(parse_size("50k").unwrap(), 50 * 1024);
        assert_eq!(parse_size("50KB").unwrap(), 50 * 1024);
        assert_eq!(parse_size("1m").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("2G").unwrap(), 2 * 1024 * 1024 * 1024);
        assert_eq!(parse_size(" 100k ").unwrap(), 100 * 1024);
    }

    #[test]
    fn test_parse_size_decimals() {
        assert_eq!(parse_size("1.5m").unwrap(), 1024 * 1024 + 512 * 1024);
        assert_eq!(parse_size("0.5k").unwrap(), 512);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(parse_size("").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("12q").is_err());
        assert!(parse_size("-5k").is_err());
        assert!(parse_size("k").is_err());

        let err = parse_size("lots").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn test_parse_size_overflow() {
        assert!(parse_size("99999999999999999999g").is_err());
        assert!(parse_size("18446744073709551615g").is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(100 * 1024), "100.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.00 GB");
    }
}
