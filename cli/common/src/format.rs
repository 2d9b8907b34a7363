//! Formatting utilities for CLI output.

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Format bytes as human-readable string.
///
/// # Examples
///
/// ```
/// use sf_cli_common::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 bytes");
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Format a signed byte delta in MB with two decimals.
///
/// ```
/// use sf_cli_common::format_megabytes;
///
/// assert_eq!(format_megabytes(3 * 1024 * 1024 / 2), "1.50 MB");
/// assert_eq!(format_megabytes(-1_048_576), "-1.00 MB");
/// ```
pub fn format_megabytes(bytes: i64) -> String {
    format!("{:.2} MB", bytes as f64 / MB as f64)
}

/// Format a large number with commas for readability.
///
/// ```
/// use sf_cli_common::format_number;
///
/// assert_eq!(format_number(1234567), "1,234,567");
/// ```
pub fn format_number(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Format a signed total with commas, keeping the sign in front.
///
/// ```
/// use sf_cli_common::format_signed;
///
/// assert_eq!(format_signed(-1234), "-1,234");
/// ```
pub fn format_signed(n: i128) -> String {
    let grouped = group_digits(&n.unsigned_abs().to_string());
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn group_digits(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, c) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
