//! Number formatting shared by check details and chart insights

/// Integer with `,` thousands separators, e.g. `12,000`
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Fixed decimals, or `N/A` when the value is not a finite number
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{:.*}", decimals, value)
    } else {
        "N/A".to_string()
    }
}

/// Share of `part` in `whole` as a percentage with one decimal
pub fn format_percent(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "N/A".to_string();
    }
    format!("{:.1}%", part as f64 / whole as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(12000), "12,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(2.0, 2), "2.00");
        assert_eq!(format_fixed(-0.8512, 3), "-0.851");
        assert_eq!(format_fixed(f64::NAN, 2), "N/A");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(1, 4), "25.0%");
        assert_eq!(format_percent(1, 0), "N/A");
    }
}
