/// Format a float as a whole-dollar amount with thousands separators: $25,000
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let grouped = group_thousands(val.abs().round() as u64);
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Bonus points with thousands separators, no currency sign: 5,000
pub fn points(val: f64) -> String {
    group_thousands(val.abs().round() as u64)
}

/// Percentage with one decimal place: 50.0%
pub fn percent(val: f64) -> String {
    // Round half away from zero; a bare {:.1} turns 6.25 into 6.2.
    let tenths = (val * 10.0).round() / 10.0;
    // Summing an empty f64 slice yields -0.0; zero never takes a sign
    let tenths = if tenths == 0.0 { 0.0 } else { tenths };
    format!("{tenths:.1}%")
}

/// Human-readable file size: 512 B, 1.5 KB, 3.2 MB
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

fn group_thousands(val: u64) -> String {
    let digits = val.to_string();
    let mut with_commas = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    with_commas.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(25000.0), "$25,000");
        assert_eq!(money(-500.00), "-$500");
        assert_eq!(money(0.0), "$0");
        assert_eq!(money(1000000.99), "$1,000,001");
        assert_eq!(money(42.10), "$42");
    }

    #[test]
    fn test_points_formatting() {
        assert_eq!(points(5000.0), "5,000");
        assert_eq!(points(0.0), "0");
        assert_eq!(points(12345678.0), "12,345,678");
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(percent(50.0), "50.0%");
        assert_eq!(percent(33.333), "33.3%");
        assert_eq!(percent(0.0), "0.0%");
    }

    #[test]
    fn test_percent_rounds_halves_up() {
        // 25000 of a 400000 goal
        assert_eq!(percent(6.25), "6.3%");
        // 1 sold of 16 tours
        assert_eq!(percent(100.0 / 16.0), "6.3%");
        assert_eq!(percent(99.95), "100.0%");
    }

    #[test]
    fn test_percent_hides_negative_zero() {
        let empty: [f64; 0] = [];
        let sum: f64 = empty.iter().sum();
        assert_eq!(percent(sum), "0.0%");
        assert_eq!(percent(-0.0), "0.0%");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
