//! Time formatting helpers.

/// Render a duration as its two most significant units, e.g. `"3h 20m"`.
pub fn format_duration(secs: u64) -> String {
    const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

    let Some(lead) = UNITS.iter().position(|(size, _)| secs >= *size) else {
        return "0s".to_string();
    };
    let (size, unit) = UNITS[lead];
    match UNITS.get(lead + 1) {
        Some(&(next_size, next_unit)) => {
            format!("{}{} {}{}", secs / size, unit, (secs % size) / next_size, next_unit)
        }
        None => format!("{}{}", secs, unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_two_leading_units() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(12_000), "3h 20m");
        assert_eq!(format_duration(86_400 + 7_200), "1d 2h");
    }
}
