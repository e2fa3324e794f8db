//! Utility functions.

/// Parses a flash offset given in decimal or with a `0x`, `0o` or `0b` prefix.
///
/// Underscores are accepted as digit separators. A decimal literal with a
/// leading zero (e.g. `010`) is rejected since its base is ambiguous.
pub fn parse_offset(s: &str) -> Result<u64, String> {
    let trimmed = s.trim();
    let lower = trimmed.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else {
        (lower.as_str(), 10)
    };

    // Prefixed literals may separate the prefix from the digits: `0x_1000`.
    let digits = match radix {
        10 => digits,
        _ => digits.strip_prefix('_').unwrap_or(digits),
    };
    if digits.is_empty()
        || !digits.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return Err(format!("invalid offset '{s}'"));
    }
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if radix == 10 && digits.starts_with('0') && digits.chars().any(|c| c != '0') {
        return Err(format!("invalid offset '{s}': leading zeros are not permitted"));
    }

    u64::from_str_radix(&digits, radix).map_err(|e| format!("invalid offset '{s}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::parse_offset;

    #[test]
    fn parses_decimal_and_prefixed_bases() {
        assert_eq!(parse_offset("4096"), Ok(4096));
        assert_eq!(parse_offset("0x1000"), Ok(0x1000));
        assert_eq!(parse_offset("0X8000"), Ok(0x8000));
        assert_eq!(parse_offset("0o10"), Ok(8));
        assert_eq!(parse_offset("0b101"), Ok(5));
        assert_eq!(parse_offset("0x1_0000"), Ok(0x10000));
        assert_eq!(parse_offset("0x_8000"), Ok(0x8000));
        assert_eq!(parse_offset("0"), Ok(0));
        assert_eq!(parse_offset("000"), Ok(0));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "0x", "-1", "+1", "010", "0xZZ", "1__0", "_1", "1_", "0x1000 0"] {
            assert!(parse_offset(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
