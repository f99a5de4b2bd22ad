use alloy::primitives::{Address, U256};
use chrono::DateTime;

const ETH_DECIMALS: u8 = 18;

/// Truncate an address to "0xabcd...ef12" format
pub fn truncate_address(addr: &Address) -> String {
    let s = format!("{addr}");
    if s.len() > 14 {
        format!("{}...{}", &s[..8], &s[s.len() - 4..])
    } else {
        s
    }
}

/// Format a U256 wei value as ETH with reasonable precision
pub fn format_eth(wei: U256) -> String {
    let eth_str = format_u256_as_decimal(wei, ETH_DECIMALS);
    format!("{eth_str} ETH")
}

/// Format a U256 value as decimal with given decimals
pub fn format_u256_as_decimal(value: U256, decimals: u8) -> String {
    if value.is_zero() {
        return "0.0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / divisor;
    let remainder = value % divisor;

    if remainder.is_zero() {
        return format!("{whole}.0");
    }

    let remainder_str = format!("{remainder}");
    let padded = format!("{:0>width$}", remainder_str, width = decimals as usize);
    let trimmed = padded.trim_end_matches('0');

    // Limit to 6 decimal places
    let decimals_shown = trimmed.len().min(6);
    format!("{whole}.{}", &trimmed[..decimals_shown])
}

/// Parse a decimal ETH amount ("1", "0.5", "1.25") into wei.
///
/// Rejects anything that is not a plain non-negative decimal with at most
/// 18 fractional digits.
pub fn parse_ether(input: &str) -> Result<U256, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("empty amount".to_string());
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(format!("invalid amount `{s}`"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("invalid amount `{s}`"));
    }
    if frac.len() > ETH_DECIMALS as usize {
        return Err(format!(
            "amount `{s}` has more than {ETH_DECIMALS} decimal places"
        ));
    }

    let scale = U256::from(10u64).pow(U256::from(ETH_DECIMALS));
    let whole_wei = if whole.is_empty() {
        U256::ZERO
    } else {
        let w = U256::from_str_radix(whole, 10).map_err(|e| format!("invalid amount `{s}`: {e}"))?;
        w.checked_mul(scale)
            .ok_or_else(|| format!("amount `{s}` is too large"))?
    };

    let frac_wei = if frac.is_empty() {
        U256::ZERO
    } else {
        let f = U256::from_str_radix(frac, 10).map_err(|e| format!("invalid amount `{s}`: {e}"))?;
        f * U256::from(10u64).pow(U256::from(ETH_DECIMALS as usize - frac.len()))
    };

    whole_wei
        .checked_add(frac_wei)
        .ok_or_else(|| format!("amount `{s}` is too large"))
}

/// Format a number with comma separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a Unix timestamp as a datetime string
pub fn format_timestamp(timestamp: u64) -> String {
    DateTime::from_timestamp(timestamp as i64, 0)
        .map(|dt| dt.format("%b %d, %Y %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eth(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
    }

    #[test]
    fn test_parse_ether_whole() {
        assert_eq!(parse_ether("1").unwrap(), eth(1));
        assert_eq!(parse_ether("10").unwrap(), eth(10));
    }

    #[test]
    fn test_parse_ether_fractional() {
        assert_eq!(parse_ether("0.5").unwrap(), eth(1) / U256::from(2u64));
        assert_eq!(parse_ether("1.25").unwrap(), eth(5) / U256::from(4u64));
        assert_eq!(parse_ether(".5").unwrap(), eth(1) / U256::from(2u64));
    }

    #[test]
    fn test_parse_ether_zero() {
        assert_eq!(parse_ether("0").unwrap(), U256::ZERO);
        assert_eq!(parse_ether("0.0").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_ether_trims_whitespace() {
        assert_eq!(parse_ether("  2  ").unwrap(), eth(2));
    }

    #[test]
    fn test_parse_ether_rejects_garbage() {
        assert!(parse_ether("").is_err());
        assert!(parse_ether(".").is_err());
        assert!(parse_ether("abc").is_err());
        assert!(parse_ether("1.2.3").is_err());
        assert!(parse_ether("-1").is_err());
        assert!(parse_ether("1e18").is_err());
    }

    #[test]
    fn test_parse_ether_rejects_too_many_decimals() {
        // 19 fractional digits
        assert!(parse_ether("0.1234567890123456789").is_err());
        // exactly 18 is fine
        assert_eq!(
            parse_ether("0.000000000000000001").unwrap(),
            U256::from(1u64)
        );
    }

    #[test]
    fn test_parse_format_round_trip() {
        let wei = parse_ether("1.5").unwrap();
        assert_eq!(format_eth(wei), "1.5 ETH");
    }

    #[test]
    fn test_format_eth_zero() {
        assert_eq!(format_eth(U256::ZERO), "0.0 ETH");
    }

    #[test]
    fn test_truncate_address() {
        let addr = Address::from_slice(&[0xab; 20]);
        let s = truncate_address(&addr);
        assert!(s.starts_with("0x"));
        assert!(s.contains("..."));
        assert_eq!(s.len(), 15);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(3_000_000), "3,000,000");
    }

    #[test]
    fn test_format_timestamp() {
        let s = format_timestamp(1700000000);
        assert!(s.contains("2023"));
        assert!(s.ends_with("UTC"));
    }
}
