use alloy::primitives::U256;

/// Fractional digits shown for scaled amounts.
const DISPLAY_DECIMALS: u8 = 8;

/// Scale `raw` down by `10^decimals` for display.
///
/// The result is exact, rounded half-up to 8 fractional digits, without trailing zeros or a
/// dangling `.`. A scale of 0 returns the raw integer.
///
/// ```
/// use alloy::primitives::U256;
/// use deltascope_inspect::format_amount;
///
/// assert_eq!(format_amount(U256::from(1_250_000u64), 6), "1.25");
/// assert_eq!(format_amount(U256::from(10u64).pow(U256::from(18u64)), 18), "1");
/// assert_eq!(format_amount(U256::from(1u64), 18), "0");
/// ```
pub fn format_amount(raw: U256, decimals: u8) -> String {
    if decimals == 0 {
        return raw.to_string();
    }

    let ten = U256::from(10u64);
    let precision = ten.pow(U256::from(DISPLAY_DECIMALS));

    let (integer, fraction) = if decimals <= DISPLAY_DECIMALS {
        let unit = ten.pow(U256::from(decimals));
        let (integer, remainder) = raw.div_rem(unit);
        (integer, remainder * ten.pow(U256::from(DISPLAY_DECIMALS - decimals)))
    } else {
        let shift = decimals - DISPLAY_DECIMALS;

        // 10^78 doesn't fit in a U256, and anything scaled down that far rounds to zero
        if shift > 77 {
            return "0".to_string();
        }

        let divisor = ten.pow(U256::from(shift));
        let (mut scaled, remainder) = raw.div_rem(divisor);
        if remainder >= divisor - remainder {
            scaled += U256::from(1u64);
        }
        scaled.div_rem(precision)
    };

    // fraction < 10^8
    let formatted = format!("{integer}.{:08}", fraction.to::<u64>());
    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// The fee paid for a transaction, `gas_used * effective_gas_price`. A missing price counts
/// as zero.
pub fn compute_fee(gas_used: u64, effective_gas_price: Option<u128>) -> U256 {
    U256::from(gas_used) * U256::from(effective_gas_price.unwrap_or_default())
}
