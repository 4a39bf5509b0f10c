/// Number of decimal places in one XMR (1 XMR = 10^12 atomic units).
pub const MONERO_DECIMALS: u32 = 12;

/// Render atomic units as a decimal XMR string, e.g. `1500000000000` as `1.500000000000`.
pub fn format_xmr_amount(amount: u64) -> String {
	let unit = 10u64.pow(MONERO_DECIMALS);
	format!(
		"{}.{:0width$}",
		amount / unit,
		amount % unit,
		width = MONERO_DECIMALS as usize
	)
}

/// Parse a decimal XMR string into atomic units.
///
/// Accepts at most twelve fractional digits. Returns `None` on malformed input or overflow.
pub fn parse_xmr_amount(value: &str) -> Option<u64> {
	let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
	if whole.is_empty() && fraction.is_empty() {
		return None;
	}
	if fraction.len() > MONERO_DECIMALS as usize
		|| !whole.chars().all(|c| c.is_ascii_digit())
		|| !fraction.chars().all(|c| c.is_ascii_digit())
	{
		return None;
	}

	let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
	let padded = format!("{:0<width$}", fraction, width = MONERO_DECIMALS as usize);
	let fraction: u64 = padded.parse().ok()?;

	whole
		.checked_mul(10u64.pow(MONERO_DECIMALS))?
		.checked_add(fraction)
}
