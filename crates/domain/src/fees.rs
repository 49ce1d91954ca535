//! Per-protocol fee decoding.
//!
//! Fee attributes arrive as hex integers whose scale depends on the protocol.
//! The scales below were inferred from live data and should be revalidated
//! when a protocol is added.

use crate::error::FeeError;
use crate::pool::Pool;
use crate::protocol::protocol_info;
use primitive_types::U256;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept in a fee percentage.
pub const FEE_DECIMAL_PLACES: u32 = 4;

/// Scale of a raw fee integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeEncoding {
    /// Basis points: 30 = 0.30%.
    BasisPoints,
    /// Hundredths of a basis point: 3000 = 0.30%.
    HundredthBips,
    /// Fraction scaled by 1e18: 1e16 = 1%.
    Wad,
}

impl FeeEncoding {
    /// Divisor turning the raw integer into a percentage.
    pub fn divisor(&self) -> Decimal {
        match self {
            FeeEncoding::BasisPoints => Decimal::from(100u64),
            FeeEncoding::HundredthBips => Decimal::from(10_000u64),
            FeeEncoding::Wad => Decimal::from(10_000_000_000_000_000u64),
        }
    }

    /// Converts a raw fee to a percentage rounded to [`FEE_DECIMAL_PLACES`].
    pub fn to_percent(&self, raw: Decimal) -> Decimal {
        (raw / self.divisor())
            .round_dp_with_strategy(FEE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
    }
}

/// Parses a hex integer with an optional `0x` prefix.
pub fn parse_fee_hex(value: &str) -> Result<Decimal, FeeError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.is_empty() {
        return Err(FeeError::InvalidHex(value.to_string()));
    }
    let raw =
        U256::from_str_radix(digits, 16).map_err(|_| FeeError::InvalidHex(value.to_string()))?;
    if raw.bits() > 128 {
        return Err(FeeError::OutOfRange(raw.to_string()));
    }
    Decimal::from_u128(raw.as_u128()).ok_or_else(|| FeeError::OutOfRange(raw.to_string()))
}

/// Decodes a pool's fee as a percentage.
pub fn decode_pool_fee(pool: &Pool) -> Result<Decimal, FeeError> {
    let info = protocol_info(&pool.protocol_system)
        .ok_or_else(|| FeeError::UnknownProtocol(pool.protocol_system.clone()))?;
    let attribute = pool
        .fee_attribute()
        .ok_or_else(|| FeeError::MissingAttribute(pool.id.clone()))?;
    let raw = parse_fee_hex(attribute)?;
    Ok(info.fee_encoding.to_percent(raw))
}

/// Fee percentage, or `None` when it cannot be decoded.
pub fn pool_fee_percent(pool: &Pool) -> Option<Decimal> {
    decode_pool_fee(pool).ok()
}

/// Renders a fee as `0.3000%`, or `N/A` when absent.
pub fn format_fee(fee: Option<Decimal>) -> String {
    match fee {
        Some(fee) => format!("{:.4}%", fee),
        None => "N/A".to_string(),
    }
}
