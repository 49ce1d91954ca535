//! Prelude module for convenient imports.

pub use crate::chain::Chain;
pub use crate::error::FeeError;
pub use crate::fees::{FeeEncoding, format_fee, parse_fee_hex, pool_fee_percent};
pub use crate::format::{format_spot_price, format_time_ago, shorten_hex};
pub use crate::logo::{CdnLogoMap, DEFAULT_TOKEN_IMAGE, LogoSnapshot};
pub use crate::pool::{Pool, PoolId, WireformatPool};
pub use crate::protocol::{ProtocolInfo, protocol_color, protocol_info, readable_protocol_name};
pub use crate::snapshot::PoolSnapshot;
pub use crate::token::{NATIVE_SYMBOL, Token, TokenAddress};
