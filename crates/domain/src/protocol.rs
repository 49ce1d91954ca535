//! Static metadata for the protocol systems the feed reports.

use crate::fees::FeeEncoding;

/// Display and decoding metadata for one protocol system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolInfo {
    /// Feed identifier, e.g. `uniswap_v3`.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Edge color when the protocol is selected.
    pub color: &'static str,
    /// How the fee attribute is scaled.
    pub fee_encoding: FeeEncoding,
}

const PROTOCOLS: &[ProtocolInfo] = &[
    ProtocolInfo {
        id: "uniswap_v2",
        name: "Uniswap V2",
        color: "#3B82F6",
        fee_encoding: FeeEncoding::BasisPoints,
    },
    ProtocolInfo {
        id: "uniswap_v3",
        name: "Uniswap V3",
        color: "#2DD4BF",
        fee_encoding: FeeEncoding::HundredthBips,
    },
    ProtocolInfo {
        id: "uniswap_v4",
        name: "Uniswap V4",
        color: "#FACC15",
        fee_encoding: FeeEncoding::HundredthBips,
    },
    ProtocolInfo {
        id: "vm:balancer_v2",
        name: "Balancer V2",
        color: "#F97316",
        fee_encoding: FeeEncoding::Wad,
    },
    ProtocolInfo {
        id: "vm:curve",
        name: "Curve",
        color: "#22C55E",
        fee_encoding: FeeEncoding::HundredthBips,
    },
    ProtocolInfo {
        id: "sushiswap_v2",
        name: "SushiSwap V2",
        color: "#EC4899",
        fee_encoding: FeeEncoding::HundredthBips,
    },
    ProtocolInfo {
        id: "pancakeswap_v2",
        name: "PancakeSwap V2",
        color: "#D1884F",
        fee_encoding: FeeEncoding::HundredthBips,
    },
    ProtocolInfo {
        id: "pancakeswap_v3",
        name: "PancakeSwap V3",
        color: "#8B5CF6",
        fee_encoding: FeeEncoding::HundredthBips,
    },
    ProtocolInfo {
        id: "ekubo_v2",
        name: "Ekubo V2",
        color: "#6366F1",
        fee_encoding: FeeEncoding::Wad,
    },
];

/// Looks up a protocol, ignoring ASCII case.
pub fn protocol_info(id: &str) -> Option<&'static ProtocolInfo> {
    PROTOCOLS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// All registered protocols in display order.
pub fn known_protocols() -> &'static [ProtocolInfo] {
    PROTOCOLS
}

/// Display name, falling back to the raw identifier.
pub fn readable_protocol_name(id: &str) -> &str {
    protocol_info(id).map_or(id, |p| p.name)
}

pub fn protocol_color(id: &str) -> Option<&'static str> {
    protocol_info(id).map(|p| p.color)
}
