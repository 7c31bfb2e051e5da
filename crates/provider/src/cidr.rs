//! IP range derivation for guest networks
//!
//! When a network offering supports explicit IP ranges, the gateway, pool
//! start and pool end default to positions inside the configured CIDR:
//! gateway = base + 1, start = base + 2, end = broadcast - 1. Explicit
//! configuration fields always win.

use std::net::Ipv4Addr;

use ipnetwork::Ipv4Network;
use nimbus_common::{Error, Result};

use crate::data::ResourceData;

/// The IP configuration derived for a network create request.
#[derive(Debug, Clone, PartialEq)]
pub struct IpRange {
    pub netmask: String,
    pub gateway: String,
    pub start_ip: Option<String>,
    pub end_ip: Option<String>,
}

/// Derive netmask/gateway/start/end from the `cidr` field, honoring any
/// explicit `gateway`/`startip`/`endip` overrides. Start and end are only
/// defaulted when the offering specifies IP ranges.
pub fn derive_ip_range(d: &ResourceData, specify_ip_ranges: bool) -> Result<IpRange> {
    let cidr = d.get_str("cidr");
    let network: Ipv4Network = cidr.parse().map_err(|e| Error::InvalidValue {
        field: "cidr".to_string(),
        reason: format!("unable to parse {cidr}: {e}"),
    })?;

    let base = u32::from(network.network());
    let broadcast = u32::from(network.broadcast());

    let gateway = match d.get_str_ok("gateway") {
        Some(gateway) => gateway.to_string(),
        None => Ipv4Addr::from(base + 1).to_string(),
    };

    let start_ip = d
        .get_str_ok("startip")
        .map(str::to_string)
        .or_else(|| specify_ip_ranges.then(|| Ipv4Addr::from(base + 2).to_string()));

    let end_ip = d
        .get_str_ok("endip")
        .map(str::to_string)
        .or_else(|| specify_ip_ranges.then(|| Ipv4Addr::from(broadcast - 1).to_string()));

    Ok(IpRange {
        netmask: network.mask().to_string(),
        gateway,
        start_ip,
        end_ip,
    })
}
