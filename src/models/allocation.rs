//! Static /64 allocation plan for a delegated IPv6 block.

use super::Ipv6Net;
use serde::{Deserialize, Serialize};
use std::net::Ipv6Addr;

/// Index of the LAN /64 in the split block.
pub const LAN_SUBNET_INDEX: u128 = 0;
/// First /64 handed out by DHCPv6 prefix delegation on the LAN.
pub const LAN_PD_FIRST_INDEX: u128 = 5;
/// Last /64 handed out by DHCPv6 prefix delegation (inclusive).
pub const LAN_PD_LAST_INDEX: u128 = 15;
/// Index of the /64 routed to the Docker host.
pub const SERVICE_SUBNET_INDEX: u128 = 16;
/// Offset of the Docker host LAN address from the block base, 0x1337.
pub const SERVICE_HOST_OFFSET: u128 = 4919;

/// Named sub ranges picked out of the /64 split of a block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// The block that was split.
    pub network: Ipv6Net,
    /// First /64, used on the LAN.
    pub lan_subnet: Ipv6Net,
    /// The 11 /64s at indices 5..=15, in ascending order.
    pub lan_pd_range: Vec<Ipv6Net>,
    /// The /64 at index 16, routed to the Docker host.
    pub service_subnet: Ipv6Net,
    /// Block base + 4919. This is inside `lan_subnet`, it is the next hop for `service_subnet`.
    pub service_host: Ipv6Addr,
}

impl Allocation {
    /// Base address of the first delegated /64.
    pub fn pd_first(&self) -> Option<Ipv6Addr> {
        self.lan_pd_range.first().map(|n| n.addr)
    }

    /// Base address of the last delegated /64.
    pub fn pd_last(&self) -> Option<Ipv6Addr> {
        self.lan_pd_range.last().map(|n| n.addr)
    }

    /// Gateway for the Docker network, first address after the subnet base.
    pub fn service_gateway(&self) -> Ipv6Addr {
        Ipv6Addr::from(u128::from(self.service_subnet.lo()) + 1)
    }
}
