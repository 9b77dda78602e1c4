//! Split an IPv6 block into /64 subnets and pick the static allocation.

use crate::error::SplitError;
use crate::models::{
    addr_offset, Allocation, Ipv6Net, LAN_PD_FIRST_INDEX, LAN_PD_LAST_INDEX, LAN_SUBNET_INDEX,
    SERVICE_HOST_OFFSET, SERVICE_SUBNET_INDEX,
};

/// Largest accepted prefix length of the input block.
pub const MAX_INPUT_PREFIX: u8 = 59;
/// Prefix length of every generated subnet.
pub const SUBNET_PREFIX: u8 = 64;

const MSG_INVALID: &str = "Invalid IPv6 range";
const MSG_TOO_SMALL: &str = "Should be /59 IPv6 range or larger.";

/// Parse `range_text` and compute the [`Allocation`].
///
/// # Errors
/// [`SplitError::InvalidRange`] when the text is not an IPv6 network in CIDR
/// notation, or when its prefix length is larger than [`MAX_INPUT_PREFIX`].
///
/// # Examples
/// ```
/// use homelab_net_tools::processing::partition;
/// let plan = partition("2001:db8::/56").unwrap();
/// assert_eq!(plan.service_host.to_string(), "2001:db8::1337");
/// assert!(partition("2001:db8::/60").is_err());
/// ```
pub fn partition(range_text: &str) -> Result<Allocation, SplitError> {
    let network = Ipv6Net::network(range_text).map_err(|e| {
        log::debug!("partition({range_text:?}) parse failed: {e}");
        SplitError::invalid_range(MSG_INVALID)
    })?;
    if network.mask > MAX_INPUT_PREFIX {
        log::debug!("partition({network}) prefix /{} > /{MAX_INPUT_PREFIX}", network.mask);
        return Err(SplitError::invalid_range(MSG_TOO_SMALL));
    }

    // Any error past this point is a broken invariant of the /59 bound, report it as invalid input.
    let internal = |e: Box<dyn std::error::Error>| {
        log::error!("partition({network}) failed: {e}");
        SplitError::invalid_range(MSG_INVALID)
    };

    let subnets = network.subnets(SUBNET_PREFIX).map_err(internal)?;
    log::debug!(
        "partition({network}) into {} /{SUBNET_PREFIX} subnets",
        subnets.remaining()
    );

    let lan_subnet = network
        .nth_subnet(SUBNET_PREFIX, LAN_SUBNET_INDEX)
        .map_err(internal)?;
    let lan_pd_range: Vec<Ipv6Net> = subnets
        .skip(LAN_PD_FIRST_INDEX as usize)
        .take((LAN_PD_LAST_INDEX - LAN_PD_FIRST_INDEX + 1) as usize)
        .collect();
    let service_subnet = network
        .nth_subnet(SUBNET_PREFIX, SERVICE_SUBNET_INDEX)
        .map_err(internal)?;
    let service_host = addr_offset(network.lo(), SERVICE_HOST_OFFSET).map_err(internal)?;

    if !service_subnet.contains(service_host) {
        log::debug!(
            "service_host {service_host} is outside {service_subnet}, it is the LAN next hop in {lan_subnet}"
        );
    }

    Ok(Allocation {
        network,
        lan_subnet,
        lan_pd_range,
        service_subnet,
        service_host,
    })
}
