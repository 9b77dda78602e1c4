//! Domain models for the network tools.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv6Net`] - IPv6 network with CIDR notation support
//! - [`Allocation`] - Static /64 allocation plan of a delegated block
//! - [`ExpiredDomain`] - Domain past its registration date

mod allocation;
mod domain;
mod ipv6;

// Re-export public types
pub use allocation::{
    Allocation, LAN_PD_FIRST_INDEX, LAN_PD_LAST_INDEX, LAN_SUBNET_INDEX, SERVICE_HOST_OFFSET,
    SERVICE_SUBNET_INDEX,
};
pub use domain::ExpiredDomain;
pub use ipv6::{
    addr_offset, block_size, cut_addr, get_cidr_mask, last_addr, Ipv6Net, Subnets, MAX_LENGTH,
};
