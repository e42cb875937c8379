//! Tunnel endpoint registry.
//!
//! Part of the tunnel driver contract; this driver does not track endpoints,
//! so every method is a no-op.

use std::net::IpAddr;

use super::VxlanTypeDriver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelEndpoint {
    pub ip: IpAddr,
    pub host: String,
}

pub trait EndpointRegistry {
    fn add_endpoint(&self, ip: IpAddr, host: &str) -> Option<TunnelEndpoint>;
    fn get_endpoints(&self) -> Vec<TunnelEndpoint>;
    fn get_endpoint_by_host(&self, host: &str) -> Option<TunnelEndpoint>;
    fn get_endpoint_by_ip(&self, ip: IpAddr) -> Option<TunnelEndpoint>;
    fn delete_endpoint(&self, ip: IpAddr);
}

impl EndpointRegistry for VxlanTypeDriver {
    fn add_endpoint(&self, _ip: IpAddr, _host: &str) -> Option<TunnelEndpoint> {
        None
    }

    fn get_endpoints(&self) -> Vec<TunnelEndpoint> {
        Vec::new()
    }

    fn get_endpoint_by_host(&self, _host: &str) -> Option<TunnelEndpoint> {
        None
    }

    fn get_endpoint_by_ip(&self, _ip: IpAddr) -> Option<TunnelEndpoint> {
        None
    }

    fn delete_endpoint(&self, _ip: IpAddr) {}
}
