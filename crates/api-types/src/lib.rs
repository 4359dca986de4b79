//! Shared pod identity and address type definitions
//!
//! This crate contains the value types exchanged between the in-memory
//! registry core and the surrounding debugging tools: the cgroup/PID
//! inspector that correlates processes with pods, and the cluster-watch
//! component that mirrors pod metadata into the store.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Namespace-qualified pod name, the forward key of the identity registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PodName {
    /// Pod name
    pub name: String,
    /// Pod namespace
    pub namespace: String,
}

impl PodName {
    pub fn new(namespace: String, name: String) -> Self {
        Self { name, namespace }
    }
}

impl std::fmt::Display for PodName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Runtime-assigned pod identity, the reverse key of the identity registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PodId {
    /// Pod UID assigned by the API server
    pub pod_uid: String,
    /// Container ID assigned by the container runtime
    pub container_id: String,
}

impl PodId {
    pub fn new(pod_uid: String, container_id: String) -> Self {
        Self {
            pod_uid,
            container_id,
        }
    }
}

impl std::fmt::Display for PodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.pod_uid, self.container_id)
    }
}

/// Pod network and label metadata held by the label-indexed store.
///
/// Either address may be absent when the pod has not been assigned one for
/// that family (or the family is disabled in the cluster).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PodInfo {
    /// Pod labels
    pub labels: BTreeMap<String, String>,
    /// Pod IPv4 address, if assigned
    pub ipv4: Option<String>,
    /// Pod IPv6 address, if assigned
    pub ipv6: Option<String>,
}

/// Address pair returned by label-selector queries.
///
/// A projection of [`PodInfo`] without the labels; query results are built
/// by copy, never by handing out references into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpInfo {
    /// Pod IPv4 address, if assigned
    pub ipv4: Option<String>,
    /// Pod IPv6 address, if assigned
    pub ipv6: Option<String>,
}
