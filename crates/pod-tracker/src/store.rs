//! Label-indexed pod metadata store
//!
//! Holds pod label and address metadata keyed by (namespace, name) and
//! answers "which addresses belong to pods matching this label selector".
//! Populated by the cluster-watch loop as pods are created, updated, and
//! removed; there is no capacity bound and no implicit eviction.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use api_types::IpInfo;
use api_types::PodInfo;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use tracing::info;

use crate::selector::flatten_selector;
use crate::selector::matches_labels;

/// Two-level pod metadata store: namespace → pod name → [`PodInfo`].
///
/// All methods take `&self`; the store is safe to share across threads
/// behind an `Arc`. Namespaces whose last pod is removed are dropped from
/// the outer map, so no empty leaves persist.
#[derive(Debug, Default)]
pub struct PodStore {
    pods: RwLock<HashMap<String, HashMap<String, PodInfo>>>,
}

impl PodStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the metadata for (`namespace`, `name`).
    ///
    /// An empty address string means the pod has no address for that
    /// family and is stored as `None`.
    pub fn add_pod(
        &self,
        namespace: &str,
        name: &str,
        labels: BTreeMap<String, String>,
        ipv4: &str,
        ipv6: &str,
    ) {
        let info = PodInfo {
            labels,
            ipv4: non_empty(ipv4),
            ipv6: non_empty(ipv6),
        };

        let mut pods = self.write();
        pods.entry(namespace.to_string())
            .or_default()
            .insert(name.to_string(), info);

        info!(namespace = %namespace, pod_name = %name, "Pod metadata stored");
    }

    /// Remove the metadata for (`namespace`, `name`), if present.
    ///
    /// Removing an absent pod is a no-op. Removing the last pod in a
    /// namespace also removes the namespace entry itself.
    pub fn remove_pod(&self, namespace: &str, name: &str) {
        let mut pods = self.write();
        if let Some(inner) = pods.get_mut(namespace) {
            if inner.remove(name).is_some() {
                info!(namespace = %namespace, pod_name = %name, "Pod metadata removed");
            }
            if inner.is_empty() {
                pods.remove(namespace);
            }
        }
    }

    /// Addresses of all pods, across all namespaces, matching `selector`.
    ///
    /// Matching is conjunctive exact-match on label pairs; the empty
    /// selector matches every pod. Results are sorted by parsed IPv4
    /// address: entries with no parseable IPv4 sort first, then numeric
    /// ascending, with ties broken by the IPv6 string (absent first) so
    /// the order is total and platform-independent.
    pub fn ips_matching(&self, selector: &BTreeMap<String, String>) -> Vec<IpInfo> {
        let pods = self.read();
        let mut results: Vec<IpInfo> = pods
            .values()
            .flat_map(|inner| inner.values())
            .filter(|info| matches_labels(&info.labels, selector))
            .map(|info| IpInfo {
                ipv4: info.ipv4.clone(),
                ipv6: info.ipv6.clone(),
            })
            .collect();

        results.sort_by(|a, b| address_key(a).cmp(&address_key(b)));
        results
    }

    /// Addresses of all pods matching a Kubernetes [`LabelSelector`].
    ///
    /// Only `match_labels` is honored; an absent `match_labels` behaves as
    /// the empty selector and matches every pod.
    pub fn ips_matching_selector(&self, selector: &LabelSelector) -> Vec<IpInfo> {
        self.ips_matching(&flatten_selector(selector))
    }

    /// Total number of pods across all namespaces.
    pub fn len(&self) -> usize {
        self.read().values().map(HashMap::len).sum()
    }

    /// True if no pods are stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Sorted list of namespaces currently holding at least one pod.
    pub fn namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = self.read().keys().cloned().collect();
        namespaces.sort();
        namespaces
    }

    /// Copy out the metadata for (`namespace`, `name`), if present.
    pub fn get_pod(&self, namespace: &str, name: &str) -> Option<PodInfo> {
        self.read().get(namespace)?.get(name).cloned()
    }

    // No operation panics while holding the lock, so a poisoned lock can
    // only come from a caller-induced panic between operations; the state
    // is consistent either way and the guard is safe to recover.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, HashMap<String, PodInfo>>> {
        self.pods.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, HashMap<String, PodInfo>>> {
        self.pods.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn non_empty(address: &str) -> Option<String> {
    if address.is_empty() {
        None
    } else {
        Some(address.to_string())
    }
}

/// Sort key for query results: unparseable or absent IPv4 first, then
/// numeric ascending, ties broken by the IPv6 string.
fn address_key(ip: &IpInfo) -> (Option<Ipv4Addr>, Option<&String>) {
    let parsed = ip.ipv4.as_deref().and_then(|s| s.parse().ok());
    (parsed, ip.ipv6.as_ref())
}
