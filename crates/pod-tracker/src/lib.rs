//! In-memory pod identity and reachability registry
//!
//! This crate is the core of the container-networking debugging toolkit.
//! It tracks two independent pieces of node-local state:
//!
//! - [`PodRegistry`]: a capacity-bounded bidirectional mapping between a
//!   namespace-qualified pod name and its runtime identity (pod UID plus
//!   container ID), evicting the entry that was written longest ago when
//!   the bound is reached.
//! - [`PodStore`]: a namespace/name-indexed store of pod label and address
//!   metadata, queryable with an equality label selector.
//!
//! Both are safe to share across threads behind an `Arc` without external
//! synchronization. Population and querying are driven by out-of-process
//! collaborators (the cgroup/PID inspector and the cluster-watch loop);
//! this crate performs no I/O of its own.

pub mod error;
pub mod registry;
pub mod selector;
pub mod store;

pub use error::Result;
pub use error::TrackerError;
pub use registry::PodRegistry;
pub use store::PodStore;
