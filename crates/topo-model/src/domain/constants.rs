//! Well-known names shared by the baseline provider, the assembler and tests.
//!
//! Everything the executor runtime relies on at startup is named here once.

/// Name of the container running the topology executor.
///
/// A user template may declare a container with this name to customise it;
/// the assembler keeps the template's extra fields but never lets the template
/// replace it.
pub const EXECUTOR_CONTAINER_NAME: &str = "executor";

/// Environment variable carrying the pod IP.
pub const ENV_HOST: &str = "HOST";

/// Environment variable carrying the pod name.
pub const ENV_POD_NAME: &str = "POD_NAME";

/// Downward API field path for the pod IP.
pub const FIELD_POD_IP: &str = "status.podIP";

/// Downward API field path for the pod name.
pub const FIELD_POD_NAME: &str = "metadata.name";

/// Scratch volume shared between the executor and sidecars.
pub const SHARED_VOLUME_NAME: &str = "shared-volume";

pub const DEFAULT_SHARED_VOLUME_PATH: &str = "/shared_volume";

/// Pod label keys set on every executor pod.
pub const LABEL_APP: &str = "app";
pub const LABEL_TOPOLOGY: &str = "topology";

pub const DEFAULT_APP_LABEL: &str = "stream-topology";

/// Node taints every executor tolerates for a bounded time.
pub const TAINT_NOT_READY: &str = "node.kubernetes.io/not-ready";
pub const TAINT_UNREACHABLE: &str = "node.kubernetes.io/unreachable";
