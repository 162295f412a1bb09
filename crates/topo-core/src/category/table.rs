use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, Toleration, TopologySpreadConstraint, Volume, VolumeMount,
};

use super::{Category, PolicyRow, Precedence};

const DEFAULT_PORT_PROTOCOL: &str = "TCP";

/// Executor environment. Baseline wins so pod identity and host wiring cannot be overridden.
pub const ENV_VARS: Category<EnvVar, String> = Category {
    label: "Pod Template Environment Variables",
    slug: "env_vars",
    precedence: Precedence::Baseline,
    key: env_var_key,
};

/// Executor ports, keyed by port number and protocol.
pub const CONTAINER_PORTS: Category<ContainerPort, (i32, String)> = Category {
    label: "Pod Template Container Ports",
    slug: "container_ports",
    precedence: Precedence::Baseline,
    key: container_port_key,
};

pub const VOLUME_MOUNTS: Category<VolumeMount, String> = Category {
    label: "Pod Template Volume Mounts",
    slug: "volume_mounts",
    precedence: Precedence::Baseline,
    key: volume_mount_key,
};

pub const VOLUMES: Category<Volume, String> = Category {
    label: "Pod Template Volumes",
    slug: "volumes",
    precedence: Precedence::Baseline,
    key: volume_key,
};

/// Pod containers. Users may add sidecars but never replace the executor.
pub const CONTAINERS: Category<Container, String> = Category {
    label: "Pod Template Containers",
    slug: "containers",
    precedence: Precedence::Baseline,
    key: container_key,
};

pub const INIT_CONTAINERS: Category<Container, String> = Category {
    label: "Pod Template Init Containers",
    slug: "init_containers",
    precedence: Precedence::Baseline,
    key: container_key,
};

/// Tolerations, keyed by taint key. A toleration without a key cannot be deduplicated.
pub const TOLERATIONS: Category<Toleration, String> = Category {
    label: "Pod Specification Tolerations",
    slug: "tolerations",
    precedence: Precedence::Baseline,
    key: toleration_key,
};

/// Spread constraints. Placement is the user's call, so the template wins.
pub const TOPOLOGY_SPREAD: Category<TopologySpreadConstraint, String> = Category {
    label: "Pod Specification Topology Spread Constraints",
    slug: "topology_spread_constraints",
    precedence: Precedence::Template,
    key: spread_key,
};

/// All categories, in assembly order.
pub fn policy_table() -> [PolicyRow; 8] {
    [
        ENV_VARS.row(),
        CONTAINER_PORTS.row(),
        VOLUME_MOUNTS.row(),
        CONTAINERS.row(),
        INIT_CONTAINERS.row(),
        VOLUMES.row(),
        TOLERATIONS.row(),
        TOPOLOGY_SPREAD.row(),
    ]
}

fn env_var_key(e: &EnvVar) -> Option<String> {
    Some(e.name.clone())
}

/// Kubernetes defaults an unset protocol to TCP.
fn container_port_key(p: &ContainerPort) -> Option<(i32, String)> {
    let protocol = p.protocol.as_deref().unwrap_or(DEFAULT_PORT_PROTOCOL);
    (p.container_port > 0).then(|| (p.container_port, protocol.to_ascii_uppercase()))
}

fn volume_mount_key(m: &VolumeMount) -> Option<String> {
    Some(m.name.clone())
}

fn volume_key(v: &Volume) -> Option<String> {
    Some(v.name.clone())
}

fn container_key(c: &Container) -> Option<String> {
    Some(c.name.clone())
}

fn toleration_key(t: &Toleration) -> Option<String> {
    t.key.clone()
}

fn spread_key(c: &TopologySpreadConstraint) -> Option<String> {
    Some(c.topology_key.clone())
}
