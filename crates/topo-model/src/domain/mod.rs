mod kv;
pub use kv::KeyValue;

mod labels;
pub use labels::Labels;

mod ports;
pub use ports::{EXECUTOR_PORTS, ExecutorPort};

mod constants;
pub use constants::{
    DEFAULT_APP_LABEL, DEFAULT_SHARED_VOLUME_PATH, ENV_HOST, ENV_POD_NAME, EXECUTOR_CONTAINER_NAME,
    FIELD_POD_IP, FIELD_POD_NAME, LABEL_APP, LABEL_TOPOLOGY, SHARED_VOLUME_NAME, TAINT_NOT_READY,
    TAINT_UNREACHABLE,
};

/// Name of a deployed topology.
///
/// Used as pod label value and as the prefix of generated resource names,
/// so it must be a valid DNS-1123 label (see [`crate::TopologySpec::validate`]).
pub type TopologyName = String;
