mod domain;
pub use domain::{
    DEFAULT_APP_LABEL, DEFAULT_SHARED_VOLUME_PATH, ENV_HOST, ENV_POD_NAME, EXECUTOR_CONTAINER_NAME,
    EXECUTOR_PORTS, ExecutorPort, FIELD_POD_IP, FIELD_POD_NAME, LABEL_APP, LABEL_TOPOLOGY,
    SHARED_VOLUME_NAME, TAINT_NOT_READY, TAINT_UNREACHABLE,
};
pub use domain::{KeyValue, Labels, TopologyName};

mod error;
pub use error::{ModelError, ModelResult};

mod spec;
pub use spec::{ExecutorResources, TopologySpec};

mod template;
pub use template::PodTemplate;

mod descriptor;
pub use descriptor::Descriptor;
