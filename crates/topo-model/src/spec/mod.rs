mod topology;
pub use topology::{ExecutorResources, TopologySpec};
