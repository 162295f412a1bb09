use k8s_openapi::api::core::v1::ContainerPort;

/// Named TCP port the executor process listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorPort {
    /// IANA service name (at most 15 characters).
    pub name: &'static str,
    pub port: i32,
}

/// Ports opened by every executor.
///
/// Order is stable and becomes the order of the executor container's `ports`.
pub const EXECUTOR_PORTS: &[ExecutorPort] = &[
    ExecutorPort::new("server", 6001),
    ExecutorPort::new("tmanager-ctl", 6002),
    ExecutorPort::new("tmanager-stats", 6003),
    ExecutorPort::new("shell-port", 6004),
    ExecutorPort::new("metrics-mgr", 6005),
    ExecutorPort::new("scheduler", 6006),
    ExecutorPort::new("metrics-cache-m", 6007),
    ExecutorPort::new("metrics-cache-s", 6008),
    ExecutorPort::new("ckptmgr", 6009),
];

impl ExecutorPort {
    pub const fn new(name: &'static str, port: i32) -> Self {
        Self { name, port }
    }

    /// Render as a Kubernetes container port.
    pub fn to_container_port(&self) -> ContainerPort {
        ContainerPort {
            name: Some(self.name.to_string()),
            container_port: self.port,
            protocol: Some("TCP".to_string()),
            ..Default::default()
        }
    }
}
