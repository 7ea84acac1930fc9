pub mod config;
pub mod constants;
pub mod errors;
pub mod health;
pub mod rpc;
pub mod scheduler;
pub mod services;

// Re-export commonly used types
pub use config::{Config, ConfigManager, EndpointList, ValidatorConfig};
pub use health::{HealthChecker, MissedBlockAnalyzer, ReferenceResolver};
pub use rpc::RpcClient;
pub use scheduler::MonitorScheduler;
pub use services::{AlertService, Notifier};
