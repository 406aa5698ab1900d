//! Connection supervision

mod connection_supervisor;

pub use connection_supervisor::{ConnectionSupervisor, SupervisorConfig, SupervisorHandle};
