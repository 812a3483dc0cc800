/*!
 * Process Directory Traits
 * Lookup interface the enricher uses to resolve sample origins
 */

use super::types::{ContainerInfo, Task};
use crate::core::types::Pid;
use std::sync::Arc;

/// Read side of the process-lifecycle directory
///
/// Implementations are called on the sampling hot path and must answer from
/// memory without blocking. A miss (`None`) is normal: the process may have
/// exited and been evicted before its samples were drained.
pub trait ProcessDirectory: Send + Sync {
    /// Resolve a pid to its task and that task's thread-group leader
    fn lookup_task_and_leader(&self, pid: Pid) -> (Option<Arc<Task>>, Option<Arc<Task>>);

    /// Container metadata for a leader task, if the runtime has been discovered
    fn lookup_container_info(&self, leader: &Task) -> Option<ContainerInfo>;
}
