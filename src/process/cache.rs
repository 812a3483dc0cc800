/*!
 * Process Cache
 * In-memory process directory backed by sharded concurrent maps
 */

use super::traits::ProcessDirectory;
use super::types::{ContainerInfo, Task};
use crate::core::types::Pid;
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Shard count for the task map (sampling threads read concurrently)
const TASK_SHARDS: usize = 64;

/// In-memory task and container directory
///
/// Readers clone `Arc`s out of the maps and never hold a shard guard past
/// the lookup, so a sampling thread can't stall a lifecycle writer.
pub struct ProcessCache {
    tasks: Arc<DashMap<Pid, Arc<Task>, RandomState>>,
    containers: Arc<DashMap<String, ContainerInfo, RandomState>>,
}

impl ProcessCache {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(DashMap::with_capacity_and_hasher_and_shard_amount(
                0,
                RandomState::new(),
                TASK_SHARDS,
            )),
            containers: Arc::new(DashMap::with_hasher(RandomState::new())),
        }
    }

    /// Insert or replace a task
    ///
    /// Threads are not linked to their leader here. The leader is resolved
    /// by tgid on every lookup, so replacing or evicting it is seen by all
    /// of its threads.
    pub fn insert_task(&self, task: Task) -> Arc<Task> {
        let task = Arc::new(task);
        debug!(pid = task.pid, tgid = task.tgid, "task cached");
        self.tasks.insert(task.pid, Arc::clone(&task));
        task
    }

    /// Evict a task (process exit)
    pub fn remove_task(&self, pid: Pid) -> Option<Arc<Task>> {
        self.tasks.remove(&pid).map(|(_, task)| task)
    }

    /// Get a cached task by pid
    pub fn get_task(&self, pid: Pid) -> Option<Arc<Task>> {
        self.tasks.get(&pid).map(|entry| Arc::clone(entry.value()))
    }

    /// Record discovered container metadata, keyed by container id
    pub fn set_container_info(&self, info: ContainerInfo) {
        debug!(container_id = %info.id, "container info cached");
        self.containers.insert(info.id.clone(), info);
    }

    /// Forget a container (runtime reported removal)
    pub fn remove_container(&self, container_id: &str) -> Option<ContainerInfo> {
        self.containers.remove(container_id).map(|(_, info)| info)
    }

    /// Number of cached tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl ProcessDirectory for ProcessCache {
    fn lookup_task_and_leader(&self, pid: Pid) -> (Option<Arc<Task>>, Option<Arc<Task>>) {
        let Some(task) = self.get_task(pid) else {
            return (None, None);
        };

        let leader = if task.is_leader() {
            Some(Arc::clone(&task))
        } else {
            self.get_task(task.tgid)
        };
        (Some(task), leader)
    }

    fn lookup_container_info(&self, leader: &Task) -> Option<ContainerInfo> {
        if leader.container_id.is_empty() {
            return None;
        }
        self.containers
            .get(&leader.container_id)
            .map(|entry| entry.value().clone())
    }
}

impl Default for ProcessCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ProcessCache {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            containers: Arc::clone(&self.containers),
        }
    }
}
