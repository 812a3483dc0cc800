/*!
 * Process Types
 * Task, credential and container descriptions consumed by event enrichment
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Credential snapshot of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credentials {
    pub uid: u32,
    pub gid: u32,
    pub euid: u32,
    pub egid: u32,
    pub suid: u32,
    pub sgid: u32,
    pub fsuid: u32,
    pub fsgid: u32,
}

impl Credentials {
    /// Credentials where every id (real, effective, saved, fs) is the same
    pub const fn uniform(uid: u32, gid: u32) -> Self {
        Self {
            uid,
            gid,
            euid: uid,
            egid: gid,
            suid: uid,
            sgid: gid,
            fsuid: uid,
            fsgid: gid,
        }
    }
}

/// Container runtime that produced the metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerRuntime {
    #[default]
    Unknown,
    Docker,
    Oci,
}

/// Container lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerState {
    #[default]
    Unknown,
    Created,
    Running,
    Exited,
    Removed,
}

/// Container metadata attached to an event
///
/// May be partially populated: when the runtime has not been discovered yet
/// only `id` is known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub image_id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub image_name: String,
    #[serde(default)]
    pub pid: Pid,
    #[serde(default)]
    pub exit_code: i32,
    #[serde(default)]
    pub runtime: ContainerRuntime,
    #[serde(default)]
    pub state: ContainerState,
}

impl ContainerInfo {
    /// Container info carrying only the raw container id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// No container context at all (host process or unresolved)
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// A traced thread or process as known to the process directory
///
/// Tasks are immutable once shared; the directory replaces them wholesale.
#[derive(Debug, Clone, Default)]
pub struct Task {
    pub pid: Pid,
    pub tgid: Pid,
    /// Stable process correlation id (survives pid reuse)
    pub process_id: String,
    /// Raw container id parsed from the task's cgroup, empty on the host
    pub container_id: String,
    pub creds: Option<Credentials>,
    sensor: bool,
    leader: Option<Arc<Task>>,
}

impl Task {
    pub fn new(pid: Pid, tgid: Pid, process_id: impl Into<String>) -> Self {
        Self {
            pid,
            tgid,
            process_id: process_id.into(),
            ..Self::default()
        }
    }

    pub fn with_container_id(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = container_id.into();
        self
    }

    pub fn with_creds(mut self, creds: Credentials) -> Self {
        self.creds = Some(creds);
        self
    }

    /// Link a non-leader thread to its thread-group leader
    ///
    /// Used when the producer hands the task over with the sample.
    /// `ProcessCache` ignores the link and resolves leaders by tgid.
    pub fn with_leader(mut self, leader: Arc<Task>) -> Self {
        self.leader = Some(leader);
        self
    }

    /// Flag the task as part of the monitoring agent itself
    pub fn as_sensor(mut self) -> Self {
        self.sensor = true;
        self
    }

    #[inline]
    pub fn is_leader(&self) -> bool {
        self.pid == self.tgid
    }

    /// True if the task belongs to the sensor's own process
    #[inline]
    pub fn is_sensor(&self) -> bool {
        self.sensor
    }

    /// Thread-group leader: the task itself when it leads its group,
    /// otherwise the linked leader if one is known
    #[inline]
    pub fn leader(self: &Arc<Self>) -> Option<Arc<Task>> {
        if self.is_leader() {
            Some(Arc::clone(self))
        } else {
            self.leader.clone()
        }
    }
}
