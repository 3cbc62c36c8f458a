use serde::Serialize;

use super::WorldCore;

/// Queue cap; the host is expected to drain every frame
const MAX_PENDING: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// A user-facing message. Never blocks the simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

pub(super) fn push(world: &mut WorldCore, message: String, severity: Severity) {
    if world.notifications.len() >= MAX_PENDING {
        world.notifications.pop_front();
    }
    world.notifications.push_back(Notification { message, severity });
}

pub(super) fn drain(world: &mut WorldCore) -> Vec<Notification> {
    world.notifications.drain(..).collect()
}
