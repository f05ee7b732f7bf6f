use std::time::Duration;

/// Tunables for the session coordinator. The defaults match the reviewed
/// behavior; nothing here is loaded from disk because the engine owns no
/// persisted state.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Minimum interval between start-session reminders sent to the host
    /// while every member holds a role.
    pub start_reminder_interval: Duration,
    /// Capacity of the intent submission channel.
    pub intent_buffer: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            start_reminder_interval: Duration::from_secs(30),
            intent_buffer: 64,
        }
    }
}
