//! Metric names recorded by the Store and their descriptions.
//!
//! The Store records through the `metrics` facade; whichever recorder the
//! host process installs receives them. Call [`describe_store_metrics`] once
//! after installing a recorder so exporters can attach help text.

use metrics::{describe_counter, describe_histogram, Unit};

/// Total actions accepted by `Store::send`
pub const COMMANDS_TOTAL: &str = "store.commands.total";
/// Effects started, labelled by `type`
pub const EFFECTS_EXECUTED: &str = "store.effects.executed";
/// Number of effects returned per reducer call
pub const EFFECTS_COUNT: &str = "store.effects.count";
/// Reducer wall time
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";
/// Shutdown requests
pub const SHUTDOWN_INITIATED: &str = "store.shutdown.initiated";
/// Shutdowns that drained every effect in time
pub const SHUTDOWN_COMPLETED: &str = "store.shutdown.completed";
/// Shutdowns that gave up with effects still running
pub const SHUTDOWN_TIMEOUT: &str = "store.shutdown.timeout";
/// Actions refused because the store is shutting down
pub const SHUTDOWN_REJECTED: &str = "store.shutdown.rejected_actions";

/// Register descriptions for every Store metric.
pub fn describe_store_metrics() {
    describe_counter!(COMMANDS_TOTAL, "Total number of actions sent to stores");
    describe_counter!(EFFECTS_EXECUTED, "Total number of effects executed, by type");
    describe_histogram!(EFFECTS_COUNT, "Number of effects returned by a reducer call");
    describe_histogram!(
        REDUCER_DURATION,
        Unit::Seconds,
        "Time taken to execute reducers"
    );
    describe_counter!(SHUTDOWN_INITIATED, "Store shutdowns initiated");
    describe_counter!(SHUTDOWN_COMPLETED, "Store shutdowns that drained all effects");
    describe_counter!(SHUTDOWN_TIMEOUT, "Store shutdowns that timed out");
    describe_counter!(SHUTDOWN_REJECTED, "Actions rejected during shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describing_without_a_recorder_is_harmless() {
        describe_store_metrics();
        describe_store_metrics();
    }

    #[test]
    fn metric_names_share_the_store_prefix() {
        for name in [
            COMMANDS_TOTAL,
            EFFECTS_EXECUTED,
            EFFECTS_COUNT,
            REDUCER_DURATION,
            SHUTDOWN_INITIATED,
            SHUTDOWN_COMPLETED,
            SHUTDOWN_TIMEOUT,
            SHUTDOWN_REJECTED,
        ] {
            assert!(name.starts_with("store."), "{name}");
        }
    }
}
