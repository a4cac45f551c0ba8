//! Periodic scheduler interface.
//!
//! The host drives discrete ticks on a single logical timeline. Repeating
//! tasks are boxed state objects rather than closures so their state can be
//! inspected and tested without a real scheduler.

use crate::env::WorldOracle;
use crate::state::{TaskHandle, Tick};

/// Everything a repeating task may touch while it runs.
pub struct TickContext<'a> {
    pub now: Tick,
    /// Handle of the running task itself.
    pub handle: TaskHandle,
    pub world: &'a dyn WorldOracle,
    pub scheduler: &'a dyn Scheduler,
}

/// Work item invoked once per period until cancelled.
pub trait RepeatingTask: Send {
    fn name(&self) -> &'static str {
        "task"
    }

    fn run(&mut self, ctx: &TickContext<'_>);
}

/// Process-wide periodic scheduler.
///
/// Implementations guarantee that two runs of the same task never overlap,
/// that runs within a tick are sequential, and that a cancelled task never
/// runs again. A task may cancel itself from inside [`RepeatingTask::run`].
pub trait Scheduler: Send + Sync {
    /// Registers `task`; the first run happens `initial_delay` ticks after
    /// the next processed tick, then every `period` ticks.
    fn schedule_repeating(
        &self,
        task: Box<dyn RepeatingTask>,
        initial_delay: u64,
        period: u64,
    ) -> TaskHandle;

    fn cancel(&self, handle: TaskHandle);
}
