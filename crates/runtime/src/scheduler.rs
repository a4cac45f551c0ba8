//! Process-wide tick scheduler.
//!
//! Tasks live in a registration-ordered table. While a task runs it is taken
//! out of the table and the lock is released, so the task may call back into
//! the scheduler (including cancelling itself) without deadlocking.

use std::sync::{Mutex, MutexGuard, PoisonError};

use power_core::{RepeatingTask, Scheduler, TaskHandle, Tick, TickContext, WorldOracle};
use tracing::{debug, trace};

struct Slot {
    handle: TaskHandle,
    name: &'static str,
    /// `None` while the task is running.
    task: Option<Box<dyn RepeatingTask>>,
    next_run: Tick,
    period: u64,
    cancelled: bool,
}

#[derive(Default)]
struct SchedulerState {
    now: Tick,
    next_handle: u64,
    slots: Vec<Slot>,
}

/// Tick driver implementing [`Scheduler`].
#[derive(Default)]
pub struct TickScheduler {
    state: Mutex<SchedulerState>,
}

/// What one processed tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSummary {
    pub now: Tick,
    /// Tasks that ran during the tick.
    pub ran: usize,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SchedulerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Last processed tick.
    pub fn now(&self) -> Tick {
        self.state().now
    }

    /// Registered tasks that have not been cancelled.
    pub fn active_tasks(&self) -> usize {
        self.state().slots.iter().filter(|s| !s.cancelled).count()
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.state()
            .slots
            .iter()
            .any(|s| s.handle == handle && !s.cancelled)
    }

    /// Advances the clock by one tick and runs every due task in
    /// registration order.
    pub fn run_tick(&self, world: &dyn WorldOracle) -> TickSummary {
        let (now, due) = {
            let mut state = self.state();
            state.now = state.now + 1;
            let now = state.now;
            let due: Vec<TaskHandle> = state
                .slots
                .iter()
                .filter(|s| !s.cancelled && s.task.is_some() && s.next_run <= now)
                .map(|s| s.handle)
                .collect();
            (now, due)
        };

        let mut ran = 0;
        for handle in due {
            // Earlier tasks in this tick may have cancelled this one.
            let Some(mut task) = self.take_runnable(handle) else {
                continue;
            };

            let ctx = TickContext {
                now,
                handle,
                world,
                scheduler: self,
            };
            task.run(&ctx);
            ran += 1;

            let mut state = self.state();
            if let Some(index) = state.slots.iter().position(|s| s.handle == handle) {
                let slot = &mut state.slots[index];
                if slot.cancelled {
                    debug!(%handle, name = slot.name, "task retired");
                    state.slots.remove(index);
                } else {
                    slot.next_run = now + slot.period;
                    slot.task = Some(task);
                }
            }
        }

        trace!(tick = %now, ran, "tick processed");
        TickSummary { now, ran }
    }

    fn take_runnable(&self, handle: TaskHandle) -> Option<Box<dyn RepeatingTask>> {
        let mut state = self.state();
        let slot = state.slots.iter_mut().find(|s| s.handle == handle)?;
        if slot.cancelled {
            return None;
        }
        slot.task.take()
    }
}

impl Scheduler for TickScheduler {
    fn schedule_repeating(
        &self,
        task: Box<dyn RepeatingTask>,
        initial_delay: u64,
        period: u64,
    ) -> TaskHandle {
        let mut state = self.state();
        state.next_handle += 1;
        let handle = TaskHandle(state.next_handle);
        let name = task.name();
        let next_run = state.now + 1 + initial_delay;
        state.slots.push(Slot {
            handle,
            name,
            task: Some(task),
            next_run,
            period: period.max(1),
            cancelled: false,
        });
        debug!(%handle, name, %next_run, period, "task scheduled");
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        let mut state = self.state();
        let Some(index) = state.slots.iter().position(|s| s.handle == handle) else {
            return;
        };
        if state.slots[index].task.is_some() {
            let slot = state.slots.remove(index);
            debug!(%handle, name = slot.name, "task cancelled");
        } else {
            // Running right now; dropped once it returns.
            state.slots[index].cancelled = true;
        }
    }
}

impl std::fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("TickScheduler")
            .field("now", &state.now)
            .field("tasks", &state.slots.len())
            .finish()
    }
}
