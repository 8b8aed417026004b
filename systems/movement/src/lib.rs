#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy pursuit system that steps every void toward the core.

use starforge_nexus_core::{CellCoord, Command, Event, StepDelta, VoidView};

/// Pure system that reacts to started ticks and emits one step per void.
///
/// Steps are derived from the captured [`VoidView`] and the fixed core
/// position only, so the order in which the world applies them never changes
/// where any void ends up.
#[derive(Debug, Default)]
pub struct Movement {
    scratch: Vec<Command>,
}

impl Movement {
    /// Creates a new movement system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and the void view to emit step commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        void_view: &VoidView,
        core: CellCoord,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TickStarted { .. }))
        {
            return;
        }

        self.scratch.clear();
        for void in void_view.iter() {
            let delta = StepDelta::toward(void.cell, core);
            if delta.is_hold() {
                continue;
            }
            self.scratch.push(Command::StepVoid {
                void_id: void.id,
                delta,
            });
        }

        out.append(&mut self.scratch);
    }
}
