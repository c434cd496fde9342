//! # Example: tick_loop
//!
//! A fixed-step "game loop" driving a handful of tasks.
//!
//! Shows how to:
//! - Implement [`Task`] by hand and with [`TaskFn`].
//! - Order work with priorities (lower runs first).
//! - Let a task stop itself from inside `execute`.
//! - Attach [`LogWriter`] and read events back from an [`EventJournal`].
//!
//! ## Flow
//! ```text
//! frame N:  input(-10) ──► physics(0) ──► render(10)
//!                              └─ after 5 frames: terminate_self()
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=tickvisor=debug cargo run --example tick_loop
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use tickvisor::{
    Context, EventJournal, EventKind, LogWriter, Scheduler, SchedulerConfig, Task, TaskError,
    TaskFn,
};

struct Physics {
    steps: u32,
    budget: u32,
}

impl Task for Physics {
    fn name(&self) -> &str {
        "physics"
    }

    fn on_activate(&mut self, _ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.steps = 0;
        println!("[physics] world loaded");
        Ok(())
    }

    fn on_terminate(&mut self, _ctx: &mut Context<'_>) -> Result<(), TaskError> {
        println!("[physics] simulated {} steps", self.steps);
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.steps += 1;
        if self.steps == self.budget {
            ctx.terminate_self()
                .map_err(|e| TaskError::fail(e.to_string()))?;
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let journal = Arc::new(EventJournal::new());
    let mut scheduler = Scheduler::builder(SchedulerConfig::default())
        .with_subscriber(Arc::new(LogWriter::new()))
        .with_subscriber(journal.clone())
        .build();

    let frame = Rc::new(Cell::new(0u32));
    let input_frame = Rc::clone(&frame);
    let input = scheduler.register_task(
        TaskFn::new("input", move |_| {
            input_frame.set(input_frame.get() + 1);
            Ok(())
        })
        .with_priority(-10),
    )?;
    let physics = scheduler.register_task(Physics { steps: 0, budget: 5 })?;
    let render_frame = Rc::clone(&frame);
    let render = scheduler.register_task(
        TaskFn::new("render", move |_| {
            println!("[render] frame {}", render_frame.get());
            Ok(())
        })
        .with_priority(10),
    )?;

    for id in [render, physics, input] {
        scheduler.activate_task(id)?;
    }

    for _ in 0..8 {
        scheduler.execute_tasks()?;
    }

    println!(
        "physics is {}, {} transitions recorded",
        scheduler.state(physics),
        journal.events().iter().filter(|e| e.is_transition()).count()
    );
    println!(
        "snapshot rebuilt {} times over {} ticks",
        journal.count(EventKind::SnapshotRebuilt),
        scheduler.ticks()
    );
    Ok(())
}
