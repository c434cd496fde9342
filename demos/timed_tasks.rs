//! # Example: timed_tasks
//!
//! A frame clock running as an [`UpdateTask`] fires triggers for a
//! [`TimedTask`] (a splash screen shown for 3 frames) and a [`ChronicTask`]
//! (autosave every 4 frames).
//!
//! ## Run
//! ```bash
//! RUST_LOG=tickvisor=debug cargo run --example timed_tasks
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tickvisor::{
    ChronicTask, Expiry, Scheduler, TaskError, TaskFn, TimedTask, Trigger, Update, UpdateTask,
};

struct Timer {
    due: u64,
    period: Option<u64>,
    trigger: Trigger,
}

struct FrameClock {
    frame: u64,
    timers: Vec<Timer>,
}

impl FrameClock {
    fn after(&mut self, frames: u64, trigger: Trigger) {
        self.timers.push(Timer { due: self.frame + frames, period: None, trigger });
    }

    fn every(&mut self, frames: u64, trigger: Trigger) {
        self.timers.push(Timer { due: self.frame + frames, period: Some(frames), trigger });
    }
}

impl Update for FrameClock {
    fn update(&mut self) -> Result<(), TaskError> {
        self.frame += 1;
        let frame = self.frame;
        self.timers.retain_mut(|timer| {
            if timer.due != frame {
                return true;
            }
            timer.trigger.fire();
            match timer.period {
                Some(period) => {
                    timer.due += period;
                    true
                }
                None => false,
            }
        });
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let clock = Rc::new(RefCell::new(FrameClock {
        frame: 0,
        timers: Vec::new(),
    }));
    let splash_done = Trigger::new();
    let autosave_due = Trigger::new();
    clock.borrow_mut().after(3, splash_done.clone());
    clock.borrow_mut().every(4, autosave_due.clone());

    let mut scheduler = Scheduler::new();
    let clock_task =
        scheduler.register_task(UpdateTask::new("clock", Rc::clone(&clock)).with_priority(-100))?;
    let splash = scheduler.register_task(
        TimedTask::new(
            TaskFn::new("splash", |ctx| {
                println!("[splash] tick {}", ctx.ticks());
                Ok(())
            }),
            splash_done,
        )
        .with_expiry(Expiry::Terminate),
    )?;
    let autosave = scheduler.register_task(ChronicTask::new(
        TaskFn::new("autosave", |ctx| {
            println!("[autosave] saved at tick {}", ctx.ticks());
            Ok(())
        }),
        autosave_due,
    ))?;

    for id in [clock_task, splash, autosave] {
        scheduler.activate_task(id)?;
    }
    for _ in 0..10 {
        scheduler.execute_tasks()?;
    }

    println!(
        "frame {}: splash {}, autosave ran {} of {} ticks",
        clock.borrow().frame,
        scheduler.state(splash),
        scheduler.executions(autosave).unwrap_or(0),
        scheduler.ticks()
    );
    Ok(())
}
