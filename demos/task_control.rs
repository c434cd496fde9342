//! # Example: task_control
//!
//! A tiny debug console: each line is `<task> <command>`.
//!
//! ## Run
//! ```bash
//! cargo run --example task_control
//! ```
//! Then type e.g. `ai start`, `ai pause`, `ai state`, or `tick`, `quit`.

use std::io::{self, BufRead, Write};

use tickvisor::{ControlCommand, Scheduler, TaskFn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut scheduler = Scheduler::new();
    for name in ["ai", "audio", "physics"] {
        scheduler.register_task(TaskFn::new(name, move |ctx| {
            println!("  {name} runs on tick {}", ctx.ticks());
            Ok(())
        }))?;
    }

    println!("{}", ControlCommand::usage());
    let stdin = io::stdin();
    let mut out = io::stdout();
    write!(out, "> ")?;
    out.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] => break,
            ["tick"] => scheduler.execute_tasks()?,
            [task, command] => match command.parse::<ControlCommand>() {
                Ok(cmd) => match scheduler.control(task, cmd) {
                    Ok(outcome) => println!("{task}: {outcome}"),
                    Err(err) => println!("error: {err}"),
                },
                Err(err) => println!("error: {err}; {}", ControlCommand::usage()),
            },
            _ => println!("{}", ControlCommand::usage()),
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}
