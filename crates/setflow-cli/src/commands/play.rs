//! Interactive guided timer.
//!
//! A 1-second tokio interval drives the engine's `tick()`; stdin lines map
//! to engine transitions. The engine itself owns all timing state - this
//! loop only supplies the clock and the keyboard.

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use setflow_core::{flatten, Config, Event, TimerEngine, TimerState, Unit, Workout};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::format_mmss;
use crate::platform::TerminalPlatform;

pub fn run(file: &Path) -> Result<(), Box<dyn Error>> {
    let workout = Workout::from_json_file(file)?.normalized();
    let activities = flatten(&workout);
    if activities.is_empty() {
        println!("'{}' has no activities to play", workout.title);
        return Ok(());
    }

    let config = Config::load_or_default();
    if config.player.show_plan {
        super::plan::print_table(&activities);
    }
    let bell = config.cues.enabled && config.cues.terminal_bell;
    let mut engine = TimerEngine::new(activities, Box::new(TerminalPlatform::new(bell)));

    println!("commands: enter=done (reps)  p=pause  s=start  r=reset  j <n>=jump  q=quit");
    engine.start();
    print_status(&engine);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let period = Duration::from_secs(1);
        let mut clock = interval_at(Instant::now() + period, period);
        clock.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                _ = clock.tick() => {
                    let event = engine.tick();
                    print_status(&engine);
                    if finished(event.as_ref()) {
                        break;
                    }
                }
                line = lines.next_line() => {
                    let Ok(Some(line)) = line else { break };
                    if !handle_command(&mut engine, line.trim()) {
                        break;
                    }
                    print_status(&engine);
                }
            }
        }
    });
    Ok(())
}

/// Returns false when the player should exit.
fn handle_command(engine: &mut TimerEngine, command: &str) -> bool {
    match command {
        "" | "d" | "done" => {
            let event = engine.complete_reps();
            if finished(event.as_ref()) {
                return false;
            }
        }
        "p" => {
            engine.pause();
        }
        "s" => {
            engine.start();
        }
        "r" => {
            engine.reset();
        }
        "q" => return false,
        other => {
            if let Some(index) = other
                .strip_prefix('j')
                .and_then(|rest| rest.trim().parse::<usize>().ok())
            {
                if engine.jump_to(index).is_none() {
                    eprintln!("no activity at index {index}");
                }
            } else {
                eprintln!("unknown command: {other}");
            }
        }
    }
    true
}

fn finished(event: Option<&Event>) -> bool {
    if let Some(Event::WorkoutCompleted { elapsed_secs, .. }) = event {
        println!("workout complete in {}", format_mmss(*elapsed_secs));
        return true;
    }
    false
}

fn print_status(engine: &TimerEngine) {
    let Some(activity) = engine.current_activity() else {
        return;
    };
    let state = match engine.state() {
        TimerState::Idle => "idle",
        TimerState::Running => "running",
        TimerState::Paused => "paused",
        TimerState::Completed => "done",
    };
    let progress = format!(
        "{} / {}",
        format_mmss(engine.elapsed_secs()),
        format_mmss(engine.total_secs())
    );
    match activity.unit {
        Unit::Time => println!(
            "[{state}] {} ({})  set {}/{}  {} left  |  {progress}",
            activity.name,
            activity.section_name,
            activity.current_set,
            activity.total_sets,
            format_mmss(engine.remaining_secs()),
        ),
        Unit::Reps => println!(
            "[{state}] {} ({})  set {}/{}  {} reps, enter when done  |  {progress}",
            activity.name,
            activity.section_name,
            activity.current_set,
            activity.total_sets,
            activity
                .quantity
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "?".into()),
        ),
    }
}
