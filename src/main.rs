// Terminal front-end for the grid puzzle engine.
// Controls: WASD/arrows to step, R restart, N/P level navigation, Q quit.
// The simulation itself lives in core; this binary only maps key input to
// grid-relative steps, drives the animation ticks, and draws projections.

mod console_interface;
mod core;
mod models;
mod test;
mod user_data;

use crate::console_interface::ConsoleInput::*;
use crate::console_interface::{
    cleanup_terminal, handle_input, render_level, setup_terminal,
};
use crate::core::{GameEvent, LevelController, LevelLayout, parse_level};
use crate::models::LevelRenderState;
use crate::user_data::UserData;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const LEVELS: &[&str] = &[
    include_str!("../levels/01_corridor.txt"),
    include_str!("../levels/02_stack.txt"),
    include_str!("../levels/03_elevator.txt"),
    include_str!("../levels/04_twin_pads.txt"),
];

const USER_DATA_FILE: &str = "gopher-user-data.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("initializing");

    let mut user_data = UserData::load_or_default(Path::new(USER_DATA_FILE));

    let layouts = LEVELS
        .iter()
        .enumerate()
        .map(|(i, text)| {
            parse_level(text).map_err(|err| format!("level {}: {}", i + 1, err))
        })
        .collect::<Result<Vec<LevelLayout>, _>>()?;

    let mut terminal = setup_terminal()?;
    let result = run_interactive(&mut terminal, &layouts, &mut user_data);
    cleanup_terminal()?;

    user_data.save(Path::new(USER_DATA_FILE))?;
    result
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_interactive(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    layouts: &[LevelLayout],
    user_data: &mut UserData,
) -> Result<(), Box<dyn std::error::Error>> {
    let level_count = layouts.len();
    let mut leveln = user_data.last_level.min(level_count - 1);
    let mut controller = LevelController::new(layouts[leveln].clone());

    let mut won = false;
    let mut last_outcome = None;
    let mut last_sound = None;
    let mut last_tick = Instant::now();

    loop {
        let mut switch_to: Option<usize> = None;
        match handle_input()? {
            Quit => break,
            Step(dir) => {
                last_outcome = Some(controller.step(dir));
            }
            Restart => {
                // Restart is a no-op until the first step, like the original.
                if controller.steps() > 0 {
                    controller.restart(true);
                }
            }
            NextLevel => {
                if leveln + 1 < level_count && user_data.last_unlocked_level > leveln {
                    switch_to = Some(leveln + 1);
                }
            }
            PrevLevel => {
                if leveln > 0 {
                    switch_to = Some(leveln - 1);
                }
            }
            Timeout | Unknown => {}
        }

        // Drive the animation scheduler with wall-clock time.
        let now = Instant::now();
        controller.update(now.duration_since(last_tick).as_secs_f32());
        last_tick = now;

        for event in controller.drain_events() {
            match event {
                GameEvent::Sound { cue, .. } => last_sound = Some(cue),
                GameEvent::LevelComplete => {
                    info!(level = leveln + 1, "level complete");
                    won = true;
                    if user_data.last_unlocked_level == leveln {
                        user_data.last_unlocked_level = leveln + 1;
                        if let Err(err) = user_data.save(Path::new(USER_DATA_FILE)) {
                            warn!(%err, "failed to save user data");
                        }
                    }
                }
                GameEvent::LevelRestarted => won = false,
                _ => {}
            }
        }

        if let Some(n) = switch_to {
            leveln = n;
            user_data.last_level = n;
            controller = LevelController::new(layouts[leveln].clone());
            won = false;
            last_outcome = None;
            last_sound = None;
        }

        render_level(
            terminal,
            &controller,
            &LevelRenderState {
                level_index: leveln,
                level_count,
                steps: controller.steps(),
                animating: controller.is_animating(),
                won,
                last_outcome,
                last_sound,
            },
        )?;
    }

    Ok(())
}
