use crate::core::{Direction, GridLoc, LevelController, ObjectKind};
use crate::models::LevelRenderState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>>
{
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_level(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &LevelController,
    state: &LevelRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        let title = format!(
            "Level {}/{} | steps: {}{}",
            state.level_index + 1,
            state.level_count,
            state.steps,
            if state.animating { " | moving" } else { "" }
        );
        let level_paragraph = Paragraph::new(render_level_to_string(controller))
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(level_paragraph, chunks[0]);

        let instructions = if state.won {
            "Level complete! N for the next level.".to_string()
        } else {
            "WASD/arrows to move, R restart, N/P next/previous level, Q quit".to_string()
        };
        let instructions = if let Some(outcome) = &state.last_outcome {
            format!("{} | Last: {:?}", instructions, outcome)
        } else {
            instructions
        };
        let instructions = if let Some(cue) = &state.last_sound {
            format!("{} | Cue: {:?}", instructions, cue)
        } else {
            instructions
        };

        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[1]);
    })?;
    Ok(())
}

/// Top-down projection of the lattice: for every (row, column) the glyph
/// of the highest occupant, or the pad marker if the column only holds a
/// pad. Floors collapse; this is a play aid, not the level grammar.
pub fn render_level_to_string(controller: &LevelController) -> String {
    let layout = controller.layout();
    let extent = layout.extent;
    let mut result = String::new();
    for z in 0..extent.nz {
        for x in 0..extent.nx {
            let mut ch = ' ';
            for y in (0..extent.ny).rev() {
                let loc = GridLoc::new(z, x, y);
                if let Some(id) = controller.occupant(&loc) {
                    let obj = controller.object(id);
                    ch = match obj.kind {
                        ObjectKind::Gopher => '@',
                        ObjectKind::Box => {
                            if obj.on_pad {
                                'X'
                            } else {
                                'x'
                            }
                        }
                        ObjectKind::Block => ']',
                        ObjectKind::Elevator { .. } => 'e',
                    };
                    break;
                }
            }
            if ch == ' ' && layout.pads.iter().any(|p| p.z == z && p.x == x) {
                ch = 'o';
            }
            result.push(ch);
        }
        result.push('\n');
    }
    result
}

pub enum ConsoleInput {
    Step(Direction),
    Restart,
    NextLevel,
    PrevLevel,
    Quit,
    Timeout,
    Unknown,
}

pub fn handle_input() -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(std::time::Duration::from_millis(50))? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
                KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                    ConsoleInput::Step(Direction::Up)
                }
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                    ConsoleInput::Step(Direction::Down)
                }
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    ConsoleInput::Step(Direction::Left)
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    ConsoleInput::Step(Direction::Right)
                }
                KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::Restart,
                KeyCode::Char('n') | KeyCode::Char('N') => ConsoleInput::NextLevel,
                KeyCode::Char('p') | KeyCode::Char('P') => ConsoleInput::PrevLevel,
                _ => ConsoleInput::Unknown,
            });
        }
    }
    Ok(ConsoleInput::Timeout)
}
