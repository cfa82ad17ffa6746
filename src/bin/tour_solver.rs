use anyhow::Context;
use clap::Parser;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{execute, queue};
use jump_tour_solver::engine::{build_graph, Cell, MoveGraph};
use jump_tour_solver::render::{
    placed_cell, Frame, Frames, TourGrid, CELL_WIDTH, OPEN_CELL, UNREACHABLE_CELL,
};
use jump_tour_solver::solver::{search_with_budget, Termination};
use jump_tour_solver::utils::{parse_cell, random_start, verify_path};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

/// Row of the terminal where the animated grid starts.
const GRID_TOP: u16 = 2;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board size (the board is SIZE x SIZE)
    #[clap(short, long, default_value_t = 10)]
    size: usize,

    /// Start cell as ROW,COL; chosen at random when omitted
    #[clap(long, value_parser = parse_cell)]
    start: Option<Cell>,

    /// Seed for the random start cell
    #[clap(long)]
    seed: Option<u64>,

    /// Stop the search after this many visited cells
    #[clap(long)]
    budget: Option<u64>,

    /// Replay the tour step by step in the terminal
    #[clap(short, long)]
    animate: bool,

    /// Delay between animation frames in milliseconds
    #[clap(long, default_value_t = 500)]
    delay_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Playback {
    Continue,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyAction {
    TogglePause,
    Quit,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.size == 0 {
        anyhow::bail!("Board size must be at least 1");
    }

    let stopwatch = Instant::now();
    let graph = build_graph(args.size);

    let start = match args.start {
        Some(cell) => cell,
        None => {
            let mut rng = match args.seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            random_start(args.size, &mut rng).context("Board has no cells to start from")?
        }
    };
    println!("Start position: {}", start);

    let solution = search_with_budget(&graph, start, args.budget)?;

    print!("{}", TourGrid::from_path(&solution.path, args.size));
    println!(
        "Search {}: {} cells visited, {} backtracks",
        solution.termination, solution.nodes_visited, solution.backtracks
    );
    println!("Finished in: {} ms\n", stopwatch.elapsed().as_millis());

    match solution.termination {
        Termination::Complete => {
            verify_path(&solution.path, args.size).context("Solver returned an invalid tour")?;
        }
        Termination::Exhausted => {
            eprintln!(
                "No tour of the {n}x{n} board starts at {}.",
                start,
                n = args.size
            );
        }
        Termination::BudgetExceeded => {
            eprintln!(
                "Warning: visit budget reached; showing the partial path of {} cells.",
                solution.path.len()
            );
        }
    }

    if args.animate && !solution.path.is_empty() {
        animate(&graph, &solution.path, Duration::from_millis(args.delay_ms))?;
    }

    Ok(())
}

/// Plays the path back in the terminal, restoring the terminal state afterwards.
fn animate(graph: &MoveGraph, path: &[Cell], delay: Duration) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().context("Failed to switch the terminal to raw mode")?;

    let result = play(&mut stdout, graph, path, delay);

    let raw_off = disable_raw_mode();
    let shown = execute!(stdout, ResetColor, Show);
    println!();
    result.context("Animation failed")?;
    raw_off.context("Failed to restore the terminal")?;
    shown.context("Failed to restore the terminal")?;
    Ok(())
}

fn play(stdout: &mut Stdout, graph: &MoveGraph, path: &[Cell], delay: Duration) -> io::Result<()> {
    let size = graph.size();
    let status_row = GRID_TOP + size as u16 + 1;

    queue!(
        stdout,
        Hide,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetForegroundColor(Color::White),
        Print("Tour animation (space: pause, q: quit)")
    )?;
    for r in 0..size {
        queue!(
            stdout,
            MoveTo(0, GRID_TOP + r as u16),
            Print(UNREACHABLE_CELL.repeat(size))
        )?;
    }
    stdout.flush()?;

    for frame in Frames::new(graph, path) {
        draw_frame(stdout, &frame)?;
        stdout.flush()?;
        if wait(stdout, delay, status_row)? == Playback::Quit {
            break;
        }
    }

    queue!(stdout, ResetColor, MoveTo(0, status_row + 1))?;
    stdout.flush()
}

fn cell_position(cell: Cell) -> MoveTo {
    MoveTo((cell.col * CELL_WIDTH) as u16, GRID_TOP + cell.row as u16)
}

/// Draws one step: green markers on open cells, the new move number, red dots elsewhere.
fn draw_frame(stdout: &mut Stdout, frame: &Frame) -> io::Result<()> {
    for &cell in &frame.open {
        queue!(
            stdout,
            cell_position(cell),
            SetForegroundColor(Color::Green),
            Print(OPEN_CELL)
        )?;
    }

    queue!(
        stdout,
        cell_position(frame.current),
        SetForegroundColor(Color::White),
        Print(placed_cell(frame.order()))
    )?;

    for &cell in &frame.unreachable {
        queue!(
            stdout,
            cell_position(cell),
            SetForegroundColor(Color::Red),
            Print(UNREACHABLE_CELL)
        )?;
    }
    Ok(())
}

fn key_action(key: &KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }
        KeyCode::Char(' ') => Some(KeyAction::TogglePause),
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
        _ => None,
    }
}

/// Sleeps for `delay` while listening for pause and quit keys.
fn wait(stdout: &mut Stdout, delay: Duration, status_row: u16) -> io::Result<Playback> {
    let deadline = Instant::now() + delay;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            return Ok(Playback::Continue);
        }
        if let Event::Key(key) = event::read()? {
            match key_action(&key) {
                Some(KeyAction::Quit) => return Ok(Playback::Quit),
                Some(KeyAction::TogglePause) => {
                    if pause(stdout, status_row)? == Playback::Quit {
                        return Ok(Playback::Quit);
                    }
                }
                None => {}
            }
        }
    }
}

/// Blocks until space is pressed again.
fn pause(stdout: &mut Stdout, status_row: u16) -> io::Result<Playback> {
    queue!(
        stdout,
        MoveTo(0, status_row),
        SetForegroundColor(Color::White),
        Print("Animation paused. Press space to continue...")
    )?;
    stdout.flush()?;

    loop {
        if let Event::Key(key) = event::read()? {
            match key_action(&key) {
                Some(KeyAction::TogglePause) => break,
                Some(KeyAction::Quit) => return Ok(Playback::Quit),
                None => {}
            }
        }
    }

    queue!(stdout, MoveTo(0, status_row), Clear(ClearType::CurrentLine))?;
    stdout.flush()?;
    Ok(Playback::Continue)
}
