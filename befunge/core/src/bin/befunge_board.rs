use anyhow::{Context, Result};
use befunge_core::{load_program, Machine, MachineConfig, MachineSnapshot, Value, WIDTH};
use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{PrintStyledContent, Stylize},
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{stdout, IsTerminal, Write};
use std::path::PathBuf;
use std::thread::sleep;
use std::time::{Duration, Instant};

/// A pointer circling a square; shown when no program is given.
const DEMO_PROGRAM: &str = ">   v\n\n\n^   <";
const STACK_PREVIEW: usize = 16;
/// Unbounded plain runs stop here so non-halting programs still print.
const PLAIN_TICK_CAP: u64 = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "befunge-board")]
#[command(about = "Watch the befunge machine walk its grid", long_about = None)]
struct Args {
    /// Program source file (`-` reads stdin); runs a demo loop when omitted
    program: Option<PathBuf>,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,

    /// Stop ticking after this many ticks (0 = unbounded)
    #[arg(long, default_value_t = 0)]
    max_ticks: u64,

    /// Seed for the `?` opcode
    #[arg(long)]
    seed: Option<u64>,

    /// Plain output: run without redrawing and print the final board once
    #[arg(long, default_value_t = false)]
    no_tty: bool,
}

struct TerminalGuard {
    use_tty: bool,
}

impl TerminalGuard {
    fn enter(use_tty: bool) -> Result<Self> {
        if use_tty {
            let mut out = stdout();
            crossterm::terminal::enable_raw_mode()?;
            crossterm::execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
            out.flush()?;
        }
        Ok(Self { use_tty })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.use_tty {
            let mut out = stdout();
            let _ = crossterm::execute!(out, Show, LeaveAlternateScreen);
            let _ = crossterm::terminal::disable_raw_mode();
        }
    }
}

fn format_stack(stack: &[Value]) -> String {
    let skip = stack.len().saturating_sub(STACK_PREVIEW);
    let shown: Vec<String> = stack[skip..].iter().map(Value::to_string).collect();
    let prefix = if skip > 0 { "... " } else { "" };
    format!("{prefix}[{}]", shown.join(", "))
}

fn status_line(snapshot: &MachineSnapshot) -> String {
    let (x, y) = snapshot.pos;
    let state = if snapshot.halted { "halted" } else { "running" };
    let mode = if snapshot.string_mode { " string" } else { "" };
    format!(
        "{state}{mode} tick={ticks} pos=({x},{y}) dir={dir} (q to quit)",
        ticks = snapshot.ticks,
        dir = snapshot.direction,
    )
}

fn render_tty(snapshot: &MachineSnapshot) -> Result<()> {
    let mut out = stdout();
    let (px, py) = snapshot.pos;
    crossterm::queue!(out, MoveTo(0, 0))?;
    for (row_idx, row) in snapshot.rows().enumerate() {
        crossterm::queue!(out, MoveTo(0, row_idx as u16), Clear(ClearType::CurrentLine))?;
        for (col_idx, cell) in row.chars().enumerate() {
            // Printable placeholder for control characters written by `p`.
            let glyph = if cell.is_control() { '?' } else { cell };
            if (col_idx, row_idx) == (px, py) {
                crossterm::queue!(out, PrintStyledContent(glyph.to_string().reverse()))?;
            } else {
                write!(out, "{glyph}")?;
            }
        }
    }
    let base = snapshot.rows().count() as u16 + 1;
    let lines = [
        status_line(snapshot),
        format!("stack: {}", format_stack(&snapshot.stack)),
        format!("output: {}", snapshot.output.replace('\n', " | ")),
    ];
    for (offset, line) in lines.iter().enumerate() {
        let clipped: String = line.chars().take(WIDTH).collect();
        crossterm::queue!(
            out,
            MoveTo(0, base + offset as u16),
            Clear(ClearType::CurrentLine)
        )?;
        write!(out, "{clipped}")?;
    }
    out.flush()?;
    Ok(())
}

fn render_plain(snapshot: &MachineSnapshot) -> Result<()> {
    let mut out = stdout().lock();
    for row in snapshot.rows() {
        writeln!(out, "{}", row.trim_end())?;
    }
    writeln!(out)?;
    writeln!(out, "{}", status_line(snapshot))?;
    writeln!(out, "stack: {}", format_stack(&snapshot.stack))?;
    writeln!(out, "output: {}", snapshot.output)?;
    out.flush()?;
    Ok(())
}

fn quit_requested(timeout: Duration) -> Result<bool> {
    if !event::poll(timeout)? {
        return Ok(false);
    }
    let quit = match event::read()? {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => {
            matches!(code, KeyCode::Char('q') | KeyCode::Esc)
                || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
        }
        _ => false,
    };
    Ok(quit)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let source = match &args.program {
        Some(path) => load_program(path)
            .with_context(|| format!("reading program {}", path.display()))?,
        None => DEMO_PROGRAM.to_string(),
    };

    let use_tty = !args.no_tty && stdout().is_terminal();
    let mut config = MachineConfig {
        seed: args.seed,
        ..MachineConfig::default()
    };
    // Tick tracing would scribble over the board.
    config.trace &= !use_tty;
    let mut machine = Machine::with_config(&source, config);
    let limit_reached = |machine: &Machine| args.max_ticks > 0 && machine.ticks() >= args.max_ticks;

    if !use_tty {
        while !machine.is_halted() && !limit_reached(&machine) {
            machine.tick();
            if machine.ticks() >= PLAIN_TICK_CAP {
                break;
            }
        }
        return render_plain(&machine.snapshot());
    }

    let interval = Duration::from_millis(args.interval_ms.max(1));
    let _guard = TerminalGuard::enter(true)?;
    render_tty(&machine.snapshot())?;
    loop {
        let started = Instant::now();
        if quit_requested(interval)? {
            break;
        }
        // Keep the cadence steady even when a key event cut the poll short.
        if let Some(rest) = interval.checked_sub(started.elapsed()) {
            sleep(rest);
        }
        if !machine.is_halted() && !limit_reached(&machine) {
            machine.tick();
        }
        render_tty(&machine.snapshot())?;
    }
    Ok(())
}
