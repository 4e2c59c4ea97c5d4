use anyhow::{Context, Result};
use befunge_core::{load_program, run_until_halted, CoreError, Machine, MachineConfig};
use clap::{ArgAction, Parser};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "befunge")]
#[command(about = "Run a program on the 80x25 befunge machine until it halts", long_about = None)]
struct Args {
    /// Program source file (`-` reads stdin)
    program: PathBuf,

    /// Give up after this many ticks
    #[arg(long, default_value_t = 1_000_000)]
    max_ticks: u64,

    /// Seed for the `?` opcode (defaults to OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final machine snapshot as JSON instead of the output text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Log every tick to stderr (same as BEFUNGE_TRACE=1)
    #[arg(long, action = ArgAction::SetTrue)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let source = load_program(&args.program)
        .with_context(|| format!("reading program {}", args.program.display()))?;

    let mut config = MachineConfig {
        seed: args.seed,
        ..MachineConfig::default()
    };
    config.trace |= args.trace;
    let mut machine = Machine::with_config(&source, config);

    let outcome = run_until_halted(&mut machine, args.max_ticks);
    let mut out = io::stdout().lock();
    if args.json {
        writeln!(out, "{}", machine.snapshot().to_json()?)?;
    } else {
        write!(out, "{}", machine.output())?;
    }
    out.flush()?;

    match outcome {
        Ok(ticks) => {
            if config.trace {
                eprintln!("[funge-run] halted after {ticks} ticks");
            }
            Ok(())
        }
        Err(err @ CoreError::TickLimit { .. }) => {
            let (x, y) = machine.pos();
            let depth = machine.stack().len();
            Err(err).context(format!("pointer at ({x},{y}) with stack depth {depth}"))
        }
        Err(err) => Err(err.into()),
    }
}
