//! SAP-1 Emulator - CLI Entry Point
//!
//! Commands:
//! - `sap1-emu run <program>` - Run a demo or ROM image until it halts
//! - `sap1-emu demos` - List built-in demo programs
//! - `sap1-emu disasm <program>` - Disassemble a demo or ROM image

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sap1-emu")]
#[command(version)]
#[command(about = "A cycle-accurate emulator of the SAP-1 computer")]
struct Cli {
    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program until it halts
    Run {
        /// Built-in demo name or path to a ROM image
        program: String,
        /// Maximum number of clock phases to run
        #[arg(short, long, default_value = "1000")]
        max_cycles: u64,
        /// Print the machine state after every phase
        #[arg(short, long)]
        trace: bool,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },
    /// List built-in demo programs
    Demos,
    /// Disassemble a program to readable text
    Disasm {
        /// Built-in demo name or path to a ROM image
        program: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Run { program, max_cycles, trace, json }) => {
            run_program(&program, max_cycles, trace, json);
        }
        Some(Commands::Demos) => {
            list_demos();
        }
        Some(Commands::Disasm { program }) => {
            disassemble_program(&program);
        }
        None => {
            println!("SAP-1 Emulator v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            println!();
            run_program("add", 1000, false, false);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(program: &str) -> Vec<u8> {
    match sap1::rom::resolve(program) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_program(program: &str, max_cycles: u64, trace: bool, json: bool) {
    use sap1::Cpu;

    let image = load(program);

    let mut cpu = Cpu::new();
    cpu.reset();
    cpu.load_program(&image);

    let cycles = if trace {
        let mut executed = 0u64;
        while !cpu.is_halted() && executed < max_cycles {
            let phase = cpu.step();
            executed += 1;
            println!("── {:>4} {} ──", executed, phase);
            print!("{}", cpu.snapshot());
        }
        executed
    } else {
        cpu.run(max_cycles)
    };

    if json {
        match serde_json::to_string_pretty(&cpu.snapshot()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("error: failed to encode state: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("━━━ {} ━━━", program);
    print!("{}", cpu.snapshot());
    println!(
        "Phases: {} ({} instructions completed)",
        cycles,
        completed_instructions(cycles, cpu.is_halted())
    );
    println!("OUT = {}", cpu.output());

    if !cpu.is_halted() {
        println!();
        println!("Reached max cycles limit ({}). Use --max-cycles to increase.", max_cycles);
    }
}

/// Instructions finished in a run that started on phase 0.
///
/// HLT stops the machine on its first execute phase, so a halted run counts
/// the partial last cycle; a run cut off by the budget does not.
fn completed_instructions(phases: u64, halted: bool) -> u64 {
    phases / 6 + u64::from(halted)
}

fn list_demos() {
    for demo in sap1::rom::demos::ALL {
        println!("{:<10} {} (OUT = {})", demo.name, demo.description, demo.expected_out);
    }
}

fn disassemble_program(program: &str) {
    let image = load(program);
    print!("{}", sap1::disassemble(&image));
}
