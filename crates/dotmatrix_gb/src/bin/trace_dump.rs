use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};

use dotmatrix_gb::GameBoy;

/// Steps a ROM for a fixed number of instructions, printing one
/// reference-log line per step. When a reference log is supplied, each line
/// is diffed against it and the run stops at the first discrepancy.
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path: PathBuf = args.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("Usage: trace_dump <rom_path> [steps] [reference_log]");
        std::process::exit(2);
    });
    let steps: u64 = args
        .next()
        .map(|s| {
            s.parse().unwrap_or_else(|_| {
                eprintln!("Invalid step count; expected an integer.");
                std::process::exit(2);
            })
        })
        .unwrap_or(100_000);
    let log_path: Option<PathBuf> = args.next().map(PathBuf::from);

    let mut gb = GameBoy::from_rom_file(&rom_path)?;

    let mut reference = match &log_path {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open reference log '{}'", path.display()))?;
            Some(BufReader::new(file).lines())
        }
        None => None,
    };

    for executed in 0..steps {
        let line = gb.trace_line();

        if let Some(lines) = reference.as_mut() {
            match lines.next() {
                Some(expected) => {
                    let expected = expected.context("failed to read reference log line")?;
                    if expected != line {
                        println!("discrepancy after {executed} steps at PC {:#06x}:", gb.cpu.regs.pc);
                        println!("  log: {expected}");
                        println!("  cpu: {line}");
                        std::process::exit(1);
                    }
                }
                None => {
                    println!("reference log exhausted after {executed} steps; assuming correct");
                    break;
                }
            }
        } else {
            println!("{line}");
        }

        gb.step();

        if gb.cpu.hit_unknown_opcode() {
            eprintln!("stopping: unimplemented opcode at {:#06x}", gb.cpu.snapshot().pc);
            break;
        }
    }

    if !gb.serial_output().is_empty() {
        println!("serial: {}", gb.serial_output());
    }

    Ok(())
}
