mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, CliCommand};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};
use uvm_runtime::{execute_file, write_dump, DumpRange, VMConfig, VM};
use uvm_spec::encoding::to_hex;

fn setup_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let sub = Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr));
    tracing::subscriber::set_global_default(sub).context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Run `binary` and write `memory[dump]` to `writer` as a JSON line.
///
/// The range is checked before the binary is read.
fn run_to_writer<W: Write>(
    binary: &Path,
    config: VMConfig,
    dump: DumpRange,
    mut writer: W,
) -> Result<()> {
    dump.validate(config.memory_size)?;
    let bytes =
        fs::read(binary).with_context(|| format!("Failed to read {}", binary.display()))?;
    let outcome = VM::new(config)
        .run(bytes.as_slice())
        .with_context(|| format!("Failed to execute {}", binary.display()))?;
    write_dump(&mut writer, &outcome.dump(dump)?)?;
    writeln!(writer)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose)?;

    match cli.command {
        CliCommand::Assemble { source, output, log } => {
            let assembly = uvm_assembler::assemble_file(&source, &output, &log)
                .with_context(|| format!("Failed to assemble {}", source.display()))?;
            tracing::info!(
                instructions = assembly.program.len(),
                bytes = assembly.binary.len(),
                digest = %to_hex(&assembly.program.digest()),
                "assembled"
            );
        }
        CliCommand::Run {
            binary,
            memory_size,
            dump,
            result,
            trace,
        } => {
            let config = VMConfig { memory_size, trace };
            match result {
                Some(result_path) => {
                    execute_file(&binary, &result_path, &config, dump)
                        .with_context(|| format!("Failed to execute {}", binary.display()))?;
                }
                None => run_to_writer(&binary, config, dump, io::stdout().lock())?,
            }
        }
        CliCommand::Disasm { binary } => {
            let bytes = fs::read(&binary)
                .with_context(|| format!("Failed to read {}", binary.display()))?;
            let listing = uvm_disassembler::disassemble(&bytes)
                .with_context(|| format!("Failed to disassemble {}", binary.display()))?;
            print!("{}", listing);
        }
    }

    Ok(())
}
