use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uvm_runtime::DumpRange;
use uvm_spec::DEFAULT_MEMORY_SIZE;

#[derive(Debug, Parser)]
#[command(name = "uvm", version, about = "Assembler and virtual machine for the UVM instruction set")]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Assemble a source file into a binary and a JSON log
    Assemble {
        /// Assembly source file
        source: PathBuf,
        /// Output binary file
        #[arg(short, long)]
        output: PathBuf,
        /// Output log file
        #[arg(short, long)]
        log: PathBuf,
    },
    /// Execute a binary and dump a range of memory
    Run {
        /// Binary file to execute
        binary: PathBuf,
        /// Number of memory cells
        #[arg(long, default_value_t = DEFAULT_MEMORY_SIZE)]
        memory_size: usize,
        /// Memory cells to dump, as lo..hi or lo:hi
        #[arg(long)]
        dump: DumpRange,
        /// Write the dump here instead of stdout
        #[arg(short, long)]
        result: Option<PathBuf>,
        /// Log every executed instruction
        #[arg(long)]
        trace: bool,
    },
    /// Print a listing of a binary
    Disasm {
        /// Binary file to disassemble
        binary: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    // ========================================================================
    // Subcommands
    // ========================================================================

    #[test]
    fn test_parse_assemble() {
        let cli = parse(&["uvm", "assemble", "prog.asm", "-o", "prog.bin", "-l", "prog.json"]);
        assert!(!cli.verbose);
        match cli.command {
            CliCommand::Assemble { source, output, log } => {
                assert_eq!(source, PathBuf::from("prog.asm"));
                assert_eq!(output, PathBuf::from("prog.bin"));
                assert_eq!(log, PathBuf::from("prog.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_run_defaults() {
        let cli = parse(&["uvm", "run", "prog.bin", "--dump", "200:204"]);
        match cli.command {
            CliCommand::Run { binary, memory_size, dump, result, trace } => {
                assert_eq!(binary, PathBuf::from("prog.bin"));
                assert_eq!(memory_size, 1024);
                assert_eq!(dump, DumpRange::new(200, 204));
                assert_eq!(result, None);
                assert!(!trace);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_run_all_flags() {
        let cli = parse(&[
            "uvm", "-v", "run", "prog.bin", "--memory-size", "64", "--dump", "0..8", "-r",
            "out.json", "--trace",
        ]);
        assert!(cli.verbose);
        match cli.command {
            CliCommand::Run { memory_size, dump, result, trace, .. } => {
                assert_eq!(memory_size, 64);
                assert_eq!(dump, DumpRange::new(0, 8));
                assert_eq!(result, Some(PathBuf::from("out.json")));
                assert!(trace);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_disasm_with_trailing_verbose() {
        let cli = parse(&["uvm", "disasm", "prog.bin", "--verbose"]);
        assert!(cli.verbose);
        match cli.command {
            CliCommand::Disasm { binary } => assert_eq!(binary, PathBuf::from("prog.bin")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    // ========================================================================
    // Dump Ranges
    // ========================================================================

    #[test]
    fn test_dump_separators_agree() {
        let colon = parse(&["uvm", "run", "p.bin", "--dump", "200:204"]);
        let dots = parse(&["uvm", "run", "p.bin", "--dump", "200..204"]);
        match (colon.command, dots.command) {
            (CliCommand::Run { dump: a, .. }, CliCommand::Run { dump: b, .. }) => assert_eq!(a, b),
            other => panic!("unexpected commands: {:?}", other),
        }
    }

    #[test]
    fn test_rejected_arguments() {
        for args in [
            &["uvm", "run", "p.bin", "--dump", "200-204"][..],
            &["uvm", "run", "p.bin", "--dump", "x..4"],
            &["uvm", "run", "p.bin"],
            &["uvm", "run", "p.bin", "--dump", "0..4", "--memory-size", "-1"],
            &["uvm", "assemble", "prog.asm", "-o", "prog.bin"],
            &["uvm"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "accepted {:?}", args);
        }
    }
}
