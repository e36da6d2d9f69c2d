//! Main assembler logic

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use uvm_spec::Program;

use crate::error::Result;
use crate::log::{write_log, LogRecord};
use crate::parser::parse_line;
use crate::encoder::resolve;

/// Output of one successful assembler run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub program: Program,
    /// Binary instruction stream
    pub binary: Vec<u8>,
    /// One record per instruction, in source order
    pub log: Vec<LogRecord>,
}

/// Drop everything from the first `#`
fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(code, _)| code)
}

/// Assemble source code into a program.
///
/// Fails on the first bad line; no partial output is returned.
pub fn assemble(source: &str) -> Result<Assembly> {
    let mut program = Program::default();
    let mut binary = Vec::new();
    let mut log = Vec::new();

    for (line_num, line) in source.lines().enumerate() {
        let line_num = line_num + 1;
        let code = strip_comment(line);

        let instr = match parse_line(code).and_then(|parsed| parsed.map(|p| resolve(&p)).transpose()) {
            Ok(Some(instr)) => instr,
            Ok(None) => continue,
            Err(e) => {
                let e = e.at_line(line_num);
                tracing::warn!(line = line_num, error = %e, "assembly failed");
                return Err(e);
            }
        };

        let start = binary.len();
        instr.encode_into(&mut binary);
        log.push(LogRecord::new(&instr, &binary[start..]));
        program.push(instr);
    }

    tracing::debug!(
        instructions = program.len(),
        bytes = binary.len(),
        "assembled program"
    );

    Ok(Assembly { program, binary, log })
}

/// Temporary file in the same directory as `target`, so that persisting it
/// is a rename
fn stage(target: &Path) -> io::Result<NamedTempFile> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    NamedTempFile::new_in(dir)
}

/// Assemble a source file, writing the binary stream and the JSON log.
///
/// Both outputs are staged next to their targets and only moved into place
/// once the whole source has assembled and both have been written. If the
/// log cannot be moved into place the binary is removed again.
pub fn assemble_file(
    source_path: impl AsRef<Path>,
    binary_path: impl AsRef<Path>,
    log_path: impl AsRef<Path>,
) -> Result<Assembly> {
    let (binary_path, log_path) = (binary_path.as_ref(), log_path.as_ref());
    let source = fs::read_to_string(source_path.as_ref())?;
    let assembly = assemble(&source)?;

    let mut binary = stage(binary_path)?;
    binary.write_all(&assembly.binary)?;
    let mut log = stage(log_path)?;
    write_log(BufWriter::new(log.as_file_mut()), &assembly.log)?;

    binary.persist(binary_path).map_err(|e| e.error)?;
    if let Err(e) = log.persist(log_path) {
        let _ = fs::remove_file(binary_path);
        tracing::warn!(log = %log_path.display(), error = %e.error, "failed to write log");
        return Err(e.error.into());
    }

    tracing::info!(
        source = %source_path.as_ref().display(),
        binary = %binary_path.display(),
        instructions = assembly.program.len(),
        "wrote assembled program"
    );

    Ok(assembly)
}
