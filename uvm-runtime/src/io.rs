//! File entry point and result dump I/O

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use uvm_spec::Word;

use crate::error::Result;
use crate::vm::{DumpRange, ExecutionResult, VMConfig, VM};

/// Serialize dumped cells as a JSON array of integers.
///
/// The dump is JSON rather than YAML: a flat array of cells in address
/// order.
pub fn write_dump<W: Write>(mut writer: W, cells: &[Word]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, cells)?;
    writer.flush()?;
    Ok(())
}

/// Execute a binary file and write `memory[range]` to `result_path`.
///
/// The range is checked before execution starts. The dump is staged next to
/// `result_path` and only moved into place once the VM has halted and the
/// whole dump has been written.
pub fn execute_file(
    binary_path: impl AsRef<Path>,
    result_path: impl AsRef<Path>,
    config: &VMConfig,
    range: DumpRange,
) -> Result<ExecutionResult> {
    range.validate(config.memory_size)?;

    let reader = BufReader::new(File::open(binary_path.as_ref())?);
    let result = VM::new(config.clone()).run(reader)?;

    let cells = result.dump(range)?;
    let mut staged = stage(result_path.as_ref())?;
    write_dump(BufWriter::new(staged.as_file_mut()), &cells)?;
    staged.persist(result_path.as_ref()).map_err(|e| e.error)?;

    tracing::info!(
        binary = %binary_path.as_ref().display(),
        result = %result_path.as_ref().display(),
        steps = result.steps,
        %range,
        "wrote memory dump"
    );

    Ok(result)
}

fn stage(target: &Path) -> io::Result<NamedTempFile> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    NamedTempFile::new_in(dir)
}
