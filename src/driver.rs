use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::emit;
use crate::error::{Error, Result};
use crate::parser::header::read_header_file;

/// Extension the input files must carry.
pub const HEADER_EXT: &str = "h";

/// Extension of the generated binding source.
pub const BINDING_EXT: &str = "pyx";

/// Output path for a header: same directory, base name prefixed with an
/// underscore, binding-source extension.
pub fn output_path(header: &Path) -> PathBuf {
    let stem = header
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or_default();
    header.with_file_name(format!("_{stem}.{BINDING_EXT}"))
}

/// Generate binding sources for a batch of header files.
///
/// Each file runs Reader -> Builder -> Emitter and its output is written to
/// the derived path (or `config.output_file`, valid only for a single-file
/// batch). The batch aborts on the first failing file: a bad extension, a
/// parse failure, or a write failure stops processing, and a file that fails
/// to parse gets no output written. Returns the written paths.
pub fn process(files: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    if config.output_file.is_some() && files.len() > 1 {
        return Err(Error::OutputConflict(files.len()));
    }

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        if file.extension().and_then(OsStr::to_str) != Some(HEADER_EXT) {
            return Err(Error::NotAHeader(file.clone()));
        }

        let header = read_header_file(file)?;
        let data = emit::make(&header, &file.to_string_lossy(), config);

        let outfile = match &config.output_file {
            Some(path) => path.clone(),
            None => output_path(file),
        };
        fs::write(&outfile, data)?;
        debug!(
            input = %file.display(),
            output = %outfile.display(),
            "wrote binding source"
        );
        written.push(outfile);
    }
    Ok(written)
}
