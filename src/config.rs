use std::path::PathBuf;

/// Per-batch generation settings, passed explicitly into the driver.
///
/// `class_cpp` and `class_py` override the mirrored C++ type name and the
/// Python-facing wrapper name taken from the header; `output_file` replaces
/// the derived output path and is only valid for single-file batches.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub class_cpp: Option<String>,
    pub class_py: Option<String>,
    pub output_file: Option<PathBuf>,
    /// Component value range recorded in the generated preamble.
    pub range: f64,
    /// Docstring attached to the generated wrapper class, empty for none.
    pub class_documentation: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            class_cpp: None,
            class_py: None,
            output_file: None,
            range: 1.0,
            class_documentation: String::new(),
        }
    }
}
