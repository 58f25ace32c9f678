use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use pyxgen::Config;
use pyxgen::driver;

#[derive(Parser)]
#[command(name = "pyxgen")]
#[command(about = "Generate Cython bindings from plain-data C++ headers")]
struct Args {
    /// Input header files
    #[arg(required = true)]
    headers: Vec<PathBuf>,

    /// Template set to use (only "single" exists today)
    #[arg(short, long, default_value = "single")]
    template: String,

    /// Override the mirrored C++ type name
    #[arg(long)]
    class_cpp: Option<String>,

    /// Override the Python-facing wrapper name
    #[arg(long)]
    class_py: Option<String>,

    /// Write the generated source here instead of next to the header
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Component value range recorded in the generated preamble
    #[arg(long, default_value_t = 1.0)]
    range: f64,

    /// Docstring attached to the generated wrapper class
    #[arg(long, default_value = "")]
    doc: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if args.template != "single" {
        anyhow::bail!("unknown template: {}", args.template);
    }

    let config = Config {
        class_cpp: args.class_cpp,
        class_py: args.class_py,
        output_file: args.output_file,
        range: args.range,
        class_documentation: args.doc,
    };

    let written = driver::process(&args.headers, &config)?;
    for path in &written {
        println!("wrote {}", path.display());
    }
    Ok(())
}
