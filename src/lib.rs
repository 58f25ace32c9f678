pub mod config;
pub mod driver;
pub mod emit;
pub mod error;
pub mod model;
pub mod parser;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{EnumDecl, HeaderModel, StructDecl};
pub use parser::header::read_header_file;
