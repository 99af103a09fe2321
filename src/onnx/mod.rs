pub mod export;
pub mod wire;

pub use export::{encode_model, export_to_file, ExportOptions, DEFAULT_OPSET_VERSION};
