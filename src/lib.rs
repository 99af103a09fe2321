pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod onnx;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::linear::Linear;
pub use network::network::Network;
pub use network::spec::{NetworkSpec, LayerSpec};
pub use onnx::export::{encode_model, export_to_file, ExportOptions};
