// Builds a two-layer feed-forward network, runs one forward pass on random
// input, and exports the model graph to ONNX:
//   cargo run
// The run is seeded, so repeated runs print the same output and write the
// same model.onnx.

use hematite_nn::{onnx, ActivationFunction, ExportOptions, Matrix, Network};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;

const SEED: u64 = 42;
const ONNX_PATH: &str = "model.onnx";

fn main() -> io::Result<()> {
    let mut rng = StdRng::seed_from_u64(SEED);

    let network = Network::new(vec![
        (4, 8, ActivationFunction::ReLU),
        (8, 4, ActivationFunction::Identity),
    ], &mut rng)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let dummy_input = Matrix::randn(1, 4, &mut rng);
    let output = network.forward(&dummy_input);

    println!("input:  {:?}", dummy_input.data[0]);
    println!("output: {:?}", output.data[0]);

    let options = ExportOptions {
        graph_name: "basic_mlp".to_owned(),
        ..ExportOptions::default()
    };
    onnx::export_to_file(&network, &options, ONNX_PATH)?;
    println!("exported ONNX model to {ONNX_PATH}");

    Ok(())
}
