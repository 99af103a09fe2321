use rand::Rng;
use serde::{Serialize, Deserialize};
use crate::{activation::activation::ActivationFunction, layers::linear::Linear, math::matrix::Matrix};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Linear>,
}

impl Network {
    /// Builds a network from (in_features, out_features, activation) triples.
    ///
    /// Consecutive layers must chain: each layer's `in_features` has to equal
    /// the previous layer's `out_features`. The check runs once here so a
    /// constructed network can never hit a shape mismatch at forward time.
    pub fn new(
        layer_specs: Vec<(usize, usize, ActivationFunction)>,
        rng: &mut impl Rng,
    ) -> Result<Network, String> {
        if layer_specs.is_empty() {
            return Err("A network needs at least one layer.".to_owned());
        }

        for (i, window) in layer_specs.windows(2).enumerate() {
            let prev_out = window[0].1;
            let next_in = window[1].0;
            if prev_out != next_in {
                return Err(format!(
                    "Layer {} outputs {} features but layer {} expects {}.",
                    i, prev_out, i + 1, next_in
                ));
            }
        }

        let layers = layer_specs.into_iter()
            .map(|(in_features, out_features, activation)| {
                Linear::new(in_features, out_features, activation, rng)
            })
            .collect();
        Ok(Network { layers })
    }

    /// Sequential forward pass over all layers.
    pub fn forward(&self, input: &Matrix) -> Matrix {
        let mut current = input.clone();
        for layer in &self.layers {
            current = layer.forward(&current);
        }
        current
    }

    /// Feature width the network consumes.
    pub fn in_features(&self) -> usize {
        self.layers[0].in_features
    }

    /// Feature width the network produces.
    pub fn out_features(&self) -> usize {
        self.layers[self.layers.len() - 1].out_features
    }

    /// Serializes the network (architecture + weights) to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
