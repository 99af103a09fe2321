use rand::Rng;
use serde::{Serialize, Deserialize};
use crate::activation::activation::ActivationFunction;
use crate::network::network::Network;

/// Describes one layer in a network specification.
///
/// Fields:
/// - `in_features`  — feature width feeding into this layer (the previous
///                    layer's output width, or the raw input dimension for
///                    the first layer)
/// - `out_features` — feature width this layer produces
/// - `activation`   — activation function applied after the affine map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    pub in_features: usize,
    pub out_features: usize,
    pub activation: ActivationFunction,
}

/// A fully serializable description of a network architecture.
///
/// `NetworkSpec` can be saved to / loaded from JSON independently of any
/// sampled weights, making it possible to store an architecture and build
/// fresh networks from it later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name; also used as the exported graph name.
    pub name: String,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    /// Samples parameters from `rng` and builds the described network.
    pub fn build(&self, rng: &mut impl Rng) -> Result<Network, String> {
        let triples = self.layers.iter()
            .map(|l| (l.in_features, l.out_features, l.activation.clone()))
            .collect();
        Network::new(triples, rng)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
