// Native JSON persistence of networks and architecture specs.

use approx::assert_relative_eq;
use hematite_nn::{ActivationFunction, LayerSpec, Matrix, Network, NetworkSpec};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn temp_path(stem: &str) -> String {
    std::env::temp_dir()
        .join(format!("hematite_{}_{}.json", stem, std::process::id()))
        .to_str()
        .unwrap()
        .to_owned()
}

fn mlp_spec() -> NetworkSpec {
    NetworkSpec {
        name: "basic_mlp".to_owned(),
        layers: vec![
            LayerSpec { in_features: 4, out_features: 8, activation: ActivationFunction::ReLU },
            LayerSpec { in_features: 8, out_features: 4, activation: ActivationFunction::Identity },
        ],
    }
}

#[test]
fn network_round_trips_through_json() {
    let mut rng = StdRng::seed_from_u64(21);
    let network = mlp_spec().build(&mut rng).unwrap();
    let path = temp_path("network");

    network.save_json(&path).unwrap();
    let restored = Network::load_json(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(restored.layers.len(), 2);
    assert_eq!(restored.layers[0].weight, network.layers[0].weight);

    // The restored network computes the same function.
    let input = Matrix::randn(2, 4, &mut rng);
    let expected = network.forward(&input);
    let actual = restored.forward(&input);
    for i in 0..expected.rows {
        for j in 0..expected.cols {
            assert_relative_eq!(actual.data[i][j], expected.data[i][j]);
        }
    }
}

#[test]
fn spec_round_trips_through_json_and_builds() {
    let path = temp_path("spec");
    mlp_spec().save_json(&path).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"in_features\""), "unexpected JSON shape: {json}");
    assert!(json.contains("\"ReLU\""), "unexpected JSON shape: {json}");

    let restored = NetworkSpec::load_json(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(restored.name, "basic_mlp");

    let network = restored.build(&mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(network.in_features(), 4);
    assert_eq!(network.out_features(), 4);
    assert_eq!(network.layers[0].weight.rows, 8);
    assert_eq!(network.layers[0].weight.cols, 4);
}

#[test]
fn spec_build_is_deterministic_for_a_fixed_seed() {
    let a = mlp_spec().build(&mut StdRng::seed_from_u64(33)).unwrap();
    let b = mlp_spec().build(&mut StdRng::seed_from_u64(33)).unwrap();
    assert_eq!(a.layers[0].weight, b.layers[0].weight);
    assert_eq!(a.layers[1].bias, b.layers[1].bias);
}

#[test]
fn spec_with_broken_chain_fails_to_build() {
    let spec = NetworkSpec {
        name: "broken".to_owned(),
        layers: vec![
            LayerSpec { in_features: 4, out_features: 8, activation: ActivationFunction::ReLU },
            LayerSpec { in_features: 5, out_features: 4, activation: ActivationFunction::Identity },
        ],
    };
    assert!(spec.build(&mut StdRng::seed_from_u64(0)).is_err());
}

#[test]
fn loading_a_missing_file_reports_an_error() {
    assert!(Network::load_json("/nonexistent/model.json").is_err());
    assert!(NetworkSpec::load_json("/nonexistent/spec.json").is_err());
}
