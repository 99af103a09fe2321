// Element-wise activation values.

use approx::assert_relative_eq;
use hematite_nn::ActivationFunction;

#[test]
fn identity_passes_values_through() {
    let act = ActivationFunction::Identity;
    assert_eq!(act.function(-3.25), -3.25);
    assert_eq!(act.function(0.0), 0.0);
}

#[test]
fn relu_zeroes_the_negative_half_line() {
    let act = ActivationFunction::ReLU;
    assert_eq!(act.function(-2.0), 0.0);
    assert_eq!(act.function(0.0), 0.0);
    assert_eq!(act.function(1.5), 1.5);
}

#[test]
fn sigmoid_is_centered_and_bounded() {
    let act = ActivationFunction::Sigmoid;
    assert_relative_eq!(act.function(0.0), 0.5);
    assert!(act.function(10.0) > 0.999);
    assert!(act.function(-10.0) < 0.001);
    // σ(-x) = 1 - σ(x)
    assert_relative_eq!(act.function(-1.3), 1.0 - act.function(1.3), epsilon = 1e-6);
}

#[test]
fn tanh_matches_std() {
    let act = ActivationFunction::Tanh;
    assert_relative_eq!(act.function(0.7), 0.7_f32.tanh());
}

#[test]
fn leaky_relu_scales_negatives_by_alpha() {
    let act = ActivationFunction::LeakyReLU { alpha: 0.1 };
    assert_relative_eq!(act.function(-2.0), -0.2);
    assert_relative_eq!(act.function(2.0), 2.0);
}

#[test]
fn elu_is_continuous_at_zero() {
    let act = ActivationFunction::Elu { alpha: 1.0 };
    assert_relative_eq!(act.function(0.0), 0.0);
    assert_relative_eq!(act.function(1e-4), act.function(-1e-4), epsilon = 1e-3);
    // Saturates toward -alpha.
    assert_relative_eq!(act.function(-20.0), -1.0, epsilon = 1e-6);
}

#[test]
fn gelu_fixes_zero_and_tracks_identity_for_large_inputs() {
    let act = ActivationFunction::Gelu;
    assert_relative_eq!(act.function(0.0), 0.0);
    assert_relative_eq!(act.function(4.0), 4.0, epsilon = 1e-3);
    assert_relative_eq!(act.function(-4.0), 0.0, epsilon = 1e-3);
}
