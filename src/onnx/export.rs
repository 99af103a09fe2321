//! ONNX export: serializes a [`Network`] into an ONNX `ModelProto`.
//!
//! Each layer becomes a `Gemm` node (`alpha = 1.0`, `beta = 1.0`,
//! `transB = 1`) whose weight and bias live as graph initializers named
//! `fcN.weight` / `fcN.bias`, followed by one activation node unless the
//! layer's activation is `Identity`. Graph input and output carry a leading
//! dynamic axis (`dim_param`) so the exported model accepts any batch size.
//!
//! Only the schema subset a feed-forward network touches is emitted:
//!
//! ```text
//! ModelProto:         ir_version=1, producer_name=2, producer_version=3,
//!                     graph=7, opset_import=8
//! OperatorSetIdProto: domain=1, version=2
//! GraphProto:         node=1, name=2, initializer=5, input=11, output=12
//! NodeProto:          input=1, output=2, name=3, op_type=4, attribute=5
//! AttributeProto:     name=1, f=2, i=3, s=4, type=20
//! TensorProto:        dims=1, data_type=2, name=8, raw_data=9
//! ValueInfoProto:     name=1, type=2
//! TypeProto:          tensor_type=1 (elem_type=1, shape=2)
//! TensorShapeProto:   dim=1 (dim_value=1 | dim_param=2)
//! ```

use crate::activation::activation::ActivationFunction;
use crate::network::network::Network;
use crate::onnx::wire::WireEncoder;

/// Default operator-set version the exporter targets.
pub const DEFAULT_OPSET_VERSION: i64 = 20;

/// IR version paired with the opset 20 era of the format.
const IR_VERSION: i64 = 9;

/// TensorProto.DataType value for float32.
const ELEM_FLOAT: i64 = 1;

// AttributeProto.AttributeType values.
const ATTR_FLOAT: i64 = 1;
const ATTR_INT: i64 = 2;
const ATTR_STRING: i64 = 3;

/// Configuration for one export run.
///
/// # Fields
/// - `graph_name`    — name stored on the exported graph
/// - `input_name`    — name of the graph input tensor
/// - `output_name`   — name of the graph output tensor
/// - `batch_axis`    — `dim_param` name of the dynamic leading axis on both
///                     input and output
/// - `opset_version` — operator-set version recorded in the model
///
/// The defaults ("input" / "output", batch axis "batch_size", opset 20)
/// match what downstream graph consumers commonly assume.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub graph_name: String,
    pub input_name: String,
    pub output_name: String,
    pub batch_axis: String,
    pub opset_version: i64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            graph_name: "network".to_owned(),
            input_name: "input".to_owned(),
            output_name: "output".to_owned(),
            batch_axis: "batch_size".to_owned(),
            opset_version: DEFAULT_OPSET_VERSION,
        }
    }
}

enum AttrValue {
    Float(f32),
    Int(i64),
    Str(&'static str),
}

/// Encodes `network` as an ONNX model and writes it to `path`.
pub fn export_to_file(
    network: &Network,
    options: &ExportOptions,
    path: &str,
) -> std::io::Result<()> {
    let bytes = encode_model(network, options)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    std::fs::write(path, bytes)
}

/// Encodes `network` as ONNX `ModelProto` bytes.
///
/// Encoding is deterministic: the same network and options always produce
/// the same bytes.
pub fn encode_model(network: &Network, options: &ExportOptions) -> Result<Vec<u8>, String> {
    if network.layers.is_empty() {
        return Err("Cannot export an empty network.".to_owned());
    }
    if options.input_name == options.output_name {
        return Err(format!(
            "Graph input and output must have distinct names, both are \"{}\".",
            options.input_name
        ));
    }
    let uses_gelu = network.layers.iter()
        .any(|l| l.activation == ActivationFunction::Gelu);
    if uses_gelu && options.opset_version < 20 {
        return Err(format!(
            "Gelu is only available from opset 20, requested opset {}.",
            options.opset_version
        ));
    }

    let mut model = WireEncoder::new();
    model.int64(1, IR_VERSION);                      // ir_version
    model.string(2, "hematite-nn");                  // producer_name
    model.string(3, env!("CARGO_PKG_VERSION"));      // producer_version
    model.message(7, |g| encode_graph(g, network, options));
    model.message(8, |opset| {
        opset.string(1, "");                         // default operator domain
        opset.int64(2, options.opset_version);
    });
    Ok(model.into_bytes())
}

fn encode_graph(g: &mut WireEncoder, network: &Network, options: &ExportOptions) {
    let last = network.layers.len() - 1;

    // Nodes, in execution order. Tensor names follow the layer math:
    // "fcN_z" is the Gemm (pre-activation) result, "fcN_a" the activation.
    let mut x_name = options.input_name.clone();
    for (i, layer) in network.layers.iter().enumerate() {
        let prefix = format!("fc{}", i + 1);
        let weight_name = format!("{prefix}.weight");
        let bias_name = format!("{prefix}.bias");
        let act = activation_node(&layer.activation);

        let gemm_out = if i == last && act.is_none() {
            options.output_name.clone()
        } else {
            format!("{prefix}_z")
        };

        g.message(1, |node| {
            node.string(1, &x_name);
            node.string(1, &weight_name);
            node.string(1, &bias_name);
            node.string(2, &gemm_out);
            node.string(3, &format!("{prefix}_gemm"));
            node.string(4, "Gemm");
            encode_attribute(node, "alpha", AttrValue::Float(1.0));
            encode_attribute(node, "beta", AttrValue::Float(1.0));
            encode_attribute(node, "transB", AttrValue::Int(1));
        });

        x_name = match act {
            Some((op_type, attrs)) => {
                let act_out = if i == last {
                    options.output_name.clone()
                } else {
                    format!("{prefix}_a")
                };
                g.message(1, |node| {
                    node.string(1, &gemm_out);
                    node.string(2, &act_out);
                    node.string(3, &format!("{}_{}", prefix, op_type.to_lowercase()));
                    node.string(4, op_type);
                    for (name, value) in attrs {
                        encode_attribute(node, name, value);
                    }
                });
                act_out
            }
            None => gemm_out,
        };
    }

    g.string(2, &options.graph_name);

    // Parameters referenced by the Gemm nodes above.
    for (i, layer) in network.layers.iter().enumerate() {
        let prefix = format!("fc{}", i + 1);
        encode_initializer(
            g,
            &format!("{prefix}.weight"),
            &[layer.out_features as i64, layer.in_features as i64],
            layer.weight.data.iter().flatten().copied(),
        );
        encode_initializer(
            g,
            &format!("{prefix}.bias"),
            &[layer.out_features as i64],
            layer.bias.data[0].iter().copied(),
        );
    }

    encode_value_info(g, 11, &options.input_name, &options.batch_axis, network.in_features());
    encode_value_info(g, 12, &options.output_name, &options.batch_axis, network.out_features());
}

/// Maps an activation to its ONNX operator and attributes.
/// `Identity` maps to no node at all.
fn activation_node(
    act: &ActivationFunction,
) -> Option<(&'static str, Vec<(&'static str, AttrValue)>)> {
    match act {
        ActivationFunction::Identity => None,
        ActivationFunction::ReLU => Some(("Relu", vec![])),
        ActivationFunction::Sigmoid => Some(("Sigmoid", vec![])),
        ActivationFunction::Tanh => Some(("Tanh", vec![])),
        ActivationFunction::LeakyReLU { alpha } => {
            Some(("LeakyRelu", vec![("alpha", AttrValue::Float(*alpha))]))
        }
        ActivationFunction::Elu { alpha } => {
            Some(("Elu", vec![("alpha", AttrValue::Float(*alpha))]))
        }
        // function() computes the tanh approximation, so the graph has to say so.
        ActivationFunction::Gelu => {
            Some(("Gelu", vec![("approximate", AttrValue::Str("tanh"))]))
        }
    }
}

fn encode_attribute(node: &mut WireEncoder, name: &str, value: AttrValue) {
    node.message(5, |attr| {
        attr.string(1, name);
        match value {
            AttrValue::Float(f) => {
                attr.float(2, f);
                attr.int64(20, ATTR_FLOAT);
            }
            AttrValue::Int(i) => {
                attr.int64(3, i);
                attr.int64(20, ATTR_INT);
            }
            AttrValue::Str(s) => {
                attr.string(4, s);
                attr.int64(20, ATTR_STRING);
            }
        }
    });
}

/// Writes one TensorProto initializer with little-endian float32 `raw_data`.
fn encode_initializer(
    g: &mut WireEncoder,
    name: &str,
    dims: &[i64],
    values: impl Iterator<Item = f32>,
) {
    g.message(5, |t| {
        for &d in dims {
            t.int64(1, d);
        }
        t.int64(2, ELEM_FLOAT);
        t.string(8, name);
        let mut raw = Vec::new();
        for v in values {
            raw.extend_from_slice(&v.to_le_bytes());
        }
        t.bytes(9, &raw);
    });
}

/// Writes one graph input (field 11) or output (field 12) ValueInfoProto:
/// float32, shape (batch_axis, features) with the batch axis dynamic.
fn encode_value_info(
    g: &mut WireEncoder,
    field: u32,
    name: &str,
    batch_axis: &str,
    features: usize,
) {
    g.message(field, |vi| {
        vi.string(1, name);
        vi.message(2, |ty| {
            ty.message(1, |tensor| {
                tensor.int64(1, ELEM_FLOAT);
                tensor.message(2, |shape| {
                    shape.message(1, |dim| dim.string(2, batch_axis));
                    shape.message(1, |dim| dim.int64(1, features as i64));
                });
            });
        });
    });
}
