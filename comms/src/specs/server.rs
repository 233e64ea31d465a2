use serde::{Deserialize, Serialize};

/// The specification of a random distribution to draw initial values from.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionSpec {
    Uniform { low: f64, high: f64 },
    Normal { mean: f64, std_dev: f64 },
}

/// The specification for the initial values of a single variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamGenSpec {
    Const {
        value: f64,
        len: usize,
    },
    Rand {
        distribution: DistributionSpec,
        len: usize,
    },
    Values {
        values: Vec<f64>,
    },
}

/// The specification for the server's update strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerSpec {
    GradientDescent { step_size: f64 },
    Momentum { step_size: f64, momentum: f64 },
    AdaGrad { step_size: f64, damping: f64 },
}

/// A named variable held by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    pub init: ParamGenSpec,
}

/// The specification for a parameter server.
///
/// The order of `variables` is the order both ends of the protocol use to
/// correlate vectors, so workers must be built from the same list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSpec {
    pub variables: Vec<VariableSpec>,
    pub optimizer: OptimizerSpec,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ServerSpec {
    /// Parses a `ServerSpec` from its JSON representation.
    ///
    /// # Arguments
    /// * `json` - The JSON document.
    ///
    /// # Returns
    /// The parsed spec or the `serde_json` error.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_spec() {
        let json = r#"{
            "variables": [
                { "name": "weights", "init": { "rand": { "distribution": { "normal": { "mean": 0.0, "std_dev": 0.1 } }, "len": 4 } } },
                { "name": "bias", "init": { "const": { "value": 0.0, "len": 1 } } }
            ],
            "optimizer": { "gradient_descent": { "step_size": 0.01 } }
        }"#;

        let spec = ServerSpec::from_json(json).unwrap();

        assert_eq!(spec.variables.len(), 2);
        assert_eq!(spec.variables[1].name, "bias");
        assert_eq!(
            spec.variables[1].init,
            ParamGenSpec::Const { value: 0., len: 1 }
        );
        assert_eq!(
            spec.optimizer,
            OptimizerSpec::GradientDescent { step_size: 0.01 }
        );
        assert_eq!(spec.seed, None);
    }

    #[test]
    fn explicit_values_round_trip() {
        let spec = ServerSpec {
            variables: vec![VariableSpec {
                name: "w".into(),
                init: ParamGenSpec::Values {
                    values: vec![1., 2.],
                },
            }],
            optimizer: OptimizerSpec::Momentum {
                step_size: 0.1,
                momentum: 0.9,
            },
            seed: Some(7),
        };

        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(ServerSpec::from_json(&json).unwrap(), spec);
    }
}
