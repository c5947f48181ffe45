//! Regression model artifacts for the generation forecast.
//!
//! A model is stored as JSON, tagged by `kind`:
//!
//! ```json
//! { "kind": "linear", "intercept": 0.0, "coefficients": [1.0, 1.0, 1.0, 0.0] }
//! ```
//!
//! or a forest of regression trees whose outputs are averaged:
//!
//! ```json
//! { "kind": "forest", "trees": [ { "nodes": [
//!     { "type": "split", "feature": 0, "threshold": 50.0, "left": 1, "right": 2 },
//!     { "type": "leaf", "value": 20.0 },
//!     { "type": "leaf", "value": 80.0 }
//! ] } ] }
//! ```
//!
//! Feature order is always `[solar_kw, wind_kw, hydro_kw, battery_soc]`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Number of input features a model consumes.
pub const FEATURE_COUNT: usize = 4;

/// One forecast feature record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    pub solar_kw: f64,
    pub wind_kw: f64,
    pub hydro_kw: f64,
    pub battery_soc: f64,
}

impl Features {
    /// Features in model input order.
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [self.solar_kw, self.wind_kw, self.hydro_kw, self.battery_soc]
    }
}

/// A trained model mapping one feature record to a scalar.
pub trait Regressor: Send + Sync {
    /// Predicts next-step generation (kW).
    fn predict(&self, features: &Features) -> f64;

    /// Short model type name for logs.
    fn name(&self) -> &str;
}

/// Ordinary linear regression: `intercept + sum(coefficients[i] * x[i])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: [f64; FEATURE_COUNT],
}

impl Regressor for LinearModel {
    fn predict(&self, features: &Features) -> f64 {
        features
            .as_array()
            .iter()
            .zip(self.coefficients.iter())
            .fold(self.intercept, |acc, (x, c)| acc + x * c)
    }

    fn name(&self) -> &str {
        "linear"
    }
}

/// Node of a binary regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, otherwise `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Serialize, Deserialize)]
struct RawTree {
    nodes: Vec<TreeNode>,
}

/// A validated regression tree. The root is node 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTree", into = "RawTree")]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Builds a tree from its flattened node list.
    ///
    /// Children must point forward (`child > parent`), which rules out
    /// cycles and guarantees traversal terminates.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Invalid` if the tree is empty, a split uses an
    /// unknown feature, or a child index is out of range or not forward.
    pub fn new(nodes: Vec<TreeNode>) -> Result<Self, ModelError> {
        if nodes.is_empty() {
            return Err(ModelError::Invalid("tree has no nodes".into()));
        }
        for (idx, node) in nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = *node
            {
                if feature >= FEATURE_COUNT {
                    return Err(ModelError::Invalid(format!(
                        "node {idx}: feature index {feature} out of range (expected < {FEATURE_COUNT})"
                    )));
                }
                for child in [left, right] {
                    if child <= idx || child >= nodes.len() {
                        return Err(ModelError::Invalid(format!(
                            "node {idx}: child index {child} must be in ({idx}, {})",
                            nodes.len()
                        )));
                    }
                }
            }
        }
        Ok(Self { nodes })
    }

    fn evaluate(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

impl TryFrom<RawTree> for RegressionTree {
    type Error = ModelError;

    fn try_from(raw: RawTree) -> Result<Self, Self::Error> {
        Self::new(raw.nodes)
    }
}

impl From<RegressionTree> for RawTree {
    fn from(tree: RegressionTree) -> Self {
        Self { nodes: tree.nodes }
    }
}

#[derive(Serialize, Deserialize)]
struct RawForest {
    trees: Vec<RegressionTree>,
}

/// Averaging ensemble of regression trees (random-forest regressor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawForest", into = "RawForest")]
pub struct ForestModel {
    trees: Vec<RegressionTree>,
}

impl ForestModel {
    /// # Errors
    ///
    /// Returns `ModelError::Invalid` if `trees` is empty.
    pub fn new(trees: Vec<RegressionTree>) -> Result<Self, ModelError> {
        if trees.is_empty() {
            return Err(ModelError::Invalid("forest has no trees".into()));
        }
        Ok(Self { trees })
    }
}

impl TryFrom<RawForest> for ForestModel {
    type Error = ModelError;

    fn try_from(raw: RawForest) -> Result<Self, Self::Error> {
        Self::new(raw.trees)
    }
}

impl From<ForestModel> for RawForest {
    fn from(forest: ForestModel) -> Self {
        Self {
            trees: forest.trees,
        }
    }
}

impl Regressor for ForestModel {
    fn predict(&self, features: &Features) -> f64 {
        let x = features.as_array();
        let sum: f64 = self.trees.iter().map(|t| t.evaluate(&x)).sum();
        sum / self.trees.len() as f64
    }

    fn name(&self) -> &str {
        "forest"
    }
}

/// Any supported model artifact, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    Forest(ForestModel),
}

impl ModelArtifact {
    /// Parses an artifact from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Parse` on malformed JSON, an unknown `kind`, or
    /// a structurally invalid tree.
    pub fn from_json_str(s: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads and parses an artifact file.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Read` if the file cannot be read, otherwise as
    /// [`ModelArtifact::from_json_str`].
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

impl Regressor for ModelArtifact {
    fn predict(&self, features: &Features) -> f64 {
        match self {
            Self::Linear(m) => m.predict(features),
            Self::Forest(m) => m.predict(features),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Linear(m) => m.name(),
            Self::Forest(m) => m.name(),
        }
    }
}
