use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;
use crate::model::AnomalyModel;
use crate::result::{AnomalyLabel, LoadError, ModelError};

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// On-disk representation of a trained isolation forest.
///
/// This is what the offline training process writes. It is untrusted until it
/// has been converted into an [`IsolationForest`], which validates the tree
/// layout once so that scoring never has to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestArtifact {
    /// Column names in the order the forest was fit on.
    pub feature_names: Vec<String>,
    /// Effective subsample size per tree; normalizes path lengths.
    pub max_samples: usize,
    /// Decision threshold derived from the training contamination.
    pub offset: f64,
    pub trees: Vec<IsolationTree>,
    #[serde(default)]
    pub metadata: ModelMetadata,
}

/// Informational fields recorded by the training process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub trained_at: Option<DateTime<Utc>>,
    pub contamination: Option<f64>,
    pub n_training_rows: Option<u64>,
}

/// One isolation tree, nodes stored in pre-order with node 0 as root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolationTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Go `left` when `row[feature] <= threshold`, otherwise `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal node; `n_samples` training rows ended up here.
    Leaf { n_samples: usize },
}

/// Validated isolation forest ready for inference.
///
/// Model:
/// - Each tree isolates a row by walking random splits; anomalies isolate early.
/// - Path length = edges walked + expected remaining depth of the leaf's samples.
/// - Score = `-2^(-mean_path / c(max_samples))`, in `[-1, 0)`.
/// - Label = anomaly when `score - offset < 0`, normal otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct IsolationForest {
    feature_names: Vec<String>,
    max_samples: usize,
    offset: f64,
    trees: Vec<IsolationTree>,
    metadata: ModelMetadata,
}

impl TryFrom<ForestArtifact> for IsolationForest {
    type Error = LoadError;

    fn try_from(artifact: ForestArtifact) -> Result<Self, Self::Error> {
        if artifact.feature_names.is_empty() {
            return Err(LoadError::invalid("feature_names must not be empty"));
        }
        if artifact.max_samples < 2 {
            return Err(LoadError::invalid("max_samples must be >= 2"));
        }
        if !artifact.offset.is_finite() {
            return Err(LoadError::invalid("offset must be a finite number"));
        }
        if artifact.trees.is_empty() {
            return Err(LoadError::invalid("forest has no trees"));
        }

        let n_features = artifact.feature_names.len();
        for (t, tree) in artifact.trees.iter().enumerate() {
            validate_tree(tree, n_features)
                .map_err(|msg| LoadError::invalid(format!("tree {t}: {msg}")))?;
        }

        Ok(Self {
            feature_names: artifact.feature_names,
            max_samples: artifact.max_samples,
            offset: artifact.offset,
            trees: artifact.trees,
            metadata: artifact.metadata,
        })
    }
}

impl IsolationForest {
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Anomaly score in `[-1, 0)`; lower means more anomalous.
    pub fn score_samples(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        self.check_row(features)?;
        let row = features.as_slice();

        let total: f64 = self.trees.iter().map(|tree| path_length(tree, row)).sum();
        let mean_path = total / (self.trees.len() as f64);

        Ok(-(2f64.powf(-mean_path / average_path_length(self.max_samples))))
    }

    /// Score shifted by the learned offset; negative means anomaly.
    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        Ok(self.score_samples(features)? - self.offset)
    }

    fn check_row(&self, features: &FeatureVector) -> Result<(), ModelError> {
        let columns = features.columns();
        if columns.len() != self.feature_names.len() {
            return Err(ModelError::ShapeMismatch {
                expected: self.feature_names.len(),
                found: columns.len(),
            });
        }
        if columns.iter().zip(&self.feature_names).any(|(c, f)| *c != f.as_str()) {
            return Err(ModelError::FeatureNames {
                expected: self.feature_names.clone(),
                found: columns.iter().map(|c| c.to_string()).collect(),
            });
        }
        Ok(())
    }
}

impl AnomalyModel for IsolationForest {
    fn name(&self) -> &str {
        "isolation_forest"
    }

    fn predict(&self, features: &FeatureVector) -> Result<AnomalyLabel, ModelError> {
        if self.decision_function(features)? < 0.0 {
            Ok(AnomalyLabel::ANOMALY)
        } else {
            Ok(AnomalyLabel::NORMAL)
        }
    }
}

/// Expected path length of an unsuccessful BST search over `n` samples.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

// Relies on validate_tree: children sit strictly after their parent, so the walk terminates.
fn path_length(tree: &IsolationTree, row: &[f64]) -> f64 {
    let mut idx = 0;
    let mut depth = 0.0;
    loop {
        match tree.nodes[idx] {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                idx = if row[feature] <= threshold { left } else { right };
                depth += 1.0;
            }
            TreeNode::Leaf { n_samples } => return depth + average_path_length(n_samples),
        }
    }
}

fn validate_tree(tree: &IsolationTree, n_features: usize) -> Result<(), String> {
    if tree.nodes.is_empty() {
        return Err("tree has no nodes".to_string());
    }

    let n_nodes = tree.nodes.len();
    for (i, node) in tree.nodes.iter().enumerate() {
        match *node {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if feature >= n_features {
                    return Err(format!(
                        "node {i} splits on feature {feature}, but the model has {n_features}"
                    ));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {i} has a non-finite threshold"));
                }
                for child in [left, right] {
                    if child <= i || child >= n_nodes {
                        return Err(format!("node {i} has invalid child index {child}"));
                    }
                }
            }
            TreeNode::Leaf { n_samples } => {
                if n_samples == 0 {
                    return Err(format!("leaf {i} has no samples"));
                }
            }
        }
    }
    Ok(())
}
