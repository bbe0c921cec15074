//! Evaluation of a gradient-boosted regression tree ensemble saved in the
//! XGBoost JSON model format.

use std::fs;

use serde::Deserialize;

use crate::error::ModelError;
use crate::model::{aligned_features, PriceModel};
use crate::query::FeatureRecord;

const LEAF: i32 = -1;

#[derive(Deserialize)]
struct ModelDump {
    learner: Learner,
}

#[derive(Deserialize)]
struct Learner {
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: GradientBooster,
    learner_model_param: LearnerModelParam,
}

#[derive(Deserialize)]
struct GradientBooster {
    model: BoosterModel,
}

#[derive(Deserialize)]
struct BoosterModel {
    trees: Vec<TreeDump>,
}

#[derive(Deserialize)]
struct LearnerModelParam {
    base_score: String,
}

#[derive(Deserialize)]
struct TreeDump {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<usize>,
    split_conditions: Vec<f64>,
    default_left: Vec<DefaultLeft>,
}

/// Older writers store 0/1 integers, newer ones booleans.
#[derive(Deserialize)]
#[serde(untagged)]
enum DefaultLeft {
    Flag(bool),
    Int(i64),
}

impl DefaultLeft {
    fn is_left(&self) -> bool {
        match self {
            DefaultLeft::Flag(flag) => *flag,
            DefaultLeft::Int(value) => *value != 0,
        }
    }
}

#[derive(Debug)]
struct Tree {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<usize>,
    /// Threshold for inner nodes, leaf value for leaves.
    split_conditions: Vec<f64>,
    default_left: Vec<bool>,
}

impl Tree {
    fn from_dump(dump: TreeDump, num_features: usize) -> Result<Tree, String> {
        let nodes = dump.left_children.len();
        if nodes == 0 {
            return Err(String::from("tree without nodes"));
        }
        if dump.right_children.len() != nodes
            || dump.split_indices.len() != nodes
            || dump.split_conditions.len() != nodes
            || dump.default_left.len() != nodes
        {
            return Err(String::from("tree arrays differ in length"));
        }
        for node in 0..nodes {
            let (left, right) = (dump.left_children[node], dump.right_children[node]);
            if left == LEAF {
                continue;
            }
            // children always come after their parent, which bounds traversal
            let in_range = |child: i32| child as i64 > node as i64 && (child as usize) < nodes;
            if !in_range(left) || !in_range(right) {
                return Err(format!("node {} has invalid children {} / {}", node, left, right));
            }
            if dump.split_indices[node] >= num_features {
                return Err(format!(
                    "node {} splits on feature {} of {}",
                    node, dump.split_indices[node], num_features
                ));
            }
        }
        Ok(Tree {
            left_children: dump.left_children,
            right_children: dump.right_children,
            split_indices: dump.split_indices,
            split_conditions: dump.split_conditions,
            default_left: dump.default_left.iter().map(DefaultLeft::is_left).collect(),
        })
    }

    fn leaf_value(&self, features: &[f64]) -> f64 {
        let mut node = 0;
        loop {
            let left = self.left_children[node];
            if left == LEAF {
                return self.split_conditions[node];
            }
            let value = features[self.split_indices[node]];
            let go_left = if value.is_nan() {
                self.default_left[node]
            } else {
                // Trees are trained and scored in single precision.
                (value as f32) < (self.split_conditions[node] as f32)
            };
            node = if go_left {
                left as usize
            } else {
                self.right_children[node] as usize
            };
        }
    }
}

#[derive(Debug)]
pub struct GradientBoostedTrees {
    feature_names: Vec<String>,
    base_score: f64,
    trees: Vec<Tree>,
}

impl GradientBoostedTrees {
    pub fn load(path: &str) -> Result<Self, ModelError> {
        let json = fs::read_to_string(path).map_err(|error| ModelError::Load {
            path: path.to_string(),
            reason: error.to_string(),
        })?;
        let model = Self::from_json(&json).map_err(|error| match error {
            ModelError::Malformed(reason) => ModelError::Load {
                path: path.to_string(),
                reason,
            },
            other => other,
        })?;
        tracing::info!(
            "loaded price model {} with {} trees over {} features",
            path,
            model.trees.len(),
            model.feature_names.len()
        );
        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let dump: ModelDump =
            serde_json::from_str(json).map_err(|error| ModelError::Malformed(error.to_string()))?;
        let learner = dump.learner;

        if learner.feature_names.is_empty() {
            return Err(ModelError::Malformed(String::from(
                "model carries no feature names",
            )));
        }
        let base_score = parse_base_score(&learner.learner_model_param.base_score)?;
        let num_features = learner.feature_names.len();
        let trees = learner
            .gradient_booster
            .model
            .trees
            .into_iter()
            .map(|tree| Tree::from_dump(tree, num_features))
            .collect::<Result<Vec<_>, _>>()
            .map_err(ModelError::Malformed)?;

        Ok(GradientBoostedTrees {
            feature_names: learner.feature_names,
            base_score,
            trees,
        })
    }

    pub fn qty_trees(&self) -> usize {
        self.trees.len()
    }
}

impl PriceModel for GradientBoostedTrees {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_log_price(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        let features = aligned_features(&self.feature_names, record)?;
        let margin: f64 = self
            .trees
            .iter()
            .map(|tree| tree.leaf_value(&features))
            .sum();
        Ok(self.base_score + margin)
    }
}

/// Accepts both `"5E-1"` and the bracketed `"[5E-1]"` form.
fn parse_base_score(raw: &str) -> Result<f64, ModelError> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim()
        .parse::<f64>()
        .map_err(|_| ModelError::Malformed(format!("invalid base_score {:?}", raw)))
}
