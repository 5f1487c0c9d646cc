use serde::{Deserialize, Serialize};

/// Node of a flattened regression tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go to `yes` when `x[feature] < threshold`, else `no`. NaN follows
    /// `missing` (defaults to `yes`).
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        missing: Option<usize>,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Children must point forward in the node array, which rules out cycles.
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split { feature, yes, no, missing, .. } = node {
                if *feature >= n_features {
                    return Err(format!(
                        "node {} splits on feature {} but input has {} features",
                        idx, feature, n_features
                    ));
                }
                for child in [Some(*yes), Some(*no), *missing].into_iter().flatten() {
                    if child <= idx || child >= self.nodes.len() {
                        return Err(format!("node {} has invalid child {}", idx, child));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn evaluate(&self, x: &[f64]) -> Result<f64, String> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { leaf }) => return Ok(*leaf),
                Some(TreeNode::Split { feature, threshold, yes, no, missing }) => {
                    let value = x
                        .get(*feature)
                        .ok_or_else(|| format!("feature {} out of range", feature))?;
                    idx = if value.is_nan() {
                        missing.unwrap_or(*yes)
                    } else if *value < *threshold {
                        *yes
                    } else {
                        *no
                    };
                }
                None => return Err(format!("dangling node index {}", idx)),
            }
        }
    }
}

/// Gradient-boosted sum of regression trees
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<RegressionTree>,
}

impl TreeEnsemble {
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features).map_err(|e| format!("tree {}: {}", idx, e))?;
        }
        Ok(())
    }

    pub fn predict(&self, x: &[f64]) -> Result<f64, String> {
        self.trees
            .iter()
            .try_fold(self.base_score, |acc, tree| Ok(acc + tree.evaluate(x)?))
    }
}
