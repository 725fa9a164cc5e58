// SPDX-License-Identifier: Apache-2.0

//! JSON export formats for trained classifiers.
//!
//! `linear` mirrors a fitted multinomial (or binary) linear classifier:
//! one coefficient row and intercept per class, arg-max of the scores.
//! `forest` mirrors a fitted tree ensemble as flat node arrays; a node whose
//! `children_left` is `-1` is a leaf and its `value` row holds per-class
//! weights. The forest predicts the arg-max of the averaged, normalized leaf
//! distributions.

use crate::classifier::check_width;
use crate::{Classifier, InferenceError};
use mindscan_model::FeatureVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    Forest(ForestModel),
}

impl ModelArtifact {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Linear(model) => model.validate(),
            Self::Forest(model) => model.validate(),
        }
    }
}

impl Classifier for ModelArtifact {
    fn n_features(&self) -> usize {
        match self {
            Self::Linear(model) => model.n_features,
            Self::Forest(model) => model.n_features,
        }
    }

    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        match self {
            Self::Linear(model) => model.predict(features),
            Self::Forest(model) => model.predict(features),
        }
    }
}

fn validate_classes(classes: &[i64]) -> Result<(), String> {
    if classes.is_empty() {
        return Err("classes must not be empty".to_string());
    }
    let unique: BTreeSet<_> = classes.iter().collect();
    if unique.len() != classes.len() {
        return Err("classes must be unique".to_string());
    }
    Ok(())
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// First index of the maximum; ties resolve to the lowest index.
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (idx, score) in scores.iter().enumerate().skip(1) {
        if *score > scores[best] {
            best = idx;
        }
    }
    best
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearModel {
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LinearModel {
    /// A binary model may carry a single decision row, as fitted binary
    /// linear classifiers export it.
    fn is_binary_decision(&self) -> bool {
        self.classes.len() == 2 && self.coefficients.len() == 1
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_classes(&self.classes)?;
        if self.n_features == 0 {
            return Err("n_features must be > 0".to_string());
        }
        let rows = if self.is_binary_decision() {
            1
        } else {
            self.classes.len()
        };
        if self.coefficients.len() != rows {
            return Err(format!(
                "expected {rows} coefficient rows, got {}",
                self.coefficients.len()
            ));
        }
        if self.intercepts.len() != rows {
            return Err(format!(
                "expected {rows} intercepts, got {}",
                self.intercepts.len()
            ));
        }
        for (idx, row) in self.coefficients.iter().enumerate() {
            if row.len() != self.n_features {
                return Err(format!(
                    "coefficient row {idx} has {} values, expected {}",
                    row.len(),
                    self.n_features
                ));
            }
            if !all_finite(row) {
                return Err(format!("coefficient row {idx} contains non-finite values"));
            }
        }
        if !all_finite(&self.intercepts) {
            return Err("intercepts contain non-finite values".to_string());
        }
        Ok(())
    }

    fn decision(&self, row: usize, x: &[f64]) -> f64 {
        self.coefficients[row]
            .iter()
            .zip(x)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercepts[row]
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        check_width(self.n_features, features)?;
        let x = features.as_slice();
        if self.is_binary_decision() {
            let idx = usize::from(self.decision(0, x) > 0.0);
            return Ok(self.classes[idx]);
        }
        let scores: Vec<f64> = (0..self.classes.len())
            .map(|row| self.decision(row, x))
            .collect();
        Ok(self.classes[argmax(&scores)])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeArtifact {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl TreeArtifact {
    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        let n_nodes = self.children_left.len();
        if n_nodes == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n_nodes
            || self.feature.len() != n_nodes
            || self.threshold.len() != n_nodes
            || self.value.len() != n_nodes
        {
            return Err("tree node arrays differ in length".to_string());
        }
        for node in 0..n_nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                if right != LEAF {
                    return Err(format!("node {node}: leaf with a right child"));
                }
                let weights = &self.value[node];
                if weights.len() != n_classes {
                    return Err(format!(
                        "node {node}: leaf has {} class weights, expected {n_classes}",
                        weights.len()
                    ));
                }
                if !all_finite(weights) || weights.iter().any(|w| *w < 0.0) {
                    return Err(format!("node {node}: leaf weights must be finite and >= 0"));
                }
                if weights.iter().sum::<f64>() <= 0.0 {
                    return Err(format!("node {node}: leaf weights sum to zero"));
                }
                continue;
            }
            // Children always follow their parent, which rules out cycles.
            let in_range = |child: i64| {
                usize::try_from(child).is_ok_and(|c| c > node && c < n_nodes)
            };
            if !in_range(left) || !in_range(right) {
                return Err(format!("node {node}: child index out of range"));
            }
            if !usize::try_from(self.feature[node]).is_ok_and(|f| f < n_features) {
                return Err(format!(
                    "node {node}: feature index {} out of range",
                    self.feature[node]
                ));
            }
            if !self.threshold[node].is_finite() {
                return Err(format!("node {node}: threshold is not finite"));
            }
        }
        Ok(())
    }

    /// Leaf weights reached by `x`. Assumes a validated tree.
    fn leaf(&self, x: &[f64]) -> &[f64] {
        let mut node = 0_usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            let next = if x[feature] <= self.threshold[node] {
                self.children_left[node]
            } else {
                self.children_right[node]
            };
            node = next as usize;
        }
        &self.value[node]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForestModel {
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub trees: Vec<TreeArtifact>,
}

impl ForestModel {
    pub fn validate(&self) -> Result<(), String> {
        validate_classes(&self.classes)?;
        if self.n_features == 0 {
            return Err("n_features must be > 0".to_string());
        }
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .map_err(|e| format!("tree {idx}: {e}"))?;
        }
        Ok(())
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        check_width(self.n_features, features)?;
        let x = features.as_slice();
        let mut proba = vec![0.0_f64; self.classes.len()];
        for tree in &self.trees {
            let weights = tree.leaf(x);
            let total: f64 = weights.iter().sum();
            for (acc, w) in proba.iter_mut().zip(weights) {
                *acc += w / total;
            }
        }
        Ok(self.classes[argmax(&proba)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: i64, threshold: f64, left: Vec<f64>, right: Vec<f64>) -> TreeArtifact {
        TreeArtifact {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![feature, -2, -2],
            threshold: vec![threshold, -2.0, -2.0],
            value: vec![vec![1.0, 1.0, 1.0], left, right],
        }
    }

    fn features(values: &[f64]) -> FeatureVector {
        FeatureVector::new(values.to_vec())
    }

    #[test]
    fn linear_model_picks_highest_score() {
        let model = LinearModel {
            n_features: 2,
            classes: vec![0, 1, 2],
            coefficients: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]],
            intercepts: vec![0.0, 0.0, 0.25],
        };
        model.validate().expect("valid linear model");
        assert_eq!(model.predict(&features(&[3.0, 1.0])), Ok(0));
        assert_eq!(model.predict(&features(&[1.0, 3.0])), Ok(1));
        assert_eq!(model.predict(&features(&[2.0, 2.0])), Ok(2));
    }

    #[test]
    fn linear_ties_resolve_to_first_class() {
        let model = LinearModel {
            n_features: 1,
            classes: vec![7, 9],
            coefficients: vec![vec![1.0], vec![1.0]],
            intercepts: vec![0.0, 0.0],
        };
        assert_eq!(model.predict(&features(&[5.0])), Ok(7));
    }

    #[test]
    fn binary_linear_model_uses_decision_sign() {
        let model = LinearModel {
            n_features: 1,
            classes: vec![0, 1],
            coefficients: vec![vec![1.0]],
            intercepts: vec![-2.0],
        };
        model.validate().expect("valid binary model");
        assert_eq!(model.predict(&features(&[1.0])), Ok(0));
        assert_eq!(model.predict(&features(&[2.0])), Ok(0));
        assert_eq!(model.predict(&features(&[3.0])), Ok(1));
    }

    #[test]
    fn linear_validation_rejects_shape_mismatch() {
        let model = LinearModel {
            n_features: 2,
            classes: vec![0, 1, 2],
            coefficients: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            intercepts: vec![0.0, 0.0],
        };
        assert!(model.validate().expect_err("rows").contains("3 coefficient rows"));

        let nan = LinearModel {
            n_features: 1,
            classes: vec![0, 1, 2],
            coefficients: vec![vec![1.0], vec![f64::NAN], vec![0.0]],
            intercepts: vec![0.0, 0.0, 0.0],
        };
        assert!(nan.validate().expect_err("nan").contains("non-finite"));
    }

    #[test]
    fn forest_averages_normalized_leaf_distributions() {
        let forest = ForestModel {
            n_features: 2,
            classes: vec![0, 1, 2],
            trees: vec![
                stump(0, 2.5, vec![10.0, 0.0, 0.0], vec![0.0, 0.0, 10.0]),
                stump(1, 2.5, vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]),
                stump(1, 2.5, vec![0.0, 3.0, 0.0], vec![0.0, 0.0, 3.0]),
            ],
        };
        forest.validate().expect("valid forest");
        // Weight scale does not matter: each tree votes with a unit distribution.
        assert_eq!(forest.predict(&features(&[1.0, 1.0])), Ok(1));
        assert_eq!(forest.predict(&features(&[3.0, 3.0])), Ok(2));
        assert_eq!(forest.predict(&features(&[1.0, 3.0])), Ok(2));
    }

    #[test]
    fn forest_sends_equal_values_left() {
        let forest = ForestModel {
            n_features: 1,
            classes: vec![4, 5],
            trees: vec![stump(0, 2.0, vec![1.0, 0.0], vec![0.0, 1.0])],
        };
        assert_eq!(forest.predict(&features(&[2.0])), Ok(4));
        assert_eq!(forest.predict(&features(&[2.000_1])), Ok(5));
    }

    #[test]
    fn forest_validation_rejects_bad_trees() {
        let mut cyclic = stump(0, 1.0, vec![1.0, 0.0], vec![0.0, 1.0]);
        cyclic.children_left[0] = 0;
        let forest = ForestModel {
            n_features: 1,
            classes: vec![0, 1],
            trees: vec![cyclic],
        };
        assert!(forest.validate().expect_err("cycle").contains("out of range"));

        let wide = ForestModel {
            n_features: 1,
            classes: vec![0, 1],
            trees: vec![stump(3, 1.0, vec![1.0, 0.0], vec![0.0, 1.0])],
        };
        assert!(wide.validate().expect_err("feature").contains("feature index 3"));

        let empty_leaf = ForestModel {
            n_features: 1,
            classes: vec![0, 1],
            trees: vec![stump(0, 1.0, vec![0.0, 0.0], vec![0.0, 1.0])],
        };
        assert!(empty_leaf.validate().expect_err("zero").contains("sum to zero"));
    }

    #[test]
    fn artifact_json_is_tagged_by_kind() {
        let raw = r#"{"kind":"linear","n_features":1,"classes":[0,1,2],
            "coefficients":[[0.0],[1.0],[2.0]],"intercepts":[0.0,0.0,0.0]}"#;
        let artifact: ModelArtifact = serde_json::from_str(raw).expect("linear artifact");
        artifact.validate().expect("valid");
        assert_eq!(artifact.n_features(), 1);
        assert_eq!(artifact.predict(&features(&[1.0])), Ok(2));

        let unknown = r#"{"kind":"svm","n_features":1}"#;
        assert!(serde_json::from_str::<ModelArtifact>(unknown).is_err());
    }
}
