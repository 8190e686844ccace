//! Per-feature explanations of a single forecast.
//!
//! Attributions are exact SHAP values, so the ranking is deterministic:
//! - linear models: `coef_i * (x_i - background_i)`
//! - tree ensembles: path-dependent TreeSHAP over training cover ([`tree_shap`])

pub mod ranking;
pub mod tree_shap;

use crate::core::features::ScaledFeatureVector;
use crate::error::{OracleError, Result};
use crate::models::Regressor;

pub use ranking::{AttributionRanking, Direction, FeatureAttribution};

/// Relative tolerance for `base + Σ phi == prediction`.
const ADDITIVITY_TOLERANCE: f64 = 1e-6;

/// Explains one model's forecast for `scaled`, keeping the `top_k` features.
pub fn explain(
    model: &dyn Regressor,
    scaled: &ScaledFeatureVector,
    top_k: usize,
) -> Result<AttributionRanking> {
    if model.n_features() != scaled.len() {
        return Err(OracleError::DimensionMismatch {
            expected: model.n_features(),
            got: scaled.len(),
        });
    }

    let x = scaled.values();
    let contributions = model.contributions(x);
    let base_value = model.expected_value();
    let prediction = model.predict(x);

    let reconstructed = base_value + contributions.iter().sum::<f64>();
    let drift = (reconstructed - prediction).abs();
    if drift > ADDITIVITY_TOLERANCE * prediction.abs().max(1.0) {
        log::warn!(
            "Attributions do not add up: base {:.6} + contributions = {:.6}, prediction {:.6}",
            base_value,
            reconstructed,
            prediction
        );
    }

    Ok(AttributionRanking::rank(
        scaled.names(),
        &contributions,
        top_k,
        base_value,
        prediction,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Estimator, LinearModel, RegressionModel, Tree, TreeEnsemble, TreeNode};

    fn scaled(values: Vec<f64>) -> ScaledFeatureVector {
        let names = (0..values.len()).map(|i| format!("x{}", i)).collect();
        ScaledFeatureVector::new(names, values)
    }

    fn forest() -> RegressionModel {
        let tree = |feature: usize, low: f64, high: f64| {
            Tree::new(vec![
                TreeNode::Split {
                    feature,
                    threshold: 0.0,
                    left: 1,
                    right: 2,
                    cover: 10.0,
                },
                TreeNode::Leaf {
                    value: low,
                    cover: 4.0,
                },
                TreeNode::Leaf {
                    value: high,
                    cover: 6.0,
                },
            ])
        };
        RegressionModel::new(
            "forest",
            Estimator::TreeEnsemble(TreeEnsemble {
                n_features: 3,
                base_score: 0.5,
                aggregation: Default::default(),
                split_rule: Default::default(),
                trees: vec![tree(0, -1.0, 2.0), tree(2, 5.0, -5.0), tree(0, 0.0, 1.0)],
            }),
        )
    }

    #[test]
    fn test_linear_ranking_matches_coefficients() {
        let model = LinearModel::new(vec![1.0, -4.0, 2.0], 0.0);
        let ranking = explain(&model, &scaled(vec![1.0, 1.0, 1.0]), 3).unwrap();
        let features: Vec<&str> = ranking.entries.iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(features, vec!["x1", "x2", "x0"]);
        assert_eq!(ranking.entries[0].direction, Direction::Decreases);
    }

    #[test]
    fn test_tree_ensemble_ranking_is_additive() {
        let model = forest();
        let input = scaled(vec![1.0, 0.0, 1.0]);
        let ranking = explain(&model, &input, 3).unwrap();
        let total: f64 = ranking.entries.iter().map(|e| e.contribution).sum();
        assert!((ranking.base_value + total - ranking.prediction).abs() < 1e-9);
        assert_eq!(ranking.entries[0].feature, "x2");
    }

    #[test]
    fn test_explanations_are_reproducible() {
        let model = forest();
        let input = scaled(vec![-1.0, 3.0, 0.5]);
        let first = explain(&model, &input, 3).unwrap();
        let second = explain(&model, &input, 3).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let model = LinearModel::new(vec![1.0, 2.0], 0.0);
        assert!(matches!(
            explain(&model, &scaled(vec![1.0]), 3),
            Err(OracleError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        ));
    }
}
