//! Ranking of per-feature contributions.

use std::fmt;

use serde::Serialize;

/// Which way a feature pushed the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increases,
    Decreases,
    Neutral,
}

impl Direction {
    pub fn of(contribution: f64) -> Self {
        if contribution > 0.0 {
            Direction::Increases
        } else if contribution < 0.0 {
            Direction::Decreases
        } else {
            Direction::Neutral
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Increases => "↑",
            Direction::Decreases => "↓",
            Direction::Neutral => "·",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Increases => "increases",
            Direction::Decreases => "decreases",
            Direction::Neutral => "does not change",
        })
    }
}

/// Signed contribution of one feature to one forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureAttribution {
    pub feature: String,
    pub contribution: f64,
    pub direction: Direction,
}

impl FeatureAttribution {
    pub fn magnitude(&self) -> f64 {
        self.contribution.abs()
    }
}

/// Top contributions ordered by descending magnitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributionRanking {
    /// Model output with no feature information.
    pub base_value: f64,
    /// Model output for the explained row.
    pub prediction: f64,
    pub entries: Vec<FeatureAttribution>,
}

impl AttributionRanking {
    /// Keeps the `top_k` largest contributions by absolute value.
    ///
    /// Sorting is stable, so equal magnitudes keep column order.
    ///
    /// # Examples
    ///
    /// ```
    /// use oraculo::explain::ranking::{AttributionRanking, Direction};
    ///
    /// let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    /// let ranking = AttributionRanking::rank(&names, &[0.5, -2.0, 1.0], 2, 0.0, -0.5);
    /// assert_eq!(ranking.entries[0].feature, "b");
    /// assert_eq!(ranking.entries[0].direction, Direction::Decreases);
    /// assert_eq!(ranking.entries.len(), 2);
    /// ```
    pub fn rank(
        names: &[String],
        contributions: &[f64],
        top_k: usize,
        base_value: f64,
        prediction: f64,
    ) -> Self {
        let mut order: Vec<usize> = (0..contributions.len().min(names.len())).collect();
        order.sort_by(|&a, &b| contributions[b].abs().total_cmp(&contributions[a].abs()));

        let entries = order
            .into_iter()
            .take(top_k)
            .map(|i| FeatureAttribution {
                feature: names[i].clone(),
                contribution: contributions[i],
                direction: Direction::of(contributions[i]),
            })
            .collect();

        Self {
            base_value,
            prediction,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{}", i)).collect()
    }

    #[test]
    fn test_ties_keep_column_order() {
        let ranking = AttributionRanking::rank(&names(4), &[1.0, -3.0, 3.0, 0.0], 3, 0.0, 1.0);
        let order: Vec<&str> = ranking.entries.iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(order, vec!["f1", "f2", "f0"]);
    }

    #[test]
    fn test_fewer_features_than_top_k() {
        let ranking = AttributionRanking::rank(&names(2), &[0.1, 0.2], 3, 0.0, 0.3);
        assert_eq!(ranking.entries.len(), 2);
    }

    #[test]
    fn test_direction_of_zero_is_neutral() {
        assert_eq!(Direction::of(0.0), Direction::Neutral);
        assert_eq!(Direction::of(-0.0), Direction::Neutral);
        assert_eq!(Direction::of(1e-12).arrow(), "↑");
        assert_eq!(Direction::of(-4.0).to_string(), "decreases");
    }

    proptest! {
        #[test]
        fn prop_ranking_is_non_increasing(values in prop::collection::vec(-1e4f64..1e4, 1..20), k in 1usize..6) {
            let ranking = AttributionRanking::rank(&names(values.len()), &values, k, 0.0, 0.0);
            prop_assert_eq!(ranking.entries.len(), k.min(values.len()));
            for pair in ranking.entries.windows(2) {
                prop_assert!(pair[0].magnitude() >= pair[1].magnitude());
            }
            let max = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
            prop_assert_eq!(ranking.entries[0].magnitude(), max);
        }
    }
}
