use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// Count, mean and population standard deviation over a non-empty sample.
///
/// There is no empty `Stats`: [`Stats::of`] returns `None` for an empty
/// sample, so `mean` and the deviation are always defined. Decoding applies
/// the same rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StatsFields")]
pub struct Stats {
    count: u64,
    mean: f64,
    population_standard_deviation: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsFields {
    count: u64,
    mean: f64,
    population_standard_deviation: f64,
}

impl TryFrom<StatsFields> for Stats {
    type Error = StatsError;

    fn try_from(fields: StatsFields) -> Result<Self, Self::Error> {
        if fields.count == 0 {
            return Err(StatsError::Empty);
        }
        if !fields.mean.is_finite() {
            return Err(StatsError::InvalidMean(fields.mean));
        }
        let deviation = fields.population_standard_deviation;
        if !deviation.is_finite() || deviation < 0.0 {
            return Err(StatsError::InvalidDeviation(deviation));
        }
        Ok(Self {
            count: fields.count,
            mean: fields.mean,
            population_standard_deviation: deviation,
        })
    }
}

impl Stats {
    pub fn of<I>(values: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<f64>,
    {
        let values: Vec<f64> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            count: values.len() as u64,
            mean,
            population_standard_deviation: variance.sqrt(),
        })
    }

    /// Sample of whole milliseconds.
    pub fn of_millis<I>(millis: I) -> Option<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        Self::of(millis.into_iter().map(|ms| ms as f64))
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn population_standard_deviation(&self) -> f64 {
        self.population_standard_deviation
    }

    /// Mean truncated toward zero.
    pub fn mean_millis(&self) -> i64 {
        truncate(self.mean)
    }

    /// Population standard deviation truncated toward zero.
    pub fn stddev_millis(&self) -> i64 {
        truncate(self.population_standard_deviation)
    }
}

fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}
