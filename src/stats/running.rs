//! Running statistics over the most recent N values.
//!
//! Statistic families are dispatched by an explicit kind enumeration over an
//! explicit window state, so callers can see (and serialize) exactly what a
//! statistic remembers:
//!
//! - `Mean` / `Median`: plain statistics of the buffered window
//! - `Bucket`: an exponential-style bucket sum, equivalent to a Bayesian
//!   update with fixed effective length
//! - `KernelMean` / `Bartlett`: recency-weighted kernel averages (uniform
//!   and triangular kernels)
//!
//! Window semantics: values append until the window is full, then overwrite
//! in ring order. While the window is filling, kernel statistics renormalize
//! the trailing slice of the kernel over the available values.

use serde::{Deserialize, Serialize};

use crate::error::ImpactError;

/// Which running statistic to maintain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticKind {
    Mean,
    Median,
    Bucket,
    KernelMean,
    Bartlett,
}

/// Ring buffer over the most recent `length` values.
///
/// `write_index` is `None` while the buffer is still filling; once full it
/// points at the oldest value (the next overwrite position).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryBuffer {
    values: Vec<f64>,
    length: usize,
    write_index: Option<usize>,
}

impl MemoryBuffer {
    fn new(seed: &[f64], length: usize) -> Self {
        if seed.len() >= length {
            MemoryBuffer {
                values: seed[seed.len() - length..].to_vec(),
                length,
                write_index: Some(0),
            }
        } else {
            MemoryBuffer {
                values: seed.to_vec(),
                length,
                write_index: None,
            }
        }
    }

    fn push(&mut self, value: f64) {
        match self.write_index {
            Some(idx) => {
                self.values[idx] = value;
                self.write_index = Some((idx + 1) % self.length);
            }
            None => {
                self.values.push(value);
                if self.values.len() == self.length {
                    self.write_index = Some(0);
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    /// Values in chronological order, oldest first.
    fn chronological(&self) -> Vec<f64> {
        match self.write_index {
            Some(idx) if idx > 0 => {
                let mut out = self.values[idx..].to_vec();
                out.extend_from_slice(&self.values[..idx]);
                out
            }
            _ => self.values.clone(),
        }
    }
}

/// Exponential-style bucket state: a decaying sum and an effective count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketState {
    sum: f64,
    count: usize,
    length: usize,
}

/// A running statistic over the most recent values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunningStatistic {
    Mean(MemoryBuffer),
    Median(MemoryBuffer),
    Bucket(BucketState),
    KernelMean { buffer: MemoryBuffer, kernel: Vec<f64> },
    Bartlett { buffer: MemoryBuffer, kernel: Vec<f64> },
}

/// Kernel weights in chronological order (oldest first), normalized to sum
/// to one.
fn normalized_kernel(raw: &[f64]) -> Vec<f64> {
    let total: f64 = raw.iter().sum();
    raw.iter().map(|w| w / total).collect()
}

fn kernel_average(buffer: &MemoryBuffer, kernel: &[f64]) -> f64 {
    let values = buffer.chronological();
    if values.len() == kernel.len() {
        kernel.iter().zip(&values).map(|(w, v)| w * v).sum()
    } else {
        // Window still filling: weight the available values by the most
        // recent slice of the kernel, renormalized.
        let tail = &kernel[kernel.len() - values.len()..];
        let total: f64 = tail.iter().sum();
        tail.iter().zip(&values).map(|(w, v)| w * v).sum::<f64>() / total
    }
}

impl RunningStatistic {
    /// Build a statistic of the given kind seeded with `seed` (oldest first)
    /// over a window of `length` values.
    pub fn new(kind: StatisticKind, seed: &[f64], length: usize) -> Result<Self, ImpactError> {
        if length == 0 {
            return Err(ImpactError::invalid_input(
                "running statistic window must be non-empty",
            ));
        }
        Ok(match kind {
            StatisticKind::Mean => RunningStatistic::Mean(MemoryBuffer::new(seed, length)),
            StatisticKind::Median => RunningStatistic::Median(MemoryBuffer::new(seed, length)),
            StatisticKind::Bucket => RunningStatistic::Bucket(BucketState {
                sum: seed.iter().sum(),
                count: seed.len(),
                length,
            }),
            StatisticKind::KernelMean => RunningStatistic::KernelMean {
                buffer: MemoryBuffer::new(seed, length),
                kernel: normalized_kernel(&vec![1.0; length]),
            },
            StatisticKind::Bartlett => RunningStatistic::Bartlett {
                buffer: MemoryBuffer::new(seed, length),
                // Triangular weights rising toward the most recent value.
                kernel: normalized_kernel(
                    &(1..=length).map(|i| i as f64).collect::<Vec<f64>>(),
                ),
            },
        })
    }

    /// Add a new value to the running statistic.
    pub fn update(&mut self, value: f64) {
        match self {
            RunningStatistic::Mean(buffer) | RunningStatistic::Median(buffer) => {
                buffer.push(value);
            }
            RunningStatistic::Bucket(state) => {
                if state.count >= state.length {
                    state.sum = (state.length as f64 - 1.0) * state.sum / state.count as f64 + value;
                    state.count = state.length;
                } else {
                    state.sum += value;
                    state.count += 1;
                }
            }
            RunningStatistic::KernelMean { buffer, .. }
            | RunningStatistic::Bartlett { buffer, .. } => {
                buffer.push(value);
            }
        }
    }

    /// Current value of the running statistic.
    pub fn get(&self) -> f64 {
        match self {
            RunningStatistic::Mean(buffer) => {
                let values = &buffer.values;
                values.iter().sum::<f64>() / values.len() as f64
            }
            RunningStatistic::Median(buffer) => {
                let mut sorted = buffer.values.clone();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 1 {
                    sorted[mid]
                } else {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                }
            }
            RunningStatistic::Bucket(state) => state.sum / state.count as f64,
            RunningStatistic::KernelMean { buffer, kernel }
            | RunningStatistic::Bartlett { buffer, kernel } => kernel_average(buffer, kernel),
        }
    }

    /// Number of values currently informing the statistic.
    pub fn len(&self) -> usize {
        match self {
            RunningStatistic::Mean(buffer) | RunningStatistic::Median(buffer) => buffer.len(),
            RunningStatistic::Bucket(state) => state.count,
            RunningStatistic::KernelMean { buffer, .. }
            | RunningStatistic::Bartlett { buffer, .. } => buffer.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Map a data series through a fresh running statistic, returning the
/// running values.
pub fn translate(
    kind: StatisticKind,
    length: usize,
    data: &[f64],
) -> Result<Vec<f64>, ImpactError> {
    let mut statistic = RunningStatistic::new(kind, &[], length)?;
    let mut out = Vec::with_capacity(data.len());
    for &value in data {
        statistic.update(value);
        out.push(statistic.get());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(kind: StatisticKind) -> RunningStatistic {
        RunningStatistic::new(kind, &[0.0, 1.0, 2.0, 3.0], 5).unwrap()
    }

    #[test]
    fn mean_over_filling_then_full_window() {
        let mut stat = seeded(StatisticKind::Mean);
        assert!((stat.get() - 1.5).abs() < 1e-12);
        stat.update(4.0);
        assert!((stat.get() - 2.0).abs() < 1e-12);
        stat.update(5.0);
        // Window slid: mean of 1..=5.
        assert!((stat.get() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn median_over_filling_then_full_window() {
        let mut stat = seeded(StatisticKind::Median);
        assert!((stat.get() - 1.5).abs() < 1e-12);
        stat.update(4.0);
        assert!((stat.get() - 2.0).abs() < 1e-12);
        stat.update(5.0);
        assert!((stat.get() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn bucket_decays_once_full() {
        let mut stat = seeded(StatisticKind::Bucket);
        assert!((stat.get() - 1.5).abs() < 1e-12);
        stat.update(4.0);
        assert!((stat.get() - 2.0).abs() < 1e-12);
        stat.update(5.0);
        // sum = 4 * 10 / 5 + 5 = 13 over an effective count of 5.
        assert!((stat.get() - 2.6).abs() < 1e-12);
    }

    #[test]
    fn kernel_mean_matches_plain_mean() {
        let mut stat = seeded(StatisticKind::KernelMean);
        assert!((stat.get() - 1.5).abs() < 1e-12);
        stat.update(4.0);
        assert!((stat.get() - 2.0).abs() < 1e-12);
        stat.update(5.0);
        assert!((stat.get() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn bartlett_weights_recent_values_higher() {
        let mut stat = seeded(StatisticKind::Bartlett);
        // Partial window: weights 2,3,4,5 over values 0,1,2,3.
        assert!((stat.get() - 26.0 / 14.0).abs() < 1e-12);
        stat.update(4.0);
        // Full window: weights 1..=5 over values 0..=4.
        assert!((stat.get() - 40.0 / 15.0).abs() < 1e-12);
        stat.update(5.0);
        assert!((stat.get() - 55.0 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn ring_overwrites_oldest_first() {
        let mut stat = RunningStatistic::new(StatisticKind::Mean, &[10.0, 20.0, 30.0], 3).unwrap();
        stat.update(40.0);
        // 10 dropped: mean of 20, 30, 40.
        assert!((stat.get() - 30.0).abs() < 1e-12);
        stat.update(50.0);
        assert!((stat.get() - 40.0).abs() < 1e-12);
    }

    #[test]
    fn long_seed_keeps_only_the_window() {
        let stat =
            RunningStatistic::new(StatisticKind::Mean, &[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert_eq!(stat.len(), 3);
        assert!((stat.get() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn translate_tracks_a_series() {
        let out = translate(StatisticKind::Mean, 2, &[1.0, 3.0, 5.0]).unwrap();
        assert_eq!(out, vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn zero_length_window_is_rejected() {
        assert!(RunningStatistic::new(StatisticKind::Mean, &[], 0).is_err());
    }
}
