//! Best-available GDP-per-capita provider.
//!
//! GDPpc observations come from several IAM models of uneven coverage. For
//! each ISO country the provider uses the highest-priority data available:
//!
//! 1. rows from the target IAM itself
//! 2. the per-ISO median across all IAMs
//! 3. the global median
//!
//! Baselines are drawn at `start_year`; growth projections arrive at 5-year
//! intervals and are applied annually, each year scaled by the previous
//! year's bucket rate. Regional (hierid) series are the ISO series scaled by
//! a nightlight-derived ratio.
//!
//! ISO series are cached in an explicit map; `clear_cache` drops it when the
//! underlying rows are replaced.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::economy::provider::SpaceTimeProvider;
use crate::error::ImpactError;

/// One GDPpc baseline observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineRow {
    pub year: i32,
    /// IAM model, e.g. `"low"`.
    pub model: String,
    /// SSP scenario, e.g. `"SSP3"`.
    pub scenario: String,
    pub iso: String,
    pub value: f64,
}

/// One projected GDPpc growth rate (multiplicative, at 5-year intervals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRow {
    pub year: i32,
    pub model: String,
    pub scenario: String,
    pub iso: String,
    pub growth: f64,
}

/// Nightlight-based downscaling ratio for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightlightRow {
    pub hierid: String,
    pub ratio: f64,
}

/// Median of a non-empty slice (mean of the middle pair on even counts).
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Scaling applied when a region has a nightlight row whose ratio is zero or
/// not finite.
const DARK_REGION_RATIO: f64 = 0.8;

/// GDP-per-capita provider selecting the best available data source.
#[derive(Debug, Clone)]
pub struct BestGdppcProvider {
    iam: String,
    ssp: String,
    start_year: i32,
    stop_year: i32,

    baseline_this: HashMap<String, f64>,
    baseline_anyiam: HashMap<String, f64>,
    baseline_global: Option<f64>,

    growth_this: HashMap<String, HashMap<i32, f64>>,
    growth_anyiam: HashMap<String, HashMap<i32, f64>>,
    growth_global: HashMap<i32, f64>,

    nightlights: HashMap<String, f64>,

    /// Per-ISO series cache, populated by `iso_timeseries`.
    cache: HashMap<String, Vec<f64>>,
}

impl BestGdppcProvider {
    pub fn new(
        iam: impl Into<String>,
        ssp: impl Into<String>,
        baselines: &[BaselineRow],
        growths: &[GrowthRow],
        nightlights: &[NightlightRow],
        start_year: i32,
        stop_year: i32,
    ) -> Result<Self, ImpactError> {
        let iam = iam.into();
        let ssp = ssp.into();
        if iam.is_empty() || ssp.is_empty() {
            return Err(ImpactError::invalid_input("iam and ssp must be non-empty"));
        }
        if stop_year < start_year {
            return Err(ImpactError::invalid_input(format!(
                "stop year {stop_year} precedes start year {start_year}"
            )));
        }

        let mut provider = BestGdppcProvider {
            iam,
            ssp,
            start_year,
            stop_year,
            baseline_this: HashMap::new(),
            baseline_anyiam: HashMap::new(),
            baseline_global: None,
            growth_this: HashMap::new(),
            growth_anyiam: HashMap::new(),
            growth_global: HashMap::new(),
            nightlights: nightlights
                .iter()
                .map(|row| (row.hierid.clone(), row.ratio))
                .collect(),
            cache: HashMap::new(),
        };
        provider.split_baselines(baselines);
        provider.split_growths(growths);
        Ok(provider)
    }

    /// Split baseline rows into the three priority tiers.
    fn split_baselines(&mut self, rows: &[BaselineRow]) {
        let mut per_iso: HashMap<String, Vec<f64>> = HashMap::new();
        let mut all = Vec::new();

        for row in rows {
            if row.scenario != self.ssp || row.year != self.start_year {
                continue;
            }
            if row.model == self.iam {
                self.baseline_this.entry(row.iso.clone()).or_insert(row.value);
            }
            per_iso.entry(row.iso.clone()).or_default().push(row.value);
            all.push(row.value);
        }

        for (iso, mut values) in per_iso {
            self.baseline_anyiam.insert(iso, median(&mut values));
        }
        if !all.is_empty() {
            self.baseline_global = Some(median(&mut all));
        }
    }

    /// Split growth rows into the three priority tiers, bucketed by 5-year
    /// index relative to `start_year`.
    ///
    /// The global tier is the per-bucket median of the target IAM's own
    /// rows.
    fn split_growths(&mut self, rows: &[GrowthRow]) {
        let mut anyiam: HashMap<String, HashMap<i32, Vec<f64>>> = HashMap::new();
        let mut global: HashMap<i32, Vec<f64>> = HashMap::new();

        for row in rows {
            if row.scenario != self.ssp {
                continue;
            }
            let bucket = (row.year - self.start_year) / 5;
            if row.model == self.iam {
                self.growth_this
                    .entry(row.iso.clone())
                    .or_default()
                    .entry(bucket)
                    .or_insert(row.growth);
                global.entry(bucket).or_default().push(row.growth);
            }
            anyiam
                .entry(row.iso.clone())
                .or_default()
                .entry(bucket)
                .or_default()
                .push(row.growth);
        }

        for (iso, buckets) in anyiam {
            let medians = buckets
                .into_iter()
                .map(|(bucket, mut values)| (bucket, median(&mut values)))
                .collect();
            self.growth_anyiam.insert(iso, medians);
        }
        for (bucket, mut values) in global {
            self.growth_global.insert(bucket, median(&mut values));
        }
    }

    fn best_baseline(&self, iso: &str) -> Result<f64, ImpactError> {
        if let Some(&value) = self.baseline_this.get(iso) {
            return Ok(value);
        }
        if let Some(&value) = self.baseline_anyiam.get(iso) {
            return Ok(value);
        }
        self.baseline_global.ok_or_else(|| {
            ImpactError::MissingData(format!(
                "no {} baseline rows at {} for any ISO",
                self.ssp, self.start_year
            ))
        })
    }

    fn best_growth(&self, iso: &str) -> &HashMap<i32, f64> {
        if let Some(buckets) = self.growth_this.get(iso) {
            return buckets;
        }
        if let Some(buckets) = self.growth_anyiam.get(iso) {
            return buckets;
        }
        &self.growth_global
    }

    /// Annual GDPpc for one ISO country, `start_year ..= stop_year`.
    ///
    /// The first call per ISO computes and caches the series; later calls
    /// return the cached copy.
    pub fn iso_timeseries(&mut self, iso: &str) -> Result<Vec<f64>, ImpactError> {
        if let Some(series) = self.cache.get(iso) {
            return Ok(series.clone());
        }

        let baseline = self.best_baseline(iso)?;
        let growth = self.best_growth(iso);

        let mut series = Vec::with_capacity((self.stop_year - self.start_year + 1) as usize);
        let mut current = baseline;
        series.push(current);
        for year in (self.start_year + 1)..=self.stop_year {
            // Growth is quoted at 5-year intervals; each year applies the
            // previous year's bucket rate.
            let bucket = (year - 1 - self.start_year) / 5;
            let rate = growth.get(&bucket).copied().ok_or_else(|| {
                ImpactError::MissingData(format!(
                    "no growth rate for {iso} in 5-year bucket {bucket} (year {year})"
                ))
            })?;
            current *= rate;
            series.push(current);
        }

        self.cache.insert(iso.to_string(), series.clone());
        Ok(series)
    }

    /// Drop all cached ISO series.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of ISO series currently cached.
    pub fn cached_series(&self) -> usize {
        self.cache.len()
    }

    pub fn stop_year(&self) -> i32 {
        self.stop_year
    }
}

impl SpaceTimeProvider for BestGdppcProvider {
    fn iam(&self) -> &str {
        &self.iam
    }

    fn ssp(&self) -> &str {
        &self.ssp
    }

    fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Annual GDPpc for one region: the ISO series scaled by the region's
    /// nightlight ratio. Regions without a nightlight row pass the ISO
    /// series through; a zero or non-finite ratio scales by 0.8.
    fn timeseries(&mut self, hierid: &str) -> Result<Vec<f64>, ImpactError> {
        let iso = hierid.get(..3).unwrap_or(hierid);
        let series = self.iso_timeseries(iso)?;
        match self.nightlights.get(hierid) {
            None => Ok(series),
            Some(&ratio) if !ratio.is_finite() || ratio == 0.0 => {
                Ok(series.iter().map(|v| DARK_REGION_RATIO * v).collect())
            }
            Some(&ratio) => Ok(series.iter().map(|v| ratio * v).collect()),
        }
    }
}
