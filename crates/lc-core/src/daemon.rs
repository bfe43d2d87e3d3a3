//! The forecasting loop: one fetch→normalize→featurize→fit→publish
//! iteration per tick, strictly sequential, with failures confined to
//! the iteration boundary.
//!
//! There is deliberately no backoff or retry escalation: the workload's
//! own state can change between ticks, so every tick is an independent,
//! equally-weighted attempt and stale backoff would only delay recovery.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::panic::{catch_unwind, AssertUnwindSafe};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::features::{latest_window, make_supervised, MIN_TRAIN_ROWS};
use crate::forecast::Forecaster;
use crate::publish::ForecastGauge;
use crate::queries::{limit_query, usage_query};
use crate::series::{normalize, values, CADENCE_SECS};
use lc_prom::{PromError, SeriesSource};

/// Substituted when the limit query comes back empty or non-positive.
/// Keeps the utilization division defined; favors publishing *some*
/// forecast over aborting, since the limit rarely goes transiently
/// missing for long.
pub const LIMIT_FALLBACK: f64 = 0.1;

/// Range query resolution: one sample per minute.
pub const RANGE_STEP_SECS: u64 = 60;

/// How one iteration ended, short of an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationOutcome {
    /// A model forecast was published.
    Published(f64),
    /// Too few training rows; 0.0 was published (degrade path).
    Degraded,
    /// Usage query returned no points; nothing was published and the
    /// previous value, if any, stays live.
    NoData,
}

/// Failures that abort an iteration. All recoverable: skip, retry next
/// tick. The variant records which query failed for diagnosis.
#[derive(Error, Debug)]
pub enum IterationError {
    #[error("usage range query failed: {0}")]
    UsageQuery(#[source] PromError),
    #[error("limit instant query failed: {0}")]
    LimitQuery(#[source] PromError),
}

/// Run one iteration body against `source`, publishing into `gauge`.
///
/// `now` is injected so tests can pin the query window; the scheduler
/// passes `Utc::now()`.
pub fn run_iteration<S: SeriesSource>(
    config: &Config,
    source: &S,
    forecaster: &Forecaster,
    gauge: &ForecastGauge,
    now: DateTime<Utc>,
) -> Result<IterationOutcome, IterationError> {
    let start = now - ChronoDuration::minutes(config.lookback_minutes() as i64);

    let q_usage = usage_query(&config.namespace, &config.deployment);
    let points = source
        .range_query(&q_usage, start, now, RANGE_STEP_SECS)
        .map_err(IterationError::UsageQuery)?;
    if points.is_empty() {
        return Ok(IterationOutcome::NoData);
    }
    info!(points = points.len(), "fetched usage history");

    let series = normalize(&points, CADENCE_SECS);

    let q_limit = limit_query(&config.namespace, &config.deployment);
    let limit = match source
        .instant_query(&q_limit)
        .map_err(IterationError::LimitQuery)?
    {
        Some(limit) if limit > 0.0 => limit,
        other => {
            warn!(limit = ?other, fallback = LIMIT_FALLBACK, "unusable cpu limit, using fallback");
            LIMIT_FALLBACK
        }
    };

    // Utilization fraction series: usage (cores) / limit (cores).
    let util: Vec<f64> = values(&series).iter().map(|v| v / limit).collect();

    let dataset = make_supervised(&util, config.lags);
    let latest = latest_window(&util, config.lags);
    match latest {
        Some(latest) if dataset.has_enough_rows() => {
            let forecast = forecaster.forecast(&dataset, &latest);
            gauge.set(&config.deployment, forecast);
            Ok(IterationOutcome::Published(forecast))
        }
        _ => {
            warn!(
                rows = dataset.len(),
                min_rows = MIN_TRAIN_ROWS,
                "not enough samples for a model, publishing 0.0"
            );
            gauge.set(&config.deployment, 0.0);
            Ok(IterationOutcome::Degraded)
        }
    }
}

/// One scheduled tick: Idle→Running→Idle. Every failure mode — query
/// errors, and even a panic inside the body — is absorbed and logged
/// here so the scheduler itself never dies.
pub fn tick<S: SeriesSource>(
    config: &Config,
    source: &S,
    forecaster: &Forecaster,
    gauge: &ForecastGauge,
) {
    let result = catch_unwind(AssertUnwindSafe(|| {
        run_iteration(config, source, forecaster, gauge, Utc::now())
    }));
    match result {
        Ok(Ok(IterationOutcome::Published(forecast))) => {
            info!(deployment = %config.deployment, forecast, "published forecast");
        }
        Ok(Ok(IterationOutcome::Degraded)) => {
            info!(deployment = %config.deployment, "published degrade-path forecast 0.0");
        }
        Ok(Ok(IterationOutcome::NoData)) => {
            warn!(deployment = %config.deployment, "no usage data points, retrying next tick");
        }
        Ok(Err(e)) => {
            error!(deployment = %config.deployment, error = %e, "iteration failed");
        }
        Err(_) => {
            error!(deployment = %config.deployment, "iteration panicked, continuing");
        }
    }
}

/// The scheduler: run ticks forever at the configured interval.
pub fn run_loop<S: SeriesSource>(config: &Config, source: &S, gauge: &ForecastGauge) {
    let forecaster = Forecaster::default();
    let interval = std::time::Duration::from_secs(config.interval_secs);
    info!(
        interval_secs = config.interval_secs,
        lags = config.lags,
        lookback_min = config.lookback_minutes(),
        "forecast loop starting"
    );
    loop {
        tick(config, source, &forecaster, gauge);
        std::thread::sleep(interval);
    }
}
