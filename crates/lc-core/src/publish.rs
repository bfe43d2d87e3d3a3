//! Forecast publisher: the one piece of state that outlives iterations.
//!
//! A single gauge, `predictor_cpu_forecast{deployment=...}`, overwritten
//! whole every iteration. The prometheus crate stores gauge values in
//! atomics, so the scrape thread never observes a torn value while the
//! loop writes.

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

/// Gauge name downstream autoscalers query for.
pub const FORECAST_GAUGE_NAME: &str = "predictor_cpu_forecast";

/// Owns the registry and the forecast gauge. Cloneable handle; clones
/// share the same underlying registry.
#[derive(Clone)]
pub struct ForecastGauge {
    registry: Registry,
    forecast: GaugeVec,
}

impl ForecastGauge {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let forecast = GaugeVec::new(
            Opts::new(
                FORECAST_GAUGE_NAME,
                "Predicted CPU utilization fraction (0..1+)",
            ),
            &["deployment"],
        )?;
        registry.register(Box::new(forecast.clone()))?;
        Ok(Self { registry, forecast })
    }

    /// Overwrite the forecast for one deployment. No history is kept.
    pub fn set(&self, deployment: &str, value: f64) {
        self.forecast.with_label_values(&[deployment]).set(value);
    }

    /// Current value for a deployment (0.0 until first set).
    pub fn get(&self, deployment: &str) -> f64 {
        self.forecast.with_label_values(&[deployment]).get()
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_render_exposes_the_gauge() {
        let gauge = ForecastGauge::new().unwrap();
        gauge.set("cpu-demo", 0.42);
        let output = gauge.render().unwrap();
        assert!(output.contains("# TYPE predictor_cpu_forecast gauge"));
        assert!(output.contains("predictor_cpu_forecast{deployment=\"cpu-demo\"} 0.42"));
    }

    #[test]
    fn set_overwrites_without_history() {
        let gauge = ForecastGauge::new().unwrap();
        gauge.set("cpu-demo", 0.1);
        gauge.set("cpu-demo", 0.9);
        assert_eq!(gauge.get("cpu-demo"), 0.9);
        let output = gauge.render().unwrap();
        assert_eq!(output.matches("predictor_cpu_forecast{").count(), 1);
    }

    #[test]
    fn labels_are_independent() {
        let gauge = ForecastGauge::new().unwrap();
        gauge.set("a", 0.2);
        gauge.set("b", 0.8);
        assert_eq!(gauge.get("a"), 0.2);
        assert_eq!(gauge.get("b"), 0.8);
    }

    #[test]
    fn concurrent_set_and_render() {
        let gauge = ForecastGauge::new().unwrap();
        gauge.set("cpu-demo", 0.0);
        let writer = gauge.clone();
        let handle = std::thread::spawn(move || {
            for i in 0..1_000 {
                writer.set("cpu-demo", i as f64 / 1_000.0);
            }
        });
        for _ in 0..100 {
            let out = gauge.render().unwrap();
            assert!(out.contains(FORECAST_GAUGE_NAME));
        }
        handle.join().unwrap();
        assert_eq!(gauge.get("cpu-demo"), 0.999);
    }
}
