//! PromQL expressions for the target workload.

/// Actual CPU usage (cores) summed across the deployment's pods, from
/// cadvisor. The 2m rate window smooths over scrape jitter.
pub fn usage_query(namespace: &str, deployment: &str) -> String {
    format!(
        "sum(rate(container_cpu_usage_seconds_total\
         {{namespace=\"{namespace}\", pod=~\"{deployment}-.*\", image!=\"\"}}[2m]))"
    )
}

/// Configured CPU limit (cores) summed across the same pods, from
/// kube-state-metrics.
pub fn limit_query(namespace: &str, deployment: &str) -> String {
    format!(
        "sum(kube_pod_container_resource_limits\
         {{namespace=\"{namespace}\", resource=\"cpu\", pod=~\"{deployment}-.*\"}})"
    )
}
