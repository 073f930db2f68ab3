//! Skip policy for suites that need the embedded PostgreSQL cluster.
//!
//! Set `SKIP_TEST_CLUSTER` to a truthy value ("1", "true", "yes") on machines
//! that cannot start the cluster. Without it a setup failure fails the test so
//! CI breakage is never masked.

/// Whether `SKIP_TEST_CLUSTER` asks for cluster-backed tests to be skipped.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Turn a cluster setup failure into a skip or a panic, per the skip policy.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
