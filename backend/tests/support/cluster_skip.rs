//! `SKIP_TEST_CLUSTER` policy for the PostgreSQL-backed suites.
//!
//! A suite that cannot reach a database fails loudly unless the environment
//! opts out, so broken CI setups are not reported as green.

/// True when `SKIP_TEST_CLUSTER` is "1", "true" or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Print a skip marker and return `None` when skipping is allowed.
///
/// # Panics
///
/// Panics with `reason` unless `SKIP_TEST_CLUSTER` is truthy.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test database setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

#[cfg(test)]
mod tests {
    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("1"), true)]
    #[case(Some("YES"), true)]
    #[case(Some("true"), true)]
    #[case(Some("0"), false)]
    #[case(None, false)]
    fn skipping_requires_an_explicit_opt_out(#[case] value: Option<&str>, #[case] expected: bool) {
        let _guard = lock_env([("SKIP_TEST_CLUSTER", value.map(str::to_owned))]);

        assert_eq!(should_skip_test_cluster(), expected);
    }
}
