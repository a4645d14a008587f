//! # Membership Filter Scenarios
//!
//! Several filter handles share one bit array through the store, the way
//! independent processes would.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use remote_bloom::{FilterConfigBuilder, FilterError, MembershipFilter};
    use shared_store::InMemoryAtomicStore;
    use tokio::sync::mpsc;

    use crate::integration::init_tracing;

    // =========================================================================
    // SCENARIO A
    // =========================================================================

    /// bits=2,000,000, probes=14; Add("foo"); Exists("foo") -> true;
    /// Exists("bar") -> false.
    ///
    /// With one element inserted the chance of "bar" being a false positive
    /// is far below 6.7e-5, so the negative check is effectively exact.
    #[tokio::test]
    async fn test_scenario_a_add_then_exists() {
        init_tracing();
        let store = Arc::new(InMemoryAtomicStore::new());
        let filter = MembershipFilter::new(store, "scenario:a", 2_000_000).unwrap();
        assert_eq!(filter.probes(), 14);

        filter.add(b"foo").await.unwrap();

        assert!(filter.exists(b"foo").await.unwrap());
        assert!(!filter.exists(b"bar").await.unwrap());
    }

    #[tokio::test]
    async fn test_unpopulated_key_reads_empty() {
        let store = Arc::new(InMemoryAtomicStore::new());
        let filter = MembershipFilter::new(store, "never:written", 1024).unwrap();

        assert!(!filter.exists(b"foo").await.unwrap());
    }

    // =========================================================================
    // FALSE POSITIVE RATE
    // =========================================================================

    /// m = 20n, k = 14 predicts ~6.7e-5. 20,000 probes of absent values
    /// should see about 1.3 false positives; the bound allows 15x that.
    #[tokio::test]
    async fn test_false_positive_rate_at_recommended_size() {
        let store = Arc::new(InMemoryAtomicStore::new());
        let n = 1_000u64;
        let filter = MembershipFilter::with_capacity(store, "fpr", n).unwrap();

        for i in 0..n {
            filter.add(format!("inserted_{}", i).as_bytes()).await.unwrap();
        }

        let trials = 20_000;
        let mut false_positives = 0;
        for i in 0..trials {
            if filter
                .exists(format!("absent_{}", i).as_bytes())
                .await
                .unwrap()
            {
                false_positives += 1;
            }
        }

        let observed = false_positives as f64 / trials as f64;
        assert!(
            observed <= 1e-3,
            "observed FPR {} exceeds tolerance (predicted {})",
            observed,
            filter.estimated_false_positive_rate(n)
        );
    }

    // =========================================================================
    // CONCURRENCY
    // =========================================================================

    /// Readers only ask about values whose `add` has already returned, so any
    /// `false` would be a false negative.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_and_readers_see_no_false_negatives() {
        let store = Arc::new(InMemoryAtomicStore::new());
        let config = FilterConfigBuilder::new()
            .key("shared:seen")
            .expected_elements(4_000)
            .build()
            .unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let mut writers = Vec::new();
        for w in 0..8 {
            let filter = MembershipFilter::from_config(store.clone(), config.clone()).unwrap();
            let tx = tx.clone();
            writers.push(tokio::spawn(async move {
                for i in 0..250 {
                    let value = format!("writer{}:{}", w, i);
                    filter.add(value.as_bytes()).await.unwrap();
                    tx.send(value).unwrap();
                }
            }));
        }
        drop(tx);

        let reader = MembershipFilter::from_config(store.clone(), config).unwrap();
        let mut checked = 0;
        while let Some(value) = rx.recv().await {
            assert!(
                reader.exists(value.as_bytes()).await.unwrap(),
                "false negative for {}",
                value
            );
            checked += 1;
        }

        for writer in writers {
            writer.await.unwrap();
        }
        assert_eq!(checked, 2_000);
    }

    // =========================================================================
    // LIFETIME
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_expired_bit_array_reads_empty() {
        let store = Arc::new(InMemoryAtomicStore::new());
        let filter = MembershipFilter::new(store, "daily:seen", 4096).unwrap();

        filter.add(b"foo").await.unwrap();
        filter.expire(10).await.unwrap();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(filter.exists(b"foo").await.unwrap());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!filter.exists(b"foo").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_resets_filter_for_all_handles() {
        let store = Arc::new(InMemoryAtomicStore::new());
        let a = MembershipFilter::new(store.clone(), "shared", 4096).unwrap();
        let b = MembershipFilter::new(store.clone(), "shared", 4096).unwrap();

        a.add(b"foo").await.unwrap();
        b.delete().await.unwrap();

        assert!(!a.exists(b"foo").await.unwrap());
    }

    #[tokio::test]
    async fn test_filter_on_lock_key_is_store_error() {
        let store = Arc::new(InMemoryAtomicStore::new());
        let lock = remote_lock::ReentrantLock::new(store.clone(), "resource").unwrap();
        assert!(lock.acquire().await.unwrap());

        let filter = MembershipFilter::new(store, "resource", 4096).unwrap();
        let err = filter.add(b"foo").await.unwrap_err();
        assert!(matches!(err, FilterError::Store(_)));
    }
}
