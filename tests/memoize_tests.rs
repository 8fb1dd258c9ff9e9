//! End-to-end tests through the Memoized wrapper
//!
//! Exercises the full stack the way a caller would: wrap a callable with
//! a policy, call it, and observe cache behavior through the engine
//! handle.

use std::cell::Cell;
use std::thread::sleep;
use std::time::Duration;

use chrono::TimeDelta;
use memento::{CacheError, CachePolicy, Memoized};

/// Installs a test subscriber so RUST_LOG can surface cache events.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memento=info".into()),
        )
        .with_test_writer()
        .try_init();
}

#[test]
fn test_output_value_round_trip() {
    init_tracing();
    let calls = Cell::new(0);
    let mut identity = Memoized::new("identity", CachePolicy::default(), |args: &(i32,)| {
        calls.set(calls.get() + 1);
        Ok(args.0)
    });

    assert_eq!(identity.call((1,)).unwrap(), 1);
    assert_eq!(identity.call((1,)).unwrap(), 1);
    assert_eq!(calls.get(), 1, "repeat call must come from the cache");
}

#[test]
fn test_call_duration_recorded() {
    init_tracing();
    let mut slow = Memoized::new("slow", CachePolicy::default(), |args: &(i32,)| {
        sleep(Duration::from_millis(30));
        Ok(args.0)
    });

    slow.call((1,)).unwrap();

    let entry = slow.engine().search(&slow.describe((1,))).unwrap();
    assert!(
        entry.call_duration >= Duration::from_millis(30),
        "entry must record how long the original computation took"
    );
}

#[test]
fn test_bypass_recomputes_and_replaces() {
    init_tracing();
    let calls = Cell::new(0);
    let mut counter = Memoized::new("counter", CachePolicy::default(), |_args: &()| {
        calls.set(calls.get() + 1);
        Ok(calls.get())
    });

    assert_eq!(counter.call(()).unwrap(), 1);
    assert_eq!(counter.call(()).unwrap(), 1, "cached value served");

    // Bypass always invokes and replaces the entry under the signature.
    assert_eq!(counter.call_uncached(()).unwrap(), 2);
    assert_eq!(counter.call(()).unwrap(), 2, "cache now holds the fresh value");
    assert_eq!(counter.engine().len(), 1);
}

#[test]
fn test_max_size_keeps_two_most_recent() {
    init_tracing();
    let mut doubler = Memoized::new(
        "double",
        CachePolicy::new().with_max_size(2),
        |args: &(i32,)| Ok(args.0 * 2),
    );

    doubler.call((1,)).unwrap();
    doubler.call((2,)).unwrap();
    assert_eq!(doubler.engine().len(), 2);

    doubler.call((3,)).unwrap();
    assert_eq!(doubler.engine().len(), 2);
    assert!(doubler.engine().search(&doubler.describe((1,))).is_err());
    assert!(doubler.engine().search(&doubler.describe((2,))).is_ok());
    assert!(doubler.engine().search(&doubler.describe((3,))).is_ok());

    doubler.call((4,)).unwrap();
    assert_eq!(doubler.engine().len(), 2);
}

#[test]
fn test_max_hits_refreshes_stale_value() {
    init_tracing();
    let calls = Cell::new(0);
    let mut flaky = Memoized::new(
        "flaky",
        CachePolicy::new().with_max_hits(2),
        |args: &(i32,)| {
            calls.set(calls.get() + 1);
            Ok(args.0)
        },
    );

    flaky.call((1,)).unwrap(); // miss: invoked
    flaky.call((1,)).unwrap(); // hit within limit
    assert_eq!(calls.get(), 1);

    let value = flaky.call((1,)).unwrap(); // third access exceeds the limit
    assert_eq!(value, 1);
    assert_eq!(calls.get(), 2, "hit limit must trigger exactly one recompute");
}

#[test]
fn test_max_age_refreshes_after_sleep() {
    init_tracing();
    let calls = Cell::new(0);
    let mut aging = Memoized::new(
        "aging",
        CachePolicy::new().with_max_age(TimeDelta::milliseconds(100)),
        |args: &(i32,)| {
            calls.set(calls.get() + 1);
            Ok(args.0)
        },
    );

    aging.call((1,)).unwrap();
    aging.call((1,)).unwrap();
    assert_eq!(calls.get(), 1, "entry younger than the limit is served as-is");

    sleep(Duration::from_millis(150));

    assert_eq!(aging.call((1,)).unwrap(), 1);
    assert_eq!(calls.get(), 2, "entry older than the limit recomputes");
}

#[test]
fn test_clear_empties_cache() {
    init_tracing();
    let mut identity = Memoized::new("identity", CachePolicy::default(), |args: &(i32,)| {
        Ok(args.0)
    });

    identity.call((1,)).unwrap();
    assert_eq!(identity.engine().len(), 1);

    identity.engine_mut().clear();
    assert_eq!(identity.engine().len(), 0);

    // The next call is a plain miss again.
    identity.call((1,)).unwrap();
    assert_eq!(identity.engine().len(), 1);
}

#[test]
fn test_admission_post_condition() {
    init_tracing();
    let mut identity = Memoized::new("identity", CachePolicy::default(), |args: &(i32,)| {
        Ok(args.0)
    });

    identity.call((7,)).unwrap();

    let entry = identity.engine().search(&identity.describe((7,))).unwrap();
    assert_eq!(entry.hits, 1, "a freshly admitted entry carries one hit");
}

#[test]
fn test_callable_error_propagates_uncached() {
    init_tracing();
    let mut checked = Memoized::new("checked", CachePolicy::default(), |args: &(i32,)| {
        if args.0 < 0 {
            anyhow::bail!("negative input {}", args.0);
        }
        Ok(args.0)
    });

    let err = checked.call((-1,)).unwrap_err();
    assert!(matches!(err, CacheError::Computation(_)));
    assert!(err.to_string().contains("negative input -1"));
    assert!(checked.engine().is_empty(), "failed computations are not cached");

    assert_eq!(checked.call((3,)).unwrap(), 3);
}

#[test]
fn test_snapshot_and_stats_serialize() {
    init_tracing();
    let mut identity = Memoized::new("identity", CachePolicy::default(), |args: &(i32,)| {
        Ok(args.0)
    });

    identity.call((1,)).unwrap();
    identity.call((1,)).unwrap();
    identity.call((2,)).unwrap();

    let snapshots = identity.engine().snapshot();
    assert_eq!(snapshots.len(), 2);
    let json = serde_json::to_string(&snapshots).unwrap();
    assert!(json.contains("identity(1)"));
    assert!(json.contains("identity(2)"));

    let stats = identity.engine().stats();
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 2);
    assert_eq!(json["total_entries"], 2);
}

#[test]
fn test_dump_is_human_readable() {
    init_tracing();
    let mut identity = Memoized::new(
        "identity",
        CachePolicy::new().with_max_size(4).with_max_hits(2),
        |args: &(i32,)| Ok(args.0),
    );

    identity.call((1,)).unwrap();

    let dump = identity.engine().to_string();
    assert!(dump.contains("max_size=Some(4)"));
    assert!(dump.contains("max_hits=Some(2)"));
    assert!(dump.contains("identity(1)"));
}
