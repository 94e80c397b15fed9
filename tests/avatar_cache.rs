use badgekit::{AvatarCache, CacheConfig};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn config() -> CacheConfig {
    CacheConfig {
        ttl: Duration::from_secs(10),
        sweep_interval: Duration::from_secs(2),
    }
}

#[test]
fn defaults_match_two_hours_and_one_minute() {
    let c = CacheConfig::default();
    assert_eq!(c.ttl, Duration::from_secs(7200));
    assert_eq!(c.sweep_interval, Duration::from_secs(60));
}

#[test]
fn set_then_get_and_expire_on_sweep() {
    let cache: AvatarCache = AvatarCache::new(config());
    let t0 = Instant::now();
    cache.set_at("a", "data:image/png;base64,AAA".to_string(), t0);
    assert_eq!(cache.get("a").as_deref(), Some("data:image/png;base64,AAA"));

    // Reads never check age.
    assert_eq!(cache.sweep(t0 + Duration::from_secs(5)), 0);
    assert!(cache.get("a").is_some());

    assert_eq!(cache.sweep(t0 + Duration::from_secs(11)), 1);
    assert!(cache.get("a").is_none());
    assert!(cache.is_empty());
}

#[test]
fn opportunistic_sweep_respects_interval() {
    let cache: AvatarCache<u32> = AvatarCache::new(config());
    let t0 = Instant::now();
    cache.set_at("x", 1, t0);
    assert_eq!(cache.maybe_sweep(t0 + Duration::from_secs(30)), Some(1));
    assert_eq!(cache.maybe_sweep(t0 + Duration::from_secs(31)), None);
}

#[test]
fn failed_fetch_is_not_cached() {
    let cache: AvatarCache = AvatarCache::new(config());
    let now = Instant::now();
    assert_eq!(cache.get_or_fetch("ghost", now, || None), None);
    assert!(cache.is_empty());

    let got = cache.get_or_fetch("octo", now, || Some("img".to_string()));
    assert_eq!(got.as_deref(), Some("img"));
    let again = cache.get_or_fetch("octo", now, || panic!("should be cached"));
    assert_eq!(again.as_deref(), Some("img"));
}

#[test]
fn concurrent_access_is_safe() {
    let cache: Arc<AvatarCache<usize>> = Arc::new(AvatarCache::new(config()));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("user{}", (t * 100 + i) % 50);
                    cache.set(key.clone(), i);
                    let _ = cache.get(&key);
                    cache.maybe_sweep(Instant::now());
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(cache.len(), 50);
}
