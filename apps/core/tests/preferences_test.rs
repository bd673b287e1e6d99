use siteswitch_core::kv_store::SqliteBackend;
use siteswitch_core::preferences::{MemoryBackend, PreferenceBackend, PreferenceStore};
use siteswitch_core::recent::RecentList;

fn store() -> PreferenceStore<MemoryBackend> {
    PreferenceStore::new(MemoryBackend::default(), "tprt-ss", 5)
}

#[test]
fn readding_existing_id_promotes_without_growing() {
    let backend = MemoryBackend::default().with_value("tprt-ss-recent-7", "[3,1,2]");
    let mut prefs = PreferenceStore::new(backend, "tprt-ss", 5);

    let list = prefs.add_recent(7, 1);
    assert_eq!(list.ids(), &[1, 3, 2]);
    assert_eq!(prefs.backend().get("tprt-ss-recent-7"), Some("[1,3,2]"));
}

#[test]
fn sixth_distinct_id_evicts_oldest() {
    let mut prefs = store();
    for id in 1..=6 {
        prefs.add_recent(7, id);
    }
    assert_eq!(prefs.recent(7).ids(), &[6, 5, 4, 3, 2]);
}

#[test]
fn repeated_add_is_idempotent() {
    let mut prefs = store();
    prefs.add_recent(7, 4);
    let once = prefs.add_recent(7, 9);
    let twice = prefs.add_recent(7, 9);
    assert_eq!(once, twice);
}

#[test]
fn any_add_sequence_stays_bounded_and_unique() {
    let mut prefs = store();
    let mut seed = 17_u64;
    for _ in 0..200 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let id = (seed >> 33) % 12;
        let list = prefs.add_recent(7, id);

        assert!(list.len() <= 5);
        assert_eq!(list.ids()[0], id);
        let mut sorted = list.ids().to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), list.len());
    }
}

#[test]
fn recents_are_scoped_per_user() {
    let mut prefs = store();
    prefs.add_recent(1, 10);
    prefs.add_recent(2, 20);

    assert_eq!(prefs.recent(1).ids(), &[10]);
    assert_eq!(prefs.recent(2).ids(), &[20]);
    assert_eq!(prefs.recent(3), RecentList::new(5));
}

#[test]
fn failing_backend_degrades_to_defaults() {
    let mut prefs = PreferenceStore::new(MemoryBackend::failing(), "tprt-ss", 5);
    prefs.set_dark_mode(true);
    assert!(!prefs.dark_mode());

    let list = prefs.add_recent(7, 3);
    assert_eq!(list.ids(), &[3]);
    assert!(prefs.recent(7).is_empty());
}

#[test]
fn unexpected_dark_mode_value_reads_as_light() {
    let backend = MemoryBackend::default().with_value("tprt-ss-dark-mode", "yes");
    let prefs = PreferenceStore::new(backend, "tprt-ss", 5);
    assert!(!prefs.dark_mode());
}

#[test]
fn sqlite_backend_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs").join("preferences.sqlite3");

    {
        let mut prefs = PreferenceStore::new(SqliteBackend::open(&path).unwrap(), "tprt-ss", 5);
        prefs.set_dark_mode(true);
        prefs.add_recent(42, 8);
        prefs.add_recent(42, 5);
    }

    let prefs = PreferenceStore::new(SqliteBackend::open(&path).unwrap(), "tprt-ss", 5);
    assert!(prefs.dark_mode());
    assert_eq!(prefs.recent(42).ids(), &[5, 8]);
}

#[test]
fn boxed_backend_is_usable_as_store() {
    let backend: Box<dyn PreferenceBackend> = Box::new(SqliteBackend::in_memory().unwrap());
    let mut prefs = PreferenceStore::new(backend, "custom", 3);
    prefs.add_recent(1, 1);
    assert_eq!(prefs.recent_key(1), "custom-recent-1");
    assert_eq!(prefs.recent(1).ids(), &[1]);
}
