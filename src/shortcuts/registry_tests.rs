use super::registry::*;
use super::types::{ShortcutDefinition, ShortcutSpec};

fn save_spec() -> ShortcutSpec {
    ShortcutSpec::new("save", vec![ShortcutDefinition::chord("s", ["ctrl"])])
}

fn top_spec() -> ShortcutSpec {
    ShortcutSpec::new("top", vec![ShortcutDefinition::sequence(["g", "g"])])
}

#[test]
fn test_new_registry_is_empty() {
    let registry = ShortcutRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert!(registry.current().is_empty());
}

#[test]
fn test_replace_preserves_order() {
    let registry = ShortcutRegistry::new();
    registry.replace(vec![save_spec(), top_spec()]);

    let current = registry.current();
    let ids: Vec<&str> = current.iter().map(|s| s.action_id.as_str()).collect();
    assert_eq!(ids, vec!["save", "top"]);
}

#[test]
fn test_replace_discards_previous_entries() {
    let registry = ShortcutRegistry::with_specs(vec![save_spec(), top_spec()]);
    registry.replace(vec![top_spec()]);

    assert_eq!(registry.len(), 1);
    assert!(registry.get("save").is_none());
    assert_eq!(registry.get("top"), Some(top_spec()));
}

#[test]
fn test_snapshot_is_unaffected_by_later_replace() {
    let registry = ShortcutRegistry::with_specs(vec![save_spec()]);
    let snapshot = registry.current();

    registry.clear();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0], save_spec());
    assert!(registry.is_empty());
}

#[test]
fn test_clones_share_storage() {
    let registry = ShortcutRegistry::new();
    let handle = registry.clone();

    handle.replace(vec![save_spec()]);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_replace_with_identical_config_is_stable() {
    let registry = ShortcutRegistry::new();
    registry.replace(vec![save_spec(), top_spec()]);
    let first = registry.current();
    registry.replace(vec![save_spec(), top_spec()]);
    let second = registry.current();

    assert_eq!(&*first, &*second);
}

#[test]
fn test_replace_from_another_thread() {
    let registry = ShortcutRegistry::new();
    let writer = registry.clone();

    std::thread::spawn(move || writer.replace(vec![save_spec(), top_spec()]))
        .join()
        .unwrap();

    assert_eq!(registry.len(), 2);
}

#[test]
fn test_concurrent_replaces_leave_a_whole_config() {
    let registry = ShortcutRegistry::new();
    let writers: Vec<_> = (1..=4)
        .map(|n| {
            let writer = registry.clone();
            std::thread::spawn(move || writer.replace(vec![save_spec(); n]))
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let current = registry.current();
    assert!((1..=4).contains(&current.len()));
    assert!(current.iter().all(|spec| *spec == save_spec()));
}
