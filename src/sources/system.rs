//! Process-wide property table.
//!
//! The in-process analog of `-Dkey=value` launch flags. The application fills the
//! table once at startup; resolution only ever reads it.

use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static PROPERTIES: LazyLock<ArcSwap<HashMap<String, String>>> =
    LazyLock::new(|| ArcSwap::from_pointee(HashMap::new()));

/// Read a process property.
pub fn system_property(key: &str) -> Option<String> {
    PROPERTIES.load().get(key).cloned()
}

/// Set a process property, returning the previous value.
pub fn set_system_property(key: impl Into<String>, value: impl Into<String>) -> Option<String> {
    let key = key.into();
    let value = value.into();
    let mut previous = None;
    PROPERTIES.rcu(|current| {
        let mut next = HashMap::clone(current);
        previous = next.insert(key.clone(), value.clone());
        next
    });
    previous
}

/// Remove a process property, returning its value.
pub fn remove_system_property(key: &str) -> Option<String> {
    let mut previous = None;
    PROPERTIES.rcu(|current| {
        let mut next = HashMap::clone(current);
        previous = next.remove(key);
        next
    });
    previous
}

/// Snapshot of the whole table.
pub fn system_properties() -> Arc<HashMap<String, String>> {
    PROPERTIES.load_full()
}

/// Install `-Dkey=value` arguments into the property table.
///
/// `-Dkey` without `=` sets an empty value. Every other argument is returned, in
/// order, for the application's own argument parser.
///
/// # Examples
///
/// ```rust
/// use provenance_config::sources::{install_from_args, system_property};
///
/// let rest = install_from_args(["server", "-Ddoc.example.port=9000", "--verbose"]);
/// assert_eq!(rest, vec!["server", "--verbose"]);
/// assert_eq!(system_property("doc.example.port").as_deref(), Some("9000"));
/// ```
pub fn install_from_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut rest = Vec::new();
    for arg in args {
        let arg = arg.into();
        match parse_definition(&arg) {
            Some((key, value)) => {
                tracing::debug!(key, "Installing process property from arguments");
                set_system_property(key, value);
            }
            None => rest.push(arg),
        }
    }
    rest
}

fn parse_definition(arg: &str) -> Option<(&str, &str)> {
    let definition = arg.strip_prefix("-D")?;
    let (key, value) = definition.split_once('=').unwrap_or((definition, ""));
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    // The table is process-global, so every test uses its own key prefix.

    #[test]
    fn test_set_and_remove() {
        assert_eq!(system_property("test.system.set"), None);
        assert_eq!(set_system_property("test.system.set", "a"), None);
        assert_eq!(set_system_property("test.system.set", "b"), Some("a".into()));
        assert_eq!(system_property("test.system.set").as_deref(), Some("b"));

        assert_eq!(remove_system_property("test.system.set"), Some("b".into()));
        assert_eq!(system_property("test.system.set"), None);
        assert_eq!(remove_system_property("test.system.set"), None);
    }

    #[test]
    fn test_concurrent_sets_report_each_previous_value_once() {
        const KEY: &str = "test.concurrent.set";
        let handles: Vec<_> = (0..8)
            .map(|i| std::thread::spawn(move || set_system_property(KEY, i.to_string())))
            .collect();
        let mut seen: Vec<Option<String>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        seen.push(system_property(KEY));
        seen.sort();

        // Every write replaced exactly one earlier state: the initial absence or another write.
        let mut expected: Vec<Option<String>> = (0..8).map(|i| Some(i.to_string())).collect();
        expected.push(None);
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_concurrent_removes_report_value_once() {
        const KEY: &str = "test.concurrent.remove";
        set_system_property(KEY, "only");
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| remove_system_property(KEY)))
            .collect();
        let removed: Vec<String> = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(removed, vec!["only".to_string()]);
    }

    #[test]
    fn test_install_from_args() {
        let rest = install_from_args([
            "-Dtest.args.host=localhost",
            "run",
            "-Dtest.args.flag",
            "-D",
            "-D=orphan",
            "-Dtest.args.url=jdbc:x?a=b",
        ]);

        assert_eq!(rest, vec!["run", "-D", "-D=orphan"]);
        assert_eq!(system_property("test.args.host").as_deref(), Some("localhost"));
        assert_eq!(system_property("test.args.flag").as_deref(), Some(""));
        assert_eq!(system_property("test.args.url").as_deref(), Some("jdbc:x?a=b"));
    }

    #[test]
    fn test_snapshot_is_stable() {
        set_system_property("test.snapshot.key", "before");
        let snapshot = system_properties();
        set_system_property("test.snapshot.key", "after");

        assert_eq!(snapshot.get("test.snapshot.key").map(String::as_str), Some("before"));
        assert_eq!(system_property("test.snapshot.key").as_deref(), Some("after"));
    }
}
