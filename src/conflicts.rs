//! Conflict resolution across duplicate keys and the persisted bundle.
//!
//! Two independent checks feed the validation pipeline:
//!
//! 1. duplicate keys within the current run: a key used by several
//!    `Translate` substitutions is allowed only when every occurrence
//!    carries the same value, and only the first occurrence writes the
//!    bundle entry;
//! 2. keys already defined in the persisted bundle: an identical value is
//!    reused (no new entry written), a different value is a fatal
//!    conflict.
//!
//! Instead of mutating the substitutions, the resolver reports the indices
//! whose bundle entry must be suppressed.

use std::collections::{BTreeSet, HashMap};

use crate::model::{Substitution, Task};
use crate::properties::{PropertyStore, strip_quotes};
use crate::status::Status;

/// Outcome of conflict resolution: the aggregated findings plus the set of
/// substitution indices excluded from the bundle write.
#[derive(Debug, Default)]
pub struct Resolution {
    pub status: Status,
    pub excluded: BTreeSet<usize>,
}

/// Runs both conflict checks. `store` is the loaded bundle snapshot, or
/// `None` when the bundle does not exist or could not be read; the
/// already-defined check is advisory and degrades to a no-op then.
pub fn resolve(subs: &[Substitution], store: Option<&PropertyStore>) -> Resolution {
    let mut resolution = Resolution::default();
    check_duplicate_keys(subs, &mut resolution);
    if let Some(store) = store {
        check_already_defined(subs, store, &mut resolution);
    }
    resolution
}

/// Duplicate keys within this run.
pub fn check_duplicate_keys(subs: &[Substitution], resolution: &mut Resolution) {
    // group indices by key, groups ordered by first occurrence
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, sub) in subs.iter().enumerate() {
        let group = groups.entry(sub.key.as_str()).or_insert_with(|| {
            order.push(sub.key.as_str());
            Vec::new()
        });
        group.push(i);
    }

    for key in order {
        let translated: Vec<usize> = groups[key]
            .iter()
            .copied()
            .filter(|&i| subs[i].task == Task::Translate)
            .collect();
        if translated.len() <= 1 {
            continue;
        }

        // only the first occurrence writes the entry
        for &i in &translated[1..] {
            resolution.excluded.insert(i);
        }

        let first_value = strip_quotes(&subs[translated[0]].value.value);
        let conflicting = translated
            .iter()
            .any(|&i| strip_quotes(&subs[i].value.value) != first_value);
        if conflicting {
            resolution
                .status
                .add_fatal(format!("key '{key}' is reused with different values"));
        } else {
            resolution.status.add_warning(format!(
                "key '{key}' is reused with the same value \"{first_value}\""
            ));
        }
    }
}

/// Keys already defined in the persisted bundle.
pub fn check_already_defined(
    subs: &[Substitution],
    store: &PropertyStore,
    resolution: &mut Resolution,
) {
    for (i, sub) in subs.iter().enumerate() {
        if sub.task != Task::Translate {
            continue;
        }
        let Some(existing) = store.get(&sub.key) else {
            continue;
        };
        let value = strip_quotes(&sub.value.value);
        if existing == value {
            resolution.excluded.insert(i);
            resolution.status.add_warning(format!(
                "key '{}' already exists in the bundle with the same value \"{existing}\", reusing it",
                sub.key
            ));
        } else {
            resolution.status.add_fatal(format!(
                "key '{}' already exists in the bundle with a different value: \"{existing}\" vs \"{value}\"",
                sub.key
            ));
        }
    }
}
