//! Collision resolution for normalized names

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use tracing::debug;

use super::FileRecord;
use crate::error::{ScanError, ScanErrorKind};
use crate::hasher::FileDigest;
use crate::scanner::NormalizedName;

/// A hashed entry waiting for its final key
#[derive(Debug)]
pub(crate) struct Hashed {
    pub name: NormalizedName,
    pub digest: FileDigest,
    pub source_path: PathBuf,
}

/// Assign unique keys, keeping listing order
///
/// The first occurrence of every normalized name keeps the bare name, and
/// all bare names are reserved before any suffix is handed out. Later
/// occurrences get `name__2`, `name__3`, ... in listing order, skipping
/// keys that are already taken. Each renamed entry yields one
/// [`ScanErrorKind::NameCollision`] error.
pub(crate) fn resolve(hashed: Vec<Hashed>) -> (Vec<FileRecord>, Vec<ScanError>) {
    let mut holders: HashMap<NormalizedName, (usize, PathBuf)> = HashMap::new();
    for (index, item) in hashed.iter().enumerate() {
        holders
            .entry(item.name.clone())
            .or_insert_with(|| (index, item.source_path.clone()));
    }

    let mut taken: HashSet<NormalizedName> = holders.keys().cloned().collect();
    let mut next_suffix: HashMap<NormalizedName, usize> = HashMap::new();
    let mut records = Vec::with_capacity(hashed.len());
    let mut errors = Vec::new();

    for (index, item) in hashed.into_iter().enumerate() {
        let key = match holders.get(&item.name) {
            Some((first, holder)) if *first != index => {
                let counter = next_suffix.entry(item.name.clone()).or_insert(2);
                let key = loop {
                    let candidate = item.name.with_suffix(*counter);
                    *counter += 1;
                    if taken.insert(candidate.clone()) {
                        break candidate;
                    }
                };

                debug!(
                    "Name collision: {} normalizes to {:?}, stored as {:?}",
                    item.source_path.display(),
                    item.name.as_str(),
                    key.as_str()
                );
                errors.push(ScanError::new(
                    &item.source_path,
                    ScanErrorKind::NameCollision,
                    format!(
                        "normalizes to \"{}\" already held by {}; recorded as \"{}\"",
                        item.name,
                        holder.display(),
                        key
                    ),
                ));
                key
            }
            _ => item.name,
        };

        records.push(FileRecord {
            name: key,
            size: item.digest.size,
            digest: item.digest.digest,
            source_path: item.source_path,
        });
    }

    (records, errors)
}
