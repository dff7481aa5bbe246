//! Full-store backup as a JSON map `collection → records`, optionally zipped.
//!
//! Restore clears every collection and re-inserts the records of the file
//! with their original ids; a collection missing from the file ends up empty.

use crate::core::services::{Services, require_executive};
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::collection::Collection;
use serde_json::{Map, Value};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use zip::ZipWriter;
use zip::write::FileOptions;

/// Every collection, settings last, in the order a restore re-inserts them.
fn all_collections() -> impl Iterator<Item = Collection> {
    Collection::KEYED
        .into_iter()
        .chain(std::iter::once(Collection::Settings))
}

#[derive(Debug, Clone)]
pub struct RestoreReport {
    /// `(collection, records written)` in restore order.
    pub counts: Vec<(Collection, usize)>,
}

pub struct BackupLogic;

impl BackupLogic {
    /// Snapshot of the whole store.
    pub fn snapshot(svc: &Services) -> AppResult<Value> {
        let mut map = Map::new();
        for c in all_collections() {
            map.insert(c.table().to_string(), Value::Array(svc.store.list_raw(c)?));
        }
        Ok(Value::Object(map))
    }

    /// Write the backup to `dest`. With `compress` the JSON goes into a
    /// `.zip` next to it and the returned path is the archive.
    pub fn backup(
        svc: &Services,
        actor: &Actor,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        require_executive(actor, "creating backups")?;

        let dest = Path::new(dest_file);
        let final_path = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };

        if final_path.exists() && !force {
            return Err(AppError::Validation(format!(
                "'{}' already exists; pass --force to overwrite it",
                final_path.display()
            )));
        }
        if let Some(parent) = final_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&Self::snapshot(svc)?)?;

        if compress {
            let name = dest
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "backup.json".to_string());
            compress_backup(&final_path, &name, json.as_bytes())?;
        } else {
            fs::write(&final_path, json)?;
        }

        info!(path = %final_path.display(), compress, "backup written");
        svc.audit(
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(final_path)
    }

    /// Read a `.json` or `.zip` backup and restore it.
    pub fn restore_file(svc: &Services, actor: &Actor, src_file: &str) -> AppResult<RestoreReport> {
        let src = Path::new(src_file);
        if !src.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("backup not found: {}", src.display()),
            )));
        }

        let raw = if src.extension().is_some_and(|e| e.eq_ignore_ascii_case("zip")) {
            read_compressed(src)?
        } else {
            fs::read_to_string(src)?
        };

        let report = Self::restore(svc, actor, &serde_json::from_str(&raw)?)?;
        svc.audit("restore", &src.to_string_lossy(), "Backup restored");
        Ok(report)
    }

    /// Replace the whole store with `snapshot`.
    ///
    /// Runs in one transaction: a record that does not decode as its model
    /// leaves the store as it was.
    pub fn restore(svc: &Services, actor: &Actor, snapshot: &Value) -> AppResult<RestoreReport> {
        require_executive(actor, "restoring backups")?;

        let map = snapshot
            .as_object()
            .ok_or_else(|| AppError::Validation("backup is not a JSON object".into()))?;

        for key in map.keys() {
            if Collection::from_table(key).is_none() {
                return Err(AppError::Validation(format!(
                    "unknown collection '{key}' in backup"
                )));
            }
        }

        svc.store.transaction(|store| {
            let mut counts = Vec::new();
            for c in all_collections() {
                let records = match map.get(c.table()) {
                    None => &[][..],
                    Some(v) => v.as_array().map(Vec::as_slice).ok_or_else(|| {
                        AppError::Validation(format!("'{}' is not an array", c.table()))
                    })?,
                };

                store.clear(c)?;
                for r in records {
                    store.put_raw(c, r)?;
                }
                counts.push((c, records.len()));
            }
            Ok(RestoreReport { counts })
        })
    }
}

fn compress_backup(zip_path: &Path, entry_name: &str, data: &[u8]) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(entry_name, options)?;
    zip.write_all(data)?;
    zip.finish()?;
    Ok(())
}

/// First file of the archive.
fn read_compressed(path: &Path) -> AppResult<String> {
    let file = fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    if archive.is_empty() {
        return Err(AppError::Validation(format!(
            "archive '{}' is empty",
            path.display()
        )));
    }
    let mut entry = archive.by_index(0)?;
    let mut out = String::new();
    entry.read_to_string(&mut out)?;
    Ok(out)
}
