//! wishlist-storage-json
//!
//! Filesystem persistence for wishlists: one pretty-printed JSON document per
//! wishlist plus a per-wishlist folder of timestamped backups.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use wishlist_core::{
    storage::{WishlistBackupInfo, WishlistStorage},
    CoreError, ProductService,
};
use wishlist_domain::Wishlist;

const FILE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Directory layout used by [`JsonWishlistStorage`].
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub wishlist_root: PathBuf,
    pub backup_root: PathBuf,
}

impl StoragePaths {
    /// `<base>/wishlists` and `<base>/backups`.
    pub fn under(base: &Path) -> Self {
        Self {
            wishlist_root: base.join("wishlists"),
            backup_root: base.join("backups"),
        }
    }
}

/// Filesystem-backed JSON persistence for wishlists and their backups.
#[derive(Debug, Clone)]
pub struct JsonWishlistStorage {
    wishlists_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonWishlistStorage {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(&paths.wishlist_root)?;
        fs::create_dir_all(&paths.backup_root)?;
        Ok(Self {
            wishlists_dir: paths.wishlist_root,
            backups_dir: paths.backup_root,
            retention: retention.max(1),
        })
    }

    pub fn wishlist_path(&self, name: &str) -> PathBuf {
        self.wishlists_dir
            .join(format!("{}.{}", canonical_name(name), FILE_EXTENSION))
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// One row per stored wishlist, sorted by name.
    pub fn list_wishlist_metadata(&self) -> Result<Vec<WishlistMetadata>, CoreError> {
        let mut rows = Vec::new();
        for slug in self.list_wishlists()? {
            let wishlist = self.load_wishlist(&slug)?;
            rows.push(WishlistMetadata {
                path: self.wishlist_path(&slug),
                name: wishlist.name.clone(),
                updated_at: wishlist.updated_at,
                active_products: ProductService::active_count(&wishlist),
                total_active_value: ProductService::total_active_value(&wishlist),
                has_budget: wishlist.budget.is_some(),
                slug,
            });
        }
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    pub fn delete_backup(&self, name: &str, backup_id: &str) -> Result<(), CoreError> {
        let path = self.backup_dir(name).join(backup_id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    /// Picks a backup file name that does not collide with an existing one.
    fn next_backup_path(&self, name: &str, note: Option<&str>) -> (PathBuf, String) {
        let dir = self.backup_dir(name);
        let stamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let label = sanitize_backup_note(note);
        let mut sequence = 0;
        loop {
            let file_name = backup_file_name(name, &stamp, sequence, label.as_deref());
            let path = dir.join(&file_name);
            if !path.exists() {
                return (path, file_name);
            }
            sequence += 1;
        }
    }

    fn backup_info(&self, name: &str, file_name: String, path: PathBuf) -> WishlistBackupInfo {
        let created_at = parse_backup_timestamp(&file_name)
            .map(|stamp| stamp.to_rfc3339())
            .unwrap_or_else(|| file_name.clone());
        WishlistBackupInfo {
            wishlist: canonical_name(name),
            id: file_name,
            created_at,
            path,
        }
    }

    fn copy_existing_to_backup(&self, name: &str, path: &Path) -> Result<(), CoreError> {
        let (backup_path, _) = self.next_backup_path(name, None);
        if let Some(parent) = backup_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &backup_path)?;
        tracing::debug!(backup = %backup_path.display(), "backed up previous wishlist file");
        self.prune_backups(name)
    }

    fn prune_backups(&self, name: &str) -> Result<(), CoreError> {
        let entries = self.list_backups(name)?;
        for stale in entries.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&stale.path) {
                tracing::warn!(path = %stale.path.display(), %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl WishlistStorage for JsonWishlistStorage {
    fn save_wishlist(&self, name: &str, wishlist: &Wishlist) -> Result<(), CoreError> {
        let path = self.wishlist_path(name);
        if path.exists() {
            self.copy_existing_to_backup(name, &path)?;
        }
        save_wishlist_to_path(wishlist, &path)?;
        tracing::info!(wishlist = %canonical_name(name), "saved wishlist");
        Ok(())
    }

    fn load_wishlist(&self, name: &str) -> Result<Wishlist, CoreError> {
        let path = self.wishlist_path(name);
        if !path.exists() {
            return Err(CoreError::WishlistNotFound(name.to_string()));
        }
        load_wishlist_from_path(&path)
    }

    fn list_wishlists(&self) -> Result<Vec<String>, CoreError> {
        if !self.wishlists_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.wishlists_dir)? {
            let path = entry?.path();
            if !path.is_file() || !has_json_extension(&path) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_wishlist(&self, name: &str) -> Result<(), CoreError> {
        let path = self.wishlist_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn save_wishlist_to_path(&self, wishlist: &Wishlist, path: &Path) -> Result<(), CoreError> {
        save_wishlist_to_path(wishlist, path)
    }

    fn load_wishlist_from_path(&self, path: &Path) -> Result<Wishlist, CoreError> {
        load_wishlist_from_path(path)
    }

    fn backup_wishlist(
        &self,
        name: &str,
        wishlist: &Wishlist,
        note: Option<&str>,
    ) -> Result<WishlistBackupInfo, CoreError> {
        let (path, file_name) = self.next_backup_path(name, note);
        write_file(&path, &serialize_wishlist(wishlist)?)?;
        tracing::info!(backup = %file_name, "created wishlist backup");
        let info = self.backup_info(name, file_name, path);
        self.prune_backups(name)?;
        Ok(info)
    }

    /// Newest first.
    fn list_backups(&self, name: &str) -> Result<Vec<WishlistBackupInfo>, CoreError> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !has_json_extension(&path) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                entries.push(self.backup_info(name, file_name.to_string(), path.clone()));
            }
        }
        entries.sort_by(|a, b| {
            Reverse(parse_backup_key(&a.id))
                .cmp(&Reverse(parse_backup_key(&b.id)))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    fn restore_backup(&self, backup: &WishlistBackupInfo) -> Result<Wishlist, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let restored = load_wishlist_from_path(&backup.path)?;
        save_wishlist_to_path(&restored, &self.wishlist_path(&backup.wishlist))?;
        tracing::info!(backup = %backup.id, "restored wishlist from backup");
        Ok(restored)
    }
}

/// Writes a wishlist to an arbitrary path via a temporary file and rename.
pub fn save_wishlist_to_path(wishlist: &Wishlist, path: &Path) -> Result<(), CoreError> {
    let tmp = tmp_path(path);
    write_file(&tmp, &serialize_wishlist(wishlist)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_wishlist_from_path(path: &Path) -> Result<Wishlist, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serialization(err.to_string()))
}

#[derive(Debug, Clone)]
pub struct WishlistMetadata {
    pub slug: String,
    pub name: String,
    pub path: PathBuf,
    pub updated_at: DateTime<Utc>,
    pub active_products: usize,
    pub total_active_value: f64,
    pub has_budget: bool,
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "wishlist".into()
    } else {
        sanitized
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let mut sanitized = String::new();
    for ch in note?.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.' | '_'))
            && !sanitized.is_empty()
            && !sanitized.ends_with('-')
        {
            sanitized.push('-');
        }
    }
    let trimmed = sanitized.trim_matches('-');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// `<slug>_<YYYYmmdd>_<HHMMSS>[-<n>][_<note>].json`
fn backup_file_name(name: &str, stamp: &str, sequence: u32, note: Option<&str>) -> String {
    let mut stem = format!("{}_{stamp}", canonical_name(name));
    if sequence > 0 {
        stem.push_str(&format!("-{sequence}"));
    }
    if let Some(label) = note {
        stem.push('_');
        stem.push_str(label);
    }
    format!("{stem}.{FILE_EXTENSION}")
}

/// Timestamp and collision counter of a backup file name.
fn parse_backup_key(file_name: &str) -> Option<(DateTime<Utc>, u32)> {
    let stem = file_name.strip_suffix(&format!(".{FILE_EXTENSION}"))?;
    let segments: Vec<&str> = stem.split('_').collect();
    segments.windows(2).find_map(|pair| {
        let (time, sequence) = match pair[1].split_once('-') {
            Some((time, sequence)) => (time, sequence.parse::<u32>().ok()?),
            None => (pair[1], 0),
        };
        if !is_digits(pair[0], 8) || !is_digits(time, 6) {
            return None;
        }
        let naive = NaiveDateTime::parse_from_str(
            &format!("{}_{}", pair[0], time),
            BACKUP_TIMESTAMP_FORMAT,
        )
        .ok()?;
        Some((DateTime::from_naive_utc_and_offset(naive, Utc), sequence))
    })
}

fn parse_backup_timestamp(file_name: &str) -> Option<DateTime<Utc>> {
    parse_backup_key(file_name).map(|(stamp, _)| stamp)
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn has_json_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(FILE_EXTENSION)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_wishlist(wishlist: &Wishlist) -> Result<String, CoreError> {
    serde_json::to_string_pretty(wishlist).map_err(|err| CoreError::Serialization(err.to_string()))
}
