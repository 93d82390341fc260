use chrono::Utc;
use std::fs;
use tempfile::tempdir;
use wishlist_core::storage::WishlistStorage;
use wishlist_core::CoreError;
use wishlist_domain::{Budget, Priority, Product, Wishlist};
use wishlist_storage_json::{JsonWishlistStorage, StoragePaths};

fn sample_wishlist(name: &str) -> Wishlist {
    let now = Utc::now();
    let mut wishlist = Wishlist::new(name);
    wishlist
        .products
        .push(Product::new("Laptop", 4000.0, now).with_priority(Priority::High));
    wishlist.products.push(Product::new("Mouse", 80.0, now));
    wishlist.budget = Some(Budget::new(10_000.0, 400.0, 3_000.0, now));
    wishlist
}

#[test]
fn json_storage_can_save_and_load_wishlist() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonWishlistStorage::new(StoragePaths::under(dir.path())).expect("create storage");

    let wishlist = sample_wishlist("Home");
    storage.save_wishlist("home", &wishlist).expect("save wishlist");
    let loaded = storage.load_wishlist("home").expect("load wishlist");

    assert_eq!(loaded.name, "Home");
    assert_eq!(loaded.products.len(), 2);
    assert_eq!(loaded.products[0].priority, Priority::High);
    assert_eq!(
        loaded.budget.as_ref().map(|b| b.monthly_saving),
        Some(400.0)
    );
    let path = storage.wishlist_path("home");
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(path.exists());
}

#[test]
fn missing_wishlist_reports_not_found() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonWishlistStorage::new(StoragePaths::under(dir.path())).expect("create storage");

    let err = storage.load_wishlist("ghost").unwrap_err();
    assert!(matches!(err, CoreError::WishlistNotFound(name) if name == "ghost"));
}

#[test]
fn overwriting_a_wishlist_keeps_a_backup() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonWishlistStorage::new(StoragePaths::under(dir.path())).expect("create storage");

    let mut wishlist = sample_wishlist("Home");
    storage.save_wishlist("home", &wishlist).expect("first save");
    assert!(storage.list_backups("home").expect("list").is_empty());

    wishlist.products.pop();
    storage.save_wishlist("home", &wishlist).expect("second save");

    let backups = storage.list_backups("home").expect("list");
    assert_eq!(backups.len(), 1);
    let previous = storage
        .load_wishlist_from_path(&backups[0].path)
        .expect("load backup");
    assert_eq!(previous.products.len(), 2);
}

#[test]
fn json_storage_creates_and_restores_backups() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonWishlistStorage::new(StoragePaths::under(dir.path())).expect("create storage");

    let wishlist = sample_wishlist("Home");
    storage.save_wishlist("home", &wishlist).expect("save wishlist");
    let info = storage
        .backup_wishlist("home", &wishlist, Some("Before trip"))
        .expect("create backup");
    assert!(info.id.ends_with("_before-trip.json"), "id was {}", info.id);

    storage.delete_wishlist("home").expect("delete");
    assert!(storage.list_wishlists().expect("list").is_empty());

    let restored = storage.restore_backup(&info).expect("restore backup");
    assert_eq!(restored.name, "Home");
    assert_eq!(storage.list_wishlists().expect("list"), vec!["home".to_string()]);
}

#[test]
fn backups_are_pruned_to_retention() {
    let dir = tempdir().expect("tempdir");
    let storage =
        JsonWishlistStorage::with_retention(StoragePaths::under(dir.path()), 2).expect("storage");

    let wishlist = sample_wishlist("Home");
    for _ in 0..4 {
        storage
            .backup_wishlist("home", &wishlist, None)
            .expect("backup");
    }
    assert_eq!(storage.list_backups("home").expect("list").len(), 2);
}

#[test]
fn list_wishlists_ignores_foreign_files() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::under(dir.path());
    let storage = JsonWishlistStorage::new(paths.clone()).expect("create storage");

    storage
        .save_wishlist("Gifts 2025", &sample_wishlist("Gifts"))
        .expect("save");
    storage
        .save_wishlist("home", &sample_wishlist("Home"))
        .expect("save");
    fs::write(paths.wishlist_root.join("notes.txt"), "ignore me").expect("write");

    assert_eq!(
        storage.list_wishlists().expect("list"),
        vec!["gifts_2025".to_string(), "home".to_string()]
    );

    let metadata = storage.list_wishlist_metadata().expect("metadata");
    assert_eq!(metadata[0].name, "Gifts");
    assert_eq!(metadata[0].active_products, 2);
    assert!(metadata[0].has_budget);
}

#[test]
fn corrupt_file_surfaces_serialization_error() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::under(dir.path());
    let storage = JsonWishlistStorage::new(paths.clone()).expect("create storage");

    fs::write(storage.wishlist_path("broken"), "{ not json").expect("write");
    let err = storage.load_wishlist("broken").unwrap_err();
    assert!(matches!(err, CoreError::Serialization(_)));
}

#[test]
fn wishlist_round_trips_through_explicit_path() {
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("export.json");
    let wishlist = sample_wishlist("Export");

    wishlist_storage_json::save_wishlist_to_path(&wishlist, &target).expect("export");
    let imported = wishlist_storage_json::load_wishlist_from_path(&target).expect("import");

    assert_eq!(imported.name, "Export");
    assert_eq!(imported.products[1].name, "Mouse");
    assert!(!dir.path().join("export.json.tmp").exists());
}
