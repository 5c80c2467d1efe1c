//! Environment-driven backend selection. Kept to a single test so nothing
//! else in this binary reads the environment while it is being changed.

use kitchen_store::KitchenStore;
use kitchen_store::factory::Backend;
use kitchen_store::factory::choose_backend_from_env;
use kitchen_store::factory::open_profile_backend;
use pretty_assertions::assert_eq;

const VARS: [&str; 3] = [
    "KITCHEN_STORE_BACKEND",
    "KITCHEN_STORE_DIR",
    "KITCHEN_STORE_DB",
];

fn set_env(key: &str, value: Option<&str>) {
    // SAFETY: the only test in this binary; no other thread touches the environment.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

#[test]
fn environment_selects_and_locates_backends() {
    for key in VARS {
        set_env(key, None);
    }
    let home = tempfile::tempdir().unwrap();
    let custom = tempfile::tempdir().unwrap();
    let profile_dir = home.path().join(".kitchen").join("store");

    // Unset means the file backend.
    assert_eq!(choose_backend_from_env(), Backend::File);
    set_env("KITCHEN_STORE_BACKEND", Some("bogus"));
    assert_eq!(choose_backend_from_env(), Backend::File);

    // Memory keeps everything off disk.
    set_env("KITCHEN_STORE_BACKEND", Some("Memory"));
    assert_eq!(choose_backend_from_env(), Backend::Memory);
    let store = KitchenStore::open(open_profile_backend(home.path(), None).unwrap()).unwrap();
    assert_eq!(store.recipes().unwrap().len(), 3);
    assert!(!home.path().join(".kitchen").exists());

    // An explicit choice wins over the environment; files land in the profile.
    let store =
        KitchenStore::open(open_profile_backend(home.path(), Some(Backend::File)).unwrap())
            .unwrap();
    assert_eq!(store.shopping_items().unwrap().len(), 2);
    assert!(profile_dir.join("recipes.json").exists());

    // The directory override redirects the file backend.
    set_env("KITCHEN_STORE_BACKEND", Some("file"));
    let redirected = custom.path().join("kitchen");
    set_env("KITCHEN_STORE_DIR", redirected.to_str());
    KitchenStore::open(open_profile_backend(home.path(), None).unwrap()).unwrap();
    for key in ["recipes", "mealPlans", "inventoryItems", "shoppingItems"] {
        assert!(redirected.join(format!("{key}.json")).exists(), "{key}");
    }

    #[cfg(feature = "sqlite")]
    {
        set_env("KITCHEN_STORE_BACKEND", Some("sqlite"));
        assert_eq!(choose_backend_from_env(), Backend::Sqlite);

        KitchenStore::open(open_profile_backend(home.path(), None).unwrap()).unwrap();
        assert!(profile_dir.join("kitchen.db").exists());

        let db = custom.path().join("nested").join("pantry.db");
        set_env("KITCHEN_STORE_DB", db.to_str());
        KitchenStore::open(open_profile_backend(home.path(), None).unwrap()).unwrap();
        assert!(db.exists());
    }

    for key in VARS {
        set_env(key, None);
    }
}
