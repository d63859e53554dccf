//! Saved passwords persisted through the encrypted file store.

use passkeep::cli::GlobalArgs;
use passkeep::commands::load_config;
use passkeep::crypto::KdfParams;
use passkeep::{
    generate_from_input, EncryptedFileStore, PasswordEntry, SecureStore, StorageError, Vault,
    VaultError, ALPHABET, STORAGE_KEY,
};
use tempfile::TempDir;

fn cheap_kdf() -> KdfParams {
    KdfParams {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    }
}

fn temp_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("passkeep-test")
        .tempdir()
        .expect("tempdir")
}

#[test]
fn fresh_store_loads_empty_vault() {
    let dir = temp_dir();
    let path = dir.path().join("store.json");

    let store = EncryptedFileStore::create(&path, "master", cheap_kdf()).unwrap();
    let vault = Vault::load(store).unwrap();
    assert!(vault.is_empty());
}

#[test]
fn save_survives_process_restart() {
    let dir = temp_dir();
    let path = dir.path().join("store.json");

    {
        let store = EncryptedFileStore::create(&path, "master", cheap_kdf()).unwrap();
        let mut vault = Vault::load(store).unwrap();
        vault.save("Email", "abc123").unwrap();
    }

    let store = EncryptedFileStore::open(&path, "master").unwrap();
    let vault = Vault::load(store).unwrap();
    assert_eq!(vault.entries(), &[PasswordEntry::new("Email", "abc123")]);
}

#[test]
fn generated_passwords_keep_insertion_order() {
    let dir = temp_dir();
    let path = dir.path().join("store.json");

    let store = EncryptedFileStore::create(&path, "master", cheap_kdf()).unwrap();
    let mut vault = Vault::load(store).unwrap();

    let first = generate_from_input("24").password;
    let second = generate_from_input("8").password;
    assert!(first.bytes().chain(second.bytes()).all(|b| ALPHABET.contains(&b)));

    vault.save("A", &first).unwrap();
    vault.save("B", &second).unwrap();
    drop(vault);

    let vault = Vault::load(EncryptedFileStore::open(&path, "master").unwrap()).unwrap();
    assert_eq!(
        vault.entries(),
        &[PasswordEntry::new("A", first), PasswordEntry::new("B", second)]
    );
}

#[test]
fn empty_generation_cannot_be_saved() {
    let dir = temp_dir();
    let path = dir.path().join("store.json");

    let store = EncryptedFileStore::create(&path, "master", cheap_kdf()).unwrap();
    let mut vault = Vault::load(store).unwrap();

    let generation = generate_from_input("not a number");
    assert!(generation.password.is_empty());
    assert!(matches!(
        vault.save("Email", &generation.password),
        Err(VaultError::Validation(_))
    ));

    let store = vault.into_store();
    assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
}

#[test]
fn wrong_master_password_cannot_read_entries() {
    let dir = temp_dir();
    let path = dir.path().join("store.json");

    let store = EncryptedFileStore::create(&path, "master", cheap_kdf()).unwrap();
    let mut vault = Vault::load(store).unwrap();
    vault.save("Email", "abc123").unwrap();

    assert!(matches!(
        EncryptedFileStore::open(&path, "guess"),
        Err(StorageError::InvalidMasterPassword)
    ));
}

#[test]
fn store_flag_overrides_config_file() {
    let dir = temp_dir();
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, r#"{ "store_path": "from-file.json" }"#).unwrap();

    let from_file = load_config(&GlobalArgs {
        config: Some(config_path.clone()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(from_file.store_path, std::path::PathBuf::from("from-file.json"));

    let overridden = load_config(&GlobalArgs {
        config: Some(config_path),
        store: Some("from-flag.json".into()),
        verbose: false,
    })
    .unwrap();
    assert_eq!(overridden.store_path, std::path::PathBuf::from("from-flag.json"));
}
