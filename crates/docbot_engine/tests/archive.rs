use std::fs;

use docbot_engine::{ArchiveError, ContractArchive};
use tempfile::TempDir;

#[test]
fn save_creates_missing_folder() {
    let temp = TempDir::new().unwrap();
    let folder = temp.path().join("contracts").join("2024");
    let archive = ContractArchive::new(folder.clone());

    let saved = archive.save("contract_2024-01-15.txt", "NDA").unwrap();

    assert!(folder.is_dir());
    assert_eq!(saved, folder.join("contract_2024-01-15.txt"));
}

#[test]
fn save_replaces_contract_from_same_day() {
    let temp = TempDir::new().unwrap();
    let archive = ContractArchive::new(temp.path().join("contracts"));

    let first = archive.save("contract_2024-01-15.txt", "first draft").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "first draft");

    let second = archive.save("contract_2024-01-15.txt", "second draft").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "second draft");
    let entries = fs::read_dir(temp.path().join("contracts")).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn rejects_names_that_escape_the_directory() {
    let temp = TempDir::new().unwrap();
    let archive = ContractArchive::new(temp.path().to_path_buf());

    for name in ["", "..", "../escape.txt", "nested/contract.txt"] {
        assert!(matches!(
            archive.save(name, "text"),
            Err(ArchiveError::InvalidFilename(_))
        ));
    }
}

#[test]
fn folder_that_is_a_file_is_refused() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let archive = ContractArchive::new(file_path.clone());
    let result = archive.save("contract.txt", "data");
    assert!(matches!(result, Err(ArchiveError::OutputDir { .. })));
    assert!(!file_path.with_file_name("contract.txt").exists());
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "x");
}
