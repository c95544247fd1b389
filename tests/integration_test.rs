use std::fs;

use tpm_keyimport::api::{Algorithm, AuthSecret, Handle, PublicParameters, ResponseCode};
use tpm_keyimport::logic::{decode, CorruptBlobError};
use tpm_keyimport::use_cases::{import_key, ImportRequest};
use tpm_keyimport::{demo_keys, FileSink, KeyImportError, SimulatedConnector};

fn demo_parent() -> (Handle, AuthSecret) {
    (Handle::DEMO_STORAGE_KEY, AuthSecret::demo_storage_key())
}

#[test]
fn test_rsa_import_writes_loadable_blob() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keyblob.bin");
    let (handle, auth) = demo_parent();

    let report = tpm_keyimport::import_to_file(&path, Algorithm::Rsa, handle, auth).unwrap();

    let blob = fs::read(&path).unwrap();
    assert_eq!(blob.len(), report.bytes_written);
    let key = decode(&blob).unwrap();
    assert!(!key.public.is_empty());
    assert!(!key.private.is_empty());
    assert_eq!(
        u16::from_be_bytes([blob[0], blob[1]]) as usize,
        key.public.len()
    );

    let (handle, auth) = demo_parent();
    let loaded = tpm_keyimport::load_from_file(&path, handle, auth).unwrap();
    assert_eq!(loaded.description.algorithm(), Algorithm::Rsa);
}

#[test]
fn test_ecc_import_describes_p256_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ecc.bin");
    let (handle, auth) = demo_parent();

    let report = tpm_keyimport::import_to_file(&path, Algorithm::Ecc, handle, auth).unwrap();

    assert_eq!(report.algorithm, Algorithm::Ecc);
    match report.key.public.describe().unwrap().parameters {
        PublicParameters::Ecc { curve_id, x, .. } => {
            assert_eq!(curve_id, 0x0003);
            assert_eq!(x, demo_keys::ECC_P256_X.to_vec());
        }
        other => panic!("expected ECC parameters: {other:?}"),
    }
}

#[test]
fn test_unresolvable_parent_leaves_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keyblob.bin");
    fs::write(&path, b"previous contents").unwrap();

    let err = tpm_keyimport::import_to_file(
        &path,
        Algorithm::Rsa,
        Handle::new(0x8100_0fff),
        AuthSecret::demo_storage_key(),
    )
    .unwrap_err();

    assert!(matches!(err, KeyImportError::ParentNotFound { .. }));
    assert_eq!(err.code(), ResponseCode::HANDLE.with_handle(1));
    assert_eq!(err.exit_code(), 0x8b);
    assert_eq!(fs::read(&path).unwrap(), b"previous contents");
}

#[test]
fn test_wrong_secret_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keyblob.bin");

    let err = tpm_keyimport::import_to_file(
        &path,
        Algorithm::Ecc,
        Handle::DEMO_STORAGE_KEY,
        "NotMyStorageKeyAuth".parse().unwrap(),
    )
    .unwrap_err();

    assert!(matches!(err, KeyImportError::Authorization { .. }));
    assert!(!path.exists());
}

#[test]
fn test_library_flow_with_custom_parent() {
    let parent = Handle::new(0x8100_0001);
    let secret: AuthSecret = "OwnerStorage".parse().unwrap();
    let connector = SimulatedConnector::new().with_storage_key(parent, secret.clone());
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FileSink::new(dir.path().join("custom.bin"));

    let request =
        ImportRequest::new(demo_keys::rsa_material().unwrap()).with_parent(parent, secret);
    let report = import_key(&connector, request, &mut sink).unwrap();

    assert_eq!(report.parent, parent);
    assert_eq!(report.destination, sink.path().display().to_string());
}

#[test]
fn test_corrupt_blob_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keyblob.bin");
    let (handle, auth) = demo_parent();
    tpm_keyimport::import_to_file(&path, Algorithm::Rsa, handle, auth).unwrap();

    let mut blob = fs::read(&path).unwrap();
    blob.extend_from_slice(&[0, 0]);
    fs::write(&path, &blob).unwrap();

    let (handle, auth) = demo_parent();
    let err = tpm_keyimport::load_from_file(&path, handle, auth).unwrap_err();
    assert!(matches!(
        err,
        KeyImportError::CorruptBlob(CorruptBlobError::TrailingBytes { count: 2 })
    ));
}
