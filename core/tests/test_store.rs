// End-to-end store behaviour against real files in a temp directory.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use secret_store::constants::{HEADER_LEN, PAYLOAD_OFFSET};
    use secret_store::crypto::{NONCE_LEN_12, TAG_LEN};
    use proptest::prelude::*;
    use secret_store::{ErrorKind, Store, StoreError, StoreOptions, WriteStrategy};
    use tempfile::TempDir;

    const PASS: &str = "correct horse battery staple";

    fn store_path() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.store");
        (dir, path)
    }

    fn raw_payload(path: &Path) -> Vec<u8> {
        fs::read(path).unwrap()[PAYLOAD_OFFSET as usize..].to_vec()
    }

    fn sorted_keys(store: &Store) -> Vec<String> {
        let mut keys = store.keys().unwrap();
        keys.sort();
        keys
    }

    // -------------------------------------------------------------------------
    // Creation and file layout
    // -------------------------------------------------------------------------

    #[test]
    fn open_creates_header_only_file() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();

        assert_eq!(store.revision(), 1);
        assert_eq!(store.path(), path.as_path());
        assert!(!store.is_closed());

        let raw = fs::read(&path).unwrap();
        assert_eq!(raw.len(), HEADER_LEN);
        assert_eq!(&raw[0..2], &[1, 0]);
        store.close().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn new_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, path) = store_path();
        Store::open(&path, PASS).unwrap().close().unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn each_store_gets_its_own_salt() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.store");
        let b = dir.path().join("b.store");
        Store::open(&a, PASS).unwrap().close().unwrap();
        Store::open(&b, PASS).unwrap().close().unwrap();

        let salt_a = fs::read(&a).unwrap()[2..HEADER_LEN].to_vec();
        let salt_b = fs::read(&b).unwrap()[2..HEADER_LEN].to_vec();
        assert_ne!(salt_a, salt_b);
    }

    #[test]
    fn payload_is_nonce_ciphertext_and_tag() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();
        store.put("k", b"value").unwrap();

        let payload = raw_payload(&path);
        // "{k:dmFsdWU=}" is 12 bytes of plaintext
        assert_eq!(payload.len(), NONCE_LEN_12 + 12 + TAG_LEN);
        assert!(!payload.windows(5).any(|w| w == b"value"));
        assert!(!payload.windows(8).any(|w| w == b"dmFsdWU="));
    }

    // -------------------------------------------------------------------------
    // CRUD
    // -------------------------------------------------------------------------

    #[test]
    fn end_to_end_scenario() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, "strong_passphrase").unwrap();

        store.put("password", b"my_very_secret_password").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["password"]);
        assert_eq!(store.get("password").unwrap(), b"my_very_secret_password");

        store.delete("password").unwrap();
        assert!(store.keys().unwrap().is_empty());
        store.close().unwrap();
    }

    #[test]
    fn key_charset_is_enforced_on_put() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();

        assert_eq!(store.put("bad key!", b"v").unwrap_err().kind(), ErrorKind::Validation);
        store.put("valid-key_1", b"v").unwrap();
        assert_eq!(store.get("valid-key_1").unwrap(), b"v");
    }

    #[test]
    fn put_then_get() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();

        store.put("password", b"my_very_secret_password").unwrap();
        assert_eq!(store.get("password").unwrap(), b"my_very_secret_password");
        assert!(store.contains("password").unwrap());
        assert!(!store.contains("other").unwrap());
    }

    #[test]
    fn put_overwrites_and_keeps_other_keys() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();

        store.put("a", b"1").unwrap();
        store.put("b", b"2").unwrap();
        store.put("a", b"3").unwrap();

        assert_eq!(store.get("a").unwrap(), b"3");
        assert_eq!(store.get("b").unwrap(), b"2");
        assert_eq!(sorted_keys(&store), vec!["a", "b"]);
    }

    #[test]
    fn zero_length_value_is_present() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();

        store.put("empty", b"").unwrap();
        assert_eq!(store.get("empty").unwrap(), Vec::<u8>::new());
        assert_eq!(store.keys().unwrap(), vec!["empty"]);
    }

    #[test]
    fn get_on_fresh_store_is_not_found() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();

        let err = store.get("missing").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref key } if key == "missing"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn get_missing_key_after_writes_is_not_found() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();
        store.put("present", b"x").unwrap();

        assert_eq!(store.get("absent").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn delete_removes_and_tolerates_absence() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();

        store.put("a", b"1").unwrap();
        store.put("b", b"2").unwrap();
        store.delete("a").unwrap();
        store.delete("a").unwrap();
        store.delete("never-there").unwrap();

        assert_eq!(store.get("a").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(store.keys().unwrap(), vec!["b"]);
    }

    #[test]
    fn delete_on_fresh_store_leaves_file_untouched() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();

        store.delete("anything").unwrap();
        assert_eq!(fs::read(&path).unwrap().len(), HEADER_LEN);
    }

    #[test]
    fn deleting_last_key_leaves_sealed_empty_payload() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();

        store.put("only", b"1").unwrap();
        store.delete("only").unwrap();

        assert!(store.keys().unwrap().is_empty());
        assert_eq!(raw_payload(&path).len(), NONCE_LEN_12 + TAG_LEN);
    }

    #[test]
    fn invalid_keys_are_rejected_before_any_write() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();
        store.put("good", b"1").unwrap();
        let before = fs::read(&path).unwrap();

        for bad in ["", "has space", "colon:key", "{brace}", "dot.key"] {
            let err = store.put(bad, b"v").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "key {bad:?}");
        }
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    // -------------------------------------------------------------------------
    // Persistence and confidentiality
    // -------------------------------------------------------------------------

    #[test]
    fn contents_survive_reopen() {
        let (_dir, path) = store_path();
        {
            let store = Store::open(&path, PASS).unwrap();
            store.put("user", b"alice").unwrap();
            store.put("token", &[0u8, 255, 10, 13]).unwrap();
            store.close().unwrap();
        }

        let store = Store::open(&path, PASS).unwrap();
        assert_eq!(store.get("user").unwrap(), b"alice");
        assert_eq!(store.get("token").unwrap(), vec![0u8, 255, 10, 13]);
        assert_eq!(sorted_keys(&store), vec!["token", "user"]);
    }

    #[test]
    fn drop_without_close_still_persists() {
        let (_dir, path) = store_path();
        {
            let store = Store::open(&path, PASS).unwrap();
            store.put("k", b"v").unwrap();
        }
        assert_eq!(Store::open(&path, PASS).unwrap().get("k").unwrap(), b"v");
    }

    #[test]
    fn wrong_passphrase_fails_on_first_decrypt() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();
        store.put("k", b"v").unwrap();
        store.close().unwrap();

        // opening succeeds: the header carries no verifier
        let store = Store::open(&path, "wrong passphrase").unwrap();
        assert_eq!(store.get("k").unwrap_err().kind(), ErrorKind::Crypto);
        assert_eq!(store.keys().unwrap_err().kind(), ErrorKind::Crypto);
        assert_eq!(store.put("j", b"w").unwrap_err().kind(), ErrorKind::Crypto);
        store.close().unwrap();

        // the failed put did not disturb the payload
        assert_eq!(Store::open(&path, PASS).unwrap().get("k").unwrap(), b"v");
    }

    #[test]
    fn every_write_uses_a_fresh_nonce() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();

        let mut nonces = Vec::new();
        for _ in 0..5 {
            store.put("same", b"same value").unwrap();
            nonces.push(raw_payload(&path)[..NONCE_LEN_12].to_vec());
        }
        nonces.sort();
        nonces.dedup();
        assert_eq!(nonces.len(), 5);
    }

    #[test]
    fn tampered_payload_is_a_crypto_error() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();
        store.put("k", b"v").unwrap();
        store.close().unwrap();

        let mut raw = fs::read(&path).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        fs::write(&path, &raw).unwrap();

        let store = Store::open(&path, PASS).unwrap();
        assert_eq!(store.get("k").unwrap_err().kind(), ErrorKind::Crypto);
    }

    #[test]
    fn payload_shorter_than_nonce_and_tag_is_a_crypto_error() {
        let (_dir, path) = store_path();
        Store::open(&path, PASS).unwrap().close().unwrap();

        let mut raw = fs::read(&path).unwrap();
        raw.extend_from_slice(&[0u8; 10]);
        fs::write(&path, &raw).unwrap();

        let store = Store::open(&path, PASS).unwrap();
        assert_eq!(store.get("k").unwrap_err().kind(), ErrorKind::Crypto);
    }

    #[test]
    fn truncated_header_is_a_format_error() {
        let (_dir, path) = store_path();
        fs::write(&path, [1u8, 0, 7, 7, 7]).unwrap();

        let err = Store::open(&path, PASS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn other_revision_still_opens() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();
        store.put("k", b"v").unwrap();
        store.close().unwrap();

        let mut raw = fs::read(&path).unwrap();
        raw[0] = 2;
        fs::write(&path, &raw).unwrap();

        let store = Store::open(&path, PASS).unwrap();
        assert_eq!(store.revision(), 2);
        assert_eq!(store.get("k").unwrap(), b"v");
    }

    #[test]
    fn missing_parent_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("s.store");
        assert_eq!(Store::open(&path, PASS).unwrap_err().kind(), ErrorKind::Io);
    }

    // Written by an independent AES-GCM/PBKDF2 implementation: revision 1,
    // salt 00..1f, nonce a0..ab, plaintext `{password:...}{e:}`.
    const REFERENCE_STORE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/reference_v1.store");

    #[test]
    fn reads_and_extends_reference_store() {
        let (_dir, path) = store_path();
        fs::copy(REFERENCE_STORE, &path).unwrap();

        let raw = fs::read(&path).unwrap();
        assert_eq!(&raw[0..2], &[1, 0]);
        assert_eq!(raw[2..HEADER_LEN].to_vec(), (0u8..32).collect::<Vec<_>>());

        let store = Store::open(&path, "strong_passphrase").unwrap();
        assert_eq!(store.revision(), 1);
        assert_eq!(store.get("password").unwrap(), b"my_very_secret_password");
        assert_eq!(store.get("e").unwrap(), Vec::<u8>::new());
        assert_eq!(sorted_keys(&store), vec!["e", "password"]);

        store.put("x", b"y").unwrap();
        store.close().unwrap();

        // header survives the rewrite; contents decode after reopen
        let rewritten = fs::read(&path).unwrap();
        assert_eq!(&rewritten[..HEADER_LEN], &raw[..HEADER_LEN]);
        let store = Store::open(&path, "strong_passphrase").unwrap();
        assert_eq!(sorted_keys(&store), vec!["e", "password", "x"]);
        assert_eq!(store.get("x").unwrap(), b"y");
    }

    #[test]
    fn reference_store_rejects_wrong_passphrase() {
        let (_dir, path) = store_path();
        fs::copy(REFERENCE_STORE, &path).unwrap();

        let store = Store::open(&path, "Strong_passphrase").unwrap();
        assert_eq!(store.get("password").unwrap_err().kind(), ErrorKind::Crypto);
    }

    // -------------------------------------------------------------------------
    // Close
    // -------------------------------------------------------------------------

    #[test]
    fn operations_after_close_fail() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();
        store.put("k", b"v").unwrap();
        store.close().unwrap();

        assert!(store.is_closed());
        assert!(matches!(store.get("k"), Err(StoreError::Closed)));
        assert!(matches!(store.put("k", b"v"), Err(StoreError::Closed)));
        assert!(matches!(store.delete("k"), Err(StoreError::Closed)));
        assert!(matches!(store.keys(), Err(StoreError::Closed)));

        let err = store.close().unwrap_err();
        assert!(matches!(err, StoreError::Closed));
        assert_eq!(err.kind(), ErrorKind::Io);
        // header info stays available
        assert_eq!(store.revision(), 1);
    }

    // -------------------------------------------------------------------------
    // Options
    // -------------------------------------------------------------------------

    #[test]
    fn atomic_rename_and_sync_strategies_behave_like_in_place() {
        for options in [
            StoreOptions::atomic(),
            StoreOptions::new(WriteStrategy::InPlace, true),
            StoreOptions::default().with_write_strategy(WriteStrategy::AtomicRename).with_sync_writes(true),
        ] {
            let (dir, path) = store_path();
            let store = Store::open_with(&path, PASS, options.clone()).unwrap();
            assert_eq!(store.options().write_strategy, options.write_strategy);

            store.put("a", b"1").unwrap();
            store.put("b", b"2").unwrap();
            store.delete("a").unwrap();
            assert_eq!(store.get("b").unwrap(), b"2");
            store.close().unwrap();

            let reopened = Store::open(&path, PASS).unwrap();
            assert_eq!(reopened.keys().unwrap(), vec!["b"]);
            assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        }
    }

    #[test]
    fn debug_output_has_no_secrets() {
        let (_dir, path) = store_path();
        let store = Store::open(&path, PASS).unwrap();
        store.put("k", b"visible-if-leaked").unwrap();

        let rendered = format!("{store:?}");
        assert!(rendered.contains("Store"));
        assert!(!rendered.contains(PASS));
        assert!(!rendered.contains("visible-if-leaked"));
    }

    // -------------------------------------------------------------------------
    // Property tests (few cases: every open runs PBKDF2)
    // -------------------------------------------------------------------------

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(6))]

        #[test]
        fn any_valid_key_and_value_round_trip(
            key in "[A-Za-z0-9_-]{1,24}",
            first in prop::collection::vec(any::<u8>(), 0..256),
            second in prop::collection::vec(any::<u8>(), 0..256),
        ) {
            let (_dir, path) = store_path();
            let store = Store::open(&path, PASS).unwrap();

            store.put(&key, &first).unwrap();
            prop_assert_eq!(store.get(&key).unwrap(), first);

            store.put(&key, &second).unwrap();
            prop_assert_eq!(store.get(&key).unwrap(), second.clone());
            store.close().unwrap();

            let reopened = Store::open(&path, PASS).unwrap();
            prop_assert_eq!(reopened.get(&key).unwrap(), second);
        }
    }
}
