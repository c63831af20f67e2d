use scoutbase_server::db::user_repo::{hash_password, verify_password};

#[test]
fn correct_password_verifies() {
    let hash = hash_password("hunter22").unwrap();
    assert!(verify_password("hunter22", &hash).unwrap());
}

#[test]
fn wrong_password_fails_verification() {
    let hash = hash_password("hunter22").unwrap();
    assert!(!verify_password("hunter23", &hash).unwrap());
}

#[test]
fn plaintext_never_equals_the_stored_hash() {
    let hash = hash_password("hunter22").unwrap();
    assert_ne!(hash, "hunter22");
    // Salted: the same plaintext hashes differently each time.
    assert_ne!(hash, hash_password("hunter22").unwrap());
}
