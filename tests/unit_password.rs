use jobify_core::password::{hash_password, hash_password_async, verify_password, verify_password_async};

#[test]
fn test_hash_password_success() {
    let password = "testpassword123";
    let hash = hash_password(password).unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
}

#[test]
fn test_verify_password_correct() {
    let hash = hash_password("correctpassword").unwrap();
    assert!(verify_password("correctpassword", &hash).unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hash = hash_password("correctpassword").unwrap();
    assert!(!verify_password("wrongpassword", &hash).unwrap());
}

#[test]
fn test_same_password_different_hashes() {
    let first = hash_password("samepassword").unwrap();
    let second = hash_password("samepassword").unwrap();

    assert_ne!(first, second);
    assert!(verify_password("samepassword", &first).unwrap());
    assert!(verify_password("samepassword", &second).unwrap());
}

#[test]
fn test_verify_malformed_hash_is_error() {
    assert!(verify_password("whatever", "not-a-bcrypt-hash").is_err());
}

#[tokio::test]
async fn test_async_variants() {
    let hash = hash_password_async("async-password".to_string()).await.unwrap();
    assert!(verify_password_async("async-password".to_string(), hash.clone()).await.unwrap());
    assert!(!verify_password_async("other".to_string(), hash).await.unwrap());
}
