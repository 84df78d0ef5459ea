use chrono::Utc;
use moodradio::management::TokenManager;
use moodradio::types::Token;
use tempfile::TempDir;

// Helper function to create a token obtained `age` seconds ago
fn token_with_age(age: u64, expires_in: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "user-read-private".to_string(),
        expires_in,
        obtained_at: Utc::now().timestamp() as u64 - age,
    }
}

#[test]
fn test_fresh_token_is_not_expired() {
    let manager = TokenManager::new(token_with_age(0, 3600));
    assert!(!manager.is_expired());
}

#[test]
fn test_token_inside_refresh_margin_is_expired() {
    // 3600 - 3400 = 200 seconds left, below the 240 second margin
    let manager = TokenManager::new(token_with_age(3400, 3600));
    assert!(manager.is_expired());
}

#[test]
fn test_short_lived_token_does_not_underflow() {
    let manager = TokenManager::new(token_with_age(0, 60));
    assert!(manager.is_expired());
}

#[tokio::test]
async fn test_persist_and_load_token() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache/token.json");

    let manager = TokenManager::with_path(token_with_age(10, 3600), path.clone());
    manager.persist().await.unwrap();

    let loaded = TokenManager::load_from(path).await.unwrap();
    assert_eq!(loaded.current_token().access_token, "access");
    assert_eq!(loaded.current_token().refresh_token, "refresh");
    assert!(!loaded.is_expired());
}

#[tokio::test]
async fn test_loading_missing_token_fails() {
    let dir = TempDir::new().unwrap();

    let result = TokenManager::load_from(dir.path().join("token.json")).await;

    assert!(matches!(result, Err(moodradio::error::Error::Token(_))));
}

#[tokio::test]
async fn test_valid_token_is_returned_without_refresh() {
    let dir = TempDir::new().unwrap();
    let mut manager =
        TokenManager::with_path(token_with_age(0, 3600), dir.path().join("token.json"));

    assert_eq!(manager.get_valid_token().await, "access");
}
