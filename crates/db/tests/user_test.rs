//! Integration tests for the user repository.

mod common;

use hamyon_db::UserRepository;
use hamyon_db::repositories::UserError;

#[tokio::test]
async fn test_user_create_and_find() {
    let db = common::setup_test_db().await;
    let repo = UserRepository::new(db);

    let user = repo
        .create("aziz@example.com", "$argon2id$hash", "Aziz")
        .await
        .expect("create user");
    assert_eq!(user.email, "aziz@example.com");
    assert_eq!(user.full_name, "Aziz");
    assert!(user.is_active);

    let by_id = repo.find_by_id(user.id).await.unwrap().expect("by id");
    assert_eq!(by_id.email, user.email);

    let by_email = repo
        .find_by_email("aziz@example.com")
        .await
        .unwrap()
        .expect("by email");
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn test_user_duplicate_email_rejected() {
    let db = common::setup_test_db().await;
    let repo = UserRepository::new(db);

    repo.create("dup@example.com", "$argon2id$hash", "")
        .await
        .expect("first insert");
    let result = repo.create("dup@example.com", "$argon2id$hash", "").await;

    assert!(matches!(result, Err(UserError::EmailTaken(email)) if email == "dup@example.com"));
}

#[tokio::test]
async fn test_user_missing_lookups() {
    let db = common::setup_test_db().await;
    let repo = UserRepository::new(db);

    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    assert!(repo.find_by_id(uuid::Uuid::new_v4()).await.unwrap().is_none());
    assert!(!repo.email_exists("nobody@example.com").await.unwrap());
}
