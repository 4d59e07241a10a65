use brief::AppError;
use brief::domain::entities::{NewAccount, NewShortLink, Role};
use brief::domain::repositories::{AccountRepository, ShortLinkRepository};
use brief::infrastructure::persistence::{PgAccountRepository, PgShortLinkRepository};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

async fn setup(pool: PgPool) -> (PgShortLinkRepository, Uuid) {
    let pool = Arc::new(pool);
    let accounts = PgAccountRepository::new(pool.clone(), Duration::from_secs(5));

    let owner = accounts
        .create(NewAccount {
            id: Uuid::new_v4(),
            firstname: "Owner".to_string(),
            lastname: String::new(),
            email: format!("{}@example.com", Uuid::new_v4()),
            password: "hash".to_string(),
            salt: "salt".to_string(),
            role: Role::User,
        })
        .await
        .unwrap();

    (
        PgShortLinkRepository::new(pool, Duration::from_secs(5)),
        owner.id,
    )
}

fn new_link(hash: &str, user_id: Uuid) -> NewShortLink {
    NewShortLink {
        id: Uuid::new_v4(),
        long_url: "https://example.com".to_string(),
        hash: hash.to_string(),
        user_id,
    }
}

#[sqlx::test]
async fn test_create_and_find_by_hash(pool: PgPool) {
    let (repo, owner) = setup(pool).await;

    let created = repo.create(new_link("abc1234", owner)).await.unwrap();

    let found = repo.find_by_hash("abc1234").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.long_url, "https://example.com");

    assert!(repo.find_by_hash("missing").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_duplicate_hash_is_conflict(pool: PgPool) {
    let (repo, owner) = setup(pool).await;

    repo.create(new_link("same", owner)).await.unwrap();
    let result = repo.create(new_link("same", owner)).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_list_by_owner_and_all(pool: PgPool) {
    let (repo, owner) = setup(pool).await;

    repo.create(new_link("first", owner)).await.unwrap();
    repo.create(new_link("second", owner)).await.unwrap();

    assert_eq!(repo.list_by_owner(owner).await.unwrap().len(), 2);
    assert!(repo.list_by_owner(Uuid::new_v4()).await.unwrap().is_empty());
    assert_eq!(repo.list_all().await.unwrap().len(), 2);
}

#[sqlx::test]
async fn test_delete_returns_removed_row(pool: PgPool) {
    let (repo, owner) = setup(pool).await;
    let created = repo.create(new_link("bye", owner)).await.unwrap();

    let deleted = repo.delete(created.id).await.unwrap().unwrap();
    assert_eq!(deleted.hash, "bye");

    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    assert!(repo.delete(created.id).await.unwrap().is_none());
}
