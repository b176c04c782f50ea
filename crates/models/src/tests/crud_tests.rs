use anyhow::Result;
use sea_orm::{EntityTrait, SqlErr};
use uuid::Uuid;

use super::setup_test_db;
use crate::{article, comment, user, user_credentials};

fn unique_email() -> String {
    format!("crud_{}@example.com", Uuid::new_v4())
}

/// Test user create and lookup by email
#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let email = unique_email();
    let created = user::create(&db, &email, "Crud User").await?;
    assert_eq!(created.email, email);

    let found = user::find_by_email(&db, &email).await?.expect("user by email");
    assert_eq!(found.id, created.id);

    assert!(user::create(&db, "not-an-email", "X").await.is_err());
    assert!(user::create(&db, &unique_email(), "   ").await.is_err());

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

/// Credentials are upserted, never duplicated
#[tokio::test]
async fn test_credentials_upsert() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let u = user::create(&db, &unique_email(), "Cred User").await?;
    let first = user_credentials::upsert_password(&db, u.id, "hash-1".into(), "argon2").await?;
    let second = user_credentials::upsert_password(&db, u.id, "hash-2".into(), "argon2").await?;
    assert_eq!(first.id, second.id);
    assert_eq!(second.password_hash, "hash-2");

    let err = user_credentials::upsert_password(&db, u.id, " ".into(), "argon2").await;
    assert!(err.is_err());

    user::Entity::delete_by_id(u.id).exec(&db).await?;
    Ok(())
}

/// Tags are stored as an array and keep commas intact
#[tokio::test]
async fn test_article_tags_round_trip() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let u = user::create(&db, &unique_email(), "Author").await?;
    let tags = vec!["x".to_string(), "a,b".to_string(), String::new()];
    let created = article::create(&db, u.id, "T", "C", tags.clone()).await?;

    let found = article::find(&db, created.id).await?.expect("article");
    assert_eq!(found.tags, tags);
    assert_eq!(found, created);

    let empty = article::create(&db, u.id, "T2", "C2", vec![]).await?;
    assert!(article::find(&db, empty.id).await?.expect("article").tags.is_empty());

    assert!(article::create(&db, u.id, "  ", "C", vec![]).await.is_err());

    user::Entity::delete_by_id(u.id).exec(&db).await?;
    Ok(())
}

/// Deleting an article removes its comments
#[tokio::test]
async fn test_article_delete_cascades_to_comments() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let u = user::create(&db, &unique_email(), "Author").await?;
    let a = article::create(&db, u.id, "T", "C", vec![]).await?;
    let c1 = comment::create(&db, a.id, u.id, "first").await?;
    let c2 = comment::create(&db, a.id, u.id, "second").await?;

    let listed = comment::list_by_article(&db, a.id).await?;
    assert_eq!(listed.iter().map(|c| c.id).collect::<Vec<_>>(), vec![c1.id, c2.id]);

    assert!(article::delete(&db, a.id).await?);
    assert!(!article::delete(&db, a.id).await?);
    assert!(comment::list_by_article(&db, a.id).await?.is_empty());
    assert!(comment::Entity::find_by_id(c1.id).one(&db).await?.is_none());

    user::Entity::delete_by_id(u.id).exec(&db).await?;
    Ok(())
}

/// The foreign key rejects comments on missing articles
#[tokio::test]
async fn test_comment_requires_existing_article() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let u = user::create(&db, &unique_email(), "Commenter").await?;
    let err = comment::create(&db, Uuid::new_v4(), u.id, "orphan")
        .await
        .expect_err("fk violation");
    assert!(matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))));

    user::Entity::delete_by_id(u.id).exec(&db).await?;
    Ok(())
}
