//! Integration tests for the staff repository.

use meridian_core::error::CrmError;
use meridian_core::models::staff::{CreateStaffMember, Department, UpdateStaffMember};
use meridian_core::repository::StaffRepository;
use meridian_db::repository::SurrealStaffRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// The repository treats the credential as opaque; any PHC-shaped
/// string will do for storage tests.
const TEST_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$G5UxpH0P0ujQKCV0ZGAkPf2TYJZJbEsj";

async fn setup() -> SurrealStaffRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    meridian_db::run_migrations(&db).await.unwrap();
    SurrealStaffRepository::new(db)
}

fn new_staff(email: &str, department: Department) -> CreateStaffMember {
    CreateStaffMember {
        first_name: "Jordan".into(),
        last_name: "Reyes".into(),
        email: email.into(),
        department,
        password_hash: TEST_HASH.into(),
    }
}

#[tokio::test]
async fn create_and_fetch() {
    let repo = setup().await;

    let created = repo
        .create(new_staff("jordan@meridian.test", Department::Commercial))
        .await
        .unwrap();
    assert_eq!(created.email, "jordan@meridian.test");
    assert_eq!(created.department, Department::Commercial);
    assert_eq!(created.password_hash, TEST_HASH);

    let by_id = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(by_id.email, created.email);

    let by_email = repo.get_by_email("jordan@meridian.test").await.unwrap();
    assert_eq!(by_email.id, created.id);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let repo = setup().await;

    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, CrmError::NotFound { .. }));

    let err = repo.get_by_email("ghost@meridian.test").await.unwrap_err();
    assert!(matches!(err, CrmError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let repo = setup().await;

    repo.create(new_staff("dup@meridian.test", Department::Support))
        .await
        .unwrap();
    let result = repo
        .create(new_staff("dup@meridian.test", Department::Management))
        .await;
    assert!(result.is_err(), "unique email index should reject this");
}

#[tokio::test]
async fn update_overwrites_fields_in_place() {
    let repo = setup().await;
    let created = repo
        .create(new_staff("update@meridian.test", Department::Support))
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateStaffMember {
                first_name: Some("Alex".into()),
                department: Some(Department::Management),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Alex");
    assert_eq!(updated.department, Department::Management);
    // Untouched fields survive.
    assert_eq!(updated.last_name, "Reyes");
    assert_eq!(updated.email, "update@meridian.test");
}

#[tokio::test]
async fn password_hash_can_be_replaced() {
    let repo = setup().await;
    let created = repo
        .create(new_staff("rehash@meridian.test", Department::Commercial))
        .await
        .unwrap();

    let replacement = format!("{TEST_HASH}x");
    repo.update_password_hash(created.id, replacement.clone())
        .await
        .unwrap();

    let stored = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(stored.password_hash, replacement);
}

#[tokio::test]
async fn password_update_for_unknown_staff_is_not_found() {
    let repo = setup().await;
    let err = repo
        .update_password_hash(Uuid::new_v4(), TEST_HASH.into())
        .await
        .unwrap_err();
    assert!(matches!(err, CrmError::NotFound { .. }));
}

#[tokio::test]
async fn delete_removes_the_record() {
    let repo = setup().await;
    let created = repo
        .create(new_staff("delete@meridian.test", Department::Support))
        .await
        .unwrap();

    repo.delete(created.id).await.unwrap();

    let err = repo.get_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, CrmError::NotFound { .. }));
}

#[tokio::test]
async fn list_returns_all_members() {
    let repo = setup().await;
    repo.create(new_staff("a@meridian.test", Department::Management))
        .await
        .unwrap();
    repo.create(new_staff("b@meridian.test", Department::Support))
        .await
        .unwrap();

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 2);
}
