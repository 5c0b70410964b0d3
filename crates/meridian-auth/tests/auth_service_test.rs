//! Integration tests for the authentication service.

use jsonwebtoken::Algorithm;
use meridian_auth::config::AuthConfig;
use meridian_auth::guard::{Action, SessionContext, authorize};
use meridian_auth::service::AuthService;
use meridian_auth::{password, token};
use meridian_core::error::CrmError;
use meridian_core::models::staff::{CreateStaffMember, Department};
use meridian_core::repository::StaffRepository;
use meridian_db::repository::SurrealStaffRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

fn test_config() -> AuthConfig {
    AuthConfig::new("meridian-test-secret", Algorithm::HS256)
}

/// Spin up an in-memory DB, run migrations, and create one management
/// staff member with a freshly hashed password.
async fn setup() -> (
    SurrealStaffRepository<surrealdb::engine::local::Db>,
    Uuid, // staff_id
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    meridian_db::run_migrations(&db).await.unwrap();

    let staff_repo = SurrealStaffRepository::new(db.clone());
    let staff = staff_repo
        .create(CreateStaffMember {
            first_name: "Morgan".into(),
            last_name: "Hale".into(),
            email: "manager@test.com".into(),
            department: Department::Management,
            password_hash: password::hash_password("correct-horse-battery").unwrap(),
        })
        .await
        .unwrap();

    (staff_repo, staff.id)
}

#[tokio::test]
async fn login_happy_path() {
    let (staff_repo, staff_id) = setup().await;
    let config = test_config();
    let svc = AuthService::new(staff_repo, config.clone());

    let (staff, session) = svc
        .login("manager@test.com", "correct-horse-battery")
        .await
        .unwrap();

    assert_eq!(staff.id, staff_id);
    assert!(!session.is_empty());

    let claims = token::validate_session(&session, &config).unwrap();
    assert_eq!(claims.sub, staff_id.to_string());
    assert_eq!(claims.role, Department::Management);
}

#[tokio::test]
async fn login_wrong_password() {
    let (staff_repo, _) = setup().await;
    let svc = AuthService::new(staff_repo, test_config());

    let err = svc
        .login("manager@test.com", "wrong-password")
        .await
        .unwrap_err();

    assert!(
        matches!(err, CrmError::AuthenticationFailed { .. }),
        "expected AuthenticationFailed, got: {err:?}"
    );
}

#[tokio::test]
async fn login_unknown_email() {
    let (staff_repo, _) = setup().await;
    let svc = AuthService::new(staff_repo, test_config());

    let err = svc
        .login("nobody@test.com", "irrelevant")
        .await
        .unwrap_err();

    assert!(matches!(err, CrmError::AuthenticationFailed { .. }));
}

#[tokio::test]
async fn corrupt_stored_hash_is_invalid_credentials() {
    let (staff_repo, staff_id) = setup().await;

    staff_repo
        .update_password_hash(staff_id, "not-a-phc-hash".into())
        .await
        .unwrap();

    let svc = AuthService::new(staff_repo, test_config());
    let err = svc
        .login("manager@test.com", "correct-horse-battery")
        .await
        .unwrap_err();

    assert!(matches!(err, CrmError::AuthenticationFailed { .. }));
}

/// A hash stored under outdated parameters is transparently upgraded on
/// the next successful authentication.
#[tokio::test]
async fn successful_login_rehashes_weak_credentials() {
    use argon2::password_hash::SaltString;
    use argon2::{Argon2, Params, PasswordHasher, Version};

    let (staff_repo, staff_id) = setup().await;

    let weak_params = Params::new(8192, 1, 1, None).unwrap();
    let weak_argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, weak_params);
    let weak_salt = SaltString::encode_b64(&[42u8; 16]).unwrap();
    let weak_hash = weak_argon2
        .hash_password(b"correct-horse-battery", &weak_salt)
        .unwrap()
        .to_string();
    assert!(password::needs_rehash(&weak_hash).unwrap());

    staff_repo
        .update_password_hash(staff_id, weak_hash.clone())
        .await
        .unwrap();

    let svc = AuthService::new(staff_repo.clone(), test_config());
    let staff = svc
        .authenticate("manager@test.com", "correct-horse-battery")
        .await
        .unwrap();

    // The returned identity and the stored record both carry the
    // upgraded hash.
    assert_ne!(staff.password_hash, weak_hash);
    let stored = staff_repo.get_by_id(staff_id).await.unwrap();
    assert_eq!(stored.password_hash, staff.password_hash);
    assert!(!password::needs_rehash(&stored.password_hash).unwrap());
    assert!(password::verify_password("correct-horse-battery", &stored.password_hash).unwrap());
}

/// A hash stored with current parameters is left untouched by login.
#[tokio::test]
async fn fresh_hash_is_not_rewritten() {
    let (staff_repo, staff_id) = setup().await;
    let before = staff_repo.get_by_id(staff_id).await.unwrap().password_hash;

    let svc = AuthService::new(staff_repo.clone(), test_config());
    svc.authenticate("manager@test.com", "correct-horse-battery")
        .await
        .unwrap();

    let after = staff_repo.get_by_id(staff_id).await.unwrap().password_hash;
    assert_eq!(before, after);
}

/// End-to-end: login, validate, decode, authorize.
#[tokio::test]
async fn session_authorizes_by_department() {
    let (staff_repo, staff_id) = setup().await;
    let config = test_config();
    let svc = AuthService::new(staff_repo, config.clone());

    let (_, session) = svc
        .login("manager@test.com", "correct-horse-battery")
        .await
        .unwrap();

    let claims = token::validate_session(&session, &config).unwrap();
    let ctx = SessionContext::from_claims(&claims).unwrap();
    assert_eq!(ctx.staff_id, staff_id);

    // Management-gated action passes; commercial-only action denies.
    assert!(authorize(Action::CreateStaff, &ctx).is_ok());
    let err = authorize(Action::CreateClient, &ctx).unwrap_err();
    assert!(matches!(err, CrmError::PermissionDenied { .. }));

    // The independent decode call agrees with the validated claims.
    let (subject, role) = token::decode_session(&session, &config).unwrap();
    assert_eq!(subject, staff_id);
    assert_eq!(role, Department::Management);
}
