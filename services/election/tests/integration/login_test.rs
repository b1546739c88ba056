use matdaan_domain::role::UserRole;
use matdaan_domain::status::ApprovalStatus;

use matdaan_election::crypto::{hash_password, verify_password};
use matdaan_election::error::ElectionServiceError;
use matdaan_election::usecase::admin::seed_admin;
use matdaan_election::usecase::token::{
    ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase, validate_token,
};

use crate::helpers::{TEST_JWT_SECRET, World};

fn login_uc(world: &World) -> LoginUseCase<
    crate::helpers::MockUserRepo,
    crate::helpers::MockVoterRepo,
    crate::helpers::MockAuditRepo,
> {
    LoginUseCase {
        users: world.user_repo(),
        voters: world.voter_repo(),
        audit: world.audit_repo(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

#[tokio::test]
async fn should_login_and_issue_valid_token() {
    let world = World::new();
    let hash = hash_password("Str0ng!pass").unwrap();
    let user = world.add_user("Admin", "admin@example.com", UserRole::Admin, &hash);

    let out = login_uc(&world)
        .execute(LoginInput {
            email: "admin@example.com".into(),
            password: "Str0ng!pass".into(),
            role: UserRole::Admin,
            ip_address: None,
        })
        .await
        .unwrap();

    let claims = validate_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.role, UserRole::Admin.as_i16());
    assert_eq!(claims.exp, out.access_token_exp);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let world = World::new();
    let hash = hash_password("Str0ng!pass").unwrap();
    world.add_user("Admin", "admin@example.com", UserRole::Admin, &hash);

    let result = login_uc(&world)
        .execute(LoginInput {
            email: "admin@example.com".into(),
            password: "Wr0ng!pass".into(),
            role: UserRole::Admin,
            ip_address: None,
        })
        .await;
    assert!(matches!(
        result,
        Err(ElectionServiceError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn should_reject_wrong_role_even_with_correct_password() {
    let world = World::new();
    let hash = hash_password("Str0ng!pass").unwrap();
    world.add_user("Admin", "admin@example.com", UserRole::Admin, &hash);

    let result = login_uc(&world)
        .execute(LoginInput {
            email: "admin@example.com".into(),
            password: "Str0ng!pass".into(),
            role: UserRole::Voter,
            ip_address: None,
        })
        .await;
    assert!(matches!(
        result,
        Err(ElectionServiceError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn should_reject_unknown_email() {
    let world = World::new();
    let result = login_uc(&world)
        .execute(LoginInput {
            email: "nobody@example.com".into(),
            password: "Str0ng!pass".into(),
            role: UserRole::Voter,
            ip_address: None,
        })
        .await;
    assert!(matches!(
        result,
        Err(ElectionServiceError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn should_audit_voter_logins() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );
    let hash = hash_password("Str0ng!pass").unwrap();
    world
        .users
        .lock()
        .unwrap()
        .iter_mut()
        .find(|u| u.id == voter.user_id)
        .unwrap()
        .password_hash = hash;

    login_uc(&world)
        .execute(LoginInput {
            email: "asha@example.com".into(),
            password: "Str0ng!pass".into(),
            role: UserRole::Voter,
            ip_address: Some("203.0.113.9".into()),
        })
        .await
        .unwrap();

    assert_eq!(world.audit_actions(voter.id), vec!["login"]);
    let audits = world.audits.lock().unwrap();
    assert_eq!(audits[0].ip_address.as_deref(), Some("203.0.113.9"));
}

#[tokio::test]
async fn should_change_password_after_verifying_old_one() {
    let world = World::new();
    let hash = hash_password("Str0ng!pass").unwrap();
    let user = world.add_user("Admin", "admin@example.com", UserRole::Admin, &hash);

    let uc = ChangePasswordUseCase {
        users: world.user_repo(),
    };

    let wrong_old = uc
        .execute(
            user.id,
            ChangePasswordInput {
                old_password: "Wr0ng!pass".into(),
                new_password: "N3w!Passw0rd".into(),
            },
        )
        .await;
    assert!(matches!(
        wrong_old,
        Err(ElectionServiceError::InvalidCredentials)
    ));

    let weak_new = uc
        .execute(
            user.id,
            ChangePasswordInput {
                old_password: "Str0ng!pass".into(),
                new_password: "weak".into(),
            },
        )
        .await;
    assert!(matches!(
        weak_new,
        Err(ElectionServiceError::InvalidPassword(_))
    ));

    uc.execute(
        user.id,
        ChangePasswordInput {
            old_password: "Str0ng!pass".into(),
            new_password: "N3w!Passw0rd".into(),
        },
    )
    .await
    .unwrap();

    let users = world.users.lock().unwrap();
    let stored = users.iter().find(|u| u.id == user.id).unwrap();
    assert!(verify_password("N3w!Passw0rd", &stored.password_hash).unwrap());
}

#[tokio::test]
async fn should_seed_admin_once() {
    let world = World::new();
    let repo = world.user_repo();

    let created = seed_admin(&repo, "admin@example.com", "System Admin", "Adm1n!pass")
        .await
        .unwrap();
    assert!(created);

    let again = seed_admin(&repo, "admin@example.com", "System Admin", "Adm1n!pass")
        .await
        .unwrap();
    assert!(!again, "seeding is idempotent");

    let users = world.users.lock().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, UserRole::Admin);
    assert!(users[0].is_verified);
}
