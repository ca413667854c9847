use anyhow::Result;
use chrono::Utc;
use contracts::system::auth::AuthErrorCode;
use contracts::system::users::User;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use super::repository;
use crate::system::auth::password;
use crate::system::auth::throttle::LoginThrottle;
use crate::system::auth::AuthError;

/// Emails are compared and stored trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Создание учётной записи (email + пароль)
pub async fn sign_up(conn: &DatabaseConnection, email: &str, password: &str) -> Result<User, AuthError> {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        return Err(AuthErrorCode::InvalidEmail.into());
    }

    password::validate_password_strength(password)?;

    if repository::get_by_email(conn, &email).await?.is_some() {
        return Err(AuthErrorCode::EmailAlreadyInUse.into());
    }

    let password_hash = password::hash_password(password)?;
    let user = insert_user(conn, email, &password_hash).await?;
    tracing::info!("User {} registered", user.id);

    Ok(user)
}

/// Insert; a concurrent sign-up that won the race on the email surfaces
/// as `auth/email-already-in-use`
async fn insert_user(
    conn: &DatabaseConnection,
    email: String,
    password_hash: &str,
) -> Result<User, AuthError> {
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email,
        is_active: true,
        created_at: Utc::now().to_rfc3339(),
        last_login_at: None,
    };

    match repository::create_with_password(conn, &user, password_hash).await {
        Ok(()) => Ok(user),
        Err(e) if is_unique_violation(&e) => Err(AuthErrorCode::EmailAlreadyInUse.into()),
        Err(e) => Err(e.into()),
    }
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<DbErr>().and_then(DbErr::sql_err),
        Some(SqlErr::UniqueConstraintViolation(_))
    )
}

/// Проверка email/пароля с учётом блокировки после серии неудач
pub async fn verify_credentials(
    conn: &DatabaseConnection,
    throttle: &LoginThrottle,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    let email = normalize_email(email);
    let now = Utc::now();

    if throttle.is_locked(&email, now) {
        tracing::warn!("Sign-in for {} refused: too many failed attempts", email);
        return Err(AuthErrorCode::TooManyRequests.into());
    }

    let user = match repository::get_by_email(conn, &email).await? {
        Some(user) => user,
        None => {
            throttle.record_failure(&email, now);
            return Err(AuthErrorCode::UserNotFound.into());
        }
    };

    if !user.is_active {
        return Err(AuthErrorCode::InvalidCredential.into());
    }

    let hash = repository::get_password_hash(conn, &user.id)
        .await?
        .ok_or(AuthError::Rejected(AuthErrorCode::InvalidCredential))?;

    if !password::verify_password(password, &hash)? {
        throttle.record_failure(&email, now);
        return Err(AuthErrorCode::WrongPassword.into());
    }

    throttle.clear(&email);
    repository::update_last_login(conn, &user.id).await?;

    Ok(user)
}

/// Creates the account unless the email is already registered.
/// Returns `true` when a new account was created.
pub async fn ensure_user(conn: &DatabaseConnection, email: &str, password: &str) -> Result<bool> {
    let email = normalize_email(email);
    if repository::get_by_email(conn, &email).await?.is_some() {
        return Ok(false);
    }
    sign_up(conn, &email, password)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {}", email, e))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::initialize_database;
    use chrono::Duration;

    async fn conn() -> (tempfile::TempDir, DatabaseConnection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = initialize_database(&dir.path().join("users.db")).await.unwrap();
        (dir, conn)
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("maryam@example.om"));
        assert!(!is_valid_email("maryam"));
        assert!(!is_valid_email("@example.om"));
        assert!(!is_valid_email("maryam@"));
        assert!(!is_valid_email("mar yam@example.om"));
        assert_eq!(normalize_email("  Maryam@Example.OM "), "maryam@example.om");
    }

    #[tokio::test]
    async fn sign_up_rules() {
        let (_dir, conn) = conn().await;

        let user = sign_up(&conn, " Noor@Example.com", "secret1").await.unwrap();
        assert_eq!(user.email, "noor@example.com");

        let dup = sign_up(&conn, "noor@example.com", "secret2").await.unwrap_err();
        assert_eq!(dup.code(), Some(AuthErrorCode::EmailAlreadyInUse));

        let weak = sign_up(&conn, "other@example.com", "123").await.unwrap_err();
        assert_eq!(weak.code(), Some(AuthErrorCode::WeakPassword));

        let bad = sign_up(&conn, "not-an-email", "secret1").await.unwrap_err();
        assert_eq!(bad.code(), Some(AuthErrorCode::InvalidEmail));

        assert_eq!(repository::count_users(&conn).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn losing_the_email_race_maps_to_already_in_use() {
        let (_dir, conn) = conn().await;
        let hash = password::hash_password("secret1").unwrap();

        insert_user(&conn, "race@example.com".into(), &hash).await.unwrap();
        let err = insert_user(&conn, "race@example.com".into(), &hash)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(AuthErrorCode::EmailAlreadyInUse));
        assert_eq!(repository::count_users(&conn).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn credentials_and_lockout() {
        let (_dir, conn) = conn().await;
        let throttle = LoginThrottle::new(2, Duration::minutes(15));
        sign_up(&conn, "huda@example.com", "secret1").await.unwrap();

        let ok = verify_credentials(&conn, &throttle, "HUDA@example.com", "secret1")
            .await
            .unwrap();
        let stored = repository::get_by_id(&conn, &ok.id).await.unwrap().unwrap();
        assert!(stored.last_login_at.is_some());

        let missing = verify_credentials(&conn, &throttle, "nobody@example.com", "x")
            .await
            .unwrap_err();
        assert_eq!(missing.code(), Some(AuthErrorCode::UserNotFound));

        for _ in 0..2 {
            let wrong = verify_credentials(&conn, &throttle, "huda@example.com", "wrong!")
                .await
                .unwrap_err();
            assert_eq!(wrong.code(), Some(AuthErrorCode::WrongPassword));
        }

        let locked = verify_credentials(&conn, &throttle, "huda@example.com", "secret1")
            .await
            .unwrap_err();
        assert_eq!(locked.code(), Some(AuthErrorCode::TooManyRequests));
    }

    #[tokio::test]
    async fn ensure_user_is_idempotent() {
        let (_dir, conn) = conn().await;
        assert!(ensure_user(&conn, "admin1@beauty.com", "Admin009").await.unwrap());
        assert!(!ensure_user(&conn, "admin1@beauty.com", "Admin009").await.unwrap());
        assert_eq!(repository::count_users(&conn).await.unwrap(), 1);
    }
}
