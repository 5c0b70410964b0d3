//! Authentication service — login orchestration.

use meridian_core::error::{CrmError, CrmResult};
use meridian_core::models::staff::StaffMember;
use meridian_core::repository::StaffRepository;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Authentication service.
///
/// Generic over the staff repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<S: StaffRepository> {
    staff_repo: S,
    config: AuthConfig,
}

impl<S: StaffRepository> AuthService<S> {
    pub fn new(staff_repo: S, config: AuthConfig) -> Self {
        Self { staff_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticate a staff member by email and password.
    ///
    /// Unknown email, wrong password, and a corrupt stored hash all
    /// surface as the same `AuthenticationFailed` error. On success, a
    /// hash stored under outdated parameters is re-hashed with current
    /// ones and persisted before returning (opportunistic rehash).
    pub async fn authenticate(&self, email: &str, password: &str) -> CrmResult<StaffMember> {
        let mut staff = match self.staff_repo.get_by_email(email).await {
            Ok(staff) => staff,
            Err(CrmError::NotFound { .. }) => return Err(AuthError::InvalidCredentials.into()),
            Err(e) => return Err(e),
        };

        let valid = match password::verify_password(password, &staff.password_hash) {
            Ok(valid) => valid,
            Err(AuthError::MalformedCredential(detail)) => {
                warn!(staff_id = %staff.id, %detail, "stored credential is malformed");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e.into()),
        };
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        if password::needs_rehash(&staff.password_hash)? {
            let upgraded = password::hash_password(password)?;
            self.staff_repo
                .update_password_hash(staff.id, upgraded.clone())
                .await?;
            info!(staff_id = %staff.id, "upgraded stored password hash");
            staff.password_hash = upgraded;
        }

        Ok(staff)
    }

    /// Authenticate and mint a session token.
    pub async fn login(&self, email: &str, password: &str) -> CrmResult<(StaffMember, String)> {
        let staff = self.authenticate(email, password).await?;
        let session = token::issue_session(&staff, &self.config)?;
        info!(
            staff_id = %staff.id,
            department = %staff.department,
            "staff member logged in"
        );
        Ok((staff, session))
    }
}
