//! Login flow and session handling for the interactive loop.

use meridian_auth::{AuthConfig, AuthError, AuthService, SessionContext, token};
use meridian_core::error::{CrmError, CrmResult};
use meridian_core::repository::StaffRepository;

use crate::{output, prompt};

/// Prompt for credentials until authentication succeeds and return the
/// minted session token. A failed attempt re-prompts; it never aborts.
pub async fn login<S: StaffRepository>(auth: &AuthService<S>) -> CrmResult<String> {
    output::print_heading("Please log in");
    loop {
        let email = prompt::email("Email")?;
        let password = prompt::password("Password")?;

        match auth.login(&email, &password).await {
            Ok((staff, session)) => {
                output::print_heading(&format!("Welcome {}!", staff.display_name()));
                return Ok(session);
            }
            Err(CrmError::AuthenticationFailed { .. }) => {
                output::print_error("Invalid email or password, please try again.");
            }
            Err(e) => return Err(e),
        }
    }
}

/// Validate the session token and extract the caller context for this
/// menu pass. Expired or invalid tokens are surfaced as `AuthError` so
/// the main loop can force a fresh login.
pub fn context_from_token(
    session: &str,
    config: &AuthConfig,
) -> Result<SessionContext, AuthError> {
    token::validate_session(session, config)?;
    let (staff_id, role) = token::decode_session(session, config)?;
    Ok(SessionContext { staff_id, role })
}
