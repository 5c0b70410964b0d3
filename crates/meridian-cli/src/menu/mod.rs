//! Interactive menus.
//!
//! Every guarded action calls `authorize` first and propagates denial
//! with `?`, so a denied action always aborts and drops the staff
//! member back to the menu it came from.

mod clients;
mod contracts;
mod events;
mod staff;

use meridian_auth::{AuthError, AuthService, SessionContext};
use meridian_core::error::{CrmError, CrmResult};
use meridian_core::models::staff::{Department, StaffMember};
use meridian_core::repository::StaffRepository;
use meridian_db::repository::{
    SurrealClientRepository, SurrealContractRepository, SurrealEventRepository,
    SurrealStaffRepository,
};
use surrealdb::engine::remote::ws::Client as WsClient;
use uuid::Uuid;

use crate::{output, prompt, session};

/// Repositories and services the menus operate on, wired once at
/// startup.
pub struct App {
    pub auth: AuthService<SurrealStaffRepository<WsClient>>,
    pub staff: SurrealStaffRepository<WsClient>,
    pub clients: SurrealClientRepository<WsClient>,
    pub contracts: SurrealContractRepository<WsClient>,
    pub events: SurrealEventRepository<WsClient>,
}

/// Top-level interactive loop: log in, then dispatch to submenus until
/// the staff member exits. The session token is re-validated before
/// every pass; an expired or tampered token forces a fresh login.
pub async fn run(app: &App) -> CrmResult<()> {
    let mut session_token = session::login(&app.auth).await?;

    loop {
        let ctx = match session::context_from_token(&session_token, app.auth.config()) {
            Ok(ctx) => ctx,
            Err(AuthError::TokenExpired) | Err(AuthError::TokenInvalid(_)) => {
                output::print_warning("Your session has ended, please log in again.");
                session_token = session::login(&app.auth).await?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let choice = prompt::select(
            "Main menu",
            &[
                "Staff menu",
                "Contracts menu",
                "Events menu",
                "Clients menu",
                "Exit",
            ],
        )?;

        match choice {
            0 => staff::staff_menu(app, &ctx).await?,
            1 => contracts::contracts_menu(app, &ctx).await?,
            2 => events::events_menu(app, &ctx).await?,
            3 => clients::clients_menu(app, &ctx).await?,
            _ => return Ok(()),
        }
    }
}

/// Report a recoverable failure and keep the menu loop alive; only
/// fatal configuration errors propagate.
pub(crate) fn report(result: CrmResult<()>) -> CrmResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_recoverable() => {
            output::print_error(&e.to_string());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Fetch a staff member and check their department, for prompts that
/// ask for a commercial or support contact.
pub(crate) async fn require_staff_in_department(
    app: &App,
    id: Uuid,
    department: Department,
) -> CrmResult<StaffMember> {
    let staff = app.staff.get_by_id(id).await?;
    if staff.department != department {
        return Err(CrmError::Validation {
            message: format!(
                "{} is not in the {department} department",
                staff.display_name()
            ),
        });
    }
    Ok(staff)
}

/// Ownership denial shared by the submenus.
pub(crate) fn not_the_contact(what: &str) -> CrmError {
    CrmError::PermissionDenied {
        reason: format!("you are not the {what} of this record"),
    }
}

pub(crate) fn ownership_matches(ctx: &SessionContext, contact: Option<Uuid>) -> bool {
    contact == Some(ctx.staff_id)
}
