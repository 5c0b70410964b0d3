//! Role-based access policy guard.
//!
//! Authorization rules live in one declarative table keyed by operation
//! rather than as literal role sets at each call site. Denial is a typed
//! error, so `authorize(...)?` always short-circuits the enclosing
//! action.

use meridian_core::error::{CrmError, CrmResult};
use meridian_core::models::staff::Department;
use tracing::warn;
use uuid::Uuid;

use crate::error::AuthError;
use crate::token::SessionClaims;

/// Authenticated caller context, built from validated session claims.
/// Carries the role explicitly; guarded operations take it as a plain
/// argument.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    pub staff_id: Uuid,
    pub role: Department,
}

impl SessionContext {
    pub fn from_claims(claims: &SessionClaims) -> Result<Self, AuthError> {
        Ok(Self {
            staff_id: claims.subject()?,
            role: claims.role,
        })
    }
}

/// Every role-guarded CRM operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListStaff,
    CreateStaff,
    UpdateStaff,
    DeleteStaff,
    ListClients,
    CreateClient,
    UpdateClient,
    ListContracts,
    FilterContracts,
    CreateContract,
    UpdateContract,
    ListEvents,
    CreateEvent,
    UpdateEvent,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::ListStaff => "staff.list",
            Action::CreateStaff => "staff.create",
            Action::UpdateStaff => "staff.update",
            Action::DeleteStaff => "staff.delete",
            Action::ListClients => "client.list",
            Action::CreateClient => "client.create",
            Action::UpdateClient => "client.update",
            Action::ListContracts => "contract.list",
            Action::FilterContracts => "contract.filter",
            Action::CreateContract => "contract.create",
            Action::UpdateContract => "contract.update",
            Action::ListEvents => "event.list",
            Action::CreateEvent => "event.create",
            Action::UpdateEvent => "event.update",
        }
    }

    /// The permission table. Ownership restrictions (a commercial may
    /// only touch their own clients and contracts, a support their own
    /// events) are enforced by the call sites after this role gate.
    pub fn allowed_roles(self) -> &'static [Department] {
        use Department::{Commercial, Management, Support};
        match self {
            Action::ListStaff
            | Action::CreateStaff
            | Action::UpdateStaff
            | Action::DeleteStaff => &[Management],
            Action::ListClients | Action::CreateClient | Action::UpdateClient => &[Commercial],
            Action::ListContracts => &[Management, Commercial],
            Action::FilterContracts => &[Commercial],
            Action::CreateContract => &[Management],
            Action::UpdateContract => &[Management, Commercial],
            Action::ListEvents => &[Management, Commercial, Support],
            Action::CreateEvent => &[Commercial],
            Action::UpdateEvent => &[Management, Support],
        }
    }
}

/// Pure membership predicate. An empty `allowed` set always denies.
pub fn is_authorized(role: Department, allowed: &[Department]) -> bool {
    allowed.contains(&role)
}

/// Gate an operation on the caller's role. On denial, logs the attempt
/// and returns `PermissionDenied`; callers propagate with `?` so the
/// enclosing action is always aborted.
pub fn authorize(action: Action, ctx: &SessionContext) -> CrmResult<()> {
    if is_authorized(ctx.role, action.allowed_roles()) {
        return Ok(());
    }
    warn!(
        action = action.as_str(),
        role = %ctx.role,
        staff_id = %ctx.staff_id,
        "permission denied"
    );
    Err(CrmError::PermissionDenied {
        reason: format!(
            "{} is not allowed for the {} department",
            action.as_str(),
            ctx.role
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: Department) -> SessionContext {
        SessionContext {
            staff_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn membership_is_exact() {
        use Department::{Commercial, Management, Support};
        assert!(is_authorized(Management, &[Management]));
        assert!(!is_authorized(Management, &[Commercial]));
        assert!(is_authorized(Support, &[Management, Support]));
        assert!(!is_authorized(Commercial, &[Management, Support]));
    }

    #[test]
    fn empty_set_always_denies() {
        for role in Department::ALL {
            assert!(!is_authorized(role, &[]));
        }
    }

    #[test]
    fn staff_actions_are_management_only() {
        for action in [
            Action::ListStaff,
            Action::CreateStaff,
            Action::UpdateStaff,
            Action::DeleteStaff,
        ] {
            assert!(authorize(action, &ctx(Department::Management)).is_ok());
            assert!(authorize(action, &ctx(Department::Commercial)).is_err());
            assert!(authorize(action, &ctx(Department::Support)).is_err());
        }
    }

    #[test]
    fn client_actions_are_commercial_only() {
        for action in [Action::ListClients, Action::CreateClient, Action::UpdateClient] {
            assert!(authorize(action, &ctx(Department::Commercial)).is_ok());
            assert!(authorize(action, &ctx(Department::Management)).is_err());
            assert!(authorize(action, &ctx(Department::Support)).is_err());
        }
    }

    #[test]
    fn every_department_can_list_events() {
        for role in Department::ALL {
            assert!(authorize(Action::ListEvents, &ctx(role)).is_ok());
        }
    }

    #[test]
    fn contract_creation_is_management_only() {
        assert!(authorize(Action::CreateContract, &ctx(Department::Management)).is_ok());
        assert!(authorize(Action::CreateContract, &ctx(Department::Commercial)).is_err());
    }

    #[test]
    fn event_updates_exclude_commercial() {
        assert!(authorize(Action::UpdateEvent, &ctx(Department::Management)).is_ok());
        assert!(authorize(Action::UpdateEvent, &ctx(Department::Support)).is_ok());
        assert!(authorize(Action::UpdateEvent, &ctx(Department::Commercial)).is_err());
    }

    #[test]
    fn denial_is_a_typed_error() {
        let err = authorize(Action::CreateStaff, &ctx(Department::Support)).unwrap_err();
        assert!(matches!(err, CrmError::PermissionDenied { .. }));
    }
}
