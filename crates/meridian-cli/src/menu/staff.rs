//! Staff management submenu (management department only).

use meridian_auth::{Action, SessionContext, authorize, password};
use meridian_core::error::CrmResult;
use meridian_core::models::staff::{CreateStaffMember, StaffMember, UpdateStaffMember};
use meridian_core::repository::StaffRepository;
use tabled::Tabled;

use super::{App, report};
use crate::{output, prompt};

#[derive(Tabled)]
struct StaffTableRow {
    #[tabled(rename = "Staff ID")]
    id: String,
    #[tabled(rename = "First Name")]
    first_name: String,
    #[tabled(rename = "Last Name")]
    last_name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Department")]
    department: String,
}

impl From<&StaffMember> for StaffTableRow {
    fn from(staff: &StaffMember) -> Self {
        Self {
            id: staff.id.to_string(),
            first_name: staff.first_name.clone(),
            last_name: staff.last_name.clone(),
            email: staff.email.clone(),
            department: staff.department.to_string(),
        }
    }
}

pub async fn staff_menu(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    // The whole submenu is management-only; everyone else is bounced
    // straight back to the main menu.
    if let Err(e) = authorize(Action::ListStaff, ctx) {
        output::print_error(&e.to_string());
        return Ok(());
    }

    loop {
        let choice = prompt::select(
            "Staff menu",
            &[
                "See all staff members",
                "Create a staff member",
                "Update a staff member",
                "Delete a staff member",
                "Return to main menu",
            ],
        )?;

        let result = match choice {
            0 => list_staff(app, ctx).await,
            1 => create_staff(app, ctx).await,
            2 => update_staff(app, ctx).await,
            3 => delete_staff(app, ctx).await,
            _ => return Ok(()),
        };
        report(result)?;
    }
}

async fn list_staff(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::ListStaff, ctx)?;
    let staff = app.staff.list().await?;
    let rows: Vec<StaffTableRow> = staff.iter().map(Into::into).collect();
    output::print_table(&rows);
    Ok(())
}

async fn create_staff(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::CreateStaff, ctx)?;

    let email = prompt::email("Staff email")?;
    let password_plain = prompt::new_password("Staff password")?;
    let first_name = prompt::name("First name")?;
    let last_name = prompt::name("Last name")?;
    let department = prompt::department("Department")?;

    let password_hash = password::hash_password(&password_plain)?;
    let staff = app
        .staff
        .create(CreateStaffMember {
            first_name,
            last_name,
            email,
            department,
            password_hash,
        })
        .await?;

    output::print_success(&format!(
        "Staff member {} created in the {} department",
        staff.display_name(),
        staff.department
    ));
    output::print_table(&[StaffTableRow::from(&staff)]);
    Ok(())
}

async fn update_staff(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::UpdateStaff, ctx)?;

    let id = prompt::uuid("Staff id to update")?;
    let staff = app.staff.get_by_id(id).await?;
    output::print_table(&[StaffTableRow::from(&staff)]);

    let field = prompt::select(
        "What field do you want to update?",
        &[
            "First name",
            "Last name",
            "Email",
            "Department",
            "Cancel update",
        ],
    )?;

    let mut update = UpdateStaffMember::default();
    match field {
        0 => update.first_name = Some(prompt::name("New first name")?),
        1 => update.last_name = Some(prompt::name("New last name")?),
        2 => update.email = Some(prompt::email("New email")?),
        3 => update.department = Some(prompt::department("New department")?),
        _ => {
            println!("Update canceled");
            return Ok(());
        }
    }

    let updated = app.staff.update(id, update).await?;
    output::print_success("Staff member updated");
    output::print_table(&[StaffTableRow::from(&updated)]);
    Ok(())
}

async fn delete_staff(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::DeleteStaff, ctx)?;

    let id = prompt::uuid("Staff id to delete")?;
    let staff = app.staff.get_by_id(id).await?;
    output::print_table(&[StaffTableRow::from(&staff)]);

    if !prompt::confirm(&format!("Delete {}?", staff.display_name()))? {
        println!("Deletion canceled");
        return Ok(());
    }

    app.staff.delete(id).await?;
    output::print_success("Staff member deleted");
    Ok(())
}
