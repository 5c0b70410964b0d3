//! Event management submenu.
//!
//! Listing is open to every department. Commercial staff create events
//! for their own signed contracts; support staff update their assigned
//! events; management only reassigns the support contact.

use meridian_auth::{Action, SessionContext, authorize};
use meridian_core::error::CrmResult;
use meridian_core::models::event::{CreateEvent, Event, UpdateEvent};
use meridian_core::models::staff::Department;
use meridian_core::repository::{ContractRepository, EventRepository};
use tabled::Tabled;

use super::{App, not_the_contact, ownership_matches, report, require_staff_in_department};
use crate::{output, prompt};

#[derive(Tabled)]
struct EventTableRow {
    #[tabled(rename = "Event ID")]
    id: String,
    #[tabled(rename = "Contract ID")]
    contract_id: String,
    #[tabled(rename = "Start Date")]
    start_date: String,
    #[tabled(rename = "End Date")]
    end_date: String,
    #[tabled(rename = "Support Contact")]
    support_contact: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Attendees")]
    attendees: u32,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl From<&Event> for EventTableRow {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            contract_id: event.contract_id.to_string(),
            start_date: event.start_date.format("%Y-%m-%d").to_string(),
            end_date: event.end_date.format("%Y-%m-%d").to_string(),
            support_contact: output::opt_id(&event.support_contact),
            location: event.location.clone(),
            attendees: event.attendees,
            notes: event.notes.clone(),
        }
    }
}

fn print_events(events: &[Event]) {
    let rows: Vec<EventTableRow> = events.iter().map(Into::into).collect();
    output::print_table(&rows);
}

pub async fn events_menu(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    loop {
        let mut items = vec![
            "See all events",
            "Create an event",
            "Update an event",
            "Return to main menu",
        ];
        match ctx.role {
            Department::Management => items.push("See events with no support assigned"),
            Department::Support => items.push("See my assigned events"),
            Department::Commercial => {}
        }

        let choice = prompt::select("Events menu", &items)?;

        let result = match choice {
            0 => list_events(app, ctx).await,
            1 => create_event(app, ctx).await,
            2 => update_event(app, ctx).await,
            3 => return Ok(()),
            _ => filtered_events(app, ctx).await,
        };
        report(result)?;
    }
}

async fn list_events(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::ListEvents, ctx)?;
    let events = app.events.list().await?;
    print_events(&events);
    Ok(())
}

/// Role-specific listing behind the extra menu entry: unassigned events
/// for management, own events for support.
async fn filtered_events(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::ListEvents, ctx)?;
    let events = match ctx.role {
        Department::Management => app.events.list_without_support().await?,
        Department::Support => app.events.list_by_support(ctx.staff_id).await?,
        Department::Commercial => return Ok(()),
    };
    print_events(&events);
    Ok(())
}

async fn create_event(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::CreateEvent, ctx)?;

    let contract_id = prompt::uuid("Contract id")?;
    let contract = app.contracts.get_by_id(contract_id).await?;

    // Only the contract's own commercial can organize its events.
    if contract.commercial_contact != ctx.staff_id {
        return Err(not_the_contact("commercial contact"));
    }

    let start_date = prompt::future_date("Event start date")?;
    let end_date = prompt::future_date("Event end date")?;

    let support_contact = if prompt::confirm("Assign a support contact now?")? {
        let id = prompt::uuid("Support contact staff id")?;
        require_staff_in_department(app, id, Department::Support).await?;
        Some(id)
    } else {
        None
    };

    let location = prompt::name("Event location")?;
    let attendees = prompt::attendees("Number of attendees")?;
    let notes = prompt::text("Notes")?;

    let event = app
        .events
        .create(CreateEvent {
            contract_id,
            start_date,
            end_date,
            support_contact,
            location,
            attendees,
            notes,
        })
        .await?;

    output::print_success("Event created");
    output::print_table(&[EventTableRow::from(&event)]);
    Ok(())
}

async fn update_event(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::UpdateEvent, ctx)?;

    let id = prompt::uuid("Event id to update")?;
    let event = app.events.get_by_id(id).await?;

    // Support staff may only update their assigned events.
    if ctx.role == Department::Support && !ownership_matches(ctx, event.support_contact) {
        return Err(not_the_contact("support contact"));
    }

    output::print_table(&[EventTableRow::from(&event)]);

    if ctx.role == Department::Management {
        // Management only reassigns the support contact.
        let staff_id = prompt::uuid("New support contact staff id")?;
        require_staff_in_department(app, staff_id, Department::Support).await?;
        let updated = app
            .events
            .update(
                id,
                UpdateEvent {
                    support_contact: Some(Some(staff_id)),
                    ..Default::default()
                },
            )
            .await?;
        output::print_success("Support contact updated");
        output::print_table(&[EventTableRow::from(&updated)]);
        return Ok(());
    }

    let field = prompt::select(
        "What field do you want to update?",
        &[
            "Start date",
            "End date",
            "Support contact",
            "Location",
            "Attendees",
            "Notes",
            "Cancel update",
        ],
    )?;

    let mut update = UpdateEvent::default();
    match field {
        0 => update.start_date = Some(prompt::future_date("New start date")?),
        1 => update.end_date = Some(prompt::future_date("New end date")?),
        2 => {
            let staff_id = prompt::uuid("New support contact staff id")?;
            require_staff_in_department(app, staff_id, Department::Support).await?;
            update.support_contact = Some(Some(staff_id));
        }
        3 => update.location = Some(prompt::name("New location")?),
        4 => update.attendees = Some(prompt::attendees("New number of attendees")?),
        5 => update.notes = Some(prompt::text("New notes")?),
        _ => {
            println!("Update canceled");
            return Ok(());
        }
    }

    let updated = app.events.update(id, update).await?;
    output::print_success("Event updated");
    output::print_table(&[EventTableRow::from(&updated)]);
    Ok(())
}
