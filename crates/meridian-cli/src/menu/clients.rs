//! Client management submenu (commercial department only).

use meridian_auth::{Action, SessionContext, authorize};
use meridian_core::error::CrmResult;
use meridian_core::models::client::{Client, CreateClient, UpdateClient};
use meridian_core::repository::ClientRepository;
use tabled::Tabled;

use super::{App, not_the_contact, ownership_matches, report};
use crate::{output, prompt};

#[derive(Tabled)]
struct ClientTableRow {
    #[tabled(rename = "Client ID")]
    id: String,
    #[tabled(rename = "First Name")]
    first_name: String,
    #[tabled(rename = "Last Name")]
    last_name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Commercial Contact")]
    commercial_contact: String,
}

impl From<&Client> for ClientTableRow {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.to_string(),
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            company: client.company.clone(),
            commercial_contact: output::opt_id(&client.commercial_contact),
        }
    }
}

pub async fn clients_menu(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    if let Err(e) = authorize(Action::ListClients, ctx) {
        output::print_error(&e.to_string());
        return Ok(());
    }

    loop {
        let choice = prompt::select(
            "Client menu",
            &[
                "See all clients",
                "Create a client",
                "Update a client",
                "Return to main menu",
            ],
        )?;

        let result = match choice {
            0 => list_clients(app, ctx).await,
            1 => create_client(app, ctx).await,
            2 => update_client(app, ctx).await,
            _ => return Ok(()),
        };
        report(result)?;
    }
}

async fn list_clients(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::ListClients, ctx)?;
    let clients = app.clients.list().await?;
    let rows: Vec<ClientTableRow> = clients.iter().map(Into::into).collect();
    output::print_table(&rows);
    Ok(())
}

async fn create_client(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::CreateClient, ctx)?;

    let email = prompt::email("Client email")?;
    let phone = prompt::text("Client phone number")?;
    let first_name = prompt::name("First name")?;
    let last_name = prompt::name("Last name")?;
    let company = prompt::text("Company")?;

    // The creating commercial becomes the assigned contact.
    let client = app
        .clients
        .create(CreateClient {
            first_name,
            last_name,
            email,
            phone,
            company,
            commercial_contact: Some(ctx.staff_id),
        })
        .await?;

    output::print_success(&format!(
        "Client {} {} created",
        client.first_name, client.last_name
    ));
    output::print_table(&[ClientTableRow::from(&client)]);
    Ok(())
}

async fn update_client(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::UpdateClient, ctx)?;

    let id = prompt::uuid("Client id to update")?;
    let client = app.clients.get_by_id(id).await?;

    // A commercial may only update their own clients.
    if !ownership_matches(ctx, client.commercial_contact) {
        return Err(not_the_contact("commercial contact"));
    }

    output::print_table(&[ClientTableRow::from(&client)]);

    let field = prompt::select(
        "What field do you want to update?",
        &[
            "First name",
            "Last name",
            "Email",
            "Phone",
            "Company",
            "Cancel update",
        ],
    )?;

    let mut update = UpdateClient::default();
    match field {
        0 => update.first_name = Some(prompt::name("New first name")?),
        1 => update.last_name = Some(prompt::name("New last name")?),
        2 => update.email = Some(prompt::email("New email")?),
        3 => update.phone = Some(prompt::text("New phone number")?),
        4 => update.company = Some(prompt::text("New company")?),
        _ => {
            println!("Update canceled");
            return Ok(());
        }
    }

    let updated = app.clients.update(id, update).await?;
    output::print_success("Client updated");
    output::print_table(&[ClientTableRow::from(&updated)]);
    Ok(())
}
