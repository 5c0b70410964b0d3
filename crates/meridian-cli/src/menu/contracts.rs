//! Contract management submenu (management and commercial departments).
//!
//! Contracts can be created, read, and updated; there is no delete.

use meridian_auth::{Action, SessionContext, authorize};
use meridian_core::error::CrmResult;
use meridian_core::models::contract::{Contract, ContractStatus, CreateContract, UpdateContract};
use meridian_core::models::staff::Department;
use meridian_core::repository::{ClientRepository, ContractRepository};
use tabled::Tabled;

use super::{App, not_the_contact, report, require_staff_in_department};
use crate::{output, prompt};

#[derive(Tabled)]
struct ContractTableRow {
    #[tabled(rename = "Contract ID")]
    id: String,
    #[tabled(rename = "Client ID")]
    client_id: String,
    #[tabled(rename = "Total Amount")]
    total_amount: String,
    #[tabled(rename = "Amount Due")]
    amount_due: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Commercial Contact")]
    commercial_contact: String,
}

impl From<&Contract> for ContractTableRow {
    fn from(contract: &Contract) -> Self {
        Self {
            id: contract.id.to_string(),
            client_id: contract.client_id.to_string(),
            total_amount: format!("{:.2}", contract.total_amount),
            amount_due: format!("{:.2}", contract.amount_due),
            status: contract.status.to_string(),
            commercial_contact: contract.commercial_contact.to_string(),
        }
    }
}

fn print_contracts(contracts: &[Contract]) {
    let rows: Vec<ContractTableRow> = contracts.iter().map(Into::into).collect();
    output::print_table(&rows);
}

pub async fn contracts_menu(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    if let Err(e) = authorize(Action::ListContracts, ctx) {
        output::print_error(&e.to_string());
        return Ok(());
    }

    loop {
        let choice = prompt::select(
            "Contracts menu",
            &[
                "See all contracts",
                "See contracts by filters",
                "Create a contract",
                "Update a contract",
                "Return to main menu",
            ],
        )?;

        let result = match choice {
            0 => list_contracts(app, ctx).await,
            1 => filtered_menu(app, ctx).await,
            2 => create_contract(app, ctx).await,
            3 => update_contract(app, ctx).await,
            _ => return Ok(()),
        };
        report(result)?;
    }
}

async fn list_contracts(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::ListContracts, ctx)?;
    let contracts = app.contracts.list().await?;
    print_contracts(&contracts);
    Ok(())
}

/// Commercial-only filtered listings.
async fn filtered_menu(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::FilterContracts, ctx)?;

    let choice = prompt::select(
        "Which contracts do you want to display?",
        &[
            "My assigned contracts",
            "All contracts of a client",
            "Contracts with an outstanding amount",
            "Contracts left to sign",
            "Back",
        ],
    )?;

    let contracts = match choice {
        0 => app.contracts.list_by_commercial(ctx.staff_id).await?,
        1 => {
            let client_id = prompt::uuid("Client id")?;
            // Surfaces a NotFound for a bogus id instead of an empty table.
            app.clients.get_by_id(client_id).await?;
            app.contracts.list_by_client(client_id).await?
        }
        2 => app.contracts.list_with_due_amount().await?,
        3 => app.contracts.list_by_status(ContractStatus::ToSign).await?,
        _ => return Ok(()),
    };

    print_contracts(&contracts);
    Ok(())
}

async fn create_contract(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::CreateContract, ctx)?;

    let client_id = prompt::uuid("Client id")?;
    let client = app.clients.get_by_id(client_id).await?;

    let total_amount = prompt::amount("Contract total amount")?;
    let amount_due = prompt::amount_due("Contract amount due", total_amount)?;
    let status = prompt::contract_status("Contract status")?;

    // Reuse the client's assigned commercial; otherwise ask for one and
    // back-fill the assignment onto the client.
    let commercial_contact = match client.commercial_contact {
        Some(existing) => existing,
        None => {
            let id = prompt::uuid("Commercial contact staff id")?;
            require_staff_in_department(app, id, Department::Commercial).await?;
            app.clients.assign_commercial(client_id, id).await?;
            id
        }
    };

    let contract = app
        .contracts
        .create(CreateContract {
            client_id,
            total_amount,
            amount_due,
            status,
            commercial_contact,
        })
        .await?;

    output::print_success("Contract created");
    output::print_table(&[ContractTableRow::from(&contract)]);
    Ok(())
}

async fn update_contract(app: &App, ctx: &SessionContext) -> CrmResult<()> {
    authorize(Action::UpdateContract, ctx)?;

    let id = prompt::uuid("Contract id to update")?;
    let contract = app.contracts.get_by_id(id).await?;

    // A commercial may only update contracts they are assigned to;
    // management may update any.
    if ctx.role == Department::Commercial && contract.commercial_contact != ctx.staff_id {
        return Err(not_the_contact("commercial contact"));
    }

    output::print_table(&[ContractTableRow::from(&contract)]);

    let field = prompt::select(
        "What field do you want to update?",
        &[
            "Total amount",
            "Amount due",
            "Status",
            "Commercial contact",
            "Cancel update",
        ],
    )?;

    let mut update = UpdateContract::default();
    match field {
        0 => update.total_amount = Some(prompt::amount("New total amount")?),
        1 => {
            update.amount_due =
                Some(prompt::amount_due("New amount due", contract.total_amount)?);
        }
        2 => update.status = Some(prompt::contract_status("New status")?),
        3 => {
            let staff_id = prompt::uuid("New commercial contact staff id")?;
            require_staff_in_department(app, staff_id, Department::Commercial).await?;
            update.commercial_contact = Some(staff_id);
        }
        _ => {
            println!("Update canceled");
            return Ok(());
        }
    }

    let updated = app.contracts.update(id, update).await?;
    output::print_success("Contract updated");
    output::print_table(&[ContractTableRow::from(&updated)]);
    Ok(())
}
