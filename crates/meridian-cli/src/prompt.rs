//! Thin wrappers around `dialoguer` prompts returning `CrmResult`.

use std::str::FromStr;

use dialoguer::{Confirm, Input, Password, Select};
use meridian_core::error::{CrmError, CrmResult};
use meridian_core::models::contract::ContractStatus;
use meridian_core::models::staff::Department;
use uuid::Uuid;

use crate::validate;

fn interact_err(e: dialoguer::Error) -> CrmError {
    CrmError::Internal(format!("prompt failed: {e}"))
}

pub fn select(label: &str, items: &[&str]) -> CrmResult<usize> {
    Select::new()
        .with_prompt(label)
        .items(items)
        .default(0)
        .interact()
        .map_err(interact_err)
}

pub fn text(label: &str) -> CrmResult<String> {
    Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .map_err(interact_err)
}

/// Free text with the first letter upper-cased, for person names and
/// locations.
pub fn name(label: &str) -> CrmResult<String> {
    let value = text(label)?;
    let mut chars = value.trim().chars();
    Ok(match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => value,
    })
}

pub fn email(label: &str) -> CrmResult<String> {
    Input::<String>::new()
        .with_prompt(label)
        .validate_with(|input: &String| -> Result<(), &str> {
            if validate::is_valid_email(input) {
                Ok(())
            } else {
                Err("the email is not valid")
            }
        })
        .interact_text()
        .map_err(interact_err)
}

/// Hidden password input for login.
pub fn password(label: &str) -> CrmResult<String> {
    Password::new()
        .with_prompt(label)
        .interact()
        .map_err(interact_err)
}

/// Hidden password input with confirmation, for account creation.
pub fn new_password(label: &str) -> CrmResult<String> {
    Password::new()
        .with_prompt(label)
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(interact_err)
}

pub fn parse<T>(label: &str, description: &str) -> CrmResult<T>
where
    T: FromStr,
{
    let value = Input::<String>::new()
        .with_prompt(label)
        .validate_with(|input: &String| -> Result<(), String> {
            input
                .trim()
                .parse::<T>()
                .map(|_| ())
                .map_err(|_| format!("expected {description}"))
        })
        .interact_text()
        .map_err(interact_err)?;

    value
        .trim()
        .parse::<T>()
        .map_err(|_| CrmError::Internal(format!("validated input failed to parse as {description}")))
}

pub fn uuid(label: &str) -> CrmResult<Uuid> {
    parse::<Uuid>(label, "a record id (UUID)")
}

pub fn amount(label: &str) -> CrmResult<f64> {
    Input::<String>::new()
        .with_prompt(label)
        .validate_with(|input: &String| -> Result<(), String> {
            let value: f64 = input
                .trim()
                .parse()
                .map_err(|_| "expected a number".to_string())?;
            validate::validate_total_amount(value)
        })
        .interact_text()
        .map_err(interact_err)?
        .trim()
        .parse()
        .map_err(|_| CrmError::Internal("validated amount failed to parse".into()))
}

pub fn amount_due(label: &str, total: f64) -> CrmResult<f64> {
    Input::<String>::new()
        .with_prompt(label)
        .validate_with(move |input: &String| -> Result<(), String> {
            let value: f64 = input
                .trim()
                .parse()
                .map_err(|_| "expected a number".to_string())?;
            validate::validate_amount_due(value, total)
        })
        .interact_text()
        .map_err(interact_err)?
        .trim()
        .parse()
        .map_err(|_| CrmError::Internal("validated amount failed to parse".into()))
}

pub fn attendees(label: &str) -> CrmResult<u32> {
    parse::<u32>(label, "a non-negative whole number")
}

pub fn future_date(label: &str) -> CrmResult<chrono::DateTime<chrono::Utc>> {
    let value = Input::<String>::new()
        .with_prompt(format!("{label} (YYYY-MM-DD)"))
        .validate_with(|input: &String| -> Result<(), String> {
            validate::parse_future_date(input).map(|_| ())
        })
        .interact_text()
        .map_err(interact_err)?;

    validate::parse_future_date(&value).map_err(|e| CrmError::Validation { message: e })
}

pub fn department(label: &str) -> CrmResult<Department> {
    let items: Vec<&str> = Department::ALL.iter().map(|d| d.as_str()).collect();
    let choice = select(label, &items)?;
    Ok(Department::ALL[choice])
}

pub fn contract_status(label: &str) -> CrmResult<ContractStatus> {
    let items: Vec<&str> = ContractStatus::ALL.iter().map(|s| s.label()).collect();
    let choice = select(label, &items)?;
    Ok(ContractStatus::ALL[choice])
}

pub fn confirm(label: &str) -> CrmResult<bool> {
    Confirm::new()
        .with_prompt(label)
        .default(false)
        .interact()
        .map_err(interact_err)
}
