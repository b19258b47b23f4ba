use anyhow::Error;
use dialtone_config::ConfigError;
use dialtone_core::{CoreError, InvalidContactId, PhoneError};
use dialtone_store::error::{StoreError, StoreErrorKind};
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

/// Exit code of the first error in the chain that has a known meaning.
pub fn exit_code_for(err: &Error) -> ExitCode {
    let code = err
        .chain()
        .find_map(classify_cause)
        .unwrap_or(EXIT_FAILURE);
    ExitCode::from(code)
}

fn classify_cause(cause: &(dyn std::error::Error + 'static)) -> Option<u8> {
    if let Some(cli_err) = cause.downcast_ref::<CliError>() {
        return Some(match cli_err {
            CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
            CliError::NotFound(_) => EXIT_NOT_FOUND,
        });
    }
    if let Some(store_err) = cause.downcast_ref::<StoreError>() {
        return Some(store_exit_code(store_err));
    }
    if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
        return Some(config_exit_code(config_err));
    }
    let invalid =
        cause.is::<CoreError>() || cause.is::<PhoneError>() || cause.is::<InvalidContactId>();
    invalid.then_some(EXIT_INVALID_INPUT)
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::NotFound => EXIT_NOT_FOUND,
        StoreErrorKind::InvalidId
        | StoreErrorKind::InvalidParent
        | StoreErrorKind::InvalidDataPath
        | StoreErrorKind::Core => EXIT_INVALID_INPUT,
        StoreErrorKind::MissingHomeDir
        | StoreErrorKind::Migration
        | StoreErrorKind::UnsupportedKind
        | StoreErrorKind::UnknownPhoneField
        | StoreErrorKind::Sql
        | StoreErrorKind::Io => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidCountry(_)
        | ConfigError::InvalidDigitsToMatch(_)
        | ConfigError::InvalidDialPrefix { .. }
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
