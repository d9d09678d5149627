//! The config flow: store or replace the API key.

use crate::config::{ConfigStore, validate_api_key};
use crate::error::FlowError;

use super::prompter::{Notice, Prompter};

/// How the config flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOutcome {
    Unchanged,
    Saved,
}

/// Ask for an API key and persist it.
///
/// An existing key is only replaced after the user agrees. Invalid input is
/// reported and asked for again.
pub fn run_config<P>(store: &ConfigStore, prompter: &mut P) -> Result<ConfigOutcome, FlowError>
where
    P: Prompter + ?Sized,
{
    prompter.notify(Notice::ConfigHeader);

    if store.read().has_credential() {
        prompter.notify(Notice::CredentialAlreadyConfigured);
        if !prompter.confirm_reconfigure()? {
            return Ok(ConfigOutcome::Unchanged);
        }
    }

    let api_key = loop {
        let input = prompter.api_key()?;
        match validate_api_key(&input) {
            Ok(()) => break input.trim().to_string(),
            Err(reason) => prompter.notify(Notice::InvalidApiKey(reason.to_string())),
        }
    };

    store.set_credential(&api_key)?;
    prompter.notify(Notice::CredentialSaved);

    Ok(ConfigOutcome::Saved)
}
