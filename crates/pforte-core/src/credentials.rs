//! Thin wrapper around the OS keyring for credential storage.

use crate::error::PortalError;

const SERVICE: &str = "pforte";

pub fn get(key: &str) -> Result<Option<String>, PortalError> {
    let entry = keyring::Entry::new(SERVICE, key).map_err(store_err)?;
    match entry.get_password() {
        Ok(pw) => Ok(Some(pw)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(store_err(e)),
    }
}

pub fn set(key: &str, value: &str) -> Result<(), PortalError> {
    let entry = keyring::Entry::new(SERVICE, key).map_err(store_err)?;
    entry.set_password(value).map_err(store_err)
}

pub fn delete(key: &str) -> Result<(), PortalError> {
    let entry = keyring::Entry::new(SERVICE, key).map_err(store_err)?;
    match entry.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(store_err(e)),
    }
}

fn store_err(e: keyring::Error) -> PortalError {
    PortalError::Credentials(e.to_string())
}
