//! Effective-user resolution.
//!
//! ICMP raw sockets usually mean the tool runs under `sudo`; in that
//! case the interesting identity is the invoking user, which sudo
//! leaves in `SUDO_USER`. Otherwise the OS login name is used.

use thiserror::Error;

/// Environment variable sudo sets to the invoking user's name.
const SUDO_USER_VAR: &str = "SUDO_USER";

/// Identity resolution failures. Fatal at startup.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The OS could not report a login name for this process.
    #[error("unable to determine the current login name")]
    UnknownUser,

    /// The login name was not valid UTF-8.
    #[error("login name is not valid UTF-8")]
    NonUtf8,
}

/// Return the effective user identity: the `SUDO_USER` override when
/// present and non-empty, else the OS-reported login name.
pub fn effective_user() -> Result<String, IdentityError> {
    if let Ok(user) = std::env::var(SUDO_USER_VAR) {
        if !user.is_empty() {
            return Ok(user);
        }
    }
    users::get_current_username()
        .ok_or(IdentityError::UnknownUser)?
        .into_string()
        .map_err(|_| IdentityError::NonUtf8)
}
