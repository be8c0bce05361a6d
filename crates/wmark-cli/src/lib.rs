//! Front end of the `wmark` tool.
//!
//! - [`resolve`] - parsing of answers and flags into compositor parameters
//! - [`session`] - the interactive prompt flow over any reader/writer pair
//! - [`apply`] - the same run driven by flag values
//! - [`report`] - the `info` text report
//!
//! The binary adds argument parsing, logging setup and the subcommands.

pub mod apply;
pub mod report;
pub mod resolve;
pub mod session;

use wmark_io::IoError;
use wmark_ops::OpsError;

/// Finds the message to show for an error caused by the user's input.
///
/// Returns `None` for environment or codec failures, which the binary
/// reports with their full context chain instead.
pub fn user_message(err: &anyhow::Error) -> Option<String> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<session::SessionError>() {
            return e.is_user_error().then(|| e.to_string());
        }
        if let Some(e) = cause.downcast_ref::<IoError>() {
            return e.is_user_error().then(|| e.to_string());
        }
        if let Some(e) = cause.downcast_ref::<resolve::ResolveError>() {
            return Some(e.to_string());
        }
        cause.downcast_ref::<OpsError>().map(|e| e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_user_message_through_context() {
        let err: anyhow::Result<()> = Err(IoError::MissingFile("a.png".into())).context("Failed to load: a.png");
        let msg = user_message(&err.unwrap_err());
        assert_eq!(msg.as_deref(), Some("The file a.png doesn't exist."));
    }

    #[test]
    fn test_plumbing_errors_have_no_user_message() {
        let err = anyhow::Error::new(IoError::DecodeError("truncated".into()));
        assert_eq!(user_message(&err), None);

        let err = anyhow::Error::new(session::SessionError::EndOfInput("image filename"));
        assert_eq!(user_message(&err), None);
    }

    #[test]
    fn test_resolve_errors_are_user_errors() {
        let err = anyhow::Error::new(resolve::ResolveError::InvalidPositionMethod);
        assert_eq!(user_message(&err).as_deref(), Some("The position method input is invalid."));
    }
}
