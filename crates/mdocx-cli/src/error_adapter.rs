//! Error adapter for converting MdocxError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI, adding
//! error codes and actionable help text.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use mdocx::MdocxError;
use mdocx::convert::ConvertError;

/// Adapter for [`MdocxError`] variants.
///
/// Wraps an error and implements [`MietteDiagnostic`] to enable rich error
/// formatting in the CLI.
pub struct ErrorAdapter<'a>(pub &'a MdocxError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            MdocxError::Io(_) => "mdocx::io",
            MdocxError::Pattern { .. } => "mdocx::pattern",
            MdocxError::Convert(_) => "mdocx::convert",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: &str = match &self.0 {
            MdocxError::Pattern { .. } => {
                "The input pattern must be a valid glob, e.g. 'Chapter*_Summary.md'"
            }
            MdocxError::Convert(ConvertError::Launch { .. }) => {
                "Check that the converter executable is installed and on PATH, \
                 or point --converter at it"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}
