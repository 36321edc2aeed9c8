//! Output formatting for CLI commands.
//!
//! Supports raw (response body passed through) and human-readable output.

use std::io::Read;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter selecting between raw and humanized rendering.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    format: Format,
}

impl Formatter {
    /// Create a new formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format_mode(&self) -> Format {
        self.format
    }

    /// Check if raw output is selected.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self.format, Format::Raw)
    }

    /// Render a response body.
    ///
    /// In raw mode the body is drained and returned verbatim; `humanize` is
    /// never called. In human mode the untouched body is handed to `humanize`
    /// and its result returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read, is not UTF-8 (raw mode),
    /// or `humanize` fails.
    pub fn format<R, H>(&self, mut body: R, humanize: H) -> Result<String, CliError>
    where
        R: Read,
        H: FnOnce(&mut dyn Read) -> Result<String, CliError>,
    {
        match self.format {
            Format::Raw => {
                let mut buf = Vec::new();
                body.read_to_end(&mut buf)?;
                String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
            }
            Format::Human => humanize(&mut body),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(Format::Human)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_returns_body_verbatim() {
        let body = r#"{"apps":[{"id":"app1"}]}"#;
        let fmt = Formatter::new(Format::Raw);
        let out = fmt
            .format(body.as_bytes(), |_| panic!("humanize must not run in raw mode"))
            .expect("should format");
        assert_eq!(out, body);
    }

    #[test]
    fn raw_passes_invalid_json_through() {
        let fmt = Formatter::new(Format::Raw);
        let out = fmt
            .format(&b"not json {"[..], |_| Ok("humanized".into()))
            .expect("should format");
        assert_eq!(out, "not json {");
    }

    #[test]
    fn raw_rejects_non_utf8() {
        let fmt = Formatter::new(Format::Raw);
        let result = fmt.format(&[0xff, 0xfe][..], |_| Ok(String::new()));
        assert!(matches!(result, Err(CliError::Format(_))));
    }

    #[test]
    fn human_returns_humanize_result() {
        let fmt = Formatter::new(Format::Human);
        let out = fmt
            .format(&b"ignored"[..], |_| Ok("RENDERED".into()))
            .expect("should format");
        assert_eq!(out, "RENDERED");
    }

    #[test]
    fn human_passes_body_unconsumed() {
        let fmt = Formatter::new(Format::Human);
        let out = fmt
            .format(&b"hello body"[..], |body| {
                let mut s = String::new();
                body.read_to_string(&mut s)?;
                Ok(s.to_uppercase())
            })
            .expect("should format");
        assert_eq!(out, "HELLO BODY");
    }

    #[test]
    fn human_propagates_humanize_error() {
        let fmt = Formatter::new(Format::Human);
        let result = fmt.format(&b"{"[..], |body| {
            let value: serde_json::Value = serde_json::from_reader(body)?;
            Ok(value.to_string())
        });
        assert!(matches!(result, Err(CliError::Decode(_))));
    }

    #[test]
    fn default_is_human() {
        let fmt = Formatter::default();
        assert!(!fmt.is_raw());
        assert_eq!(fmt.format_mode(), Format::Human);
    }
}
