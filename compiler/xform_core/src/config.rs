//! Configuration (spec §6): recognized keys validated once at session
//! startup. Loading this from a file is a driver concern, out of scope here.

use xform_diagnostic::SessionError;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LambdaSyntax {
    Pipe,
    Arrow,
    Both,
}

impl LambdaSyntax {
    fn parse(raw: &str) -> Result<Self, SessionError> {
        match raw {
            "rust" => Ok(LambdaSyntax::Pipe),
            "arrow" => Ok(LambdaSyntax::Arrow),
            "both" => Ok(LambdaSyntax::Both),
            other => Err(SessionError::InvalidConfiguration(format!(
                "unknown lambda_syntax {other:?}, expected \"rust\", \"arrow\", or \"both\""
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub lambda_syntax: LambdaSyntax,
    pub option_type_enabled: bool,
    pub error_propagation_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lambda_syntax: LambdaSyntax::Pipe,
            option_type_enabled: true,
            error_propagation_enabled: true,
        }
    }
}

/// Raw, unvalidated configuration as a driver would hand it to the core
/// (e.g. parsed out of a config file) — string-typed so an unrecognized
/// `lambda_syntax` value surfaces as `invalid-configuration` rather than a
/// panic at deserialization time.
pub struct RawConfig {
    pub lambda_syntax: String,
    pub option_type_enabled: bool,
    pub error_propagation_enabled: bool,
}

impl RawConfig {
    pub fn validate(self) -> Result<Config, SessionError> {
        Ok(Config {
            lambda_syntax: LambdaSyntax::parse(&self.lambda_syntax)?,
            option_type_enabled: self.option_type_enabled,
            error_propagation_enabled: self.error_propagation_enabled,
        })
    }
}
