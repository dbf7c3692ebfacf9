//! Command descriptors and response handler bindings.

use super::response::{GenericErrorHandler, GenericSuccessHandler, HandleResponse};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameter bag passed to a response handler, in insertion order.
pub type Parameters = IndexMap<String, String>;

/// Binding kind understood by the dispatcher.
pub const RESPOND_KIND: &str = "respond";

/// Key of the message parameter.
pub const MSG_PARAM: &str = "msg";

/// Key of the correlation id parameter.
pub const CORRID_PARAM: &str = "corrid";

/// A reference to a named response handler and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respond {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub parameters: Parameters,
}

impl Respond {
    pub fn new(name: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            kind: RESPOND_KIND.to_string(),
            name: name.into(),
            parameters,
        }
    }
}

/// A command together with what to do when it succeeds or fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRespondable<T> {
    pub instruction: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_success: Option<Respond>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<Respond>,
}

impl<T> CommandRespondable<T> {
    /// Creates a command with no handlers bound.
    pub fn new(instruction: T) -> Self {
        Self {
            instruction,
            on_success: None,
            on_error: None,
        }
    }
}

/// Builds the parameter bag for [`GenericErrorHandler`].
///
/// # Example
///
/// ```
/// use queryquill::handlers::{ErrorParameters, Parameters};
///
/// let params: Parameters = ErrorParameters::new()
///     .msg("Failed: ")
///     .corrid("abc-123")
///     .with("channel", "general")
///     .into();
/// assert_eq!(params.get("corrid").map(String::as_str), Some("abc-123"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorParameters {
    parameters: Parameters,
}

impl ErrorParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix shown before the error message.
    pub fn msg(self, msg: impl Into<String>) -> Self {
        self.with(MSG_PARAM, msg)
    }

    /// Correlation id attached to the rendered error.
    pub fn corrid(self, corrid: impl Into<String>) -> Self {
        self.with(CORRID_PARAM, corrid)
    }

    /// Any extra parameter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

impl From<ErrorParameters> for Parameters {
    fn from(params: ErrorParameters) -> Self {
        params.parameters
    }
}

/// Binds the generic error handler, replacing any previous error binding.
pub fn handle_errors<T>(
    mut res: CommandRespondable<T>,
    params: Parameters,
) -> CommandRespondable<T> {
    debug!(handler = GenericErrorHandler::NAME, "binding error handler");
    res.on_error = Some(Respond::new(GenericErrorHandler::NAME, params));
    res
}

/// Binds the generic success handler showing `msg`.
pub fn handle_success<T>(
    mut res: CommandRespondable<T>,
    msg: impl Into<String>,
) -> CommandRespondable<T> {
    debug!(handler = GenericSuccessHandler::NAME, "binding success handler");
    let mut parameters = Parameters::new();
    parameters.insert(MSG_PARAM.to_string(), msg.into());
    res.on_success = Some(Respond::new(GenericSuccessHandler::NAME, parameters));
    res
}

/// Binds both the generic error and success handlers.
pub fn wrap<T>(
    res: CommandRespondable<T>,
    success: impl Into<String>,
    params: Parameters,
) -> CommandRespondable<T> {
    let with_errors = handle_errors(res, params);
    handle_success(with_errors, success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_command_has_no_bindings() {
        let command = CommandRespondable::new("deploy");
        assert!(command.on_success.is_none());
        assert!(command.on_error.is_none());
    }

    #[test]
    fn test_handle_errors_without_params() {
        let command = handle_errors(CommandRespondable::new("deploy"), Parameters::new());
        let on_error = command.on_error.unwrap();
        assert_eq!(on_error.kind, "respond");
        assert_eq!(on_error.name, "GenericErrorHandler");
        assert!(on_error.parameters.is_empty());
        assert!(command.on_success.is_none());
    }

    #[test]
    fn test_handle_success_sets_msg() {
        let command = handle_success(CommandRespondable::new("deploy"), "Deployed");
        let on_success = command.on_success.unwrap();
        assert_eq!(on_success.name, "GenericSuccessHandler");
        assert_eq!(on_success.parameters.get("msg").map(String::as_str), Some("Deployed"));
    }

    #[test]
    fn test_wrap_binds_both() {
        let params: Parameters = ErrorParameters::new().msg("Oops: ").corrid("42").into();
        let command = wrap(CommandRespondable::new("deploy"), "Deployed", params);
        let on_error = command.on_error.unwrap();
        assert_eq!(on_error.parameters.get("msg").map(String::as_str), Some("Oops: "));
        assert_eq!(on_error.parameters.get("corrid").map(String::as_str), Some("42"));
        assert!(command.on_success.is_some());
        assert_eq!(command.instruction, "deploy");
    }

    #[test]
    fn test_serializes_camel_case() {
        let command = handle_success(CommandRespondable::new("deploy"), "Done");
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["onSuccess"]["name"], "GenericSuccessHandler");
        assert_eq!(json["onSuccess"]["parameters"]["msg"], "Done");
        assert!(json.get("onError").is_none());
    }
}
