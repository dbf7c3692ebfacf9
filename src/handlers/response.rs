//! Responses, command plans and the generic response handlers.

use super::command::{Parameters, CORRID_PARAM, MSG_PARAM};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Errors raised when instantiating a handler from its parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    #[error("Handler {handler} requires parameter '{parameter}'")]
    MissingParameter {
        handler: &'static str,
        parameter: &'static str,
    },
}

/// The outcome of a command, as delivered to a response handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T = String> {
    pub msg: String,
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub body: Option<T>,
}

impl<T> Response<T> {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            code: 0,
            body: None,
        }
    }

    pub fn with_body(mut self, body: T) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_code(mut self, code: i32) -> Self {
        self.code = code;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

/// A message to display in chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub kind: MessageKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrid: Option<String>,
}

impl ResponseMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
            corrid: None,
        }
    }

    pub fn error(text: impl Into<String>, corrid: Option<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
            corrid,
        }
    }
}

/// What the framework should do next: here, only messages to show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPlan {
    pub messages: Vec<ResponseMessage>,
}

impl CommandPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, message: ResponseMessage) -> Self {
        self.messages.push(message);
        self
    }
}

/// A response handler the dispatcher can look up by name.
pub trait HandleResponse {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;
    const TAGS: &'static [&'static str];

    fn handle<T: Display>(&self, response: &Response<T>) -> CommandPlan;
}

/// Displays an error in chat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericErrorHandler {
    /// Error prefix
    pub msg: Option<String>,
    /// Correlation ID
    pub corrid: Option<String>,
}

impl GenericErrorHandler {
    /// Instantiates the handler from a binding's parameter bag.
    ///
    /// Both parameters are optional; unknown keys are ignored.
    pub fn from_parameters(parameters: &Parameters) -> Self {
        Self {
            msg: parameters.get(MSG_PARAM).cloned(),
            corrid: parameters.get(CORRID_PARAM).cloned(),
        }
    }

    /// The text shown for a failed response: prefix, message, then the body
    /// in parentheses when there is one.
    pub fn error_text<T: Display>(&self, response: &Response<T>) -> String {
        let body = response
            .body
            .as_ref()
            .map(|body| format!("({})", body))
            .unwrap_or_default();
        let prefix = self.msg.as_deref().unwrap_or("");
        format!("{}{}{}", prefix, response.msg, body)
    }
}

impl HandleResponse for GenericErrorHandler {
    const NAME: &'static str = "GenericErrorHandler";
    const DESCRIPTION: &'static str = "Displays an error in chat";
    const TAGS: &'static [&'static str] = &["errors"];

    fn handle<T: Display>(&self, response: &Response<T>) -> CommandPlan {
        CommandPlan::new().add(ResponseMessage::error(
            self.error_text(response),
            self.corrid.clone(),
        ))
    }
}

/// Displays a success message in chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericSuccessHandler {
    /// Success msg
    pub msg: String,
}

impl GenericSuccessHandler {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }

    /// Instantiates the handler from a binding's parameter bag.
    pub fn from_parameters(parameters: &Parameters) -> Result<Self, HandlerError> {
        let msg = parameters
            .get(MSG_PARAM)
            .ok_or(HandlerError::MissingParameter {
                handler: Self::NAME,
                parameter: MSG_PARAM,
            })?;
        Ok(Self::new(msg.clone()))
    }
}

impl HandleResponse for GenericSuccessHandler {
    const NAME: &'static str = "GenericSuccessHandler";
    const DESCRIPTION: &'static str = "Displays a success message in chat";
    const TAGS: &'static [&'static str] = &["success"];

    // The response body is not rendered.
    fn handle<T: Display>(&self, _response: &Response<T>) -> CommandPlan {
        CommandPlan::new().add(ResponseMessage::success(self.msg.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_text_with_prefix_and_body() {
        let handler = GenericErrorHandler {
            msg: Some("Deploy failed: ".to_string()),
            corrid: None,
        };
        let response = Response::new("timeout").with_body("after 30s".to_string());
        assert_eq!(handler.error_text(&response), "Deploy failed: timeout(after 30s)");
    }

    #[test]
    fn test_error_text_without_prefix_or_body() {
        let handler = GenericErrorHandler::default();
        let response: Response = Response::new("timeout");
        assert_eq!(handler.error_text(&response), "timeout");
    }

    #[test]
    fn test_error_handler_carries_corrid() {
        let handler = GenericErrorHandler {
            msg: None,
            corrid: Some("abc".to_string()),
        };
        let plan = handler.handle(&Response::<String>::new("boom").with_code(1));
        assert_eq!(
            plan.messages,
            vec![ResponseMessage::error("boom", Some("abc".to_string()))]
        );
    }

    #[test]
    fn test_success_handler_ignores_body() {
        let handler = GenericSuccessHandler::new("Deployed");
        let plan = handler.handle(&Response::new("ok").with_body(42));
        assert_eq!(plan.messages, vec![ResponseMessage::success("Deployed")]);
    }

    #[test]
    fn test_success_from_parameters_requires_msg() {
        let err = GenericSuccessHandler::from_parameters(&Parameters::new()).unwrap_err();
        assert_eq!(
            err,
            HandlerError::MissingParameter {
                handler: "GenericSuccessHandler",
                parameter: "msg"
            }
        );
    }

    #[test]
    fn test_error_from_parameters() {
        let mut params = Parameters::new();
        params.insert("msg".to_string(), "Oops: ".to_string());
        params.insert("extra".to_string(), "x".to_string());
        let handler = GenericErrorHandler::from_parameters(&params);
        assert_eq!(handler.msg.as_deref(), Some("Oops: "));
        assert_eq!(handler.corrid, None);
    }

    #[test]
    fn test_handler_metadata() {
        assert_eq!(GenericErrorHandler::TAGS, &["errors"]);
        assert_eq!(GenericSuccessHandler::DESCRIPTION, "Displays a success message in chat");
    }
}
