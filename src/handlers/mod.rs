//! Generic response handlers for chat commands.
//!
//! Commands sent by the automation framework can carry a success and an
//! error binding: the name of a response handler plus a parameter bag. When
//! the command completes, the dispatcher instantiates the named handler from
//! those parameters and runs it on the response.
//!
//! # Modules
//!
//! - `command`: command descriptors and the `handle_errors` / `handle_success` / `wrap` helpers
//! - `response`: responses, command plans and the generic handlers
//!
//! # Example
//!
//! ```
//! use queryquill::handlers::{wrap, CommandRespondable, ErrorParameters};
//!
//! let command = wrap(
//!     CommandRespondable::new("create-issue"),
//!     "Issue created",
//!     ErrorParameters::new().msg("Could not create issue: ").into(),
//! );
//! assert_eq!(command.on_success.unwrap().name, "GenericSuccessHandler");
//! assert_eq!(command.on_error.unwrap().name, "GenericErrorHandler");
//! ```

pub mod command;
pub mod response;

pub use command::{
    handle_errors, handle_success, wrap, CommandRespondable, ErrorParameters, Parameters, Respond,
};
pub use response::{
    CommandPlan, GenericErrorHandler, GenericSuccessHandler, HandleResponse, HandlerError,
    MessageKind, Response, ResponseMessage,
};
