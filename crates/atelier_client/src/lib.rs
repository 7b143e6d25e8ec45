//! Content API client and record call sites.
//!
//! The HTTP client, the confirmation dialog and the global loading indicator
//! are collaborators of the image pipeline. This crate defines them as
//! traits, ships one implementation of each, and provides [`RecordService`],
//! the create/update/toggle/delete call sites that feed the upload assembly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dialogs;
mod endpoint;
mod loading;
mod service;
mod transport;

pub use dialogs::{AutoConfirm, Dialogs};
pub use endpoint::EndpointConfig;
pub use loading::{LoadingFlag, LoadingGuard, LoadingSignal, LoadingTracker};
pub use service::{GENERIC_FAILURE_MESSAGE, Outcome, RecordService};
pub use transport::{ApiConfig, ContentTransport, RequestBody, ReqwestTransport};
