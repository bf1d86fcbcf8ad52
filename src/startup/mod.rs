//! Startup records and the prompts rendered from them.

pub mod prompt;
pub mod request;

pub use prompt::{render_faq, render_validation, FAQ_SAMPLING, VALIDATION_SAMPLING};
pub use request::{FaqRequest, RequestError, ValidationRequest};
