pub mod completion;
pub mod failure_log;
pub mod html_extractor;
pub mod llm_service;
pub mod requester;

pub use completion::CompletionClient;
pub use failure_log::FailureLog;
pub use html_extractor::{extract, extract_codes};
pub use llm_service::LlmService;
pub use requester::{try_direct_code, RequisiteRequester, SYSTEM_PROMPT};
