//! Structured generation - request assembly, reply recovery and outcomes.

mod prompt;
mod recovery;
mod request;
mod result;

pub use prompt::{build_request, CONFIDENTIAL_PREFACE, DEFAULT_TEMPERATURE, PERSONA, RULES};
pub use recovery::{
    is_parse_failure, parse_structured, ParseTier, ResponseParser, DEFAULT_RAW_PREVIEW_CHARS,
    ERROR_KEY, NO_REPLY_TEXT_MESSAGE, PARSE_FAILURE_MESSAGE, RAW_KEY,
};
pub use request::{GenerationRequest, Message, MessageRole};
pub use result::{FailureKind, GenerationResult, BACKEND_BLOCK_REASON, CLASSIFIER_NEXT_STEP};
