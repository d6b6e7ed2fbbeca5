pub mod loop_;
pub mod system_prompt;

pub use loop_::{truncate, Agent, EMPTY_REPLY_ANSWER, TURN_LIMIT_ANSWER};
