pub mod judge;
pub mod metrics;
pub mod policy;
pub mod prompts;
pub mod readability;
pub mod scorer;
pub mod session;
pub mod teller;
pub mod template;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use judge::QualitativeJudge;
pub use prompts::PromptRegistry;
pub use session::{StoryCycle, StorySession};
pub use teller::StoryTeller;
