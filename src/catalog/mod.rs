//! Fixed text pools handed out with each task: the instruction prompt and the evaluation rubric.

pub mod pools;

pub use pools::{all_prompts, all_rubrics, prompt, rubric};
