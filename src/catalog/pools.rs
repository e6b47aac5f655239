use rand::Rng;
use rand::seq::IndexedRandom;

use crate::task::record::DEFAULT_TASK_TYPE;

type Pool = &'static [&'static str];

/// Instruction pools keyed by task type.
const PROMPTS: &[(&str, Pool)] = &[(
    DEFAULT_TASK_TYPE,
    &[
        "Two circular balls with different colors are positioned at different locations. Animate \
         the balls moving toward each other at the same speed until they completely merge as one. \
         When the balls overlap, the overlapping region should display the subtractive color \
         mixture of their original colors. The animation should stop after the two balls \
         completely merge into a single ball at the midpoint between their initial positions.",
        "Two colored circular balls start at different positions. They move toward each other at \
         equal speeds until they fully overlap and merge into one. The overlapping region during \
         movement and the final merged ball should show the subtractive color mixture of the two \
         original ball colors. Stop the animation when the balls have completely merged at the \
         midpoint.",
        "Animate two circular balls with distinct colors moving toward each other at the same \
         velocity. The balls should continue moving until they completely merge as one ball. \
         During overlap and in the final merged state, use subtractive color mixing to combine \
         the original colors. The animation stops when both balls have fully merged at the \
         midpoint between their starting positions.",
        "Two balls of different colors are placed at separate locations. Show them moving toward \
         each other at identical speeds. When they overlap, the overlapping area should display \
         the subtractive mixture of their colors. Continue the animation until the balls \
         completely merge into a single ball at the midpoint, then stop.",
    ],
)];

/// Evaluation rubric pools keyed by task type.
///
/// Rubrics read like a human evaluator's checklist: no numbering, no point values.
const RUBRICS: &[(&str, Pool)] = &[(
    DEFAULT_TASK_TYPE,
    &[
        "Check if the solution correctly animates both balls moving toward each other at the same \
         speed. Verify that the balls move in straight lines toward each other and meet at the \
         midpoint between their initial positions. Ensure the animation shows smooth motion \
         throughout. When the balls overlap during movement, check that only the overlapping \
         region displays the subtractive color mixture while non-overlapping parts retain their \
         original colors. Verify that the animation stops after the two balls completely merge \
         into a single ball at the midpoint, and that the final merged ball shows the correct \
         subtractive color mixture of the two original colors.",
        "Verify that the solution shows both balls moving at equal speeds toward each other until \
         they completely merge. Check that the motion is smooth and linear, with both balls \
         traveling the same distance at the same rate. Confirm that during partial overlap, the \
         overlapping region correctly displays the subtractive color mixture while maintaining \
         the original colors in non-overlapping areas. Ensure the animation continues until the \
         balls fully merge into one ball at the midpoint, then stops. Check that the final merged \
         ball at the midpoint position shows the correct normalized subtractive color mixture of \
         the original two colors.",
        "Confirm the solution animates the two balls moving toward each other at the same \
         velocity. Check that the balls follow straight paths and meet at the center point \
         between their starting positions. Verify that the animation smoothly shows the balls \
         approaching, with partial overlap correctly displaying subtractive color mixing only in \
         the overlapping region. Ensure the animation continues until both balls completely merge \
         as one, then stops. Check that the final merged ball at the midpoint displays the \
         correct subtractive color mixture, where the RGB values of the original colors are first \
         added together and normalized if they exceed 255, then subtracted from 255.",
        "Check that both balls move toward each other at identical speeds in straight lines. \
         Verify the animation shows smooth progression from initial separation through partial \
         overlap to complete merging. During partial overlap, ensure only the overlapping region \
         shows the subtractive color mixture while maintaining original ball colors elsewhere. \
         Confirm the animation stops after the balls completely merge into a single ball at the \
         midpoint. Verify the final merged ball displays the correct normalized subtractive color \
         mixture, where the red, green, and blue components of the original colors are first \
         added together and proportionally scaled if the sum exceeds 255, then each normalized \
         value is subtracted from 255.",
    ],
)];

/// Pool for `task_type`, falling back to the default pool for unknown types.
fn pool(table: &'static [(&'static str, Pool)], task_type: &str) -> Pool {
    table
        .iter()
        .find(|(key, _)| *key == task_type)
        .or_else(|| table.iter().find(|(key, _)| *key == DEFAULT_TASK_TYPE))
        .map(|(_, entries)| *entries)
        .unwrap_or(&[])
}

/// Every prompt available for `task_type`.
pub fn all_prompts(task_type: &str) -> &'static [&'static str] {
    pool(PROMPTS, task_type)
}

/// Every rubric available for `task_type`.
pub fn all_rubrics(task_type: &str) -> &'static [&'static str] {
    pool(RUBRICS, task_type)
}

/// Uniformly chosen prompt for `task_type`.
pub fn prompt<R: Rng + ?Sized>(task_type: &str, rng: &mut R) -> &'static str {
    all_prompts(task_type).choose(rng).copied().unwrap_or_default()
}

/// Uniformly chosen rubric for `task_type`.
pub fn rubric<R: Rng + ?Sized>(task_type: &str, rng: &mut R) -> &'static str {
    all_rubrics(task_type).choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/pools.rs"]
mod tests;
