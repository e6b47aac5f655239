use super::*;

use rand::{SeedableRng, rngs::StdRng};

#[test]
fn default_pools_are_populated() {
    assert_eq!(all_prompts(DEFAULT_TASK_TYPE).len(), 4);
    assert_eq!(all_rubrics(DEFAULT_TASK_TYPE).len(), 4);
    for text in all_prompts(DEFAULT_TASK_TYPE)
        .iter()
        .chain(all_rubrics(DEFAULT_TASK_TYPE))
    {
        assert!(text.contains("subtractive"), "{text}");
        assert!(!text.contains("  "), "wrapped text has doubled spaces: {text}");
    }
}

#[test]
fn unknown_type_falls_back_to_default() {
    assert_eq!(all_prompts("no_such_type"), all_prompts(DEFAULT_TASK_TYPE));
    assert_eq!(all_rubrics("no_such_type"), all_rubrics(DEFAULT_TASK_TYPE));
    let mut rng = StdRng::seed_from_u64(0);
    let p = prompt("no_such_type", &mut rng);
    assert!(all_prompts(DEFAULT_TASK_TYPE).contains(&p));
}

#[test]
fn choice_covers_the_pool_and_is_seeded() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut seen = std::collections::BTreeSet::new();
    for _ in 0..200 {
        seen.insert(rubric(DEFAULT_TASK_TYPE, &mut rng));
    }
    assert_eq!(seen.len(), 4);

    let a = prompt(DEFAULT_TASK_TYPE, &mut StdRng::seed_from_u64(11));
    let b = prompt(DEFAULT_TASK_TYPE, &mut StdRng::seed_from_u64(11));
    assert_eq!(a, b);
}
