//! Generators for the three practice modes.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::practice::{PracticeError, PracticeResult};
use crate::wordlist::WordPair;

/// Minimum pairs for a matching exercise.
pub const MATCHING_MIN_WORDS: usize = 2;
/// Minimum pairs for multiple choice: one correct answer plus three
/// distractors.
pub const MULTIPLE_CHOICE_MIN_WORDS: usize = 4;

const DISTRACTOR_COUNT: usize = 3;

/// A matching exercise: sources in list order against a shuffled target
/// column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingSet {
    /// Source words, in wordlist order.
    pub sources: Vec<String>,
    /// All targets, shuffled.
    pub shuffled_targets: Vec<String>,
    /// `answer[i]` is the index in `shuffled_targets` of the translation
    /// of `sources[i]`.
    pub answer: Vec<usize>,
}

/// A fill-in-blank item: the target is shown, the source is blanked down
/// to its first letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankItem {
    pub target: String,
    /// First letter of the source plus one `_` per remaining character.
    pub hint: String,
    pub answer: String,
}

/// A multiple-choice item: pick the target for `source` out of four
/// choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceItem {
    pub source: String,
    pub choices: Vec<String>,
    /// Index of the correct choice.
    pub answer: usize,
}

/// Build a matching exercise over the whole wordlist.
pub fn matching(words: &[WordPair], seed: u64) -> PracticeResult<MatchingSet> {
    if words.len() < MATCHING_MIN_WORDS {
        return Err(PracticeError::NotEnoughWords {
            mode: "matching",
            needed: MATCHING_MIN_WORDS,
            have: words.len(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..words.len()).collect();
    order.shuffle(&mut rng);

    // shuffled_targets[j] holds the target of words[order[j]], so the
    // answer for sources[i] is the j with order[j] == i.
    let shuffled_targets: Vec<String> = order.iter().map(|&i| words[i].target.clone()).collect();
    let mut answer = vec![0usize; words.len()];
    for (j, &i) in order.iter().enumerate() {
        answer[i] = j;
    }

    Ok(MatchingSet {
        sources: words.iter().map(|w| w.source.clone()).collect(),
        shuffled_targets,
        answer,
    })
}

/// Build one fill-in-blank item per pair. Never fails: a single word is a
/// valid (if easy) exercise.
pub fn fill_in_blank(words: &[WordPair]) -> Vec<BlankItem> {
    words
        .iter()
        .map(|pair| BlankItem {
            target: pair.target.clone(),
            hint: blank_hint(&pair.source),
            answer: pair.source.clone(),
        })
        .collect()
}

fn blank_hint(source: &str) -> String {
    let mut chars = source.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut hint = String::new();
    hint.push(first);
    for c in chars {
        hint.push(if c.is_whitespace() { ' ' } else { '_' });
    }
    hint
}

/// Build one multiple-choice item per pair, with distractor targets drawn
/// from the rest of the list.
pub fn multiple_choice(words: &[WordPair], seed: u64) -> PracticeResult<Vec<ChoiceItem>> {
    if words.len() < MULTIPLE_CHOICE_MIN_WORDS {
        return Err(PracticeError::NotEnoughWords {
            mode: "multiple-choice",
            needed: MULTIPLE_CHOICE_MIN_WORDS,
            have: words.len(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut items = Vec::with_capacity(words.len());

    for (i, pair) in words.iter().enumerate() {
        let mut pool: Vec<&str> = words
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, w)| w.target.as_str())
            .collect();
        pool.shuffle(&mut rng);

        let mut choices: Vec<String> = pool
            .into_iter()
            .take(DISTRACTOR_COUNT)
            .map(str::to_string)
            .collect();
        let answer = rng.gen_range(0..=choices.len());
        choices.insert(answer, pair.target.clone());

        items.push(ChoiceItem {
            source: pair.source.clone(),
            choices,
            answer,
        });
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<WordPair> {
        (0..n)
            .map(|i| WordPair::new(format!("source-{i}"), format!("target-{i}")))
            .collect()
    }

    #[test]
    fn matching_answer_key_is_correct() {
        let list = words(8);
        let set = matching(&list, 7).unwrap();
        assert_eq!(set.sources.len(), 8);
        assert_eq!(set.shuffled_targets.len(), 8);
        for (i, pair) in list.iter().enumerate() {
            assert_eq!(set.shuffled_targets[set.answer[i]], pair.target);
        }
    }

    #[test]
    fn matching_is_deterministic_per_seed() {
        let list = words(10);
        assert_eq!(matching(&list, 42).unwrap(), matching(&list, 42).unwrap());
    }

    #[test]
    fn matching_needs_two_words() {
        let err = matching(&words(1), 0).unwrap_err();
        assert!(matches!(err, PracticeError::NotEnoughWords { have: 1, .. }));
    }

    #[test]
    fn blank_hint_keeps_first_letter() {
        assert_eq!(blank_hint("cat"), "c__");
        assert_eq!(blank_hint("ice cream"), "i__ _____");
        assert_eq!(blank_hint("a"), "a");
        assert_eq!(blank_hint(""), "");
    }

    #[test]
    fn fill_in_blank_covers_every_pair() {
        let list = words(5);
        let items = fill_in_blank(&list);
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].answer, "source-0");
        assert_eq!(items[0].target, "target-0");
    }

    #[test]
    fn multiple_choice_has_four_choices_and_valid_answer() {
        let list = words(6);
        let items = multiple_choice(&list, 3).unwrap();
        assert_eq!(items.len(), 6);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.choices.len(), 4);
            assert_eq!(item.choices[item.answer], list[i].target);
        }
    }

    #[test]
    fn multiple_choice_distractors_come_from_other_pairs() {
        let list = words(6);
        let items = multiple_choice(&list, 9).unwrap();
        for item in &items {
            for choice in &item.choices {
                assert!(list.iter().any(|w| &w.target == choice));
            }
        }
    }

    #[test]
    fn multiple_choice_needs_four_words() {
        let err = multiple_choice(&words(3), 0).unwrap_err();
        assert!(matches!(
            err,
            PracticeError::NotEnoughWords {
                needed: 4,
                have: 3,
                ..
            }
        ));
    }

    #[test]
    fn multiple_choice_is_deterministic_per_seed() {
        let list = words(7);
        assert_eq!(
            multiple_choice(&list, 11).unwrap(),
            multiple_choice(&list, 11).unwrap()
        );
    }
}
