use std::collections::HashSet;
use std::fmt;

use clap::ValueEnum;
use serde::{ Deserialize, Serialize };

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:'\",.<>/?";

/// A named, fixed set of characters that can be switched on for generation.
///
/// The four sets are disjoint, so a character always maps to exactly one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Upper,
    Lower,
    Numbers,
    Symbols,
}

impl CharacterClass {
    /// Canonical class order, also the order of the flat alphabet.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Upper,
        CharacterClass::Lower,
        CharacterClass::Numbers,
        CharacterClass::Symbols,
    ];

    pub fn chars(self) -> &'static str {
        match self {
            CharacterClass::Upper => UPPERCASE,
            CharacterClass::Lower => LOWERCASE,
            CharacterClass::Numbers => NUMBERS,
            CharacterClass::Symbols => SYMBOLS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Upper => "upper",
            CharacterClass::Lower => "lower",
            CharacterClass::Numbers => "numbers",
            CharacterClass::Symbols => "symbols",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-class characters left over once exclusions are applied.
///
/// Entries are kept in canonical class order and never hold an empty sequence;
/// a class that loses all of its characters is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveAlphabet {
    sets: Vec<(CharacterClass, Vec<char>)>,
}

impl EffectiveAlphabet {
    pub fn build(enabled: &[CharacterClass], excluded: &str) -> Self {
        let excluded: HashSet<char> = excluded.chars().collect();

        let sets = CharacterClass::ALL
            .iter()
            .filter(|class| enabled.contains(class))
            .filter_map(|&class| {
                let filtered: Vec<char> = class
                    .chars()
                    .chars()
                    .filter(|c| !excluded.contains(c))
                    .collect();

                if filtered.is_empty() {
                    log::debug!("class {} emptied by exclusions", class);
                    None
                } else {
                    Some((class, filtered))
                }
            })
            .collect();

        Self { sets }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        self.sets.iter().map(|(class, _)| *class)
    }

    pub fn sets(&self) -> &[(CharacterClass, Vec<char>)] {
        &self.sets
    }

    #[cfg(test)]
    pub fn get(&self, class: CharacterClass) -> Option<&[char]> {
        self.sets
            .iter()
            .find(|(c, _)| *c == class)
            .map(|(_, chars)| chars.as_slice())
    }

    /// Union of all surviving classes, concatenated in canonical order.
    pub fn flat(&self) -> Vec<char> {
        self.sets
            .iter()
            .flat_map(|(_, chars)| chars.iter().copied())
            .collect()
    }

    /// Size of the flat alphabet.
    pub fn len(&self) -> usize {
        self.sets.iter().map(|(_, chars)| chars.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_string(chars: &[char]) -> String {
        chars.iter().collect()
    }

    #[test]
    fn classes_without_exclusions_keep_canonical_sequence() {
        let alphabet = EffectiveAlphabet::build(&CharacterClass::ALL, "");

        for class in CharacterClass::ALL {
            assert_eq!(as_string(alphabet.get(class).unwrap()), class.chars());
        }
        assert_eq!(alphabet.len(), 26 + 26 + 10 + 29);
    }

    #[test]
    fn exclusions_are_removed_in_place() {
        let alphabet = EffectiveAlphabet::build(
            &[CharacterClass::Lower, CharacterClass::Numbers],
            "0o",
        );

        assert_eq!(as_string(alphabet.get(CharacterClass::Numbers).unwrap()), "123456789");
        assert_eq!(
            as_string(alphabet.get(CharacterClass::Lower).unwrap()),
            "abcdefghijklmnpqrstuvwxyz"
        );
        assert!(alphabet.get(CharacterClass::Upper).is_none());
    }

    #[test]
    fn emptied_class_is_dropped() {
        let alphabet = EffectiveAlphabet::build(
            &[CharacterClass::Numbers, CharacterClass::Upper],
            "0123456789",
        );

        assert_eq!(alphabet.classes().collect::<Vec<_>>(), vec![CharacterClass::Upper]);
        assert!(alphabet.sets().iter().all(|(_, chars)| !chars.is_empty()));
    }

    #[test]
    fn unknown_exclusions_are_ignored() {
        let alphabet = EffectiveAlphabet::build(&[CharacterClass::Numbers], "éZ ");
        assert_eq!(as_string(&alphabet.flat()), NUMBERS);
    }

    #[test]
    fn no_enabled_classes_gives_empty_alphabet() {
        let alphabet = EffectiveAlphabet::build(&[], "");
        assert!(alphabet.is_empty());
        assert_eq!(alphabet.len(), 0);
        assert!(alphabet.flat().is_empty());
    }

    #[test]
    fn flat_follows_canonical_order_regardless_of_input_order() {
        let alphabet = EffectiveAlphabet::build(
            &[CharacterClass::Numbers, CharacterClass::Upper],
            "",
        );
        let expected = format!("{}{}", UPPERCASE, NUMBERS);
        assert_eq!(as_string(&alphabet.flat()), expected);
    }
}
