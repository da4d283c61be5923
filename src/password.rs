use std::num::IntErrorKind;
use std::ops::Range;

use rand::Rng;
use rand::seq::IndexedRandom;
use rand::seq::SliceRandom;

use crate::generators::{ CharacterClass, EffectiveAlphabet };

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;
pub const DEFAULT_LENGTH: usize = 12;

/// Constraint set for one generation: which classes, which characters to
/// leave out and how long the result should be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordRequest {
    pub classes: Vec<CharacterClass>,
    pub exclude: String,
    pub length: usize,
}

impl Default for PasswordRequest {
    fn default() -> Self {
        Self {
            classes: CharacterClass::ALL.to_vec(),
            exclude: String::new(),
            length: DEFAULT_LENGTH,
        }
    }
}

impl PasswordRequest {
    pub fn alphabet(&self) -> EffectiveAlphabet {
        EffectiveAlphabet::build(&self.classes, &self.exclude)
    }
}

/// Turns free-form length input into a usable length.
///
/// Input is read like a leading integer; anything unparseable collapses to
/// [`MIN_LENGTH`], everything else is clamped into the supported range.
pub fn clamp_length(input: &str) -> usize {
    let trimmed = input.trim();
    let numeric: String = trimmed
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+')))
        .map(|(_, c)| c)
        .collect();

    match numeric.parse::<i64>() {
        Ok(n) if n < MIN_LENGTH as i64 => MIN_LENGTH,
        Ok(n) if n > MAX_LENGTH as i64 => MAX_LENGTH,
        Ok(n) => n as usize,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => MAX_LENGTH,
        Err(_) => MIN_LENGTH,
    }
}

/// Builds a password from `alphabet`.
///
/// Every class in the alphabet contributes one character, the rest is drawn
/// from the flat alphabet, and the whole buffer is shuffled. An empty alphabet
/// yields an empty string.
pub fn synthesize<R: Rng + ?Sized>(alphabet: &EffectiveAlphabet, target_length: usize, rng: &mut R) -> String {
    if alphabet.is_empty() {
        return String::new();
    }

    let length = target_length.clamp(MIN_LENGTH, MAX_LENGTH);
    let mut chars: Vec<char> = Vec::with_capacity(length.max(alphabet.sets().len()));

    // Coverage wins over length if there are more classes than slots.
    for (_, set) in alphabet.sets() {
        if let Some(c) = set.choose(rng) {
            chars.push(*c);
        }
    }

    let pool = alphabet.flat();
    while chars.len() < length {
        chars.push(pool[rng.random_range(0..pool.len())]);
    }

    chars.shuffle(rng);

    chars.into_iter().collect()
}

/// Generates a password for `request` with the thread-local generator.
pub fn generate(request: &PasswordRequest) -> String {
    let alphabet = request.alphabet();
    log::debug!(
        "generating {} chars from {} classes, pool of {}",
        request.length.clamp(MIN_LENGTH, MAX_LENGTH),
        alphabet.sets().len(),
        alphabet.len()
    );

    synthesize(&alphabet, request.length, &mut rand::rng())
}

/// Keeps only the characters of `text` found in `allowed`, in order.
pub fn sanitize(text: &str, allowed: &[char]) -> String {
    text.chars().filter(|c| allowed.contains(c)).collect()
}

/// Cuts `password` down when the target length shrinks below it.
pub fn fit_length(password: &str, length: usize) -> String {
    password.chars().take(length.clamp(MIN_LENGTH, MAX_LENGTH)).collect()
}

/// Pastes `pasted` over `selection` (char positions) in `current`.
///
/// Pasted text is sanitized first and the result is capped at [`MAX_LENGTH`].
/// Returns the new value and the cursor position after the inserted text.
pub fn insert_filtered(current: &str, selection: Range<usize>, pasted: &str, allowed: &[char]) -> (String, usize) {
    let filtered = sanitize(pasted, allowed);
    let chars: Vec<char> = current.chars().collect();

    let start = selection.start.min(chars.len());
    let end = selection.end.clamp(start, chars.len());

    let value: String = chars[..start]
        .iter()
        .copied()
        .chain(filtered.chars())
        .chain(chars[end..].iter().copied())
        .take(MAX_LENGTH)
        .collect();

    let cursor = (start + filtered.chars().count()).min(value.chars().count());

    (value, cursor)
}
