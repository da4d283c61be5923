use std::fmt;

/// Guessing rate of the brute-force attacker.
pub const GUESSES_PER_SECOND: f64 = 1e12;

const SECONDS_PER_YEAR: f64 = 60.0 * 60.0 * 24.0 * 365.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    VeryWeak,
    Weak,
    Good,
    Strong,
    VeryStrong,
}

impl Tier {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Tier::VeryWeak,
            3..=4 => Tier::Weak,
            5..=6 => Tier::Good,
            7 => Tier::Strong,
            _ => Tier::VeryStrong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::VeryWeak => "Very Weak",
            Tier::Weak => "Weak",
            Tier::Good => "Good",
            Tier::Strong => "Strong",
            Tier::VeryStrong => "Very Strong",
        }
    }

    /// Visual category used to style the label.
    pub fn tag(self) -> &'static str {
        match self {
            Tier::VeryWeak => "very-weak",
            Tier::Weak => "weak",
            Tier::Good => "good",
            Tier::Strong => "strong",
            Tier::VeryStrong => "very-strong",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct TimeUnit {
    threshold: f64,
    singular: &'static str,
    plural: &'static str,
}

// Largest first; thresholds are in years.
const TIME_UNITS: [TimeUnit; 18] = [
    TimeUnit { threshold: 1e30, singular: "nonillion year", plural: "nonillion years" },
    TimeUnit { threshold: 1e27, singular: "octillion year", plural: "octillion years" },
    TimeUnit { threshold: 1e24, singular: "septillion year", plural: "septillion years" },
    TimeUnit { threshold: 1e21, singular: "sextillion year", plural: "sextillion years" },
    TimeUnit { threshold: 1e18, singular: "quintillion year", plural: "quintillion years" },
    TimeUnit { threshold: 1e15, singular: "quadrillion year", plural: "quadrillion years" },
    TimeUnit { threshold: 1e12, singular: "trillion year", plural: "trillion years" },
    TimeUnit { threshold: 1e9, singular: "billion year", plural: "billion years" },
    TimeUnit { threshold: 1e6, singular: "million year", plural: "million years" },
    TimeUnit { threshold: 1e3, singular: "thousand year", plural: "thousand years" },
    TimeUnit { threshold: 100.0, singular: "century", plural: "centuries" },
    TimeUnit { threshold: 10.0, singular: "decade", plural: "decades" },
    TimeUnit { threshold: 1.0, singular: "year", plural: "years" },
    TimeUnit { threshold: 1.0 / 12.0, singular: "month", plural: "months" },
    TimeUnit { threshold: 1.0 / 52.0, singular: "week", plural: "weeks" },
    TimeUnit { threshold: 1.0 / 365.25, singular: "day", plural: "days" },
    TimeUnit { threshold: 1.0 / (365.25 * 24.0), singular: "hour", plural: "hours" },
    TimeUnit { threshold: 1.0 / (365.25 * 24.0 * 60.0), singular: "minute", plural: "minutes" },
];

/// Average brute-force time for a password, with a human scale label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrackTime {
    pub seconds: f64,
    pub years: f64,
    pub label: &'static str,
}

impl CrackTime {
    /// Half the keyspace `alphabet_size ^ length` at [`GUESSES_PER_SECOND`].
    ///
    /// Large keyspaces saturate to infinity instead of overflowing.
    pub fn new(length: usize, alphabet_size: usize) -> Self {
        let pool = alphabet_size.max(1) as f64;
        let keyspace = pool.powf(length as f64);
        let seconds = keyspace / 2.0 / GUESSES_PER_SECOND;
        let years = seconds / SECONDS_PER_YEAR;

        Self {
            seconds,
            years,
            label: time_label(years),
        }
    }
}

impl fmt::Display for CrackTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label)
    }
}

fn time_label(years: f64) -> &'static str {
    TIME_UNITS
        .iter()
        .find(|unit| years >= unit.threshold)
        .map(|unit| {
            if (years / unit.threshold).round() == 1.0 {
                unit.singular
            } else {
                unit.plural
            }
        })
        .unwrap_or("seconds")
}

/// Length and character variety score in `0..=8`.
pub fn score(password: &str) -> u8 {
    let length = password.chars().count();

    let length_points = [8, 12, 16, 20]
        .iter()
        .filter(|&&min| length >= min)
        .count();

    let variety_points = [
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ]
    .iter()
    .filter(|&&present| present)
    .count();

    (length_points + variety_points) as u8
}

/// Strength of one password. Both fields are `None` for an empty password.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub tier: Option<Tier>,
    pub crack_time: Option<CrackTime>,
}

impl Assessment {
    pub const NOT_APPLICABLE: Assessment = Assessment {
        tier: None,
        crack_time: None,
    };

    pub fn tier_label(&self) -> &'static str {
        self.tier.map_or("-", Tier::label)
    }

    pub fn tag(&self) -> &'static str {
        self.tier.map_or("", Tier::tag)
    }

    pub fn time_label(&self) -> &'static str {
        self.crack_time.map_or("-", |time| time.label)
    }
}

pub fn estimate(password: &str, alphabet_size: usize) -> Assessment {
    if password.is_empty() {
        return Assessment::NOT_APPLICABLE;
    }

    Assessment {
        tier: Some(Tier::from_score(score(password))),
        crack_time: Some(CrackTime::new(password.chars().count(), alphabet_size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::password::MAX_LENGTH;

    #[test]
    fn empty_password_is_not_applicable() {
        let assessment = estimate("", 0);
        assert_eq!(assessment, Assessment::NOT_APPLICABLE);
        assert_eq!(assessment.tier_label(), "-");
        assert_eq!(assessment.time_label(), "-");
        assert_eq!(assessment.tag(), "");
    }

    #[test]
    fn short_password_with_every_class_is_weak() {
        assert_eq!(score("a1!B"), 4);
        assert_eq!(estimate("a1!B", 91).tier, Some(Tier::Weak));
    }

    #[test]
    fn score_to_tier_boundaries() {
        let expected = [
            Tier::VeryWeak,
            Tier::VeryWeak,
            Tier::VeryWeak,
            Tier::Weak,
            Tier::Weak,
            Tier::Good,
            Tier::Good,
            Tier::Strong,
            Tier::VeryStrong,
        ];
        for (score, tier) in expected.iter().enumerate() {
            assert_eq!(Tier::from_score(score as u8), *tier);
        }
    }

    #[test]
    fn length_points_are_cumulative() {
        assert_eq!(score("aaaaaaa"), 1);
        assert_eq!(score("aaaaaaaa"), 2);
        assert_eq!(score(&"a".repeat(12)), 3);
        assert_eq!(score(&"a".repeat(20)), 5);
        assert_eq!(score("Aa1!Aa1!Aa1!Aa1!Aa1!"), 8);
        assert_eq!(estimate("Aa1!Aa1!Aa1!Aa1!Aa1!", 91).tier, Some(Tier::VeryStrong));
    }

    #[test]
    fn non_ascii_counts_as_symbol() {
        assert_eq!(score("é"), 1);
    }

    #[test]
    fn tiny_keyspace_is_seconds() {
        let time = CrackTime::new(4, 26);
        assert!((time.seconds - 2.28488e-7).abs() < 1e-12);
        assert_eq!(time.label, "seconds");
    }

    #[test]
    fn zero_alphabet_is_treated_as_one() {
        let time = CrackTime::new(10, 0);
        assert_eq!(time.seconds, 0.5 / GUESSES_PER_SECOND);
        assert_eq!(estimate("abc", 0).time_label(), "seconds");
    }

    #[test]
    fn huge_keyspace_saturates() {
        let time = CrackTime::new(MAX_LENGTH, 91);
        assert!(time.seconds.is_finite());
        assert_eq!(time.label, "nonillion years");

        let time = CrackTime::new(400, 91);
        assert!(time.seconds.is_infinite());
        assert_eq!(time.label, "nonillion years");
    }

    #[test]
    fn labels_pick_the_largest_threshold() {
        assert_eq!(time_label(1.0), "year");
        assert_eq!(time_label(3.0), "years");
        assert_eq!(time_label(100.0), "century");
        assert_eq!(time_label(149.0), "century");
        assert_eq!(time_label(250.0), "centuries");
        assert_eq!(time_label(12.0), "decade");
        assert_eq!(time_label(2e6), "million years");
        assert_eq!(time_label(1.0 / 365.25), "day");
        assert_eq!(time_label(0.5 / (365.25 * 24.0 * 60.0)), "seconds");
    }

    #[test]
    fn twelve_characters_over_full_alphabet() {
        // about five thousand years
        let time = CrackTime::new(12, 91);
        assert_eq!(time.label, "thousand years");
    }

    #[test]
    fn longer_password_takes_longer() {
        let short = CrackTime::new(8, 62);
        let long = CrackTime::new(16, 62);
        assert!(long.seconds > short.seconds);
    }

    proptest! {
        #[test]
        fn crack_time_grows_with_length(length in 1usize..200, pool in 1usize..200) {
            let shorter = CrackTime::new(length, pool);
            let longer = CrackTime::new(length + 1, pool);
            prop_assert!(longer.seconds >= shorter.seconds);
        }

        #[test]
        fn score_stays_in_range(password in "\\PC{0,40}") {
            prop_assert!(score(&password) <= 8);
        }
    }
}
