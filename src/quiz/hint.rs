use rand::Rng;

const UPPERCASE_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

// A space, a hyphen or nothing at all
pub const SEPARATOR_PATTERN: &str = r"(?:\s|-)?";

/// How a single letter of the city name is shown in the hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obfuscation {
    /// The letter itself
    Reveal,
    /// Any character
    Redact,
    /// A two-letter class with the real letter and the given decoy
    Confuse(char),
}

impl Obfuscation {
    /// Picks one of the three modes with equal probability.
    pub fn pick<R: Rng + ?Sized>(letter: char, rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => Obfuscation::Reveal,
            1 => Obfuscation::Redact,
            _ => Obfuscation::Confuse(decoy_for(letter, rng)),
        }
    }

    pub fn render(&self, letter: char) -> String {
        match self {
            Obfuscation::Reveal => escape_char(letter),
            Obfuscation::Redact => ".".to_string(),
            Obfuscation::Confuse(decoy) => format!("[{}{}]", escape_char(letter), decoy),
        }
    }
}

/// A random ASCII letter of the same case as `letter` that is not `letter`.
pub fn decoy_for<R: Rng + ?Sized>(letter: char, rng: &mut R) -> char {
    let pool = if letter.is_uppercase() {
        UPPERCASE_LETTERS
    } else {
        LOWERCASE_LETTERS
    };
    let pool = pool.chars().filter(|c| *c != letter).collect::<Vec<_>>();
    pool[rng.gen_range(0..pool.len())]
}

/// Turns a city name into an anchored regular expression that still matches
/// the name but only partially gives it away.
///
/// Every letter is independently revealed, replaced by `.` or mixed with a
/// decoy letter (`[ax]`). Spaces and hyphens become an optional separator so
/// the player may type "Tanjung Pinang", "Tanjung-Pinang" or "TanjungPinang".
/// Anything else is kept as an escaped literal.
pub fn generate_hint<R: Rng + ?Sized>(name: &str, rng: &mut R) -> String {
    let mut hint = String::from("^");

    for ch in name.chars() {
        if ch.is_alphabetic() {
            let obfuscation = Obfuscation::pick(ch, rng);
            hint.push_str(&obfuscation.render(ch));
        } else if ch == ' ' || ch == '-' {
            hint.push_str(SEPARATOR_PATTERN);
        } else {
            hint.push_str(&escape_char(ch));
        }
    }

    hint.push('$');
    hint
}

fn escape_char(ch: char) -> String {
    regex::escape(ch.encode_utf8(&mut [0; 4]))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;

    use super::*;

    #[test]
    fn renders_each_mode() {
        assert_eq!(Obfuscation::Reveal.render('J'), "J");
        assert_eq!(Obfuscation::Redact.render('J'), ".");
        assert_eq!(Obfuscation::Confuse('Q').render('J'), "[JQ]");
    }

    #[test]
    fn empty_name_is_just_anchors() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate_hint("", &mut rng), "^$");
    }

    #[test]
    fn separators_and_punctuation_are_not_obfuscated() {
        let mut rng = StdRng::seed_from_u64(7);
        let hint = generate_hint("- .(1)", &mut rng);
        assert_eq!(hint, r"^(?:\s|-)?(?:\s|-)?\.\(1\)$");
    }

    #[test]
    fn every_separator_gets_its_own_token() {
        let mut rng = StdRng::seed_from_u64(11);
        let hint = generate_hint("Kota  Baru-Lama", &mut rng);
        assert_eq!(hint.matches(SEPARATOR_PATTERN).count(), 3);
    }

    #[test]
    fn separators_are_optional_when_answering() {
        let mut rng = StdRng::seed_from_u64(3);
        let hint = generate_hint("Tanjung Pinang", &mut rng);
        let re = Regex::new(&hint).unwrap();
        assert!(re.is_match("Tanjung Pinang"));
        assert!(re.is_match("Tanjung-Pinang"));
        assert!(re.is_match("TanjungPinang"));
    }

    #[test]
    fn decoy_keeps_case_and_differs_from_the_letter() {
        let mut rng = StdRng::seed_from_u64(42);
        for letter in ['a', 'z', 'Q', 'M', 'é', 'Ö'] {
            for _ in 0..200 {
                let decoy = decoy_for(letter, &mut rng);
                assert_ne!(decoy, letter);
                assert!(decoy.is_ascii_alphabetic());
                assert_eq!(decoy.is_uppercase(), letter.is_uppercase());
            }
        }
    }

    #[test]
    fn modes_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 30_000;
        let mut counts = [0usize; 3];
        for _ in 0..trials {
            match Obfuscation::pick('b', &mut rng) {
                Obfuscation::Reveal => counts[0] += 1,
                Obfuscation::Redact => counts[1] += 1,
                Obfuscation::Confuse(_) => counts[2] += 1,
            }
        }
        for count in counts {
            let share = count as f64 / trials as f64;
            assert!((share - 1.0 / 3.0).abs() < 0.02, "share {share} out of range");
        }
    }

    proptest! {
        #[test]
        fn hint_always_matches_the_name(name in "\\PC{0,40}", seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let hint = generate_hint(&name, &mut rng);

            prop_assert!(hint.starts_with('^'));
            prop_assert!(hint.ends_with('$'));
            let re = Regex::new(&hint).unwrap();
            prop_assert!(re.is_match(&name), "{} does not match {}", hint, name);
        }

        #[test]
        fn hint_matches_plain_city_names(name in "[A-Z][a-z]{1,12}([ -][A-Z][a-z]{1,12}){0,2}", seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let re = Regex::new(&generate_hint(&name, &mut rng)).unwrap();
            prop_assert!(re.is_match(&name));
        }
    }
}
