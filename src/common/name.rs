// Copyright (c) 2016-2021 Fabian Schuiki

//! Helpers to derive new names from existing ones.

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The uppercase letter at position `index` of the alphabet, wrapping around
/// after `Z`.
pub fn letter(index: usize) -> char {
    ALPHABET[index % ALPHABET.len()] as char
}

/// A letter suffix that is unique for every index.
///
/// Counts `A` through `Z`, then continues with one leading `A` per full pass
/// over the alphabet: `AA`, `AB`, ..., `AZ`, `AAA`, ...
pub fn letter_suffix(index: usize) -> String {
    let mut s: String = std::iter::repeat('A')
        .take(index / ALPHABET.len())
        .collect();
    s.push(letter(index));
    s
}

/// Title-case a string.
///
/// Every alphabetic character that follows a non-alphabetic one is uppercased,
/// all other alphabetic characters are lowercased. Digits therefore start a
/// new word: `sql92x` becomes `Sql92X`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }
    out
}

/// Replace every decimal digit `d` with the `d`-th letter of the alphabet,
/// counting from `A` for zero.
pub fn digits_to_letters(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => letter(d as usize),
            None => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes() {
        assert_eq!(letter_suffix(0), "A");
        assert_eq!(letter_suffix(25), "Z");
        assert_eq!(letter_suffix(26), "AA");
        assert_eq!(letter_suffix(27), "AB");
        assert_eq!(letter_suffix(52), "AAA");
    }

    #[test]
    fn title() {
        assert_eq!(title_case("query specification"), "Query Specification");
        assert_eq!(title_case("SQL procedure"), "Sql Procedure");
        assert_eq!(title_case("sql92x"), "Sql92X");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn digits() {
        assert_eq!(digits_to_letters("Level1"), "LevelB");
        assert_eq!(digits_to_letters("X0909"), "XAJAJ");
        assert_eq!(digits_to_letters("none"), "none");
    }
}
