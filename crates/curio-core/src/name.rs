//! Bounded names and deterministic name disambiguation
//!
//! Tag and catalog names are stored in a fixed-size slot of [`MAX_NAME`] bytes
//! that includes a terminator, so a stored name holds at most `MAX_NAME - 1`
//! bytes. Longer input is silently truncated on a UTF-8 character boundary.
//!
//! Collisions are resolved by [`unique_name`], which appends `.001`, `.002`, ...
//! The numbering policy is observable in saved files and must stay stable.

/// Size of a name slot in bytes, terminator included
pub const MAX_NAME: usize = 64;

/// Separator between a name and its numeric disambiguation suffix
pub const NAME_DELIMITER: char = '.';

/// Truncate `name` so that it fits a slot of `size` bytes (terminator included).
///
/// Never splits a multi-byte character.
pub fn truncate_name(name: &str, size: usize) -> String {
    let limit = size.saturating_sub(1);
    if name.len() <= limit {
        return name.to_string();
    }

    let mut end = limit;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_string()
}

/// Split a trailing `<delim><digits>` suffix off `name`.
///
/// Returns the left part and the parsed number, or the whole name and 0 when
/// there is no numeric suffix. A name ending in the delimiter (`"foo."`) is
/// treated as having no suffix.
pub fn split_name_num(name: &str, delim: char) -> (&str, u32) {
    let ends_with_delim = name.len() > 1 && name.ends_with(delim);
    if !ends_with_delim {
        for (index, ch) in name.char_indices().rev() {
            if ch == delim {
                let digits = &name[index + ch.len_utf8()..];
                let number = digits
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n <= i32::MAX as u32)
                    .unwrap_or(0);
                return (&name[..index], number);
            }
            if !ch.is_ascii_digit() {
                break;
            }
        }
    }

    (name, 0)
}

/// Produce a name based on `name` for which `is_taken` returns false.
///
/// If `name` itself is free it is returned unchanged. Otherwise any existing
/// numeric suffix is stripped and suffixes are probed upward from the next
/// number (`color` -> `color.001`, `color.001` -> `color.002`). The result
/// always fits a slot of `max_len` bytes; the left part is shortened to make
/// room for the suffix.
pub fn unique_name<F>(name: &str, delim: char, max_len: usize, mut is_taken: F) -> String
where
    F: FnMut(&str) -> bool,
{
    if !is_taken(name) {
        return name.to_string();
    }

    let (left, mut number) = split_name_num(name, delim);
    loop {
        number = number.saturating_add(1);
        let suffix = format!("{}{:03}", delim, number);
        let suffix_size = suffix.len() + 1;

        let candidate = if left.is_empty() || suffix_size >= max_len {
            truncate_name(&suffix, max_len)
        } else {
            let mut candidate = truncate_name(left, max_len - suffix_size);
            candidate.push_str(&suffix);
            candidate
        };

        if !is_taken(&candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken<'a>(names: &'a [&'a str]) -> impl FnMut(&str) -> bool + 'a {
        move |candidate| names.contains(&candidate)
    }

    #[test]
    fn test_truncate_short_name_unchanged() {
        assert_eq!(truncate_name("color", MAX_NAME), "color");
    }

    #[test]
    fn test_truncate_long_name() {
        let long = "x".repeat(100);
        assert_eq!(truncate_name(&long, MAX_NAME).len(), MAX_NAME - 1);
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // 'é' is two bytes; 32 of them is 64 bytes, one over the limit
        let name = "é".repeat(32);
        let truncated = truncate_name(&name, MAX_NAME);
        assert_eq!(truncated.len(), 62);
        assert_eq!(truncated.chars().count(), 31);
    }

    #[test]
    fn test_split_name_num() {
        assert_eq!(split_name_num("color.001", '.'), ("color", 1));
        assert_eq!(split_name_num("color.12", '.'), ("color", 12));
        assert_eq!(split_name_num("color", '.'), ("color", 0));
        assert_eq!(split_name_num("a.b", '.'), ("a.b", 0));
        assert_eq!(split_name_num("foo.", '.'), ("foo.", 0));
        assert_eq!(split_name_num(".", '.'), ("", 0));
        assert_eq!(split_name_num("v1.2.3", '.'), ("v1.2", 3));
    }

    #[test]
    fn test_unique_name_free_is_unchanged() {
        let name = unique_name("color", '.', MAX_NAME, taken(&["shape"]));
        assert_eq!(name, "color");
    }

    #[test]
    fn test_unique_name_first_suffix() {
        let name = unique_name("color", '.', MAX_NAME, taken(&["color"]));
        assert_eq!(name, "color.001");
    }

    #[test]
    fn test_unique_name_skips_taken_suffixes() {
        let name = unique_name(
            "color",
            '.',
            MAX_NAME,
            taken(&["color", "color.001", "color.002"]),
        );
        assert_eq!(name, "color.003");
    }

    #[test]
    fn test_unique_name_continues_from_existing_suffix() {
        let name = unique_name("color.001", '.', MAX_NAME, taken(&["color", "color.001"]));
        assert_eq!(name, "color.002");
    }

    #[test]
    fn test_unique_name_empty() {
        let name = unique_name("", '.', MAX_NAME, taken(&[""]));
        assert_eq!(name, ".001");
    }

    #[test]
    fn test_unique_name_past_three_digits() {
        let name = unique_name("x", '.', MAX_NAME, |candidate| {
            candidate == "x" || (candidate.starts_with("x.") && candidate.len() == 5)
        });
        assert_eq!(name, "x.1000");
    }

    #[test]
    fn test_unique_name_shortens_left_part() {
        let long = "a".repeat(MAX_NAME - 1);
        let name = unique_name(&long, '.', MAX_NAME, |candidate| candidate == long);
        assert!(name.ends_with(".001"));
        assert!(name.len() < MAX_NAME);
        assert_eq!(name, format!("{}.001", "a".repeat(58)));
    }
}
