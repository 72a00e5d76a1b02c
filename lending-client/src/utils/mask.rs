/// Number of leading characters of the local part left readable.
const VISIBLE_PREFIX: usize = 3;

/// Mask an email address for display: every character from the 4th up to
/// the first `@` becomes `*`.
///
/// Addresses with three or fewer characters before the `@`, or with no
/// `@` at all, are returned unchanged.
///
/// The mask is bounded by the first `@`, not the last. A deliverable
/// address has exactly one `@`, so both agree on every address the
/// backend accepts; for malformed input such as `abcde@f@g.com` this
/// yields `abc**@f@g.com` where a last-`@` rule would give `abc****@g.com`.
/// Stopping early keeps the domain intact and never hides more than the
/// local part the user typed.
pub fn mask_email(email: &str) -> String {
    let Some(at) = email.find('@') else {
        return email.to_string();
    };

    let (local, domain) = email.split_at(at);
    let masked: String = local
        .chars()
        .enumerate()
        .map(|(i, c)| if i < VISIBLE_PREFIX { c } else { '*' })
        .collect();

    format!("{}{}", masked, domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_local_part_after_third_char() {
        assert_eq!(mask_email("abcdef@example.com"), "abc***@example.com");
        assert_eq!(mask_email("abcdef@x.com"), "abc***@x.com");
    }

    #[test]
    fn short_local_part_is_untouched() {
        assert_eq!(mask_email("ab@x.com"), "ab@x.com");
        assert_eq!(mask_email("abc@x.com"), "abc@x.com");
        assert_eq!(mask_email("@x.com"), "@x.com");
    }

    #[test]
    fn four_char_local_part_masks_one() {
        assert_eq!(mask_email("abcd@x.com"), "abc*@x.com");
    }

    #[test]
    fn without_at_sign_nothing_is_masked() {
        assert_eq!(mask_email("not-an-email"), "not-an-email");
    }

    #[test]
    fn only_first_at_bounds_the_mask() {
        assert_eq!(mask_email("abcde@f@g.com"), "abc**@f@g.com");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(mask_email("ñandú99@x.mn"), "ñan****@x.mn");
    }
}
