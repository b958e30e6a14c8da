/// Split markup into words on single ASCII spaces.
///
/// Consecutive spaces produce empty words, which are kept. Markup is not
/// understood: a space inside a tag (`<a href="x y">`) splits the tag too.
pub fn tokenize(markup: &str) -> Vec<&str> {
    markup.split(' ').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_single_spaces() {
        assert_eq!(tokenize("ab cd"), ["ab", "cd"]);
    }

    #[test]
    fn consecutive_spaces_keep_empty_words() {
        assert_eq!(tokenize("a  b"), ["a", "", "b"]);
        assert_eq!(tokenize(" a "), ["", "a", ""]);
        assert_eq!(tokenize(""), [""]);
    }

    #[test]
    fn other_whitespace_is_part_of_the_word() {
        assert_eq!(tokenize("a\tb\nc d"), ["a\tb\nc", "d"]);
    }

    #[test]
    fn markup_is_kept_verbatim() {
        assert_eq!(
            tokenize("one <em>two</em> <a href=\"x y\">z</a>"),
            ["one", "<em>two</em>", "<a", "href=\"x", "y\">z</a>"]
        );
    }
}
