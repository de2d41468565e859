// Short input is returned as is, spacing included.
pub fn summarize(text: &str, target_words: usize) -> String {
    let words = text.split_whitespace().collect::<Vec<_>>();
    if words.len() < target_words {
        return text.to_string();
    }
    words[..target_words].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_target() {
        assert_eq!(summarize("one two three four five", 3), "one two three");
    }

    #[test]
    fn short_input_is_returned_unchanged() {
        assert_eq!(summarize("one  two", 5), "one  two");
        assert_eq!(summarize("", 3), "");
    }

    #[test]
    fn zero_target_is_empty() {
        assert_eq!(summarize("one two", 0), "");
    }

    #[test]
    fn output_word_count_is_min_of_target_and_input() {
        let text = "a  b\tc\nd e f g";
        let total = text.split_whitespace().count();
        for k in 0..10 {
            let out = summarize(text, k);
            assert_eq!(out.split_whitespace().count(), k.min(total), "k = {k}");
        }
    }
}
