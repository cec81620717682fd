//! Quote-aware tab tokenizer for tabular record lines.
//!
//! Fields are tab-delimited. A double-quoted field may contain literal
//! tabs, and a doubled quote (`""`) inside a quoted field is one literal
//! quote character.

/// Split a record line into fields.
pub fn split_record_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            '\t' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        assert_eq!(split_record_line("a\tb\tc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_fields_preserved() {
        assert_eq!(split_record_line("a\t\tc"), vec!["a", "", "c"]);
        assert_eq!(split_record_line("\t"), vec!["", ""]);
    }

    #[test]
    fn test_quoted_field_with_tab() {
        assert_eq!(
            split_record_line("a\t\"b\tstill b\"\tc"),
            vec!["a", "b\tstill b", "c"]
        );
    }

    #[test]
    fn test_doubled_quote_is_literal() {
        assert_eq!(
            split_record_line("\"say \"\"hi\"\"\"\tx"),
            vec!["say \"hi\"", "x"]
        );
    }

    #[test]
    fn test_quote_mid_field_is_literal() {
        // A quote that does not open the field is kept as-is.
        assert_eq!(split_record_line("ab\"cd\tx"), vec!["ab\"cd", "x"]);
    }
}
