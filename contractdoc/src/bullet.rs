//! Turns a rendered multi-line block into one bullet list item.

/// Prefix the first line with `* ` at `indent` spaces and align the remaining non-blank
/// lines under the text after the marker. Blank lines stay empty so code blocks nested in
/// the item keep their layout.
pub fn bullet_item(block: &[String], indent: usize) -> Vec<String> {
    let marker = format!("{}* ", " ".repeat(indent));
    let continuation = " ".repeat(marker.len());

    block
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{marker}{line}")
            } else if line.trim().is_empty() {
                String::new()
            } else {
                format!("{continuation}{line}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(block: &[&str]) -> Vec<String> {
        block.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_line() {
        assert_eq!(
            bullet_item(&lines(&[":code:`x > 0`"]), 4),
            vec!["    * :code:`x > 0`"]
        );
    }

    #[test]
    fn nested_block_is_aligned() {
        let block = lines(&["::", "", "    all(", "    x)", "", "(positive)"]);
        assert_eq!(
            bullet_item(&block, 4),
            vec![
                "    * ::",
                "",
                "          all(",
                "          x)",
                "",
                "      (positive)",
            ]
        );
    }

    #[test]
    fn empty_block() {
        assert!(bullet_item(&[], 4).is_empty());
    }
}
