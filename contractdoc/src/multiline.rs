//! Verbatim rendering of expressions that span several lines.

/// Longest whitespace prefix shared by all non-blank lines.
fn common_indent<'a>(lines: &[&'a str]) -> &'a str {
    let mut indents = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start().len()]);

    let Some(first) = indents.next() else {
        return "";
    };

    indents.fold(first, |common, indent| {
        let end = common
            .char_indices()
            .zip(indent.chars())
            .find(|((_, a), b)| a != b)
            .map(|((i, _), _)| i)
            .unwrap_or(common.len().min(indent.len()));
        &common[..end]
    })
}

fn dedent(lines: &[&str]) -> Vec<String> {
    let indent = common_indent(lines);
    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line.strip_prefix(indent).unwrap_or(line).trim_end().to_string()
            }
        })
        .collect()
}

/// Remove source-file indentation from a multi-line expression text.
///
/// Text sliced from a node starts mid-line, so its first line carries no indentation
/// while the continuation lines keep the file's. In that case only the continuation lines
/// are dedented and the first line is kept as is. If the first line is itself indented,
/// all lines are dedented together.
pub fn smart_dedent(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    match lines.split_first() {
        None => Vec::new(),
        Some((first, _)) if first.starts_with(char::is_whitespace) => dedent(&lines),
        Some((first, rest)) => std::iter::once(first.trim_end().to_string())
            .chain(dedent(rest))
            .collect(),
    }
}

/// Literal code block: a `::` marker, a blank line, the dedented lines shifted right by
/// `offset` spaces, and a closing blank line.
pub fn code_block(text: &str, offset: usize) -> Vec<String> {
    let pad = " ".repeat(offset);
    let mut block = vec!["::".to_string(), String::new()];
    block.extend(smart_dedent(text).into_iter().map(|line| {
        if line.is_empty() {
            line
        } else {
            format!("{pad}{line}")
        }
    }));
    block.push(String::new());
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuation_lines_are_dedented() {
        let text = "all(\n            item > 0\n            for item in lst)";
        assert_eq!(
            smart_dedent(text),
            vec!["all(", "item > 0", "for item in lst)"]
        );
    }

    #[test]
    fn relative_indentation_is_kept() {
        let text = "f(\n        a,\n            b)";
        assert_eq!(smart_dedent(text), vec!["f(", "a,", "    b)"]);
    }

    #[test]
    fn indented_first_line_dedents_everything() {
        let text = "    x > 0 and \\\n        y > 0";
        assert_eq!(smart_dedent(text), vec!["x > 0 and \\", "    y > 0"]);
    }

    #[test]
    fn blank_lines_stay_empty() {
        let text = "(a\n\n      and b)";
        assert_eq!(smart_dedent(text), vec!["(a", "", "and b)"]);
    }

    #[test]
    fn block_layout() {
        let block = code_block("all(\n    x\n    for x in y)", 4);
        assert_eq!(
            block,
            vec!["::", "", "    all(", "    x", "    for x in y)", ""]
        );
        assert!(block.iter().all(|line| !line.contains('\n')));
    }
}
