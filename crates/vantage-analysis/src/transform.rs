use crate::refactor::CodeTransformation;

/// `applyRefactoring`'s failure mode: any out-of-bounds address fails the
/// whole apply, never a partial result.
#[derive(Debug, Clone)]
pub struct TransformError {
    pub message: String,
}

/// Applies an ordered list of line/column edits to `source`, per the C6
/// apply algorithm: sort descending by `(start_line, start_column)` so an
/// earlier edit never invalidates a later one's addresses, then splice each
/// range in place. `type` (replace/insert/delete) is advisory — only the
/// range and `new_code` are operative.
pub fn apply_transformations(
    transformations: &[CodeTransformation],
    source: &str,
) -> Result<String, TransformError> {
    if transformations.is_empty() {
        return Ok(source.to_string());
    }

    let mut lines: Vec<Vec<char>> = source.split('\n').map(|line| line.chars().collect()).collect();

    let mut ordered: Vec<&CodeTransformation> = transformations.iter().collect();
    ordered.sort_by(|a, b| {
        b.start_line
            .cmp(&a.start_line)
            .then(b.start_column.cmp(&a.start_column))
    });

    for t in ordered {
        if t.start_line == 0 || t.end_line == 0 {
            return Err(TransformError {
                message: "transformation line numbers are 1-based; line 0 is invalid".to_string(),
            });
        }
        let start_idx = t.start_line - 1;
        let end_idx = t.end_line - 1;

        if start_idx >= lines.len() || end_idx >= lines.len() || start_idx > end_idx {
            return Err(TransformError {
                message: format!(
                    "transformation addresses line {}..{} but source has {} line(s)",
                    t.start_line,
                    t.end_line,
                    lines.len()
                ),
            });
        }

        if start_idx == end_idx {
            let line = &lines[start_idx];
            if t.start_column > line.len() || t.end_column > line.len() || t.start_column > t.end_column {
                return Err(TransformError {
                    message: format!(
                        "transformation addresses out-of-bounds column on line {}",
                        t.start_line
                    ),
                });
            }
            let mut rebuilt: Vec<char> = line[..t.start_column].to_vec();
            rebuilt.extend(t.new_code.chars());
            rebuilt.extend(line[t.end_column..].iter());
            lines[start_idx] = rebuilt;
        } else {
            let start_line = &lines[start_idx];
            let end_line = &lines[end_idx];
            if t.start_column > start_line.len() || t.end_column > end_line.len() {
                return Err(TransformError {
                    message: format!(
                        "transformation addresses out-of-bounds column across lines {}..{}",
                        t.start_line, t.end_line
                    ),
                });
            }
            let mut merged: Vec<char> = start_line[..t.start_column].to_vec();
            merged.extend(t.new_code.chars());
            merged.extend(end_line[t.end_column..].iter());
            lines.splice(start_idx..=end_idx, std::iter::once(merged));
        }
    }

    Ok(lines
        .into_iter()
        .map(|line| line.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_replace_matches_scenario_four() {
        let t = vec![CodeTransformation::replace(1, 4, 1, 5, "y", "rename")];
        let out = apply_transformations(&t, "var x = 5;").unwrap();
        assert_eq!(out, "var y = 5;");
    }

    #[test]
    fn out_of_bounds_line_fails_closed() {
        let t = vec![CodeTransformation::replace(100, 0, 100, 1, "y", "rename")];
        let err = apply_transformations(&t, "var x = 5;").unwrap_err();
        assert!(!err.message.is_empty());
    }

    #[test]
    fn empty_new_code_deletes_range() {
        let t = vec![CodeTransformation::replace(1, 4, 1, 6, "", "delete x ")];
        let out = apply_transformations(&t, "var xy = 5;").unwrap();
        assert_eq!(out, "var  = 5;");
    }

    #[test]
    fn two_edits_on_same_line_both_apply_higher_column_first() {
        let t = vec![
            CodeTransformation::replace(1, 10, 1, 11, "9", "change 5"),
            CodeTransformation::replace(1, 4, 1, 5, "y", "change x"),
        ];
        let out = apply_transformations(&t, "var x = 5;").unwrap();
        assert_eq!(out, "var y = 9;");
    }

    #[test]
    fn multi_line_edit_merges_into_one_line() {
        let source = "if (true) {\n  doSomething();\n}";
        let t = vec![CodeTransformation::replace(1, 9, 3, 1, " { /* removed */ }", "collapse")];
        let out = apply_transformations(&t, source).unwrap();
        assert_eq!(out, "if (true) { /* removed */ }");
    }

    #[test]
    fn empty_transformation_list_returns_source_unchanged() {
        let out = apply_transformations(&[], "unchanged").unwrap();
        assert_eq!(out, "unchanged");
    }

    #[test]
    fn reapplying_same_transformations_to_original_is_deterministic() {
        let t = vec![CodeTransformation::replace(1, 4, 1, 5, "y", "rename")];
        let first = apply_transformations(&t, "var x = 5;").unwrap();
        let second = apply_transformations(&t, "var x = 5;").unwrap();
        assert_eq!(first, second);
    }

    proptest::proptest! {
        /// Any transformation whose `start_line` falls past the source's
        /// line count fails closed, regardless of the source's contents or
        /// the replacement text — the boundary case behind
        /// `out_of_bounds_line_fails_closed` above, generalized.
        #[test]
        fn any_line_beyond_source_fails_closed(
            lines in proptest::collection::vec("[a-zA-Z0-9 ]{0,20}", 1..10),
            extra in 1usize..50,
            new_code in "[a-zA-Z0-9 ]{0,10}",
        ) {
            let source = lines.join("\n");
            let start_line = lines.len() + extra;
            let t = vec![CodeTransformation::replace(start_line, 0, start_line, 0, new_code, "prop")];
            proptest::prop_assert!(apply_transformations(&t, &source).is_err());
        }
    }
}
