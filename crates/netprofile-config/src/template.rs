//! `${NAME}` placeholder handling for endpoint templates.

/// Placeholder names in order of appearance, duplicates included
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                names.push(&after[..end]);
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}

/// Substitute every placeholder through `lookup`.
///
/// Fails with the sorted, deduplicated names that `lookup` could not supply.
/// An unterminated `${` is copied through literally.
pub fn render<'a, F>(template: &str, lookup: F) -> Result<String, Vec<String>>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    let mut missing = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let name = &after[..end];
        match lookup(name) {
            Some(value) => out.push_str(value),
            None => missing.push(name.to_string()),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    if missing.is_empty() {
        Ok(out)
    } else {
        missing.sort();
        missing.dedup();
        Err(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholders("https://${HOST}/v3/${KEY}"),
            vec!["HOST", "KEY"]
        );
        assert!(placeholders("https://rpc.example.org").is_empty());
        assert!(placeholders("https://${BROKEN").is_empty());
    }

    #[test]
    fn test_render_substitutes_all() {
        let rendered = render("https://a/${K1}/${K2}", |name| match name {
            "K1" => Some("one"),
            "K2" => Some("two"),
            _ => None,
        });
        assert_eq!(rendered.unwrap(), "https://a/one/two");
    }

    #[test]
    fn test_render_reports_every_missing_name() {
        let err = render("https://${B}/${A}/${B}", |_| None).unwrap_err();
        assert_eq!(err, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_render_leaves_unterminated_placeholder() {
        assert_eq!(render("http://x/${OPEN", |_| None).unwrap(), "http://x/${OPEN");
    }
}
