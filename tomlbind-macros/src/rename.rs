/// Case conversion applied to field names by `#[bind(rename_all = "...")]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameRule {
    CamelCase,
    SnakeCase,
    KebabCase,
    PascalCase,
    ScreamingSnakeCase,
    Lowercase,
    Uppercase,
}

impl RenameRule {
    pub(crate) const ACCEPTED: &'static str = "\"camelCase\", \"snake_case\", \"kebab-case\", \
         \"PascalCase\", \"SCREAMING_SNAKE_CASE\", \"lowercase\" or \"UPPERCASE\"";

    pub(crate) fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "camelCase" => RenameRule::CamelCase,
            "snake_case" => RenameRule::SnakeCase,
            "kebab-case" => RenameRule::KebabCase,
            "PascalCase" => RenameRule::PascalCase,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnakeCase,
            "lowercase" => RenameRule::Lowercase,
            "UPPERCASE" => RenameRule::Uppercase,
            _ => return None,
        })
    }

    pub(crate) fn apply(self, name: &str) -> String {
        let words = words(name);
        match self {
            RenameRule::CamelCase => {
                let mut out = String::with_capacity(name.len());
                for (i, word) in words.iter().enumerate() {
                    if i == 0 {
                        out.push_str(&word.to_lowercase());
                    } else {
                        push_capitalized(&mut out, word);
                    }
                }
                out
            }
            RenameRule::PascalCase => {
                let mut out = String::with_capacity(name.len());
                for word in &words {
                    push_capitalized(&mut out, word);
                }
                out
            }
            RenameRule::SnakeCase => join_mapped(&words, "_", str::to_lowercase),
            RenameRule::KebabCase => join_mapped(&words, "-", str::to_lowercase),
            RenameRule::ScreamingSnakeCase => join_mapped(&words, "_", str::to_uppercase),
            RenameRule::Lowercase => name.to_lowercase(),
            RenameRule::Uppercase => name.to_uppercase(),
        }
    }
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(&chars.as_str().to_lowercase());
    }
}

fn join_mapped(words: &[&str], sep: &str, f: fn(&str) -> String) -> String {
    words.iter().map(|w| f(w)).collect::<Vec<_>>().join(sep)
}

/// Splits an identifier on `_`, `-` and lower-to-upper case boundaries.
fn words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = None;
    let mut prev_lower = false;

    for (i, ch) in name.char_indices() {
        if ch == '_' || ch == '-' {
            if let Some(s) = start.take() {
                words.push(&name[s..i]);
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            if let Some(s) = start {
                words.push(&name[s..i]);
            }
            start = Some(i);
        } else if start.is_none() {
            start = Some(i);
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
    }
    if let Some(s) = start {
        words.push(&name[s..]);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules() {
        assert_eq!(RenameRule::CamelCase.apply("main_deep_field"), "mainDeepField");
        assert_eq!(RenameRule::PascalCase.apply("main_deep"), "MainDeep");
        assert_eq!(RenameRule::KebabCase.apply("listen_port"), "listen-port");
        assert_eq!(RenameRule::SnakeCase.apply("listenPort"), "listen_port");
        assert_eq!(RenameRule::ScreamingSnakeCase.apply("listen_port"), "LISTEN_PORT");
        assert_eq!(RenameRule::Lowercase.apply("Field"), "field");
        assert_eq!(RenameRule::Uppercase.apply("field"), "FIELD");
    }

    #[test]
    fn acronyms_stay_together() {
        assert_eq!(RenameRule::SnakeCase.apply("HTTPPort"), "httpport");
        assert_eq!(RenameRule::SnakeCase.apply("ipv4_addr"), "ipv4_addr");
    }
}
