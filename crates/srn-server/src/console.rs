//! Console line grammar.
//!
//! ```text
//! <label> [args...]               run as the console
//! as <player> <label> [args...]   run as an online player
//! ```
//!
//! A leading `/` on the label is accepted, as in chat.

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine<'a> {
    /// Player to run as; `None` for the console.
    pub actor: Option<&'a str>,
    /// Command label, without a leading `/`.
    pub label: &'a str,
    /// Arguments after the label.
    pub args: Vec<&'a str>,
}

impl<'a> ConsoleLine<'a> {
    /// Parse one line. Returns `None` for blank lines.
    ///
    /// `as` with no player or no label is treated as a command called `as`,
    /// which the host then rejects as unknown.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let first = tokens.next()?;

        let rest: Vec<&str> = tokens.collect();
        if first == "as" {
            if let [actor, label, args @ ..] = rest.as_slice() {
                return Some(Self { actor: Some(actor), label: trim_slash(label), args: args.to_vec() });
            }
        }

        Some(Self { actor: None, label: trim_slash(first), args: rest })
    }
}

fn trim_slash(label: &str) -> &str {
    label.strip_prefix('/').unwrap_or(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(ConsoleLine::parse(""), None);
        assert_eq!(ConsoleLine::parse("   \t"), None);
    }

    #[test]
    fn console_command() {
        assert_eq!(
            ConsoleLine::parse("roll  1 20"),
            Some(ConsoleLine { actor: None, label: "roll", args: vec!["1", "20"] })
        );
        assert_eq!(
            ConsoleLine::parse("/srn"),
            Some(ConsoleLine { actor: None, label: "srn", args: vec![] })
        );
    }

    #[test]
    fn player_command() {
        assert_eq!(
            ConsoleLine::parse("as Steve /roll setmax 12"),
            Some(ConsoleLine { actor: Some("Steve"), label: "roll", args: vec!["setmax", "12"] })
        );
    }

    #[test]
    fn incomplete_as_is_a_plain_label() {
        assert_eq!(
            ConsoleLine::parse("as Steve"),
            Some(ConsoleLine { actor: None, label: "as", args: vec!["Steve"] })
        );
    }
}
