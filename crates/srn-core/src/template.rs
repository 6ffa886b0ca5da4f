//! Broadcast message templates.
//!
//! A template is plain text with `&`-prefixed colour codes and four
//! placeholders: `-sender`, `-min`, `-max` and `-result`. Rendering is a
//! single left-to-right pass: colour codes are translated only in the
//! template's own text, and substituted values are copied verbatim, so a
//! sender called `-max` or `&4Bob` comes out exactly as named.

/// Prefix written in templates for a colour or format code.
pub const ALT_COLOR_CHAR: char = '&';

/// Prefix the game client understands.
pub const COLOR_CHAR: char = '\u{a7}';

const COLOR_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Values substituted into a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholders<'a> {
    /// `-sender`
    pub sender: &'a str,
    /// `-min`
    pub min: i32,
    /// `-max`
    pub max: i32,
    /// `-result`
    pub result: i32,
}

impl Placeholders<'_> {
    fn expand(&self, rest: &str) -> Option<(String, usize)> {
        const NAMES: [&str; 4] = ["-sender", "-min", "-max", "-result"];

        let name = NAMES.iter().find(|name| rest.starts_with(*name))?;
        let value = match *name {
            "-sender" => self.sender.to_owned(),
            "-min" => self.min.to_string(),
            "-max" => self.max.to_string(),
            _ => self.result.to_string(),
        };
        Some((value, name.len()))
    }
}

/// Render `template` with the given values.
pub fn render(template: &str, values: &Placeholders<'_>) -> String {
    let mut out = String::with_capacity(template.len() + values.sender.len() + 16);
    let mut literal_start = 0;
    let mut index = 0;

    while let Some(c) = template[index..].chars().next() {
        if c == '-' {
            if let Some((value, consumed)) = values.expand(&template[index..]) {
                out.push_str(&translate_color_codes(&template[literal_start..index]));
                out.push_str(&value);
                index += consumed;
                literal_start = index;
                continue;
            }
        }
        index += c.len_utf8();
    }

    out.push_str(&translate_color_codes(&template[literal_start..]));
    out
}

/// Translate `&` colour codes in `text`, leaving everything else alone.
pub fn translate_color_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&code) if c == ALT_COLOR_CHAR && COLOR_CODES.contains(code) => {
                out.push(COLOR_CHAR);
                out.push(code.to_ascii_lowercase());
                chars.next();
            },
            _ => out.push(c),
        }
    }

    out
}

/// Remove `§` colour codes, for hosts that cannot display them.
pub fn strip_color_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == COLOR_CHAR {
            chars.next();
        } else {
            out.push(c);
        }
    }

    out
}
