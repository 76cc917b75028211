//! Root object extraction from declaration text.
//!
//! The scanner is deliberately narrow. It recovers sibling object-type
//! literals by brace depth and knows nothing else about the language.

use std::sync::OnceLock;

use regex::Regex;

fn readonly_modifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\breadonly\s+").expect("valid readonly regex"))
}

/// Prepare declaration text for compilation.
///
/// Comments and `readonly` modifiers are removed, then bare keys are quoted.
pub fn prepare(text: &str) -> String {
    quote_keys(&strip_readonly(&strip_comments(text)))
}

/// Remove every `readonly` modifier.
pub fn strip_readonly(text: &str) -> String {
    readonly_modifier().replace_all(text, "").into_owned()
}

/// Remove `//` and `/* */` comments outside string literals.
pub fn strip_comments(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        match (chars[i], chars.get(i + 1)) {
            (quote, _) if is_quote(quote) => {
                let end = string_end(&chars, i);
                out.extend(&chars[i..end]);
                i = end;
            }
            ('/', Some('/')) => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            ('/', Some('*')) => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(chars.len());
                out.push(' ');
            }
            (c, _) => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Quote bare identifier and numeric keys.
///
/// `name:` becomes `"name":` and `age?:` becomes `"age"?:`. Unicode
/// identifiers are quoted too. Tokens inside string literals and the
/// branches of a conditional type (`A ? B : C`) are left alone.
///
/// ```rust
/// use scribe_declaration::quote_keys;
///
/// assert_eq!(quote_keys("{ 200: { name?: string } }"), r#"{ "200": { "name"?: string } }"#);
/// ```
pub fn quote_keys(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut previous: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if is_quote(c) {
            let end = string_end(&chars, i);
            out.extend(&chars[i..end]);
            previous = Some(c);
            i = end;
            continue;
        }

        if is_key_char(c) {
            let mut end = i + 1;
            while end < chars.len() && is_key_char(chars[end]) {
                end += 1;
            }
            let token: String = chars[i..end].iter().collect();
            if previous != Some('?') && followed_by_colon(&chars, end) {
                out.push('"');
                out.push_str(&token);
                out.push('"');
            } else {
                out.push_str(&token);
            }
            previous = Some(chars[end - 1]);
            i = end;
            continue;
        }

        out.push(c);
        if !c.is_whitespace() {
            previous = Some(c);
        }
        i += 1;
    }

    out
}

/// Extract the top-level object-type literals of a declaration.
///
/// The text is [prepared](prepare) first. Each fragment is one key and its
/// braced value, wrapped in braces so it is a complete object literal on
/// its own.
///
/// ```rust
/// use scribe_declaration::extract_root_objects;
///
/// let fragments = extract_root_objects("{ a: { get: {} } } & { b: { post: {} } }");
/// assert_eq!(fragments, vec![r#"{"a": { "get": {} }}"#, r#"{"b": { "post": {} }}"#]);
/// ```
pub fn extract_root_objects(text: &str) -> Vec<String> {
    scan_root_objects(&prepare(text))
}

fn scan_root_objects(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut fragments = Vec::new();
    let mut cursor = 0;

    while let Some(colon) = find_unquoted(bytes, cursor, b':') {
        let mut start = colon;
        while start > cursor {
            match bytes[start - 1] {
                b'{' | b'}' | b';' | b',' | b'\n' => break,
                quote @ (b'"' | b'\'' | b'`') => start = opening_quote(bytes, start - 1, quote, cursor),
                _ => start -= 1,
            }
        }

        let Some(open) = find_unquoted(bytes, colon + 1, b'{') else {
            break;
        };
        let Some(close) = matching_brace(bytes, open) else {
            break;
        };

        fragments.push(format!("{{{}}}", text[start..=close].trim()));
        cursor = close + 1;
    }

    fragments
}

fn find_unquoted(bytes: &[u8], from: usize, target: u8) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'' | b'`') => i = byte_string_end(bytes, i, quote),
            byte if byte == target => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn opening_quote(bytes: &[u8], closing: usize, quote: u8, floor: usize) -> usize {
    let mut i = closing;
    while i > floor {
        i -= 1;
        if bytes[i] == quote && (i == 0 || bytes[i - 1] != b'\\') {
            return i;
        }
    }
    floor
}

fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'' | b'`') => {
                i = byte_string_end(bytes, i, quote);
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn byte_string_end(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            byte if byte == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn string_end(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

fn followed_by_colon(chars: &[char], from: usize) -> bool {
    let mut rest = chars[from..].iter().skip_while(|c| c.is_whitespace()).peekable();
    if rest.peek() == Some(&&'?') {
        rest.next();
    }
    rest.find(|c| !c.is_whitespace()) == Some(&':')
}

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '`')
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
