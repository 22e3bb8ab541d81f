//! `key=value` splitting for descriptor lines
//!
//! A descriptor line is a tag followed by whitespace-separated fields:
//!
//! ```text
//! info face="Open Sans" size=16 bold=0
//! char id=65 x=10 y=0 width=8 height=12 xoffset=0 yoffset=2 xadvance=9 page=0 chnl=15
//! ```
//!
//! Quoted values may contain spaces, which splits them over several tokens.
//! Tokens without `=` that follow a string field are glued back onto it.

/// One field of a descriptor line, quotes stripped from the value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    pub key: &'a str,
    pub value: String,
}

/// First whitespace-delimited token of a line
pub fn tag(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

/// Split everything after the tag into fields.
///
/// Bare tokens following a field whose key is in `string_keys` are appended
/// to that field's value with a single space. Any other bare token is
/// dropped, as is everything once a new `key=value` token starts.
pub fn split_fields<'a>(line: &'a str, string_keys: &[&str]) -> Vec<Field<'a>> {
    let mut fields: Vec<Field<'a>> = Vec::new();
    let mut continuing = false;

    for token in line.split_whitespace().skip(1) {
        match token.split_once('=') {
            Some((key, value)) => {
                continuing = string_keys.contains(&key);
                fields.push(Field {
                    key,
                    value: value.to_string(),
                });
            }
            None if continuing => {
                if let Some(last) = fields.last_mut() {
                    last.value.push(' ');
                    last.value.push_str(token);
                }
            }
            None => {}
        }
    }

    for field in &mut fields {
        let trimmed = field.value.trim_matches('"');
        if trimmed.len() != field.value.len() {
            field.value = trimmed.to_string();
        }
    }

    fields
}
