//! Per-line tokenizer: directive strip, label extraction, then split into
//! a mnemonic and its operand tokens.

/// The result of tokenizing one source line. `mnemonic` is `None` for a
/// blank, comment-only, or label-only line — the assembler just registers
/// the label (if any) and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub label: Option<String>,
    pub mnemonic: Option<String>,
    pub operands: Vec<String>,
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    !s.is_empty() && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Trim, strip a leading `#` directive marker, pull off a `LABEL:` prefix if
/// present, then tokenize the rest on commas/whitespace. Every token
/// (mnemonic and operands alike) is uppercased here, once, so downstream
/// classification never has to re-case anything.
pub fn parse_line(raw: &str) -> ParsedLine {
    let mut line = raw.trim();
    if let Some(rest) = line.strip_prefix('#') {
        line = rest.trim();
    }

    let mut label = None;
    if let Some(colon_idx) = line.find(':') {
        let (head, tail) = line.split_at(colon_idx);
        let head = head.trim();
        if is_ident(head) {
            label = Some(head.to_ascii_uppercase());
            line = tail[1..].trim();
        }
    }

    let tokens: Vec<String> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_ascii_uppercase())
        .collect();

    if tokens.is_empty() {
        return ParsedLine {
            label,
            mnemonic: None,
            operands: Vec::new(),
        };
    }

    let mnemonic = tokens[0].clone();
    let operands = tokens[1..].to_vec();
    ParsedLine {
        label,
        mnemonic: Some(mnemonic),
        operands,
    }
}
