// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Backward scanner for dotted/bracketed access chains.
//!
//! Given an input buffer and a cursor offset, [`tokenize`] walks left from
//! the cursor and produces the chain of [`Identifier`]s ending at the
//! cursor: `client.admin().cluster().hea` becomes
//! `[client, admin, cluster, hea]`. Call-argument lists are stripped with
//! balanced-paren counting, quoted bracket indexes (`obj["prop"]`) become
//! synthetic identifiers, and a leading `new` keyword is recognized.
//!
//! The scan is greedy with no backtracking: once a boundary character
//! closes a token, the token is final. Malformed input (unbalanced parens,
//! unterminated bracket indexes) stops the scan early — a boundary, not an
//! error.

use super::Identifier;

/// Whether `c` can appear inside an identifier.
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits `buffer[..cursor]` into the access chain ending at the cursor.
///
/// The result is ordered left-to-right and never empty: the last element
/// is always the (possibly empty) partial identifier being completed. The
/// function is pure — identical inputs produce identical chains.
#[must_use]
pub fn tokenize(buffer: &str, cursor: usize) -> Vec<Identifier> {
    let mut cursor = cursor.min(buffer.len());
    while cursor > 0 && !buffer.is_char_boundary(cursor) {
        cursor -= 1;
    }

    let chars: Vec<(usize, char)> = buffer[..cursor].char_indices().collect();
    let mut idents: Vec<Identifier> = Vec::new();

    // The token currently accumulating, as byte offsets. `start == end`
    // means nothing has been accumulated yet.
    let mut end = cursor;
    let mut start = cursor;
    let mut i = chars.len();

    loop {
        if i == 0 {
            idents.push(Identifier::new(&buffer[start..end], start, end));
            break;
        }
        let (pos, c) = chars[i - 1];
        if is_ident_char(c) {
            start = pos;
            i -= 1;
            continue;
        }
        match c {
            '.' => {
                idents.push(Identifier::new(&buffer[start..end], start, end));
                i -= 1;
                if i > 0 && chars[i - 1].1 == ')' {
                    // `obj.method(args).` — strip the argument list and keep
                    // accumulating the method name left of the `(`.
                    let Some(open) = matching_open_paren(&chars, i - 1) else {
                        break;
                    };
                    i = open;
                    end = chars[open].0;
                    start = end;
                } else {
                    end = pos;
                    start = pos;
                }
            }
            ']' if start == end => {
                let Some((name, open_idx)) = bracket_index(buffer, &chars, i - 1) else {
                    idents.push(Identifier::new(&buffer[start..end], start, end));
                    break;
                };
                let open_byte = chars[open_idx].0;
                idents.push(Identifier::new(name, open_byte, pos + 1));
                i = open_idx;
                end = open_byte;
                start = open_byte;
            }
            ' ' => {
                idents.push(Identifier::new(&buffer[start..end], start, end));
                let mut j = i - 1;
                while j > 0 && chars[j - 1].1 == ' ' {
                    j -= 1;
                }
                if let Some((kw_start, kw_end)) = keyword_new_at(&chars, j) {
                    idents.push(Identifier::keyword_new(kw_start, kw_end));
                }
                break;
            }
            _ => {
                idents.push(Identifier::new(&buffer[start..end], start, end));
                break;
            }
        }
    }

    // Tokens were collected right-to-left; flip to input order. Single
    // element chains are skipped as a no-op.
    if idents.len() > 1 {
        idents.reverse();
    }
    idents
}

/// Finds the `(` matching the `)` at `close`, scanning left with balanced
/// counting. Returns its index into `chars`, or `None` when unbalanced.
fn matching_open_paren(chars: &[(usize, char)], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for k in (0..=close).rev() {
        match chars[k].1 {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return Some(k);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parses a quoted bracket index ending at the `]` at `close`, e.g.
/// `["prop"]` or `['prop']`. Returns the inner name and the index of the
/// opening `[`.
///
/// The minimum-length check is asymmetric and quotes inside the brackets
/// cannot be escaped — a known limitation preserved from the original
/// scanner, exercised by the malformed-input tests.
fn bracket_index<'a>(
    buffer: &'a str,
    chars: &[(usize, char)],
    close: usize,
) -> Option<(&'a str, usize)> {
    if close < 3 {
        return None;
    }
    let (close_quote_pos, quote) = chars[close - 1];
    if quote != '"' && quote != '\'' {
        return None;
    }
    for k in (0..close - 1).rev() {
        if chars[k].1 == quote {
            if k == 0 || chars[k - 1].1 != '[' {
                return None;
            }
            let name = &buffer[chars[k].0 + 1..close_quote_pos];
            return Some((name, k - 1));
        }
    }
    None
}

/// Checks whether the characters just before index `j` spell a standalone
/// `new` keyword, returning its byte span.
fn keyword_new_at(chars: &[(usize, char)], j: usize) -> Option<(usize, usize)> {
    if j < 3 {
        return None;
    }
    let (n_pos, n) = chars[j - 3];
    let (_, e) = chars[j - 2];
    let (w_pos, w) = chars[j - 1];
    if n != 'n' || e != 'e' || w != 'w' {
        return None;
    }
    if j >= 4 && is_ident_char(chars[j - 4].1) {
        return None;
    }
    Some((n_pos, w_pos + 1))
}
