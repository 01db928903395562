//! Extraction of the runtime state inlined in `.pnp.cjs`
//!
//! Yarn writes the state as a single-quoted JavaScript string assigned to
//! `RAW_RUNTIME_STATE`, with every line ending in a `\` continuation.

const STATE_MARKER: &str = "RAW_RUNTIME_STATE";

/// Return the JSON text inlined in a `.pnp.cjs` script, if present.
///
/// Decodes the JS string literal: line continuations are dropped, `\n`,
/// `\r` and `\t` become control characters, and any other escaped character
/// stands for itself.
pub fn extract_runtime_state(script: &str) -> Option<String> {
    let start = script.find(STATE_MARKER)? + STATE_MARKER.len();
    let literal = script[start..]
        .trim_start()
        .strip_prefix('=')?
        .trim_start()
        .strip_prefix('\'')?;

    let mut chars = literal.chars().peekable();
    let mut json = String::with_capacity(literal.len());

    while let Some(c) = chars.next() {
        match c {
            '\'' => return Some(json),
            '\\' => match chars.next()? {
                '\n' => {}
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                }
                'n' => json.push('\n'),
                'r' => json.push('\r'),
                't' => json.push('\t'),
                other => json.push(other),
            },
            other => json.push(other),
        }
    }

    // Unterminated literal
    None
}
