/// Return the comparable body of a decompiled function's text.
///
/// The body is the content between the first `{` and the first `}` after it, trimmed.
/// This is the first brace-delimited block, not the outermost one: nested blocks cut
/// the body short at their closing brace. When there is no such block, or it holds
/// only whitespace, the whole text is returned trimmed.
pub fn canonicalize(raw_text: &str) -> &str {
    let block = raw_text.find('{').and_then(|open| {
        let rest = &raw_text[open + 1..];
        rest.find('}').map(|close| rest[..close].trim())
    });

    match block {
        Some(body) if !body.is_empty() => body,
        _ => raw_text.trim(),
    }
}
