// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Drop the game's rich-text markers (`<@ba.vup>`, `<$ba.stun>`, `</>`)
/// while leaving the wrapped text in place. Newlines survive.
pub fn strip_rich_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];
        let is_marker = matches!(tail.as_bytes().get(1), Some(b'@' | b'$' | b'/'));
        match (is_marker, tail.find('>')) {
            (true, Some(gt)) => rest = &tail[gt + 1..],
            _ => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out.lines().map(str::trim_end).collect::<Vec<_>>().join("\n").trim().to_string()
}

/// "blue-poison" → "Blue Poison", "SilverAsh" → "Silverash". Used for display and as a
/// lookup key, so both sides of a comparison must go through it.
pub fn title_case(s: &str) -> String {
    let spaced = normalize_ws(&s.replace(['-', '_'], " "));
    spaced
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => s!(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// "Blue Poison" → "blue-poison"
pub fn slug(s: &str) -> String {
    normalize_ws(&s.replace('_', " ")).to_lowercase().replace(' ', "-")
}
