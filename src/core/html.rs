// src/core/html.rs
// Tolerant, case-insensitive HTML slicing. No DOM; just enough structure
// to find class-tagged blocks and pull their text out.

use super::sanitize::{normalize_entities, normalize_ws};

/// ASCII-only lowercase, so byte offsets stay valid against the original.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}

/* ---------- class-tagged blocks ---------- */

/// Position of the next `<tag` opener at or after `from` (lowercased input),
/// rejecting prefixes like `<divider` when asking for `<div`.
fn find_open(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = format!("<{tag}");
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(&pat) {
        let at = pos + rel;
        match lc.as_bytes().get(at + pat.len()) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
            None => return None,
            _ => pos = at + pat.len(),
        }
    }
    None
}

/// Byte offset just past the `</tag>` that balances an opener ending at `open_end`.
fn balanced_end(lc: &str, tag: &str, open_end: usize) -> Option<usize> {
    let close = format!("</{tag}");
    let mut depth = 1usize;
    let mut pos = open_end;
    loop {
        let next_close = lc.get(pos..)?.find(&close).map(|r| pos + r)?;
        match find_open(lc, tag, pos) {
            Some(o) if o < next_close => {
                depth += 1;
                pos = o + tag.len() + 1;
            }
            _ => {
                depth -= 1;
                let gt = lc[next_close..].find('>')? + next_close + 1;
                if depth == 0 {
                    return Some(gt);
                }
                pos = gt;
            }
        }
    }
}

/// True when the opening tag text carries `class` as one of its classes.
pub fn has_class(open_tag: &str, class: &str) -> bool {
    attr(open_tag, "class")
        .map(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

/// Attribute value from an opening tag; quoted or bare.
pub fn attr(open_tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(open_tag);
    let pat = format!("{}=", to_lower(name));
    let mut from = 0usize;
    let at = loop {
        let rel = lc.get(from..)?.find(&pat)?;
        let at = from + rel;
        // must be a whole attribute name, not the tail of e.g. `data-class=`
        let prev = if at == 0 { b' ' } else { lc.as_bytes()[at - 1] };
        if prev.is_ascii_whitespace() {
            break at;
        }
        from = at + pat.len();
    };
    let rest = &open_tag[at + pat.len()..];
    let value = match rest.chars().next()? {
        q @ ('"' | '\'') => {
            let end = rest[1..].find(q)?;
            &rest[1..1 + end]
        }
        _ => {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
                .unwrap_or(rest.len());
            &rest[..end]
        }
    };
    Some(normalize_entities(value))
}

/// Every balanced `<tag class="… class …">…</tag>` block in document order.
/// Blocks nested inside an earlier match are skipped.
pub fn class_blocks<'a>(doc: &'a str, tag: &str, class: &str) -> Vec<&'a str> {
    let lc = to_lower(doc);
    let tag = to_lower(tag);
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some(start) = find_open(&lc, &tag, pos) {
        let Some(open_end) = lc[start..].find('>').map(|r| start + r + 1) else { break };
        if !has_class(&doc[start..open_end], class) {
            pos = open_end;
            continue;
        }
        match balanced_end(&lc, &tag, open_end) {
            Some(end) => {
                out.push(&doc[start..end]);
                pos = end;
            }
            None => {
                // unterminated; take the rest and stop
                out.push(&doc[start..]);
                break;
            }
        }
    }
    out
}

pub fn first_class_block<'a>(doc: &'a str, tag: &str, class: &str) -> Option<&'a str> {
    class_blocks(doc, tag, class).into_iter().next()
}

/// Opening tags (`<img …>`) of the given name inside a block.
pub fn open_tags<'a>(block: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = to_lower(block);
    let tag = to_lower(tag);
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(start) = find_open(&lc, &tag, pos) {
        let Some(end) = lc[start..].find('>').map(|r| start + r + 1) else { break };
        out.push(&block[start..end]);
        pos = end;
    }
    out
}

/// Text runs between tags, entity-decoded, whitespace-collapsed, empties dropped.
/// Roughly what a DOM's "stripped strings" walk yields.
pub fn text_chunks(block: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = s!();
    let mut in_tag = false;

    fn flush(cur: &mut String, out: &mut Vec<String>) {
        let t = normalize_ws(&normalize_entities(cur));
        if !t.is_empty() {
            out.push(t);
        }
        cur.clear();
    }

    for ch in block.chars() {
        match ch {
            '<' => {
                flush(&mut cur, &mut out);
                in_tag = true;
            }
            '>' => in_tag = false,
            _ if !in_tag => cur.push(ch),
            _ => {}
        }
    }
    flush(&mut cur, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <div class="skill-cell">
          <div class="skill-title-cell"> Charge  Gamma </div>
          <div class="skill-upgrade-tab-10"><div>30</div></div>
        </div>
        <DIV class='skill-cell other'>Second</DIV>
        <divider class="skill-cell">nope</divider>
    "#;

    #[test]
    fn class_blocks_balance_nested_divs() {
        let blocks = class_blocks(PAGE, "div", "skill-cell");
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("skill-upgrade-tab-10"));
        assert!(blocks[0].trim_end().ends_with("</div>"));
        assert_eq!(text_chunks(blocks[1]), vec!["Second"]);
    }

    #[test]
    fn first_block_and_chunks() {
        let title = first_class_block(PAGE, "div", "skill-title-cell").unwrap();
        assert_eq!(text_chunks(title), vec!["Charge Gamma"]);
    }

    #[test]
    fn attr_reads_quoted_and_bare() {
        assert_eq!(attr(r#"<img src="a.png" alt='E1'>"#, "alt").as_deref(), Some("E1"));
        assert_eq!(attr("<div class=rarity-cell>", "class").as_deref(), Some("rarity-cell"));
        assert_eq!(attr(r#"<div data-class="x">"#, "class"), None);
    }

    #[test]
    fn open_tags_counts_images() {
        let cell = r#"<div class="rarity-cell"><img src=1><img src=2 /><IMG src=3></div>"#;
        assert_eq!(open_tags(cell, "img").len(), 3);
    }

    #[test]
    fn strip_tags_decodes_and_collapses() {
        assert_eq!(strip_tags("<b>Rock&nbsp;&amp;  Roll</b>\n"), "Rock & Roll");
    }
}
