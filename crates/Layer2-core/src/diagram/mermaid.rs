//! Mermaid block normalization
//!
//! Inside each ```` ```mermaid ```` block:
//! - node definitions `id[label]` get an `[A-Za-z0-9_]` id and a label
//!   without `( ) @ : < > &`
//! - bare ids on either side of a link marker get the same id treatment
//! - directive, comment, `subgraph` and `end` lines are left alone
//!
//! This is a line scanner, not a parser. Malformed input is copied through.
//! Running it twice gives the same text as running it once.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Characters removed from node labels
pub const LABEL_FORBIDDEN: &[char] = &['(', ')', '@', ':', '<', '>', '&'];

lazy_static! {
    static ref MERMAID_BLOCK: Regex = Regex::new(r"(?s)(```mermaid(?:js)?[ \t]*\r?\n)(.*?)(```)")
        .expect("invalid MERMAID_BLOCK regex");
    static ref PASSTHROUGH: Regex = Regex::new(
        r"^\s*(?:%%|(?:flowchart|graph|subgraph|direction|classDef|class|style|linkStyle|click|sequenceDiagram|classDiagram|stateDiagram(?:-v2)?|erDiagram|gantt|pie|journey|gitGraph|mindmap|timeline)(?:\s|$))"
    )
    .expect("invalid PASSTHROUGH regex");
}

/// Characters that may precede a link target (after optional spaces)
const LINK_BEFORE: &[char] = &['>', '-', '=', '~', '|', '&'];
/// Characters that may follow a link source (after optional spaces)
const LINK_AFTER: &[char] = &['-', '=', '<', '~', '&'];

/// Longest opening run considered for a node shape, e.g. `(((`
const MAX_SHAPE_RUN: usize = 3;

/// Sanitize every Mermaid block in `text`
pub fn sanitize(text: &str) -> String {
    to_fixpoint(text, |text| {
        MERMAID_BLOCK
            .replace_all(text, |caps: &Captures| {
                format!("{}{}{}", &caps[1], sanitize_block_once(&caps[2]), &caps[3])
            })
            .into_owned()
    })
}

/// Sanitize the body of one block (the text between the fences)
pub fn sanitize_block(block: &str) -> String {
    to_fixpoint(block, sanitize_block_once)
}

/// Repeat `pass` until the text stops changing. A pass only deletes
/// characters or turns `-` into `_`, so this terminates.
fn to_fixpoint(text: &str, pass: impl Fn(&str) -> String) -> String {
    let mut current = pass(text);
    loop {
        let next = pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_block_once(block: &str) -> String {
    block
        .split_inclusive('\n')
        .map(|line| {
            let body = line.trim_end_matches(['\r', '\n']);
            let eol = &line[body.len()..];
            if is_passthrough(body) {
                line.to_string()
            } else {
                sanitize_line(body) + eol
            }
        })
        .collect()
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`
pub fn normalize_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Drop [`LABEL_FORBIDDEN`] characters
pub fn strip_label(label: &str) -> String {
    label.chars().filter(|c| !LABEL_FORBIDDEN.contains(c)).collect()
}

fn is_passthrough(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed == "end" || PASSTHROUGH.is_match(line)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn closing_for(open: char) -> Option<char> {
    match open {
        '[' => Some(']'),
        '(' => Some(')'),
        '{' => Some('}'),
        _ => None,
    }
}

fn sanitize_line(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Quoted strings and |edge text| are copied as-is
        if c == '"' || c == '|' {
            let end = find_char(&chars, i + 1, c).map_or(chars.len(), |j| j + 1);
            out.extend(&chars[i..end]);
            i = end;
            continue;
        }

        if !is_ident_char(c) {
            out.push(c);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && is_ident_char(chars[i]) {
            i += 1;
        }
        let run: String = chars[start..i].iter().collect();
        let before_label = chars.get(i).and_then(|c| closing_for(*c)).is_some();
        let pieces = split_run(&run, before_label);
        let last = pieces.len().saturating_sub(1);

        for (k, piece) in pieces.iter().enumerate() {
            let Piece::Ident(text) = piece else {
                out.push_str(piece.text());
                continue;
            };

            if k == last && before_label {
                out.push_str(&normalize_id(text));
                i = rewrite_label(&chars, i, &mut out);
                continue;
            }

            let linked_inside = (k > 0 && matches!(pieces[k - 1], Piece::Link(_)))
                || (k < last && matches!(pieces[k + 1], Piece::Link(_)));
            let linked_before = k == 0 && neighbor_before(&chars, start).map_or(false, |c| LINK_BEFORE.contains(&c));
            let linked_after = k == last && neighbor_after(&chars, i).map_or(false, |c| LINK_AFTER.contains(&c));

            if linked_inside || linked_before || linked_after {
                out.push_str(&normalize_id(text));
            } else {
                out.push_str(text);
            }
        }
    }

    out
}

/// Part of a maximal `[A-Za-z0-9_-]` run
#[derive(Debug, PartialEq)]
enum Piece<'a> {
    Ident(&'a str),
    /// Hyphens belonging to a link marker
    Link(&'a str),
}

impl<'a> Piece<'a> {
    fn text(&self) -> &'a str {
        match self {
            Piece::Ident(s) | Piece::Link(s) => s,
        }
    }
}

/// Split a run at hyphen groups of two or more (`-->`, `---`), and peel
/// hyphens off the ends of what remains: ids never start with `-`, and end
/// with one only when a label follows (`A-[x]`).
fn split_run(run: &str, before_label: bool) -> Vec<Piece<'_>> {
    let bytes = run.as_bytes();
    let mut segments: Vec<Piece<'_>> = Vec::new();
    let mut seg_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'-' {
            i += 1;
            continue;
        }
        let mut j = i;
        while j < bytes.len() && bytes[j] == b'-' {
            j += 1;
        }
        if j - i >= 2 {
            push_segment(&mut segments, &run[seg_start..i], false);
            segments.push(Piece::Link(&run[i..j]));
            seg_start = j;
        }
        i = j;
    }
    push_segment(&mut segments, &run[seg_start..], before_label);
    segments
}

fn push_segment<'a>(pieces: &mut Vec<Piece<'a>>, segment: &'a str, keep_trailing: bool) {
    if segment.is_empty() {
        return;
    }
    let core = segment.trim_matches('-');
    if core.is_empty() {
        pieces.push(Piece::Link(segment));
        return;
    }
    let lead = segment.len() - segment.trim_start_matches('-').len();
    let mut trail_at = lead + core.len();
    if keep_trailing && segment.len() - trail_at == 1 {
        trail_at += 1;
    }
    let core = &segment[lead..trail_at];
    if lead > 0 {
        pieces.push(Piece::Link(&segment[..lead]));
    }
    pieces.push(Piece::Ident(core));
    if trail_at < segment.len() {
        pieces.push(Piece::Link(&segment[trail_at..]));
    }
}

/// Rewrite the label that opens at `open_at`; returns the index after it.
///
/// The closing delimiter mirrors the whole opening run (`([` closes with
/// `])`). When that is missing, only the first opening character is paired.
/// An unclosed label is copied through untouched.
fn rewrite_label(chars: &[char], open_at: usize, out: &mut String) -> usize {
    let mut run_end = open_at;
    while run_end < chars.len()
        && run_end - open_at < MAX_SHAPE_RUN
        && closing_for(chars[run_end]).is_some()
    {
        run_end += 1;
    }

    let candidates = [run_end, open_at + 1];
    for body_start in candidates {
        if body_start <= open_at || body_start > chars.len() {
            continue;
        }
        let close: Vec<char> = chars[open_at..body_start]
            .iter()
            .rev()
            .filter_map(|c| closing_for(*c))
            .collect();
        if let Some(close_at) = find_seq(chars, body_start, &close) {
            let label: String = chars[body_start..close_at].iter().collect();
            out.extend(&chars[open_at..body_start]);
            out.push_str(&strip_label(&label));
            out.extend(&close);
            return close_at + close.len();
        }
    }

    out.extend(&chars[open_at..]);
    chars.len()
}

/// First index >= `from` where `needle` starts, ignoring quoted text
fn find_seq(chars: &[char], from: usize, needle: &[char]) -> Option<usize> {
    let mut i = from;
    let mut quoted = false;
    while i + needle.len() <= chars.len() {
        if chars[i] == '"' {
            quoted = !quoted;
        } else if !quoted && chars[i..].starts_with(needle) {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn find_char(chars: &[char], from: usize, target: char) -> Option<usize> {
    chars
        .iter()
        .skip(from)
        .position(|c| *c == target)
        .map(|p| p + from)
}

fn neighbor_before(chars: &[char], index: usize) -> Option<char> {
    chars[..index].iter().rev().find(|c| !c.is_whitespace()).copied()
}

fn neighbor_after(chars: &[char], index: usize) -> Option<char> {
    chars[index..].iter().find(|c| !c.is_whitespace()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(body: &str) -> String {
        format!("Intro (keep: this)\n\n```mermaid\n{}```\n\nOutro <b>", body)
    }

    #[test]
    fn test_node_id_and_label() {
        let out = sanitize(&block("flowchart TD\n    User-Auth[Check (valid)] --> Done\n"));
        assert!(out.contains("    User_Auth[Check valid] --> Done\n"), "{}", out);
    }

    #[test]
    fn test_text_outside_blocks_untouched() {
        let out = sanitize(&block("graph LR\n    A --> B\n"));
        assert!(out.starts_with("Intro (keep: this)\n\n```mermaid\n"));
        assert!(out.ends_with("```\n\nOutro <b>"));
        assert_eq!(sanitize("plain (text) with A-B --> C-D"), "plain (text) with A-B --> C-D");
    }

    #[test]
    fn test_label_strips_forbidden_characters() {
        let out = sanitize_block("    S1[$user->save() @ 10:00 & more]\n");
        assert_eq!(out, "    S1[$user-save  1000  more]\n");
    }

    #[test]
    fn test_shapes() {
        assert_eq!(sanitize_line("db-1[(Main: DB)]"), "db_1[(Main DB)]");
        assert_eq!(sanitize_line("s-1([Start <here>])"), "s_1([Start here])");
        assert_eq!(sanitize_line("c((Circle))"), "c((Circle))");
        assert_eq!(sanitize_line("d-x{Is it (ok)?}"), "d_x{Is it ok?}");
        assert_eq!(sanitize_line("h{{Hex @ 1}}"), "h{{Hex  1}}");
        // looks like a cylinder but only the bracket closes
        assert_eq!(sanitize_line("A[(valid) thing]"), "A[valid thing]");
    }

    #[test]
    fn test_edges_normalize_both_sides() {
        assert_eq!(sanitize_line("User-Auth --> Other-Node"), "User_Auth --> Other_Node");
        assert_eq!(sanitize_line("a-b-->c-d"), "a_b-->c_d");
        assert_eq!(sanitize_line("a-b---c-d"), "a_b---c_d");
        assert_eq!(sanitize_line("a-b -.-> c-d"), "a_b -.-> c_d");
        assert_eq!(sanitize_line("a-b ==> c-d & e-f"), "a_b ==> c_d & e_f");
        assert_eq!(
            sanitize_line("in-put -->|calls (x)| out-put[Out: put]"),
            "in_put -->|calls (x)| out_put[Out put]"
        );
    }

    #[test]
    fn test_whole_token_matching() {
        // `Auth` is a substring of `User-Auth` but a separate node
        assert_eq!(
            sanitize_line("Auth --> User-Auth --> Auth-Service"),
            "Auth --> User_Auth --> Auth_Service"
        );
    }

    #[test]
    fn test_passthrough_lines() {
        let body = "%% a comment (with: stuff)\nflowchart TD\n  subgraph Web-Layer (HTTP)\n  A-1 --> B\n  end\n  classDef hot fill:#f96\n  style A-1 fill:#bbf\n";
        let out = sanitize_block(body);
        assert_eq!(
            out,
            "%% a comment (with: stuff)\nflowchart TD\n  subgraph Web-Layer (HTTP)\n  A_1 --> B\n  end\n  classDef hot fill:#f96\n  style A-1 fill:#bbf\n"
        );
    }

    #[test]
    fn test_quoted_label_with_bracket() {
        assert_eq!(
            sanitize_line(r#"n-1["a]b (c)"] --> n-2"#),
            r#"n_1["a]b c"] --> n_2"#
        );
    }

    #[test]
    fn test_malformed_is_tolerated() {
        assert_eq!(sanitize_line("A-1[unclosed (label"), "A_1[unclosed (label");
        assert_eq!(sanitize_line("-->"), "-->");
        assert_eq!(sanitize_line("|dangling"), "|dangling");
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("```mermaid\n"), "```mermaid\n");
    }

    #[test]
    fn test_mermaidjs_fence_and_multiple_blocks() {
        let text = "```mermaidjs\nA-1[x:y]\n```\ntext\n```mermaid\nB-2 --> C-3\n```\n```rust\nlet a-b = c;\n```";
        assert_eq!(
            sanitize(text),
            "```mermaidjs\nA_1[xy]\n```\ntext\n```mermaid\nB_2 --> C_3\n```\n```rust\nlet a-b = c;\n```"
        );
    }

    #[test]
    fn test_crlf_line_endings_preserved() {
        assert_eq!(sanitize_block("A-1[a:b]\r\nend\r\n"), "A_1[ab]\r\nend\r\n");
    }

    #[test]
    fn test_stripping_that_exposes_a_new_shape() {
        // `(&[` only reads as the `([` stadium once `&` is gone
        assert_eq!(sanitize_line("A(&[x)])"), "A([x)])");
        assert_eq!(sanitize_block("A(&[x)])\n"), "A([x])\n");
        let once = sanitize_block("(_(&[).:%])\n");
        assert_eq!(sanitize_block(&once), once);
    }

    /// xorshift64, enough to spread test inputs
    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0
        }

        fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
            items[(self.next() % items.len() as u64) as usize]
        }
    }

    #[test]
    fn test_idempotent_on_generated_diagrams() {
        const TOKENS: &[&str] = &[
            "a", "B", "1", "_", "-", " ", "->", "=", ".", "|", "\"", "[", "]", "(", ")", "{", "}",
            "@", ":", "<", ">", "&", "\n", "%", "-->", "graph", "end", "subgraph ", "style-",
        ];
        let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);

        for _ in 0..20_000 {
            let len = (rng.next() % 24) as usize;
            let body: String = (0..len).map(|_| rng.pick(TOKENS)).collect();
            let input = block(&format!("{}\n", body));

            let once = sanitize(&input);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", body);
        }
    }

    #[test]
    fn test_idempotent_outside_and_across_blocks() {
        let inputs = [
            "no diagram here".to_string(),
            block("graph LR\n  A[(valid) thing] -->|x| B((o(k)))\n  C[[a]b]] -.- D-1\n"),
            block("sequenceDiagram\n  Alice-Smith->>Bob: hi (there)\n"),
        ];
        for input in inputs {
            let once = sanitize(&input);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_keyword_prefixed_ids_are_sanitized() {
        assert_eq!(
            sanitize_block("  graph-db[(Graph: DB)] --> api\n"),
            "  graph_db[(Graph DB)] --> api\n"
        );
        assert_eq!(
            sanitize_block("class-loader --> style-guide[Guide: v2]\n"),
            "class_loader --> style_guide[Guide v2]\n"
        );
        // the keywords themselves still pass through
        let body = "graph TD\nflowchart\nstateDiagram-v2\nclick A-1 call(x)\n";
        assert_eq!(sanitize_block(body), body);
    }

    #[test]
    fn test_trailing_hyphen_before_label() {
        assert_eq!(sanitize_line("A-[x (y)]"), "A_[x y]");
        assert_eq!(sanitize_line("a --> b-(c: d)"), "a --> b_(c d)");
        // no label: the hyphen stays part of the link
        assert_eq!(sanitize_line("Alice- x"), "Alice- x");
    }

    #[test]
    fn test_split_run() {
        assert_eq!(split_run("A", false), vec![Piece::Ident("A")]);
        assert_eq!(split_run("User-Auth", false), vec![Piece::Ident("User-Auth")]);
        assert_eq!(
            split_run("A--", true),
            vec![Piece::Ident("A"), Piece::Link("--")]
        );
        assert_eq!(
            split_run("a-b---c", false),
            vec![Piece::Ident("a-b"), Piece::Link("---"), Piece::Ident("c")]
        );
        assert_eq!(split_run("Alice-", false), vec![Piece::Ident("Alice"), Piece::Link("-")]);
        assert_eq!(split_run("Alice-", true), vec![Piece::Ident("Alice-")]);
        assert_eq!(split_run("-", true), vec![Piece::Link("-")]);
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("User-Auth"), "User_Auth");
        assert_eq!(normalize_id("ok_1"), "ok_1");
    }
}
