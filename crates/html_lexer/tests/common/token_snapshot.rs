//! Deterministic token formatting for golden fixtures.
//!
//! One line per token in encounter order; adjacent character tokens coalesce
//! into a single `CHAR` line so fixtures stay readable.

use html_lexer::Token;

pub fn format_tokens(tokens: &[Token]) -> Vec<String> {
    let mut out = Vec::new();
    let mut text_run = String::new();
    for token in tokens {
        if let Token::Character(ch) = token {
            text_run.push(*ch);
            continue;
        }
        flush_text_run(&mut out, &mut text_run);
        match token {
            Token::Doctype(doctype) => {
                let public_id = doctype
                    .public_id
                    .as_ref()
                    .map_or_else(|| "null".to_string(), |s| format!("\"{}\"", escape_text(s)));
                let system_id = doctype
                    .system_id
                    .as_ref()
                    .map_or_else(|| "null".to_string(), |s| format!("\"{}\"", escape_text(s)));
                out.push(format!(
                    "DOCTYPE name={} public_id={public_id} system_id={system_id} force_quirks={}",
                    doctype.name, doctype.force_quirks
                ));
            }
            Token::StartTag(tag) => {
                let mut line = String::new();
                line.push_str("START name=");
                line.push_str(&tag.name);
                line.push_str(" attrs=[");
                for (i, attr) in tag.attrs.iter().enumerate() {
                    if i > 0 {
                        line.push(' ');
                    }
                    line.push_str(&attr.name);
                    line.push_str("=\"");
                    line.push_str(&escape_text(&attr.value));
                    line.push('"');
                }
                line.push_str("] self_closing=");
                line.push_str(if tag.self_closing { "true" } else { "false" });
                out.push(line);
            }
            Token::EndTag { name } => out.push(format!("END name={name}")),
            Token::Comment(text) => {
                out.push(format!("COMMENT text=\"{}\"", escape_text(text)));
            }
            Token::Character(_) => unreachable!("character tokens coalesce above"),
            Token::Eof => out.push("EOF".to_string()),
        }
    }
    flush_text_run(&mut out, &mut text_run);
    out
}

fn flush_text_run(out: &mut Vec<String>, text_run: &mut String) {
    if text_run.is_empty() {
        return;
    }
    out.push(format!("CHAR text=\"{}\"", escape_text(text_run)));
    text_run.clear();
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' || ch == '\u{7f}' => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}
