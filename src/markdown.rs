//! Markdown rendering for final answers.
//!
//! Streamed responses are shown raw while they arrive, then erased and
//! replaced with this formatted rendering. The renderer walks pulldown-cmark
//! events and emits ANSI-styled text; with color disabled it degrades to
//! plain text with the same layout.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// ANSI escape code for bold text.
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text.
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for italic text.
const ANSI_ITALIC: &str = "\x1b[3m";

/// ANSI escape code for underlined text.
const ANSI_UNDERLINE: &str = "\x1b[4m";

/// ANSI escape code for struck-through text.
const ANSI_STRIKETHROUGH: &str = "\x1b[9m";

/// ANSI escape code for cyan text (inline code).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Indentation for code blocks.
const CODE_INDENT: &str = "    ";

/// Bullet for unordered list items.
const LIST_BULLET: &str = "• ";

/// Render Markdown to ANSI-styled terminal text.
///
/// The result ends with a single newline. When `use_color` is false the
/// output carries no escape sequences.
pub fn render_markdown(text: &str, use_color: bool) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    let parser = Parser::new_ext(text, options);

    let mut out = String::new();
    let mut styles: Vec<&'static str> = Vec::new();
    let mut list_stack: Vec<Option<u64>> = Vec::new();
    let mut in_code_block = false;
    let mut code_block = String::new();
    let mut link_url = String::new();

    // Table state
    let mut in_table = false;
    let mut table_row: Vec<String> = Vec::new();
    let mut table_cell = String::new();

    let emit_styled = |out: &mut String, styles: &[&'static str], text: &str| {
        if use_color && !styles.is_empty() {
            for style in styles {
                out.push_str(style);
            }
            out.push_str(text);
            out.push_str(ANSI_RESET);
        } else {
            out.push_str(text);
        }
    };

    for event in parser {
        match event {
            Event::Start(tag) => match tag {
                Tag::Paragraph => {}
                Tag::Heading { .. } => {
                    styles.push(ANSI_BOLD);
                    styles.push(ANSI_UNDERLINE);
                }
                Tag::BlockQuote(_) => {
                    styles.push(ANSI_DIM);
                    styles.push(ANSI_ITALIC);
                }
                Tag::CodeBlock(_) => {
                    in_code_block = true;
                    code_block.clear();
                }
                Tag::List(start) => {
                    list_stack.push(start);
                }
                Tag::Item => {
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                    let indent = "  ".repeat(list_stack.len().saturating_sub(1));
                    out.push_str(&indent);
                    match list_stack.last_mut() {
                        Some(Some(number)) => {
                            out.push_str(&format!("{number}. "));
                            *number += 1;
                        }
                        _ => out.push_str(LIST_BULLET),
                    }
                }
                Tag::Emphasis => styles.push(ANSI_ITALIC),
                Tag::Strong => styles.push(ANSI_BOLD),
                Tag::Strikethrough => styles.push(ANSI_STRIKETHROUGH),
                Tag::Link { dest_url, .. } => {
                    link_url = dest_url.to_string();
                    styles.push(ANSI_UNDERLINE);
                }
                Tag::Image { dest_url, .. } => {
                    link_url = dest_url.to_string();
                    styles.push(ANSI_DIM);
                }
                Tag::Table(_) => {
                    in_table = true;
                }
                Tag::TableHead | Tag::TableRow => {
                    table_row.clear();
                }
                Tag::TableCell => {
                    table_cell.clear();
                }
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Paragraph => {
                    if !in_table {
                        out.push_str("\n\n");
                    }
                }
                TagEnd::Heading(_) => {
                    styles.pop();
                    styles.pop();
                    out.push_str("\n\n");
                }
                TagEnd::BlockQuote(_) => {
                    styles.pop();
                    styles.pop();
                }
                TagEnd::CodeBlock => {
                    in_code_block = false;
                    for line in code_block.lines() {
                        out.push_str(CODE_INDENT);
                        emit_styled(&mut out, &[ANSI_DIM], line);
                        out.push('\n');
                    }
                    out.push('\n');
                }
                TagEnd::List(_) => {
                    list_stack.pop();
                    if list_stack.is_empty() {
                        out.push('\n');
                    }
                }
                TagEnd::Item => {
                    if !out.ends_with('\n') {
                        out.push('\n');
                    }
                }
                TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                    styles.pop();
                }
                TagEnd::Link => {
                    styles.pop();
                    if !link_url.is_empty() {
                        emit_styled(&mut out, &[ANSI_DIM], &format!(" ({link_url})"));
                        link_url.clear();
                    }
                }
                TagEnd::Image => {
                    styles.pop();
                    if !link_url.is_empty() {
                        emit_styled(&mut out, &[ANSI_DIM], &format!(" ({link_url})"));
                        link_url.clear();
                    }
                }
                TagEnd::TableHead | TagEnd::TableRow => {
                    let joined = table_row.join(" | ");
                    out.push_str(&joined);
                    out.push('\n');
                }
                TagEnd::TableCell => {
                    table_row.push(std::mem::take(&mut table_cell));
                }
                TagEnd::Table => {
                    in_table = false;
                    out.push('\n');
                }
                _ => {}
            },
            Event::Text(text) => {
                if in_code_block {
                    code_block.push_str(&text);
                } else if in_table {
                    table_cell.push_str(&text);
                } else {
                    emit_styled(&mut out, &styles, &text);
                }
            }
            Event::Code(code) => {
                if in_table {
                    table_cell.push_str(&code);
                } else {
                    emit_styled(&mut out, &[ANSI_CYAN], &code);
                }
            }
            Event::SoftBreak => {
                if in_table {
                    table_cell.push(' ');
                } else {
                    out.push('\n');
                }
            }
            Event::HardBreak => out.push('\n'),
            Event::Rule => {
                emit_styled(&mut out, &[ANSI_DIM], &"─".repeat(40));
                out.push_str("\n\n");
            }
            Event::TaskListMarker(checked) => {
                out.push_str(if checked { "[x] " } else { "[ ] " });
            }
            _ => {}
        }
    }

    let trimmed = out.trim_end_matches('\n');
    if trimmed.is_empty() {
        String::new()
    } else {
        let mut rendered = trimmed.to_string();
        rendered.push('\n');
        rendered
    }
}
