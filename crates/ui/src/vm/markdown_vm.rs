use std::collections::{HashMap, HashSet};

/// Render assistant chat text into sanitized markup.
///
/// Only the subset the interview model actually emits is understood: `**bold**`
/// spans and bullet lines. Everything else passes through with newlines turned
/// into line breaks.
#[must_use]
pub fn assistant_html(text: &str) -> String {
    sanitize_html(&render_assistant_markdown(text))
}

enum Block {
    Line(String),
    List(Vec<String>),
}

/// Unsanitized subset renderer behind [`assistant_html`].
#[must_use]
pub fn render_assistant_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut blocks: Vec<Block> = Vec::new();
    let mut pending_blank = 0usize;

    // A single trailing newline ends the last line; it adds no break.
    for raw in text.lines() {
        let line = embolden(raw);
        if let Some(item) = bullet_item(&line) {
            if let Some(Block::List(items)) = blocks.last_mut() {
                // Blank lines between bullets do not split the list.
                pending_blank = 0;
                items.push(item.to_string());
                continue;
            }
            flush_blank(&mut blocks, &mut pending_blank);
            blocks.push(Block::List(vec![item.to_string()]));
        } else if line.trim().is_empty() && matches!(blocks.last(), Some(Block::List(_))) {
            pending_blank += 1;
        } else {
            flush_blank(&mut blocks, &mut pending_blank);
            blocks.push(Block::Line(line));
        }
    }
    flush_blank(&mut blocks, &mut pending_blank);

    let mut html = String::with_capacity(text.len() + 32);
    let mut previous_was_line = false;
    for block in blocks {
        match block {
            Block::Line(line) => {
                if previous_was_line {
                    html.push_str("<br>");
                }
                html.push_str(&line);
                previous_was_line = true;
            }
            Block::List(items) => {
                html.push_str("<ul>");
                for item in items {
                    html.push_str("<li>");
                    html.push_str(&item);
                    html.push_str("</li>");
                }
                html.push_str("</ul>");
                previous_was_line = false;
            }
        }
    }
    html
}

fn flush_blank(blocks: &mut Vec<Block>, pending: &mut usize) {
    for _ in 0..*pending {
        blocks.push(Block::Line(String::new()));
    }
    *pending = 0;
}

fn bullet_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix('•') {
        return Some(rest.trim_start());
    }
    ['-', '*']
        .into_iter()
        .filter_map(|marker| trimmed.strip_prefix(marker))
        .find(|rest| rest.starts_with(char::is_whitespace))
        .map(str::trim_start)
}

/// Replace `**text**` pairs on one line, leftmost and shortest first.
fn embolden(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 16);
    let mut rest = line;
    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**") else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str("<strong>");
        out.push_str(&after_open[..close]);
        out.push_str("</strong>");
        rest = &after_open[close + 2..];
    }
    out.push_str(rest);
    out
}

/// Full CommonMark rendering for retrieval answers and reports.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);
    options.insert(pulldown_cmark::Options::ENABLE_TASKLISTS);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "del", "code", "pre", "blockquote",
        "ul", "ol", "li", "a", "h1", "h2", "h3", "h4", "hr", "table", "thead", "tbody", "tr",
        "th", "td",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}
