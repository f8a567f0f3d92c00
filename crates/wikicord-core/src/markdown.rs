//! Markdown block model.
//!
//! A document is parsed with pulldown-cmark and grouped into its top-level
//! blocks. Each block keeps its own event stream so any slice of blocks can
//! be written back out as markdown with pulldown-cmark-to-cmark.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};
use pulldown_cmark_to_cmark::cmark;

/// One top-level block of a markdown document.
#[derive(Clone, Debug)]
pub enum Block {
    Heading {
        level: HeadingLevel,
        /// Plain text content of the heading.
        text: String,
        events: Vec<Event<'static>>,
    },
    Paragraph(Vec<Event<'static>>),
    List(Vec<Event<'static>>),
    /// Code blocks, quotes, tables, rules, HTML and anything else.
    Other(Vec<Event<'static>>),
}

impl Block {
    /// Classify a complete top-level event group by its opening event.
    fn from_events(events: Vec<Event<'static>>) -> Self {
        match events.first() {
            Some(Event::Start(Tag::Heading { level, .. })) => {
                let level = *level;
                let text = heading_text(&events);
                Block::Heading { level, text, events }
            }
            Some(Event::Start(Tag::Paragraph)) => Block::Paragraph(events),
            Some(Event::Start(Tag::List(_))) => Block::List(events),
            _ => Block::Other(events),
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// The raw events making up this block.
    pub fn events(&self) -> &[Event<'static>] {
        match self {
            Block::Heading { events, .. }
            | Block::Paragraph(events)
            | Block::List(events)
            | Block::Other(events) => events,
        }
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Split a markdown document into its top-level blocks, in order.
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Vec<Event<'static>> = Vec::new();
    let mut depth = 0usize;

    for event in Parser::new_ext(text, parser_options()) {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
        current.push(event.into_static());

        if depth == 0 {
            blocks.push(Block::from_events(std::mem::take(&mut current)));
        }
    }

    // Unbalanced trailing events cannot come out of the parser, but keep
    // them rather than silently dropping content.
    if !current.is_empty() {
        blocks.push(Block::Other(current));
    }

    blocks
}

/// Write a slice of blocks back out as markdown, trimmed.
///
/// The serializer opens a block quote with an empty `>` line; leading
/// lines of that shape are dropped.
pub fn render<'a, I>(blocks: I) -> Result<String, std::fmt::Error>
where
    I: IntoIterator<Item = &'a Block>,
{
    let mut out = String::new();
    cmark(
        blocks.into_iter().flat_map(|block| block.events().iter()),
        &mut out,
    )
    .map_err(|_| std::fmt::Error)?;

    let body: Vec<&str> = out
        .trim()
        .lines()
        .skip_while(|line| line.trim() == ">")
        .collect();
    Ok(body.join("\n").trim().to_string())
}

/// Concatenated text of a heading's inline content.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(blocks: &[Block]) -> Vec<&'static str> {
        blocks
            .iter()
            .map(|b| match b {
                Block::Heading { .. } => "heading",
                Block::Paragraph(_) => "paragraph",
                Block::List(_) => "list",
                Block::Other(_) => "other",
            })
            .collect()
    }

    #[test]
    fn test_parse_block_kinds() {
        let md = "# Title\n\nIntro.\n\n- a\n- b\n\n```\ncode\n```\n\n## Next\n";
        let blocks = parse(md);
        assert_eq!(
            kinds(&blocks),
            vec!["heading", "paragraph", "list", "other", "heading"]
        );
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
    }

    #[test]
    fn test_heading_text_and_level() {
        let blocks = parse("## Getting `started` **now**\n");
        match &blocks[0] {
            Block::Heading { level, text, .. } => {
                assert_eq!(*level, HeadingLevel::H2);
                assert_eq!(text, "Getting started now");
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn test_setext_heading() {
        let blocks = parse("Title\n=====\n\nbody\n");
        assert!(blocks[0].is_heading());
        assert_eq!(kinds(&blocks), vec!["heading", "paragraph"]);
    }

    #[test]
    fn test_thematic_break_is_other() {
        let blocks = parse("one\n\n---\n\ntwo\n");
        assert_eq!(kinds(&blocks), vec!["paragraph", "other", "paragraph"]);
    }

    #[test]
    fn test_nested_list_is_one_block() {
        let blocks = parse("- a\n  - nested\n- b\n");
        assert_eq!(kinds(&blocks), vec!["list"]);
    }

    #[test]
    fn test_render_paragraph() {
        let blocks = parse("Summary text.\n");
        assert_eq!(render(&blocks).unwrap(), "Summary text.");
    }

    #[test]
    fn test_render_slice_keeps_content() {
        let blocks = parse("First paragraph.\n\n- item one\n- item two\n\nLast.\n");
        let out = render(&blocks[..2]).unwrap();
        assert!(out.starts_with("First paragraph."));
        assert!(out.contains("item one"));
        assert!(out.contains("item two"));
        assert!(!out.contains("Last."));
    }

    #[test]
    fn test_render_block_quote_has_no_empty_first_line() {
        let blocks = parse("> quote\n");
        assert_eq!(render(&blocks).unwrap(), "> quote");
    }

    #[test]
    fn test_render_nothing() {
        let blocks: Vec<Block> = Vec::new();
        assert_eq!(render(&blocks).unwrap(), "");
    }
}
