//! Summary extraction — one markdown document in, one wiki page out.
//!
//! Assumptions about how a wiki page is laid out:
//! 1. It opens with a heading. If not, the file name stands in as the title.
//! 2. A short summary follows the heading. Everything up to the next heading
//!    is taken and cut down to fit a Discord embed.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::markdown::{self, Block};
use crate::utils::truncate;
use crate::wiki::PageLinks;

/// Maximum summary length, in characters, before the footer is appended.
pub const SUMMARY_MAX_CHARS: usize = 1600;

/// Marker appended to a cut summary.
pub const TRUNCATION_SUFFIX: &str = "...";

/// Title and summary body pulled out of one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub title: String,
    /// Markdown summary, already truncated.
    pub body: String,
}

/// Extract the title and the "until next heading" summary of a document.
pub fn extract(markdown: &str, fallback_title: &str) -> Result<Summary> {
    let blocks = markdown::parse(markdown);

    let (title, rest) = match blocks.split_first() {
        Some((Block::Heading { text, .. }, rest)) if !text.is_empty() => (text.clone(), rest),
        Some((Block::Heading { .. }, rest)) => (fallback_title.to_string(), rest),
        _ => (fallback_title.to_string(), blocks.as_slice()),
    };

    let summary_blocks = rest.iter().take_while(|block| !block.is_heading());
    let rendered = markdown::render(summary_blocks)?;

    Ok(Summary {
        title,
        body: truncate(&rendered, SUMMARY_MAX_CHARS, TRUNCATION_SUFFIX),
    })
}

/// The "Read more | Edit" line closing every page card.
pub fn footer(links: &PageLinks) -> String {
    format!(
        "📰 [Read more]({}) | ✏️ [Edit]({})",
        links.read, links.edit
    )
}

/// A wiki page ready to become a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WikiPage {
    pub title: String,
    /// Summary followed by a blank line and the footer.
    pub body: String,
    /// Link target of the card (the rendered page on the forge).
    pub url: String,
    /// Source file the page was built from.
    pub path: PathBuf,
}

impl WikiPage {
    /// Build a page from already-read markdown.
    pub fn from_markdown(markdown: &str, path: &Path, links: &PageLinks) -> Result<Self> {
        let summary = extract(markdown, &fallback_title(path))?;
        let body = [summary.body, footer(links)].join("\n\n");

        Ok(Self {
            title: summary.title,
            body,
            url: links.read.clone(),
            path: path.to_path_buf(),
        })
    }
}

/// File name without its extension.
pub fn fallback_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> PageLinks {
        PageLinks {
            read: "https://github.com/acme/app/blob/main/wiki/Home.md".into(),
            edit: "https://github.com/acme/app/edit/main/wiki/Home.md".into(),
        }
    }

    #[test]
    fn test_heading_title_and_slice_until_next_heading() {
        let md = "# Title\n\nSummary text.\n\n## More\nignored";
        let summary = extract(md, "x").unwrap();
        assert_eq!(summary.title, "Title");
        assert_eq!(summary.body, "Summary text.");
        assert!(!summary.body.contains("ignored"));
    }

    #[test]
    fn test_no_heading_uses_fallback_and_all_blocks() {
        let md = "First paragraph.\n\n- one\n- two\n\nLast paragraph.\n";
        let summary = extract(md, "notes").unwrap();
        assert_eq!(summary.title, "notes");
        assert!(summary.body.starts_with("First paragraph."));
        assert!(summary.body.contains("one"));
        assert!(summary.body.contains("two"));
        assert!(summary.body.ends_with("Last paragraph."));
    }

    #[test]
    fn test_no_leading_heading_stops_at_first_heading() {
        let md = "Intro.\n\n# Later heading\n\nafter\n";
        let summary = extract(md, "page").unwrap();
        assert_eq!(summary.title, "page");
        assert_eq!(summary.body, "Intro.");
    }

    #[test]
    fn test_any_heading_level_is_a_title() {
        let summary = extract("### Small title\n\nBody.\n", "x").unwrap();
        assert_eq!(summary.title, "Small title");
        assert_eq!(summary.body, "Body.");
    }

    #[test]
    fn test_heading_only_document() {
        let summary = extract("# Lonely\n", "x").unwrap();
        assert_eq!(summary.title, "Lonely");
        assert_eq!(summary.body, "");
    }

    #[test]
    fn test_back_to_back_headings_give_empty_body() {
        let summary = extract("# A\n## B\n\ntext\n", "x").unwrap();
        assert_eq!(summary.title, "A");
        assert_eq!(summary.body, "");
    }

    #[test]
    fn test_empty_document() {
        let summary = extract("", "empty").unwrap();
        assert_eq!(summary.title, "empty");
        assert_eq!(summary.body, "");
    }

    #[test]
    fn test_empty_heading_falls_back_but_is_skipped() {
        let summary = extract("#\n\nBody.\n", "fallback").unwrap();
        assert_eq!(summary.title, "fallback");
        assert_eq!(summary.body, "Body.");
    }

    #[test]
    fn test_long_summary_is_truncated() {
        let md = format!("# Big\n\n{}\n", "lorem ipsum ".repeat(400));
        let summary = extract(&md, "x").unwrap();
        assert!(summary.body.chars().count() <= SUMMARY_MAX_CHARS);
        assert!(summary.body.ends_with(TRUNCATION_SUFFIX));
    }

    #[test]
    fn test_page_appends_footer_after_blank_line() {
        let page = WikiPage::from_markdown(
            "# Home\n\nWelcome.\n",
            Path::new("wiki/Home.md"),
            &links(),
        )
        .unwrap();
        assert_eq!(page.title, "Home");
        assert_eq!(
            page.body,
            "Welcome.\n\n📰 [Read more](https://github.com/acme/app/blob/main/wiki/Home.md) \
             | ✏️ [Edit](https://github.com/acme/app/edit/main/wiki/Home.md)"
        );
        assert_eq!(page.url, links().read);
        assert_eq!(page.path, PathBuf::from("wiki/Home.md"));
    }

    #[test]
    fn test_page_footer_survives_truncation() {
        let md = "word ".repeat(1000);
        let page = WikiPage::from_markdown(&md, Path::new("wiki/Long.md"), &links()).unwrap();
        assert_eq!(page.title, "Long");
        let (summary, tail) = page.body.split_once("\n\n").unwrap();
        assert!(summary.chars().count() <= SUMMARY_MAX_CHARS);
        assert_eq!(tail, footer(&links()));
    }

    #[test]
    fn test_fallback_title_strips_extension() {
        assert_eq!(fallback_title(Path::new("docs/Getting-Started.md")), "Getting-Started");
        assert_eq!(fallback_title(Path::new("notes")), "notes");
    }
}
