//! Interactive reader on stdin
//!
//! Loads run in spawned tasks and report back over a channel, so the reader
//! can keep navigating while a slow fetch is in flight. Results that arrive
//! after a newer navigation are dropped by the [`Navigator`].

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::content::ContentLoader;
use crate::render::{MarkdownRenderer, PlainElements};
use crate::view::{self, IndexView, LoadTicket, Navigator, Screen, ViewSettings};
use crate::Blog;

/// A line of reader input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Open(String),
    Back,
    Retry,
    Quit,
    Help,
    Nothing,
    Unknown(String),
}

/// Interpret a line; numbers pick from the last listed index
pub fn parse_input(line: &str, listed: &[String]) -> Input {
    let line = line.trim();
    match line {
        "" => Input::Nothing,
        "q" | "quit" | "exit" => Input::Quit,
        "b" | "back" => Input::Back,
        "r" | "retry" => Input::Retry,
        "h" | "help" | "?" => Input::Help,
        _ => match line.parse::<usize>() {
            Ok(n) if n >= 1 && n <= listed.len() => Input::Open(listed[n - 1].clone()),
            Ok(_) => Input::Unknown(line.to_string()),
            Err(_) if line.chars().any(char::is_whitespace) => Input::Unknown(line.to_string()),
            Err(_) => Input::Open(line.to_string()),
        },
    }
}

const HELP: &str = "Enter a number or slug to open a post, b to go back, r to retry, q to quit.";

type Loaded = (LoadTicket, Screen);

struct Browser {
    loader: ContentLoader,
    settings: ViewSettings,
    navigator: Navigator,
    renderer: MarkdownRenderer<PlainElements>,
    /// Slugs of the index as last shown, for numeric selection
    listed: Vec<String>,
    tx: mpsc::UnboundedSender<Loaded>,
}

impl Browser {
    fn new(
        loader: ContentLoader,
        settings: ViewSettings,
        tx: mpsc::UnboundedSender<Loaded>,
    ) -> (Self, LoadTicket) {
        let (navigator, ticket) = Navigator::new();
        let browser = Self {
            loader,
            settings,
            navigator,
            renderer: MarkdownRenderer::new(PlainElements),
            listed: Vec::new(),
            tx,
        };
        (browser, ticket)
    }

    /// Spawn the load for a ticket
    fn start(&self, ticket: LoadTicket) {
        let loader = self.loader.clone();
        let settings = self.settings.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let screen = view::load_screen(&loader, &settings, ticket.route()).await;
            // The receiver is gone only when the session has ended.
            let _ = tx.send((ticket, screen));
        });
    }

    /// Apply a finished load; false when it was stale
    fn apply(&mut self, ticket: &LoadTicket, screen: Screen) -> bool {
        if !self.navigator.complete(ticket, screen) {
            return false;
        }
        if let Screen::Index(index) = self.navigator.screen() {
            self.listed = match index {
                IndexView::Empty => Vec::new(),
                IndexView::Posts(posts) => posts.iter().map(|p| p.slug.clone()).collect(),
            };
        }
        true
    }

    fn render(&self) -> String {
        super::format_screen(self.navigator.screen(), &self.renderer)
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

/// Run the reader until `q` or end of input
pub async fn run(blog: &Blog) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (mut browser, ticket) = Browser::new(blog.loader()?, blog.view_settings(), tx);
    browser.start(ticket);
    println!("{}", browser.render().trim_end());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some((ticket, screen)) = rx.recv() => {
                if browser.apply(&ticket, screen) {
                    println!();
                    print!("{}", browser.render());
                    prompt()?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let ticket = match parse_input(&line, &browser.listed) {
                    Input::Quit => break,
                    Input::Nothing => {
                        prompt()?;
                        continue;
                    }
                    Input::Help => {
                        println!("{}", HELP);
                        prompt()?;
                        continue;
                    }
                    Input::Unknown(text) => {
                        println!("Unknown input {:?}. {}", text, HELP);
                        prompt()?;
                        continue;
                    }
                    Input::Open(slug) => browser.navigator.open(&slug),
                    Input::Back => browser.navigator.back(),
                    Input::Retry => browser.navigator.retry(),
                };
                println!("{}", browser.render().trim_end());
                browser.start(ticket);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ManifestReader, MemorySource};
    use crate::view::{PostView, Route};
    use std::sync::Arc;

    fn listed() -> Vec<String> {
        vec!["first".to_string(), "second".to_string()]
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_input("q", &[]), Input::Quit);
        assert_eq!(parse_input(" b \n", &[]), Input::Back);
        assert_eq!(parse_input("retry", &[]), Input::Retry);
        assert_eq!(parse_input("", &[]), Input::Nothing);
        assert_eq!(parse_input("?", &[]), Input::Help);
    }

    #[test]
    fn test_parse_numbers_pick_from_index() {
        assert_eq!(parse_input("2", &listed()), Input::Open("second".to_string()));
        assert_eq!(parse_input("3", &listed()), Input::Unknown("3".to_string()));
        assert_eq!(parse_input("0", &listed()), Input::Unknown("0".to_string()));
    }

    #[test]
    fn test_parse_slug() {
        assert_eq!(
            parse_input("railway-oriented", &listed()),
            Input::Open("railway-oriented".to_string())
        );
        assert_eq!(
            parse_input("two words", &listed()),
            Input::Unknown("two words".to_string())
        );
    }

    fn loader() -> ContentLoader {
        let manifest = ManifestReader::from_json(
            r#"{"posts": [
                {"slug": "a", "filename": "a.md", "frontmatter": {"title": "A", "date": "2024-06-01"}},
                {"slug": "b", "filename": "b.md", "frontmatter": {"title": "B", "date": "2024-01-01"}}
            ]}"#,
        );
        let source = MemorySource::new()
            .with_file("a.md", "# A\n")
            .with_file("b.md", "# B\n");
        ContentLoader::new(Arc::new(manifest), Arc::new(source))
    }

    #[tokio::test]
    async fn test_loads_report_back_and_index_is_listed() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (mut browser, ticket) = Browser::new(loader(), ViewSettings::default(), tx);
        browser.start(ticket);

        let (ticket, screen) = rx.recv().await.unwrap();
        assert!(browser.apply(&ticket, screen));
        assert_eq!(browser.listed, vec!["a", "b"]);
        assert!(browser.render().contains("Posts (2):"));
    }

    #[tokio::test]
    async fn test_stale_load_is_not_shown() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (mut browser, _) = Browser::new(loader(), ViewSettings::default(), tx);

        let first = browser.navigator.open("a");
        let second = browser.navigator.open("b");
        browser.start(first);
        let (ticket, screen) = rx.recv().await.unwrap();
        assert!(!browser.apply(&ticket, screen));
        assert!(browser.navigator.is_loading());

        browser.start(second);
        let (ticket, screen) = rx.recv().await.unwrap();
        assert!(browser.apply(&ticket, screen));
        assert_eq!(browser.navigator.route(), &Route::Post("b".to_string()));
        assert!(matches!(
            browser.navigator.screen(),
            Screen::Post(PostView::Ready(_))
        ));
    }
}
