use anyhow::Result;
use log::debug;

use crate::{
    browser::{RepositoryBrowser, Visibility},
    github::ListRepositories,
    runtime::Runtime,
};

use super::config::Config;
use super::list::print_visible;

const PROMPT: &str = "filter> ";

/// One line of input in an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseEvent {
    /// `:all`, `:public`, `:private`
    Filter(Visibility),
    /// Any other line; an empty line clears the query
    Search(String),
    /// `:quit` or `:q`
    Quit,
    Unknown(String),
}

impl BrowseEvent {
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.strip_prefix(':') else {
            return BrowseEvent::Search(line.to_string());
        };

        match command.trim() {
            "quit" | "q" => BrowseEvent::Quit,
            other => other
                .parse::<Visibility>()
                .map(BrowseEvent::Filter)
                .unwrap_or_else(|_| BrowseEvent::Unknown(other.to_string())),
        }
    }
}

/// Fetch once, then re-filter and re-print on every line read from stdin.
#[tracing::instrument(skip(runtime, api_url))]
pub async fn browse<R: Runtime>(
    runtime: R,
    user: Option<String>,
    api_url: Option<String>,
) -> Result<()> {
    let config = Config::new(runtime, user, api_url)?;
    run_browse(config).await
}

pub(crate) async fn run_browse<R: Runtime, L: ListRepositories>(config: Config<R, L>) -> Result<()> {
    let runtime = &config.runtime;

    let mut browser = RepositoryBrowser::new(config.user.clone())?;
    browser.load(&config.github).await?;
    browser.loaded()?;

    print_visible(runtime, &browser);

    while let Some(line) = runtime.read_line(PROMPT)? {
        let event = BrowseEvent::parse(&line);
        debug!("Browse event: {:?}", event);

        match event {
            BrowseEvent::Quit => break,
            BrowseEvent::Filter(visibility) => {
                let query = browser.filter().query.clone();
                browser.on_filter_changed(visibility, &query)?;
            }
            BrowseEvent::Search(query) => {
                let visibility = browser.filter().visibility;
                browser.on_filter_changed(visibility, &query)?;
            }
            BrowseEvent::Unknown(command) => {
                runtime.print(&format!(
                    "Unknown command :{}. Use :all, :public, :private or :quit.",
                    command
                ));
                continue;
            }
        }

        print_visible(runtime, &browser);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{FetchError, MockListRepositories, Repository};
    use crate::runtime::MockRuntime;
    use crate::test_utils::{capture_output, failing_source, repository, source_returning};
    use std::collections::VecDeque;

    fn config(runtime: MockRuntime, github: MockListRepositories) -> Config<MockRuntime, MockListRepositories> {
        Config {
            runtime,
            github,
            user: "octocat".to_string(),
        }
    }

    fn feed_lines(runtime: &mut MockRuntime, lines: &[&str]) {
        let mut lines: VecDeque<String> = lines.iter().map(|l| l.to_string()).collect();
        runtime
            .expect_read_line()
            .returning(move |_| Ok(lines.pop_front()));
    }

    fn names(lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.split_whitespace().next().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_parse_events() {
        assert_eq!(BrowseEvent::parse(":public"), BrowseEvent::Filter(Visibility::Public));
        assert_eq!(BrowseEvent::parse(":Private"), BrowseEvent::Filter(Visibility::Private));
        assert_eq!(BrowseEvent::parse(":all"), BrowseEvent::Filter(Visibility::All));
        assert_eq!(BrowseEvent::parse(":q"), BrowseEvent::Quit);
        assert_eq!(BrowseEvent::parse(":quit"), BrowseEvent::Quit);
        assert_eq!(BrowseEvent::parse(":stars"), BrowseEvent::Unknown("stars".into()));
        assert_eq!(BrowseEvent::parse("rust cli"), BrowseEvent::Search("rust cli".into()));
        assert_eq!(BrowseEvent::parse(""), BrowseEvent::Search(String::new()));
    }

    #[tokio::test]
    async fn test_browse_session() {
        let repos = vec![
            Repository {
                topics: vec!["cv".into()],
                ..repository("Alpha")
            },
            Repository {
                private: true,
                ..repository("Beta")
            },
            repository("Gamma"),
        ];

        let mut runtime = MockRuntime::new();
        let output = capture_output(&mut runtime);
        feed_lines(&mut runtime, &[":public", "a", "CV", ":bogus", "", ":private", ":quit", "ignored"]);

        run_browse(config(runtime, source_returning(repos))).await.unwrap();

        let lines = output.lock().unwrap().clone();
        assert_eq!(
            names(&lines),
            vec![
                // initial render
                "Alpha", "Beta", "Gamma",
                // :public
                "Alpha", "Gamma",
                // "a" keeps the public filter
                "Alpha", "Gamma",
                // "CV" matches a topic
                "Alpha",
                // :bogus
                "Unknown",
                // "" clears the query
                "Alpha", "Gamma",
                // :private
                "Beta",
            ]
        );
    }

    #[tokio::test]
    async fn test_browse_ends_at_end_of_input() {
        let mut runtime = MockRuntime::new();
        let output = capture_output(&mut runtime);
        feed_lines(&mut runtime, &["zzz"]);

        run_browse(config(runtime, source_returning(vec![repository("Alpha")])))
            .await
            .unwrap();

        let lines = output.lock().unwrap().clone();
        assert_eq!(lines.last().map(String::as_str), Some("No projects found."));
    }

    #[tokio::test]
    async fn test_browse_fetch_failure_reads_nothing() {
        let mut runtime = MockRuntime::new();
        runtime.expect_read_line().never();

        let result = run_browse(config(runtime, failing_source(|| FetchError::NotFound))).await;

        assert!(result.unwrap_err().to_string().contains("octocat"));
    }
}
