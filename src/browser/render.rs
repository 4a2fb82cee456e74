//! HTML for the `projectsGrid` container and the built-in page.
//!
//! Markup lives in Handlebars templates registered once per [`Renderer`].
//! Every value is interpolated with the registry's default HTML escaping.
//! The container functions return its complete inner HTML, so applying a
//! render always replaces whatever was there before.

use chrono::DateTime;
use handlebars::Handlebars;
use serde::Serialize;

use crate::browser::{FilterState, Visibility};
use crate::github::{FetchError, Repository};
use crate::page::{GRID_ID, SEARCH_INPUT_ID};

/// Topics beyond this count are dropped without an overflow marker.
pub const MAX_TOPICS: usize = 5;

pub const NO_DESCRIPTION: &str = "No description available";

const CARD: &str = "card";
const EMPTY: &str = "empty";
const ERROR: &str = "error";
const PAGE: &str = "page";

const CARD_TEMPLATE: &str = r#"
<div class="project-card" data-visibility="{{visibility}}">
    <div class="project-header">
        <div class="project-icon">
            <i class="fas fa-{{icon}}"></i>
        </div>
        <div class="project-links">
            <a href="{{html_url}}" target="_blank" rel="noopener" class="project-link" title="View on GitHub">
                <i class="fab fa-github"></i>
            </a>
            {{#if homepage}}
            <a href="{{homepage}}" target="_blank" rel="noopener" class="project-link" title="Live Demo">
                <i class="fas fa-external-link-alt"></i>
            </a>
            {{/if}}
        </div>
    </div>
    <div class="project-info">
        <h3>{{name}}</h3>
    </div>
    <p class="project-description">{{description}}</p>
    <div class="project-meta">
        <div class="meta-item"><i class="fas fa-star"></i><span>{{stars}}</span></div>
        <div class="meta-item"><i class="fas fa-code-branch"></i><span>{{forks}}</span></div>
        <div class="meta-item"><i class="fas fa-{{badge_icon}}"></i><span>{{badge_label}}</span></div>
        <div class="meta-item"><i class="fas fa-clock"></i><span>{{updated}}</span></div>
    </div>
    {{#if language}}
    <div class="project-language">
        <span class="language-dot"></span>
        <span>{{language}}</span>
    </div>
    {{/if}}
    {{#if topics}}
    <div class="project-topics">{{#each topics}}<span class="topic-tag">{{this}}</span>{{/each}}</div>
    {{/if}}
</div>
"#;

const EMPTY_TEMPLATE: &str = r#"
<div class="no-projects">
    <i class="fas fa-folder-open"></i>
    <h3>No projects found</h3>
    <p>No repositories match your current filter</p>
</div>
"#;

const ERROR_TEMPLATE: &str = r#"
<div class="no-projects">
    <i class="fas fa-exclamation-triangle"></i>
    <h3>Failed to load projects</h3>
    <p>Please check the configured GitHub username</p>
    <p class="error-detail">{{detail}}</p>
    <p class="error-user">Current username: <code>{{user}}</code></p>
</div>
"#;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{user}} - Projects</title>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
</head>
<body>
    <section class="projects" id="projects">
        <h2 class="section-title">Projects</h2>
        <div class="project-filters">
            {{#each buttons}}
            <button class="filter-btn{{#if active}} active{{/if}}" data-filter="{{value}}">{{label}}</button>
            {{/each}}
        </div>
        <div class="search-box">
            <input type="text" id="{{search_id}}" placeholder="Search projects..." value="{{query}}">
        </div>
        <div class="projects-grid" id="{{grid_id}}"></div>
    </section>
</body>
</html>
"#;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template rendering error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Template registration error: {0}")]
    Registration(#[from] handlebars::TemplateError),
}

#[derive(Serialize)]
struct CardView<'a> {
    visibility: &'static str,
    icon: &'static str,
    badge_icon: &'static str,
    badge_label: &'static str,
    html_url: &'a str,
    homepage: Option<&'a str>,
    name: &'a str,
    description: &'a str,
    stars: u64,
    forks: u64,
    updated: String,
    language: Option<&'a str>,
    topics: &'a [String],
}

impl<'a> CardView<'a> {
    fn new(repo: &'a Repository) -> Self {
        let (icon, badge_icon, badge_label) = if repo.private {
            ("lock", "lock", "Private")
        } else {
            ("folder", "globe", "Public")
        };

        Self {
            visibility: repo.visibility_label(),
            icon,
            badge_icon,
            badge_label,
            html_url: &repo.html_url,
            homepage: repo.homepage.as_deref(),
            name: &repo.name,
            description: repo.description.as_deref().unwrap_or(NO_DESCRIPTION),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            updated: format_updated(&repo.updated_at),
            language: repo.language.as_deref(),
            topics: &repo.topics[..repo.topics.len().min(MAX_TOPICS)],
        }
    }
}

#[derive(Serialize)]
struct ErrorView<'a> {
    user: &'a str,
    detail: String,
}

#[derive(Serialize)]
struct ButtonView {
    value: String,
    label: &'static str,
    active: bool,
}

#[derive(Serialize)]
struct PageView<'a> {
    user: &'a str,
    query: &'a str,
    buttons: Vec<ButtonView>,
    search_id: &'static str,
    grid_id: &'static str,
}

/// Registry of the card, empty-state, error and page templates.
pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_template_string(CARD, CARD_TEMPLATE)?;
        handlebars.register_template_string(EMPTY, EMPTY_TEMPLATE)?;
        handlebars.register_template_string(ERROR, ERROR_TEMPLATE)?;
        handlebars.register_template_string(PAGE, PAGE_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// One card per repository in input order, or the empty-state panel.
    pub fn render_cards(&self, repos: &[&Repository]) -> Result<String, TemplateError> {
        if repos.is_empty() {
            return self.render_empty();
        }

        let mut html = String::new();
        for repo in repos {
            html.push_str(&self.handlebars.render(CARD, &CardView::new(repo))?);
        }
        Ok(html)
    }

    pub fn render_empty(&self) -> Result<String, TemplateError> {
        Ok(self.handlebars.render(EMPTY, &())?)
    }

    /// Diagnostic panel shown in place of the grid when the fetch failed.
    pub fn render_error(&self, user: &str, error: &FetchError) -> Result<String, TemplateError> {
        let view = ErrorView {
            user,
            detail: error.to_string(),
        };
        Ok(self.handlebars.render(ERROR, &view)?)
    }

    /// The default page: heading, filter buttons, search box and an empty
    /// grid. The active button and the search box reflect `filter`.
    pub fn render_page(&self, user: &str, filter: &FilterState) -> Result<String, TemplateError> {
        let buttons = Visibility::ALL
            .iter()
            .map(|v| ButtonView {
                value: v.to_string(),
                label: v.label(),
                active: *v == filter.visibility,
            })
            .collect();

        let view = PageView {
            user,
            query: &filter.query,
            buttons,
            search_id: SEARCH_INPUT_ID,
            grid_id: GRID_ID,
        };
        Ok(self.handlebars.render(PAGE, &view)?)
    }
}

/// `2024-01-05T08:30:00Z` -> `Jan 5, 2024`. Unparseable input is returned as-is.
pub fn format_updated(updated_at: &str) -> String {
    match DateTime::parse_from_rfc3339(updated_at) {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => updated_at.to_string(),
    }
}
