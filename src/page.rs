//! The portfolio page the browser renders into.
//!
//! A page is plain HTML. The render target is the element with
//! `id="projectsGrid"`; filter buttons are elements with the `filter-btn`
//! class and a `data-filter` attribute; `searchInput` is the optional search
//! box. Only the grid's inner HTML and the `repositoryData` script are ever
//! rewritten.

use crate::browser::FilterState;
use crate::browser::render::{Renderer, TemplateError};

pub const GRID_ID: &str = "projectsGrid";
pub const SEARCH_INPUT_ID: &str = "searchInput";
pub const DATA_ID: &str = "repositoryData";
const FILTER_BUTTON_CLASS: &str = "filter-btn";

/// Elements whose content is text, not markup.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    html: String,
}

impl Page {
    pub fn parse(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// The default page with filter buttons, search box and an empty grid.
    pub fn builtin(
        renderer: &Renderer,
        user: &str,
        filter: &FilterState,
    ) -> Result<Self, TemplateError> {
        Ok(Self::parse(renderer.render_page(user, filter)?))
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }

    pub fn has_grid(&self) -> bool {
        self.inner_span(GRID_ID).is_some()
    }

    pub fn has_search_input(&self) -> bool {
        Tags::new(&self.html).any(|tag| !tag.closing && tag.attr("id") == Some(SEARCH_INPUT_ID))
    }

    /// Raw `data-filter` values of the filter buttons, in document order.
    pub fn filter_buttons(&self) -> Vec<&str> {
        Tags::new(&self.html)
            .filter(|tag| !tag.closing && tag.has_class(FILTER_BUTTON_CLASS))
            .filter_map(|tag| tag.attr("data-filter"))
            .collect()
    }

    /// Replace the grid's inner HTML. A page without a grid is returned unchanged.
    pub fn with_container(&self, inner: &str) -> Page {
        match self.inner_span(GRID_ID) {
            Some((start, end)) => self.splice(start, end, inner),
            None => self.clone(),
        }
    }

    /// Set the text of `<script type="application/json" id="repositoryData">`.
    ///
    /// An existing element keeps its place and only its content changes;
    /// otherwise the script is inserted before `</body>`, or appended.
    pub fn with_repository_data(&self, json: &str) -> Page {
        let json = json.replace("</", "<\\/");

        if let Some((start, end)) = self.inner_span(DATA_ID) {
            return self.splice(start, end, &json);
        }

        let script = format!(
            "<script type=\"application/json\" id=\"{}\">{}</script>\n",
            DATA_ID, json
        );
        let at = Tags::new(&self.html)
            .filter(|tag| tag.closing && tag.name.eq_ignore_ascii_case("body"))
            .last()
            .map_or(self.html.len(), |tag| tag.start);
        self.splice(at, at, &script)
    }

    fn splice(&self, start: usize, end: usize, inner: &str) -> Page {
        let mut html = String::with_capacity(self.html.len() + inner.len());
        html.push_str(&self.html[..start]);
        html.push_str(inner);
        html.push_str(&self.html[end..]);
        Page { html }
    }

    /// Byte range of the inner HTML of the first element with `id`.
    fn inner_span(&self, id: &str) -> Option<(usize, usize)> {
        let mut tags = Tags::new(&self.html);
        let open = tags.find(|tag| !tag.closing && tag.attr("id") == Some(id))?;

        if open.self_closing {
            return Some((open.end, open.end));
        }

        let mut depth = 1usize;
        for tag in tags {
            if !tag.name.eq_ignore_ascii_case(open.name) || tag.self_closing {
                continue;
            }
            if tag.closing {
                depth -= 1;
                if depth == 0 {
                    return Some((open.end, tag.start));
                }
            } else {
                depth += 1;
            }
        }
        None
    }
}

/// One start or end tag. `start..end` covers `<` through `>`.
#[derive(Debug)]
struct Tag<'a> {
    start: usize,
    end: usize,
    name: &'a str,
    closing: bool,
    self_closing: bool,
    /// Everything between the tag name and `>`
    attributes: &'a str,
}

impl<'a> Tag<'a> {
    /// Value of attribute `name`, matched case-insensitively.
    fn attr(&self, name: &str) -> Option<&'a str> {
        Attributes {
            rest: self.attributes,
        }
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, value)| value)
    }

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn is_raw_text(&self) -> bool {
        RAW_TEXT_ELEMENTS
            .iter()
            .any(|raw| self.name.eq_ignore_ascii_case(raw))
    }
}

/// `name`, `name=value`, `name="value"` and `name='value'` pairs of a tag.
struct Attributes<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self
            .rest
            .trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            return None;
        }

        let name_len = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        let after = rest[name_len..].trim_start();

        let Some(value) = after.strip_prefix('=') else {
            self.rest = after;
            return Some((name, None));
        };
        let value = value.trim_start();

        let (value, rest) = match value.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let quoted = &value[1..];
                match quoted.find(quote) {
                    Some(end) => (&quoted[..end], &quoted[end + 1..]),
                    None => (quoted, ""),
                }
            }
            _ => {
                let end = value.find(char::is_whitespace).unwrap_or(value.len());
                (&value[..end], &value[end..])
            }
        };
        self.rest = rest;
        Some((name, Some(value)))
    }
}

/// Offset just past the `>` closing the tag opened at `start`. A `>` inside
/// a quoted attribute value does not close the tag.
fn tag_end(html: &str, start: usize) -> Option<usize> {
    let mut quote = None;
    let mut after_equals = false;

    for (i, c) in html[start..].char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '>' => return Some(start + i + 1),
            '"' | '\'' if after_equals => quote = Some(c),
            _ => {}
        }
        if !c.is_whitespace() {
            after_equals = c == '=';
        }
    }
    None
}

/// Forward scan over the tags of an HTML document. Comments, declarations
/// and the content of `script`/`style` elements are skipped.
struct Tags<'a> {
    html: &'a str,
    pos: usize,
}

impl<'a> Tags<'a> {
    fn new(html: &'a str) -> Self {
        Self { html, pos: 0 }
    }
}

impl<'a> Iterator for Tags<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.pos + self.html[self.pos..].find('<')?;

            if self.html[start..].starts_with("<!--") {
                self.pos = match self.html[start..].find("-->") {
                    Some(end) => start + end + 3,
                    None => self.html.len(),
                };
                continue;
            }

            let end = tag_end(self.html, start)?;
            self.pos = end;

            let body = &self.html[start + 1..end - 1];
            let (closing, body) = match body.strip_prefix('/') {
                Some(rest) => (true, rest),
                None => (false, body),
            };
            let name_len = body
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
                .unwrap_or(body.len());
            if name_len == 0 {
                continue;
            }

            let tag = Tag {
                start,
                end,
                name: &body[..name_len],
                closing,
                self_closing: body.trim_end().ends_with('/'),
                attributes: &body[name_len..],
            };

            if !tag.closing && !tag.self_closing && tag.is_raw_text() {
                let close = format!("</{}", tag.name.to_ascii_lowercase());
                self.pos = self.html[end..]
                    .to_ascii_lowercase()
                    .find(&close)
                    .map_or(self.html.len(), |i| end + i);
            }

            return Some(tag);
        }
    }
}
