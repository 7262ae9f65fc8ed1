//! Server-side rendering of the single marketing page.
//!
//! Sections are yew function components rendered to a string with
//! [`yew::ServerRenderer`] and wrapped in a static document shell. The page
//! carries no script: widget selections are plain links that re-request `/`
//! with a different query, which re-activates the affected widget.

pub mod content;
pub mod sections;
pub mod widgets;

use serde::Deserialize;
use yew::prelude::*;

use crate::core::config::SiteConfig;
use crate::core::{Theme, Timeframe};
use crate::widgets::WidgetState;
use crate::widgets::calculator::{self, CalculatorView};
use crate::widgets::chart::ChartView;
use crate::widgets::learning::LearningTab;
use crate::widgets::ticker::TickerView;

use sections::{About, Blog, Contact, Footer, Hero, Nav, Resources, Services};
use widgets::Tools;

const STYLESHEET_PATH: &str = "/assets/site.css";

/// Raw `/` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub timeframe: Option<String>,
    pub year: Option<String>,
    pub tab: Option<String>,
}

/// Widget selections for one page view. Unknown values fall back to the
/// widget defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageQuery {
    pub timeframe: Timeframe,
    pub year: u16,
    pub tab: LearningTab,
}

impl Default for PageQuery {
    fn default() -> Self {
        PageQuery {
            timeframe: Timeframe::default(),
            year: calculator::DEFAULT_YEAR,
            tab: LearningTab::default(),
        }
    }
}

impl From<PageParams> for PageQuery {
    fn from(params: PageParams) -> Self {
        let defaults = PageQuery::default();
        PageQuery {
            timeframe: params
                .timeframe
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeframe),
            year: params
                .year
                .and_then(|y| y.parse().ok())
                .filter(|y| calculator::find_year(*y).is_some())
                .unwrap_or(defaults.year),
            tab: params
                .tab
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.tab),
        }
    }
}

impl PageQuery {
    /// Link to the page with these selections, scrolled to `anchor`.
    pub fn href(&self, anchor: &str) -> String {
        format!(
            "/?timeframe={}&year={}&tab={}#{}",
            self.timeframe, self.year, self.tab, anchor
        )
    }

    pub fn with_timeframe(self, timeframe: Timeframe) -> Self {
        PageQuery { timeframe, ..self }
    }

    pub fn with_year(self, year: u16) -> Self {
        PageQuery { year, ..self }
    }

    pub fn with_tab(self, tab: LearningTab) -> Self {
        PageQuery { tab, ..self }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct PageProps {
    pub theme: Theme,
    pub site: SiteConfig,
    pub query: PageQuery,
    pub ticker: WidgetState<TickerView>,
    pub chart: WidgetState<ChartView>,
    pub calculator: WidgetState<CalculatorView>,
}

#[function_component(App)]
pub fn app(props: &PageProps) -> Html {
    html! {
        <>
            <Nav site={props.site.clone()} theme={props.theme} />
            <main>
                <Hero site={props.site.clone()} />
                <Services />
                <Tools
                    query={props.query}
                    ticker={props.ticker.clone()}
                    chart={props.chart.clone()}
                    calculator={props.calculator.clone()}
                />
                <About site={props.site.clone()} />
                <Resources />
                <Blog />
                <Contact site={props.site.clone()} />
            </main>
            <Footer site={props.site.clone()} />
        </>
    }
}

/// Renders the full HTML document.
pub async fn render_page(props: PageProps) -> String {
    let theme = props.theme;
    let title = escape_html(&props.site.business_name);
    let description = escape_html(&props.site.tagline);

    let body = yew::ServerRenderer::<App>::with_props(move || props)
        .hydratable(false)
        .render()
        .await;

    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="{theme}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="{description}">
<title>{title}</title>
<link rel="stylesheet" href="{STYLESHEET_PATH}">
</head>
<body>
{body}
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
