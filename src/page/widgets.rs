use yew::prelude::*;

use super::PageQuery;
use crate::core::Timeframe;
use crate::widgets::WidgetState;
use crate::widgets::calculator::{CalculatorView, PASS_HISTORY};
use crate::widgets::chart::ChartView;
use crate::widgets::learning::LearningTab;
use crate::widgets::ticker::TickerView;

#[derive(Properties, PartialEq)]
pub struct ToolsProps {
    pub query: PageQuery,
    pub ticker: WidgetState<TickerView>,
    pub chart: WidgetState<ChartView>,
    pub calculator: WidgetState<CalculatorView>,
}

#[function_component(Tools)]
pub fn tools(props: &ToolsProps) -> Html {
    html! {
        <section class="tools" id="tools">
            <h2>{ "Bitcoin tools" }</h2>
            <div class="widget-grid">
                <TickerCard state={props.ticker.clone()} />
                <ChartCard state={props.chart.clone()} query={props.query} />
                <CalculatorCard state={props.calculator.clone()} query={props.query} />
                <LearningCenter query={props.query} />
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct TickerProps {
    pub state: WidgetState<TickerView>,
}

#[function_component(TickerCard)]
pub fn ticker_card(props: &TickerProps) -> Html {
    let body = match &props.state {
        WidgetState { error: true, .. } => html! {
            <div class="widget-error">
                <p>{ "Unable to load price" }</p>
                <a class="retry" href="/">{ "Retry" }</a>
            </div>
        },
        WidgetState {
            data: Some(view), ..
        } => {
            let change_class = match view.change_24h {
                Some(change) if change < 0.0 => "change negative",
                _ => "change positive",
            };
            html! {
                <>
                    <p class="price">{ view.price_display.clone() }</p>
                    {
                        match &view.change_display {
                            Some(change) => html! {
                                <p class={change_class}>{ change.clone() }{ " (24h)" }</p>
                            },
                            None => html! {},
                        }
                    }
                    <p class="muted">
                        { format!("Updated {} UTC", view.updated_at.format("%H:%M:%S")) }
                    </p>
                </>
            }
        }
        _ => html! { <p class="muted">{ "Loading price…" }</p> },
    };

    html! {
        <article class="widget ticker" id="price">
            <h3>{ "Bitcoin price" }</h3>
            { body }
        </article>
    }
}

#[derive(Properties, PartialEq)]
pub struct ChartProps {
    pub state: WidgetState<ChartView>,
    pub query: PageQuery,
}

#[function_component(ChartCard)]
pub fn chart_card(props: &ChartProps) -> Html {
    let query = props.query;
    let selector = html! {
        <div class="pill-group">
            { for Timeframe::ALL.iter().map(|tf| html! {
                <a
                    class={classes!("pill", (*tf == query.timeframe).then_some("active"))}
                    href={query.with_timeframe(*tf).href("chart")}
                >
                    { tf.label() }
                </a>
            }) }
        </div>
    };

    let body = match &props.state.data {
        Some(view) => {
            let change_class = if view.stats.change_percent < 0.0 {
                "change negative"
            } else {
                "change positive"
            };
            html! {
                <>
                    <svg
                        class="chart"
                        viewBox={format!("0 0 {} {}", view.width, view.height)}
                        preserveAspectRatio="none"
                    >
                        <polyline points={view.polyline.clone()} fill="none" stroke-width="2" />
                    </svg>
                    <dl class="chart-stats">
                        <dt>{ "Change" }</dt>
                        <dd class={change_class}>{ view.change_display.clone() }</dd>
                        <dt>{ "Low" }</dt>
                        <dd>{ view.low_display.clone() }</dd>
                        <dt>{ "High" }</dt>
                        <dd>{ view.high_display.clone() }</dd>
                    </dl>
                </>
            }
        }
        None => html! { <p class="muted">{ "Loading chart…" }</p> },
    };

    html! {
        <article class="widget chart-card" id="chart">
            <h3>{ "Price history" }</h3>
            { selector }
            {
                if props.state.error {
                    html! { <p class="widget-error">{ "Live data unavailable, showing sample data." }</p> }
                } else {
                    html! {}
                }
            }
            { body }
        </article>
    }
}

#[derive(Properties, PartialEq)]
pub struct CalculatorProps {
    pub state: WidgetState<CalculatorView>,
    pub query: PageQuery,
}

#[function_component(CalculatorCard)]
pub fn calculator_card(props: &CalculatorProps) -> Html {
    let query = props.query;
    let years = html! {
        <div class="pill-group">
            { for PASS_HISTORY.iter().map(|entry| html! {
                <a
                    class={classes!("pill", (entry.year == query.year).then_some("active"))}
                    href={query.with_year(entry.year).href("calculator")}
                >
                    { entry.year.to_string() }
                </a>
            }) }
        </div>
    };

    let body = match &props.state {
        WidgetState {
            data: Some(view), ..
        } => {
            let c = &view.comparison;
            let outcome = if c.gain_loss >= 0.0 { "gain" } else { "loss" };
            html! {
                <dl class="calculator-result">
                    <dt>{ format!("{} season pass", c.year) }</dt>
                    <dd>{ view.pass_display.clone() }</dd>
                    <dt>{ "Bitcoin it would have bought" }</dt>
                    <dd>{ view.btc_display.clone() }</dd>
                    <dt>{ "Worth today" }</dt>
                    <dd>{ view.value_today_display.clone() }</dd>
                    <dt>{ format!("Total {outcome}") }</dt>
                    <dd class={classes!("change", outcome)}>
                        { view.gain_loss_display.clone() }
                        { " (" }{ view.gain_loss_percent_display.clone() }{ ")" }
                    </dd>
                </dl>
            }
        }
        WidgetState { error: true, .. } => html! {
            <p class="widget-error">{ "Current price unavailable, try again shortly." }</p>
        },
        _ => html! { <p class="muted">{ "Loading…" }</p> },
    };

    html! {
        <article class="widget calculator" id="calculator">
            <h3>{ "Pass or bitcoin?" }</h3>
            <p class="muted">{ "What if you had bought bitcoin instead of the season pass?" }</p>
            { years }
            { body }
        </article>
    }
}

#[derive(Properties, PartialEq)]
pub struct LearningProps {
    pub query: PageQuery,
}

#[function_component(LearningCenter)]
pub fn learning_center(props: &LearningProps) -> Html {
    let query = props.query;
    let active = query.tab;

    html! {
        <article class="widget learning" id="learning">
            <h3>{ "Learning center" }</h3>
            <nav class="tabs">
                { for LearningTab::ALL.iter().map(|tab| html! {
                    <a
                        class={classes!("tab", (*tab == active).then_some("active"))}
                        href={query.with_tab(*tab).href("learning")}
                    >
                        { tab.title() }
                    </a>
                }) }
            </nav>
            <ul class="learning-list">
                { for active.entries().iter().map(|entry| html! {
                    <li>
                        <a href={entry.url} target="_blank" rel="noopener noreferrer">{ entry.title }</a>
                        {
                            match entry.badge {
                                Some(badge) => html! { <span class="badge">{ badge }</span> },
                                None => html! {},
                            }
                        }
                        <p>{ entry.description }</p>
                    </li>
                }) }
            </ul>
        </article>
    }
}
