use chrono::{Datelike, Utc};
use yew::prelude::*;

use super::content::{ABOUT_PARAGRAPHS, BLOG_POSTS, NAV_LINKS, RESOURCES, SERVICES};
use crate::core::Theme;
use crate::core::config::SiteConfig;

#[derive(Properties, PartialEq)]
pub struct SiteProps {
    pub site: SiteConfig,
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub site: SiteConfig,
    pub theme: Theme,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let next = props.theme.toggled();
    let toggle_label = match next {
        Theme::Dark => "🌙 Dark",
        Theme::Light => "☀️ Light",
    };

    html! {
        <nav class="navbar">
            <a class="brand" href="/">{ "₿ " }{ props.site.business_name.clone() }</a>
            <ul class="nav-links">
                { for NAV_LINKS.iter().map(|link| html! {
                    <li><a href={link.anchor}>{ link.label }</a></li>
                }) }
            </ul>
            <a class="theme-toggle" href={format!("/theme/{next}")}>{ toggle_label }</a>
        </nav>
    }
}

#[function_component(Hero)]
pub fn hero(props: &SiteProps) -> Html {
    html! {
        <header class="hero" id="top">
            <h1>{ "Bitcoin, explained by people who live in " }{ props.site.city.clone() }</h1>
            <p class="tagline">{ props.site.tagline.clone() }</p>
            <div class="hero-actions">
                <a class="button primary" href="#contact">{ "Book a consultation" }</a>
                <a class="button" href="#tools">{ "Explore the tools" }</a>
            </div>
        </header>
    }
}

#[function_component(Services)]
pub fn services() -> Html {
    html! {
        <section class="services" id="services">
            <h2>{ "Services" }</h2>
            <div class="card-grid">
                { for SERVICES.iter().map(|service| html! {
                    <article class="card">
                        <span class="icon">{ service.icon }</span>
                        <h3>{ service.title }</h3>
                        <p>{ service.summary }</p>
                        <ul>
                            { for service.points.iter().map(|point| html! { <li>{ *point }</li> }) }
                        </ul>
                    </article>
                }) }
            </div>
        </section>
    }
}

#[function_component(About)]
pub fn about(props: &SiteProps) -> Html {
    html! {
        <section class="about" id="about">
            <h2>{ "About " }{ props.site.business_name.clone() }</h2>
            { for ABOUT_PARAGRAPHS.iter().map(|p| html! { <p>{ *p }</p> }) }
        </section>
    }
}

#[function_component(Resources)]
pub fn resources() -> Html {
    html! {
        <section class="resources" id="resources">
            <h2>{ "Resources" }</h2>
            <ul class="resource-list">
                { for RESOURCES.iter().map(|r| html! {
                    <li>
                        <a href={r.url} target="_blank" rel="noopener noreferrer">{ r.title }</a>
                        <span class="muted">{ r.description }</span>
                    </li>
                }) }
            </ul>
        </section>
    }
}

#[function_component(Blog)]
pub fn blog() -> Html {
    html! {
        <section class="blog" id="blog">
            <h2>{ "From the blog" }</h2>
            <div class="card-grid">
                { for BLOG_POSTS.iter().map(|post| html! {
                    <article class="card post" id={post.slug}>
                        <time datetime={post.date}>{ post.date }</time>
                        <h3>{ post.title }</h3>
                        <p>{ post.excerpt }</p>
                        <a href="#contact">{ "Ask us about this →" }</a>
                    </article>
                }) }
            </div>
        </section>
    }
}

#[function_component(Contact)]
pub fn contact(props: &SiteProps) -> Html {
    let site = &props.site;
    html! {
        <section class="contact" id="contact">
            <h2>{ "Get in touch" }</h2>
            <p>{ "Consultations are available in person around " }{ site.city.clone() }{ " or by video call." }</p>
            <p>
                <a class="button primary" href={format!("mailto:{}", site.contact_email)}>
                    { site.contact_email.clone() }
                </a>
            </p>
            {
                match &site.phone {
                    Some(phone) => html! {
                        <p class="phone"><a href={format!("tel:{phone}")}>{ phone.clone() }</a></p>
                    },
                    None => html! {},
                }
            }
        </section>
    }
}

#[function_component(Footer)]
pub fn footer(props: &SiteProps) -> Html {
    let year = Utc::now().year();
    html! {
        <footer class="footer">
            <p>{ format!("© {year} {}", props.site.business_name) }</p>
            <p class="disclaimer">
                { "Educational information only, not financial advice. We never take custody of your bitcoin." }
            </p>
        </footer>
    }
}
