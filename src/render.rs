//! HTML fragments for the site's content sections.
//!
//! Uses [maud](https://maud.lambda.xyz/) so every interpolated value is
//! escaped. Site copy can therefore contain `&`, quotes, or angle brackets
//! without any call to the sanitizer.

use crate::content::{CertificatesPage, Endorsement, NavLink};
use maud::{Markup, html};

/// Renders the navigation bar. The link whose URL equals `current_url` gets
/// the `current` class; button links get `button`.
pub fn nav(links: &[NavLink], current_url: &str) -> Markup {
    html! {
        nav.site-nav {
            ul {
                @for link in links {
                    (nav_link(link, current_url == link.url))
                }
            }
        }
    }
}

fn nav_link(link: &NavLink, is_current: bool) -> Markup {
    let class = match (link.is_button, is_current) {
        (true, true) => Some("button current"),
        (true, false) => Some("button"),
        (false, true) => Some("current"),
        (false, false) => None,
    };
    html! {
        li {
            a href=(link.url) class=[class] { (link.title) }
        }
    }
}

/// Renders one card per endorsement, anchored by id.
pub fn endorsements(list: &[Endorsement]) -> Markup {
    html! {
        section.endorsements {
            @for endorsement in list {
                (endorsement_card(endorsement))
            }
        }
    }
}

fn endorsement_card(endorsement: &Endorsement) -> Markup {
    html! {
        article.endorsement id=(endorsement.id) {
            img.endorsement-logo src=(endorsement.logo) alt=(endorsement.title) loading="lazy";
            h2 { (endorsement.title) }
            h3 { (endorsement.subtitle) }
            p { (endorsement.content) }
            @if let Some(quote) = &endorsement.quote {
                blockquote {
                    p { (quote.text) }
                    cite { (quote.author) }
                }
            }
        }
    }
}

/// Renders the certificates page body.
pub fn certificates(page: &CertificatesPage) -> Markup {
    html! {
        section.certificates {
            h1 { (page.headline) }
            p.intro { (page.introduction) }
            ul.certificate-list {
                @for cert in &page.certificates_list {
                    li.certificate {
                        img src=(cert.image) alt=(cert.title) loading="lazy";
                        h2 { (cert.title) }
                        p.issuer { (cert.issuer) }
                        time { (cert.date) }
                    }
                }
            }
        }
    }
}
