//! Site copy: navigation, home page, endorsements, and certificates.
//!
//! All editable text for the site lives in one [`SiteContent`] record. The
//! stock record ships compiled into the crate and is what the free accessor
//! functions ([`nav_links`], [`all_endorsements`], [`endorsement_by_id`],
//! [`all_certificates`]) read from. It is never mutated after first use.
//!
//! ## Overriding Content
//!
//! A TOML file can replace parts of the stock copy. The file is merged over
//! the stock record key by key, so only changed values need to appear:
//!
//! ```toml
//! site_name = "Ben Mak"
//!
//! [home_page]
//! headline = "Ben Mak, Expert Witness"
//! ```
//!
//! Arrays replace the stock array wholesale: a file that sets `endorsements`
//! must list every endorsement to keep. Unknown keys are rejected.
//!
//! Run `site-content gen-content` to print the stock record as TOML.

use crate::config::merge_toml;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Content validation error: {0}")]
    Validation(String),
}

/// All site copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteContent {
    pub site_name: String,
    pub site_description: String,
    pub contact_email: String,
    pub navigation: Vec<NavLink>,
    pub home_page: HomePage,
    pub endorsements: Vec<Endorsement>,
    pub certificates: CertificatesPage,
}

/// One entry in the site navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub title: String,
    pub url: String,
    /// Rendered as a call-to-action button rather than a plain link.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_button: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HomePage {
    pub headline: String,
    pub subheadline: String,
    pub introduction: String,
}

/// An endorsement card, addressed by its stable `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Endorsement {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    /// Path of the endorsing body's logo image.
    pub logo: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificatesPage {
    pub headline: String,
    pub introduction: String,
    pub certificates_list: Vec<Certificate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Certificate {
    pub title: String,
    pub issuer: String,
    /// Year or date of issue, as displayed.
    pub date: String,
    /// Path of the scanned certificate image.
    pub image: String,
}

fn link(title: &str, url: &str) -> NavLink {
    NavLink {
        title: title.to_string(),
        url: url.to_string(),
        is_button: false,
    }
}

fn certificate(title: &str, issuer: &str, date: &str, image: &str) -> Certificate {
    Certificate {
        title: title.to_string(),
        issuer: issuer.to_string(),
        date: date.to_string(),
        image: image.to_string(),
    }
}

impl SiteContent {
    /// The content shipped with the site.
    pub fn stock() -> Self {
        Self {
            site_name: "Ben Mak".to_string(),
            site_description: "Expert Witness & Forensic Consultant".to_string(),
            contact_email: "consult@justice-minds.com".to_string(),
            navigation: vec![
                link("Ben Mak Home", "/"),
                link("Endorsements", "/endorsements"),
                link("Certification", "/certificates"),
                link("Portal", "/portal"),
                link("Analytics", "/analytics"),
                NavLink {
                    is_button: true,
                    ..link("Contact Us", "/contact")
                },
            ],
            home_page: HomePage {
                headline: "Ben Mak".to_string(),
                subheadline: "Expert Witness & Forensic Consultant".to_string(),
                introduction: "Ben Mak is a highly respected expert witness and forensic consultant \
                    with extensive experience in providing expert testimony and analysis in complex cases."
                    .to_string(),
            },
            endorsements: vec![
                Endorsement {
                    id: "parliamentary".to_string(),
                    title: "PARLIAMENTARY ENDORSEMENT".to_string(),
                    subtitle: "HOUSE OF COMMONS RECOGNITION".to_string(),
                    logo: "/assets/organized/logos/processed_house commons.png".to_string(),
                    content: "Ben's advocacy has been recognized at the highest levels of government, \
                        with direct support from Dan Carden MP and Liverpool City Council's Chief \
                        Executive Tony Reeves."
                        .to_string(),
                    quote: Some(Quote {
                        text: "Dear Ben, Thank you for recently contacting my office about your \
                            concerns...I hope my support and contacting Liverpool City Council for a \
                            referral to social services has been of some assistance and helped \
                            towards this."
                            .to_string(),
                        author: "Parliamentary - Tony".to_string(),
                    }),
                },
                Endorsement {
                    id: "local-authority".to_string(),
                    title: "LOCAL AUTHORITY RECOGNITION".to_string(),
                    subtitle: "PRACTITIONER ENDORSEMENT".to_string(),
                    logo: "/assets/organized/logos/processed_lpool city counil .png".to_string(),
                    content: "Ben's committed work on Liverpool City Council to supporting and \
                        enhancing service provision and relationships has been acknowledged by 19 \
                        years Fostering experience."
                        .to_string(),
                    quote: None,
                },
                Endorsement {
                    id: "westminster".to_string(),
                    title: "WESTMINSTER ENDORSEMENT".to_string(),
                    subtitle: "CITY COUNCIL RECOGNITION".to_string(),
                    logo: "/assets/organized/logos/processed_city westminster.png".to_string(),
                    content: "Ben's expertise in policy development and implementation has been \
                        recognized by Westminster City Council for its impact on community services."
                        .to_string(),
                    quote: None,
                },
            ],
            certificates: CertificatesPage {
                headline: "CERTIFICATIONS & QUALIFICATIONS".to_string(),
                introduction: "Ben Mak holds numerous professional certifications and qualifications \
                    that demonstrate his expertise and commitment to excellence in his field."
                    .to_string(),
                certificates_list: vec![
                    certificate(
                        "Forensic Analysis Certification",
                        "National Institute of Forensic Science",
                        "2022",
                        "/assets/organized/certificates/Finder 2025-02-12 08.46.26.png",
                    ),
                    certificate(
                        "Expert Witness Qualification",
                        "UK Legal Institute",
                        "2021",
                        "/assets/organized/certificates/Finder 2025-02-12 08.46.31.png",
                    ),
                    certificate(
                        "Advanced Digital Forensics",
                        "Cyber Security Academy",
                        "2023",
                        "/assets/organized/certificates/Finder 2025-02-12 08.46.44.png",
                    ),
                ],
            },
        }
    }

    pub fn nav_links(&self) -> &[NavLink] {
        &self.navigation
    }

    pub fn all_endorsements(&self) -> &[Endorsement] {
        &self.endorsements
    }

    /// The endorsement with this `id`, or `None` if no endorsement matches.
    pub fn endorsement_by_id(&self, id: &str) -> Option<&Endorsement> {
        self.endorsements.iter().find(|e| e.id == id)
    }

    pub fn all_certificates(&self) -> &[Certificate] {
        &self.certificates.certificates_list
    }

    /// Check that every lookup key is usable.
    ///
    /// Endorsement ids must be non-empty and unique; navigation entries need a
    /// title and a URL.
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut seen = HashSet::new();
        for endorsement in &self.endorsements {
            if endorsement.id.trim().is_empty() {
                return Err(ContentError::Validation(format!(
                    "endorsement '{}' has an empty id",
                    endorsement.title
                )));
            }
            if !seen.insert(endorsement.id.as_str()) {
                return Err(ContentError::Validation(format!(
                    "duplicate endorsement id '{}'",
                    endorsement.id
                )));
            }
        }
        for (i, nav) in self.navigation.iter().enumerate() {
            if nav.title.trim().is_empty() || nav.url.trim().is_empty() {
                return Err(ContentError::Validation(format!(
                    "navigation entry {} needs both a title and a url",
                    i + 1
                )));
            }
        }
        Ok(())
    }

    /// Serialize as a TOML document, the format [`load_content`] reads.
    pub fn to_toml(&self) -> Result<String, ContentError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

static STOCK: LazyLock<SiteContent> = LazyLock::new(SiteContent::stock);

/// The process-wide stock content.
pub fn site_content() -> &'static SiteContent {
    &STOCK
}

pub fn nav_links() -> &'static [NavLink] {
    STOCK.nav_links()
}

pub fn all_endorsements() -> &'static [Endorsement] {
    STOCK.all_endorsements()
}

pub fn endorsement_by_id(id: &str) -> Option<&'static Endorsement> {
    STOCK.endorsement_by_id(id)
}

pub fn all_certificates() -> &'static [Certificate] {
    STOCK.all_certificates()
}

/// Parse a content overlay and merge it over the stock record.
pub fn parse_content(toml_text: &str) -> Result<SiteContent, ContentError> {
    let overlay: toml::Value = toml::from_str(toml_text)?;
    let base = toml::Value::try_from(SiteContent::stock())?;
    let content: SiteContent = merge_toml(base, overlay).try_into()?;
    content.validate()?;
    Ok(content)
}

/// Load a content overlay file and merge it over the stock record.
pub fn load_content(path: &Path) -> Result<SiteContent, ContentError> {
    debug!(path = %path.display(), "loading site content");
    let text = fs::read_to_string(path)?;
    parse_content(&text)
}
