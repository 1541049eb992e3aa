//! Typed views over the raw section documents.
//!
//! Every struct tolerates missing fields so that partially edited documents
//! still deserialize; absent text reads as an empty string.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::Section;

/// Ties a typed view to the section it is read from.
pub trait SectionContent: DeserializeOwned + Serialize + Default {
    const SECTION: Section;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    pub badge: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub cta_label: String,
    pub image_url: String,
    pub image_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Feature {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutContent {
    pub section_title: String,
    pub section_subtitle: String,
    pub description: String,
    pub about_image_url: String,
    pub about_image_path: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub image_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicesContent {
    pub section_title: String,
    pub services: Vec<ServiceItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub logo_path: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientsContent {
    pub clients: Vec<Client>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub title: String,
    pub content: String,
    pub rating: u8,
}

impl Default for Testimonial {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            title: String::new(),
            content: String::new(),
            rating: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialsContent {
    pub section_title: String,
    pub section_subtitle: String,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandingContent {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_description: String,
    pub hero_image_url: String,
    pub hero_image_path: String,
    pub services_title: String,
    pub services_subtitle: String,
    pub about_title: String,
    pub about_subtitle: String,
    pub about_description: String,
    pub testimonials_title: String,
    pub testimonials_subtitle: String,
    pub contact_title: String,
    pub contact_subtitle: String,
    pub contact_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivacyContent {
    pub introduction: String,
    pub information_we_collect: String,
    pub how_we_use_info: String,
    pub information_sharing: String,
    pub data_security: String,
    pub your_rights: String,
    pub cookies_tracking: String,
    pub third_party_services: String,
    pub changes_to_policy: String,
}

impl PrivacyContent {
    /// Headings and bodies in page order, keyed by document field.
    pub fn sections(&self) -> [(&'static str, &'static str, &str); 9] {
        [
            ("introduction", "Introduction", self.introduction.as_str()),
            ("informationWeCollect", "Information We Collect", self.information_we_collect.as_str()),
            ("howWeUseInfo", "How We Use Your Information", self.how_we_use_info.as_str()),
            ("informationSharing", "Information Sharing", self.information_sharing.as_str()),
            ("dataSecurity", "Data Security", self.data_security.as_str()),
            ("yourRights", "Your Rights", self.your_rights.as_str()),
            ("cookiesTracking", "Cookies and Tracking", self.cookies_tracking.as_str()),
            ("thirdPartyServices", "Third-Party Services", self.third_party_services.as_str()),
            ("changesToPolicy", "Changes to This Policy", self.changes_to_policy.as_str()),
        ]
    }
}

/// One block of the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSection {
    pub id: String,
    pub name: String,
    pub title: String,
    pub enabled: bool,
    pub order: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSectionsContent {
    pub sections: Vec<PageSection>,
}

impl SectionContent for HeroContent {
    const SECTION: Section = Section::Hero;
}
impl SectionContent for AboutContent {
    const SECTION: Section = Section::About;
}
impl SectionContent for ServicesContent {
    const SECTION: Section = Section::Services;
}
impl SectionContent for ClientsContent {
    const SECTION: Section = Section::Clients;
}
impl SectionContent for TestimonialsContent {
    const SECTION: Section = Section::Testimonials;
}
impl SectionContent for LandingContent {
    const SECTION: Section = Section::Landing;
}
impl SectionContent for PrivacyContent {
    const SECTION: Section = Section::Privacy;
}
impl SectionContent for PageSectionsContent {
    const SECTION: Section = Section::PageSections;
}
