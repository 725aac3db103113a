//! Typed section content. One struct per [`SectionKind`], wrapped in the
//! [`SectionContent`] union which serializes with a `type` tag.

use pagecraft_common::CommonError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The catalogue of section types a page can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Hero,
    Features,
    Pricing,
    Testimonials,
    Faq,
    Team,
    Stats,
    Timeline,
    Video,
    LogoGrid,
    Cta,
    Contact,
    Newsletter,
    Gallery,
    RichText,
    ProductGrid,
}

impl SectionKind {
    pub const ALL: [SectionKind; 16] = [
        SectionKind::Hero,
        SectionKind::Features,
        SectionKind::Pricing,
        SectionKind::Testimonials,
        SectionKind::Faq,
        SectionKind::Team,
        SectionKind::Stats,
        SectionKind::Timeline,
        SectionKind::Video,
        SectionKind::LogoGrid,
        SectionKind::Cta,
        SectionKind::Contact,
        SectionKind::Newsletter,
        SectionKind::Gallery,
        SectionKind::RichText,
        SectionKind::ProductGrid,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Features => "features",
            SectionKind::Pricing => "pricing",
            SectionKind::Testimonials => "testimonials",
            SectionKind::Faq => "faq",
            SectionKind::Team => "team",
            SectionKind::Stats => "stats",
            SectionKind::Timeline => "timeline",
            SectionKind::Video => "video",
            SectionKind::LogoGrid => "logo-grid",
            SectionKind::Cta => "cta",
            SectionKind::Contact => "contact",
            SectionKind::Newsletter => "newsletter",
            SectionKind::Gallery => "gallery",
            SectionKind::RichText => "rich-text",
            SectionKind::ProductGrid => "product-grid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Hero => "Hero",
            SectionKind::Features => "Features",
            SectionKind::Pricing => "Pricing",
            SectionKind::Testimonials => "Testimonials",
            SectionKind::Faq => "FAQ",
            SectionKind::Team => "Team",
            SectionKind::Stats => "Stats",
            SectionKind::Timeline => "Timeline",
            SectionKind::Video => "Video",
            SectionKind::LogoGrid => "Logo Grid",
            SectionKind::Cta => "Call to Action",
            SectionKind::Contact => "Contact",
            SectionKind::Newsletter => "Newsletter",
            SectionKind::Gallery => "Gallery",
            SectionKind::RichText => "Rich Text",
            SectionKind::ProductGrid => "Product Grid",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SectionKind {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SectionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| CommonError::unknown("section kind", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

impl Image {
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeroLayout {
    #[default]
    Centered,
    Split,
    Background,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroContent {
    pub headline: String,
    pub subheadline: String,
    pub primary_cta: Option<Link>,
    pub secondary_cta: Option<Link>,
    pub image: Option<Image>,
    pub layout: HeroLayout,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesContent {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<FeatureItem>,
    pub columns: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPlan {
    pub name: String,
    /// Display price ("29", "Custom")
    pub price: String,
    pub currency: String,
    pub period: String,
    pub features: Vec<String>,
    pub cta: Option<Link>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingContent {
    pub title: String,
    pub subtitle: String,
    pub plans: Vec<PricingPlan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
    pub avatar: Option<Image>,
    /// 1..=5 stars
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialsContent {
    pub title: String,
    pub items: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqContent {
    pub title: String,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub photo: Option<Image>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamContent {
    pub title: String,
    pub subtitle: String,
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatItem {
    pub value: String,
    pub label: String,
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsContent {
    pub title: String,
    pub items: Vec<StatItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEvent {
    pub date: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineContent {
    pub title: String,
    pub events: Vec<TimelineEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoContent {
    pub title: String,
    pub url: String,
    pub poster: Option<Image>,
    pub caption: String,
    pub autoplay: bool,
    pub loop_playback: bool,
    pub muted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Logo {
    pub name: String,
    pub image: Image,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoGridContent {
    pub title: String,
    pub logos: Vec<Logo>,
    pub grayscale: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaContent {
    pub headline: String,
    pub body: String,
    pub button: Link,
    pub secondary: Option<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Phone,
    Textarea,
}

impl FieldKind {
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Textarea => "text",
            FieldKind::Email => "email",
            FieldKind::Phone => "tel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactContent {
    pub title: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub show_form: bool,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterContent {
    pub headline: String,
    pub body: String,
    pub placeholder: String,
    pub button_label: String,
    pub consent_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryContent {
    pub title: String,
    pub images: Vec<Image>,
    pub columns: u8,
    pub lightbox: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RichTextContent {
    /// Paragraphs separated by blank lines
    pub body: String,
    pub max_width: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductSource {
    #[default]
    Featured,
    Collection,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductGridContent {
    pub title: String,
    pub source: ProductSource,
    pub collection: Option<String>,
    pub product_ids: Vec<String>,
    pub limit: u8,
    pub columns: u8,
    pub show_price: bool,
}

/// Content of one section, tagged with its kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SectionContent {
    Hero(HeroContent),
    Features(FeaturesContent),
    Pricing(PricingContent),
    Testimonials(TestimonialsContent),
    Faq(FaqContent),
    Team(TeamContent),
    Stats(StatsContent),
    Timeline(TimelineContent),
    Video(VideoContent),
    LogoGrid(LogoGridContent),
    Cta(CtaContent),
    Contact(ContactContent),
    Newsletter(NewsletterContent),
    Gallery(GalleryContent),
    RichText(RichTextContent),
    ProductGrid(ProductGridContent),
}

impl SectionContent {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionContent::Hero(_) => SectionKind::Hero,
            SectionContent::Features(_) => SectionKind::Features,
            SectionContent::Pricing(_) => SectionKind::Pricing,
            SectionContent::Testimonials(_) => SectionKind::Testimonials,
            SectionContent::Faq(_) => SectionKind::Faq,
            SectionContent::Team(_) => SectionKind::Team,
            SectionContent::Stats(_) => SectionKind::Stats,
            SectionContent::Timeline(_) => SectionKind::Timeline,
            SectionContent::Video(_) => SectionKind::Video,
            SectionContent::LogoGrid(_) => SectionKind::LogoGrid,
            SectionContent::Cta(_) => SectionKind::Cta,
            SectionContent::Contact(_) => SectionKind::Contact,
            SectionContent::Newsletter(_) => SectionKind::Newsletter,
            SectionContent::Gallery(_) => SectionKind::Gallery,
            SectionContent::RichText(_) => SectionKind::RichText,
            SectionContent::ProductGrid(_) => SectionKind::ProductGrid,
        }
    }

    /// Starter content shown when a section is dropped onto the canvas
    pub fn default_for(kind: SectionKind) -> SectionContent {
        match kind {
            SectionKind::Hero => SectionContent::Hero(HeroContent {
                headline: "Build something people love".to_string(),
                subheadline: "Launch your store in minutes with a page that converts.".to_string(),
                primary_cta: Some(Link::new("Get started", "#")),
                secondary_cta: None,
                image: None,
                layout: HeroLayout::Centered,
            }),
            SectionKind::Features => SectionContent::Features(FeaturesContent {
                title: "Why choose us".to_string(),
                subtitle: String::new(),
                items: (1..=3)
                    .map(|i| FeatureItem {
                        icon: "star".to_string(),
                        title: format!("Feature {}", i),
                        description: "Describe what makes this feature valuable.".to_string(),
                    })
                    .collect(),
                columns: 3,
            }),
            SectionKind::Pricing => SectionContent::Pricing(PricingContent {
                title: "Simple pricing".to_string(),
                subtitle: String::new(),
                plans: vec![
                    PricingPlan {
                        name: "Starter".to_string(),
                        price: "19".to_string(),
                        currency: "USD".to_string(),
                        period: "month".to_string(),
                        features: vec!["1 store".to_string(), "Email support".to_string()],
                        cta: Some(Link::new("Choose Starter", "#")),
                        highlighted: false,
                    },
                    PricingPlan {
                        name: "Pro".to_string(),
                        price: "49".to_string(),
                        currency: "USD".to_string(),
                        period: "month".to_string(),
                        features: vec!["5 stores".to_string(), "Priority support".to_string()],
                        cta: Some(Link::new("Choose Pro", "#")),
                        highlighted: true,
                    },
                ],
            }),
            SectionKind::Testimonials => SectionContent::Testimonials(TestimonialsContent {
                title: "What customers say".to_string(),
                items: vec![Testimonial {
                    quote: "Setting up our shop took an afternoon.".to_string(),
                    author: "Jordan Lee".to_string(),
                    role: "Founder".to_string(),
                    avatar: None,
                    rating: Some(5),
                }],
            }),
            SectionKind::Faq => SectionContent::Faq(FaqContent {
                title: "Frequently asked questions".to_string(),
                items: vec![FaqItem {
                    question: "How long does shipping take?".to_string(),
                    answer: "Most orders arrive within 3-5 business days.".to_string(),
                }],
            }),
            SectionKind::Team => SectionContent::Team(TeamContent {
                title: "Meet the team".to_string(),
                subtitle: String::new(),
                members: vec![TeamMember {
                    name: "Alex Morgan".to_string(),
                    role: "CEO".to_string(),
                    ..TeamMember::default()
                }],
            }),
            SectionKind::Stats => SectionContent::Stats(StatsContent {
                title: String::new(),
                items: vec![
                    StatItem {
                        value: "10k".to_string(),
                        label: "Customers".to_string(),
                        suffix: Some("+".to_string()),
                    },
                    StatItem {
                        value: "99.9".to_string(),
                        label: "Uptime".to_string(),
                        suffix: Some("%".to_string()),
                    },
                ],
            }),
            SectionKind::Timeline => SectionContent::Timeline(TimelineContent {
                title: "Our story".to_string(),
                events: vec![TimelineEvent {
                    date: "2020".to_string(),
                    title: "Founded".to_string(),
                    description: "Started in a garage with one product.".to_string(),
                }],
            }),
            SectionKind::Video => SectionContent::Video(VideoContent {
                title: "See it in action".to_string(),
                url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
                muted: true,
                ..VideoContent::default()
            }),
            SectionKind::LogoGrid => SectionContent::LogoGrid(LogoGridContent {
                title: "Trusted by".to_string(),
                logos: vec![],
                grayscale: true,
            }),
            SectionKind::Cta => SectionContent::Cta(CtaContent {
                headline: "Ready to get started?".to_string(),
                body: String::new(),
                button: Link::new("Start free trial", "#"),
                secondary: None,
            }),
            SectionKind::Contact => SectionContent::Contact(ContactContent {
                title: "Get in touch".to_string(),
                email: None,
                phone: None,
                address: None,
                show_form: true,
                fields: vec![
                    FormField {
                        name: "name".to_string(),
                        label: "Name".to_string(),
                        kind: FieldKind::Text,
                        required: true,
                    },
                    FormField {
                        name: "email".to_string(),
                        label: "Email".to_string(),
                        kind: FieldKind::Email,
                        required: true,
                    },
                    FormField {
                        name: "message".to_string(),
                        label: "Message".to_string(),
                        kind: FieldKind::Textarea,
                        required: false,
                    },
                ],
            }),
            SectionKind::Newsletter => SectionContent::Newsletter(NewsletterContent {
                headline: "Stay in the loop".to_string(),
                body: "New arrivals and offers, once a month.".to_string(),
                placeholder: "you@example.com".to_string(),
                button_label: "Subscribe".to_string(),
                consent_text: None,
            }),
            SectionKind::Gallery => SectionContent::Gallery(GalleryContent {
                title: "Gallery".to_string(),
                images: vec![],
                columns: 3,
                lightbox: true,
            }),
            SectionKind::RichText => SectionContent::RichText(RichTextContent {
                body: "Tell your story here.".to_string(),
                max_width: Some(720),
            }),
            SectionKind::ProductGrid => SectionContent::ProductGrid(ProductGridContent {
                title: "Featured products".to_string(),
                source: ProductSource::Featured,
                collection: None,
                product_ids: vec![],
                limit: 8,
                columns: 4,
                show_price: true,
            }),
        }
    }

    /// Best-effort headline used for outlines and layer panels
    pub fn headline(&self) -> &str {
        match self {
            SectionContent::Hero(c) => &c.headline,
            SectionContent::Features(c) => &c.title,
            SectionContent::Pricing(c) => &c.title,
            SectionContent::Testimonials(c) => &c.title,
            SectionContent::Faq(c) => &c.title,
            SectionContent::Team(c) => &c.title,
            SectionContent::Stats(c) => &c.title,
            SectionContent::Timeline(c) => &c.title,
            SectionContent::Video(c) => &c.title,
            SectionContent::LogoGrid(c) => &c.title,
            SectionContent::Cta(c) => &c.headline,
            SectionContent::Contact(c) => &c.title,
            SectionContent::Newsletter(c) => &c.headline,
            SectionContent::Gallery(c) => &c.title,
            SectionContent::RichText(c) => c.body.lines().next().unwrap_or(""),
            SectionContent::ProductGrid(c) => &c.title,
        }
    }
}
