//! # Template Library
//!
//! Built-in starting points plus user-registered templates.
//!
//! Template sections carry placeholder ids (`hero`, `pricing`, ...). When a
//! template is instantiated every section gets a fresh id from the store's
//! [`IdGenerator`], so a template can be applied to the same page twice.

use crate::EditorError;
use pagecraft_common::IdGenerator;
use pagecraft_model::{
    CtaContent, FaqContent, FaqItem, FeatureItem, FeaturesContent, GalleryContent, GlobalStyles,
    HeroContent, HeroLayout, Image, Link, Page, ProductGridContent, ProductSource,
    RichTextContent, Section, SectionContent, SectionKind, StatItem, StatsContent, TeamContent,
    TeamMember, Template, TemplateCategory, Testimonial, TestimonialsContent, TimelineContent,
    TimelineEvent,
};
use std::collections::HashSet;

/// Registry of templates keyed by id (insertion order preserved)
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library with the built-in templates
    pub fn builtin() -> Self {
        Self {
            templates: vec![blank(), landing(), ecommerce_store(), saas(), portfolio(), about()],
        }
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn by_category(&self, category: TemplateCategory) -> impl Iterator<Item = &Template> {
        self.templates.iter().filter(move |t| t.category == category)
    }

    /// Add a template, replacing any template with the same id
    pub fn register(&mut self, template: Template) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    /// Clone the sections of template `id` with fresh ids that do not
    /// collide with `page`. Anchors already used on `page` are dropped.
    pub fn instantiate(
        &self,
        id: &str,
        ids: &mut IdGenerator,
        page: &Page,
    ) -> Result<Vec<Section>, EditorError> {
        let template = self
            .get(id)
            .ok_or_else(|| EditorError::TemplateNotFound(id.to_string()))?;
        Ok(instantiate_template(template, ids, page))
    }
}

/// Clone template sections with fresh ids (see [`TemplateLibrary::instantiate`])
pub fn instantiate_template(template: &Template, ids: &mut IdGenerator, page: &Page) -> Vec<Section> {
    let anchors = page
        .sections
        .iter()
        .filter_map(|s| s.settings.anchor_id.clone())
        .collect();
    instantiate_sections(template, ids, page, anchors)
}

/// Clone template sections with ids fresh for `page`, dropping only the
/// anchors already in `anchors`
pub(crate) fn instantiate_sections(
    template: &Template,
    ids: &mut IdGenerator,
    page: &Page,
    mut anchors: HashSet<String>,
) -> Vec<Section> {
    let mut taken: Vec<String> = page.sections.iter().map(|s| s.id.clone()).collect();

    template
        .sections
        .iter()
        .map(|section| {
            let id = ids.new_id_avoiding(taken.iter().map(String::as_str));
            taken.push(id.clone());

            let mut copy = section.clone();
            copy.id = id;
            copy.locked = false;
            if let Some(anchor) = &copy.settings.anchor_id {
                if !anchors.insert(anchor.clone()) {
                    copy.settings.anchor_id = None;
                }
            }
            copy
        })
        .collect()
}

fn section(id: &str, content: SectionContent) -> Section {
    Section::with_content(id, content)
}

fn anchored(mut section: Section, anchor: &str) -> Section {
    section.settings.anchor_id = Some(anchor.to_string());
    section
}

fn blank() -> Template {
    Template {
        id: "blank".to_string(),
        name: "Blank".to_string(),
        description: "An empty page".to_string(),
        category: TemplateCategory::Blank,
        sections: vec![],
        global_styles: None,
    }
}

fn landing() -> Template {
    Template {
        id: "landing".to_string(),
        name: "Landing Page".to_string(),
        description: "Hero, features, social proof and a call to action".to_string(),
        category: TemplateCategory::Landing,
        sections: vec![
            Section::new("hero", SectionKind::Hero),
            anchored(Section::new("features", SectionKind::Features), "features"),
            Section::new("testimonials", SectionKind::Testimonials),
            anchored(Section::new("faq", SectionKind::Faq), "faq"),
            Section::new("cta", SectionKind::Cta),
        ],
        global_styles: None,
    }
}

fn ecommerce_store() -> Template {
    Template {
        id: "ecommerce-store".to_string(),
        name: "Online Store".to_string(),
        description: "Storefront with featured products, perks and a newsletter".to_string(),
        category: TemplateCategory::Ecommerce,
        sections: vec![
            section(
                "hero",
                SectionContent::Hero(HeroContent {
                    headline: "New season, new arrivals".to_string(),
                    subheadline: "Free shipping on orders over $50.".to_string(),
                    primary_cta: Some(Link::new("Shop now", "#products")),
                    secondary_cta: Some(Link::new("View collections", "/collections")),
                    image: None,
                    layout: HeroLayout::Split,
                }),
            ),
            anchored(
                section(
                    "products",
                    SectionContent::ProductGrid(ProductGridContent {
                        title: "Best sellers".to_string(),
                        source: ProductSource::Featured,
                        collection: None,
                        product_ids: vec![],
                        limit: 8,
                        columns: 4,
                        show_price: true,
                    }),
                ),
                "products",
            ),
            section(
                "perks",
                SectionContent::Features(FeaturesContent {
                    title: "Why shop with us".to_string(),
                    subtitle: String::new(),
                    items: vec![
                        feature("truck", "Fast delivery", "Orders ship within 24 hours."),
                        feature("refresh", "Easy returns", "30 days to change your mind."),
                        feature("lock", "Secure checkout", "Encrypted payments."),
                    ],
                    columns: 3,
                }),
            ),
            Section::new("reviews", SectionKind::Testimonials),
            Section::new("newsletter", SectionKind::Newsletter),
        ],
        global_styles: Some(GlobalStyles {
            primary_color: "#111827".to_string(),
            accent_color: "#ef4444".to_string(),
            ..GlobalStyles::default()
        }),
    }
}

fn feature(icon: &str, title: &str, description: &str) -> FeatureItem {
    FeatureItem {
        icon: icon.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn saas() -> Template {
    Template {
        id: "saas".to_string(),
        name: "SaaS Product".to_string(),
        description: "Product launch page with pricing and FAQ".to_string(),
        category: TemplateCategory::Saas,
        sections: vec![
            Section::new("hero", SectionKind::Hero),
            Section::new("logos", SectionKind::LogoGrid),
            anchored(Section::new("features", SectionKind::Features), "features"),
            section(
                "stats",
                SectionContent::Stats(StatsContent {
                    title: "Trusted at scale".to_string(),
                    items: vec![
                        stat("2M", "Requests per day", Some("+")),
                        stat("150", "Countries", None),
                        stat("99.99", "Uptime", Some("%")),
                    ],
                }),
            ),
            anchored(Section::new("pricing", SectionKind::Pricing), "pricing"),
            section(
                "faq",
                SectionContent::Faq(FaqContent {
                    title: "Questions".to_string(),
                    items: vec![
                        FaqItem {
                            question: "Is there a free trial?".to_string(),
                            answer: "Yes, every plan starts with 14 days free.".to_string(),
                        },
                        FaqItem {
                            question: "Can I cancel anytime?".to_string(),
                            answer: "Plans are month to month.".to_string(),
                        },
                    ],
                }),
            ),
            Section::new("cta", SectionKind::Cta),
        ],
        global_styles: None,
    }
}

fn stat(value: &str, label: &str, suffix: Option<&str>) -> StatItem {
    StatItem {
        value: value.to_string(),
        label: label.to_string(),
        suffix: suffix.map(str::to_string),
    }
}

fn portfolio() -> Template {
    Template {
        id: "portfolio".to_string(),
        name: "Portfolio".to_string(),
        description: "Showcase work with a gallery and testimonials".to_string(),
        category: TemplateCategory::Portfolio,
        sections: vec![
            section(
                "hero",
                SectionContent::Hero(HeroContent {
                    headline: "Design that tells a story".to_string(),
                    subheadline: "Selected work from the last five years.".to_string(),
                    primary_cta: Some(Link::new("See projects", "#work")),
                    layout: HeroLayout::Split,
                    ..HeroContent::default()
                }),
            ),
            anchored(
                section(
                    "work",
                    SectionContent::Gallery(GalleryContent {
                        title: "Recent work".to_string(),
                        images: (1..=6)
                            .map(|i| {
                                Image::new(
                                    format!("https://images.example.com/work-{}.jpg", i),
                                    format!("Project {}", i),
                                )
                            })
                            .collect(),
                        columns: 3,
                        lightbox: true,
                    }),
                ),
                "work",
            ),
            section(
                "kind-words",
                SectionContent::Testimonials(TestimonialsContent {
                    title: "Kind words".to_string(),
                    items: vec![Testimonial {
                        quote: "Delivered ahead of schedule and beyond the brief.".to_string(),
                        author: "Sam Rivera".to_string(),
                        role: "Creative Director".to_string(),
                        avatar: None,
                        rating: None,
                    }],
                }),
            ),
            anchored(Section::new("contact", SectionKind::Contact), "contact"),
        ],
        global_styles: Some(GlobalStyles {
            primary_color: "#0f172a".to_string(),
            heading_font: "Playfair Display, serif".to_string(),
            ..GlobalStyles::default()
        }),
    }
}

fn about() -> Template {
    Template {
        id: "about".to_string(),
        name: "About Us".to_string(),
        description: "Company story, timeline and team".to_string(),
        category: TemplateCategory::About,
        sections: vec![
            section(
                "story",
                SectionContent::RichText(RichTextContent {
                    body: "We started with a simple idea: make selling online feel effortless."
                        .to_string(),
                    max_width: Some(720),
                }),
            ),
            section(
                "timeline",
                SectionContent::Timeline(TimelineContent {
                    title: "Milestones".to_string(),
                    events: vec![
                        event("2019", "Founded", "Two people and a laptop."),
                        event("2021", "First 1,000 stores", "Word of mouth did the rest."),
                        event("2024", "Going global", "Opened offices in three countries."),
                    ],
                }),
            ),
            anchored(
                section(
                    "team",
                    SectionContent::Team(TeamContent {
                        title: "The team".to_string(),
                        subtitle: String::new(),
                        members: vec![
                            member("Alex Morgan", "CEO"),
                            member("Priya Shah", "CTO"),
                            member("Chris Okafor", "Head of Design"),
                        ],
                    }),
                ),
                "team",
            ),
            section(
                "cta",
                SectionContent::Cta(CtaContent {
                    headline: "Want to work with us?".to_string(),
                    body: "We are always looking for curious people.".to_string(),
                    button: Link::new("See open roles", "/careers"),
                    secondary: None,
                }),
            ),
        ],
        global_styles: None,
    }
}

fn event(date: &str, title: &str, description: &str) -> TimelineEvent {
    TimelineEvent {
        date: date.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn member(name: &str, role: &str) -> TeamMember {
    TeamMember {
        name: name.to_string(),
        role: role.to_string(),
        ..TeamMember::default()
    }
}
