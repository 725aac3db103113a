use crate::context::{Attrs, Context};
use crate::styles;
use pagecraft_model::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Unsafe URL in section {section_id}: {url}")]
    UnsafeUrl { section_id: String, url: String },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Compilation error: {0}")]
    Generic(String),
}

impl From<String> for CompileError {
    fn from(s: String) -> Self {
        CompileError::Generic(s)
    }
}

impl From<&str> for CompileError {
    fn from(s: &str) -> Self {
        CompileError::Generic(s.to_string())
    }
}

/// Options for HTML compilation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Full document with `<head>`; otherwise a fragment (style + sections)
    pub standalone: bool,
    /// Render for a single device: hidden sections are dropped and no media
    /// queries are emitted
    pub device: Option<Device>,
    /// Emit `data-animate` attributes and keyframes
    pub animations: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            standalone: true,
            device: None,
            animations: true,
        }
    }
}

fn attr(name: &str, value: impl Into<String>) -> (&str, Option<String>) {
    (name, Some(value.into()))
}

fn flag(name: &str, on: bool) -> (&str, Option<String>) {
    (name, on.then(String::new))
}

/// Compile a page to HTML
pub fn compile_to_html(page: &Page, options: &CompileOptions) -> Result<String, CompileError> {
    if !options.indent.chars().all(char::is_whitespace) {
        return Err(CompileError::InvalidOption(format!(
            "indent must be whitespace, got {:?}",
            options.indent
        )));
    }

    let sections: Vec<&Section> = page
        .sections
        .iter()
        .filter(|s| match options.device {
            Some(device) => s.is_visible_on(device),
            None => s.visible,
        })
        .collect();

    let mut ctx = Context::new(options);

    if options.standalone {
        ctx.add_line("<!DOCTYPE html>");
        ctx.open("html", &[attr("lang", "en")]);
        compile_head(page, &sections, &mut ctx);
        ctx.open("body", &[]);
    } else {
        compile_style(page, &sections, &mut ctx);
    }

    ctx.open("main", &[attr("class", "pc-page")]);
    for section in &sections {
        compile_section(section, &mut ctx)?;
    }
    ctx.close("main");

    if options.standalone {
        ctx.close("body");
        ctx.close("html");
    }

    debug!(
        page = %page.id,
        sections = sections.len(),
        device = ?options.device,
        "compiled page to HTML"
    );

    Ok(ctx.get_output())
}

fn compile_head(page: &Page, sections: &[&Section], ctx: &mut Context) {
    ctx.open("head", &[]);

    ctx.void("meta", &[attr("charset", "UTF-8")]);
    ctx.void(
        "meta",
        &[
            attr("name", "viewport"),
            attr("content", "width=device-width, initial-scale=1.0"),
        ],
    );

    let title = if page.meta.title.trim().is_empty() {
        &page.title
    } else {
        &page.meta.title
    };
    ctx.element("title", &[], title);

    if !page.meta.description.trim().is_empty() {
        ctx.void(
            "meta",
            &[
                attr("name", "description"),
                attr("content", page.meta.description.clone()),
            ],
        );
    }
    if !page.meta.keywords.is_empty() {
        ctx.void(
            "meta",
            &[
                attr("name", "keywords"),
                attr("content", page.meta.keywords.join(", ")),
            ],
        );
    }
    if let Some(image) = page.meta.social_image.as_deref().filter(|u| is_safe_url(u)) {
        ctx.void(
            "meta",
            &[attr("property", "og:image"), attr("content", image)],
        );
    }

    compile_style(page, sections, ctx);

    ctx.close("head");
}

fn compile_style(page: &Page, sections: &[&Section], ctx: &mut Context) {
    ctx.open("style", &[]);

    for rule in styles::base_rules(&page.global_styles) {
        ctx.add_line(&rule);
    }

    let animations = ctx.options.animations;
    let mut used = Vec::new();
    for section in sections {
        for rule in styles::section_rules(section, ctx.options.device, animations) {
            ctx.add_line(&rule);
        }
        let kind = section.settings.animation.kind;
        if animations && section.settings.animation.is_enabled() && !used.contains(&kind) {
            used.push(kind);
        }
    }

    for kind in used {
        if let Some(keyframes) = styles::keyframes(kind) {
            ctx.add_line(&keyframes);
        }
    }
    if animations {
        ctx.add_line(
            "@media (prefers-reduced-motion: reduce) { [data-animate] { animation: none !important; } }",
        );
    }

    ctx.close("style");
}

fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    if lower.starts_with("data:") {
        return lower.starts_with("data:image/");
    }
    !(lower.starts_with("javascript:") || lower.starts_with("vbscript:"))
}

fn compile_section(section: &Section, ctx: &mut Context) -> Result<(), CompileError> {
    let settings = &section.settings;
    let kind = section.kind();

    let mut class = format!("pc-section pc-{}", kind.slug());
    if settings.full_width {
        class.push_str(" pc-full-width");
    }
    if let Some(custom) = settings.custom_class.as_deref().map(str::trim) {
        if !custom.is_empty() {
            class.push(' ');
            class.push_str(custom);
        }
    }

    let animate = ctx.options.animations && settings.animation.is_enabled();
    let animation = &settings.animation;
    let attrs = [
        ("id", settings.anchor_id.clone()),
        attr("class", class),
        attr("data-section", section.id.clone()),
        ("data-animate", animate.then(|| animation.kind.as_str().to_string())),
        (
            "data-animate-duration",
            animate.then(|| animation.duration_ms.to_string()),
        ),
        (
            "data-animate-delay",
            animate.then(|| animation.delay_ms.to_string()),
        ),
        (
            "data-animate-easing",
            animate.then(|| animation.easing.as_css().to_string()),
        ),
        ("data-animate-once", (animate && animation.once).then(String::new)),
    ];

    ctx.open("section", &attrs);
    ctx.open("div", &[attr("class", "pc-container")]);

    let mut writer = SectionWriter {
        section,
        ctx: &mut *ctx,
    };
    writer.content(&section.content)?;

    ctx.close("div");
    ctx.close("section");
    Ok(())
}

struct SectionWriter<'s, 'c, 'o> {
    section: &'s Section,
    ctx: &'c mut Context<'o>,
}

impl SectionWriter<'_, '_, '_> {
    fn url(&self, url: &str) -> Result<String, CompileError> {
        if is_safe_url(url) {
            Ok(url.trim().to_string())
        } else {
            Err(CompileError::UnsafeUrl {
                section_id: self.section.id.clone(),
                url: url.to_string(),
            })
        }
    }

    fn link(&mut self, link: &Link, class: &str) -> Result<(), CompileError> {
        let href = self.url(&link.url)?;
        self.ctx
            .element("a", &[attr("class", class), attr("href", href)], &link.label);
        Ok(())
    }

    fn image(&mut self, image: &Image, class: Option<&str>) -> Result<(), CompileError> {
        if image.url.trim().is_empty() {
            return Ok(());
        }
        let src = self.url(&image.url)?;
        self.ctx.void(
            "img",
            &[
                ("class", class.map(str::to_string)),
                attr("src", src),
                attr("alt", image.alt.clone()),
                attr("loading", "lazy"),
            ],
        );
        Ok(())
    }

    fn heading(&mut self, tag: &str, text: &str) {
        self.ctx.element_if(tag, &[], text);
    }

    fn paragraph(&mut self, class: &str, text: &str) {
        self.ctx.element_if("p", &[attr("class", class)], text);
    }

    fn grid_open(&mut self, tag: &str, class: &str, columns: u8) {
        let style = (columns > 0).then(|| format!("--pc-columns: {}", columns));
        self.ctx.open(
            tag,
            &[attr("class", format!("pc-grid {}", class)), ("style", style)],
        );
    }

    fn content(&mut self, content: &SectionContent) -> Result<(), CompileError> {
        match content {
            SectionContent::Hero(c) => self.hero(c),
            SectionContent::Features(c) => {
                self.heading("h2", &c.title);
                self.paragraph("pc-subtitle", &c.subtitle);
                self.grid_open("ul", "pc-features", c.columns);
                for item in &c.items {
                    self.ctx.open("li", &[attr("class", "pc-feature")]);
                    if !item.icon.is_empty() {
                        self.ctx.element(
                            "span",
                            &[
                                attr("class", "pc-icon"),
                                attr("data-icon", item.icon.clone()),
                                attr("aria-hidden", "true"),
                            ],
                            "",
                        );
                    }
                    self.heading("h3", &item.title);
                    self.paragraph("pc-description", &item.description);
                    self.ctx.close("li");
                }
                self.ctx.close("ul");
                Ok(())
            }
            SectionContent::Pricing(c) => self.pricing(c),
            SectionContent::Testimonials(c) => {
                self.heading("h2", &c.title);
                self.grid_open("div", "pc-testimonials", 0);
                for item in &c.items {
                    self.ctx.open("blockquote", &[attr("class", "pc-testimonial")]);
                    self.ctx.element("p", &[], &item.quote);
                    if let Some(rating) = item.rating {
                        let rating = rating.min(5);
                        self.ctx.element(
                            "span",
                            &[
                                attr("class", "pc-rating"),
                                attr("aria-label", format!("{} out of 5", rating)),
                            ],
                            &"★".repeat(rating as usize),
                        );
                    }
                    self.ctx.open("footer", &[]);
                    if let Some(avatar) = &item.avatar {
                        self.image(avatar, Some("pc-avatar"))?;
                    }
                    self.ctx.element("cite", &[], &item.author);
                    self.ctx.element_if("span", &[attr("class", "pc-role")], &item.role);
                    self.ctx.close("footer");
                    self.ctx.close("blockquote");
                }
                self.ctx.close("div");
                Ok(())
            }
            SectionContent::Faq(c) => {
                self.heading("h2", &c.title);
                for item in &c.items {
                    self.ctx.open("details", &[attr("class", "pc-faq-item")]);
                    self.ctx.element("summary", &[], &item.question);
                    self.ctx.element("p", &[], &item.answer);
                    self.ctx.close("details");
                }
                Ok(())
            }
            SectionContent::Team(c) => {
                self.heading("h2", &c.title);
                self.paragraph("pc-subtitle", &c.subtitle);
                self.grid_open("div", "pc-team", 0);
                for member in &c.members {
                    self.ctx.open("article", &[attr("class", "pc-member")]);
                    if let Some(photo) = &member.photo {
                        self.image(photo, Some("pc-photo"))?;
                    }
                    self.heading("h3", &member.name);
                    self.paragraph("pc-role", &member.role);
                    self.paragraph("pc-bio", &member.bio);
                    if !member.links.is_empty() {
                        self.ctx.open("ul", &[attr("class", "pc-links")]);
                        for link in &member.links {
                            self.ctx.open("li", &[]);
                            self.link(link, "pc-link")?;
                            self.ctx.close("li");
                        }
                        self.ctx.close("ul");
                    }
                    self.ctx.close("article");
                }
                self.ctx.close("div");
                Ok(())
            }
            SectionContent::Stats(c) => {
                self.heading("h2", &c.title);
                self.grid_open("dl", "pc-stats", 0);
                for item in &c.items {
                    self.ctx.open("div", &[attr("class", "pc-stat")]);
                    let value = format!("{}{}", item.value, item.suffix.as_deref().unwrap_or(""));
                    self.ctx.element("dd", &[], &value);
                    self.ctx.element("dt", &[], &item.label);
                    self.ctx.close("div");
                }
                self.ctx.close("dl");
                Ok(())
            }
            SectionContent::Timeline(c) => {
                self.heading("h2", &c.title);
                self.ctx.open("ol", &[attr("class", "pc-timeline")]);
                for event in &c.events {
                    self.ctx.open("li", &[]);
                    self.ctx.element_if("time", &[], &event.date);
                    self.heading("h3", &event.title);
                    self.paragraph("pc-description", &event.description);
                    self.ctx.close("li");
                }
                self.ctx.close("ol");
                Ok(())
            }
            SectionContent::Video(c) => self.video(c),
            SectionContent::LogoGrid(c) => {
                self.heading("h2", &c.title);
                let class = if c.grayscale {
                    "pc-logos pc-grayscale"
                } else {
                    "pc-logos"
                };
                self.grid_open("ul", class, 0);
                for logo in &c.logos {
                    self.ctx.open("li", &[]);
                    let image = Image::new(logo.image.url.clone(), alt_or(&logo.image.alt, &logo.name));
                    match &logo.url {
                        Some(url) if !url.is_empty() => {
                            let href = self.url(url)?;
                            self.ctx.open("a", &[attr("href", href)]);
                            self.image(&image, None)?;
                            self.ctx.close("a");
                        }
                        _ => self.image(&image, None)?,
                    }
                    self.ctx.close("li");
                }
                self.ctx.close("ul");
                Ok(())
            }
            SectionContent::Cta(c) => {
                self.heading("h2", &c.headline);
                self.paragraph("pc-body", &c.body);
                self.ctx.open("div", &[attr("class", "pc-actions")]);
                self.link(&c.button, "pc-button")?;
                if let Some(secondary) = &c.secondary {
                    self.link(secondary, "pc-button pc-button-secondary")?;
                }
                self.ctx.close("div");
                Ok(())
            }
            SectionContent::Contact(c) => self.contact(c),
            SectionContent::Newsletter(c) => {
                self.heading("h2", &c.headline);
                self.paragraph("pc-body", &c.body);
                self.ctx.open("form", &[attr("class", "pc-newsletter-form"), attr("method", "post")]);
                self.ctx.void(
                    "input",
                    &[
                        attr("type", "email"),
                        attr("name", "email"),
                        attr("placeholder", c.placeholder.clone()),
                        flag("required", true),
                    ],
                );
                self.ctx.element("button", &[attr("type", "submit")], &c.button_label);
                if let Some(consent) = &c.consent_text {
                    self.ctx.element_if("small", &[attr("class", "pc-consent")], consent);
                }
                self.ctx.close("form");
                Ok(())
            }
            SectionContent::Gallery(c) => {
                self.heading("h2", &c.title);
                self.ctx.open(
                    "div",
                    &[
                        attr("class", "pc-grid pc-gallery"),
                        ("style", (c.columns > 0).then(|| format!("--pc-columns: {}", c.columns))),
                        ("data-lightbox", c.lightbox.then(|| "true".to_string())),
                    ],
                );
                for image in &c.images {
                    self.ctx.open("figure", &[]);
                    self.image(image, None)?;
                    self.ctx.close("figure");
                }
                self.ctx.close("div");
                Ok(())
            }
            SectionContent::RichText(c) => {
                let style = c.max_width.map(|w| format!("max-width: {}px", w));
                self.ctx.open("div", &[attr("class", "pc-rich-text"), ("style", style)]);
                for paragraph in c.body.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
                    let html = paragraph
                        .lines()
                        .map(|line| crate::escape_html(line.trim()))
                        .collect::<Vec<_>>()
                        .join("<br>");
                    self.ctx.add_line(&format!("<p>{}</p>", html));
                }
                self.ctx.close("div");
                Ok(())
            }
            SectionContent::ProductGrid(c) => {
                self.heading("h2", &c.title);
                let source = match c.source {
                    ProductSource::Featured => "featured",
                    ProductSource::Collection => "collection",
                    ProductSource::Manual => "manual",
                };
                self.ctx.element(
                    "div",
                    &[
                        attr("class", "pc-grid pc-products"),
                        ("style", (c.columns > 0).then(|| format!("--pc-columns: {}", c.columns))),
                        attr("data-source", source),
                        ("data-collection", c.collection.clone()),
                        (
                            "data-product-ids",
                            (!c.product_ids.is_empty()).then(|| c.product_ids.join(",")),
                        ),
                        attr("data-limit", c.limit.to_string()),
                        attr("data-show-price", c.show_price.to_string()),
                    ],
                    "",
                );
                Ok(())
            }
        }
    }

    fn hero(&mut self, c: &HeroContent) -> Result<(), CompileError> {
        let layout = match c.layout {
            HeroLayout::Centered => "centered",
            HeroLayout::Split => "split",
            HeroLayout::Background => "background",
        };
        self.ctx.open("div", &[attr("class", format!("pc-hero pc-hero-{}", layout))]);
        self.ctx.open("div", &[attr("class", "pc-hero-text")]);
        self.heading("h1", &c.headline);
        self.paragraph("pc-subheadline", &c.subheadline);
        if c.primary_cta.is_some() || c.secondary_cta.is_some() {
            self.ctx.open("div", &[attr("class", "pc-actions")]);
            if let Some(link) = &c.primary_cta {
                self.link(link, "pc-button")?;
            }
            if let Some(link) = &c.secondary_cta {
                self.link(link, "pc-button pc-button-secondary")?;
            }
            self.ctx.close("div");
        }
        self.ctx.close("div");
        if let Some(image) = &c.image {
            self.image(image, Some("pc-hero-image"))?;
        }
        self.ctx.close("div");
        Ok(())
    }

    fn pricing(&mut self, c: &PricingContent) -> Result<(), CompileError> {
        self.heading("h2", &c.title);
        self.paragraph("pc-subtitle", &c.subtitle);
        let columns = u8::try_from(c.plans.len()).unwrap_or(4).clamp(1, 4);
        self.grid_open("div", "pc-pricing", columns);
        for plan in &c.plans {
            let class = if plan.highlighted {
                "pc-plan pc-plan-highlighted"
            } else {
                "pc-plan"
            };
            self.ctx.open("article", &[attr("class", class)]);
            self.heading("h3", &plan.name);

            let mut price = String::new();
            if !plan.currency.is_empty() {
                price.push_str(&format!(
                    "<span class=\"pc-currency\">{}</span> ",
                    crate::escape_html(&plan.currency)
                ));
            }
            price.push_str(&crate::escape_html(&plan.price));
            if !plan.period.is_empty() {
                price.push_str(&format!(
                    "<span class=\"pc-period\">/{}</span>",
                    crate::escape_html(&plan.period)
                ));
            }
            self.ctx.add_line(&format!("<p class=\"pc-price\">{}</p>", price));

            if !plan.features.is_empty() {
                self.ctx.open("ul", &[attr("class", "pc-plan-features")]);
                for feature in &plan.features {
                    self.ctx.element("li", &[], feature);
                }
                self.ctx.close("ul");
            }
            if let Some(cta) = &plan.cta {
                self.link(cta, "pc-button")?;
            }
            self.ctx.close("article");
        }
        self.ctx.close("div");
        Ok(())
    }

    fn video(&mut self, c: &VideoContent) -> Result<(), CompileError> {
        self.heading("h2", &c.title);
        self.ctx.open("figure", &[attr("class", "pc-video")]);

        let src = self.url(&c.url)?;
        let lower = src.to_ascii_lowercase();
        let is_file = [".mp4", ".webm", ".ogg", ".mov"]
            .iter()
            .any(|ext| lower.split('?').next().is_some_and(|path| path.ends_with(ext)));

        if is_file {
            let poster = match &c.poster {
                Some(poster) if !poster.url.is_empty() => Some(self.url(&poster.url)?),
                _ => None,
            };
            self.ctx.element(
                "video",
                &[
                    attr("src", src),
                    ("poster", poster),
                    flag("controls", true),
                    flag("autoplay", c.autoplay),
                    flag("loop", c.loop_playback),
                    flag("muted", c.muted),
                    flag("playsinline", true),
                ],
                "",
            );
        } else {
            let mut embed = src;
            let mut params = Vec::new();
            if c.autoplay {
                params.push("autoplay=1");
            }
            if c.muted {
                params.push("mute=1");
            }
            if c.loop_playback {
                params.push("loop=1");
            }
            if !params.is_empty() {
                embed.push(if embed.contains('?') { '&' } else { '?' });
                embed.push_str(&params.join("&"));
            }
            let title = if c.title.is_empty() {
                "Video"
            } else {
                c.title.as_str()
            };
            self.ctx.element(
                "iframe",
                &[
                    attr("src", embed),
                    attr("title", title),
                    attr("loading", "lazy"),
                    attr("allow", "autoplay; encrypted-media; picture-in-picture"),
                    flag("allowfullscreen", true),
                ],
                "",
            );
        }

        self.ctx.element_if("figcaption", &[], &c.caption);
        self.ctx.close("figure");
        Ok(())
    }

    fn contact(&mut self, c: &ContactContent) -> Result<(), CompileError> {
        self.heading("h2", &c.title);

        let email = c.email.as_deref().filter(|e| !e.trim().is_empty());
        let phone = c.phone.as_deref().filter(|p| !p.trim().is_empty());
        let address = c.address.as_deref().filter(|a| !a.trim().is_empty());
        if email.is_some() || phone.is_some() || address.is_some() {
            self.ctx.open("address", &[attr("class", "pc-contact-details")]);
            if let Some(email) = email {
                let link = Link::new(email, format!("mailto:{}", email.trim()));
                self.link(&link, "pc-email")?;
            }
            if let Some(phone) = phone {
                let digits: String = phone
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '+')
                    .collect();
                let link = Link::new(phone, format!("tel:{}", digits));
                self.link(&link, "pc-phone")?;
            }
            if let Some(address) = address {
                self.ctx.element("span", &[attr("class", "pc-address")], address);
            }
            self.ctx.close("address");
        }

        if c.show_form {
            self.ctx.open("form", &[attr("class", "pc-contact-form"), attr("method", "post")]);
            for field in &c.fields {
                let id = format!("{}-{}", self.section.id, field.name);
                let label = alt_or(&field.label, &field.name);
                self.ctx.element("label", &[attr("for", id.clone())], &label);
                let common = [
                    attr("id", id),
                    attr("name", field.name.clone()),
                    flag("required", field.required),
                ];
                if field.kind == FieldKind::Textarea {
                    self.ctx.element("textarea", &common, "");
                } else {
                    let mut attrs = vec![attr("type", field.kind.input_type())];
                    attrs.extend(common);
                    self.ctx.void("input", &attrs);
                }
            }
            self.ctx.element("button", &[attr("type", "submit")], "Send");
            self.ctx.close("form");
        }
        Ok(())
    }
}

fn alt_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
