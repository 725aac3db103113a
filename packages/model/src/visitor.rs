use crate::content::*;
use crate::page::{GlobalStyles, Page};
use crate::section::Section;
use crate::settings::{Background, SectionSettings};

/// Visitor pattern for traversing a page immutably
///
/// The default implementations walk the whole page. Leaf callbacks receive a
/// dotted field path (`content.plans[1].cta.url`) relative to the section,
/// or to the page for global styles.
pub trait Visitor: Sized {
    fn visit_page(&mut self, page: &Page) {
        walk_page(self, page);
    }

    fn visit_global_styles(&mut self, styles: &GlobalStyles) {
        walk_global_styles(self, styles);
    }

    fn visit_section(&mut self, section: &Section) {
        walk_section(self, section);
    }

    fn visit_content(&mut self, content: &SectionContent) {
        walk_content(self, content);
    }

    fn visit_settings(&mut self, settings: &SectionSettings) {
        walk_settings(self, settings);
    }

    fn visit_url(&mut self, _path: &str, _url: &str) {
        // Leaf
    }

    fn visit_color(&mut self, _path: &str, _value: &str) {
        // Leaf
    }
}

pub fn walk_page<V: Visitor>(visitor: &mut V, page: &Page) {
    visitor.visit_global_styles(&page.global_styles);
    if let Some(image) = &page.meta.social_image {
        visitor.visit_url("meta.social_image", image);
    }
    for section in &page.sections {
        visitor.visit_section(section);
    }
}

pub fn walk_global_styles<V: Visitor>(visitor: &mut V, styles: &GlobalStyles) {
    visitor.visit_color("global_styles.primary_color", &styles.primary_color);
    visitor.visit_color("global_styles.secondary_color", &styles.secondary_color);
    visitor.visit_color("global_styles.accent_color", &styles.accent_color);
    visitor.visit_color("global_styles.text_color", &styles.text_color);
    visitor.visit_color("global_styles.background_color", &styles.background_color);
}

pub fn walk_section<V: Visitor>(visitor: &mut V, section: &Section) {
    visitor.visit_content(&section.content);
    visitor.visit_settings(&section.settings);
}

pub fn walk_settings<V: Visitor>(visitor: &mut V, settings: &SectionSettings) {
    match &settings.background {
        Background::None => {}
        Background::Color { value } => visitor.visit_color("settings.background.value", value),
        Background::Gradient { from, to, .. } => {
            visitor.visit_color("settings.background.from", from);
            visitor.visit_color("settings.background.to", to);
        }
        Background::Image { url, .. } => visitor.visit_url("settings.background.url", url),
    }
}

fn visit_link<V: Visitor>(visitor: &mut V, path: &str, link: &Link) {
    visitor.visit_url(&format!("{}.url", path), &link.url);
}

fn visit_image<V: Visitor>(visitor: &mut V, path: &str, image: &Image) {
    visitor.visit_url(&format!("{}.url", path), &image.url);
}

pub fn walk_content<V: Visitor>(visitor: &mut V, content: &SectionContent) {
    match content {
        SectionContent::Hero(c) => {
            if let Some(link) = &c.primary_cta {
                visit_link(visitor, "content.primary_cta", link);
            }
            if let Some(link) = &c.secondary_cta {
                visit_link(visitor, "content.secondary_cta", link);
            }
            if let Some(image) = &c.image {
                visit_image(visitor, "content.image", image);
            }
        }
        SectionContent::Pricing(c) => {
            for (i, plan) in c.plans.iter().enumerate() {
                if let Some(link) = &plan.cta {
                    visit_link(visitor, &format!("content.plans[{}].cta", i), link);
                }
            }
        }
        SectionContent::Testimonials(c) => {
            for (i, item) in c.items.iter().enumerate() {
                if let Some(avatar) = &item.avatar {
                    visit_image(visitor, &format!("content.items[{}].avatar", i), avatar);
                }
            }
        }
        SectionContent::Team(c) => {
            for (i, member) in c.members.iter().enumerate() {
                if let Some(photo) = &member.photo {
                    visit_image(visitor, &format!("content.members[{}].photo", i), photo);
                }
                for (j, link) in member.links.iter().enumerate() {
                    visit_link(visitor, &format!("content.members[{}].links[{}]", i, j), link);
                }
            }
        }
        SectionContent::Video(c) => {
            visitor.visit_url("content.url", &c.url);
            if let Some(poster) = &c.poster {
                visit_image(visitor, "content.poster", poster);
            }
        }
        SectionContent::LogoGrid(c) => {
            for (i, logo) in c.logos.iter().enumerate() {
                visit_image(visitor, &format!("content.logos[{}].image", i), &logo.image);
                if let Some(url) = &logo.url {
                    visitor.visit_url(&format!("content.logos[{}].url", i), url);
                }
            }
        }
        SectionContent::Cta(c) => {
            visit_link(visitor, "content.button", &c.button);
            if let Some(link) = &c.secondary {
                visit_link(visitor, "content.secondary", link);
            }
        }
        SectionContent::Gallery(c) => {
            for (i, image) in c.images.iter().enumerate() {
                visit_image(visitor, &format!("content.images[{}]", i), image);
            }
        }
        SectionContent::Features(_)
        | SectionContent::Faq(_)
        | SectionContent::Stats(_)
        | SectionContent::Timeline(_)
        | SectionContent::Contact(_)
        | SectionContent::Newsletter(_)
        | SectionContent::RichText(_)
        | SectionContent::ProductGrid(_) => {
            // No links or media
        }
    }
}
