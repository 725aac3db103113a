//! CSS generation for the `<style>` block.
//!
//! Without a target device, desktop settings form the base rules and tablet
//! and mobile overrides go into `max-width` media queries. With a target
//! device the resolved settings for that device are emitted directly.

use pagecraft_model::{
    AnimationKind, Background, BreakpointSettings, Device, GlobalStyles, Section,
};

/// Quote a value for use inside a CSS string
fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' | '\r' => out.push(' '),
            '<' => {}
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Strip characters that could end the style element or a rule early
fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}'))
        .collect()
}

pub(crate) fn section_selector(section: &Section) -> String {
    format!("[data-section={}]", css_string(&section.id))
}

fn rule(selector: &str, declarations: &[String]) -> Option<String> {
    if declarations.is_empty() {
        None
    } else {
        Some(format!("{} {{ {} }}", selector, declarations.join(" ")))
    }
}

pub(crate) fn base_rules(styles: &GlobalStyles) -> Vec<String> {
    vec![
        format!(
            ":root {{ --pc-primary: {}; --pc-secondary: {}; --pc-accent: {}; --pc-text: {}; --pc-background: {}; --pc-radius: {}px; --pc-container: {}px; }}",
            sanitize(&styles.primary_color),
            sanitize(&styles.secondary_color),
            sanitize(&styles.accent_color),
            sanitize(&styles.text_color),
            sanitize(&styles.background_color),
            styles.border_radius,
            styles.container_width,
        ),
        "* { box-sizing: border-box; }".to_string(),
        format!(
            "body {{ margin: 0; font-family: {}; font-size: {}px; line-height: 1.6; color: var(--pc-text); background: var(--pc-background); }}",
            sanitize(&styles.body_font),
            styles.base_font_size,
        ),
        format!(
            "h1, h2, h3 {{ font-family: {}; line-height: 1.2; }}",
            sanitize(&styles.heading_font)
        ),
        "img, video, iframe { max-width: 100%; }".to_string(),
        ".pc-container { max-width: var(--pc-container); margin: 0 auto; }".to_string(),
        ".pc-full-width .pc-container { max-width: none; }".to_string(),
        ".pc-grid { display: grid; gap: 24px; grid-template-columns: repeat(var(--pc-columns, 3), minmax(0, 1fr)); list-style: none; padding: 0; }".to_string(),
        ".pc-button { display: inline-block; padding: 12px 24px; border-radius: var(--pc-radius); background: var(--pc-primary); color: #fff; text-decoration: none; }".to_string(),
        ".pc-button-secondary { background: transparent; color: var(--pc-primary); border: 1px solid var(--pc-primary); }".to_string(),
        ".pc-plan-highlighted { border: 2px solid var(--pc-accent); }".to_string(),
        ".pc-grayscale img { filter: grayscale(1); }".to_string(),
    ]
}

fn background_declarations(background: &Background) -> Vec<String> {
    match background {
        Background::None => vec![],
        Background::Color { value } => vec![format!("background: {};", sanitize(value))],
        Background::Gradient { from, to, angle } => vec![format!(
            "background: linear-gradient({}deg, {}, {});",
            angle,
            sanitize(from),
            sanitize(to)
        )],
        Background::Image {
            url,
            overlay_opacity,
        } => {
            let alpha = f32::from((*overlay_opacity).min(100)) / 100.0;
            vec![
                format!(
                    "background-image: linear-gradient(rgba(0, 0, 0, {alpha}), rgba(0, 0, 0, {alpha})), url({});",
                    css_string(url)
                ),
                "background-size: cover;".to_string(),
                "background-position: center;".to_string(),
            ]
        }
    }
}

/// Declarations for the overrides set at one breakpoint
fn breakpoint_declarations(settings: &BreakpointSettings) -> Vec<String> {
    let mut declarations = Vec::new();
    if let Some(padding) = settings.padding {
        declarations.push(format!("padding: {};", padding.to_css()));
    }
    if let Some(margin) = settings.margin {
        declarations.push(format!("margin: {};", margin.to_css()));
    }
    if let Some(align) = settings.text_align {
        declarations.push(format!("text-align: {};", align.as_str()));
    }
    if let Some(columns) = settings.columns {
        declarations.push(format!("--pc-columns: {};", columns.max(1)));
    }
    if let Some(scale) = settings.font_scale {
        declarations.push(format!("font-size: {}%;", scale));
    }
    declarations
}

fn animation_declarations(section: &Section) -> Vec<String> {
    let animation = &section.settings.animation;
    if !animation.is_enabled() {
        return vec![];
    }
    vec![format!(
        "animation: pc-{} {}ms {} {}ms both;",
        animation.kind.as_str(),
        animation.duration_ms,
        animation.easing.as_css(),
        animation.delay_ms
    )]
}

/// Rules for one section. `device` selects resolved single-device output.
pub(crate) fn section_rules(
    section: &Section,
    device: Option<Device>,
    animations: bool,
) -> Vec<String> {
    let settings = &section.settings;
    let selector = section_selector(section);
    let mut rules = Vec::new();

    let mut base = background_declarations(&settings.background);
    match device {
        Some(device) => {
            let resolved = settings.responsive.resolve(device);
            base.push(format!("padding: {};", settings.padding_for(device).to_css()));
            base.push(format!("margin: {};", settings.margin_for(device).to_css()));
            let rest = BreakpointSettings {
                padding: None,
                margin: None,
                ..resolved
            };
            base.extend(breakpoint_declarations(&rest));
        }
        None => {
            base.push(format!("padding: {};", settings.padding.to_css()));
            base.push(format!("margin: {};", settings.margin.to_css()));
            base.extend(breakpoint_declarations(&settings.responsive.desktop));
        }
    }
    if animations {
        base.extend(animation_declarations(section));
    }
    if device.is_none() && !settings.responsive.visible_on(Device::Desktop) {
        base.push("display: none;".to_string());
    }
    if let Some(custom) = &settings.custom_css {
        let custom = sanitize(custom);
        if !custom.trim().is_empty() {
            base.push(custom.trim().to_string());
        }
    }
    rules.extend(rule(&selector, &base));

    if device.is_none() {
        // Mobile widths also match the tablet query, so each breakpoint only
        // has to undo the one above it
        for device in [Device::Tablet, Device::Mobile] {
            let Some(max_width) = device.media_max_width() else {
                continue;
            };
            let own = settings.responsive.for_device(device);
            let mut declarations = breakpoint_declarations(own);
            let wider_hidden = device
                .parent()
                .is_some_and(|parent| !settings.responsive.visible_on(parent));
            if !own.visible {
                declarations.push("display: none;".to_string());
            } else if wider_hidden {
                declarations.push("display: block;".to_string());
            }
            if let Some(r) = rule(&selector, &declarations) {
                rules.push(format!("@media (max-width: {}px) {{ {} }}", max_width, r));
            }
        }
    }

    rules
}

pub(crate) fn keyframes(kind: AnimationKind) -> Option<String> {
    let (from, to) = match kind {
        AnimationKind::None => return None,
        AnimationKind::FadeIn => ("opacity: 0;", "opacity: 1;"),
        AnimationKind::SlideUp => (
            "opacity: 0; transform: translateY(40px);",
            "opacity: 1; transform: none;",
        ),
        AnimationKind::SlideDown => (
            "opacity: 0; transform: translateY(-40px);",
            "opacity: 1; transform: none;",
        ),
        AnimationKind::SlideLeft => (
            "opacity: 0; transform: translateX(40px);",
            "opacity: 1; transform: none;",
        ),
        AnimationKind::SlideRight => (
            "opacity: 0; transform: translateX(-40px);",
            "opacity: 1; transform: none;",
        ),
        AnimationKind::ZoomIn => (
            "opacity: 0; transform: scale(0.9);",
            "opacity: 1; transform: none;",
        ),
        AnimationKind::Bounce => {
            return Some(
                "@keyframes pc-bounce { 0%, 100% { transform: none; } 40% { transform: translateY(-24px); } 70% { transform: translateY(-12px); } }"
                    .to_string(),
            )
        }
    };
    Some(format!(
        "@keyframes pc-{} {{ from {{ {} }} to {{ {} }} }}",
        kind.as_str(),
        from,
        to
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{SectionKind, Spacing};

    #[test]
    fn test_css_string_escapes_quotes() {
        assert_eq!(css_string(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(css_string("</style>"), "\"/style>\"");
    }

    #[test]
    fn test_tablet_override_in_media_query() {
        let mut section = Section::new("hero", SectionKind::Hero);
        section.settings.responsive.tablet.padding = Some(Spacing::uniform(16));

        let rules = section_rules(&section, None, false);
        assert!(rules
            .iter()
            .any(|r| r.starts_with("@media (max-width: 1024px)") && r.contains("padding: 16px 16px 16px 16px;")));
        assert!(!rules.iter().any(|r| r.contains("640px")));
    }

    #[test]
    fn test_hidden_on_mobile() {
        let mut section = Section::new("hero", SectionKind::Hero);
        section.settings.responsive.mobile.visible = false;

        let rules = section_rules(&section, None, false);
        assert!(rules
            .iter()
            .any(|r| r.starts_with("@media (max-width: 640px)") && r.contains("display: none;")));
    }

    #[test]
    fn test_device_output_is_resolved() {
        let mut section = Section::new("hero", SectionKind::Hero);
        section.settings.responsive.tablet.padding = Some(Spacing::uniform(16));

        let rules = section_rules(&section, Some(Device::Mobile), false);
        assert_eq!(rules.len(), 1);
        assert!(rules[0].contains("padding: 16px 16px 16px 16px;"));
    }

    #[test]
    fn test_every_animation_has_keyframes() {
        assert!(keyframes(AnimationKind::None).is_none());
        assert!(keyframes(AnimationKind::Bounce).unwrap().contains("pc-bounce"));
        assert!(keyframes(AnimationKind::SlideUp).unwrap().contains("@keyframes pc-slide-up"));
    }
}
