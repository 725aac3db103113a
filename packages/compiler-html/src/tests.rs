use crate::{compile_to_html, CompileError, CompileOptions};
use pagecraft_model::*;

fn landing_page() -> Page {
    let mut page = Page::new("home", "Home");
    page.meta.title = "Acme Store".to_string();
    page.meta.description = "Everything you need".to_string();
    page.sections.push(Section::new("hero", SectionKind::Hero));
    page.sections.push(Section::new("pricing", SectionKind::Pricing));
    page.sections.push(Section::new("faq", SectionKind::Faq));
    page
}

fn fragment() -> CompileOptions {
    CompileOptions {
        standalone: false,
        ..CompileOptions::default()
    }
}

#[test]
fn test_compile_standalone_page() {
    let page = landing_page();
    let html = compile_to_html(&page, &CompileOptions::default()).expect("Failed to compile");

    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<html lang=\"en\">"));
    assert!(html.contains("<title>Acme Store</title>"));
    assert!(html.contains("<meta name=\"description\" content=\"Everything you need\">"));
    assert!(html.contains("<h1>Build something people love</h1>"));
    assert!(html.contains("data-section=\"pricing\""));
    assert!(html.contains("</html>"));
}

#[test]
fn test_title_falls_back_to_page_title() {
    let mut page = landing_page();
    page.meta.title.clear();
    let html = compile_to_html(&page, &CompileOptions::default()).unwrap();
    assert!(html.contains("<title>Home</title>"));
}

#[test]
fn test_fragment_has_no_document_shell() {
    let page = landing_page();
    let html = compile_to_html(&page, &fragment()).unwrap();

    assert!(!html.contains("<!DOCTYPE html>"));
    assert!(!html.contains("<head>"));
    assert!(html.starts_with("<style>"));
    assert!(html.contains("<main class=\"pc-page\">"));
}

#[test]
fn test_sections_render_in_order() {
    let page = landing_page();
    let html = compile_to_html(&page, &fragment()).unwrap();

    let hero = html.find("data-section=\"hero\"").unwrap();
    let pricing = html.find("data-section=\"pricing\"").unwrap();
    let faq = html.find("data-section=\"faq\"").unwrap();
    assert!(hero < pricing && pricing < faq);
}

#[test]
fn test_hidden_section_is_skipped() {
    let mut page = landing_page();
    page.sections[2].visible = false;

    let html = compile_to_html(&page, &fragment()).unwrap();
    assert!(!html.contains("data-section=\"faq\""));
    assert!(!html.contains("Frequently asked questions"));
}

#[test]
fn test_device_hidden_section() {
    let mut page = landing_page();
    page.sections[1].settings.responsive.mobile.visible = false;

    // Without a device the section stays and a media query hides it
    let html = compile_to_html(&page, &fragment()).unwrap();
    assert!(html.contains("data-section=\"pricing\""));
    assert!(html.contains("@media (max-width: 640px) { [data-section=\"pricing\"] { display: none; } }"));

    let mobile = CompileOptions {
        device: Some(Device::Mobile),
        ..fragment()
    };
    let html = compile_to_html(&page, &mobile).unwrap();
    assert!(!html.contains("data-section=\"pricing\""));
    assert!(!html.contains("max-width: 640px"));

    let tablet = CompileOptions {
        device: Some(Device::Tablet),
        ..fragment()
    };
    assert!(compile_to_html(&page, &tablet)
        .unwrap()
        .contains("data-section=\"pricing\""));
}

#[test]
fn test_section_name_is_not_rendered() {
    let mut page = landing_page();
    page.sections[0].name = "Internal hero label".to_string();

    let html = compile_to_html(&page, &CompileOptions::default()).unwrap();
    assert!(!html.contains("Internal hero label"));
}

#[test]
fn test_anchor_and_custom_class() {
    let mut page = landing_page();
    page.sections[1].settings.anchor_id = Some("plans".to_string());
    page.sections[1].settings.custom_class = Some("dark".to_string());
    page.sections[1].settings.full_width = true;

    let html = compile_to_html(&page, &fragment()).unwrap();
    assert!(html.contains(
        "<section id=\"plans\" class=\"pc-section pc-pricing pc-full-width dark\" data-section=\"pricing\">"
    ));
}

#[test]
fn test_text_is_escaped() {
    let mut page = Page::new("p", "P");
    page.sections.push(Section::with_content(
        "faq",
        SectionContent::Faq(FaqContent {
            title: "<script>alert(1)</script>".to_string(),
            items: vec![FaqItem {
                question: "Tom & Jerry?".to_string(),
                answer: "\"Yes\"".to_string(),
            }],
        }),
    ));

    let html = compile_to_html(&page, &fragment()).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("<summary>Tom &amp; Jerry?</summary>"));
    assert!(html.contains("&quot;Yes&quot;"));
}

#[test]
fn test_unsafe_link_is_rejected() {
    let mut page = Page::new("p", "P");
    page.sections.push(Section::with_content(
        "cta",
        SectionContent::Cta(CtaContent {
            headline: "Buy".to_string(),
            body: String::new(),
            button: Link::new("Click", "javascript:alert(1)"),
            secondary: None,
        }),
    ));

    let err = compile_to_html(&page, &fragment()).unwrap_err();
    match err {
        CompileError::UnsafeUrl { section_id, url } => {
            assert_eq!(section_id, "cta");
            assert_eq!(url, "javascript:alert(1)");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_data_image_url_is_allowed() {
    let mut page = Page::new("p", "P");
    page.sections.push(Section::with_content(
        "gallery",
        SectionContent::Gallery(GalleryContent {
            title: String::new(),
            images: vec![Image::new("data:image/png;base64,AAAA", "dot")],
            columns: 2,
            lightbox: true,
        }),
    ));

    let html = compile_to_html(&page, &fragment()).unwrap();
    assert!(html.contains("src=\"data:image/png;base64,AAAA\""));
    assert!(html.contains("data-lightbox=\"true\""));
    assert!(html.contains("--pc-columns: 2"));
}

#[test]
fn test_animation_attributes_and_keyframes() {
    let mut page = landing_page();
    page.sections[0].settings.animation = AnimationSettings::new(AnimationKind::FadeIn);

    let html = compile_to_html(&page, &fragment()).unwrap();
    assert!(html.contains("data-animate=\"fade-in\""));
    assert!(html.contains("@keyframes pc-fade-in"));
    assert!(html.contains("prefers-reduced-motion"));

    let still = CompileOptions {
        animations: false,
        ..fragment()
    };
    let html = compile_to_html(&page, &still).unwrap();
    assert!(!html.contains("data-animate"));
    assert!(!html.contains("@keyframes"));
}

#[test]
fn test_video_file_and_embed() {
    let mut page = Page::new("p", "P");
    let mut video = VideoContent {
        title: "Demo".to_string(),
        url: "https://cdn.example.com/demo.mp4".to_string(),
        muted: true,
        ..VideoContent::default()
    };
    page.sections
        .push(Section::with_content("file", SectionContent::Video(video.clone())));
    video.url = "https://www.youtube.com/embed/abc".to_string();
    video.autoplay = true;
    page.sections
        .push(Section::with_content("embed", SectionContent::Video(video)));

    let html = compile_to_html(&page, &fragment()).unwrap();
    assert!(html.contains("<video src=\"https://cdn.example.com/demo.mp4\" controls muted playsinline></video>"));
    assert!(html.contains("src=\"https://www.youtube.com/embed/abc?autoplay=1&amp;mute=1\""));
}

#[test]
fn test_contact_form_fields() {
    let mut page = Page::new("p", "P");
    page.sections.push(Section::with_content(
        "contact",
        SectionContent::Contact(ContactContent {
            title: "Talk to us".to_string(),
            email: Some("hi@example.com".to_string()),
            phone: Some("+1 (555) 010-0000".to_string()),
            address: None,
            show_form: true,
            fields: vec![
                FormField {
                    name: "email".to_string(),
                    label: "Email".to_string(),
                    kind: FieldKind::Email,
                    required: true,
                },
                FormField {
                    name: "message".to_string(),
                    label: String::new(),
                    kind: FieldKind::Textarea,
                    required: false,
                },
            ],
        }),
    ));

    let html = compile_to_html(&page, &fragment()).unwrap();
    assert!(html.contains("href=\"mailto:hi@example.com\""));
    assert!(html.contains("href=\"tel:+15550100000\""));
    assert!(html.contains("<input type=\"email\" id=\"contact-email\" name=\"email\" required>"));
    assert!(html.contains("<label for=\"contact-message\">message</label>"));
    assert!(html.contains("<textarea id=\"contact-message\" name=\"message\"></textarea>"));
}

#[test]
fn test_global_styles_in_root_vars() {
    let mut page = landing_page();
    page.global_styles.primary_color = "#ff0000".to_string();

    let html = compile_to_html(&page, &CompileOptions::default()).unwrap();
    assert!(html.contains("--pc-primary: #ff0000;"));
}

#[test]
fn test_compact_output() {
    let page = landing_page();
    let options = CompileOptions {
        pretty: false,
        ..CompileOptions::default()
    };
    let html = compile_to_html(&page, &options).unwrap();
    assert!(!html.contains('\n'));
    assert!(html.contains("<body><main class=\"pc-page\">"));
}

#[test]
fn test_invalid_indent() {
    let page = landing_page();
    let options = CompileOptions {
        indent: "--".to_string(),
        ..CompileOptions::default()
    };
    assert!(matches!(
        compile_to_html(&page, &options),
        Err(CompileError::InvalidOption(_))
    ));
}

#[test]
fn test_options_from_json() {
    let options: CompileOptions =
        serde_json::from_str(r#"{ "standalone": false, "device": "tablet" }"#).unwrap();
    assert!(!options.standalone);
    assert_eq!(options.device, Some(Device::Tablet));
    assert!(options.pretty);
    assert_eq!(options.indent, "  ");
}
