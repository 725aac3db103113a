//! # Pagecraft Model
//!
//! Typed document model for the page builder.
//!
//! A [`Page`] is an ordered list of [`Section`]s. Every section carries
//! typed [`SectionContent`] (one variant per [`SectionKind`]) plus
//! [`SectionSettings`]: spacing, background, per-device
//! [`ResponsiveSettings`] and an [`AnimationSettings`] block.
//!
//! ```text
//! Page
//!  ├── meta / global_styles
//!  ├── sections[]
//!  │    ├── content   (hero | pricing | faq | ...)
//!  │    └── settings  (responsive[desktop, tablet, mobile], animation)
//!  └── ab_tests[]     (variants of one section's content)
//! ```
//!
//! Everything here is plain data with serde support. Editing, history and
//! validation live in `pagecraft-editor` and `pagecraft-schema`.

pub mod ab_test;
pub mod content;
pub mod device;
pub mod page;
pub mod section;
pub mod settings;
pub mod template;
pub mod visitor;

pub use ab_test::{AbTest, AbTestStatus, AbVariant};
pub use content::*;
pub use device::Device;
pub use page::{GlobalStyles, Page, PageMeta};
pub use section::Section;
pub use settings::{
    AnimationKind, AnimationSettings, Background, BreakpointSettings, Easing, ResponsiveSettings,
    SectionSettings, Spacing, TextAlign,
};
pub use template::{Template, TemplateCategory};
pub use visitor::{walk_content, walk_page, walk_section, walk_settings, Visitor};

pub use pagecraft_common::{CommonError, CommonResult, IdGenerator};
