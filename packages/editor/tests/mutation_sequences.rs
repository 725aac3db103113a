//! Tests for longer edit sequences through the store
//!
//! This tests:
//! - Add + move + duplicate + remove chains
//! - Undo/redo sequences and redo invalidation
//! - Batched edits
//! - Locked sections and rejected edits leaving history untouched

use pagecraft_editor::{EditorError, MutationError, PageBuilderStore};
use pagecraft_model::{
    AnimationKind, AnimationSettings, BreakpointSettings, Device, Page, SectionKind, Spacing,
};

fn store() -> PageBuilderStore {
    PageBuilderStore::new(Page::new("home", "Home"))
}

fn ids(store: &PageBuilderStore) -> Vec<String> {
    store.page().sections.iter().map(|s| s.id.clone()).collect()
}

#[test]
fn test_add_move_remove_sequence() {
    let mut store = store();
    let hero = store.add_section(SectionKind::Hero, None).unwrap();
    let faq = store.add_section(SectionKind::Faq, None).unwrap();
    let cta = store.add_section(SectionKind::Cta, None).unwrap();

    store.move_section(&cta, 0).unwrap();
    assert_eq!(ids(&store), vec![cta.clone(), hero.clone(), faq.clone()]);

    store.remove_section(&hero).unwrap();
    assert_eq!(ids(&store), vec![cta.clone(), faq.clone()]);

    // Undo remove restores the section at its old position
    store.undo().unwrap();
    assert_eq!(ids(&store), vec![cta.clone(), hero.clone(), faq.clone()]);

    // Undo move
    store.undo().unwrap();
    assert_eq!(ids(&store), vec![hero.clone(), faq.clone(), cta.clone()]);

    // Redo both
    store.redo().unwrap();
    store.redo().unwrap();
    assert_eq!(ids(&store), vec![cta, faq]);
    assert!(!store.can_redo());
}

#[test]
fn test_move_up_and_down_at_edges() {
    let mut store = store();
    let first = store.add_section(SectionKind::Hero, None).unwrap();
    let last = store.add_section(SectionKind::Faq, None).unwrap();

    assert!(!store.move_up(&first).unwrap());
    assert!(!store.move_down(&last).unwrap());
    assert!(store.move_up(&last).unwrap());
    assert_eq!(ids(&store), vec![last, first]);
}

#[test]
fn test_new_edit_clears_redo() {
    let mut store = store();
    let hero = store.add_section(SectionKind::Hero, None).unwrap();
    store.rename_section(&hero, "Intro").unwrap();

    store.undo().unwrap();
    assert!(store.can_redo());

    store.rename_section(&hero, "Welcome").unwrap();
    assert!(!store.can_redo());
    assert_eq!(store.page().find_section(&hero).unwrap().name, "Welcome");
}

#[test]
fn test_duplicate_then_undo() {
    let mut store = store();
    let hero = store.add_section(SectionKind::Hero, None).unwrap();
    store.add_section(SectionKind::Faq, None).unwrap();

    let copy = store.duplicate_section(&hero).unwrap();
    assert_eq!(store.page().position_of(&copy), Some(1));
    assert_eq!(store.selection(), Some(copy.as_str()));

    store.undo().unwrap();
    assert!(!store.page().contains_section(&copy));
    // Selection of a section that no longer exists is cleared
    assert_eq!(store.selection(), None);
}

#[test]
fn test_batch_is_one_undo_step() {
    let mut store = store();
    let hero = store.add_section(SectionKind::Hero, None).unwrap();

    store.begin_batch("Style hero");
    store
        .set_animation(&hero, AnimationSettings::new(AnimationKind::FadeIn))
        .unwrap();
    store
        .set_responsive(
            &hero,
            Device::Mobile,
            BreakpointSettings {
                padding: Some(Spacing::uniform(8)),
                ..BreakpointSettings::default()
            },
        )
        .unwrap();
    store.rename_section(&hero, "Styled hero").unwrap();
    store.end_batch();

    assert_eq!(store.history().undo_levels(), 2);
    assert_eq!(store.history().undo_description(), Some("Style hero"));

    store.undo().unwrap();
    let section = store.page().find_section(&hero).unwrap();
    assert_eq!(section.settings.animation.kind, AnimationKind::None);
    assert!(section.settings.responsive.mobile.padding.is_none());
    assert_ne!(section.name, "Styled hero");

    store.redo().unwrap();
    let section = store.page().find_section(&hero).unwrap();
    assert_eq!(section.name, "Styled hero");
    assert_eq!(section.settings.responsive.mobile.padding, Some(Spacing::uniform(8)));
}

#[test]
fn test_undo_closes_open_batch() {
    let mut store = store();
    store.begin_batch("Add two");
    store.add_section(SectionKind::Hero, None).unwrap();
    store.add_section(SectionKind::Faq, None).unwrap();

    assert!(store.undo().unwrap());
    assert!(store.page().sections.is_empty());
}

#[test]
fn test_history_limit_drops_oldest() {
    let mut store = store().with_history_limit(3);
    for _ in 0..5 {
        store.add_section(SectionKind::Stats, None).unwrap();
    }
    assert_eq!(store.history().undo_levels(), 3);

    while store.undo().unwrap() {}
    assert_eq!(store.page().sections.len(), 2);
    assert!(!store.can_undo());
}

#[test]
fn test_locked_section_rejects_edits() {
    let mut store = store();
    let hero = store.add_section(SectionKind::Hero, None).unwrap();
    store.set_locked(&hero, true).unwrap();
    let levels = store.history().undo_levels();
    let version = store.version();

    let err = store.rename_section(&hero, "Nope").unwrap_err();
    assert!(matches!(
        err,
        EditorError::Mutation(MutationError::SectionLocked(_))
    ));
    assert!(store.remove_section(&hero).is_err());

    // Rejected edits change nothing
    assert_eq!(store.history().undo_levels(), levels);
    assert_eq!(store.version(), version);

    // Copies of locked sections are editable
    let copy = store.duplicate_section(&hero).unwrap();
    assert!(!store.page().find_section(&copy).unwrap().locked);
    store.rename_section(&copy, "Editable").unwrap();

    store.set_locked(&hero, false).unwrap();
    store.remove_section(&hero).unwrap();
}

#[test]
fn test_toggle_visibility_round_trip() {
    let mut store = store();
    let hero = store.add_section(SectionKind::Hero, None).unwrap();

    assert!(!store.toggle_visibility(&hero).unwrap());
    assert!(store.toggle_visibility(&hero).unwrap());
    store.undo().unwrap();
    assert!(!store.page().find_section(&hero).unwrap().visible);
}

#[test]
fn test_missing_section_errors() {
    let mut store = store();
    assert!(matches!(
        store.move_up("nope"),
        Err(EditorError::Mutation(MutationError::SectionNotFound(_)))
    ));
    assert!(store.select("nope").is_err());
    assert!(store.duplicate_section("nope").is_err());
    assert!(!store.can_undo());
}

#[test]
fn test_shared_anchor_is_rejected_and_page_stays_exportable() {
    let mut store = store();
    let hero = store.add_section(SectionKind::Hero, None).unwrap();
    let faq = store.add_section(SectionKind::Faq, None).unwrap();

    let mut settings = store.page().find_section(&hero).unwrap().settings.clone();
    settings.anchor_id = Some("top".to_string());
    store.update_settings(&hero, settings).unwrap();

    let levels = store.history().undo_levels();
    let mut settings = store.page().find_section(&faq).unwrap().settings.clone();
    settings.anchor_id = Some("top".to_string());
    assert!(matches!(
        store.update_settings(&faq, settings),
        Err(EditorError::Mutation(MutationError::Validation(_)))
    ));

    assert_eq!(store.history().undo_levels(), levels);
    assert!(store.page().find_section(&faq).unwrap().settings.anchor_id.is_none());
    assert!(store.export_json().is_ok());
}
