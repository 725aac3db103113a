use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use pagecraft_model::Section;

const RULE: &str = "animation-bounds";

pub const MAX_DURATION_MS: u32 = 10_000;
pub const MAX_DELAY_MS: u32 = 10_000;

/// Rule that keeps animation timing within usable bounds
pub struct AnimationBoundsRule;

impl ValidationRule for AnimationBoundsRule {
    fn name(&self) -> &'static str {
        RULE
    }

    fn description(&self) -> &'static str {
        "Limit animation duration and delay to 10 seconds"
    }

    fn check_section(&self, section: &Section) -> Vec<Diagnostic> {
        let animation = &section.settings.animation;
        let mut diagnostics = Vec::new();

        if animation.duration_ms > MAX_DURATION_MS {
            diagnostics.push(
                Diagnostic::error(
                    RULE,
                    format!(
                        "Animation duration {}ms exceeds {}ms",
                        animation.duration_ms, MAX_DURATION_MS
                    ),
                )
                .at_field("settings.animation.duration_ms"),
            );
        }

        if animation.delay_ms > MAX_DELAY_MS {
            diagnostics.push(
                Diagnostic::error(
                    RULE,
                    format!("Animation delay {}ms exceeds {}ms", animation.delay_ms, MAX_DELAY_MS),
                )
                .at_field("settings.animation.delay_ms"),
            );
        }

        if animation.is_enabled() && animation.duration_ms == 0 {
            diagnostics.push(
                Diagnostic::warning(RULE, "Animation is enabled but has zero duration")
                    .at_field("settings.animation.duration_ms")
                    .with_suggestion("Set a duration or disable the animation"),
            );
        }

        diagnostics
    }
}
