/// Classification rules, one per log grammar, plus the keyword fallback

pub mod android;
pub mod ios;
pub mod keyword;
pub mod miniprogram;

pub use android::AndroidRule;
pub use ios::IosRule;
pub use keyword::KeywordRule;
pub use miniprogram::MiniProgramRule;

use super::traits::LineRule;

/// The cascade in priority order. Order matters: several patterns can match
/// the same line and the first rule to yield wins.
pub fn default_rules() -> Vec<Box<dyn LineRule>> {
    vec![
        Box::new(AndroidRule),
        Box::new(IosRule),
        Box::new(MiniProgramRule),
        Box::new(KeywordRule), // Fallback (always yields)
    ]
}
