//! Style transform chain generation.
//!
//! This is the one genuinely conditional piece of descriptor construction.
//! For every style kind the chain is built in a fixed order:
//!
//! 1. the base style-interpretation step, always;
//! 2. the post-processing step, when enabled;
//! 3. the preprocessor step, last, for preprocessed kinds only; it sits
//!    closest to the raw source since engines apply chains back to front.
//!
//! Whether `extract` is set decides only the *wrapping* of the chain
//! (standalone artifact vs. runtime injection); the internal order never
//! changes.

use crate::descriptor::{ChainDelivery, ModuleRule, TransformChain, TransformStep};

/// Name of the runtime style injector, also used as the extraction
/// fallback.
pub const STYLE_RUNTIME: &str = "style-runtime";

/// Every style format the pipeline understands.
///
/// A tagged variant, not dynamic dispatch: the only behavioral split is
/// plain vs. preprocessed, decided by `preprocessor()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Css,
    Postcss,
    Less,
    Sass,
    Scss,
    Stylus,
    Styl,
}

impl StyleKind {
    /// All kinds, in the order their rules are emitted.
    pub const ALL: [StyleKind; 7] = [
        StyleKind::Css,
        StyleKind::Postcss,
        StyleKind::Less,
        StyleKind::Sass,
        StyleKind::Scss,
        StyleKind::Stylus,
        StyleKind::Styl,
    ];

    /// File extension for this kind (no leading dot).
    pub fn extension(&self) -> &'static str {
        match self {
            StyleKind::Css => "css",
            StyleKind::Postcss => "postcss",
            StyleKind::Less => "less",
            StyleKind::Sass => "sass",
            StyleKind::Scss => "scss",
            StyleKind::Stylus => "stylus",
            StyleKind::Styl => "styl",
        }
    }

    /// The preprocessor step for this kind, or `None` for plain formats.
    ///
    /// Sass uses the indented syntax of the sass preprocessor; Scss the
    /// braced one. Styl and Stylus are both handled by stylus.
    pub fn preprocessor(&self) -> Option<&'static str> {
        match self {
            StyleKind::Css | StyleKind::Postcss => None,
            StyleKind::Less => Some("less"),
            StyleKind::Sass | StyleKind::Scss => Some("sass"),
            StyleKind::Stylus | StyleKind::Styl => Some("stylus"),
        }
    }

    /// Whether this kind requires a preprocessor step.
    pub fn is_preprocessed(&self) -> bool {
        self.preprocessor().is_some()
    }
}

/// Options controlling chain generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainOptions {
    /// Emit source maps from every step.
    pub source_map: bool,

    /// Insert the post-processing step.
    pub post_process: bool,

    /// Extract chain output to a standalone artifact instead of injecting
    /// it at runtime.
    pub extract: bool,
}

/// Build the transform chain for one style kind.
pub fn chain(kind: StyleKind, options: ChainOptions) -> TransformChain {
    let mut steps = vec![TransformStep::new("css").with_option("source_map", options.source_map)];

    if options.post_process {
        steps.push(TransformStep::new("postcss").with_option("source_map", options.source_map));
    }

    if let Some(preprocessor) = kind.preprocessor() {
        let mut step =
            TransformStep::new(preprocessor).with_option("source_map", options.source_map);
        if kind == StyleKind::Sass {
            step = step.with_option("indented_syntax", true);
        }
        steps.push(step);
    }

    let delivery = if options.extract {
        ChainDelivery::Extract {
            fallback: STYLE_RUNTIME.to_string(),
        }
    } else {
        ChainDelivery::Inline {
            injector: STYLE_RUNTIME.to_string(),
        }
    };

    TransformChain { delivery, steps }
}

/// One module rule per style kind, for standalone style files.
pub fn style_rules(options: ChainOptions) -> Vec<ModuleRule> {
    StyleKind::ALL
        .iter()
        .map(|kind| ModuleRule::for_extension(kind.extension(), chain(*kind, options)))
        .collect()
}
