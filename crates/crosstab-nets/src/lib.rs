//! # crosstab-nets
//!
//! Net management for crosstab tab plans.
//!
//! This crate provides:
//! - Net constructors and validation (typed nets and editor drafts)
//! - Pure collection edits that keep nets in sync with a question's options
//! - Option resolution across the shapes a question can be authored in
//! - Likert scale detection with the rule that fired
//! - Automatic `T2B`/`B2B` and `T3B`/`B3B` nets
//! - Summary text for previews
//!
//! ## Example
//!
//! ```rust
//! use crosstab_core::{Question, QuestionOption};
//! use crosstab_nets::{auto_configure_nets_for_scale, format_nets, is_likert_scale};
//!
//! let q = Question::new("Q5", "single").with_options([
//!     QuestionOption::new(1, "Strongly disagree"),
//!     QuestionOption::new(2, "Disagree"),
//!     QuestionOption::new(3, "Neutral"),
//!     QuestionOption::new(4, "Agree"),
//!     QuestionOption::new(5, "Strongly agree"),
//! ]);
//! assert!(is_likert_scale(&q));
//!
//! let nets = auto_configure_nets_for_scale(&q, 5);
//! assert_eq!(format_nets(&nets, &[]), "Net: T2B, B2B");
//! ```

pub mod auto;
pub mod create;
pub mod error;
pub mod likert;
pub mod options;
pub mod summary;
pub mod sync;

pub use auto::{auto_configure_nets_for_scale, generate_t2b_nets, generate_t3b_nets};
pub use create::{create_codes_net, create_range_net, validate_net, NetDraft};
pub use error::{NetError, NetResult};
pub use likert::{classify_labels, detect_likert, is_likert_scale, LikertDetection, LikertRule, ScaleVocabulary};
pub use options::{default_likert_labels, question_options, resolved_options, valid_codes, OptionEntry};
pub use summary::{format_nets, summary_text};
pub use sync::{add_net, delete_net, sync_net, sync_nets, update_net};
