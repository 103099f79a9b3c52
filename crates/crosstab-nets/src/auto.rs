//! Automatic top/bottom box nets for Likert scales

use crosstab_core::{Net, Question};

use crate::create::create_codes_net;
use crate::likert::is_likert_scale;
use crate::options::{resolved_options, OptionEntry};
use crate::sync::sync_nets;

/// Build a top-N / bottom-N pair from the last and first `n` options.
///
/// Position, not code value, decides which end is "top".
fn box_pair(options: &[OptionEntry], n: usize, top: &str, bottom: &str) -> Vec<Net> {
    let top_codes = options[options.len() - n..].iter().map(|o| o.code.as_str());
    let bottom_codes = options[..n].iter().map(|o| o.code.as_str());
    vec![
        Net::Codes(create_codes_net(Some(top), top_codes)),
        Net::Codes(create_codes_net(Some(bottom), bottom_codes)),
    ]
}

fn box_nets(question: &Question, min_options: usize, n: usize, top: &str, bottom: &str) -> Vec<Net> {
    if !is_likert_scale(question) {
        return Vec::new();
    }
    let options = resolved_options(question);
    if options.len() < min_options {
        return Vec::new();
    }
    box_pair(&options, n, top, bottom)
}

/// `T2B`/`B2B` nets for a Likert question with at least 4 options
pub fn generate_t2b_nets(question: &Question) -> Vec<Net> {
    box_nets(question, 4, 2, "T2B", "B2B")
}

/// `T3B`/`B3B` nets for a Likert question with at least 6 options
pub fn generate_t3b_nets(question: &Question) -> Vec<Net> {
    box_nets(question, 6, 3, "T3B", "B3B")
}

/// Default nets for a scale of the given size.
///
/// 3 points get none, 5 points get `T2B`/`B2B`, 7 and 10 points get
/// `T3B`/`B3B`. Other sizes get none. The result replaces any existing nets.
///
/// # Example
/// ```rust
/// use crosstab_core::Question;
/// use crosstab_nets::auto_configure_nets_for_scale;
///
/// let q = Question::new("Q5", "single").with_mode("likert_agreement");
/// let nets = auto_configure_nets_for_scale(&q, 5);
/// assert_eq!(nets[0].label(), Some("T2B"));
/// assert_eq!(nets[1].label(), Some("B2B"));
/// ```
pub fn auto_configure_nets_for_scale(question: &Question, scale_points: u32) -> Vec<Net> {
    let nets = match scale_points {
        5 => generate_t2b_nets(question),
        7 | 10 => generate_t3b_nets(question),
        _ => Vec::new(),
    };
    if nets.is_empty() {
        log::debug!(
            "No automatic nets for question {} ({} points)",
            question.id,
            scale_points
        );
        return nets;
    }

    let valid: Vec<String> = resolved_options(question).into_iter().map(|o| o.code).collect();
    sync_nets(&nets, &valid)
}
