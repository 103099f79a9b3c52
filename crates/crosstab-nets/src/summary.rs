//! Human-readable net descriptions

use crosstab_core::{CodesNet, Net, RangeNet, RangeOperator, Value};

use crate::options::OptionEntry;

fn number(x: f64) -> String {
    Value::Number(x).to_string()
}

fn upper(net: &RangeNet) -> String {
    net.value2.map(number).unwrap_or_else(|| "?".to_string())
}

fn option_label<'a>(options: &'a [OptionEntry], code: &'a str) -> &'a str {
    options
        .iter()
        .find(|o| o.code == code)
        .map(|o| o.label.as_str())
        .filter(|l| !l.is_empty())
        .unwrap_or(code)
}

/// One-line description of a net, resolving code labels from `options`.
///
/// # Example
/// ```rust
/// use crosstab_core::{Net, RangeOperator};
/// use crosstab_nets::{create_range_net, summary_text};
///
/// let net = Net::Range(create_range_net(None, RangeOperator::Between, 18.0, Some(34.0)));
/// assert_eq!(summary_text(&net, &[]), "Net: 18 - 34");
/// ```
pub fn summary_text(net: &Net, options: &[OptionEntry]) -> String {
    match net {
        Net::Codes(n) => {
            let labels: Vec<&str> = n.codes.iter().map(|c| option_label(options, c)).collect();
            format!("Net: {}", labels.join(", "))
        }
        Net::Range(n) => {
            let v1 = number(n.value1);
            match n.operator {
                RangeOperator::AtLeast => format!("Net: {v1}+"),
                RangeOperator::GreaterThan => format!("Net: > {v1}"),
                RangeOperator::GreaterEqual => format!("Net: ≥ {v1}"),
                RangeOperator::LessThan => format!("Net: < {v1}"),
                RangeOperator::LessEqual => format!("Net: ≤ {v1}"),
                RangeOperator::Exact => format!("Net: {v1} (exact)"),
                RangeOperator::Between => format!("Net: {v1} - {}", upper(n)),
            }
        }
    }
}

fn format_codes_net(net: &CodesNet, options: &[OptionEntry]) -> Option<String> {
    if net.codes.is_empty() {
        return None;
    }
    let codes = net.codes.join(", ");
    if let Some(label) = net.label.as_deref() {
        return Some(format!("{label} ({codes})"));
    }
    let labels: Vec<&str> = net.codes.iter().map(|c| option_label(options, c)).collect();
    let joined = if labels.len() == 2 {
        labels.join(" or ")
    } else {
        labels.join(", ")
    };
    Some(format!("{joined} ({codes})"))
}

fn format_range_net(net: &RangeNet) -> String {
    if let Some(label) = net.label.as_deref() {
        return label.to_string();
    }
    let v1 = number(net.value1);
    match net.operator {
        RangeOperator::Between => match net.value2 {
            Some(v2) => format!("{v1}–{}", number(v2)),
            None => v1,
        },
        RangeOperator::AtLeast => format!("{v1}+"),
        RangeOperator::GreaterThan => format!(">{v1}"),
        RangeOperator::LessThan => format!("<{v1}"),
        RangeOperator::GreaterEqual => format!("≥{v1}"),
        RangeOperator::LessEqual => format!("≤{v1}"),
        RangeOperator::Exact => format!("{v1} (exact)"),
    }
}

/// The `T2B, B2B` / `T3B, B3B` shorthand when `nets` is exactly such a pair
fn box_pair(nets: &[Net]) -> Option<&'static str> {
    if nets.len() != 2 {
        return None;
    }
    let has = |label: &str| nets.iter().any(|n| n.label() == Some(label));
    if has("T2B") && has("B2B") {
        Some("T2B, B2B")
    } else if has("T3B") && has("B3B") {
        Some("T3B, B3B")
    } else {
        None
    }
}

/// Compact description of all nets on a question, for tab plan previews.
///
/// Returns an empty string when there are no nets.
pub fn format_nets(nets: &[Net], options: &[OptionEntry]) -> String {
    if let Some(pair) = box_pair(nets) {
        return format!("Net: {pair}");
    }

    let parts: Vec<String> = nets
        .iter()
        .filter_map(|net| match net {
            Net::Codes(n) => format_codes_net(n, options),
            Net::Range(n) => Some(format_range_net(n)),
        })
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!("Net: {}", parts.join(", "))
    }
}
