//! Net constructors and validation

use crosstab_core::{CodesNet, Net, RangeNet, RangeOperator, Value};

use crate::error::{NetError, NetResult};

const MISSING_KIND: &str = "Net must have a kind (codes or range)";
const EMPTY_CODES: &str = "Codes net must have at least one code selected";
const BAD_FIRST_VALUE: &str = "First value must be a valid number";
const BAD_SECOND_VALUE: &str = "Second value must be a valid number for range";
const INVERTED_RANGE: &str = "First value must be less than or equal to second value";

/// Build a codes net, dropping duplicate codes while keeping first-seen order
///
/// # Example
/// ```rust
/// use crosstab_nets::create_codes_net;
///
/// let net = create_codes_net(Some("T2B"), ["4", "5", "4"]);
/// assert_eq!(net.codes, vec!["4", "5"]);
/// ```
pub fn create_codes_net<I, S>(label: Option<&str>, codes: I) -> CodesNet
where
    I: IntoIterator<Item = S>,
    S: ToString,
{
    let mut unique: Vec<String> = Vec::new();
    for code in codes {
        let code = code.to_string();
        if !unique.contains(&code) {
            unique.push(code);
        }
    }
    CodesNet {
        label: label.filter(|l| !l.is_empty()).map(str::to_string),
        codes: unique,
    }
}

/// Build a range net; `value2` is kept only for [`RangeOperator::Between`]
pub fn create_range_net(
    label: Option<&str>,
    operator: RangeOperator,
    value1: f64,
    value2: Option<f64>,
) -> RangeNet {
    RangeNet {
        label: label.filter(|l| !l.is_empty()).map(str::to_string),
        operator,
        value1,
        value2: if operator.needs_upper_bound() {
            value2
        } else {
            None
        },
    }
}

/// List the problems with a net. An empty list means the net can be saved.
///
/// Codes are checked against `valid_codes`, the question's option codes.
pub fn validate_net(net: &Net, valid_codes: &[String]) -> Vec<String> {
    match net {
        Net::Codes(n) => validate_codes(&n.codes, Some(valid_codes)),
        Net::Range(n) => validate_range(Some(n.value1), n.operator, n.value2),
    }
}

fn validate_codes(codes: &[String], valid_codes: Option<&[String]>) -> Vec<String> {
    let mut problems = Vec::new();
    if codes.is_empty() {
        problems.push(EMPTY_CODES.to_string());
    }
    if let Some(valid) = valid_codes {
        let invalid: Vec<&str> = codes
            .iter()
            .filter(|c| !valid.contains(c))
            .map(String::as_str)
            .collect();
        if !invalid.is_empty() {
            problems.push(format!("Invalid codes: {}", invalid.join(", ")));
        }
    }
    problems
}

fn validate_range(value1: Option<f64>, operator: RangeOperator, value2: Option<f64>) -> Vec<String> {
    let mut problems = Vec::new();
    let v1 = value1.filter(|v| v.is_finite());
    if v1.is_none() {
        problems.push(BAD_FIRST_VALUE.to_string());
    }
    if operator.needs_upper_bound() {
        match value2.filter(|v| v.is_finite()) {
            None => problems.push(BAD_SECOND_VALUE.to_string()),
            Some(v2) => {
                if v1.is_some_and(|v1| v1 > v2) {
                    problems.push(INVERTED_RANGE.to_string());
                }
            }
        }
    }
    problems
}

/// A net as submitted by an editor, before it is known to be well formed.
///
/// Every field is optional; numeric bounds may arrive as numbers or text.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NetDraft {
    pub kind: Option<String>,
    pub label: Option<String>,
    pub codes: Option<Vec<Value>>,
    pub operator: Option<String>,
    pub value1: Option<Value>,
    pub value2: Option<Value>,
}

enum DraftKind {
    Codes,
    Range,
}

impl NetDraft {
    fn kind(&self) -> Option<DraftKind> {
        match self.kind.as_deref().map(str::trim) {
            Some("codes") => Some(DraftKind::Codes),
            Some("range") => Some(DraftKind::Range),
            _ => None,
        }
    }

    fn code_strings(&self) -> Vec<String> {
        self.codes
            .iter()
            .flatten()
            .filter(|c| !c.is_missing())
            .map(ToString::to_string)
            .collect()
    }

    fn range_operator(&self) -> Result<RangeOperator, String> {
        match self.operator.as_deref() {
            None | Some("") => Ok(RangeOperator::Between),
            Some(op) => RangeOperator::from_symbol(op)
                .ok_or_else(|| format!("Unknown range operator '{op}'")),
        }
    }

    fn number(value: &Option<Value>) -> Option<f64> {
        value.as_ref().and_then(Value::as_number)
    }

    fn problems(&self, valid_codes: Option<&[String]>) -> Vec<String> {
        match self.kind() {
            None => vec![MISSING_KIND.to_string()],
            Some(DraftKind::Codes) => validate_codes(&self.code_strings(), valid_codes),
            Some(DraftKind::Range) => match self.range_operator() {
                Ok(op) => validate_range(Self::number(&self.value1), op, Self::number(&self.value2)),
                Err(problem) => vec![problem],
            },
        }
    }

    /// List the problems with the draft, checking codes against `valid_codes`
    pub fn validate(&self, valid_codes: &[String]) -> Vec<String> {
        self.problems(Some(valid_codes))
    }

    /// Convert into a typed net. Code membership is not checked here.
    pub fn into_net(self) -> NetResult<Net> {
        let problems = self.problems(None);
        if !problems.is_empty() {
            return Err(NetError::InvalidDraft { problems });
        }

        let label = self.label.as_deref();
        match self.kind() {
            Some(DraftKind::Codes) => Ok(Net::Codes(create_codes_net(label, self.code_strings()))),
            _ => {
                let operator = self
                    .range_operator()
                    .map_err(|p| NetError::InvalidDraft { problems: vec![p] })?;
                let value1 = Self::number(&self.value1).ok_or_else(|| NetError::InvalidDraft {
                    problems: vec![BAD_FIRST_VALUE.to_string()],
                })?;
                Ok(Net::Range(create_range_net(
                    label,
                    operator,
                    value1,
                    Self::number(&self.value2),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_codes_net_dedup() {
        let net = create_codes_net(None, [1, 2, 2, 1]);
        assert_eq!(net.codes, codes(&["1", "2"]));
        assert_eq!(net.label, None);
        assert_eq!(create_codes_net(Some(""), ["1"]).label, None);
    }

    #[test]
    fn test_create_range_net_drops_unused_bound() {
        let net = create_range_net(Some("65+"), RangeOperator::AtLeast, 65.0, Some(99.0));
        assert_eq!(net.value2, None);
        let net = create_range_net(None, RangeOperator::Between, 18.0, Some(34.0));
        assert_eq!(net.value2, Some(34.0));
    }

    #[test]
    fn test_create_range_net_empty_label() {
        let net = create_range_net(Some(""), RangeOperator::AtLeast, 65.0, None);
        assert_eq!(net.label, None);
        let net = create_range_net(Some("65+"), RangeOperator::AtLeast, 65.0, None);
        assert_eq!(net.label.as_deref(), Some("65+"));
    }

    #[test]
    fn test_validate_codes() {
        let valid = codes(&["1", "2", "3"]);
        let empty = Net::Codes(create_codes_net(None, Vec::<String>::new()));
        assert_eq!(
            validate_net(&empty, &valid),
            vec!["Codes net must have at least one code selected"]
        );

        let bad = Net::Codes(create_codes_net(None, ["1", "7", "9"]));
        assert_eq!(validate_net(&bad, &valid), vec!["Invalid codes: 7, 9"]);

        let ok = Net::Codes(create_codes_net(None, ["1", "3"]));
        assert!(validate_net(&ok, &valid).is_empty());
    }

    #[test]
    fn test_validate_range() {
        let inverted = Net::Range(create_range_net(None, RangeOperator::Between, 5.0, Some(1.0)));
        assert_eq!(
            validate_net(&inverted, &[]),
            vec!["First value must be less than or equal to second value"]
        );

        let missing = Net::Range(create_range_net(None, RangeOperator::Between, 5.0, None));
        assert_eq!(
            validate_net(&missing, &[]),
            vec!["Second value must be a valid number for range"]
        );

        let nan = Net::Range(create_range_net(None, RangeOperator::GreaterThan, f64::NAN, None));
        assert_eq!(validate_net(&nan, &[]), vec!["First value must be a valid number"]);
    }

    #[test]
    fn test_draft_missing_kind() {
        let draft = NetDraft::default();
        assert_eq!(
            draft.validate(&[]),
            vec!["Net must have a kind (codes or range)"]
        );
        assert!(matches!(
            draft.into_net(),
            Err(NetError::InvalidDraft { .. })
        ));
    }

    #[test]
    fn test_draft_into_net() {
        let draft = NetDraft {
            kind: Some("range".into()),
            label: Some("Young".into()),
            operator: Some("-".into()),
            value1: Some(Value::text("18")),
            value2: Some(Value::Number(34.0)),
            ..Default::default()
        };
        assert!(draft.validate(&[]).is_empty());
        let net = draft.into_net().unwrap();
        assert_eq!(
            net,
            Net::Range(create_range_net(Some("Young"), RangeOperator::Between, 18.0, Some(34.0)))
        );

        let draft = NetDraft {
            kind: Some("codes".into()),
            codes: Some(vec![Value::Number(4.0), Value::text("5")]),
            ..Default::default()
        };
        assert_eq!(draft.validate(&codes(&["4"])), vec!["Invalid codes: 5"]);
        let net = draft.into_net().unwrap();
        assert_eq!(net, Net::Codes(create_codes_net(None, ["4", "5"])));
    }

    #[test]
    fn test_draft_bad_operator() {
        let draft = NetDraft {
            kind: Some("range".into()),
            operator: Some("~".into()),
            value1: Some(Value::Number(1.0)),
            ..Default::default()
        };
        assert_eq!(draft.validate(&[]), vec!["Unknown range operator '~'"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_draft_from_json() {
        let draft: NetDraft = serde_json::from_str(
            r#"{"kind":"range","label":"18-34","operator":"-","value1":"18","value2":34}"#,
        )
        .unwrap();
        assert!(draft.validate(&[]).is_empty());
        assert_eq!(
            draft.into_net().unwrap(),
            Net::Range(create_range_net(Some("18-34"), RangeOperator::Between, 18.0, Some(34.0)))
        );

        let draft: NetDraft = serde_json::from_str(r#"{"label":"No kind"}"#).unwrap();
        assert_eq!(draft.validate(&[]), vec![MISSING_KIND]);
    }
}
