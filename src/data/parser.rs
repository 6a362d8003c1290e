use regex::Regex;
use thiserror::Error;

/// Errors produced while extracting datasets from the input text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input contained no `name=[...]` clause at all.
    #[error("No datasets found. Expected input like `salary=[10,20,30,40]`")]
    NoDatasets,

    /// A clause matched but its bracketed list was empty.
    #[error("Dataset `{name}` has an empty value list")]
    EmptyList { name: String },

    /// A bracketed token did not parse as a floating-point number.
    #[error("Dataset `{name}` contains an invalid number: `{token}`")]
    InvalidNumber { name: String, token: String },
}

/// One named value list as written in the input, before any statistics
/// are computed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataset {
    pub name: String,
    pub values: Vec<f64>,
}

/// Extract every `name=[v1,v2,...]` clause from `input`.
///
/// Anything between clauses (commas, parentheses, a wrapping call like
/// `boxplot(...)`) is cosmetic and ignored. Identifiers keep their
/// first-seen order; a repeated identifier overwrites the values at its
/// original position.
pub fn parse_datasets(input: &str) -> Result<Vec<RawDataset>, ParseError> {
    let re = Regex::new(r"(\w+)=\[(.*?)\]").expect("regex is valid");

    let mut datasets: Vec<RawDataset> = Vec::new();
    for caps in re.captures_iter(input) {
        let name = caps[1].to_string();
        let body = &caps[2];

        if body.trim().is_empty() {
            return Err(ParseError::EmptyList { name });
        }

        let mut values = Vec::new();
        for token in body.split(',') {
            let token = token.trim();
            match token.parse::<f64>() {
                Ok(v) => values.push(v),
                Err(_) => {
                    return Err(ParseError::InvalidNumber {
                        name,
                        token: token.to_string(),
                    })
                }
            }
        }

        match datasets.iter_mut().find(|d| d.name == name) {
            Some(existing) => existing.values = values,
            None => datasets.push(RawDataset { name, values }),
        }
    }

    if datasets.is_empty() {
        return Err(ParseError::NoDatasets);
    }

    Ok(datasets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_dataset() {
        let parsed = parse_datasets("salary=[10,20,30,40]").unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "salary");
        assert_eq!(parsed[0].values, vec![10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_order_within_list_is_preserved() {
        let parsed = parse_datasets("x=[3,1,2]").unwrap();
        assert_eq!(parsed[0].values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_multiple_datasets_keep_first_seen_order() {
        let parsed = parse_datasets("salary=[10,20,30,40], age=[15,25,35,45]").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "salary");
        assert_eq!(parsed[1].name, "age");
        assert_eq!(parsed[1].values, vec![15.0, 25.0, 35.0, 45.0]);
    }

    #[test]
    fn test_surrounding_text_is_ignored() {
        let parsed = parse_datasets("boxplot(salary=[10,20,30,40])").unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "salary");
    }

    #[test]
    fn test_whitespace_around_values() {
        let parsed = parse_datasets("x=[ 1 , 2 ,3 ]").unwrap();
        assert_eq!(parsed[0].values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_negative_and_scientific_notation() {
        let parsed = parse_datasets("x=[-1.5,2e3,0.25]").unwrap();
        assert_eq!(parsed[0].values, vec![-1.5, 2000.0, 0.25]);
    }

    #[test]
    fn test_empty_input_is_no_datasets() {
        assert_eq!(parse_datasets(""), Err(ParseError::NoDatasets));
    }

    #[test]
    fn test_text_without_clause_is_no_datasets() {
        assert_eq!(
            parse_datasets("just some words, no data"),
            Err(ParseError::NoDatasets)
        );
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert_eq!(
            parse_datasets("x=[]"),
            Err(ParseError::EmptyList { name: "x".into() })
        );
    }

    #[test]
    fn test_non_numeric_token_is_rejected() {
        assert_eq!(
            parse_datasets("x=[1,two,3]"),
            Err(ParseError::InvalidNumber {
                name: "x".into(),
                token: "two".into(),
            })
        );
    }

    #[test]
    fn test_duplicate_name_last_write_wins_at_first_position() {
        let parsed = parse_datasets("a=[1,2], b=[3,4], a=[5,6]").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "a");
        assert_eq!(parsed[0].values, vec![5.0, 6.0]);
        assert_eq!(parsed[1].name, "b");
    }

    #[test]
    fn test_error_messages_are_user_readable() {
        let msg = ParseError::NoDatasets.to_string();
        assert!(msg.contains("salary=[10,20,30,40]"));
        let msg = ParseError::InvalidNumber {
            name: "x".into(),
            token: "oops".into(),
        }
        .to_string();
        assert!(msg.contains('x'));
        assert!(msg.contains("oops"));
    }
}
