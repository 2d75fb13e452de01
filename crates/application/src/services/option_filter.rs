//! Picker filtering
//!
//! Narrows a list of picker labels (countries, cities) by what the traveler
//! has typed so far.

/// Keep the options containing `query`, ignoring case
///
/// A blank query keeps everything. Order is preserved.
pub fn filter_options<'a, S>(options: &'a [S], query: &str) -> Vec<&'a str>
where
    S: AsRef<str>,
{
    filter_indices(options, query)
        .into_iter()
        .map(|idx| options[idx].as_ref())
        .collect()
}

/// Positions of the options [`filter_options`] would keep
pub fn filter_indices<S>(options: &[S], query: &str) -> Vec<usize>
where
    S: AsRef<str>,
{
    let needle = query.trim().to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| needle.is_empty() || option.as_ref().to_lowercase().contains(&needle))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_keeps_all() {
        let options = ["France", "Germany", "Belgium"];
        assert_eq!(filter_options(&options, ""), vec!["France", "Germany", "Belgium"]);
        assert_eq!(filter_options(&options, "   ").len(), 3);
    }

    #[test]
    fn matches_substring_case_insensitively() {
        let options = ["Amsterdam".to_string(), "Rotterdam".to_string(), "Berlin".to_string()];
        assert_eq!(filter_options(&options, "DAM"), vec!["Amsterdam", "Rotterdam"]);
        assert_eq!(filter_options(&options, " ber "), vec!["Berlin"]);
    }

    #[test]
    fn indices_point_into_original_list() {
        let options = ["Lyon", "Paris", "Lille"];
        assert_eq!(filter_indices(&options, "l"), vec![0, 2]);
        assert_eq!(filter_indices(&options, ""), vec![0, 1, 2]);
    }

    #[test]
    fn no_match_is_empty() {
        let options = ["Paris"];
        assert!(filter_options(&options, "xyz").is_empty());
    }
}
