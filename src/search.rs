use crate::log::now_ms;
use crate::log_info;
use crate::parse::{find_occurrences, parse_query, to_highlight_spans, to_segments};
use crate::store::RecordStore;
use crate::types::{MatchResult, MatcherConfig, SuggestionOutcome};

/// Substring matcher over car names
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(config: MatcherConfig) -> Self {
        Matcher { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Suggestions for `query`: first `max_results` cars, in store order, whose
    /// name contains the query ignoring case.
    pub fn query(&self, store: &RecordStore, query: &str) -> SuggestionOutcome {
        let Some(query) = parse_query(query, &self.config) else {
            return SuggestionOutcome::Hidden;
        };

        if !store.is_available() {
            return SuggestionOutcome::Unavailable;
        }

        let start = now_ms();
        let mut scanned = 0usize;
        let results: Vec<MatchResult> = store
            .cars()
            .iter()
            .inspect(|_| scanned += 1)
            .filter_map(|car| {
                let ranges = find_occurrences(&car.name, query);
                if ranges.is_empty() {
                    return None;
                }
                Some(MatchResult {
                    display_text: car.name.clone(),
                    highlight_spans: to_highlight_spans(&car.name, &ranges),
                    segments: to_segments(&car.name, &ranges),
                })
            })
            .take(self.config.max_results)
            .collect();

        log_info!(
            "[perf] query='{}' scanned={} matches={} | total={:.1}ms",
            query,
            scanned,
            results.len(),
            now_ms() - start
        );

        if results.is_empty() {
            SuggestionOutcome::NoResults
        } else {
            SuggestionOutcome::Matches(results)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::car_row;
    use crate::types::ColumnConfig;

    fn store_of(names: &[&str]) -> RecordStore {
        let rows: Vec<_> = names.iter().map(|n| car_row(n, "1")).collect();
        RecordStore::load(&rows, &[], &ColumnConfig::default())
    }

    fn names(outcome: &SuggestionOutcome) -> Vec<&str> {
        outcome
            .matches()
            .iter()
            .map(|m| m.display_text.as_str())
            .collect()
    }

    #[test]
    fn test_short_query_hidden_regardless_of_store() {
        let matcher = Matcher::new(MatcherConfig::search_box());
        assert_eq!(matcher.query(&store_of(&["ab"]), "a"), SuggestionOutcome::Hidden);
        assert_eq!(matcher.query(&RecordStore::pending(), "a"), SuggestionOutcome::Hidden);
        assert_eq!(matcher.query(&RecordStore::failed("x"), " "), SuggestionOutcome::Hidden);
    }

    #[test]
    fn test_detail_mode_accepts_single_char() {
        let matcher = Matcher::new(MatcherConfig::detail_page());
        let outcome = matcher.query(&store_of(&["Alto", "Brio"]), "o");
        assert_eq!(names(&outcome), vec!["Alto", "Brio"]);
        assert_eq!(matcher.query(&store_of(&["Alto"]), ""), SuggestionOutcome::Hidden);
    }

    #[test]
    fn test_unavailable_store() {
        let matcher = Matcher::default();
        assert_eq!(matcher.query(&RecordStore::pending(), "alto"), SuggestionOutcome::Unavailable);
        assert_eq!(matcher.query(&RecordStore::failed("404"), "alto"), SuggestionOutcome::Unavailable);
        assert_eq!(matcher.query(&store_of(&[]), "alto"), SuggestionOutcome::Unavailable);
    }

    #[test]
    fn test_no_results() {
        let matcher = Matcher::default();
        assert_eq!(matcher.query(&store_of(&["Alto"]), "zzz"), SuggestionOutcome::NoResults);
    }

    #[test]
    fn test_single_match_with_all_spans() {
        let matcher = Matcher::default();
        let store = store_of(&["Swift", "Tata Tiago", "Creta"]);
        let outcome = matcher.query(&store, "TA");
        assert_eq!(names(&outcome), vec!["Tata Tiago", "Creta"]);

        let outcome = matcher.query(&store, "TaTa");
        let results = outcome.matches();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_text, "Tata Tiago");
        assert_eq!(results[0].highlight_spans.len(), 1);

        let outcome = matcher.query(&store, "tIAgo");
        let spans = &outcome.matches()[0].highlight_spans;
        assert_eq!((spans[0].start, spans[0].end), (5, 10));
    }

    #[test]
    fn test_results_capped_in_store_order() {
        let matcher = Matcher::default();
        let store = store_of(&["Zeta 1", "Alpha 2", "Zeta 3", "Beta 4", "Zeta 5", "Eta 6", "Aeta 7"]);
        let outcome = matcher.query(&store, "eta");
        assert_eq!(
            names(&outcome),
            vec!["Zeta 1", "Zeta 3", "Beta 4", "Zeta 5", "Eta 6"]
        );

        let wide = Matcher::new(MatcherConfig {
            max_results: 10,
            ..MatcherConfig::search_box()
        });
        assert_eq!(wide.query(&store, "eta").matches().len(), 6);
    }

    #[test]
    fn test_regex_metacharacters_match_literally() {
        let matcher = Matcher::default();
        let store = store_of(&["Mustang (V8)", "Mustang V8", "C* Class"]);
        assert_eq!(names(&matcher.query(&store, "v8)")), vec!["Mustang (V8)"]);
        assert_eq!(matcher.query(&store, "**"), SuggestionOutcome::NoResults);
        assert_eq!(names(&matcher.query(&store, "c*")), vec!["C* Class"]);
        assert_eq!(matcher.query(&store, "[("), SuggestionOutcome::NoResults);
    }

    #[test]
    fn test_spans_index_display_text_as_js_string() {
        let matcher = Matcher::default();
        let store = store_of(&["Citroën C3", "İstanbul Edition"]);

        let outcome = matcher.query(&store, "C3");
        let result = &outcome.matches()[0];
        assert_eq!(result.display_text, "Citroën C3");
        let span = result.highlight_spans[0];
        assert_eq!((span.start, span.end), (8, 10));
        assert_eq!(result.segments[1].text, "C3");

        let outcome = matcher.query(&store, "İS");
        assert_eq!(names(&outcome), vec!["İstanbul Edition"]);
        let span = outcome.matches()[0].highlight_spans[0];
        assert_eq!((span.start, span.end), (0, 2));
    }
}
