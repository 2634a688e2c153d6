// src/services/extract.rs

//! Row extraction from the results page.
//!
//! The page has no stable table markup, so rows are recovered from the
//! flattened text: everything between an anchor heading and the footer is
//! scanned, and any text node mentioning a counting status is split on the
//! field separator. Layout changes upstream degrade to fewer or zero rows,
//! never to an error.

use scraper::{Html, Node};

use crate::models::{ExtractConfig, ResultRow};

/// Turns markup into result rows.
pub trait RowExtractor {
    /// Extract rows in document order. Never fails; unknown layouts yield
    /// an empty vector.
    fn extract(&self, markup: &str) -> Vec<ResultRow>;
}

/// Text-node heuristic driven by literal markers.
#[derive(Debug, Clone)]
pub struct HeuristicExtractor {
    anchors: Vec<String>,
    stop_markers: Vec<String>,
    status_tokens: Vec<String>,
    separator: String,
}

impl HeuristicExtractor {
    /// Build an extractor from configuration. Empty markers are dropped,
    /// since an empty string would match every node.
    pub fn new(config: &ExtractConfig) -> Self {
        let non_empty = |list: &[String]| -> Vec<String> {
            list.iter().filter(|s| !s.is_empty()).cloned().collect()
        };

        Self {
            anchors: non_empty(&config.anchors),
            stop_markers: non_empty(&config.stop_markers),
            status_tokens: non_empty(&config.status_tokens),
            separator: config.separator.clone(),
        }
    }

    /// Index of the anchor node. Anchors are tried in priority order and
    /// each one is matched against the first node containing it.
    fn find_anchor(&self, texts: &[&str]) -> Option<usize> {
        self.anchors
            .iter()
            .find_map(|anchor| texts.iter().position(|t| t.contains(anchor.as_str())))
    }

    fn contains_any(text: &str, needles: &[String]) -> bool {
        needles.iter().any(|n| text.contains(n.as_str()))
    }

    fn parse_row(&self, text: &str) -> Option<ResultRow> {
        if self.separator.is_empty() {
            return None;
        }
        let parts: Vec<&str> = text
            .split(self.separator.as_str())
            .filter(|p| !p.is_empty())
            .collect();
        ResultRow::from_fragments(&parts)
    }
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self::new(&ExtractConfig::default())
    }
}

impl RowExtractor for HeuristicExtractor {
    fn extract(&self, markup: &str) -> Vec<ResultRow> {
        let document = Html::parse_document(markup);
        let texts = text_nodes(&document);

        let Some(anchor) = self.find_anchor(&texts) else {
            log::info!("No results section found on page");
            return Vec::new();
        };

        let mut rows = Vec::new();
        let mut skipped = 0usize;

        for text in &texts[anchor + 1..] {
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            if Self::contains_any(text, &self.stop_markers) {
                break;
            }
            if !Self::contains_any(text, &self.status_tokens) {
                continue;
            }

            match self.parse_row(text) {
                Some(row) => rows.push(row),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            log::debug!("Skipped {skipped} status lines with too few fields");
        }
        rows
    }
}

/// All character data of the document in document order. Comments count:
/// a footer marker or heading left inside a comment still delimits the
/// section.
fn text_nodes(document: &Html) -> Vec<&str> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(&**text),
            Node::Comment(comment) => Some(&**comment),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = "East Kingston  Kingston  Jane Doe  PNP  12345  55.2%  Declared  42";

    fn extract(markup: &str) -> Vec<ResultRow> {
        HeuristicExtractor::default().extract(markup)
    }

    #[test]
    fn test_end_to_end_single_row() {
        let html = format!(
            "<html><body><h2>Constituency Results</h2><p>{ROW}</p>\
             <footer>© 2025 Observer</footer></body></html>"
        );
        let rows = extract(&html);

        assert_eq!(
            rows,
            vec![ResultRow {
                constituency: "East Kingston".into(),
                parish: "Kingston".into(),
                candidate: "Jane Doe".into(),
                party: "PNP".into(),
                votes: "12345".into(),
                percent: "55.2".into(),
                status: "Declared".into(),
                boxes: "42".into(),
            }]
        );
    }

    #[test]
    fn test_no_anchor_yields_nothing() {
        let html = format!("<html><body><h2>Live Results</h2><p>{ROW}</p></body></html>");
        assert!(extract(&html).is_empty());
        assert!(extract("").is_empty());
        assert!(extract("<<<not really html").is_empty());
    }

    #[test]
    fn test_stop_marker_ends_section() {
        let html = format!(
            "<body><h2>Constituency Results</h2><p>{ROW}</p>\
             <div>Follow Us on social media</div>\
             <p>West Rural  St. Andrew  John Roe  JLP  999  44.8%  Counting  10</p></body>"
        );
        let rows = extract(&html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].constituency, "East Kingston");
    }

    #[test]
    fn test_stop_marker_in_comment_ends_section() {
        let html = format!(
            "<body><h2>Constituency Results</h2><p>{ROW}</p>\
             <!-- Follow Us widget -->\
             <p>West Rural  St. Andrew  John Roe  JLP  999  44.8%  Counting  10</p></body>"
        );
        let rows = extract(&html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].constituency, "East Kingston");
    }

    #[test]
    fn test_anchor_in_comment_opens_section() {
        let html = format!(
            "<body><p>Before  A  B  C  1  2%  Declared  3</p>\
             <!-- Constituency Results --><p>{ROW}</p></body>"
        );
        let rows = extract(&html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].candidate, "Jane Doe");
    }

    #[test]
    fn test_short_status_line_is_skipped() {
        let html = format!(
            "<body><h2>Constituency Results</h2>\
             <p>Counting  in progress  12 of 63</p><p>{ROW}</p></body>"
        );
        let rows = extract(&html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, "Declared");
    }

    #[test]
    fn test_lines_without_status_are_ignored() {
        let html = "<body><h2>Constituency Results</h2>\
             <p>North  A  B  C  1  2%  Pending  3</p></body>";
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_rows_before_anchor_are_ignored() {
        let html = format!(
            "<body><p>{ROW}</p><h2>Constituency Results</h2>\
             <p>Central  Clarendon  Ann Poe  JLP  800  60%  Not Started  0</p></body>"
        );
        let rows = extract(&html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].constituency, "Central");
        assert_eq!(rows[0].status, "Not Started");
        assert_eq!(rows[0].percent, "60");
    }

    #[test]
    fn test_detailed_anchor_takes_priority() {
        let html = format!(
            "<body><nav>Constituency Results</nav>\
             <p>Early  X  Y  Z  1  1%  Declared  1</p>\
             <h2>Detailed Results by Constituency</h2><p>{ROW}</p></body>"
        );
        let rows = extract(&html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].constituency, "East Kingston");
    }

    #[test]
    fn test_anchor_node_itself_is_not_a_row() {
        let html = "<body><p>Constituency Results  Kingston  A  B  1  2%  Declared  3</p></body>";
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_cells_in_separate_elements_yield_nothing() {
        let html = "<body><h2>Constituency Results</h2><table><tr>\
             <td>East Kingston</td><td>Kingston</td><td>Jane Doe</td><td>PNP</td>\
             <td>12345</td><td>55.2%</td><td>Declared</td><td>42</td></tr></table></body>";
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_wider_spacing_keeps_leading_space() {
        // Three spaces split into a separator plus a leading space.
        let html = "<body><h2>Constituency Results</h2>\
             <p>A   B  C  D  E  F%  Counting  G</p></body>";
        let rows = extract(html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].constituency, "A");
        assert_eq!(rows[0].parish, " B");
        assert_eq!(rows[0].percent, "F");
    }

    #[test]
    fn test_custom_markers() {
        let config = ExtractConfig {
            anchors: vec!["Results".into()],
            stop_markers: vec!["END".into()],
            status_tokens: vec!["Final".into()],
            separator: "|".into(),
        };
        let extractor = HeuristicExtractor::new(&config);
        let html = "<body><h1>Results</h1><p>a|b|c|d|1|2%|Final|3</p><p>END</p>\
             <p>e|f|g|h|4|5%|Final|6</p></body>";
        let rows = extractor.extract(html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].boxes, "3");
    }

    #[test]
    fn test_empty_markers_are_dropped() {
        let config = ExtractConfig {
            stop_markers: vec![String::new(), "©".into()],
            ..ExtractConfig::default()
        };
        let extractor = HeuristicExtractor::new(&config);
        let html = format!("<body><h2>Constituency Results</h2><p>{ROW}</p></body>");
        assert_eq!(extractor.extract(&html).len(), 1);
    }
}
