//! Flattening of report markup into text lines, and lookup of the report's
//! card containers.

use scraper::{ElementRef, Html, Node};

use crate::error::{ParseError, ParseResult};

/// Attribute marking a card container.
pub const CARD_CLASS: &str = "card";

/// Census, timestamp and at least the trailing footer card.
pub const MIN_CARDS: usize = 3;

/// Text lines of `root` in document order. Text nodes are joined onto the
/// current line until a `<br>` element; lines are trimmed and blank ones
/// dropped.
pub fn flatten_lines(root: ElementRef<'_>) -> Vec<String> {
    let mut buffer = String::new();
    for node in root.descendants() {
        match node.value() {
            Node::Text(text) => buffer.push_str(text),
            Node::Element(element) if element.name() == "br" => buffer.push('\n'),
            _ => {}
        }
    }

    buffer
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Document body, or the root element when the markup has no body.
pub fn body(document: &Html) -> ElementRef<'_> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "body")
        .unwrap_or_else(|| document.root_element())
}

/// Elements whose `class` attribute is exactly [`CARD_CLASS`], in pre-order.
pub fn find_cards(root: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().attr("class") == Some(CARD_CLASS))
        .collect()
}

/// Cards of a report split by position.
#[derive(Debug)]
pub struct ReportCards<'a> {
    pub census: ElementRef<'a>,
    pub timestamp: ElementRef<'a>,
    /// Turn cards; the trailing footer card is already excluded.
    pub turns: Vec<ElementRef<'a>>,
}

/// Index of the first turn card in document order.
pub const FIRST_TURN_CARD: usize = 2;

pub fn segment_cards(root: ElementRef<'_>) -> ParseResult<ReportCards<'_>> {
    let cards = find_cards(root);
    if cards.len() < MIN_CARDS {
        return Err(ParseError::shape(format!(
            "expected at least {MIN_CARDS} cards, found {}",
            cards.len()
        )));
    }

    Ok(ReportCards {
        census: cards[0],
        timestamp: cards[1],
        turns: cards[FIRST_TURN_CARD..cards.len() - 1].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn fragment_lines(markup: &str) -> Vec<String> {
        let document = Html::parse_document(markup);
        flatten_lines(body(&document))
    }

    #[test]
    fn br_splits_lines_and_text_nodes_join() {
        let lines = fragment_lines("<body><div>🇻🇦<b>Alice</b> turn<br>target: x<br/><br>  </div></body>");
        assert_eq!(lines, vec!["🇻🇦Alice turn", "target: x"]);
    }

    #[test]
    fn newlines_inside_text_also_split() {
        let lines = fragment_lines("<body><p>one\n  two  </p></body>");
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn empty_markup_flattens_to_nothing() {
        assert!(fragment_lines("<body><div> </div></body>").is_empty());
    }

    #[test]
    fn cards_are_found_in_document_order_by_exact_class() {
        let document = Html::parse_document(
            r#"<body>
                <div class="card">a<div class="card">b</div></div>
                <div class="card wide">skip</div>
                <div class="card">c</div>
            </body>"#,
        );
        let texts: Vec<String> = find_cards(body(&document))
            .into_iter()
            .map(|card| card.text().collect::<String>())
            .collect();
        assert_eq!(texts, vec!["ab", "b", "c"]);
    }

    #[test]
    fn segmenter_excludes_trailing_card() {
        let document = Html::parse_document(
            r#"<body><div class="card">census</div><div class="card">time</div>
               <div class="card">t1</div><div class="card">t2</div><div class="card">footer</div></body>"#,
        );
        let cards = segment_cards(body(&document)).unwrap();
        assert_eq!(flatten_lines(cards.census), vec!["census"]);
        assert_eq!(flatten_lines(cards.timestamp), vec!["time"]);
        let turns: Vec<Vec<String>> = cards.turns.into_iter().map(flatten_lines).collect();
        assert_eq!(turns, vec![vec!["t1"], vec!["t2"]]);
    }

    #[test]
    fn fewer_than_three_cards_is_shape_violation() {
        let document = Html::parse_document(r#"<body><div class="card">a</div><div class="card">b</div></body>"#);
        assert_eq!(segment_cards(body(&document)).unwrap_err().kind, ErrorKind::Shape);
    }
}
