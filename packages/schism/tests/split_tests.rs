//! Unit structure produced by each granularity

use std::cell::Cell;

use schism::{
    ConfigError, GeometryProbe, Mutation, ProbeError, Schism, SchismOptions, tokenize,
};
use schism_dom::{BaseDocument, DocumentConfig};
use schism_html::HtmlDocument;
use schism_traits::UnitRect;

/// `<p id="host">` inside a body, holding `markup`. Returns (doc, host).
fn document_with_host(markup: &str) -> (BaseDocument, usize) {
    let html = format!("<html><body><p id=\"host\">{markup}</p></body></html>");
    let doc = HtmlDocument::from_html(&html, DocumentConfig::default()).into_inner();
    let host = doc.get_element_by_id("host").expect("host element");
    (doc, host)
}

fn split(markup: &str, mutation: &str) -> (BaseDocument, usize, Schism) {
    let (mut doc, host) = document_with_host(markup);
    let options = SchismOptions::default().with_mutation(mutation);
    let schism = Schism::new(&mut doc, Some(host), options);
    (doc, host, schism)
}

/// Reports one scripted top offset per measurement, in call order
struct ScriptedProbe {
    tops: Vec<f32>,
    calls: Cell<usize>,
}

impl ScriptedProbe {
    fn boxed(tops: &[f32]) -> Box<dyn GeometryProbe> {
        Box::new(ScriptedProbe {
            tops: tops.to_vec(),
            calls: Cell::new(0),
        })
    }
}

impl GeometryProbe for ScriptedProbe {
    fn measure(&self, _: &BaseDocument, _: usize, _: usize) -> Result<UnitRect, ProbeError> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        let top = self.tops.get(call).copied().unwrap_or(0.0);
        Ok(UnitRect::new(20.0, 24.0, top, 0.0))
    }
}

#[test]
fn words_example() {
    let (doc, host, schism) = split("ab cd", "words");
    let result = schism.result();

    assert_eq!(result.granularity(), Some(Mutation::Words));
    assert_eq!(result.unit_texts(&doc), ["ab", "cd"]);
    assert_eq!(result.word_parents().len(), 2);

    let children = &doc.nodes[host].children;
    assert_eq!(children.len(), 4, "two outer boundaries, each followed by a space");
    assert_eq!(children[0], result.outers()[0]);
    assert_eq!(children[2], result.outers()[1]);
    assert_eq!(doc.text_content(children[1]), " ");
    assert_eq!(
        doc.inner_html(host),
        concat!(
            r#"<span data-split="outer" style="display: inline-block; overflow: hidden; vertical-align: top;">"#,
            r#"<span data-split="inner" style="display: inherit; overflow: hidden; vertical-align: inherit;">ab</span>"#,
            "</span> ",
            r#"<span data-split="outer" style="display: inline-block; overflow: hidden; vertical-align: top;">"#,
            r#"<span data-split="inner" style="display: inherit; overflow: hidden; vertical-align: inherit;">cd</span>"#,
            "</span> ",
        )
    );
}

#[test]
fn chars_example() {
    let (doc, _, schism) = split("ab cd", "chars");
    let result = schism.result();

    assert_eq!(result.char_parents().len(), 2, "one outer boundary per word");
    assert_eq!(result.chars().len(), 4);
    assert_eq!(result.unit_texts(&doc), ["a", "b", "c", "d"]);
    assert!(result.words().is_empty() && result.lines().is_empty());

    for (outer, expected) in result.outers().iter().zip([["a", "b"], ["c", "d"]]) {
        let texts: Vec<String> = doc.nodes[*outer]
            .children
            .iter()
            .map(|child| doc.inner_html(*child))
            .collect();
        assert_eq!(texts, expected);
    }
}

#[test]
fn empty_token_example() {
    let (doc, _, schism) = split("a  b", "words");
    assert_eq!(schism.result().unit_texts(&doc), ["a", "", "b"]);
}

#[test]
fn overflow_policy_reaches_inner_boundaries() {
    let (mut doc, host) = document_with_host("ab");
    let options = SchismOptions::default().with_overflow("visible");
    let schism = Schism::new(&mut doc, Some(host), options);

    let inner = schism.units()[0];
    let outer = schism.outers()[0];
    let style = |id: usize, property: &str| {
        doc.nodes[id].element_data().and_then(|el| el.style_property(property))
    };
    assert_eq!(style(inner, "overflow").as_deref(), Some("visible"));
    assert_eq!(style(outer, "overflow").as_deref(), Some("hidden"), "outer always clips");
    assert_eq!(doc.nodes[inner].attr("data-split"), Some("inner"));
    assert_eq!(doc.nodes[outer].attr("data-split"), Some("outer"));
}

#[test]
fn config_error_example() {
    let (mut doc, host) = document_with_host("ab cd");
    let before = doc.inner_html(host);
    let options = SchismOptions::default().with_mutation("paragraphs");
    let schism = Schism::new(&mut doc, Some(host), options);

    assert!(schism.is_inert());
    assert_eq!(
        schism.config_error(),
        Some(&ConfigError::UnknownMutation("paragraphs".into()))
    );
    let result = schism.result();
    for sequence in [
        result.chars(),
        result.char_parents(),
        result.words(),
        result.word_parents(),
        result.lines(),
        result.line_parents(),
    ] {
        assert!(sequence.is_empty());
    }
    assert_eq!(doc.inner_html(host), before, "host content unchanged");
}

#[test]
fn options_load_from_json() {
    let (mut doc, host) = document_with_host("ab cd");
    let options = SchismOptions::from_json(r#"{ "mutation": "chars", "overflow": "visible" }"#)
        .expect("valid json");
    let schism = Schism::new(&mut doc, Some(host), options);
    assert_eq!(schism.mutation(), Some(Mutation::Chars));
    assert_eq!(schism.units().len(), 4);
}

#[test]
fn word_count_matches_tokens() {
    let markup = "one  two <em>three</em> four ";
    let (doc, host, schism) = split(markup, "words");
    let tokens = tokenize(schism.snapshot().unwrap().markup());

    assert_eq!(schism.units().len(), tokens.len());
    assert_eq!(schism.outers().len(), tokens.len());
    assert_eq!(schism.result().unit_texts(&doc), tokens);
    assert!(
        schism
            .units()
            .iter()
            .zip(schism.outers())
            .all(|(unit, outer)| doc.nodes[*unit].parent == Some(*outer)),
        "word units sit directly inside their outer boundary"
    );
    assert_eq!(doc.nodes[host].children.len(), tokens.len() * 2);
}

#[test]
fn char_count_matches_token_lengths() {
    let markup = "héllo  wörld !";
    let (_, _, schism) = split(markup, "chars");
    let tokens = tokenize(markup);

    let expected: usize = tokens.iter().map(|token| token.chars().count()).sum();
    assert_eq!(schism.units().len(), expected);
    assert_eq!(schism.outers().len(), tokens.len(), "empty words keep their boundary");
}

#[test]
fn line_grouping_example() {
    let (mut doc, host) = document_with_host("w1 w2 w3");
    let options = SchismOptions::default().with_mutation("lines");
    let probe = ScriptedProbe::boxed(&[10.0, 10.0, 34.0]);
    // 16px default font gives a 3.2px threshold, 20px gives the 4px of the worked example
    doc.mutate().set_style_property(host, "font-size", "20px").unwrap();

    let schism = Schism::with_probe(&mut doc, Some(host), options, probe);
    let result = schism.result();

    assert_eq!(result.unit_texts(&doc), ["w1 w2", "w3"]);
    assert_eq!(result.line_parents().len(), 2);
    assert_eq!(doc.nodes[host].children, result.outers(), "no separators between lines");
}

#[test]
fn empty_rows_get_a_boundary_without_a_line() {
    // " a": the leading empty word lands on its own row
    let (mut doc, host) = document_with_host(" a");
    let options = SchismOptions::default().with_mutation("lines");
    let probe = ScriptedProbe::boxed(&[0.0, 40.0]);
    let schism = Schism::with_probe(&mut doc, Some(host), options, probe);

    assert_eq!(schism.outers().len(), 2);
    assert_eq!(schism.result().unit_texts(&doc), ["a"]);
    assert!(doc.nodes[schism.outers()[0]].children.is_empty());
}

#[test]
fn markup_inside_words_is_kept() {
    let (doc, _, schism) = split("plain <strong>bold</strong>", "words");
    assert_eq!(
        schism.result().unit_texts(&doc),
        ["plain", "<strong>bold</strong>"]
    );
}

#[test]
fn line_threshold_ratio_changes_row_membership() {
    // Tops 3.5px apart at 20px: within 0.2 * 20 = 4, beyond 0.1 * 20 = 2
    let grouped = |options: SchismOptions| {
        let (mut doc, host) = document_with_host("w1 w2");
        doc.mutate().set_style_property(host, "font-size", "20px").unwrap();
        let probe = ScriptedProbe::boxed(&[0.0, 3.5]);
        let schism = Schism::with_probe(&mut doc, Some(host), options, probe);
        schism.result().unit_texts(&doc)
    };

    assert_eq!(grouped(SchismOptions::default().with_mutation("lines")), ["w1 w2"]);
    assert_eq!(
        grouped(
            SchismOptions::default()
                .with_mutation("lines")
                .with_line_threshold_ratio(0.1)
        ),
        ["w1", "w2"]
    );
}

#[test]
fn non_breaking_spaces_split_as_entities() {
    let (doc, _, schism) = split("a&nbsp;b", "chars");
    assert_eq!(schism.snapshot().unwrap().markup(), "a&nbsp;b");
    assert_eq!(schism.units().len(), 8, "one unit per character of the markup");
    assert_eq!(schism.outers().len(), 1, "a non-breaking space does not separate words");
    assert_eq!(
        schism.result().unit_texts(&doc),
        ["a", "&amp;", "n", "b", "s", "p", ";", "b"]
    );
}
