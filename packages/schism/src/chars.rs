use schism_dom::{BaseDocument, DomError};
use tracing::trace;

use crate::units::UnitTemplates;
use crate::{Mutation, SplitResult};

/// Replace each word unit with one unit per character, inside the same outer boundary.
///
/// Characters are the Unicode scalar values of the word's serialized markup.
/// Every outer boundary is kept once, so `outers` holds one entry per word
/// while `units` holds one per character.
pub fn split_chars(
    doc: &mut BaseDocument,
    words: &SplitResult,
    templates: &UnitTemplates,
) -> Result<SplitResult, DomError> {
    let mut result = SplitResult::new(Mutation::Chars);

    for &outer in words.outers() {
        if let Some(word) = doc.element_children(outer).first().copied() {
            let markup = doc.inner_html(word);
            doc.mutate().remove_and_drop_node(word);

            let mut buf = [0; 4];
            for ch in markup.chars() {
                let unit = templates.inner(doc, ch.encode_utf8(&mut buf))?;
                doc.mutate().append_children(outer, &[unit]);
                result.push_unit(unit);
            }
        }
        result.push_outer(outer);
    }

    trace!(
        chars = result.units().len(),
        words = result.outers().len(),
        "split words into characters"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use schism_dom::DocumentConfig;

    use super::*;
    use crate::Overflow;
    use crate::units::build_words;

    #[test]
    fn characters_share_their_word_boundary() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let host = doc.mutate().create_html_element("div", vec![]);
        let templates = UnitTemplates::new(&mut doc, Overflow::Hidden).unwrap();
        let words = build_words(&mut doc, host, &["ab", "", "ç"], &templates).unwrap();

        let chars = split_chars(&mut doc, &words, &templates).unwrap();
        assert_eq!(chars.unit_texts(&doc), ["a", "b", "ç"]);
        assert_eq!(chars.char_parents(), words.word_parents());
        assert!(chars.words().is_empty());

        let first = words.outers()[0];
        assert_eq!(doc.nodes[first].children, chars.units()[..2]);
        assert!(doc.nodes[words.outers()[1]].children.is_empty());
        assert!(doc.get_node(words.units()[0]).is_none(), "word unit is dropped");
    }
}
