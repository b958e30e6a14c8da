use schism_dom::BaseDocument;

use crate::Mutation;

/// The units produced by one rebuild.
///
/// `units` are the inner boundaries at the result's granularity, in reading
/// order. `outers` are the outer boundaries, also in reading order.
///
/// The two sequences only line up index for index in word mode:
///
/// - chars: one outer boundary per *word* holds several character units, so
///   `outers` is usually shorter than `units`.
/// - lines: a row whose text is empty gets an outer boundary but no unit, so
///   `units` may be shorter than `outers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitResult {
    granularity: Option<Mutation>,
    units: Vec<usize>,
    outers: Vec<usize>,
}

impl SplitResult {
    pub(crate) fn new(granularity: Mutation) -> Self {
        Self {
            granularity: Some(granularity),
            units: Vec::new(),
            outers: Vec::new(),
        }
    }

    pub(crate) fn push_unit(&mut self, unit: usize) {
        self.units.push(unit);
    }

    pub(crate) fn push_outer(&mut self, outer: usize) {
        self.outers.push(outer);
    }

    /// `None` for the empty result of an inert or destroyed instance
    pub fn granularity(&self) -> Option<Mutation> {
        self.granularity
    }

    pub fn units(&self) -> &[usize] {
        &self.units
    }

    pub fn outers(&self) -> &[usize] {
        &self.outers
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty() && self.outers.is_empty()
    }

    fn units_if(&self, granularity: Mutation) -> &[usize] {
        if self.granularity == Some(granularity) {
            &self.units
        } else {
            &[]
        }
    }

    fn outers_if(&self, granularity: Mutation) -> &[usize] {
        if self.granularity == Some(granularity) {
            &self.outers
        } else {
            &[]
        }
    }

    pub fn chars(&self) -> &[usize] {
        self.units_if(Mutation::Chars)
    }

    pub fn char_parents(&self) -> &[usize] {
        self.outers_if(Mutation::Chars)
    }

    pub fn words(&self) -> &[usize] {
        self.units_if(Mutation::Words)
    }

    pub fn word_parents(&self) -> &[usize] {
        self.outers_if(Mutation::Words)
    }

    pub fn lines(&self) -> &[usize] {
        self.units_if(Mutation::Lines)
    }

    pub fn line_parents(&self) -> &[usize] {
        self.outers_if(Mutation::Lines)
    }

    /// The serialized content of each unit, in order
    pub fn unit_texts(&self, doc: &BaseDocument) -> Vec<String> {
        self.units.iter().map(|unit| doc.inner_html(*unit)).collect()
    }
}
