//! Position-based text splicing shared by all rewriters.

/// Replace `start..end` of the original text with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    fn fits(&self, source: &str, limit: usize) -> bool {
        self.start <= self.end
            && self.end <= limit
            && source.is_char_boundary(self.start)
            && source.is_char_boundary(self.end)
    }
}

/// Which of `edits` [`apply_edits`] would apply, by input position.
///
/// Edits are taken back to front. One that overlaps an edit already taken,
/// falls outside the text, or splits a character is rejected.
pub fn applicable(source: &str, edits: &[Edit]) -> Vec<bool> {
    let mut order: Vec<usize> = (0..edits.len()).collect();
    order.sort_by(|&a, &b| {
        edits[b]
            .start
            .cmp(&edits[a].start)
            .then(edits[b].end.cmp(&edits[a].end))
    });

    let mut accepted = vec![false; edits.len()];
    let mut limit = source.len();
    for index in order {
        let edit = &edits[index];
        if edit.fits(source, limit) {
            accepted[index] = true;
            limit = edit.start;
        }
    }
    accepted
}

/// Apply edits back to front so earlier offsets stay valid.
///
/// Returns the new text and how many edits were applied. Rejected edits
/// (see [`applicable`]) are skipped.
pub fn apply_edits(source: &str, edits: Vec<Edit>) -> (String, usize) {
    let accepted = applicable(source, &edits);
    let mut edits: Vec<Edit> = edits
        .into_iter()
        .zip(accepted)
        .filter_map(|(edit, ok)| ok.then_some(edit))
        .collect();
    edits.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut out = source.to_string();
    for edit in &edits {
        out.replace_range(edit.start..edit.end, &edit.replacement);
    }
    (out, edits.len())
}
