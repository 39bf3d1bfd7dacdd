/// A named base/target pair with the label used for `{target}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProblemSet {
    /// Lookup name.
    pub name: &'static str,
    /// Filler string shown in every other cell.
    pub base: &'static str,
    /// String hidden in one cell.
    pub target: &'static str,
    /// Human-readable label substituted into header/footer templates.
    pub target_name: &'static str,
}

/// Built-in problem sets.
pub const PROBLEM_SETS: &[ProblemSet] = &[
    ProblemSet {
        name: "digits-60-06",
        base: "60",
        target: "06",
        target_name: "숫자 '06'",
    },
    ProblemSet {
        name: "hangul-na-neo",
        base: "나",
        target: "너",
        target_name: "글자 '너'",
    },
    ProblemSet {
        name: "latin-o-q",
        base: "O",
        target: "Q",
        target_name: "알파벳 'Q'",
    },
    ProblemSet {
        name: "hanja-dae-tae",
        base: "大",
        target: "太",
        target_name: "한자 '太'",
    },
];

/// Lookup a problem set by name (ASCII case-insensitive).
pub fn find_preset(name: &str) -> Option<&'static ProblemSet> {
    PROBLEM_SETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
