/// Which of the three recognized sections a response mentions.
///
/// The bits are decided once, before the line scan, and they alone decide which
/// fields of a [`KeggRecord`] exist and which output columns are filled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Presence(u8);

impl Presence {
    pub const NAME: Presence = Presence(0b001);
    pub const ENZYME: Presence = Presence(0b010);
    pub const ORTHOLOGY: Presence = Presence(0b100);

    pub fn new(name: bool, enzyme: bool, orthology: bool) -> Self {
        let mut bits = 0;
        if name {
            bits |= Self::NAME.0;
        }
        if enzyme {
            bits |= Self::ENZYME.0;
        }
        if orthology {
            bits |= Self::ORTHOLOGY.0;
        }
        Presence(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Presence) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// The annotation extracted from one KEGG `get` response.
///
/// `None` means the section keyword never appeared in the response, `Some(vec![])`
/// means it appeared but yielded no data. A record with all three fields `None` is
/// the "nothing extracted" outcome, not an error.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeggRecord {
    pub name: Option<Vec<String>>,
    pub enzymes: Option<Vec<String>>,
    pub orthology: Option<Vec<String>>,
}

/// A column in the tab-separated fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Enzymes,
    Orthology,
    Empty,
}

use Column::*;

/// Column template for every presence vector, indexed by [`Presence::bits`].
const LAYOUT: [[Column; 3]; 8] = [
    [Empty, Empty, Empty],         // none
    [Name, Empty, Empty],          // NAME
    [Empty, Enzymes, Empty],       // ENZYME
    [Name, Enzymes, Empty],        // NAME + ENZYME
    [Empty, Empty, Orthology],     // ORTHOLOGY
    [Name, Empty, Orthology],      // NAME + ORTHOLOGY
    [Empty, Enzymes, Orthology],   // ENZYME + ORTHOLOGY
    [Name, Enzymes, Orthology],    // all
];

impl KeggRecord {
    /// The all-absent record.
    pub fn nothing() -> Self {
        Self::default()
    }

    pub fn is_nothing(&self) -> bool {
        self.presence().is_empty()
    }

    pub fn presence(&self) -> Presence {
        Presence::new(
            self.name.is_some(),
            self.enzymes.is_some(),
            self.orthology.is_some(),
        )
    }

    /// The three output columns, with absent sections rendered as empty strings and
    /// multi-valued fields joined with `;`.
    pub fn columns(&self) -> [String; 3] {
        LAYOUT[self.presence().bits() as usize].map(|column| {
            let values = match column {
                Name => self.name.as_deref(),
                Enzymes => self.enzymes.as_deref(),
                Orthology => self.orthology.as_deref(),
                Empty => None,
            };
            values.map(|v| v.join(";")).unwrap_or_default()
        })
    }

    /// Render the record as the fragment appended after the id columns of an output
    /// row: three columns, each preceded by a tab.
    ///
    /// ```
    /// use keggkit::KeggRecord;
    ///
    /// let record = KeggRecord {
    ///     orthology: Some(vec!["K00844".to_string(), "K00845".to_string()]),
    ///     ..Default::default()
    /// };
    /// assert_eq!(record.to_fragment(), "\t\t\tK00844;K00845");
    /// ```
    pub fn to_fragment(&self) -> String {
        let [name, enzymes, orthology] = self.columns();
        format!("\t{}\t{}\t{}", name, enzymes, orthology)
    }
}

/// Fragment used in place of a record when the request for it failed.
pub const FAILED_FRAGMENT: &str = "\tNone\tNone\tNone";

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn record(name: bool, enzymes: bool, orthology: bool) -> KeggRecord {
        KeggRecord {
            name: name.then(|| strings(&["Aldehyde dehydrogenase"])),
            enzymes: enzymes.then(|| strings(&["1.2.1.3", "1.2.1.5"])),
            orthology: orthology.then(|| strings(&["K00844", "K00845"])),
        }
    }

    #[rstest]
    #[case(false, false, false, "\t\t\t")]
    #[case(true, false, false, "\tAldehyde dehydrogenase\t\t")]
    #[case(false, true, false, "\t\t1.2.1.3;1.2.1.5\t")]
    #[case(true, true, false, "\tAldehyde dehydrogenase\t1.2.1.3;1.2.1.5\t")]
    #[case(false, false, true, "\t\t\tK00844;K00845")]
    #[case(true, false, true, "\tAldehyde dehydrogenase\t\tK00844;K00845")]
    #[case(false, true, true, "\t\t1.2.1.3;1.2.1.5\tK00844;K00845")]
    #[case(
        true,
        true,
        true,
        "\tAldehyde dehydrogenase\t1.2.1.3;1.2.1.5\tK00844;K00845"
    )]
    fn fragment_layout(
        #[case] name: bool,
        #[case] enzymes: bool,
        #[case] orthology: bool,
        #[case] expected: &str,
    ) {
        let fragment = record(name, enzymes, orthology).to_fragment();
        assert_eq!(fragment, expected);
        assert_eq!(fragment.matches('\t').count(), 3);
    }

    #[test]
    fn only_name_matches_name_with_empty_enzyme() {
        let only_name = record(true, false, false);
        let empty_enzyme = KeggRecord {
            enzymes: Some(vec![]),
            ..only_name.clone()
        };
        assert_eq!(only_name.to_fragment(), empty_enzyme.to_fragment());
    }

    #[test]
    fn nothing_is_all_absent() {
        let nothing = KeggRecord::nothing();
        assert!(nothing.is_nothing());
        assert_eq!(nothing.presence().bits(), 0);
        assert!(!record(false, false, true).is_nothing());
    }

    #[test]
    fn presence_bits() {
        let p = Presence::new(true, false, true);
        assert!(p.contains(Presence::NAME));
        assert!(!p.contains(Presence::ENZYME));
        assert!(p.contains(Presence::ORTHOLOGY));
        assert_eq!(p.bits(), 0b101);
    }

    #[test]
    fn failed_fragment_has_three_columns() {
        assert_eq!(FAILED_FRAGMENT.matches('\t').count(), 3);
    }
}
