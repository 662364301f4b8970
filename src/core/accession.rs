//! Assembly accession extraction from species URL names.
//!
//! Legacy rapid-release URLs encode the species and its assembly in a single
//! path segment, e.g. `Homo_sapiens_GCA_009914755.4`. The accession is
//! everything after the first `_GCA_` or `_GCF_` marker.

use serde::Serialize;

/// Markers separating the species name from the assembly accession
pub const ACCESSION_MARKERS: [&str; 2] = ["_GCA_", "_GCF_"];

/// Prefix every extracted accession is normalized to
pub const GENBANK_PREFIX: &str = "GCA_";

/// Suffix flagging an accession that must be re-resolved through NCBI
pub const REFSEQ_SUFFIX: &str = "rs";

/// An assembly accession (e.g., "`GCA_009914755.4`")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AssemblyAccession(pub String);

impl AssemblyAccession {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the accession from a species URL name.
    ///
    /// The earliest marker in the name wins. The extracted accession always
    /// carries the `GCA_` prefix, even when the marker was `_GCF_`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rapid_resolver::core::accession::AssemblyAccession;
    ///
    /// let acc = AssemblyAccession::from_species_url_name("Homo_sapiens_GCA_009914755.4").unwrap();
    /// assert_eq!(acc.as_str(), "GCA_009914755.4");
    /// assert!(AssemblyAccession::from_species_url_name("Homo_sapiens").is_none());
    /// ```
    #[must_use]
    pub fn from_species_url_name(species_url_name: &str) -> Option<Self> {
        let (start, marker) = ACCESSION_MARKERS
            .iter()
            .filter_map(|marker| species_url_name.find(marker).map(|idx| (idx, *marker)))
            .min_by_key(|(idx, _)| *idx)?;

        let remainder = &species_url_name[start + marker.len()..];
        Some(Self(format!("{GENBANK_PREFIX}{remainder}")))
    }

    /// True if this accession ends with the RefSeq `rs` suffix
    #[must_use]
    pub fn is_refseq(&self) -> bool {
        self.0.ends_with(REFSEQ_SUFFIX)
    }

    /// The accession with the RefSeq suffix removed, if it has one
    #[must_use]
    pub fn without_refseq_suffix(&self) -> Option<&str> {
        self.0.strip_suffix(REFSEQ_SUFFIX)
    }
}

impl std::fmt::Display for AssemblyAccession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
