use serde::Serialize;

/// Canonical names of the built-in sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    Version,
    Well,
    Curve,
    Parameter,
    Other,
}

impl SectionName {
    /// Map a section letter to its canonical name. `~A` and custom letters have none.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'V' => Some(SectionName::Version),
            'W' => Some(SectionName::Well),
            'C' => Some(SectionName::Curve),
            'P' => Some(SectionName::Parameter),
            'O' => Some(SectionName::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Version => "Version Information",
            SectionName::Well => "Well Information",
            SectionName::Curve => "Curve Information",
            SectionName::Parameter => "Parameter Information",
            SectionName::Other => "Other Information",
        }
    }
}

/// A `~`-introduced block of header lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub lines: Vec<Line>,
    pub comments: Vec<String>,
}

/// One `MNEMONIC.UNITS DATA:DESCRIPTION` entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Line {
    pub mnemonic: String,
    pub units: String,
    pub data: String,
    pub description: String,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// First line whose mnemonic matches, ignoring case
    pub fn line(&self, mnemonic: &str) -> Option<&Line> {
        self.lines
            .iter()
            .find(|line| eq_ignore_case(&line.mnemonic, mnemonic))
    }

    /// Mnemonics in source order
    pub fn mnemonics(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(|line| line.mnemonic.as_str())
    }

    pub fn is_named(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name)
    }
}

impl Line {
    pub fn new(
        mnemonic: impl Into<String>,
        units: impl Into<String>,
        data: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            units: units.into(),
            data: data.into(),
            description: description.into(),
        }
    }
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
