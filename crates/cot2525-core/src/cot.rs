//! Composing atom CoT types and walking them towards less specific parents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::decode::ATOM;

/// Whose side an entity is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affiliation {
    Friendly,
    Hostile,
    Unknown,
    Pending,
    Assumed,
    Neutral,
    Suspect,
    Joker,
    Faker,
}

impl Affiliation {
    pub const ALL: [Affiliation; 9] = [
        Affiliation::Friendly,
        Affiliation::Hostile,
        Affiliation::Unknown,
        Affiliation::Pending,
        Affiliation::Assumed,
        Affiliation::Neutral,
        Affiliation::Suspect,
        Affiliation::Joker,
        Affiliation::Faker,
    ];

    /// CoT code character.
    pub fn code(self) -> char {
        match self {
            Affiliation::Friendly => 'f',
            Affiliation::Hostile => 'h',
            Affiliation::Unknown => 'u',
            Affiliation::Pending => 'p',
            Affiliation::Assumed => 'a',
            Affiliation::Neutral => 'n',
            Affiliation::Suspect => 's',
            Affiliation::Joker => 'j',
            Affiliation::Faker => 'k',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Affiliation::Friendly => "friendly",
            Affiliation::Hostile => "hostile",
            Affiliation::Unknown => "unknown",
            Affiliation::Pending => "pending",
            Affiliation::Assumed => "assumed",
            Affiliation::Neutral => "neutral",
            Affiliation::Suspect => "suspect",
            Affiliation::Joker => "joker",
            Affiliation::Faker => "faker",
        }
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Affiliation {
    type Err = String;

    /// Accepts the full name (`hostile`) or the CoT code (`h`), any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Affiliation::ALL
            .into_iter()
            .find(|a| a.name() == wanted || a.code().to_string() == wanted)
            .ok_or_else(|| format!("unknown affiliation: {s}"))
    }
}

/// Operating domain of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Air,
    Ground,
    Surface,
    Subsurface,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Air,
        Dimension::Ground,
        Dimension::Surface,
        Dimension::Subsurface,
    ];

    /// CoT code character.
    pub fn code(self) -> char {
        match self {
            Dimension::Air => 'A',
            Dimension::Ground => 'G',
            Dimension::Surface => 'S',
            Dimension::Subsurface => 'U',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Air => "air",
            Dimension::Ground => "ground",
            Dimension::Surface => "surface",
            Dimension::Subsurface => "subsurface",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = String;

    /// Accepts the full name (`ground`), `underwater`, or the CoT code (`G`), any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        if wanted == "underwater" {
            return Ok(Dimension::Subsurface);
        }
        Dimension::ALL
            .into_iter()
            .find(|d| d.name() == wanted || d.code().to_ascii_lowercase().to_string() == wanted)
            .ok_or_else(|| format!("unknown dimension: {s}"))
    }
}

/// Builder for atom CoT types (`a-<affiliation>-<dimension>-<function>...`).
///
/// Unset affiliation or dimension render as `-`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CotType {
    affiliation: Option<Affiliation>,
    dimension: Option<Dimension>,
    functions: Vec<char>,
    suffix: String,
}

impl CotType {
    pub fn atom() -> Self {
        Self::default()
    }

    pub fn affiliation(mut self, affiliation: Affiliation) -> Self {
        self.affiliation = Some(affiliation);
        self
    }

    pub fn dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Push one function-ID character (e.g. `E` then `W` for ground weapon).
    pub fn function(mut self, code: char) -> Self {
        self.functions.push(code);
        self
    }

    /// Append a raw CoT fragment after the function fields, e.g. `-M`.
    pub fn append(mut self, raw: &str) -> Self {
        self.suffix.push_str(raw);
        self
    }
}

impl fmt::Display for CotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let affiliation = self.affiliation.map_or('-', Affiliation::code);
        let dimension = self.dimension.map_or('-', Dimension::code);
        write!(f, "{ATOM}-{affiliation}-{dimension}")?;
        for code in &self.functions {
            write!(f, "-{code}")?;
        }
        f.write_str(&self.suffix)
    }
}

/// Iterator returned by [`parents`].
#[derive(Debug, Clone)]
pub struct Parents<'a> {
    next: Option<&'a str>,
}

impl<'a> Iterator for Parents<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        // Walk from the end so each step costs two chars, not the whole string.
        let mut back = current.char_indices().rev().map(|(i, _)| i);
        self.next = match (back.nth(1), back.next()) {
            (Some(cut), Some(_)) => Some(&current[..cut]),
            _ => None,
        };
        Some(current)
    }
}

/// Yield `cot`, then successively drop its last two characters while more
/// than two remain.
///
/// ```
/// use cot2525_core::parents;
///
/// let chain: Vec<_> = parents("a-h-G-E-W").collect();
/// assert_eq!(chain, ["a-h-G-E-W", "a-h-G-E", "a-h-G", "a-h", "a"]);
/// ```
pub fn parents(cot: &str) -> Parents<'_> {
    Parents { next: Some(cot) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostile_ground_weapon() {
        let cot = CotType::atom()
            .affiliation(Affiliation::Hostile)
            .dimension(Dimension::Ground)
            .function('E')
            .function('W');
        assert_eq!(cot.to_string(), "a-h-G-E-W");
    }

    #[test]
    fn unset_fields_render_as_placeholders() {
        assert_eq!(CotType::atom().to_string(), "a---");
        assert_eq!(
            CotType::atom().affiliation(Affiliation::Friendly).to_string(),
            "a-f--"
        );
    }

    #[test]
    fn append_raw_suffix() {
        let cot = CotType::atom()
            .affiliation(Affiliation::Friendly)
            .dimension(Dimension::Air)
            .function('W')
            .append("-M");
        assert_eq!(cot.to_string(), "a-f-A-W-M");
    }

    #[test]
    fn affiliation_from_name_or_code() {
        assert_eq!("hostile".parse::<Affiliation>(), Ok(Affiliation::Hostile));
        assert_eq!("K".parse::<Affiliation>(), Ok(Affiliation::Faker));
        assert!("rogue".parse::<Affiliation>().is_err());
    }

    #[test]
    fn dimension_from_name_or_code() {
        assert_eq!("Air".parse::<Dimension>(), Ok(Dimension::Air));
        assert_eq!("g".parse::<Dimension>(), Ok(Dimension::Ground));
        assert_eq!("underwater".parse::<Dimension>(), Ok(Dimension::Subsurface));
        assert!("space".parse::<Dimension>().is_err());
    }

    #[test]
    fn parents_of_short_input() {
        assert_eq!(parents("a-f").collect::<Vec<_>>(), ["a-f", "a"]);
        assert_eq!(parents("a").collect::<Vec<_>>(), ["a"]);
        assert_eq!(parents("").collect::<Vec<_>>(), [""]);
    }

    #[test]
    fn parents_respect_char_boundaries() {
        assert_eq!(parents("a-é-ü").collect::<Vec<_>>(), ["a-é-ü", "a-é", "a"]);
    }
}
