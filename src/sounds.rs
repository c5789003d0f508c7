use crate::PhonInvError::GenericParseError;
use crate::PhonInvResult;
use std::collections::HashMap;
use std::io;

pub use consonants::*;
pub use vowels::*;

/// A symbol of the phonetic alphabet together with its articulatory features.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct Sound {
    pub(crate) representation: String,
    pub(crate) kind: SoundKind,
}

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum SoundKind {
    Vowel(Vowel),
    Consonant(Consonant),
}

impl Sound {
    pub fn representation(&self) -> &str {
        self.representation.as_str()
    }

    /// Human readable feature description, e.g. `voiceless velar plosive consonant`.
    pub fn description(&self) -> String {
        match &self.kind {
            SoundKind::Vowel(v) => format!("{} vowel", v),
            SoundKind::Consonant(c) => format!("{} consonant", c),
        }
    }
}

pub fn parse_csv_to_map<R: io::Read>(reader: R) -> PhonInvResult<Vec<HashMap<String, String>>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut records = vec![];
    for result in rdr.records() {
        let record = result?;
        let map = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        records.push(map);
    }
    Ok(records)
}

fn field<'a>(map: &'a HashMap<String, String>, name: &str) -> PhonInvResult<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| GenericParseError(format!("No {} defined", name)))
}

fn feature<T: std::str::FromStr>(map: &HashMap<String, String>, name: &str) -> PhonInvResult<T> {
    let value = field(map, name)?;
    value
        .trim()
        .parse::<T>()
        .map_err(|_| GenericParseError(format!("Could not parse {} '{}'", name, value)))
}

mod vowels {
    use super::{feature, field, parse_csv_to_map, Sound, SoundKind};
    use crate::PhonInvResult;
    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};
    use std::io;
    use strum::{Display as StrumDisplay, EnumString};

    pub fn parse_vowels<R: io::Read>(input: R) -> PhonInvResult<Vec<Sound>> {
        parse_csv_to_map(input)?
            .into_iter()
            .map(Vowel::try_from_map)
            .collect()
    }

    #[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, Hash)]
    pub struct Vowel {
        pub(crate) height: Height,
        pub(crate) backness: Backness,
        pub(crate) roundedness: Roundedness,
    }

    impl Vowel {
        pub fn try_from_map(map: HashMap<String, String>) -> PhonInvResult<Sound> {
            let vowel = Vowel {
                height: feature(&map, "height")?,
                backness: feature(&map, "backness")?,
                roundedness: feature(&map, "roundedness")?,
            };
            Ok(Sound {
                representation: field(&map, "symbol")?.to_owned(),
                kind: SoundKind::Vowel(vowel),
            })
        }
    }

    impl Display for Vowel {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{} {} {}", self.height, self.backness, self.roundedness)
        }
    }

    #[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, StrumDisplay, EnumString)]
    #[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
    pub enum Height {
        Close,
        NearClose,
        CloseMid,
        Mid,
        OpenMid,
        NearOpen,
        Open,
    }

    #[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, StrumDisplay, EnumString)]
    #[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
    pub enum Backness {
        Front,
        NearFront,
        Central,
        NearBack,
        Back,
    }

    #[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, StrumDisplay, EnumString)]
    #[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
    pub enum Roundedness {
        Unrounded,
        Rounded,
    }
}

mod consonants {
    use super::{feature, field, parse_csv_to_map, Sound, SoundKind};
    use crate::PhonInvError::GenericParseError;
    use crate::PhonInvResult;
    use itertools::Itertools;
    use smallvec::SmallVec;
    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};
    use std::io;
    use strum::{Display as StrumDisplay, EnumString};

    pub fn parse_consonants<R: io::Read>(input: R) -> PhonInvResult<Vec<Sound>> {
        parse_csv_to_map(input)?
            .into_iter()
            .map(Consonant::try_from_map)
            .collect()
    }

    /// Manners of articulation, kept sorted so `affricate sibilant` and
    /// `sibilant affricate` compare equal.
    #[derive(Debug, Clone, Eq, Hash, PartialEq)]
    pub struct Manners {
        pub(crate) inner: SmallVec<[Manner; 4]>,
    }

    impl Manners {
        pub fn contains(&self, manner: &Manner) -> bool {
            self.inner.contains(manner)
        }
    }

    impl TryFrom<&str> for Manners {
        type Error = crate::PhonInvError;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            let inner = value
                .split_whitespace()
                .map(|m| {
                    m.parse::<Manner>()
                        .map_err(|_| GenericParseError(format!("Unknown manner '{}'", m)))
                })
                .collect::<PhonInvResult<Vec<_>>>()?
                .into_iter()
                .sorted()
                .collect::<SmallVec<[Manner; 4]>>();
            if inner.is_empty() {
                return Err(GenericParseError("No manners defined".to_string()));
            }
            Ok(Self { inner })
        }
    }

    impl Display for Manners {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.inner.iter().join(" "))
        }
    }

    #[derive(Debug, Clone, Eq, Hash, PartialEq)]
    pub struct Consonant {
        pub(crate) voice: Option<Voice>,
        pub(crate) place: Place,
        pub(crate) manners: Manners,
    }

    impl Consonant {
        pub fn try_from_map(map: HashMap<String, String>) -> PhonInvResult<Sound> {
            let voice = match map.get("voice").map(|v| v.trim()) {
                None | Some("") => None,
                Some(_) => Some(feature(&map, "voice")?),
            };
            let consonant = Self {
                voice,
                place: feature(&map, "place")?,
                manners: Manners::try_from(field(&map, "manner")?)?,
            };
            Ok(Sound {
                representation: field(&map, "symbol")?.to_owned(),
                kind: SoundKind::Consonant(consonant),
            })
        }
    }

    impl Display for Consonant {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            if let Some(v) = self.voice {
                write!(f, "{} ", v)?;
            }
            write!(f, "{} {}", self.place, self.manners)
        }
    }

    #[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, StrumDisplay, EnumString)]
    #[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
    pub enum Place {
        Bilabial,
        Labiodental,
        Linguolabial,
        Dental,
        Alveolar,
        Postalveolar,
        Retroflex,
        Palatal,
        Velar,
        Uvular,
        #[strum(to_string = "pharyngeal/epiglottal")]
        PharyngealEpiglottal,
        Glottal,
        LabialVelar,
        LabialPalatal,
    }

    #[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, StrumDisplay, EnumString)]
    #[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
    pub enum Voice {
        Voiceless,
        Voiced,
    }

    #[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, StrumDisplay, EnumString)]
    #[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
    pub enum Manner {
        Sibilant,
        NonSibilant,
        Lateral,
        Nasal,
        Ejective,
        Click,
        Plosive,
        Implosive,
        Affricate,
        Fricative,
        Approximant,
        #[strum(to_string = "tap/flap")]
        TapFlap,
        Trill,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const CONSONANTS: &str = "\
symbol,place,voice,manner
k,velar,voiceless,plosive
ts,alveolar,voiceless,affricate sibilant
ɺ,alveolar,voiced,tap/flap lateral
ʡ,pharyngeal/epiglottal,,plosive";

    #[test]
    fn t_parse_consonants() {
        let sounds = parse_consonants(CONSONANTS.as_bytes()).unwrap();
        assert_eq!(sounds.len(), 4);
        assert!(sounds
            .iter()
            .all(|s| matches!(s.kind, SoundKind::Consonant(_))));
        assert_eq!(sounds[0].description(), "voiceless velar plosive consonant");
        assert_eq!(
            sounds[1].description(),
            "voiceless alveolar sibilant affricate consonant"
        );
        assert_eq!(
            sounds[2].description(),
            "voiced alveolar lateral tap/flap consonant"
        );
        assert_eq!(
            sounds[3].description(),
            "pharyngeal/epiglottal plosive consonant"
        );
    }

    #[test]
    fn t_manner_order_irrelevant() {
        let a = Manners::try_from("sibilant affricate").unwrap();
        let b = Manners::try_from("affricate sibilant").unwrap();
        assert_eq!(a, b);
        assert!(a.contains(&Manner::Sibilant));
        assert!(Manners::try_from("").is_err());
        assert!(Manners::try_from("glide").is_err());
    }

    #[test]
    fn t_parse_vowels() {
        let input = "symbol,height,backness,roundedness\ni,close,front,unrounded\nɒ,Open,back,rounded";
        let sounds = parse_vowels(input.as_bytes()).unwrap();
        assert!(sounds
            .iter()
            .all(|s| matches!(s.kind, SoundKind::Vowel(_))));
        assert_eq!(sounds[0].description(), "close front unrounded vowel");
        assert_eq!(sounds[1].description(), "open back rounded vowel");
    }

    #[test]
    fn t_bad_feature_is_error() {
        let input = "symbol,height,backness,roundedness\ni,closed,front,unrounded";
        assert!(matches!(
            parse_vowels(input.as_bytes()),
            Err(GenericParseError(_))
        ));
    }

    #[test]
    fn t_consonant_without_voice() {
        let input = "symbol,place,voice,manner
ǁ,alveolar,,lateral click";
        let sounds = parse_consonants(input.as_bytes()).unwrap();
        assert_eq!(sounds[0].description(), "alveolar lateral click consonant");
    }
}
