use std::fmt;
use std::str::FromStr;

/// Instrument arrangements a song can ship with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arrangement {
    AiBass,
    AiChord,
    Bass,
    Lead,
    Rhythm,
    Keyboard,
    SimpleKeyboard,
    AltLead,
    AltBass,
    SimpleGuitar,
    AltRhythm,
}

impl Arrangement {
    pub fn name(self) -> &'static str {
        match self {
            Self::AiBass => "ai_bass",
            Self::AiChord => "ai_chord",
            Self::Bass => "bass",
            Self::Lead => "lead",
            Self::Rhythm => "rhythm",
            Self::Keyboard => "keyboard",
            Self::SimpleKeyboard => "simple_keyboard",
            Self::AltLead => "alt_lead",
            Self::AltBass => "alt_bass",
            Self::SimpleGuitar => "simple_guitar",
            Self::AltRhythm => "alt_rhythm",
        }
    }

    /// Icon file rendered next to the song in the browser.
    pub fn icon(self) -> &'static str {
        match self {
            Self::AiBass => "iconAIBass.png",
            Self::AiChord => "iconAIChord.png",
            Self::Bass => "iconBass.png",
            Self::Lead => "iconLead.png",
            Self::Rhythm => "iconRhythm.png",
            Self::Keyboard => "iconKeyboard.png",
            Self::SimpleKeyboard => "iconSimpleKeyboard.png",
            Self::AltLead => "iconALTLead.png",
            Self::AltBass => "iconALTBass.png",
            Self::SimpleGuitar => "iconSimpleGuitar.png",
            Self::AltRhythm => "iconALTRhythm.png",
        }
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownArrangement(pub String);

impl fmt::Display for UnknownArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown arrangement: {}", self.0)
    }
}

impl std::error::Error for UnknownArrangement {}

impl FromStr for Arrangement {
    type Err = UnknownArrangement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ai_bass" => Ok(Self::AiBass),
            "ai_chord" => Ok(Self::AiChord),
            "bass" => Ok(Self::Bass),
            "lead" => Ok(Self::Lead),
            "rhythm" => Ok(Self::Rhythm),
            "keyboard" => Ok(Self::Keyboard),
            "simple_keyboard" => Ok(Self::SimpleKeyboard),
            "alt_lead" => Ok(Self::AltLead),
            "alt_bass" => Ok(Self::AltBass),
            "simple_guitar" => Ok(Self::SimpleGuitar),
            "alt_rhythm" => Ok(Self::AltRhythm),
            _ => Err(UnknownArrangement(s.to_string())),
        }
    }
}

/// Icons for the known arrangements among `names`, in input order, without duplicates.
pub fn arrangement_icons<S: AsRef<str>>(names: &[S]) -> Vec<&'static str> {
    let mut icons = Vec::with_capacity(names.len());
    for name in names {
        if let Ok(arrangement) = name.as_ref().parse::<Arrangement>() {
            let icon = arrangement.icon();
            if !icons.contains(&icon) {
                icons.push(icon);
            }
        }
    }
    icons
}
