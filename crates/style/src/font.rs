use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

impl FontWeight {
    pub fn is_bold(self) -> bool {
        matches!(self, FontWeight::Bold)
    }

    /// Parse a font weight from a string (e.g., "bold", "400")
    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "regular" | "normal" => Ok(FontWeight::Regular),
            "bold" => Ok(FontWeight::Bold),
            other => other
                .parse::<u16>()
                .map(Self::from_numeric)
                .map_err(|_| format!("Invalid font weight: '{}'", s)),
        }
    }

    /// Maps a 100-900 weight onto the two faces the standard fonts provide.
    pub fn from_numeric(weight: u16) -> Self {
        if weight >= 600 {
            FontWeight::Bold
        } else {
            FontWeight::Regular
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FontWeightDef {
            Str(String),
            Num(u16),
        }

        match FontWeightDef::deserialize(deserializer)? {
            FontWeightDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            FontWeightDef::Num(n) => Ok(FontWeight::from_numeric(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_numbers() {
        assert_eq!(serde_json::from_str::<FontWeight>("\"bold\"").unwrap(), FontWeight::Bold);
        assert_eq!(serde_json::from_str::<FontWeight>("\"normal\"").unwrap(), FontWeight::Regular);
        assert_eq!(serde_json::from_str::<FontWeight>("700").unwrap(), FontWeight::Bold);
        assert_eq!(serde_json::from_str::<FontWeight>("\"400\"").unwrap(), FontWeight::Regular);
        assert!(serde_json::from_str::<FontWeight>("\"heavy\"").is_err());
    }
}
