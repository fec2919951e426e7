use super::FetchError;
use bevy::prelude::*;
use serde::Deserialize;

/// The six base stats, in the order the catalog reports them.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Hp,
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpecialAttack,
        StatKind::SpecialDefense,
        StatKind::Speed,
    ];

    pub fn api_name(self) -> &'static str {
        match self {
            StatKind::Hp => "hp",
            StatKind::Attack => "attack",
            StatKind::Defense => "defense",
            StatKind::SpecialAttack => "special-attack",
            StatKind::SpecialDefense => "special-defense",
            StatKind::Speed => "speed",
        }
    }

    /// Short label shown next to the stat bar.
    pub fn label(self) -> &'static str {
        match self {
            StatKind::Hp => "HP",
            StatKind::Attack => "ATK",
            StatKind::Defense => "DEF",
            StatKind::SpecialAttack => "SPA",
            StatKind::SpecialDefense => "SPD",
            StatKind::Speed => "SPE",
        }
    }
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub kind: StatKind,
    pub value: u32,
}

/// One creature as fetched from the catalog. Never mutated, only replaced by the next catch.
#[derive(Reflect, Debug, Clone, PartialEq)]
pub struct CreatureRecord {
    pub id: u32,
    pub name: String,
    /// High resolution official artwork.
    pub artwork_url: Option<String>,
    /// Default front sprite, the fallback when there is no artwork.
    pub sprite_url: Option<String>,
    /// Type names in slot order, one or two entries.
    pub types: Vec<String>,
    pub stats: [Stat; 6],
}

impl CreatureRecord {
    pub fn from_json(bytes: &[u8]) -> Result<Self, FetchError> {
        let body: ApiCreature =
            serde_json::from_slice(bytes).map_err(|e| FetchError::Decode(e.to_string()))?;
        Self::try_from(body)
    }

    /// First entry of the type list, themes the particle field.
    pub fn primary_type(&self) -> &str {
        self.types.first().map(String::as_str).unwrap_or("normal")
    }
}

// ===================== wire format =====================

#[derive(Deserialize)]
struct ApiCreature {
    id: u32,
    name: String,
    sprites: ApiSprites,
    types: Vec<ApiTypeSlot>,
    stats: Vec<ApiStat>,
}

#[derive(Deserialize)]
struct ApiSprites {
    front_default: Option<String>,
    #[serde(default)]
    other: Option<ApiOtherSprites>,
}

#[derive(Deserialize)]
struct ApiOtherSprites {
    #[serde(rename = "official-artwork", default)]
    official_artwork: Option<ApiArtwork>,
}

#[derive(Deserialize)]
struct ApiArtwork {
    front_default: Option<String>,
}

#[derive(Deserialize)]
struct ApiTypeSlot {
    slot: u8,
    #[serde(rename = "type")]
    kind: ApiNamed,
}

#[derive(Deserialize)]
struct ApiStat {
    base_stat: u32,
    stat: ApiNamed,
}

#[derive(Deserialize)]
struct ApiNamed {
    name: String,
}

impl TryFrom<ApiCreature> for CreatureRecord {
    type Error = FetchError;

    fn try_from(mut body: ApiCreature) -> Result<Self, Self::Error> {
        if body.id == 0 {
            return Err(FetchError::Decode("creature id must be positive".into()));
        }

        body.types.sort_by_key(|t| t.slot);
        let types: Vec<String> = body.types.into_iter().map(|t| t.kind.name).collect();
        if types.is_empty() {
            return Err(FetchError::Decode(format!("#{} has no types", body.id)));
        }

        let mut stats = StatKind::ALL.map(|kind| Stat { kind, value: 0 });
        for stat in stats.iter_mut() {
            let found = body
                .stats
                .iter()
                .find(|s| s.stat.name == stat.kind.api_name())
                .ok_or_else(|| {
                    FetchError::Decode(format!(
                        "#{} is missing the '{}' stat",
                        body.id,
                        stat.kind.api_name()
                    ))
                })?;
            stat.value = found.base_stat;
        }

        let artwork_url = body
            .sprites
            .other
            .and_then(|o| o.official_artwork)
            .and_then(|a| a.front_default);

        Ok(Self {
            id: body.id,
            name: body.name,
            artwork_url,
            sprite_url: body.sprites.front_default,
            types,
            stats,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Trimmed body of `GET /pokemon/1`, with the types shuffled out of slot order.
    pub const BULBASAUR: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "base_experience": 64,
        "sprites": {
            "front_default": "https://img.example/sprites/1.png",
            "other": {
                "official-artwork": {
                    "front_default": "https://img.example/artwork/1.png"
                }
            }
        },
        "types": [
            { "slot": 2, "type": { "name": "poison", "url": "" } },
            { "slot": 1, "type": { "name": "grass", "url": "" } }
        ],
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "attack" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "defense" } },
            { "base_stat": 65, "effort": 1, "stat": { "name": "special-attack" } },
            { "base_stat": 65, "effort": 0, "stat": { "name": "special-defense" } },
            { "base_stat": 45, "effort": 0, "stat": { "name": "speed" } }
        ]
    }"#;

    pub fn bulbasaur() -> CreatureRecord {
        CreatureRecord::from_json(BULBASAUR.as_bytes()).expect("fixture should decode")
    }

    #[test]
    fn decodes_catalog_body() {
        let record = bulbasaur();
        assert_eq!(record.id, 1);
        assert_eq!(record.name, "bulbasaur");
        assert_eq!(record.types, vec!["grass", "poison"]);
        assert_eq!(record.primary_type(), "grass");
        assert_eq!(
            record.stats[3],
            Stat {
                kind: StatKind::SpecialAttack,
                value: 65
            }
        );
        assert_eq!(
            record.artwork_url.as_deref(),
            Some("https://img.example/artwork/1.png")
        );
    }

    #[test]
    fn missing_artwork_is_not_an_error() {
        let body = BULBASAUR.replace(
            r#""official-artwork": {
                    "front_default": "https://img.example/artwork/1.png"
                }"#,
            r#""official-artwork": { "front_default": null }"#,
        );
        let record = CreatureRecord::from_json(body.as_bytes()).unwrap();
        assert_eq!(record.artwork_url, None);
        assert!(record.sprite_url.is_some());
    }

    #[test]
    fn missing_stat_fails_decoding() {
        let body = BULBASAUR.replace(r#""name": "speed""#, r#""name": "luck""#);
        let err = CreatureRecord::from_json(body.as_bytes()).unwrap_err();
        assert!(matches!(err, FetchError::Decode(msg) if msg.contains("speed")));
    }

    #[test]
    fn garbage_fails_decoding() {
        let err = CreatureRecord::from_json(b"<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
