use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bean {
    pub bean_id: i64,
    pub flavor_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub color_group: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub sugar_free: bool,
    #[serde(default)]
    pub seasonal: bool,
    #[serde(default)]
    pub kosher: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub color_id: String,
    #[serde(default)]
    pub color_description: String,
    #[serde(default)]
    pub hex: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    #[serde(rename = "CombinationId")]
    pub combination_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    /// Flavor names, split from the comma-joined `TagSerialized` field.
    #[serde(rename = "TagSerialized", with = "tag_list")]
    pub tags: Vec<String>,
}

impl Combination {
    pub fn tag_line(&self) -> String {
        self.tags.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCombination {
    #[serde(flatten)]
    pub combination: Combination,
    pub match_fraction: f64,
}

impl ScoredCombination {
    /// Whole-number percentage, as displayed next to the combination name.
    pub fn match_percent(&self) -> u32 {
        (self.match_fraction * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(deserialize_with = "lenient_total")]
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttributeCounts {
    pub gluten_free: usize,
    pub sugar_free: usize,
    pub seasonal: usize,
    pub kosher: usize,
}

fn lenient_total<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Total {
        Number(u64),
        Text(String),
    }

    match Total::deserialize(deserializer)? {
        Total::Number(n) => Ok(n),
        Total::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

mod tag_list {
    use super::*;

    pub fn serialize<S>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&tags.join(","))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Tags {
            Joined(String),
            List(Vec<String>),
        }

        Ok(match Tags::deserialize(deserializer)? {
            Tags::Joined(s) if s.is_empty() => Vec::new(),
            Tags::Joined(s) => s.split(',').map(str::to_string).collect(),
            Tags::List(list) => list
                .iter()
                .flat_map(|item| item.split(','))
                .map(str::to_string)
                .collect(),
        })
    }
}
