use std::collections::BTreeMap;

use serde::de::{Deserializer, Error};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::lenient;

/// Caller-supplied skill → relative importance mapping.
///
/// Keys are compared case-insensitively by the engine. Weights need not sum to
/// anything in particular; the skills subscore normalizes by their total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SkillsWeightage(BTreeMap<String, f64>);

impl SkillsWeightage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, skill: impl Into<String>, weight: f64) -> Self {
        self.0.insert(skill.into(), weight);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(skill, weight)| (skill.as_str(), *weight))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for SkillsWeightage {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, w)| (k.into(), w)).collect())
    }
}

impl<'de> Deserialize<'de> for SkillsWeightage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => {
                let mut weights = BTreeMap::new();
                for (skill, value) in map {
                    let weight = lenient::weight(&value)
                        .map_err(|e| D::Error::custom(format!("skill '{skill}': {e}")))?;
                    weights.insert(skill, weight);
                }
                Ok(Self(weights))
            }
            _ => Err(D::Error::custom("skills weightage must be a mapping of skill to weight")),
        }
    }
}
