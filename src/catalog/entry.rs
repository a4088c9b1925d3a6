use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AppError;

/// The two kinds of catalog entry a collection can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Server,
    Skill,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Server => "server",
            ItemType::Skill => "skill",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "server" => Ok(ItemType::Server),
            "skill" => Ok(ItemType::Skill),
            _ => Err(AppError::validation("item_type must be \"server\" or \"skill\"")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServer {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub author: String,
    pub repo: String,
    pub stars: u32,
    pub verified: bool,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub author: String,
    pub installs: u32,
    pub stars: u32,
    pub verified: bool,
    #[serde(default)]
    pub featured: bool,
}

pub fn category_label(category: &str) -> &str {
    match category {
        "dev-tools" => "Dev Tools",
        "databases" => "Databases",
        "cloud" => "Cloud & Infra",
        "productivity" => "Productivity",
        "web" => "Web & Search",
        "ai" => "AI & Memory",
        "devops" => "DevOps",
        "coding" => "Coding",
        "communication" => "Communication",
        "data" => "Data",
        other => other,
    }
}
