use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程等级
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseLevel {
    Basic,
    Intermediate,
    Advanced,
    Expert,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Basic => "basic",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
            CourseLevel::Expert => "expert",
        }
    }
}

impl<'de> Deserialize<'de> for CourseLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的课程等级: '{s}'. 支持的等级: basic, intermediate, advanced, expert"
            ))
        })
    }
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CourseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(CourseLevel::Basic),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            "expert" => Ok(CourseLevel::Expert),
            _ => Err(format!("Invalid course level: {s}")),
        }
    }
}

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub level: CourseLevel,
    pub price: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_round_trip_through_str() {
        for level in [
            CourseLevel::Basic,
            CourseLevel::Intermediate,
            CourseLevel::Advanced,
            CourseLevel::Expert,
        ] {
            assert_eq!(level.as_str().parse::<CourseLevel>().unwrap(), level);
        }
        assert_eq!("EXPERT".parse::<CourseLevel>().unwrap(), CourseLevel::Expert);
        assert!("master".parse::<CourseLevel>().is_err());
    }
}
