use serde::Deserialize;
use ts_rs::TS;

use super::entities::CourseLevel;
use crate::errors::{AcademyError, Result};
use crate::models::common::PaginationQuery;

// 课程查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub level: Option<CourseLevel>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: u64,
    pub size: u64,
    pub level: Option<CourseLevel>,
    pub search: Option<String>,
}

impl From<CourseListParams> for CourseListQuery {
    fn from(params: CourseListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            level: params.level,
            search: params.search,
        }
    }
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AcademyError::validation("Course price must be a non-negative number"));
    }
    Ok(())
}

fn validate_course_name(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 128 {
        return Err(AcademyError::validation(
            "Course name must be between 1 and 128 characters",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub name: String,
    pub description: Option<String>,
    pub level: CourseLevel,
    #[serde(default)]
    pub price: f64,
}

impl CreateCourseRequest {
    pub fn validate(&self) -> Result<()> {
        validate_course_name(&self.name)?;
        validate_price(self.price)
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub level: Option<CourseLevel>,
    pub price: Option<f64>,
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_course_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_validation() {
        let mut req = CreateCourseRequest {
            name: "Rust 101".to_string(),
            description: None,
            level: CourseLevel::Basic,
            price: 10.0,
        };
        assert!(req.validate().is_ok());
        req.price = -1.0;
        assert!(req.validate().is_err());
        req.price = 0.0;
        req.name = "   ".to_string();
        assert!(req.validate().is_err());
    }
}
