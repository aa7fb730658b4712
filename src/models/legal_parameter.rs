//! Legal parameter model.
//!
//! A legal parameter is a named percentage rule published by the HR API:
//! social-security rates, educational insurance, and the ISR brackets.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The legal concept a parameter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterCategory {
    /// Caja de Seguro Social contributions.
    SocialSecurity,
    /// Seguro educativo contributions.
    EducationalInsurance,
    /// Impuesto sobre la renta brackets.
    Isr,
    /// Anything else.
    Other,
}

/// Who bears a parameter's percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    /// Withheld from the employee's pay.
    Employee,
    /// Paid by the employer on top of the employee's pay.
    Employer,
    /// A fixed rule independent of either party.
    Fixed,
}

/// Whether a parameter is in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterStatus {
    /// The parameter is applied.
    Active,
    /// The parameter is ignored.
    Inactive,
}

/// A named percentage rule.
///
/// `percentage` is expressed in percent (`15` means 15 %). `min_range` and
/// `max_range` are only meaningful for ISR brackets and describe the annual
/// income interval `[min_range, max_range)`; a missing `max_range` is unbounded.
///
/// # Example
///
/// ```
/// use planilla_engine::models::{LegalParameter, ParameterCategory, ParameterStatus, ParameterType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let parameter = LegalParameter {
///     key: "css_empleado".to_string(),
///     name: "Seguro Social - Empleado".to_string(),
///     category: ParameterCategory::SocialSecurity,
///     parameter_type: ParameterType::Employee,
///     percentage: Decimal::new(975, 2),
///     min_range: None,
///     max_range: None,
///     status: ParameterStatus::Active,
///     effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// };
///
/// assert!(parameter.is_in_force(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalParameter {
    /// Unique key of the parameter.
    pub key: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// The legal concept of the parameter.
    pub category: ParameterCategory,
    /// Who bears the percentage.
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    /// The rate in percent.
    pub percentage: Decimal,
    /// Inclusive lower bound of annual income (ISR only).
    #[serde(default)]
    pub min_range: Option<Decimal>,
    /// Exclusive upper bound of annual income (ISR only).
    #[serde(default)]
    pub max_range: Option<Decimal>,
    /// Whether the parameter is in force.
    pub status: ParameterStatus,
    /// The first date the parameter applies.
    pub effective_date: NaiveDate,
}

impl LegalParameter {
    /// Returns true if the parameter is active.
    pub fn is_active(&self) -> bool {
        self.status == ParameterStatus::Active
    }

    /// Returns true if the parameter is active and already effective on `date`.
    pub fn is_in_force(&self, date: NaiveDate) -> bool {
        self.is_active() && self.effective_date <= date
    }

    /// Returns true if the parameter has the given category and type.
    pub fn matches(&self, category: ParameterCategory, parameter_type: ParameterType) -> bool {
        self.category == category && self.parameter_type == parameter_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deserialize_isr_bracket_parameter() {
        let json = r#"{
            "key": "isr_tramo_2",
            "name": "ISR 15%",
            "category": "isr",
            "type": "employee",
            "percentage": "15",
            "minRange": "11000",
            "maxRange": "50000",
            "status": "active",
            "effectiveDate": "2024-01-01"
        }"#;

        let parameter: LegalParameter = serde_json::from_str(json).unwrap();
        assert_eq!(parameter.category, ParameterCategory::Isr);
        assert_eq!(parameter.parameter_type, ParameterType::Employee);
        assert_eq!(parameter.percentage, dec("15"));
        assert_eq!(parameter.min_range, Some(dec("11000")));
        assert_eq!(parameter.max_range, Some(dec("50000")));
        assert_eq!(parameter.effective_date, date(2024, 1, 1));
    }

    #[test]
    fn test_deserialize_open_ended_bracket() {
        let json = r#"{
            "key": "isr_tramo_3",
            "category": "isr",
            "type": "employee",
            "percentage": 25,
            "minRange": 50000,
            "maxRange": null,
            "status": "active",
            "effectiveDate": "2024-01-01"
        }"#;

        let parameter: LegalParameter = serde_json::from_str(json).unwrap();
        assert_eq!(parameter.max_range, None);
        assert_eq!(parameter.name, "");
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&ParameterCategory::SocialSecurity).unwrap(),
            "\"social_security\""
        );
        assert_eq!(
            serde_json::to_string(&ParameterCategory::EducationalInsurance).unwrap(),
            "\"educational_insurance\""
        );
        assert_eq!(
            serde_json::to_string(&ParameterCategory::Isr).unwrap(),
            "\"isr\""
        );
    }

    #[test]
    fn test_type_field_is_renamed() {
        let parameter = LegalParameter {
            key: "css_patrono".to_string(),
            name: String::new(),
            category: ParameterCategory::SocialSecurity,
            parameter_type: ParameterType::Employer,
            percentage: dec("13.25"),
            min_range: None,
            max_range: None,
            status: ParameterStatus::Active,
            effective_date: date(2024, 1, 1),
        };
        let json = serde_json::to_string(&parameter).unwrap();
        assert!(json.contains("\"type\":\"employer\""));
        assert!(json.contains("\"effectiveDate\":\"2024-01-01\""));
    }

    #[test]
    fn test_inactive_parameter_is_not_in_force() {
        let parameter = LegalParameter {
            key: "css_empleado".to_string(),
            name: String::new(),
            category: ParameterCategory::SocialSecurity,
            parameter_type: ParameterType::Employee,
            percentage: dec("9.75"),
            min_range: None,
            max_range: None,
            status: ParameterStatus::Inactive,
            effective_date: date(2024, 1, 1),
        };
        assert!(!parameter.is_active());
        assert!(!parameter.is_in_force(date(2025, 1, 1)));
    }

    #[test]
    fn test_future_parameter_is_not_in_force() {
        let parameter = LegalParameter {
            key: "css_empleado".to_string(),
            name: String::new(),
            category: ParameterCategory::SocialSecurity,
            parameter_type: ParameterType::Employee,
            percentage: dec("9.75"),
            min_range: None,
            max_range: None,
            status: ParameterStatus::Active,
            effective_date: date(2026, 1, 1),
        };
        assert!(!parameter.is_in_force(date(2025, 12, 31)));
        assert!(parameter.is_in_force(date(2026, 1, 1)));
        assert!(parameter.matches(ParameterCategory::SocialSecurity, ParameterType::Employee));
        assert!(!parameter.matches(ParameterCategory::SocialSecurity, ParameterType::Employer));
    }
}
