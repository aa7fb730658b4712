//! Income tax (ISR) withholding.
//!
//! ISR is progressive by annual income. The brackets come from the HR API as
//! legal parameters of category `isr`; they are validated and sorted once into
//! an [`IsrBracketTable`] and then reused for every employee of a run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{LegalParameter, ParameterCategory};

use super::rounding::{percent_of, round_currency};
use super::salary::MONTHS_PER_YEAR;

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// A single progressive bracket over annual income `[min, max)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsrBracket {
    /// The key of the legal parameter the bracket came from.
    pub key: String,
    /// Inclusive lower bound of annual income.
    pub min: Decimal,
    /// Exclusive upper bound of annual income; `None` is unbounded.
    pub max: Option<Decimal>,
    /// Rate applied to income inside the bracket, in percent.
    pub rate: Decimal,
}

impl IsrBracket {
    /// Returns the portion of `annual_income` that falls inside this bracket.
    fn taxable_portion(&self, annual_income: Decimal) -> Decimal {
        if annual_income <= self.min {
            return Decimal::ZERO;
        }
        let upper = match self.max {
            Some(max) => annual_income.min(max),
            None => annual_income,
        };
        upper - self.min
    }
}

/// A validated, ascending table of ISR brackets.
///
/// Construction rejects negative bounds, inverted ranges, rates outside
/// 0-100, overlapping ranges, and an unbounded bracket that is not the last.
/// Gaps between brackets are allowed; income inside a gap is not taxed.
///
/// # Example
///
/// ```
/// use planilla_engine::calculation::{IsrBracket, IsrBracketTable};
/// use rust_decimal::Decimal;
///
/// let table = IsrBracketTable::new(vec![
///     IsrBracket { key: "b".into(), min: Decimal::from(11000), max: Some(Decimal::from(50000)), rate: Decimal::from(15) },
///     IsrBracket { key: "a".into(), min: Decimal::ZERO, max: Some(Decimal::from(11000)), rate: Decimal::ZERO },
/// ])
/// .unwrap();
///
/// assert_eq!(table.brackets()[0].key, "a");
///
/// let overlapping = IsrBracketTable::new(vec![
///     IsrBracket { key: "a".into(), min: Decimal::ZERO, max: Some(Decimal::from(12000)), rate: Decimal::ZERO },
///     IsrBracket { key: "b".into(), min: Decimal::from(11000), max: None, rate: Decimal::from(15) },
/// ]);
/// assert!(overlapping.is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IsrBracketTable {
    brackets: Vec<IsrBracket>,
}

impl IsrBracketTable {
    /// Builds a table from brackets in any order.
    pub fn new(brackets: Vec<IsrBracket>) -> EngineResult<Self> {
        let mut brackets = brackets;

        for bracket in &brackets {
            Self::validate_bracket(bracket)?;
        }

        brackets.sort_by(|a, b| a.min.cmp(&b.min));

        for pair in brackets.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            match lower.max {
                None => {
                    return Err(EngineError::InvalidBracket {
                        key: lower.key.clone(),
                        message: format!(
                            "unbounded bracket must be the last one, but '{}' starts at {}",
                            upper.key, upper.min
                        ),
                    });
                }
                Some(max) if max > upper.min => {
                    return Err(EngineError::InvalidBracket {
                        key: upper.key.clone(),
                        message: format!(
                            "range [{}, ...) overlaps bracket '{}' ending at {}",
                            upper.min, lower.key, max
                        ),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(Self { brackets })
    }

    /// Builds a table from the ISR parameters in `parameters`.
    ///
    /// Parameters of other categories are ignored. The caller decides which
    /// parameters are in force. A missing `min_range` is treated as zero.
    pub fn from_parameters(parameters: &[LegalParameter]) -> EngineResult<Self> {
        let brackets = parameters
            .iter()
            .filter(|p| p.category == ParameterCategory::Isr)
            .map(|p| IsrBracket {
                key: p.key.clone(),
                min: p.min_range.unwrap_or(Decimal::ZERO),
                max: p.max_range,
                rate: p.percentage,
            })
            .collect();
        Self::new(brackets)
    }

    fn validate_bracket(bracket: &IsrBracket) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidBracket {
            key: bracket.key.clone(),
            message,
        };

        if bracket.min < Decimal::ZERO {
            return Err(invalid(format!("minimum {} is negative", bracket.min)));
        }
        if let Some(max) = bracket.max {
            if max <= bracket.min {
                return Err(invalid(format!(
                    "minimum {} is not below maximum {}",
                    bracket.min, max
                )));
            }
        }
        if bracket.rate < Decimal::ZERO || bracket.rate > ONE_HUNDRED {
            return Err(invalid(format!(
                "rate {} must be between 0 and 100",
                bracket.rate
            )));
        }
        Ok(())
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[IsrBracket] {
        &self.brackets
    }

    /// Returns true if the table has no brackets.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Returns the unrounded annual tax on `annual_income`.
    pub fn annual_tax(&self, annual_income: Decimal) -> Decimal {
        self.brackets
            .iter()
            .map(|b| percent_of(b.taxable_portion(annual_income), b.rate))
            .sum()
    }
}

/// Calculates the monthly ISR withholding on a monthly income.
///
/// The income is annualized (`× 12`), taxed progressively across the table,
/// and the annual tax is divided back by 12 and rounded to cents. An empty
/// table yields zero.
///
/// # Examples
///
/// ```
/// use planilla_engine::calculation::{calculate_isr, IsrBracket, IsrBracketTable};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = IsrBracketTable::new(vec![
///     IsrBracket { key: "exento".into(), min: Decimal::ZERO, max: Some(Decimal::from(11000)), rate: Decimal::ZERO },
///     IsrBracket { key: "15".into(), min: Decimal::from(11000), max: Some(Decimal::from(50000)), rate: Decimal::from(15) },
///     IsrBracket { key: "25".into(), min: Decimal::from(50000), max: None, rate: Decimal::from(25) },
/// ])
/// .unwrap();
///
/// // (12000 - 11000) × 15 % = 150 per year, 12.50 per month
/// assert_eq!(calculate_isr(Decimal::from(1000), &table), Decimal::from_str("12.50").unwrap());
/// assert_eq!(calculate_isr(Decimal::from(1000), &IsrBracketTable::default()), Decimal::ZERO);
/// ```
pub fn calculate_isr(monthly_income: Decimal, table: &IsrBracketTable) -> Decimal {
    let annual_income = monthly_income * MONTHS_PER_YEAR;
    round_currency(table.annual_tax(annual_income) / MONTHS_PER_YEAR)
}
