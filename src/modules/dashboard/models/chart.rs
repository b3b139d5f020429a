use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::YearMonth;
use crate::modules::transactions::Representation;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Three-letter month abbreviation for 1..=12
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// Chart period selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartPeriod {
    ThisYear,
    Month,
    Custom,
    #[serde(rename = "last_3")]
    Last3,
    #[serde(rename = "last_6")]
    Last6,
}

impl ChartPeriod {
    /// `None` for anything unrecognized
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "this_year" => Some(ChartPeriod::ThisYear),
            "month" => Some(ChartPeriod::Month),
            "custom" => Some(ChartPeriod::Custom),
            "last_3" => Some(ChartPeriod::Last3),
            "last_6" => Some(ChartPeriod::Last6),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::ThisYear => "this_year",
            ChartPeriod::Month => "month",
            ChartPeriod::Custom => "custom",
            ChartPeriod::Last3 => "last_3",
            ChartPeriod::Last6 => "last_6",
        }
    }
}

/// Raw query parameters for one chart, as submitted.
///
/// Values stay strings so that malformed input can fall back instead of
/// failing the request.
#[derive(Debug, Clone, Default)]
pub struct ChartFilter {
    pub period: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub roles: Option<String>,
}

impl ChartFilter {
    pub fn period(period: &str) -> Self {
        Self {
            period: Some(period.to_string()),
            ..Self::default()
        }
    }

    pub fn role_filter(&self) -> RoleFilter {
        RoleFilter::parse(self.roles.as_deref())
    }
}

/// Resolved query window: an instant range plus the month buckets it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartWindow {
    pub period: ChartPeriod,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    /// Chronological, no gaps, never empty
    pub months: Vec<YearMonth>,
}

impl ChartWindow {
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }

    /// Inclusive on both ends
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start_utc() && instant <= self.end_utc()
    }

    pub fn bucket_index(&self, month: YearMonth) -> Option<usize> {
        self.months.binary_search(&month).ok()
    }
}

/// Representation roles a chart includes. Defaults to all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleFilter {
    buyer: bool,
    seller: bool,
    dual: bool,
}

impl Default for RoleFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl RoleFilter {
    pub fn all() -> Self {
        Self {
            buyer: true,
            seller: true,
            dual: true,
        }
    }

    /// Parses `buyer,dual`. Unknown names are ignored; an empty result means all roles.
    pub fn parse(value: Option<&str>) -> Self {
        let mut filter = Self {
            buyer: false,
            seller: false,
            dual: false,
        };

        for token in value.unwrap_or_default().split(',') {
            match token.trim().parse::<Representation>() {
                Ok(Representation::Buyer) => filter.buyer = true,
                Ok(Representation::Seller) => filter.seller = true,
                Ok(Representation::Dual) => filter.dual = true,
                Err(_) => {}
            }
        }

        if filter.roles().is_empty() {
            Self::all()
        } else {
            filter
        }
    }

    pub fn includes(&self, role: Representation) -> bool {
        match role {
            Representation::Buyer => self.buyer,
            Representation::Seller => self.seller,
            Representation::Dual => self.dual,
        }
    }

    pub fn roles(&self) -> Vec<Representation> {
        Representation::ALL
            .into_iter()
            .filter(|r| self.includes(*r))
            .collect()
    }

    /// Comma-joined codes, for echoing back to the client
    pub fn to_param(&self) -> String {
        self.roles()
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Per-role accumulator for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleTotals {
    /// Sum of defined GCI
    pub gci_total: Decimal,
    /// Deals that contributed to `gci_total`
    pub gci_count: u32,
    /// Sum of final sales prices that are set
    pub sales_total: Decimal,
    /// Every closed deal, priced or not
    pub closed_count: u32,
}

/// One calendar month of aggregated closed deals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    pub month: YearMonth,
    pub buyer: RoleTotals,
    pub seller: RoleTotals,
    pub dual: RoleTotals,
}

impl MonthBucket {
    pub fn empty(month: YearMonth) -> Self {
        Self {
            month,
            buyer: RoleTotals::default(),
            seller: RoleTotals::default(),
            dual: RoleTotals::default(),
        }
    }

    pub fn role(&self, role: Representation) -> &RoleTotals {
        match role {
            Representation::Buyer => &self.buyer,
            Representation::Seller => &self.seller,
            Representation::Dual => &self.dual,
        }
    }

    pub fn role_mut(&mut self, role: Representation) -> &mut RoleTotals {
        match role {
            Representation::Buyer => &mut self.buyer,
            Representation::Seller => &mut self.seller,
            Representation::Dual => &mut self.dual,
        }
    }

    pub fn gci_total(&self) -> Decimal {
        self.buyer.gci_total + self.seller.gci_total + self.dual.gci_total
    }

    pub fn sales_total(&self) -> Decimal {
        self.buyer.sales_total + self.seller.sales_total + self.dual.sales_total
    }
}
