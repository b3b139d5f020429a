use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_BUYER_COLOR: &str = "#1e4976";
pub const DEFAULT_SELLER_COLOR: &str = "#137333";
pub const DEFAULT_DUAL_COLOR: &str = "#b45309";

/// The single settings row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppSettings {
    pub app_name: String,
    /// Stored JSON object; see [`ChartColors::resolve`]
    pub chart_colors: Value,
    /// 0 disables the timeout
    pub inactivity_timeout_minutes: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: "RE CRM".to_string(),
            chart_colors: Value::Object(Default::default()),
            inactivity_timeout_minutes: 0,
        }
    }
}

impl AppSettings {
    pub fn colors(&self) -> ChartColors {
        ChartColors::resolve(&self.chart_colors)
    }
}

/// Bar colors per representation role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartColors {
    pub buyer: String,
    pub seller: String,
    pub dual: String,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            buyer: DEFAULT_BUYER_COLOR.to_string(),
            seller: DEFAULT_SELLER_COLOR.to_string(),
            dual: DEFAULT_DUAL_COLOR.to_string(),
        }
    }
}

impl ChartColors {
    /// Resolve stored colors. `buyer` and `seller` fall back to the older
    /// `income_bar` / `sales_bar` keys, then to the built-in defaults.
    /// Blank and non-string values count as unset.
    pub fn resolve(stored: &Value) -> Self {
        let get = |key: &str| {
            stored
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            buyer: get("buyer")
                .or_else(|| get("income_bar"))
                .unwrap_or_else(|| DEFAULT_BUYER_COLOR.to_string()),
            seller: get("seller")
                .or_else(|| get("sales_bar"))
                .unwrap_or_else(|| DEFAULT_SELLER_COLOR.to_string()),
            dual: get("dual").unwrap_or_else(|| DEFAULT_DUAL_COLOR.to_string()),
        }
    }
}
