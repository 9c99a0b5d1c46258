//! Weather lookup tool
//!
//! Simulated backend: every city gets the same synthetic conditions. A real
//! deployment would swap this for an HTTP weather API client.

use crate::{Tool, ToolOutput, required_str};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use troupe_common::ToolError;

/// Synthetic weather values for a city.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub condition: String,
    pub temperature_c: i32,
    pub humidity_pct: u32,
    pub wind_mps: u32,
    /// True while the backend is the built-in simulation.
    pub simulated: bool,
}

/// Tool returning current weather for a city.
pub struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "weather"
    }

    fn description(&self) -> &str {
        "Get current weather information for a city"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "Name of the city to look up"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolOutput, ToolError> {
        self.validate_params(&params)?;
        let city = required_str(&params, "city")?;
        debug!(city, "weather lookup");

        Ok(ToolOutput::Weather(WeatherReport {
            city: city.to_string(),
            condition: "晴朗".to_string(),
            temperature_c: 22,
            humidity_pct: 65,
            wind_mps: 3,
            simulated: true,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn returns_report_for_city() {
        let tool = WeatherTool;
        let output = tool.execute(json!({"city": "北京"})).await.unwrap();
        match output {
            ToolOutput::Weather(report) => {
                assert_eq!(report.city, "北京");
                assert_eq!(report.temperature_c, 22);
                assert!(report.simulated);
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_city_is_an_error() {
        let tool = WeatherTool;
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::MissingParam("city")));
    }
}
